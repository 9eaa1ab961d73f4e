//! Wallet-declared capabilities.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Capabilities a wallet may declare.
///
/// The string form is the wallet wire key (e.g. `atomicBatch`).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::IntoStaticStr,
)]
#[strum(serialize_all = "camelCase")]
pub enum Capability {
    /// Multiple calls executed as one all-or-nothing unit.
    AtomicBatch,
    /// Gas sponsorship through a paymaster.
    PaymasterService,
    /// Funds available to the wallet outside its visible balance.
    AuxiliaryFunds,
}

impl Capability {
    /// Wire key used in the capabilities map.
    pub fn key(&self) -> &'static str {
        self.into()
    }
}

/// Support flag for a single capability.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityStatus {
    /// Whether the wallet supports the capability.
    #[serde(default)]
    pub supported: bool,
}

/// Capability map reported by the connected wallet, keyed by capability name.
///
/// Unknown keys are kept as-is. A capability missing from the map is
/// unsupported.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WalletCapabilities(BTreeMap<String, CapabilityStatus>);

impl WalletCapabilities {
    /// An empty capability map (nothing supported).
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style helper to declare a capability.
    pub fn with(mut self, capability: Capability, supported: bool) -> Self {
        self.set(capability, supported);
        self
    }

    /// Declare a capability.
    pub fn set(&mut self, capability: Capability, supported: bool) {
        self.0
            .insert(capability.key().to_owned(), CapabilityStatus { supported });
    }

    /// Look up a capability by its wire key.
    pub fn get(&self, key: &str) -> Option<&CapabilityStatus> {
        self.0.get(key)
    }

    /// Whether `capability` is declared and supported.
    pub fn supports(&self, capability: Capability) -> bool {
        self.get(capability.key()).is_some_and(|status| status.supported)
    }

    /// Number of declared capabilities, known or not.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no capability is declared.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(Capability, bool)> for WalletCapabilities {
    fn from_iter<T: IntoIterator<Item = (Capability, bool)>>(iter: T) -> Self {
        let mut caps = Self::new();
        for (capability, supported) in iter {
            caps.set(capability, supported);
        }
        caps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_capability_wire_keys() {
        assert_eq!(Capability::AtomicBatch.key(), "atomicBatch");
        assert_eq!(Capability::PaymasterService.to_string(), "paymasterService");
        assert_eq!(
            Capability::from_str("auxiliaryFunds").unwrap(),
            Capability::AuxiliaryFunds
        );
    }

    #[test]
    fn test_missing_capability_is_unsupported() {
        let caps = WalletCapabilities::new();
        assert!(!caps.supports(Capability::AtomicBatch));
    }

    #[test]
    fn test_declared_capability() {
        let caps = WalletCapabilities::new()
            .with(Capability::AtomicBatch, true)
            .with(Capability::PaymasterService, false);

        assert!(caps.supports(Capability::AtomicBatch));
        assert!(!caps.supports(Capability::PaymasterService));
        assert_eq!(caps.len(), 2);
    }

    #[test]
    fn test_wire_format() {
        let caps: WalletCapabilities = serde_json::from_str(
            r#"{"atomicBatch":{"supported":true},"somethingNew":{"supported":true,"extra":1}}"#,
        )
        .unwrap();

        assert!(caps.supports(Capability::AtomicBatch));
        assert!(caps.get("somethingNew").is_some_and(|s| s.supported));

        let json = serde_json::to_value(WalletCapabilities::new().with(Capability::AtomicBatch, false))
            .unwrap();
        assert_eq!(json, serde_json::json!({"atomicBatch": {"supported": false}}));
    }

    #[test]
    fn test_entry_without_flag_is_unsupported() {
        let caps: WalletCapabilities = serde_json::from_str(r#"{"atomicBatch":{}}"#).unwrap();
        assert!(!caps.supports(Capability::AtomicBatch));
    }
}
