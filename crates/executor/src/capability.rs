//! Execution path selection from wallet capabilities.

use swapflow_primitives::{Capability, WalletCapabilities};

/// How a call sequence is driven to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum ExecutionPath {
    /// All calls submitted as one bundle.
    Atomic,
    /// Calls submitted one by one, each confirmed before the next.
    Sequential,
}

impl ExecutionPath {
    /// Pick the path for a wallet. Missing capability means sequential.
    pub fn resolve(capabilities: &WalletCapabilities) -> Self {
        if supports_atomic_batch(capabilities) {
            Self::Atomic
        } else {
            Self::Sequential
        }
    }

    /// Label used in logs and metrics.
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

/// Whether the wallet declared atomic multi-call support.
pub fn supports_atomic_batch(capabilities: &WalletCapabilities) -> bool {
    capabilities.supports(Capability::AtomicBatch)
}
