//! On-chain calls and the ordered sequence needed to complete a swap.

use alloy_primitives::{Address, Bytes, Selector, U256};
use serde::{Deserialize, Serialize};

/// A single unit of on-chain execution.
///
/// The orchestrator never inspects a call beyond classifying it; it is
/// submitted exactly as provided.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Call {
    /// Target contract (or account).
    pub to: Address,
    /// Native value attached to the call, in wei.
    #[serde(default)]
    pub value: U256,
    /// ABI-encoded calldata.
    #[serde(default)]
    pub data: Bytes,
}

impl Call {
    /// Create a new call.
    pub fn new(to: Address, value: U256, data: Bytes) -> Self {
        Self { to, value, data }
    }

    /// The 4-byte function selector, if the calldata is long enough to carry one.
    pub fn selector(&self) -> Option<Selector> {
        self.data.get(..4).map(Selector::from_slice)
    }
}

/// Errors from building a [`CallSequence`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CallSequenceError {
    /// A swap needs at least the swap call itself.
    #[error("call sequence is empty")]
    Empty,
}

/// Ordered calls for one swap: zero or more approvals followed by the swap call.
///
/// Order is significant. An approval must be mined before the call that
/// depends on it, so the sequence is never reordered or mutated after
/// construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Call>", into = "Vec<Call>")]
pub struct CallSequence {
    calls: Vec<Call>,
}

impl CallSequence {
    /// Build a sequence, rejecting an empty list.
    pub fn new(calls: Vec<Call>) -> Result<Self, CallSequenceError> {
        if calls.is_empty() {
            return Err(CallSequenceError::Empty);
        }
        Ok(Self { calls })
    }

    /// All calls, in submission order.
    pub fn calls(&self) -> &[Call] {
        &self.calls
    }

    /// Number of calls, including the swap call.
    pub fn len(&self) -> usize {
        self.calls.len()
    }

    /// Always false; kept for API symmetry with slices.
    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    /// The approval-style calls preceding the swap.
    pub fn approvals(&self) -> &[Call] {
        self.calls.split_last().map(|(_, approvals)| approvals).unwrap_or_default()
    }

    /// The final call, which performs the swap.
    pub fn swap(&self) -> &Call {
        self.calls
            .last()
            .unwrap_or_else(|| unreachable!("call sequence is never empty"))
    }

    /// Whether `index` refers to the swap call.
    pub fn is_final(&self, index: usize) -> bool {
        index + 1 == self.calls.len()
    }

    /// Iterate calls in submission order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Call> {
        self.calls.iter()
    }

    /// Consume the sequence, returning the underlying calls.
    pub fn into_calls(self) -> Vec<Call> {
        self.calls
    }
}

impl TryFrom<Vec<Call>> for CallSequence {
    type Error = CallSequenceError;

    fn try_from(calls: Vec<Call>) -> Result<Self, Self::Error> {
        Self::new(calls)
    }
}

impl From<CallSequence> for Vec<Call> {
    fn from(sequence: CallSequence) -> Self {
        sequence.calls
    }
}

impl<'a> IntoIterator for &'a CallSequence {
    type Item = &'a Call;
    type IntoIter = core::slice::Iter<'a, Call>;

    fn into_iter(self) -> Self::IntoIter {
        self.calls.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, bytes};

    fn call(to: Address) -> Call {
        Call::new(to, U256::ZERO, Bytes::new())
    }

    #[test]
    fn test_empty_sequence_rejected() {
        assert_eq!(CallSequence::new(vec![]), Err(CallSequenceError::Empty));
    }

    #[test]
    fn test_swap_is_last_call() {
        let approve = call(address!("0000000000000000000000000000000000000123"));
        let swap = call(address!("0000000000000000000000000000000000000456"));
        let seq = CallSequence::new(vec![approve.clone(), swap.clone()]).unwrap();

        assert_eq!(seq.len(), 2);
        assert_eq!(seq.swap(), &swap);
        assert_eq!(seq.approvals(), &[approve]);
        assert!(!seq.is_final(0));
        assert!(seq.is_final(1));
    }

    #[test]
    fn test_single_call_has_no_approvals() {
        let seq = CallSequence::new(vec![call(Address::ZERO)]).unwrap();
        assert!(seq.approvals().is_empty());
        assert!(seq.is_final(0));
    }

    #[test]
    fn test_selector() {
        let mut c = call(Address::ZERO);
        assert_eq!(c.selector(), None);

        c.data = bytes!("095ea7b3000000");
        assert_eq!(c.selector(), Some(Selector::from([0x09, 0x5e, 0xa7, 0xb3])));
    }

    #[test]
    fn test_deserialize_rejects_empty() {
        let result: Result<CallSequence, _> = serde_json::from_str("[]");
        assert!(result.is_err());
    }

    #[test]
    fn test_deserialize_call_defaults() {
        let seq: CallSequence =
            serde_json::from_str(r#"[{"to":"0x0000000000000000000000000000000000000123"}]"#)
                .unwrap();
        assert_eq!(seq.swap().value, U256::ZERO);
        assert!(seq.swap().data.is_empty());
    }
}
