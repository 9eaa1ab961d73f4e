//! Classification of approval-style calls.
//!
//! Every call before the swap is an approval of some kind. Observers label
//! them differently depending on whether the allowance goes through a plain
//! token `approve` or through the Permit2 contract, so the sequencer asks a
//! [`CallClassifier`] for each confirmed approval.

use alloy_primitives::{Address, Selector, address};
use alloy_sol_types::{SolCall, sol};
use swapflow_primitives::{Call, TransactionType};

/// Canonical Permit2 deployment (same address on every supported chain).
pub const PERMIT2_ADDRESS: Address = address!("000000000022D473030F116dDEE9F6B43aC78BA3");

sol! {
    /// Standard token allowance.
    interface IERC20 {
        function approve(address spender, uint256 amount) external returns (bool);
    }

    /// Allowance entry points of the Permit2 contract.
    interface IPermit2 {
        struct PermitDetails {
            address token;
            uint160 amount;
            uint48 expiration;
            uint48 nonce;
        }

        struct PermitSingle {
            PermitDetails details;
            address spender;
            uint256 sigDeadline;
        }

        function approve(address token, address spender, uint160 amount, uint48 expiration) external;
        function permit(address owner, PermitSingle permitSingle, bytes signature) external;
    }
}

/// Selectors that identify a Permit2-style allowance regardless of target.
const PERMIT2_SELECTORS: [[u8; 4]; 2] = [
    IPermit2::approveCall::SELECTOR,
    IPermit2::permitCall::SELECTOR,
];

/// Where a call sits in its sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallPosition {
    /// Zero-based index of the call.
    pub index: usize,
    /// Number of calls in the sequence, including the swap.
    pub total: usize,
}

/// Decides the [`TransactionType`] of an approval-style call.
///
/// Implementations must be pure: the same call and position always yield
/// the same type.
#[auto_impl::auto_impl(&, Arc, Box)]
pub trait CallClassifier: Send + Sync {
    /// Classify a non-final call.
    fn classify(&self, call: &Call, position: CallPosition) -> TransactionType;
}

/// Classifies by payload: Permit2 when the call targets the Permit2
/// contract or carries one of its allowance selectors, ERC20 otherwise.
///
/// Labels follow the calls, not their positions. A three-call sequence in
/// the common `[token.approve(permit2), permit2.approve(router), swap]`
/// order is reported as `[ERC20, Permit2]`, whereas [`PositionalClassifier`]
/// always reports `[Permit2, ERC20]` for three calls.
#[derive(Debug, Clone, Copy)]
pub struct PayloadClassifier {
    permit2: Address,
}

impl PayloadClassifier {
    /// Classifier matching a Permit2 deployment at a custom address.
    pub fn with_permit2(permit2: Address) -> Self {
        Self { permit2 }
    }

    /// The Permit2 address this classifier matches against.
    pub fn permit2(&self) -> Address {
        self.permit2
    }
}

impl Default for PayloadClassifier {
    fn default() -> Self {
        Self::with_permit2(PERMIT2_ADDRESS)
    }
}

impl CallClassifier for PayloadClassifier {
    fn classify(&self, call: &Call, _position: CallPosition) -> TransactionType {
        if call.to == self.permit2 {
            return TransactionType::Permit2;
        }

        match call.selector() {
            Some(selector) if is_permit2_selector(selector) => TransactionType::Permit2,
            _ => TransactionType::Erc20,
        }
    }
}

fn is_permit2_selector(selector: Selector) -> bool {
    PERMIT2_SELECTORS.iter().any(|s| selector.0 == *s)
}

/// Classifies by position only.
///
/// A three-call sequence is taken to be `[permit2 approval, token approval,
/// swap]`; every other approval is ERC20. Wallet integrations that only
/// ever produce those two shapes can use it when calldata is unavailable.
#[derive(Debug, Clone, Copy, Default)]
pub struct PositionalClassifier;

impl CallClassifier for PositionalClassifier {
    fn classify(&self, _call: &Call, position: CallPosition) -> TransactionType {
        if position.total == 3 && position.index == 0 {
            TransactionType::Permit2
        } else {
            TransactionType::Erc20
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{Bytes, U256, aliases::U48, aliases::U160};

    const TOKEN: Address = address!("833589fCD6eDb6E08f4c7C32D4f71b54bdA02913");
    const ROUTER: Address = address!("6fF5693b99212Da76ad316178A184AB56D299b43");

    fn pos(index: usize, total: usize) -> CallPosition {
        CallPosition { index, total }
    }

    fn erc20_approve(spender: Address) -> Call {
        let data = IERC20::approveCall {
            spender,
            amount: U256::MAX,
        }
        .abi_encode();
        Call::new(TOKEN, U256::ZERO, Bytes::from(data))
    }

    fn permit2_approve(to: Address) -> Call {
        let data = IPermit2::approveCall {
            token: TOKEN,
            spender: ROUTER,
            amount: U160::MAX,
            expiration: U48::from(1_900_000_000u64),
        }
        .abi_encode();
        Call::new(to, U256::ZERO, Bytes::from(data))
    }

    #[test]
    fn test_erc20_approve_is_erc20() {
        let classifier = PayloadClassifier::default();
        assert_eq!(
            classifier.classify(&erc20_approve(ROUTER), pos(0, 2)),
            TransactionType::Erc20
        );
    }

    #[test]
    fn test_erc20_approve_to_permit2_spender_is_erc20() {
        // Granting Permit2 an allowance is still a token approve.
        let classifier = PayloadClassifier::default();
        assert_eq!(
            classifier.classify(&erc20_approve(PERMIT2_ADDRESS), pos(0, 3)),
            TransactionType::Erc20
        );
    }

    #[test]
    fn test_permit2_target_is_permit2() {
        let classifier = PayloadClassifier::default();
        assert_eq!(
            classifier.classify(&permit2_approve(PERMIT2_ADDRESS), pos(1, 3)),
            TransactionType::Permit2
        );

        let empty = Call::new(PERMIT2_ADDRESS, U256::ZERO, Bytes::new());
        assert_eq!(classifier.classify(&empty, pos(0, 2)), TransactionType::Permit2);
    }

    #[test]
    fn test_permit2_selector_on_other_deployment() {
        let custom = address!("00000000000000000000000000000000000000aa");
        let call = permit2_approve(custom);

        assert_eq!(
            PayloadClassifier::default().classify(&call, pos(0, 2)),
            TransactionType::Permit2
        );
        assert_eq!(PayloadClassifier::with_permit2(custom).permit2(), custom);
    }

    #[test]
    fn test_short_calldata_is_erc20() {
        let call = Call::new(TOKEN, U256::ZERO, Bytes::from_static(&[0x87, 0x51]));
        assert_eq!(
            PayloadClassifier::default().classify(&call, pos(0, 2)),
            TransactionType::Erc20
        );
    }

    #[test]
    fn test_positional_rule() {
        let call = Call::new(TOKEN, U256::ZERO, Bytes::new());
        let classifier = PositionalClassifier;

        assert_eq!(classifier.classify(&call, pos(0, 3)), TransactionType::Permit2);
        assert_eq!(classifier.classify(&call, pos(1, 3)), TransactionType::Erc20);
        assert_eq!(classifier.classify(&call, pos(0, 2)), TransactionType::Erc20);
        assert_eq!(classifier.classify(&call, pos(0, 4)), TransactionType::Erc20);
    }

    #[test]
    fn test_deterministic() {
        let classifier = PayloadClassifier::default();
        let call = permit2_approve(TOKEN);
        let first = classifier.classify(&call, pos(0, 3));
        for _ in 0..10 {
            assert_eq!(classifier.classify(&call, pos(0, 3)), first);
        }
    }
}
