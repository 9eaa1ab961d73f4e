//! Call builders.

use alloy_primitives::{Address, Bytes, U256, address, aliases::U48, aliases::U160};
use alloy_sol_types::{SolCall, sol};
use swapflow_primitives::{Call, CallSequence};

/// Canonical Permit2 deployment.
pub const PERMIT2: Address = address!("000000000022D473030F116dDEE9F6B43aC78BA3");

/// Token used by the builders.
pub const TOKEN: Address = address!("A0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48");

/// Router used by the builders.
pub const ROUTER: Address = address!("3fC91A3afd70395Cd496C647d5a6CC9D4B2b7FAD");

sol! {
    interface IERC20 {
        function approve(address spender, uint256 amount) external returns (bool);
    }

    interface IPermit2 {
        function approve(address token, address spender, uint160 amount, uint48 expiration) external;
    }

    interface IRouter {
        function execute(bytes commands, bytes[] inputs, uint256 deadline) external payable;
    }
}

/// `token.approve(spender, MAX)`.
pub fn erc20_approve(token: Address, spender: Address) -> Call {
    let data = IERC20::approveCall {
        spender,
        amount: U256::MAX,
    }
    .abi_encode();
    Call::new(token, U256::ZERO, data.into())
}

/// `permit2.approve(token, spender, MAX, MAX)`.
pub fn permit2_approve(token: Address, spender: Address) -> Call {
    let data = IPermit2::approveCall {
        token,
        spender,
        amount: U160::MAX,
        expiration: U48::MAX,
    }
    .abi_encode();
    Call::new(PERMIT2, U256::ZERO, data.into())
}

/// A router swap carrying `value` wei.
pub fn swap(value: U256) -> Call {
    let data = IRouter::executeCall {
        commands: Bytes::from_static(&[0x00]),
        inputs: vec![Bytes::from_static(&[0xab; 32])],
        deadline: U256::from(u32::MAX),
    }
    .abi_encode();
    Call::new(ROUTER, value, data.into())
}

/// A call with empty calldata to a distinct address.
pub fn opaque(seed: u8) -> Call {
    Call::new(Address::repeat_byte(seed), U256::ZERO, Bytes::new())
}

/// `n` opaque calls. The last one stands in for the swap.
///
/// Panics if `n` is zero.
pub fn opaque_sequence(n: usize) -> CallSequence {
    let calls = (0..n).map(|i| opaque(i as u8 + 1)).collect();
    CallSequence::new(calls).expect("n must be at least 1")
}

/// `[token approval, swap]`.
pub fn erc20_swap_sequence() -> CallSequence {
    CallSequence::new(vec![erc20_approve(TOKEN, PERMIT2), swap(U256::ZERO)])
        .expect("two calls")
}

/// `[permit2 approval, token approval, swap]`.
pub fn permit2_swap_sequence() -> CallSequence {
    CallSequence::new(vec![
        permit2_approve(TOKEN, ROUTER),
        erc20_approve(TOKEN, PERMIT2),
        swap(U256::ZERO),
    ])
    .expect("three calls")
}

/// `[token approval to Permit2, Permit2 approval to the router, swap]`.
///
/// The order routers typically produce when the token has no Permit2
/// allowance yet.
pub fn token_then_permit2_swap_sequence() -> CallSequence {
    CallSequence::new(vec![
        erc20_approve(TOKEN, PERMIT2),
        permit2_approve(TOKEN, ROUTER),
        swap(U256::ZERO),
    ])
    .expect("three calls")
}
