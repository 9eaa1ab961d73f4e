//! Core primitive types for swap transaction execution.
//!
//! These are the values that flow between a wallet, the execution
//! orchestrator and the UI observing it:
//!
//! - [`Call`] and [`CallSequence`] describe what has to be executed on-chain
//! - [`WalletCapabilities`] describe what the connected wallet can do
//! - [`LifecycleStatus`] is the progress signal pushed to observers
//!
//! Everything here is plain data, created fresh for one execution and
//! discarded once the execution reaches a terminal status.

mod call;
mod capabilities;
mod receipt;
mod status;

pub use call::{Call, CallSequence, CallSequenceError};
pub use capabilities::{Capability, CapabilityStatus, WalletCapabilities};
pub use receipt::{BatchId, TransactionReceipt};
pub use status::{
    ApprovedData, ErrorData, LifecycleStatus, StatusName, SuccessData, TransactionType,
};

pub use alloy_primitives::{Address, Bytes, Selector, TxHash, U256};
