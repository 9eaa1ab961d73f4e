//! Swap transaction execution.
//!
//! Turns an ordered list of calls (zero or more approvals followed by one
//! swap) into on-chain submissions, choosing between two strategies based on
//! what the connected wallet declares:
//!
//! - **Atomic**: the whole sequence goes out as one call bundle and the
//!   bundle identifier is handed back to the caller. See
//!   [`AtomicBatchExecutor`].
//! - **Sequential**: each call is submitted and confirmed before the next
//!   one is sent, with a lifecycle status for every step. See
//!   [`TransactionSequencer`].
//!
//! [`execute_swap_transactions`] is the entry point; [`SwapExecutor`] wraps
//! it for a wallet session.
//!
//! # Status stream
//!
//! Every status passes through a [`StatusReporter`], which enforces the
//! lifecycle state machine:
//!
//! ```text
//! Init ──► Pending ──► Approved ──► Pending ──► ... ──► Success
//!             │            │
//!             └────────────┴──────────► Error (from any non-terminal state)
//! ```

mod args;
pub use args::{ClassifierKind, ExecutorArgs};

mod batch;
pub use batch::BatchConfirmer;

mod capability;
pub use capability::{ExecutionPath, supports_atomic_batch};

mod classifier;
pub use classifier::{
    CallClassifier, CallPosition, PERMIT2_ADDRESS, PayloadClassifier, PositionalClassifier,
};

mod orchestrator;
pub use orchestrator::{SwapExecutor, SwapInvocation, execute_swap_transactions};

mod reporter;
pub use reporter::{StatusReporter, is_allowed};

mod strategy;
pub use strategy::{AtomicBatchExecutor, ExecutionOutcome, ExecutionStrategy, TransactionSequencer};

mod waiter;
pub use waiter::TimeoutReceiptWaiter;
