//! Execution strategies.
//!
//! Both strategies implement [`ExecutionStrategy`] and are selected once per
//! invocation from the wallet's capabilities:
//!
//! - [`AtomicBatchExecutor`] submits the whole sequence as one bundle
//! - [`TransactionSequencer`] submits and confirms calls one at a time

mod atomic;
mod sequential;

use async_trait::async_trait;
use swapflow_api::ExecutionResult;
use swapflow_primitives::{BatchId, CallSequence, TransactionReceipt};

use crate::{ExecutionPath, StatusReporter};

pub use atomic::AtomicBatchExecutor;
pub use sequential::TransactionSequencer;

/// What an execution produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionOutcome {
    /// The bundle was accepted by the wallet. Its confirmation is followed
    /// elsewhere, through the recorded identifier.
    BatchSubmitted(BatchId),
    /// The swap call was confirmed.
    Confirmed(TransactionReceipt),
}

impl ExecutionOutcome {
    /// The swap receipt, if the swap was confirmed by this execution.
    pub fn receipt(&self) -> Option<&TransactionReceipt> {
        match self {
            Self::Confirmed(receipt) => Some(receipt),
            Self::BatchSubmitted(_) => None,
        }
    }

    /// The bundle identifier, if the sequence was submitted atomically.
    pub fn batch_id(&self) -> Option<&BatchId> {
        match self {
            Self::BatchSubmitted(id) => Some(id),
            Self::Confirmed(_) => None,
        }
    }
}

/// Drives a call sequence through submission, reporting progress.
#[async_trait]
pub trait ExecutionStrategy: Send + Sync {
    /// Which path this strategy implements.
    fn path(&self) -> ExecutionPath;

    /// Execute `sequence`, reporting statuses through `reporter`.
    ///
    /// Stops at the first failure. The caller is responsible for turning
    /// the returned error into an `error` status.
    async fn execute(
        &self,
        sequence: &CallSequence,
        reporter: &mut StatusReporter<'_>,
    ) -> ExecutionResult<ExecutionOutcome>;
}
