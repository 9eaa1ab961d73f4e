//! Atomic bundle submission.

use async_trait::async_trait;
use swapflow_api::{BatchIdSink, ExecutionError, ExecutionResult, TransactionSubmitter};
use swapflow_primitives::CallSequence;
use tracing::{debug, info};

use super::{ExecutionOutcome, ExecutionStrategy};
use crate::{ExecutionPath, StatusReporter};

/// Submits the whole sequence as one bundle and records its identifier.
///
/// Emits exactly one `pending` status. Following the bundle to a terminal
/// status is left to whoever consumes the recorded identifier.
pub struct AtomicBatchExecutor<'a> {
    submitter: &'a dyn TransactionSubmitter,
    batch_sink: &'a dyn BatchIdSink,
}

impl<'a> AtomicBatchExecutor<'a> {
    /// Create an executor over the given ports.
    pub fn new(submitter: &'a dyn TransactionSubmitter, batch_sink: &'a dyn BatchIdSink) -> Self {
        Self {
            submitter,
            batch_sink,
        }
    }
}

#[async_trait]
impl ExecutionStrategy for AtomicBatchExecutor<'_> {
    fn path(&self) -> ExecutionPath {
        ExecutionPath::Atomic
    }

    async fn execute(
        &self,
        sequence: &CallSequence,
        reporter: &mut StatusReporter<'_>,
    ) -> ExecutionResult<ExecutionOutcome> {
        reporter.pending()?;

        debug!(calls = sequence.len(), "submitting call bundle");
        let batch_id = self
            .submitter
            .submit_batch(sequence.calls())
            .await
            .map_err(|source| ExecutionError::BatchRejected { source })?;

        info!(%batch_id, calls = sequence.len(), "call bundle submitted");
        self.batch_sink.record(batch_id.clone());

        Ok(ExecutionOutcome::BatchSubmitted(batch_id))
    }
}
