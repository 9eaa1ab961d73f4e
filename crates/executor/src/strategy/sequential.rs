//! One-by-one submission for wallets without atomic batching.

use async_trait::async_trait;
use swapflow_api::{ExecutionError, ExecutionResult, ReceiptWaiter, TransactionSubmitter};
use swapflow_primitives::{Call, CallSequence, LifecycleStatus, TransactionReceipt, TxHash};
use tracing::debug;

use super::{ExecutionOutcome, ExecutionStrategy};
use crate::{CallClassifier, CallPosition, ExecutionPath, StatusReporter};

/// Submits calls strictly in order, confirming each before sending the next.
///
/// For `N` calls a successful run emits `2N` statuses: a `pending` before
/// every submission, an `approved` after every confirmed approval and a
/// final `success` carrying the swap receipt.
pub struct TransactionSequencer<'a> {
    submitter: &'a dyn TransactionSubmitter,
    waiter: &'a dyn ReceiptWaiter,
    classifier: &'a dyn CallClassifier,
    confirmations: u64,
    reject_reverted: bool,
}

impl<'a> TransactionSequencer<'a> {
    /// Create a sequencer awaiting one confirmation per call and
    /// aborting on reverted receipts.
    pub fn new(
        submitter: &'a dyn TransactionSubmitter,
        waiter: &'a dyn ReceiptWaiter,
        classifier: &'a dyn CallClassifier,
    ) -> Self {
        Self {
            submitter,
            waiter,
            classifier,
            confirmations: swapflow_api::DEFAULT_CONFIRMATIONS,
            reject_reverted: true,
        }
    }

    /// Confirmations awaited per call.
    pub fn with_confirmations(mut self, confirmations: u64) -> Self {
        self.confirmations = confirmations;
        self
    }

    /// Whether a reverted receipt aborts the sequence.
    pub fn with_reject_reverted(mut self, reject_reverted: bool) -> Self {
        self.reject_reverted = reject_reverted;
        self
    }

    /// Emit `pending`, submit `call` and wait for its receipt.
    async fn submit_and_confirm(
        &self,
        index: usize,
        total: usize,
        call: &Call,
        reporter: &mut StatusReporter<'_>,
    ) -> ExecutionResult<(TxHash, TransactionReceipt)> {
        reporter.pending()?;

        debug!(index, total, to = %call.to, "submitting call");
        let tx_hash = self
            .submitter
            .submit_transaction(call)
            .await
            .map_err(|source| ExecutionError::SubmissionRejected { index, source })?;

        debug!(index, %tx_hash, confirmations = self.confirmations, "awaiting receipt");
        let receipt = self
            .waiter
            .wait_for_receipt(tx_hash, self.confirmations)
            .await
            .map_err(|source| ExecutionError::ConfirmationFailed {
                index,
                tx_hash,
                source,
            })?;

        if self.reject_reverted && !receipt.succeeded() {
            return Err(ExecutionError::Reverted { index, tx_hash });
        }

        Ok((tx_hash, receipt))
    }
}

#[async_trait]
impl ExecutionStrategy for TransactionSequencer<'_> {
    fn path(&self) -> ExecutionPath {
        ExecutionPath::Sequential
    }

    async fn execute(
        &self,
        sequence: &CallSequence,
        reporter: &mut StatusReporter<'_>,
    ) -> ExecutionResult<ExecutionOutcome> {
        let total = sequence.len();

        for (index, call) in sequence.approvals().iter().enumerate() {
            let (tx_hash, _) = self.submit_and_confirm(index, total, call, reporter).await?;

            let transaction_type = self.classifier.classify(call, CallPosition { index, total });
            debug!(index, %tx_hash, %transaction_type, "approval confirmed");
            reporter.report(LifecycleStatus::approved(tx_hash, transaction_type))?;
        }

        let (_, receipt) = self
            .submit_and_confirm(total - 1, total, sequence.swap(), reporter)
            .await?;
        reporter.report(LifecycleStatus::success(receipt.clone()))?;

        Ok(ExecutionOutcome::Confirmed(receipt))
    }
}
