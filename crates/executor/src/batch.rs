//! Following a submitted bundle to a terminal status.
//!
//! The atomic path stops after recording the bundle identifier. A consumer
//! that wants the stream to end in `success` or `error` hands that
//! identifier to a [`BatchConfirmer`], which polls the wallet until the
//! bundle settles and continues the status stream from `pending`.

use std::time::Duration;

use swapflow_api::{
    BatchStatus, BatchStatusSource, ExecutionError, ExecutionResult, ExecutorConfig, StatusSink,
};
use swapflow_primitives::{BatchId, LifecycleStatus, StatusName, TransactionReceipt};
use tracing::{debug, info, warn};

/// Polls a [`BatchStatusSource`] until a bundle is confirmed or fails.
#[derive(Debug, Clone)]
pub struct BatchConfirmer<B> {
    source: B,
    poll_interval: Duration,
}

impl<B: BatchStatusSource> BatchConfirmer<B> {
    /// Create a confirmer polling every `poll_interval`.
    pub fn new(source: B, poll_interval: Duration) -> Self {
        Self {
            source,
            poll_interval,
        }
    }

    /// Create a confirmer using the configured polling interval.
    pub fn from_config(source: B, config: &impl ExecutorConfig) -> Self {
        Self::new(source, config.batch_poll_interval())
    }

    /// Wait for `batch_id` to settle.
    ///
    /// Reports `success` with the receipt of the last call (the swap), or
    /// `error` if the bundle failed or could not be queried. There is no
    /// deadline; wrap the call in a timeout if one is needed.
    pub async fn confirm(
        &self,
        batch_id: &BatchId,
        status_sink: &dyn StatusSink,
    ) -> ExecutionResult<TransactionReceipt> {
        let mut reporter = crate::StatusReporter::resume(status_sink, StatusName::Pending);

        match self.poll(batch_id).await {
            Ok(receipt) => {
                info!(%batch_id, tx_hash = %receipt.transaction_hash, "call bundle confirmed");
                reporter.report(LifecycleStatus::success(receipt.clone()))?;
                Ok(receipt)
            }
            Err(err) => {
                warn!(%batch_id, error = %err, "call bundle failed");
                reporter.fail(&err);
                Err(err)
            }
        }
    }

    async fn poll(&self, batch_id: &BatchId) -> ExecutionResult<TransactionReceipt> {
        let failed = |reason: String| ExecutionError::BatchFailed {
            batch_id: batch_id.clone(),
            reason,
        };

        loop {
            let status = self
                .source
                .batch_status(batch_id)
                .await
                .map_err(|e| failed(e.to_string()))?;

            match status {
                BatchStatus::Pending => {
                    debug!(%batch_id, "call bundle still pending");
                    tokio::time::sleep(self.poll_interval).await;
                }
                BatchStatus::Confirmed(receipts) => {
                    let receipt = receipts
                        .into_iter()
                        .last()
                        .ok_or_else(|| failed("confirmed without receipts".to_owned()))?;
                    if !receipt.succeeded() {
                        return Err(failed("swap call reverted".to_owned()));
                    }
                    return Ok(receipt);
                }
                BatchStatus::Failed(reason) => return Err(failed(reason)),
            }
        }
    }
}
