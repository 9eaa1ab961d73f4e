//! Injected collaborators used by the execution strategies.

use async_trait::async_trait;
use swapflow_primitives::{BatchId, Call, LifecycleStatus, TransactionReceipt, TxHash};
use tokio::sync::mpsc;

use crate::{SubmitError, WaitError};

/// Signs and broadcasts calls on behalf of the connected wallet.
#[async_trait]
#[auto_impl::auto_impl(&, Arc, Box)]
pub trait TransactionSubmitter: Send + Sync {
    /// Submit a single call and return its transaction hash.
    ///
    /// Returns once the transaction is broadcast, not once it is mined.
    async fn submit_transaction(&self, call: &Call) -> Result<TxHash, SubmitError>;

    /// Submit all calls as one atomic bundle, preserving their order.
    async fn submit_batch(&self, calls: &[Call]) -> Result<BatchId, SubmitError>;
}

/// Waits for a broadcast transaction to be confirmed.
#[async_trait]
#[auto_impl::auto_impl(&, Arc, Box)]
pub trait ReceiptWaiter: Send + Sync {
    /// Suspend until `tx_hash` has `confirmations` confirmations.
    ///
    /// Implementations may wait indefinitely. Wrap them to impose a deadline.
    async fn wait_for_receipt(
        &self,
        tx_hash: TxHash,
        confirmations: u64,
    ) -> Result<TransactionReceipt, WaitError>;
}

/// Receives lifecycle statuses in the order they are produced.
#[auto_impl::auto_impl(&, Arc, Box)]
pub trait StatusSink: Send + Sync {
    /// Push one status to the observer.
    fn report(&self, status: LifecycleStatus);
}

/// Receives the identifier of a submitted bundle.
#[auto_impl::auto_impl(&, Arc, Box)]
pub trait BatchIdSink: Send + Sync {
    /// Record the identifier returned by the wallet.
    fn record(&self, batch_id: BatchId);
}

/// Outcome of a submitted bundle as reported by the wallet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchStatus {
    /// Not yet included.
    Pending,
    /// Included; receipts in call order.
    Confirmed(Vec<TransactionReceipt>),
    /// Included but failed, or dropped.
    Failed(String),
}

/// Reports the outcome of a submitted bundle.
#[async_trait]
#[auto_impl::auto_impl(&, Arc, Box)]
pub trait BatchStatusSource: Send + Sync {
    /// Current status of `batch_id`.
    async fn batch_status(&self, batch_id: &BatchId) -> Result<BatchStatus, WaitError>;
}

impl StatusSink for mpsc::UnboundedSender<LifecycleStatus> {
    fn report(&self, status: LifecycleStatus) {
        // Observer went away; execution carries on regardless.
        let _ = self.send(status);
    }
}

impl BatchIdSink for mpsc::UnboundedSender<BatchId> {
    fn record(&self, batch_id: BatchId) {
        let _ = self.send(batch_id);
    }
}

/// Adapts a closure into a [`StatusSink`].
#[derive(Debug, Clone, Copy)]
pub struct StatusFn<F>(pub F);

impl<F> StatusSink for StatusFn<F>
where
    F: Fn(LifecycleStatus) + Send + Sync,
{
    fn report(&self, status: LifecycleStatus) {
        (self.0)(status)
    }
}

/// Adapts a closure into a [`BatchIdSink`].
#[derive(Debug, Clone, Copy)]
pub struct BatchIdFn<F>(pub F);

impl<F> BatchIdSink for BatchIdFn<F>
where
    F: Fn(BatchId) + Send + Sync,
{
    fn record(&self, batch_id: BatchId) {
        (self.0)(batch_id)
    }
}

/// A sink that discards every status.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopStatusSink;

impl StatusSink for NoopStatusSink {
    fn report(&self, _status: LifecycleStatus) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_channel_status_sink_preserves_order() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        tx.report(LifecycleStatus::Pending);
        tx.report(LifecycleStatus::error("X", "y", "z"));
        drop(tx);

        assert_eq!(rx.recv().await, Some(LifecycleStatus::Pending));
        assert!(rx.recv().await.is_some_and(|s| s.is_terminal()));
        assert_eq!(rx.recv().await, None);
    }

    #[test]
    fn test_closed_channel_does_not_panic() {
        let (tx, rx) = mpsc::unbounded_channel::<LifecycleStatus>();
        drop(rx);
        tx.report(LifecycleStatus::Pending);
    }

    #[test]
    fn test_closure_sinks() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = StatusFn({
            let seen = seen.clone();
            move |status| seen.lock().push(status)
        });

        // Through a reference, exercising the forwarding impl.
        let by_ref: &dyn StatusSink = &sink;
        by_ref.report(LifecycleStatus::Pending);
        assert_eq!(seen.lock().len(), 1);

        let ids = Arc::new(Mutex::new(Vec::new()));
        let batch_sink = Arc::new(BatchIdFn({
            let ids = ids.clone();
            move |id| ids.lock().push(id)
        }));
        batch_sink.record(BatchId::from("callsId"));
        assert_eq!(ids.lock().as_slice(), &[BatchId::from("callsId")]);
    }
}
