//! Receipt waiting with an optional deadline.

use std::time::Duration;

use async_trait::async_trait;
use swapflow_api::{ReceiptWaiter, WaitError};
use swapflow_primitives::{TransactionReceipt, TxHash};
use tracing::warn;

/// Wraps a [`ReceiptWaiter`] so that each wait gives up after `timeout`.
#[derive(Debug, Clone)]
pub struct TimeoutReceiptWaiter<W> {
    inner: W,
    timeout: Duration,
}

impl<W> TimeoutReceiptWaiter<W> {
    /// Wrap `inner`.
    pub fn new(inner: W, timeout: Duration) -> Self {
        Self { inner, timeout }
    }

    /// The per-wait deadline.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait]
impl<W: ReceiptWaiter> ReceiptWaiter for TimeoutReceiptWaiter<W> {
    async fn wait_for_receipt(
        &self,
        tx_hash: TxHash,
        confirmations: u64,
    ) -> Result<TransactionReceipt, WaitError> {
        match tokio::time::timeout(
            self.timeout,
            self.inner.wait_for_receipt(tx_hash, confirmations),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => {
                warn!(%tx_hash, timeout = ?self.timeout, "receipt wait timed out");
                Err(WaitError::Timeout(self.timeout))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Never;

    #[async_trait]
    impl ReceiptWaiter for Never {
        async fn wait_for_receipt(
            &self,
            _tx_hash: TxHash,
            _confirmations: u64,
        ) -> Result<TransactionReceipt, WaitError> {
            std::future::pending().await
        }
    }

    struct Instant;

    #[async_trait]
    impl ReceiptWaiter for Instant {
        async fn wait_for_receipt(
            &self,
            tx_hash: TxHash,
            _confirmations: u64,
        ) -> Result<TransactionReceipt, WaitError> {
            Ok(TransactionReceipt::success(tx_hash))
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_times_out() {
        let waiter = TimeoutReceiptWaiter::new(Never, Duration::from_secs(30));
        let result = waiter.wait_for_receipt(TxHash::ZERO, 1).await;
        assert_eq!(result, Err(WaitError::Timeout(Duration::from_secs(30))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_passes_through() {
        let waiter = TimeoutReceiptWaiter::new(Instant, Duration::from_secs(30));
        let receipt = waiter
            .wait_for_receipt(TxHash::repeat_byte(7), 1)
            .await
            .unwrap();
        assert_eq!(receipt.transaction_hash, TxHash::repeat_byte(7));
        assert_eq!(waiter.timeout(), Duration::from_secs(30));
    }
}
