//! Scripted wallet.

use std::time::Duration;

use alloy_primitives::B256;
use async_trait::async_trait;
use parking_lot::Mutex;
use swapflow_api::{
    BatchStatus, BatchStatusSource, ReceiptWaiter, SubmitError, TransactionSubmitter, WaitError,
};
use swapflow_primitives::{BatchId, Call, TransactionReceipt, TxHash};

/// Hash the mock wallet assigns to the `index`-th submitted call.
pub fn mock_tx_hash(index: usize) -> TxHash {
    B256::left_padding_from(&(index as u64 + 1).to_be_bytes())
}

/// Identifier the mock wallet assigns to the `index`-th submitted bundle.
pub fn mock_batch_id(index: usize) -> BatchId {
    BatchId::new(format!("mock-batch-{index}"))
}

/// One interaction with the wallet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalletEvent {
    /// A single call was submitted.
    Submitted {
        /// Submission order, starting at zero.
        index: usize,
        /// The submitted call.
        call: Call,
        /// Hash handed back.
        tx_hash: TxHash,
    },
    /// A receipt wait started.
    Waited {
        /// Hash waited on.
        tx_hash: TxHash,
        /// Requested confirmations.
        confirmations: u64,
    },
    /// A bundle was submitted.
    BatchSubmitted {
        /// Calls in bundle order.
        calls: Vec<Call>,
        /// Identifier handed back.
        batch_id: BatchId,
    },
}

#[derive(Debug, Default)]
struct State {
    events: Vec<WalletEvent>,
    submitted: Vec<TxHash>,
    batches: Vec<Vec<Call>>,
}

/// A wallet that accepts everything unless told otherwise.
///
/// Calls are numbered in submission order. Failures are scripted by that
/// number, so `reject_submission_at(1)` rejects the second call submitted.
#[derive(Debug, Default)]
pub struct MockWallet {
    state: Mutex<State>,
    reject_submission_at: Option<usize>,
    fail_receipt_at: Option<usize>,
    revert_at: Option<usize>,
    reject_batch: bool,
    receipt_delay: Option<Duration>,
}

impl MockWallet {
    /// A wallet that accepts and confirms everything immediately.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject the `index`-th submission.
    pub fn reject_submission_at(mut self, index: usize) -> Self {
        self.reject_submission_at = Some(index);
        self
    }

    /// Fail the receipt wait for the `index`-th submission.
    pub fn fail_receipt_at(mut self, index: usize) -> Self {
        self.fail_receipt_at = Some(index);
        self
    }

    /// Mine the `index`-th submission as reverted.
    pub fn revert_at(mut self, index: usize) -> Self {
        self.revert_at = Some(index);
        self
    }

    /// Reject every bundle.
    pub fn reject_batches(mut self) -> Self {
        self.reject_batch = true;
        self
    }

    /// Delay every receipt by `delay`.
    pub fn with_receipt_delay(mut self, delay: Duration) -> Self {
        self.receipt_delay = Some(delay);
        self
    }

    /// Every interaction so far, in order.
    pub fn events(&self) -> Vec<WalletEvent> {
        self.state.lock().events.clone()
    }

    /// Calls submitted one at a time, in order.
    pub fn submitted_calls(&self) -> Vec<Call> {
        self.state
            .lock()
            .events
            .iter()
            .filter_map(|e| match e {
                WalletEvent::Submitted { call, .. } => Some(call.clone()),
                _ => None,
            })
            .collect()
    }

    /// Bundles submitted so far.
    pub fn batches(&self) -> Vec<Vec<Call>> {
        self.state.lock().batches.clone()
    }

    fn receipt(&self, index: usize, tx_hash: TxHash) -> TransactionReceipt {
        TransactionReceipt {
            transaction_hash: tx_hash,
            block_number: Some(index as u64 + 1),
            gas_used: 21_000,
            status: self.revert_at != Some(index),
        }
    }
}

#[async_trait]
impl TransactionSubmitter for MockWallet {
    async fn submit_transaction(&self, call: &Call) -> Result<TxHash, SubmitError> {
        let mut state = self.state.lock();
        let index = state.submitted.len();
        if self.reject_submission_at == Some(index) {
            return Err(SubmitError::Rejected("user rejected the request".into()));
        }

        let tx_hash = mock_tx_hash(index);
        state.submitted.push(tx_hash);
        state.events.push(WalletEvent::Submitted {
            index,
            call: call.clone(),
            tx_hash,
        });
        Ok(tx_hash)
    }

    async fn submit_batch(&self, calls: &[Call]) -> Result<BatchId, SubmitError> {
        if self.reject_batch {
            return Err(SubmitError::Rejected("user rejected the request".into()));
        }

        let mut state = self.state.lock();
        let batch_id = mock_batch_id(state.batches.len());
        state.batches.push(calls.to_vec());
        state.events.push(WalletEvent::BatchSubmitted {
            calls: calls.to_vec(),
            batch_id: batch_id.clone(),
        });
        Ok(batch_id)
    }
}

#[async_trait]
impl ReceiptWaiter for MockWallet {
    async fn wait_for_receipt(
        &self,
        tx_hash: TxHash,
        confirmations: u64,
    ) -> Result<TransactionReceipt, WaitError> {
        let index = {
            let mut state = self.state.lock();
            state.events.push(WalletEvent::Waited {
                tx_hash,
                confirmations,
            });
            state
                .submitted
                .iter()
                .position(|h| *h == tx_hash)
                .ok_or_else(|| WaitError::Unavailable(format!("unknown transaction {tx_hash}")))?
        };

        if let Some(delay) = self.receipt_delay {
            tokio::time::sleep(delay).await;
        }

        if self.fail_receipt_at == Some(index) {
            return Err(WaitError::Unavailable("transaction dropped".into()));
        }

        Ok(self.receipt(index, tx_hash))
    }
}

#[async_trait]
impl BatchStatusSource for MockWallet {
    async fn batch_status(&self, batch_id: &BatchId) -> Result<BatchStatus, WaitError> {
        let state = self.state.lock();
        let calls = (0..state.batches.len())
            .find(|i| mock_batch_id(*i) == *batch_id)
            .and_then(|i| state.batches.get(i))
            .ok_or_else(|| WaitError::Unavailable(format!("unknown bundle {batch_id}")))?;

        let receipts = (0..calls.len())
            .map(|i| self.receipt(i, mock_tx_hash(i)))
            .collect();
        Ok(BatchStatus::Confirmed(receipts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calls;

    #[tokio::test]
    async fn test_records_in_order() {
        let wallet = MockWallet::new();
        let call = calls::opaque(1);

        let hash = wallet.submit_transaction(&call).await.unwrap();
        let receipt = wallet.wait_for_receipt(hash, 2).await.unwrap();

        assert_eq!(hash, mock_tx_hash(0));
        assert!(receipt.succeeded());
        assert_eq!(
            wallet.events(),
            vec![
                WalletEvent::Submitted {
                    index: 0,
                    call,
                    tx_hash: hash
                },
                WalletEvent::Waited {
                    tx_hash: hash,
                    confirmations: 2
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_scripted_failures() {
        let wallet = MockWallet::new().reject_submission_at(1).revert_at(0);

        let hash = wallet.submit_transaction(&calls::opaque(1)).await.unwrap();
        assert!(!wallet.wait_for_receipt(hash, 1).await.unwrap().succeeded());
        assert!(wallet.submit_transaction(&calls::opaque(2)).await.is_err());
    }

    #[tokio::test]
    async fn test_unknown_hash_is_unavailable() {
        let wallet = MockWallet::new();
        let err = wallet
            .wait_for_receipt(TxHash::repeat_byte(9), 1)
            .await
            .unwrap_err();
        assert!(matches!(err, WaitError::Unavailable(_)));
    }
}
