//! The `simulate` command.

use std::path::Path;

use alloy_primitives::keccak256;
use async_trait::async_trait;
use eyre::{Result, WrapErr, eyre};
use parking_lot::Mutex;
use serde::Deserialize;
use swapflow_api::{
    BatchIdFn, BatchStatus, BatchStatusSource, ExecutionResult, ExecutorConfig, ReceiptWaiter,
    StatusFn, StatusSink, SubmitError, TransactionSubmitter, WaitError,
};
use swapflow_executor::{
    BatchConfirmer, ExecutionOutcome, SwapInvocation, execute_swap_transactions,
};
use swapflow_primitives::{
    BatchId, Call, CallSequence, LifecycleStatus, TransactionReceipt, TxHash, WalletCapabilities,
};
use tracing::{info, warn};

use crate::cli::SimulateArgs;

/// A swap plan read from disk.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Plan {
    #[serde(default)]
    pub(crate) capabilities: WalletCapabilities,
    pub(crate) transactions: CallSequence,
}

impl Plan {
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read plan {}", path.display()))?;
        serde_json::from_str(&raw).wrap_err("invalid plan")
    }
}

#[derive(Debug, Default)]
struct Ledger {
    /// Single submissions, in order.
    submitted: Vec<(TxHash, Call)>,
    /// Submitted bundles and their calls.
    batches: Vec<(BatchId, Vec<Call>)>,
}

/// A wallet that signs instantly and mines every transaction in its own
/// block.
///
/// Hashes are the keccak of the submission nonce and the call, so a plan
/// always produces the same hashes.
#[derive(Debug, Default)]
pub(crate) struct SimulatedWallet {
    ledger: Mutex<Ledger>,
    reject_at: Option<usize>,
    revert_at: Option<usize>,
}

impl SimulatedWallet {
    pub(crate) fn new(reject_at: Option<usize>, revert_at: Option<usize>) -> Self {
        Self {
            ledger: Mutex::default(),
            reject_at,
            revert_at,
        }
    }

    fn hash(nonce: usize, call: &Call) -> TxHash {
        let mut preimage = Vec::with_capacity(8 + 20 + 32 + call.data.len());
        preimage.extend_from_slice(&(nonce as u64).to_be_bytes());
        preimage.extend_from_slice(call.to.as_slice());
        preimage.extend_from_slice(&call.value.to_be_bytes::<32>());
        preimage.extend_from_slice(&call.data);
        keccak256(preimage)
    }

    fn receipt(&self, index: usize, transaction_hash: TxHash, call: &Call) -> TransactionReceipt {
        TransactionReceipt {
            transaction_hash,
            block_number: Some(index as u64 + 1),
            gas_used: 21_000 + 16 * call.data.len() as u64,
            status: self.revert_at != Some(index),
        }
    }
}

#[async_trait]
impl TransactionSubmitter for SimulatedWallet {
    async fn submit_transaction(&self, call: &Call) -> Result<TxHash, SubmitError> {
        let mut ledger = self.ledger.lock();
        let index = ledger.submitted.len();
        if self.reject_at == Some(index) {
            return Err(SubmitError::Rejected("user rejected the request".into()));
        }
        let tx_hash = Self::hash(index, call);
        ledger.submitted.push((tx_hash, call.clone()));
        Ok(tx_hash)
    }

    async fn submit_batch(&self, calls: &[Call]) -> Result<BatchId, SubmitError> {
        if self.reject_at.is_some() {
            return Err(SubmitError::Rejected("user rejected the request".into()));
        }
        let mut ledger = self.ledger.lock();
        let seed: Vec<u8> = calls
            .iter()
            .enumerate()
            .flat_map(|(i, call)| Self::hash(i, call).0)
            .collect();
        let batch_id = BatchId::new(keccak256(seed).to_string());
        ledger.batches.push((batch_id.clone(), calls.to_vec()));
        Ok(batch_id)
    }
}

#[async_trait]
impl ReceiptWaiter for SimulatedWallet {
    async fn wait_for_receipt(
        &self,
        tx_hash: TxHash,
        _confirmations: u64,
    ) -> Result<TransactionReceipt, WaitError> {
        let ledger = self.ledger.lock();
        let (index, (_, call)) = ledger
            .submitted
            .iter()
            .enumerate()
            .find(|(_, (h, _))| *h == tx_hash)
            .ok_or_else(|| WaitError::Unavailable(format!("unknown transaction {tx_hash}")))?;
        Ok(self.receipt(index, tx_hash, call))
    }
}

#[async_trait]
impl BatchStatusSource for SimulatedWallet {
    async fn batch_status(&self, batch_id: &BatchId) -> Result<BatchStatus, WaitError> {
        let ledger = self.ledger.lock();
        let (_, calls) = ledger
            .batches
            .iter()
            .find(|(id, _)| id == batch_id)
            .ok_or_else(|| WaitError::Unavailable(format!("unknown bundle {batch_id}")))?;

        let receipts: Vec<_> = calls
            .iter()
            .enumerate()
            .map(|(i, call)| self.receipt(i, Self::hash(i, call), call))
            .collect();
        if receipts.iter().any(|r| !r.succeeded()) {
            return Ok(BatchStatus::Failed("bundle reverted".into()));
        }
        Ok(BatchStatus::Confirmed(receipts))
    }
}

/// Print a status as one JSON line on stdout.
fn print_status(status: LifecycleStatus) {
    match serde_json::to_string(&status) {
        Ok(line) => println!("{line}"),
        Err(err) => warn!(%err, "failed to encode status"),
    }
}

pub(crate) async fn run(args: SimulateArgs) -> Result<()> {
    args.executor.validate().map_err(|e| eyre!(e))?;

    let plan = Plan::load(&args.plan)?;
    execute_plan(&plan, &args, &StatusFn(print_status)).await
}

/// Run `plan` against a fresh simulated wallet.
///
/// Fails when the swap (or the followed bundle) fails, after the `error`
/// status has been reported.
async fn execute_plan(
    plan: &Plan,
    args: &SimulateArgs,
    status_sink: &dyn StatusSink,
) -> Result<()> {
    let wallet = SimulatedWallet::new(args.reject_at, args.revert_at);
    let classifier = args.executor.classifier.build();
    let batch_sink = BatchIdFn(|batch_id: BatchId| info!(%batch_id, "bundle recorded"));

    let outcome = execute_swap_transactions(SwapInvocation {
        submitter: &wallet,
        waiter: &wallet,
        batch_sink: &batch_sink,
        status_sink,
        classifier: classifier.as_ref(),
        config: &args.executor,
        capabilities: &plan.capabilities,
        transactions: &plan.transactions,
    })
    .await
    .inspect_err(|err| info!(code = %err.code(), "swap failed"))?;

    match outcome {
        ExecutionOutcome::Confirmed(receipt) => {
            info!(tx_hash = %receipt.transaction_hash, "swap confirmed");
        }
        ExecutionOutcome::BatchSubmitted(batch_id) => {
            info!(%batch_id, "bundle submitted");
            if !args.no_follow {
                let receipt = follow(&wallet, &batch_id, &args.executor, status_sink).await?;
                info!(tx_hash = %receipt.transaction_hash, "bundle confirmed");
            }
        }
    }

    Ok(())
}

async fn follow(
    wallet: &SimulatedWallet,
    batch_id: &BatchId,
    config: &impl ExecutorConfig,
    status_sink: &dyn StatusSink,
) -> ExecutionResult<TransactionReceipt> {
    BatchConfirmer::from_config(wallet, config)
        .confirm(batch_id, status_sink)
        .await
}
