//! Swap execution entry points.
//!
//! [`execute_swap_transactions`] is the stateless core: given the ports and
//! the inputs of one user-initiated swap, it resolves the execution path,
//! runs the matching strategy and reports a terminal `error` status on
//! failure.
//!
//! [`SwapExecutor`] wraps it for one wallet session and refuses overlapping
//! invocations, so two swaps can never interleave their submissions.

use std::sync::atomic::{AtomicBool, Ordering};

use swapflow_api::{
    BatchIdSink, DefaultExecutorConfig, ExecutionError, ExecutionResult, ExecutorConfig,
    ReceiptWaiter, StatusSink, TransactionSubmitter,
};
use swapflow_primitives::{CallSequence, WalletCapabilities};
use tracing::{info, warn};

use crate::{
    AtomicBatchExecutor, CallClassifier, ExecutionOutcome, ExecutionPath, ExecutionStrategy,
    PayloadClassifier, StatusReporter, TimeoutReceiptWaiter, TransactionSequencer,
};

/// Everything one swap execution needs.
///
/// Ports and sinks are borrowed for the duration of the invocation; the
/// capabilities and transactions are read-only inputs.
#[derive(Clone, Copy)]
pub struct SwapInvocation<'a> {
    /// Signs and broadcasts calls and bundles.
    pub submitter: &'a dyn TransactionSubmitter,
    /// Waits for confirmations on the sequential path.
    pub waiter: &'a dyn ReceiptWaiter,
    /// Receives the bundle identifier on the atomic path.
    pub batch_sink: &'a dyn BatchIdSink,
    /// Receives lifecycle statuses.
    pub status_sink: &'a dyn StatusSink,
    /// Labels confirmed approvals.
    pub classifier: &'a dyn CallClassifier,
    /// Execution settings.
    pub config: &'a dyn ExecutorConfig,
    /// Capabilities declared by the connected wallet.
    pub capabilities: &'a WalletCapabilities,
    /// Approvals followed by the swap call.
    pub transactions: &'a CallSequence,
}

/// Execute one swap.
///
/// On failure an `error` status is reported before the error is returned.
/// Statuses already reported are never retracted.
pub async fn execute_swap_transactions(
    invocation: SwapInvocation<'_>,
) -> ExecutionResult<ExecutionOutcome> {
    let SwapInvocation {
        submitter,
        waiter,
        batch_sink,
        status_sink,
        classifier,
        config,
        capabilities,
        transactions,
    } = invocation;

    let path = ExecutionPath::resolve(capabilities);
    info!(%path, calls = transactions.len(), "executing swap");
    metrics::counter!("swapflow_executions_total", "path" => path.as_str()).increment(1);

    let timed;
    let waiter: &dyn ReceiptWaiter = match config.receipt_timeout() {
        Some(timeout) => {
            timed = TimeoutReceiptWaiter::new(waiter, timeout);
            &timed
        }
        None => waiter,
    };

    let strategy: Box<dyn ExecutionStrategy + '_> = match path {
        ExecutionPath::Atomic => Box::new(AtomicBatchExecutor::new(submitter, batch_sink)),
        ExecutionPath::Sequential => Box::new(
            TransactionSequencer::new(submitter, waiter, classifier)
                .with_confirmations(config.confirmations())
                .with_reject_reverted(config.reject_reverted_receipts()),
        ),
    };

    let mut reporter = StatusReporter::new(status_sink);
    match strategy.execute(transactions, &mut reporter).await {
        Ok(outcome) => {
            info!(%path, statuses = reporter.emitted(), "swap execution finished");
            Ok(outcome)
        }
        Err(err) => {
            let code = err.code();
            warn!(%path, %code, error = %err, "swap execution failed");
            metrics::counter!("swapflow_execution_failures_total", "code" => <&'static str>::from(code))
                .increment(1);
            reporter.fail(&err);
            Err(err)
        }
    }
}

/// Swap execution for one wallet session.
///
/// Holds the session's wallet ports and settings. Only one invocation may
/// run at a time; a second one is rejected with
/// [`ExecutionError::InvocationInProgress`] without reporting any status.
pub struct SwapExecutor<S, R, C = DefaultExecutorConfig> {
    submitter: S,
    waiter: R,
    classifier: Box<dyn CallClassifier>,
    config: C,
    in_flight: AtomicBool,
}

impl<S, R, C> SwapExecutor<S, R, C>
where
    S: TransactionSubmitter,
    R: ReceiptWaiter,
    C: ExecutorConfig,
{
    /// Create an executor using the payload-based classifier.
    pub fn new(submitter: S, waiter: R, config: C) -> Self {
        Self {
            submitter,
            waiter,
            classifier: Box::new(PayloadClassifier::default()),
            config,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Replace the approval classifier.
    pub fn with_classifier(mut self, classifier: impl CallClassifier + 'static) -> Self {
        self.classifier = Box::new(classifier);
        self
    }

    /// Execution settings.
    pub fn config(&self) -> &C {
        &self.config
    }

    /// Whether an invocation is currently running.
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Execute one swap for this session.
    pub async fn execute(
        &self,
        capabilities: &WalletCapabilities,
        transactions: &CallSequence,
        status_sink: &dyn StatusSink,
        batch_sink: &dyn BatchIdSink,
    ) -> ExecutionResult<ExecutionOutcome> {
        let Some(_guard) = InFlightGuard::acquire(&self.in_flight) else {
            warn!("swap requested while another is in progress");
            return Err(ExecutionError::InvocationInProgress);
        };

        execute_swap_transactions(SwapInvocation {
            submitter: &self.submitter,
            waiter: &self.waiter,
            batch_sink,
            status_sink,
            classifier: self.classifier.as_ref(),
            config: &self.config,
            capabilities,
            transactions,
        })
        .await
    }
}

/// Clears the in-flight flag when dropped, including on cancellation.
struct InFlightGuard<'a>(&'a AtomicBool);

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_is_exclusive_and_released() {
        let flag = AtomicBool::new(false);

        let guard = InFlightGuard::acquire(&flag);
        assert!(guard.is_some());
        assert!(InFlightGuard::acquire(&flag).is_none());

        drop(guard);
        assert!(InFlightGuard::acquire(&flag).is_some());
    }
}
