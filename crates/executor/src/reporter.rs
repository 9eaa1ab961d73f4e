//! Ordered status reporting with transition checks.
//!
//! The reporter sits between the strategies and the observer's
//! [`StatusSink`]. It enforces the lifecycle state machine:
//!
//! ```text
//! Init ──► Pending ──► Approved ──► Pending ──► ... ──► Success
//!   │         │            │
//!   └─────────┴────────────┴──────────────────────────► Error
//! ```
//!
//! `Success` and `Error` are terminal; nothing is forwarded after them.

use swapflow_api::{ExecutionError, ExecutionResult, StatusSink};
use swapflow_primitives::{LifecycleStatus, StatusName};
use tracing::trace;

/// Forwards statuses to a sink, rejecting out-of-order transitions.
pub struct StatusReporter<'a> {
    sink: &'a dyn StatusSink,
    current: StatusName,
    emitted: usize,
}

impl<'a> StatusReporter<'a> {
    /// A reporter that has not emitted anything yet.
    pub fn new(sink: &'a dyn StatusSink) -> Self {
        Self::resume(sink, StatusName::Init)
    }

    /// A reporter continuing a stream that is already in `current`.
    ///
    /// Used by consumers that pick up an execution after the orchestrator
    /// returned, such as the batch confirmer.
    pub fn resume(sink: &'a dyn StatusSink, current: StatusName) -> Self {
        Self {
            sink,
            current,
            emitted: 0,
        }
    }

    /// Current state.
    pub fn current(&self) -> StatusName {
        self.current
    }

    /// Number of statuses forwarded by this reporter.
    pub fn emitted(&self) -> usize {
        self.emitted
    }

    /// Whether the stream has ended.
    pub fn is_terminal(&self) -> bool {
        self.current.is_terminal()
    }

    /// Forward `status` if the transition is allowed.
    pub fn report(&mut self, status: LifecycleStatus) -> ExecutionResult<()> {
        let next = status.name();
        if !is_allowed(self.current, next) {
            return Err(ExecutionError::InvalidTransition {
                from: self.current,
                to: next,
            });
        }

        trace!(from = %self.current, to = %next, "status transition");
        self.current = next;
        self.emitted += 1;
        self.sink.report(status);
        Ok(())
    }

    /// Emit `pending`.
    pub fn pending(&mut self) -> ExecutionResult<()> {
        self.report(LifecycleStatus::Pending)
    }

    /// Emit the `error` status for `error` unless the stream already ended.
    pub fn fail(&mut self, error: &ExecutionError) {
        if self.is_terminal() {
            return;
        }
        self.current = StatusName::Error;
        self.emitted += 1;
        self.sink.report(error.to_status());
    }
}

/// The lifecycle transition table.
pub fn is_allowed(from: StatusName, to: StatusName) -> bool {
    use StatusName::*;

    match (from, to) {
        (Success | Error, _) => false,
        (_, Error) => true,
        (Init | Approved, Pending) => true,
        (Pending, Approved | Success) => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use swapflow_api::SubmitError;
    use swapflow_primitives::{TransactionReceipt, TransactionType, TxHash};

    #[derive(Default)]
    struct Collect(Mutex<Vec<LifecycleStatus>>);

    impl StatusSink for Collect {
        fn report(&self, status: LifecycleStatus) {
            self.0.lock().push(status);
        }
    }

    impl Collect {
        fn names(&self) -> Vec<StatusName> {
            self.0.lock().iter().map(|s| s.name()).collect()
        }
    }

    fn rejected() -> ExecutionError {
        ExecutionError::SubmissionRejected {
            index: 0,
            source: SubmitError::Rejected("denied".into()),
        }
    }

    #[test]
    fn test_sequential_flow() {
        let sink = Collect::default();
        let mut reporter = StatusReporter::new(&sink);

        reporter.pending().unwrap();
        reporter
            .report(LifecycleStatus::approved(TxHash::ZERO, TransactionType::Erc20))
            .unwrap();
        reporter.pending().unwrap();
        reporter
            .report(LifecycleStatus::success(TransactionReceipt::success(TxHash::ZERO)))
            .unwrap();

        assert_eq!(reporter.emitted(), 4);
        assert!(reporter.is_terminal());
        assert_eq!(
            sink.names(),
            vec![
                StatusName::Pending,
                StatusName::Approved,
                StatusName::Pending,
                StatusName::Success
            ]
        );
    }

    #[test]
    fn test_nothing_after_terminal() {
        let sink = Collect::default();
        let mut reporter = StatusReporter::new(&sink);
        reporter.pending().unwrap();
        reporter.fail(&rejected());

        assert!(reporter.pending().is_err());
        reporter.fail(&rejected());
        assert_eq!(sink.names(), vec![StatusName::Pending, StatusName::Error]);
    }

    #[test]
    fn test_rejects_success_without_pending() {
        let sink = Collect::default();
        let mut reporter = StatusReporter::new(&sink);

        let err = reporter
            .report(LifecycleStatus::success(TransactionReceipt::success(TxHash::ZERO)))
            .unwrap_err();
        assert_eq!(
            err,
            ExecutionError::InvalidTransition {
                from: StatusName::Init,
                to: StatusName::Success
            }
        );
        assert!(sink.names().is_empty());
    }

    #[test]
    fn test_transition_table() {
        use StatusName::*;

        assert!(is_allowed(Init, Pending));
        assert!(is_allowed(Init, Error));
        assert!(is_allowed(Approved, Error));
        assert!(!is_allowed(Pending, Pending));
        assert!(!is_allowed(Approved, Approved));
        assert!(!is_allowed(Approved, Success));
        assert!(!is_allowed(Init, Approved));
        assert!(!is_allowed(Success, Error));
        assert!(!is_allowed(Error, Pending));
    }

    #[test]
    fn test_resume_from_pending() {
        let sink = Collect::default();
        let mut reporter = StatusReporter::resume(&sink, StatusName::Pending);
        reporter
            .report(LifecycleStatus::success(TransactionReceipt::success(TxHash::ZERO)))
            .unwrap();
        assert_eq!(sink.names(), vec![StatusName::Success]);
    }
}
