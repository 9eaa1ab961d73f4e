//! Configuration traits for the execution components.
//!
//! Following the same pattern as the rest of the workspace:
//! - Traits define *what* configuration is needed
//! - CLI args implement the traits directly (no intermediate structs)
//! - Components receive `impl ExecutorConfig` and extract what they need

use core::time::Duration;

/// Default number of confirmations awaited per call.
pub const DEFAULT_CONFIRMATIONS: u64 = 1;

/// Default polling interval when following a submitted bundle.
pub const DEFAULT_BATCH_POLL_INTERVAL: Duration = Duration::from_millis(1000);

/// Configuration for swap execution.
#[auto_impl::auto_impl(&, Arc, Box)]
pub trait ExecutorConfig: Send + Sync {
    /// Confirmations awaited for each call on the sequential path.
    fn confirmations(&self) -> u64;

    /// Upper bound on each receipt wait. `None` waits indefinitely.
    fn receipt_timeout(&self) -> Option<Duration>;

    /// Whether a reverted receipt aborts the sequence.
    ///
    /// When disabled, a reverted approval is still reported as approved and
    /// the dependent call is sent anyway.
    fn reject_reverted_receipts(&self) -> bool;

    /// Polling interval used when following a submitted bundle.
    fn batch_poll_interval(&self) -> Duration;
}

/// Built-in defaults: one confirmation, no timeout, reverts abort.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultExecutorConfig;

impl ExecutorConfig for DefaultExecutorConfig {
    fn confirmations(&self) -> u64 {
        DEFAULT_CONFIRMATIONS
    }

    fn receipt_timeout(&self) -> Option<Duration> {
        None
    }

    fn reject_reverted_receipts(&self) -> bool {
        true
    }

    fn batch_poll_interval(&self) -> Duration {
        DEFAULT_BATCH_POLL_INTERVAL
    }
}
