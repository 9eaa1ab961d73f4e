//! Recording observers.

use parking_lot::Mutex;
use swapflow_api::{BatchIdSink, StatusSink};
use swapflow_primitives::{BatchId, LifecycleStatus, StatusName};

/// Keeps every reported status in order.
#[derive(Debug, Default)]
pub struct RecordingStatusSink {
    statuses: Mutex<Vec<LifecycleStatus>>,
}

impl RecordingStatusSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// All statuses reported so far.
    pub fn statuses(&self) -> Vec<LifecycleStatus> {
        self.statuses.lock().clone()
    }

    /// Names of all statuses reported so far.
    pub fn names(&self) -> Vec<StatusName> {
        self.statuses.lock().iter().map(LifecycleStatus::name).collect()
    }

    /// Number of statuses reported.
    pub fn len(&self) -> usize {
        self.statuses.lock().len()
    }

    /// Whether nothing was reported.
    pub fn is_empty(&self) -> bool {
        self.statuses.lock().is_empty()
    }

    /// The most recent status.
    pub fn last(&self) -> Option<LifecycleStatus> {
        self.statuses.lock().last().cloned()
    }
}

impl StatusSink for RecordingStatusSink {
    fn report(&self, status: LifecycleStatus) {
        self.statuses.lock().push(status);
    }
}

/// Keeps every recorded bundle identifier.
#[derive(Debug, Default)]
pub struct RecordingBatchSink {
    ids: Mutex<Vec<BatchId>>,
}

impl RecordingBatchSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// All identifiers recorded so far.
    pub fn ids(&self) -> Vec<BatchId> {
        self.ids.lock().clone()
    }
}

impl BatchIdSink for RecordingBatchSink {
    fn record(&self, batch_id: BatchId) {
        self.ids.lock().push(batch_id);
    }
}
