//! Error types for swap execution.
//!
//! Port errors ([`SubmitError`], [`WaitError`]) are produced by collaborators.
//! The orchestrator wraps them in [`ExecutionError`], which knows which call
//! failed and how to present the failure as an `error` status.

use std::time::Duration;

use swapflow_primitives::{BatchId, LifecycleStatus, StatusName, TxHash};

/// Failure to sign or broadcast.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    /// The user or wallet declined to sign.
    #[error("rejected by wallet: {0}")]
    Rejected(String),

    /// Signing succeeded but broadcasting failed.
    #[error("broadcast failed: {0}")]
    Broadcast(String),
}

/// Failure while waiting for a confirmation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WaitError {
    /// No receipt within the allotted time.
    #[error("no receipt after {0:?}")]
    Timeout(Duration),

    /// The underlying wait failed.
    #[error("receipt unavailable: {0}")]
    Unavailable(String),
}

/// Stable codes carried in `error` statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// A single call was not accepted by the wallet.
    SubmissionRejected,
    /// The bundle was not accepted by the wallet.
    BatchRejected,
    /// A confirmation never materialized.
    ConfirmationFailed,
    /// A call was mined but reverted.
    Reverted,
    /// A submitted bundle failed or could not be followed.
    BatchFailed,
    /// Another execution is running for the same session.
    InvocationInProgress,
    /// Internal status ordering violation.
    InvalidTransition,
}

/// Error type for a swap execution.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExecutionError {
    /// Submission of call `index` failed; later calls were not sent.
    #[error("call {index} was not submitted: {source}")]
    SubmissionRejected {
        /// Position of the failing call.
        index: usize,
        /// Underlying wallet error.
        #[source]
        source: SubmitError,
    },

    /// Submission of the atomic bundle failed.
    #[error("batch was not submitted: {source}")]
    BatchRejected {
        /// Underlying wallet error.
        #[source]
        source: SubmitError,
    },

    /// Waiting for the receipt of call `index` failed.
    #[error("call {index} ({tx_hash}) was not confirmed: {source}")]
    ConfirmationFailed {
        /// Position of the failing call.
        index: usize,
        /// Hash of the broadcast transaction.
        tx_hash: TxHash,
        /// Underlying wait error.
        #[source]
        source: WaitError,
    },

    /// Call `index` was mined but reverted.
    #[error("call {index} ({tx_hash}) reverted")]
    Reverted {
        /// Position of the failing call.
        index: usize,
        /// Hash of the reverted transaction.
        tx_hash: TxHash,
    },

    /// A submitted bundle failed, or following it failed.
    #[error("batch {batch_id} failed: {reason}")]
    BatchFailed {
        /// Identifier returned at submission.
        batch_id: BatchId,
        /// Failure detail.
        reason: String,
    },

    /// The session already has an execution running.
    #[error("another swap execution is in progress for this session")]
    InvocationInProgress,

    /// A status was reported out of order.
    #[error("invalid status transition {from} -> {to}")]
    InvalidTransition {
        /// Current status.
        from: StatusName,
        /// Rejected next status.
        to: StatusName,
    },
}

impl ExecutionError {
    /// Stable code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::SubmissionRejected { .. } => ErrorCode::SubmissionRejected,
            Self::BatchRejected { .. } => ErrorCode::BatchRejected,
            Self::ConfirmationFailed { .. } => ErrorCode::ConfirmationFailed,
            Self::Reverted { .. } => ErrorCode::Reverted,
            Self::BatchFailed { .. } => ErrorCode::BatchFailed,
            Self::InvocationInProgress => ErrorCode::InvocationInProgress,
            Self::InvalidTransition { .. } => ErrorCode::InvalidTransition,
        }
    }

    /// Short message suitable for display next to a failed swap.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::SubmissionRejected { .. } | Self::BatchRejected { .. } => {
                "Transaction was not submitted"
            }
            Self::ConfirmationFailed { .. } => "Transaction was not confirmed",
            Self::Reverted { .. } | Self::BatchFailed { .. } => "Transaction reverted",
            Self::InvocationInProgress => "A swap is already in progress",
            Self::InvalidTransition { .. } => "Something went wrong",
        }
    }

    /// Index of the call that failed, if the failure is tied to one.
    pub fn failed_index(&self) -> Option<usize> {
        match self {
            Self::SubmissionRejected { index, .. }
            | Self::ConfirmationFailed { index, .. }
            | Self::Reverted { index, .. } => Some(*index),
            _ => None,
        }
    }

    /// The `error` status describing this failure.
    pub fn to_status(&self) -> LifecycleStatus {
        let code: &'static str = self.code().into();
        LifecycleStatus::error(code, self.to_string(), self.user_message())
    }
}

/// Result type for swap execution.
pub type ExecutionResult<T> = core::result::Result<T, ExecutionError>;
