//! Lifecycle statuses pushed to observers while a swap executes.
//!
//! The wire shape is `{"statusName": ..., "statusData": ...}`:
//!
//! | status | name | data |
//! |---|---|---|
//! | [`LifecycleStatus::Pending`] | `transactionPending` | none |
//! | [`LifecycleStatus::Approved`] | `transactionApproved` | `{transactionHash, transactionType}` |
//! | [`LifecycleStatus::Success`] | `success` | `{transactionReceipt}` |
//! | [`LifecycleStatus::Error`] | `error` | `{code, reason, message}` |

use alloy_primitives::TxHash;
use serde::{Deserialize, Serialize};

use crate::TransactionReceipt;

/// Semantic type of an approval-style call.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::IntoStaticStr,
)]
pub enum TransactionType {
    /// Standard token `approve` granting an allowance.
    #[serde(rename = "ERC20")]
    #[strum(serialize = "ERC20")]
    Erc20,
    /// Allowance granted through the Permit2 contract.
    #[serde(rename = "Permit2")]
    #[strum(serialize = "Permit2")]
    Permit2,
}

/// Payload of [`LifecycleStatus::Approved`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovedData {
    /// Hash of the confirmed approval.
    pub transaction_hash: TxHash,
    /// What kind of approval was confirmed.
    pub transaction_type: TransactionType,
}

/// Payload of [`LifecycleStatus::Success`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuccessData {
    /// Receipt of the swap call.
    pub transaction_receipt: TransactionReceipt,
}

/// Payload of [`LifecycleStatus::Error`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorData {
    /// Stable machine-readable code.
    pub code: String,
    /// Failure detail.
    pub reason: String,
    /// Short human-readable message for display.
    pub message: String,
}

/// Externally observable progress of one swap execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "statusName", content = "statusData")]
pub enum LifecycleStatus {
    /// A transaction is about to be, or is being, submitted.
    #[serde(rename = "transactionPending")]
    Pending,
    /// A non-final call was confirmed.
    #[serde(rename = "transactionApproved")]
    Approved(ApprovedData),
    /// The swap call was confirmed. Terminal.
    #[serde(rename = "success")]
    Success(SuccessData),
    /// Execution failed. Terminal.
    #[serde(rename = "error")]
    Error(ErrorData),
}

/// Discriminant of a [`LifecycleStatus`], without payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr)]
#[strum(serialize_all = "camelCase")]
pub enum StatusName {
    /// Before any status was reported.
    Init,
    #[strum(serialize = "transactionPending")]
    Pending,
    #[strum(serialize = "transactionApproved")]
    Approved,
    Success,
    Error,
}

impl StatusName {
    /// Whether no further status may follow.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Success | Self::Error)
    }
}

impl LifecycleStatus {
    /// Approved status for a confirmed approval.
    pub fn approved(transaction_hash: TxHash, transaction_type: TransactionType) -> Self {
        Self::Approved(ApprovedData {
            transaction_hash,
            transaction_type,
        })
    }

    /// Success status for the confirmed swap.
    pub fn success(transaction_receipt: TransactionReceipt) -> Self {
        Self::Success(SuccessData { transaction_receipt })
    }

    /// Error status.
    pub fn error(
        code: impl Into<String>,
        reason: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Error(ErrorData {
            code: code.into(),
            reason: reason.into(),
            message: message.into(),
        })
    }

    /// The status discriminant.
    pub fn name(&self) -> StatusName {
        match self {
            Self::Pending => StatusName::Pending,
            Self::Approved(_) => StatusName::Approved,
            Self::Success(_) => StatusName::Success,
            Self::Error(_) => StatusName::Error,
        }
    }

    /// Whether a transaction is still in flight.
    ///
    /// Observers use this to show a busy indicator and block resubmission.
    pub fn is_in_flight(&self) -> bool {
        matches!(self, Self::Pending | Self::Approved(_))
    }

    /// Whether this status ends the execution.
    pub fn is_terminal(&self) -> bool {
        self.name().is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_pending_has_no_data() {
        let json = serde_json::to_value(LifecycleStatus::Pending).unwrap();
        assert_eq!(json, json!({"statusName": "transactionPending"}));
    }

    #[test]
    fn test_approved_wire_shape() {
        let status = LifecycleStatus::approved(TxHash::repeat_byte(0x11), TransactionType::Permit2);
        let json = serde_json::to_value(&status).unwrap();

        assert_eq!(json["statusName"], "transactionApproved");
        assert_eq!(json["statusData"]["transactionType"], "Permit2");
        assert_eq!(
            json["statusData"]["transactionHash"],
            format!("{}", TxHash::repeat_byte(0x11))
        );

        let back: LifecycleStatus = serde_json::from_value(json).unwrap();
        assert_eq!(back, status);
    }

    #[test]
    fn test_success_wire_shape() {
        let receipt = TransactionReceipt::success(TxHash::repeat_byte(0x22));
        let json = serde_json::to_value(LifecycleStatus::success(receipt)).unwrap();

        assert_eq!(json["statusName"], "success");
        assert_eq!(json["statusData"]["transactionReceipt"]["status"], true);
    }

    #[test]
    fn test_transaction_type_names() {
        assert_eq!(TransactionType::Erc20.to_string(), "ERC20");
        assert_eq!(TransactionType::Permit2.to_string(), "Permit2");
        assert_eq!(serde_json::to_value(TransactionType::Erc20).unwrap(), "ERC20");
    }

    #[test]
    fn test_flight_and_terminal() {
        assert!(LifecycleStatus::Pending.is_in_flight());
        assert!(!LifecycleStatus::Pending.is_terminal());

        let error = LifecycleStatus::error("SUBMISSION_REJECTED", "user denied", "Swap failed");
        assert!(error.is_terminal());
        assert!(!error.is_in_flight());
        assert_eq!(error.name(), StatusName::Error);
        assert_eq!(StatusName::Pending.to_string(), "transactionPending");
        assert_eq!(StatusName::Init.to_string(), "init");
    }
}
