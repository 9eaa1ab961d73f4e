//! Confirmation records and batch handles.

use core::fmt;

use alloy_primitives::TxHash;
use serde::{Deserialize, Serialize};

/// Confirmation record for a mined transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
    /// Hash of the confirmed transaction.
    pub transaction_hash: TxHash,
    /// Block the transaction was included in, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_number: Option<u64>,
    /// Gas consumed by execution.
    #[serde(default)]
    pub gas_used: u64,
    /// Execution outcome (`true` = success, `false` = reverted).
    pub status: bool,
}

impl TransactionReceipt {
    /// A successful receipt for `transaction_hash` with no block details.
    pub fn success(transaction_hash: TxHash) -> Self {
        Self {
            transaction_hash,
            block_number: None,
            gas_used: 0,
            status: true,
        }
    }

    /// Whether the transaction executed without reverting.
    pub fn succeeded(&self) -> bool {
        self.status
    }
}

/// Opaque identifier returned by a wallet for an atomic call bundle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BatchId(String);

impl BatchId {
    /// Wrap a wallet-provided identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for BatchId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for BatchId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}
