//! CLI arguments for swap execution.

use std::time::Duration;

use clap::Args;
use serde::{Deserialize, Serialize};
use swapflow_api::{DEFAULT_BATCH_POLL_INTERVAL, DEFAULT_CONFIRMATIONS, ExecutorConfig};

use crate::{CallClassifier, PayloadClassifier, PositionalClassifier};

/// Approval classification rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassifierKind {
    /// Match the Permit2 contract address and selectors (default).
    #[default]
    Payload,
    /// Position-only rule for three-call sequences.
    Positional,
}

impl ClassifierKind {
    /// Build the classifier for this rule.
    pub fn build(self) -> Box<dyn CallClassifier> {
        match self {
            Self::Payload => Box::new(PayloadClassifier::default()),
            Self::Positional => Box::new(PositionalClassifier),
        }
    }
}

/// Swap execution CLI arguments.
#[derive(Debug, Args, Clone, Serialize, Deserialize)]
#[command(next_help_heading = "Execution")]
#[serde(default)]
pub struct ExecutorArgs {
    /// Confirmations to await for each call
    #[arg(long = "executor.confirmations", default_value_t = DEFAULT_CONFIRMATIONS)]
    pub confirmations: u64,

    /// Give up waiting for a receipt after this many seconds (waits forever when unset)
    #[arg(long = "executor.receipt-timeout", value_name = "SECS")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt_timeout_secs: Option<u64>,

    /// Abort the sequence when a call is mined but reverted
    #[arg(
        long = "executor.reject-reverted",
        default_value_t = true,
        action = clap::ArgAction::Set
    )]
    pub reject_reverted: bool,

    /// Polling interval when following a submitted bundle
    #[arg(long = "executor.batch-poll-interval", value_name = "MS", default_value_t = DEFAULT_BATCH_POLL_INTERVAL.as_millis() as u64)]
    pub batch_poll_interval_ms: u64,

    /// Rule used to label confirmed approvals
    #[arg(long = "executor.classifier", value_enum, default_value_t = ClassifierKind::Payload)]
    pub classifier: ClassifierKind,
}

impl Default for ExecutorArgs {
    fn default() -> Self {
        Self {
            confirmations: DEFAULT_CONFIRMATIONS,
            receipt_timeout_secs: None,
            reject_reverted: true,
            batch_poll_interval_ms: DEFAULT_BATCH_POLL_INTERVAL.as_millis() as u64,
            classifier: ClassifierKind::default(),
        }
    }
}

impl ExecutorArgs {
    /// Validate argument values.
    pub fn validate(&self) -> Result<(), String> {
        if self.confirmations == 0 {
            return Err("executor.confirmations must be at least 1".to_string());
        }
        if self.receipt_timeout_secs == Some(0) {
            return Err("executor.receipt-timeout must be greater than zero".to_string());
        }
        if self.batch_poll_interval_ms == 0 {
            return Err("executor.batch-poll-interval must be greater than zero".to_string());
        }
        Ok(())
    }
}

impl ExecutorConfig for ExecutorArgs {
    fn confirmations(&self) -> u64 {
        self.confirmations
    }

    fn receipt_timeout(&self) -> Option<Duration> {
        self.receipt_timeout_secs.map(Duration::from_secs)
    }

    fn reject_reverted_receipts(&self) -> bool {
        self.reject_reverted
    }

    fn batch_poll_interval(&self) -> Duration {
        Duration::from_millis(self.batch_poll_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        executor: ExecutorArgs,
    }

    #[test]
    fn test_defaults_match_config_defaults() {
        let args = TestCli::parse_from(["test"]).executor;
        let defaults = swapflow_api::DefaultExecutorConfig;

        assert_eq!(args.confirmations(), defaults.confirmations());
        assert_eq!(args.receipt_timeout(), defaults.receipt_timeout());
        assert_eq!(args.reject_reverted_receipts(), defaults.reject_reverted_receipts());
        assert_eq!(args.batch_poll_interval(), defaults.batch_poll_interval());
        assert_eq!(args.classifier, ClassifierKind::Payload);
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_parse_flags() {
        let args = TestCli::parse_from([
            "test",
            "--executor.confirmations",
            "3",
            "--executor.receipt-timeout",
            "60",
            "--executor.reject-reverted",
            "false",
            "--executor.classifier",
            "positional",
        ])
        .executor;

        assert_eq!(args.confirmations(), 3);
        assert_eq!(args.receipt_timeout(), Some(Duration::from_secs(60)));
        assert!(!args.reject_reverted_receipts());
        assert_eq!(args.classifier, ClassifierKind::Positional);
    }

    #[test]
    fn test_validate_rejects_zero() {
        let args = ExecutorArgs {
            confirmations: 0,
            ..Default::default()
        };
        assert!(args.validate().is_err());

        let args = ExecutorArgs {
            receipt_timeout_secs: Some(0),
            ..Default::default()
        };
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_serde_defaults() {
        let args: ExecutorArgs = serde_json::from_str(r#"{"confirmations": 2}"#).unwrap();
        assert_eq!(args.confirmations, 2);
        assert!(args.reject_reverted);
        assert_eq!(args.batch_poll_interval_ms, 1000);
    }
}
