//! Test utilities and mocks for swapflow crates.
//!
//! - [`MockWallet`]: scripted submitter, receipt waiter and bundle status
//!   source that records every interaction in order
//! - [`RecordingStatusSink`] / [`RecordingBatchSink`]: observers that keep
//!   everything they receive
//! - [`calls`]: builders for realistic approval and swap calls

#![allow(clippy::expect_used)]

pub mod calls;

mod sinks;
pub use sinks::{RecordingBatchSink, RecordingStatusSink};

mod wallet;
pub use wallet::{MockWallet, WalletEvent, mock_batch_id, mock_tx_hash};
