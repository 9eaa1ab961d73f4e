//! Swapflow API - collaborator ports for swap execution.
//!
//! The orchestrator never talks to a wallet, signer or RPC node directly.
//! Everything with a side effect is injected through one of these ports:
//!
//! - [`TransactionSubmitter`] - sign and broadcast single calls or bundles
//! - [`ReceiptWaiter`] - suspend until a transaction is confirmed
//! - [`StatusSink`] - receive the ordered lifecycle-status stream
//! - [`BatchIdSink`] - receive the identifier of a submitted bundle
//! - [`BatchStatusSource`] - query the outcome of a submitted bundle
//!
//! # Design Principles
//!
//! - Traits define *what*, implementations define *how*
//! - No transport concepts leak into the API
//! - Every port is implemented for `&T`, `Arc<T>` and `Box<T>`

#![warn(missing_docs)]

mod config;
mod error;
mod ports;

pub use config::*;
pub use error::*;
pub use ports::*;
