//! Logging setup shared by swapflow binaries.
//!
//! Log output always goes to stderr so that stdout stays free for
//! machine-readable output such as the status stream.

mod args;
pub use args::LogArgs;

mod logging;
pub use logging::{build_filter, init_logging};
