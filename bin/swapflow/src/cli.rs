//! CLI argument assembly and top-level parser.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use swapflow_executor::ExecutorArgs;
use swapflow_observability::LogArgs;

/// swapflow - capability-driven swap execution
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub(crate) struct Cli {
    /// Logging configuration.
    #[command(flatten)]
    pub(crate) logs: LogArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub(crate) command: Commands,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub(crate) enum Commands {
    /// Execute a swap plan against a simulated wallet and print the status stream.
    Simulate(SimulateArgs),
}

/// Arguments for the 'simulate' command.
#[derive(Debug, Args)]
pub(crate) struct SimulateArgs {
    /// Path to a JSON plan: `{ "capabilities": {...}, "transactions": [...] }`.
    #[arg(long, value_name = "PATH")]
    pub(crate) plan: PathBuf,

    /// Make the wallet reject the call at this position.
    ///
    /// On the atomic path any value rejects the whole bundle.
    #[arg(long, value_name = "INDEX")]
    pub(crate) reject_at: Option<usize>,

    /// Mine the call at this position as reverted.
    #[arg(long, value_name = "INDEX")]
    pub(crate) revert_at: Option<usize>,

    /// Stop after the bundle is submitted instead of following it.
    #[arg(long)]
    pub(crate) no_follow: bool,

    /// Execution configuration.
    #[command(flatten)]
    pub(crate) executor: ExecutorArgs,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_simulate() {
        let cli = Cli::parse_from([
            "swapflow",
            "-v",
            "simulate",
            "--plan",
            "plan.json",
            "--reject-at",
            "1",
            "--executor.confirmations",
            "2",
        ]);

        assert_eq!(cli.logs.verbosity, 1);
        let Commands::Simulate(args) = cli.command;
        assert_eq!(args.plan, PathBuf::from("plan.json"));
        assert_eq!(args.reject_at, Some(1));
        assert_eq!(args.executor.confirmations, 2);
    }
}
