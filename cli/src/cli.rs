//! # CLI Interface
//!
//! Defines the command-line argument structure for `bancoin-tx` using
//! `clap` derive. Supports three subcommands: `kinds`, `inspect`, and
//! `version`.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::logging::LogFormat;

/// Bancoin transaction registry inspector.
///
/// Shows how the wallet would dispatch, normalize, encode and convert a
/// signing request, without signing anything.
#[derive(Parser, Debug)]
#[command(
    name = "bancoin-tx",
    about = "Bancoin transaction registry inspector",
    version,
    propagate_version = true
)]
pub struct BancoinTxCli {
    /// Log output format: `pretty` or `json`.
    #[arg(long, global = true, env = "BANCOIN_LOG_FORMAT", default_value = "pretty")]
    pub log_format: LogFormat,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the dispatch table.
    Kinds(KindsArgs),
    /// Run a signing request through the registry and print the result.
    Inspect(InspectArgs),
    /// Print version information and exit.
    Version,
}

/// Arguments for the `kinds` subcommand.
#[derive(Parser, Debug)]
pub struct KindsArgs {
    /// Print the table as JSON instead of aligned text.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `inspect` subcommand.
#[derive(Parser, Debug)]
pub struct InspectArgs {
    /// Path to a JSON request `{"type", "version", "data"}`. Use `-` for stdin.
    pub file: PathBuf,

    /// Network code the request is prepared for (`W` mainnet, `T` testnet,
    /// `S` stagenet, or any other alphanumeric chain id).
    #[arg(long, short = 'n', env = "BANCOIN_NETWORK", default_value_t = 'W')]
    pub network: char,

    /// Epoch milliseconds used when the request carries no timestamp.
    ///
    /// When omitted, absent timestamps are filled from the system clock.
    #[arg(long, short = 't')]
    pub timestamp: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        // Ensures the derive macros produce a valid CLI definition.
        BancoinTxCli::command().debug_assert();
    }

    #[test]
    fn inspect_defaults_to_mainnet() {
        let cli = BancoinTxCli::try_parse_from(["bancoin-tx", "inspect", "req.json"]).unwrap();
        match cli.command {
            Commands::Inspect(args) => {
                assert_eq!(args.file, PathBuf::from("req.json"));
                assert_eq!(args.timestamp, None);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn log_format_is_global() {
        let cli = BancoinTxCli::try_parse_from(["bancoin-tx", "kinds", "--log-format", "json"])
            .unwrap();
        assert_eq!(cli.log_format, LogFormat::Json);
    }
}
