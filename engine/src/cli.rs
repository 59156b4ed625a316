//! CLI interface for Atelier
//!
//! This module provides the command-line interface using clap's derive API.

use crate::config::LOG_LEVELS;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Style used when none is given on the command line
pub const DEFAULT_STYLE: &str = "Monet";

/// Atelier: painterly AI tasks for enterprise text
///
/// Runs one of ten preset generative tasks against your text, answered in the
/// voice of the chosen painter, with a chart series for the analytic features.
#[derive(Parser, Debug)]
#[command(name = "atelier")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", value_parser = LOG_LEVELS)]
    pub log: Option<String>,

    /// Specify alternate configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the available features
    Features,

    /// Run a feature against some text
    Run {
        /// Feature identifier, e.g. strategic-oracle
        feature: String,

        /// The text to work on
        text: String,

        /// Painter whose voice colors the answer
        #[arg(short, long, default_value = DEFAULT_STYLE)]
        style: String,
    },

    /// Show the request a run would send, without calling the service
    Request {
        /// Feature identifier, e.g. strategic-oracle
        feature: String,

        /// The text to work on
        text: String,

        /// Painter whose voice colors the answer
        #[arg(short, long, default_value = DEFAULT_STYLE)]
        style: String,
    },

    /// Check configuration and credential
    Doctor,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_defaults_style() {
        let cli = Cli::parse_from(["atelier", "run", "muse-whisper", "tea shop"]);
        match cli.command {
            Command::Run {
                feature,
                text,
                style,
            } => {
                assert_eq!(feature, "muse-whisper");
                assert_eq!(text, "tea shop");
                assert_eq!(style, DEFAULT_STYLE);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "atelier",
            "request",
            "time-capsule",
            "email the team",
            "--style",
            "Vermeer",
            "--json",
        ]);
        assert!(cli.json);
        assert!(matches!(cli.command, Command::Request { ref style, .. } if style == "Vermeer"));
    }

    #[test]
    fn test_log_level_is_restricted() {
        let cli = Cli::parse_from(["atelier", "--log", "debug", "features"]);
        assert_eq!(cli.log.as_deref(), Some("debug"));

        let err = Cli::try_parse_from(["atelier", "--log", "loud", "features"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
