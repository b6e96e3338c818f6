//! Command-line interface definition for the `dcflex` binary.

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Set the logging level
    #[arg(long, default_value = "info")]
    pub log_level: tracing::Level,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Solve the dispatch model at a single reliability target
    Solve {
        /// Path to the scenario JSON file
        #[arg(long)]
        scenario: PathBuf,
        /// Reliability target in [0, 1]; defaults to the scenario's
        /// `reliability.target`
        #[arg(long)]
        target: Option<f64>,
        /// MILP backend to use
        #[arg(long, default_value = "highs")]
        lp_solver: String,
        /// Let the solver print its own log
        #[arg(long)]
        solver_log: bool,
        /// Write the result document to a file instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Trace the cost-reliability frontier over the scenario's sweep targets
    Pareto {
        /// Path to the scenario JSON file
        #[arg(long)]
        scenario: PathBuf,
        /// MILP backend to use
        #[arg(long, default_value = "highs")]
        lp_solver: String,
        /// Let the solver print its own log
        #[arg(long)]
        solver_log: bool,
        /// Write the result document to a file instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell type
        #[arg(value_enum)]
        shell: Shell,
        /// Write output to a file instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

pub fn build_cli_command() -> clap::Command {
    Cli::command()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_solve() {
        let cli = Cli::try_parse_from([
            "dcflex",
            "solve",
            "--scenario",
            "site.json",
            "--target",
            "0.99",
        ])
        .unwrap();
        match cli.command {
            Commands::Solve { scenario, target, lp_solver, .. } => {
                assert_eq!(scenario, PathBuf::from("site.json"));
                assert_eq!(target, Some(0.99));
                assert_eq!(lp_solver, "highs");
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_cli_debug_asserts() {
        build_cli_command().debug_assert();
    }
}
