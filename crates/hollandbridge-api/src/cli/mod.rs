//! CLI command definitions for the `hbridge` binary.
//!
//! Uses clap derive macros for argument parsing. `run` drives the
//! interactive wizard; the other commands are one-shot.

pub mod prompt;
pub mod status;
pub mod wizard;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Map your interests to the megatrends and industries they fit.
#[derive(Parser)]
#[command(name = "hbridge", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export spans to stdout through OpenTelemetry.
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Walk through the five-step questionnaire and generate a report.
    Run {
        /// Where to write the generated report.
        #[arg(short, long, default_value = "holland-bridge-report.html")]
        output: PathBuf,

        /// Start from answers saved by a previous run.
        #[arg(long)]
        answers: Option<PathBuf>,

        /// Save the answers as JSON after submitting.
        #[arg(long)]
        save_answers: Option<PathBuf>,
    },

    /// Print the generation payload for a saved answers file.
    Prompt {
        /// Path to an answers JSON file.
        answers: PathBuf,
    },

    /// Start the REST API server.
    Serve {
        /// Address to bind (defaults to `[server] host` in config.toml).
        #[arg(long, env = "HBRIDGE_HOST")]
        host: Option<String>,

        /// Port to listen on (defaults to `[server] port` in config.toml).
        #[arg(short, long, env = "HBRIDGE_PORT")]
        port: Option<u16>,
    },

    /// Show configuration and credential status.
    Status,

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}
