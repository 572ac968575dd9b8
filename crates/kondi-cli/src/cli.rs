//! CLI argument definitions for kondi.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use kondi_core::config::ResolutionMode;

#[derive(Parser, Debug)]
#[command(
    name = "kondi",
    version,
    about = "Resolve extension dependency graphs with conditional dependencies"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Path to Kondi.toml (default: nearest one in the current directory or above)
    #[arg(long, global = true)]
    pub manifest_path: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the resolved dependency tree
    Tree {
        /// Maximum depth
        #[arg(long)]
        depth: Option<usize>,
        /// Print the deployment graph instead of the runtime graph
        #[arg(long)]
        deployment: bool,
        /// Show inverted tree (dependents instead of dependencies)
        #[arg(long)]
        inverted: bool,
        /// Explain why an artifact is included
        #[arg(long)]
        why: Option<String>,
        /// Resolution mode: prod, test or dev
        #[arg(long)]
        mode: Option<ResolutionMode>,
    },

    /// Print every resolved artifact with its flags
    Flags {
        /// Print the deployment graph instead of the runtime graph
        #[arg(long)]
        deployment: bool,
        /// Resolution mode: prod, test or dev
        #[arg(long)]
        mode: Option<ResolutionMode>,
    },

    /// Print conditional activation rounds and excluded edges
    Report {
        /// Resolution mode: prod, test or dev
        #[arg(long)]
        mode: Option<ResolutionMode>,
    },
}

/// Parse command-line arguments.
pub fn parse() -> Cli {
    Cli::parse()
}
