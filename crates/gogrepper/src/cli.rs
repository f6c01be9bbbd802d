//! CLI command structure using clap

use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gogrepper")]
#[command(version, about = "Structural search and replace for Go code via gogrep", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file [default: <config dir>/gogrepper/config.toml]
    #[arg(long, global = true, env = "GOGREPPER_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search the given file
    File {
        /// Go source file whose results are shown
        file: PathBuf,

        #[command(flatten)]
        pattern: PatternArgs,
    },

    /// Search recursively from the directory of the given file
    Dir {
        /// Go source file whose directory is searched
        file: PathBuf,

        #[command(flatten)]
        pattern: PatternArgs,
    },

    /// Search recursively from the workspace root
    Root {
        /// Workspace root [default: nearest ancestor with go.mod or .git]
        #[arg(long)]
        workspace: Option<PathBuf>,

        #[command(flatten)]
        pattern: PatternArgs,
    },

    /// Install the bundled gogrep binary for this platform
    Install,

    /// Check configuration and gogrep availability
    Doctor {
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug, Clone)]
pub struct PatternArgs {
    /// `expr`, `expr -> repl`, or `expr -> repl!` for in-place rewriting;
    /// prompted for when omitted
    pub pattern: Option<String>,

    /// Keep prompting for patterns until end of input
    #[arg(short, long, conflicts_with = "pattern")]
    pub interactive: bool,
}
