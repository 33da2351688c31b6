//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Keep a tree of pages in sync with the files in a directory
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: templated.toml, searched upward from cwd)
    #[arg(short = 'C', long, global = true, default_value = "templated.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Enable verbose output for debugging
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Validate the configuration and list the sources
    #[command(visible_alias = "c")]
    Check,

    /// Scan the sources once and print the page tree
    #[command(visible_alias = "s")]
    Scan {
        #[command(flatten)]
        args: ScanArgs,
    },

    /// Scan, then keep the page tree in sync until Ctrl+C
    #[command(visible_alias = "w")]
    Watch,
}

/// Scan command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct ScanArgs {
    /// Write the page nodes as JSON to this file (`-` for stdout)
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Include each file's contents as `content` in the JSON
    #[arg(short, long)]
    pub content: bool,

    /// Pretty-print JSON output
    #[arg(short, long)]
    pub pretty: bool,
}

impl ScanArgs {
    /// `-o -`: the JSON goes to stdout
    pub fn to_stdout(&self) -> bool {
        self.output.as_ref().is_some_and(|p| p.as_os_str() == "-")
    }
}
