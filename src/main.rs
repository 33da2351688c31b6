//! templated - keep a tree of pages in sync with the files in a directory.

#![allow(dead_code)]

mod actor;
mod cli;
mod config;
mod core;
mod logger;
mod page;
mod pattern;
mod sync;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::ProjectConfig;

fn main() -> Result<()> {
    // Setup global Ctrl+C handler (before any blocking operations)
    core::setup_shutdown_handler()?;

    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    // Keep stdout clean for `scan -o -`
    if let Commands::Scan { args } = &cli.command {
        logger::set_stderr(args.to_stdout());
    }

    let config = ProjectConfig::load(&cli.config)?;
    logger::set_verbose(cli.verbose || config.is_debug());
    debug!("config"; "root {}", config.root.display());

    let sources = config.compile()?;

    match &cli.command {
        Commands::Check => cli::check::run_check(&config, &sources),
        Commands::Scan { args } => cli::scan::run_scan(args, &config, sources),
        Commands::Watch => cli::watch::run_watch(&config, sources),
    }
}
