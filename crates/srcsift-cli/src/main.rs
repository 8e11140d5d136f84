//! CLI entry point for srcsift.
//!
//! This binary provides the `srcsift` command with subcommands for
//! initializing a project's metadata store, scanning a source tree, and
//! reporting store status.
//!
//! This is the only place in the workspace allowed to terminate the
//! process: library errors bubble up as typed results and are mapped to
//! exit codes here.

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod defaults;
mod layout;

use cli::{Cli, Commands};

fn main() {
    init_tracing("info");

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Init { project } => commands::cmd_init(&cli.root, &project),
        Commands::Scan {
            project,
            source_dir,
            algorithm,
        } => commands::cmd_scan(
            &cli.root,
            &project,
            source_dir.as_deref(),
            algorithm.as_deref(),
        ),
        Commands::Status { project } => commands::cmd_status(&cli.root, &project),
    };

    if let Err(err) = result {
        error!(error = %format_chain(&err), "srcsift failed");
        std::process::exit(exit_code(&err));
    }
}

fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Exit codes by error family: config 2, store 3, ingest 4, otherwise 1.
fn exit_code(err: &anyhow::Error) -> i32 {
    for cause in err.chain() {
        if cause.is::<srcsift_config::ConfigError>() {
            return 2;
        }
        if cause.is::<srcsift_store::StoreError>() {
            return 3;
        }
        if cause.is::<srcsift_ingest::IngestError>() {
            return 4;
        }
    }
    1
}

fn format_chain(err: &anyhow::Error) -> String {
    err.chain()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(": ")
}

// ── tests ────────────────────────────────────────────────────────────
