//! CLI argument definitions for srcsift.
//!
//! All `clap` structures live here so that `main.rs` stays focused on
//! dispatching subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// srcsift -- source file ingestion and metadata persistence.
#[derive(Parser)]
#[command(
    name = "srcsift",
    version,
    about = "srcsift -- source file ingestion and metadata persistence",
    long_about = "Reads project source trees, fingerprints file content for change \
                  detection, and persists derived metadata into a per-project SQLite \
                  store for downstream analysis stages."
)]
pub struct Cli {
    /// Workspace root holding the projects/ directory.
    #[arg(long, default_value = ".", global = true)]
    pub root: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create project scaffolding and bootstrap the metadata schema.
    Init {
        /// Project name under projects/.
        #[arg(long, short)]
        project: String,
    },

    /// Fingerprint source files and persist new/changed file metadata.
    Scan {
        /// Project name under projects/.
        #[arg(long, short)]
        project: String,

        /// Override the configured source directory.
        #[arg(long)]
        source_dir: Option<PathBuf>,

        /// Digest algorithm (md5 or sha256); overrides the configured one.
        #[arg(long)]
        algorithm: Option<String>,
    },

    /// Show metadata store status for a project.
    Status {
        /// Project name under projects/.
        #[arg(long, short)]
        project: String,
    },
}
