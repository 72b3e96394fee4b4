//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use romu_lib::Platform;

#[derive(Parser)]
#[command(name = "romu")]
#[command(about = "Catalog and reconcile a ROM library", long_about = None)]
pub(crate) struct Cli {
    /// Catalog database file (overrides settings.toml)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Only show warnings and errors (suppress normal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Scan a ROM tree and record every recognized file
    Scan {
        /// Root folder containing platform folders
        path: PathBuf,
    },

    /// List every cataloged file
    List,

    /// Search filenames and titles
    Search {
        /// Substring to look for
        query: String,

        /// Restrict to one platform (code or folder name)
        #[arg(short, long)]
        platform: Option<Platform>,

        /// Page number, starting at 1
        #[arg(long, default_value_t = 1)]
        page: i64,

        /// Rows per page
        #[arg(long, default_value_t = romu_db::queries::DEFAULT_PAGE_SIZE)]
        page_size: i64,
    },

    /// Show one file with its hashes and linked game
    Show {
        /// File id as printed by `list` and `search`
        id: i64,
    },

    /// Show per-platform catalog statistics
    Stats,

    /// Import games from a checksum database (Logiqx XML or ClrMamePro)
    ImportDat {
        /// Checksum database file
        file: PathBuf,

        /// Platform to use when the header does not name one
        #[arg(short, long)]
        platform: Option<Platform>,
    },

    /// Link scanned files to games by checksum
    Match {
        /// Checksum database file
        file: PathBuf,

        /// Platform to use when the header does not name one
        #[arg(short, long)]
        platform: Option<Platform>,
    },

    /// Import every gamelist.xml found under a ROM tree
    ImportGamelist {
        /// Root folder containing platform folders
        dir: PathBuf,
    },

    /// Write one gamelist.xml per platform
    ExportGamelist {
        /// Output folder
        dir: PathBuf,

        /// Export only this platform
        #[arg(short, long)]
        platform: Option<Platform>,
    },

    /// Fill missing game fields from the reference table
    Enrich {
        /// Restrict to one platform
        #[arg(short, long)]
        platform: Option<Platform>,

        /// List titles that were not found
        #[arg(long)]
        show_skipped: bool,
    },

    /// List platforms present in the catalog
    Platforms,

    /// Show or change settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show current settings and resolved paths
    Show,

    /// Print the settings file path
    Path,

    /// Set the default catalog database file
    SetDb {
        path: PathBuf,
    },

    /// Set the directory of extra reference tables
    SetGamedb {
        path: PathBuf,
    },
}
