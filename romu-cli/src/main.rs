//! romu CLI
//!
//! Scan ROM folders into a SQLite catalog and reconcile them against
//! checksum databases, gamelists and the reference table.

mod cli_types;
mod commands;
mod error;
mod spinner;

use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use rusqlite::Connection;

pub(crate) use error::CliError;

use cli_types::{Cli, Commands, ConfigAction};
use romu_lib::Settings;

/// Per-invocation state shared by every command.
pub(crate) struct CliContext {
    pub settings: Settings,
    pub db_override: Option<PathBuf>,
    pub quiet: bool,
}

impl CliContext {
    pub(crate) fn db_path(&self) -> PathBuf {
        self.settings.resolve_db_path(self.db_override.clone())
    }

    /// Open (creating if needed) the catalog database.
    pub(crate) fn open_catalog(&self) -> Result<Connection, CliError> {
        let path = self.db_path();
        log::debug!("Catalog: {}", path.display());
        romu_db::open_database(&path).map_err(|e| {
            CliError::database(format!("Failed to open {}: {}", path.display(), e))
        })
    }
}

/// Emit an empty info line.
pub(crate) fn log_blank() {
    log::info!("");
}

fn init_logger(verbose: bool, quiet: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else if quiet {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .target(env_logger::Target::Stdout)
        .format(|buf, record| match record.level() {
            log::Level::Info => writeln!(buf, "{}", record.args()),
            log::Level::Warn => writeln!(
                buf,
                "{} {}",
                "warning:".if_supports_color(Stdout, |t| t.yellow()),
                record.args()
            ),
            log::Level::Error => writeln!(
                buf,
                "{} {}",
                "error:".if_supports_color(Stdout, |t| t.red()),
                record.args()
            ),
            _ => writeln!(buf, "[{}] {}", record.target(), record.args()),
        })
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logger(cli.verbose, cli.quiet);

    let ctx = CliContext {
        settings: Settings::load(),
        db_override: cli.db,
        quiet: cli.quiet,
    };

    let result = match cli.command {
        Commands::Scan { path } => commands::scan::run_scan(&ctx, &path),
        Commands::List => commands::browse::run_list(&ctx),
        Commands::Search {
            query,
            platform,
            page,
            page_size,
        } => commands::browse::run_search(&ctx, &query, platform, page, page_size),
        Commands::Show { id } => commands::show::run_show(&ctx, id),
        Commands::Stats => commands::stats::run_stats(&ctx),
        Commands::ImportDat { file, platform } => {
            commands::dat::run_import_dat(&ctx, &file, platform)
        }
        Commands::Match { file, platform } => commands::dat::run_match(&ctx, &file, platform),
        Commands::ImportGamelist { dir } => commands::gamelist::run_import_gamelist(&ctx, &dir),
        Commands::ExportGamelist { dir, platform } => {
            commands::gamelist::run_export_gamelist(&ctx, &dir, platform)
        }
        Commands::Enrich {
            platform,
            show_skipped,
        } => commands::enrich::run_enrich(&ctx, platform, show_skipped),
        Commands::Platforms => commands::browse::run_platforms(&ctx),
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::run_config_show(&ctx),
            ConfigAction::Path => commands::config::run_config_path(),
            ConfigAction::SetDb { path } => commands::config::run_config_set_db(&ctx, path),
            ConfigAction::SetGamedb { path } => {
                commands::config::run_config_set_gamedb(&ctx, path)
            }
        },
    };

    if let Err(e) = result {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
