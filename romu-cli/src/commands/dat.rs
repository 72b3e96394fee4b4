use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use romu_import::ImportProgress;
use romu_lib::Platform;

use crate::spinner::Spinner;
use crate::{CliContext, CliError};

struct CliImportProgress {
    spinner: Spinner,
}

impl ImportProgress for CliImportProgress {
    fn on_record(&self, current: usize, total: usize, name: &str) {
        self.spinner.set_message(format!("[{}/{}] {}", current, total, name));
    }

    fn on_phase(&self, message: &str) {
        self.spinner.println(message);
    }

    fn on_complete(&self, _message: &str) {
        self.spinner.finish();
    }
}

fn read_dat(file: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(file)
        .map_err(|e| CliError::dat(format!("Failed to read {}: {}", file.display(), e)))
}

/// Create games for every titled record of a checksum database.
pub(crate) fn run_import_dat(
    ctx: &CliContext,
    file: &Path,
    platform: Option<Platform>,
) -> Result<(), CliError> {
    let content = read_dat(file)?;
    let conn = ctx.open_catalog()?;

    let progress = CliImportProgress {
        spinner: Spinner::new(ctx.quiet),
    };
    let stats = romu_import::import_checksum_content(&conn, &content, platform, Some(&progress))
        .map_err(|e| CliError::import(format!("{}: {}", file.display(), e)))?;

    log::info!(
        "{} {}",
        "Imported".if_supports_color(Stdout, |t| t.bold()),
        stats.source.if_supports_color(Stdout, |t| t.cyan()),
    );
    log::info!("  Records:        {:>6}", stats.total_records);
    log::info!(
        "  Games created:  {:>6}",
        stats.games_created.if_supports_color(Stdout, |t| t.green())
    );
    log::info!("  Already known:  {:>6}", stats.games_existing);
    if stats.skipped > 0 {
        log::info!("  Skipped:        {:>6}", stats.skipped);
    }
    Ok(())
}

/// Link scanned files to games by checksum.
pub(crate) fn run_match(
    ctx: &CliContext,
    file: &Path,
    platform: Option<Platform>,
) -> Result<(), CliError> {
    let content = read_dat(file)?;
    let conn = ctx.open_catalog()?;

    let progress = CliImportProgress {
        spinner: Spinner::new(ctx.quiet),
    };
    let stats = romu_import::match_checksum_content(&conn, &content, platform, Some(&progress))
        .map_err(|e| CliError::import(format!("{}: {}", file.display(), e)))?;

    log::info!("{}", "Match complete".if_supports_color(Stdout, |t| t.bold()));
    log::info!(
        "  Files matched:  {:>6}",
        stats.matched.if_supports_color(Stdout, |t| t.green())
    );
    log::info!("  Newly linked:   {:>6}", stats.linked);
    log::info!("  Games created:  {:>6}", stats.games_created);
    log::info!("  Titles filled:  {:>6}", stats.titles_filled);
    if stats.no_hash > 0 {
        log::info!("  Without hashes: {:>6}", stats.no_hash);
    }
    Ok(())
}
