use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use romu_lib::Platform;

use crate::{CliContext, CliError};

/// Import every `gamelist.xml` under a ROM tree.
pub(crate) fn run_import_gamelist(ctx: &CliContext, dir: &Path) -> Result<(), CliError> {
    let conn = ctx.open_catalog()?;
    let stats = romu_import::import_gamelists(&conn, dir)
        .map_err(|e| CliError::import(e.to_string()))?;

    log::info!("{}", "Gamelist import complete".if_supports_color(Stdout, |t| t.bold()));
    log::info!("  Lists read:     {:>6}", stats.lists);
    log::info!(
        "  Files matched:  {:>6}",
        stats.files_matched.if_supports_color(Stdout, |t| t.green())
    );
    log::info!("  Games created:  {:>6}", stats.games_created);
    if stats.lists_skipped > 0 {
        log::info!(
            "  Lists skipped:  {:>6}",
            stats.lists_skipped.if_supports_color(Stdout, |t| t.yellow())
        );
    }
    Ok(())
}

/// Write `<dir>/<CODE>/gamelist.xml` for each platform.
pub(crate) fn run_export_gamelist(
    ctx: &CliContext,
    dir: &Path,
    platform: Option<Platform>,
) -> Result<(), CliError> {
    let conn = ctx.open_catalog()?;
    let stats = romu_import::export_gamelists(&conn, dir, platform)
        .map_err(|e| CliError::import(e.to_string()))?;

    if stats.written.is_empty() {
        log::warn!("Nothing to export");
        return Ok(());
    }
    for (code, path, count) in &stats.written {
        log::info!(
            "  {:<7} {:>6} entries -> {}",
            code.if_supports_color(Stdout, |t| t.bold()),
            count,
            path.display().if_supports_color(Stdout, |t| t.cyan()),
        );
    }
    Ok(())
}
