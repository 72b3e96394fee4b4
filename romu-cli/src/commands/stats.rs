use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::{CliContext, CliError};

pub(crate) fn run_stats(ctx: &CliContext) -> Result<(), CliError> {
    let conn = ctx.open_catalog()?;
    let stats = romu_db::catalog_stats(&conn)
        .map_err(|e| CliError::database(format!("Failed to query catalog stats: {}", e)))?;

    log::info!(
        "{}",
        "Catalog Statistics".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("  Database: {}", ctx.db_path().display());
    crate::log_blank();
    log::info!(
        "  {:<8} {:>7} {:>8} {:>10} {:>9} {:>9}",
        "Platform", "Files", "Matched", "Unmatched", "Title EN", "Title JA"
    );
    for p in &stats.platforms {
        log::info!(
            "  {:<8} {:>7} {:>8} {:>10} {:>9} {:>9}",
            p.platform, p.total, p.matched, p.unmatched, p.has_title_en, p.has_title_ja
        );
    }
    crate::log_blank();
    log::info!("  Files:     {:>8}", stats.total_files);
    log::info!(
        "  Matched:   {:>8}",
        stats.matched.if_supports_color(Stdout, |t| t.green())
    );
    log::info!("  Unmatched: {:>8}", stats.unmatched);
    log::info!("  Games:     {:>8}", stats.total_games);
    Ok(())
}
