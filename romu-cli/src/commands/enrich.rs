use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use romu_lib::Platform;

use crate::spinner::Spinner;
use crate::{CliContext, CliError};

/// Fill missing game fields from the reference table.
pub(crate) fn run_enrich(
    ctx: &CliContext,
    platform: Option<Platform>,
    show_skipped: bool,
) -> Result<(), CliError> {
    let db = ctx
        .settings
        .reference_table()
        .map_err(|e| CliError::dat(format!("Failed to load reference table: {}", e)))?;
    let conn = ctx.open_catalog()?;

    let spinner = Spinner::new(ctx.quiet);
    spinner.set_message(format!("Enriching from {} reference entries", db.len()));
    let stats = romu_import::enrich(&conn, &db, platform)
        .map_err(|e| CliError::import(e.to_string()))?;
    spinner.finish();

    log::info!("{}", "Enrichment complete".if_supports_color(Stdout, |t| t.bold()));
    log::info!(
        "  Games enriched:     {:>6}",
        stats.enriched.if_supports_color(Stdout, |t| t.green())
    );
    log::info!("  Games not found:    {:>6}", stats.skipped);
    log::info!("  Unmatched before:   {:>6}", stats.unmatched_before);
    log::info!(
        "  Linked by name:     {:>6}",
        stats.filename_enriched.if_supports_color(Stdout, |t| t.green())
    );
    log::info!("  Names not found:    {:>6}", stats.filename_skipped);

    if show_skipped && !stats.skipped_titles.is_empty() {
        crate::log_blank();
        for (code, titles) in &stats.skipped_titles {
            log::info!("{} ({})", code.if_supports_color(Stdout, |t| t.bold()), titles.len());
            for title in titles {
                log::info!("  {}", title.if_supports_color(Stdout, |t| t.dimmed()));
            }
        }
    }
    Ok(())
}
