use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use romu_import::{ScanProgress, ScanStats};
use romu_lib::Platform;

use crate::spinner::Spinner;
use crate::{CliContext, CliError};

struct CliScanProgress {
    spinner: Spinner,
}

impl ScanProgress for CliScanProgress {
    fn on_file(&self, platform: Platform, name: &str, crc32: &str) {
        self.spinner.set_message(format!("[{}] {}", platform, name));
        log::debug!("  {} {} {}", platform, crc32, name);
    }

    fn on_skip(&self, path: &str, reason: &str) {
        log::debug!("  skip {}: {}", path, reason);
    }

    fn on_error(&self, path: &str, error: &str) {
        self.spinner.println(format!(
            "  {} {}: {}",
            "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
            path,
            error,
        ));
    }

    fn on_complete(&self, stats: &ScanStats) {
        self.spinner.finish();
        log::info!("{}", "Scan complete".if_supports_color(Stdout, |t| t.bold()));
        log::info!("  Files scanned: {:>6}", stats.scanned);
        log::info!("  Recorded:      {:>6}", stats.added);
        log::info!("  Skipped:       {:>6}", stats.skipped);
        if stats.errors > 0 {
            log::info!(
                "  Errors:        {:>6}",
                stats.errors.if_supports_color(Stdout, |t| t.red())
            );
        }
    }
}

/// Walk a ROM tree and record every recognized file.
pub(crate) fn run_scan(ctx: &CliContext, path: &Path) -> Result<(), CliError> {
    let conn = ctx.open_catalog()?;

    log::info!(
        "{}",
        format!("Scanning {}", path.display()).if_supports_color(Stdout, |t| t.bold()),
    );

    let progress = CliScanProgress {
        spinner: Spinner::new(ctx.quiet),
    };
    romu_import::scan(&conn, path, Some(&progress))
        .map_err(|e| CliError::import(e.to_string()))?;
    Ok(())
}
