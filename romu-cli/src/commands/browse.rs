use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use romu_db::FileRow;
use romu_lib::Platform;

use super::truncate_str;
use crate::{CliContext, CliError};

fn print_row(row: &FileRow) {
    let title = row.display_title();
    let status = if row.file.game_id.is_some() {
        "\u{2714}".if_supports_color(Stdout, |t| t.green()).to_string()
    } else {
        "\u{2718}".if_supports_color(Stdout, |t| t.dimmed()).to_string()
    };
    log::info!(
        "  {} {:>5} {:<7} {:<40} {} {}",
        status,
        row.file.id,
        row.file.platform.if_supports_color(Stdout, |t| t.cyan()),
        truncate_str(title, 40),
        row.file.crc32.if_supports_color(Stdout, |t| t.dimmed()),
        romu_core::util::format_size(row.file.size),
    );
    if title != row.file.filename {
        log::info!(
            "                  {}",
            row.file.filename.if_supports_color(Stdout, |t| t.dimmed())
        );
    }
}

/// Print every cataloged file.
pub(crate) fn run_list(ctx: &CliContext) -> Result<(), CliError> {
    let conn = ctx.open_catalog()?;
    let rows = romu_db::list_files(&conn)
        .map_err(|e| CliError::database(format!("Failed to list files: {}", e)))?;

    if rows.is_empty() {
        log::info!("Catalog is empty. Run 'romu scan <path>' first.");
        return Ok(());
    }
    for row in &rows {
        print_row(row);
    }
    crate::log_blank();
    log::info!("{} files", rows.len());
    Ok(())
}

/// Print one page of search results.
pub(crate) fn run_search(
    ctx: &CliContext,
    query: &str,
    platform: Option<Platform>,
    page: i64,
    page_size: i64,
) -> Result<(), CliError> {
    let conn = ctx.open_catalog()?;
    let result = romu_db::search_files(&conn, query, platform.map(|p| p.code()), page, page_size)
        .map_err(|e| CliError::database(format!("Search failed: {}", e)))?;

    for row in &result.rows {
        print_row(row);
    }

    let pages = (result.total + result.page_size - 1) / result.page_size;
    crate::log_blank();
    log::info!(
        "{} matches (page {} of {})",
        result.total.if_supports_color(Stdout, |t| t.bold()),
        result.page,
        pages.max(1),
    );
    Ok(())
}

/// Print the platforms that have files in the catalog.
pub(crate) fn run_platforms(ctx: &CliContext) -> Result<(), CliError> {
    let conn = ctx.open_catalog()?;
    let codes = romu_db::list_platforms(&conn)
        .map_err(|e| CliError::database(format!("Failed to list platforms: {}", e)))?;

    for code in codes {
        let name = code
            .parse::<Platform>()
            .map(|p| p.display_name())
            .unwrap_or("Unknown");
        log::info!(
            "  {:<7} {}",
            code.if_supports_color(Stdout, |t| t.bold()),
            name.if_supports_color(Stdout, |t| t.cyan()),
        );
    }
    Ok(())
}
