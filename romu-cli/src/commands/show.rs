use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use romu_core::util::format_size;

use crate::{CliContext, CliError};

fn field(label: &str, value: &Option<String>) {
    if let Some(v) = value.as_deref().filter(|v| !v.is_empty()) {
        log::info!("  {:<13} {}", label, v);
    }
}

/// Print one file with its hashes and linked game.
pub(crate) fn run_show(ctx: &CliContext, file_id: i64) -> Result<(), CliError> {
    let conn = ctx.open_catalog()?;
    let file = romu_db::get_file(&conn, file_id)
        .map_err(|e| CliError::database(format!("Failed to read file {}: {}", file_id, e)))?
        .ok_or_else(|| CliError::database(format!("No file with id {}", file_id)))?;

    log::info!("{}", file.filename.if_supports_color(Stdout, |t| t.bold()));
    log::info!("  {:<13} {}", "Path", file.path);
    if file.is_container_entry() {
        log::info!("  {:<13} {}", "Entry", file.entry);
    }
    log::info!("  {:<13} {}", "Platform", file.platform.if_supports_color(Stdout, |t| t.cyan()));
    log::info!("  {:<13} {} ({} bytes)", "Size", format_size(file.size), file.size);
    log::info!("  {:<13} {}", "CRC32", file.crc32);
    log::info!("  {:<13} {}", "MD5", file.md5);
    log::info!("  {:<13} {}", "SHA1", file.sha1);
    crate::log_blank();

    let Some(game_id) = file.game_id else {
        log::info!("  {}", "Not linked to a game".if_supports_color(Stdout, |t| t.dimmed()));
        return Ok(());
    };
    let game = romu_db::get_game(&conn, game_id)
        .map_err(|e| CliError::database(format!("Failed to read game {}: {}", game_id, e)))?
        .ok_or_else(|| CliError::database(format!("File links to missing game {}", game_id)))?;

    log::info!(
        "{} #{}",
        game.display_title()
            .unwrap_or("(untitled)")
            .if_supports_color(Stdout, |t| t.green()),
        game.id,
    );
    if game.meta.is_empty() {
        log::info!("  {}", "No descriptive fields".if_supports_color(Stdout, |t| t.dimmed()));
        return Ok(());
    }
    let m = &game.meta;
    field("Title (EN)", &m.title_en);
    field("Title (JA)", &m.title_ja);
    field("Developer", &m.developer);
    field("Publisher", &m.publisher);
    field("Released", &m.release_date);
    field("Genre", &m.genre);
    field("Players", &m.players);
    field("Rating", &m.rating);
    field("Description", &m.description_ja);
    Ok(())
}
