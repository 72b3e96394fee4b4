//! Backfill game metadata from the static reference table.

use std::collections::BTreeMap;

use romu_catalog::FileRecord;
use romu_core::Platform;
use romu_core::util::{base_name, strip_extension};
use romu_dat::GameDb;
use romu_db::{
    OperationError, count_unmatched_files, enrichable_games, get_game, link_file,
    unmatched_files, update_game_metadata,
};
use rusqlite::Connection;

use crate::dat_import::find_or_create_by_title;
use crate::error::ImportError;

/// Statistics from an enrichment pass.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EnrichStats {
    /// Titled games found in the reference table.
    pub enriched: u64,
    /// Titled games missing from the reference table.
    pub skipped: u64,
    /// Unlinked files resolved through their file name.
    pub filename_enriched: u64,
    pub filename_skipped: u64,
    /// Unlinked files before the pass.
    pub unmatched_before: u64,
    /// Platform code → titles not found, in processing order.
    pub skipped_titles: BTreeMap<String, Vec<String>>,
}

/// Fill empty game fields from `db`, then try to resolve unlinked files by
/// name.
///
/// Games linked to a file and carrying an English title are looked up by that
/// title. Unlinked files are looked up by their entry name, then by their
/// container name (extensions stripped); a hit links the file to the game
/// with that English title, created when missing. Populated fields are never
/// overwritten. Runs in one transaction.
pub fn enrich(
    conn: &Connection,
    db: &GameDb,
    platform: Option<Platform>,
) -> Result<EnrichStats, ImportError> {
    let code = platform.map(|p| p.code());
    let mut stats = EnrichStats::default();

    let tx = conn.unchecked_transaction()?;
    stats.unmatched_before = count_unmatched_files(&tx, code)?.max(0) as u64;

    for mut game in enrichable_games(&tx, code)? {
        let title = game.meta.title_en.clone().unwrap_or_default();
        let entry = game
            .platform
            .parse::<Platform>()
            .ok()
            .and_then(|p| db.lookup(p, &title));
        let Some(entry) = entry else {
            stats.skipped += 1;
            stats.skipped_titles.entry(game.platform.clone()).or_default().push(title);
            continue;
        };
        let filled = game.meta.fill_missing(&entry.to_metadata());
        if filled > 0 {
            update_game_metadata(&tx, game.id, &game.meta)?;
        }
        log::debug!("Enriched {} ({} fields)", title, filled);
        stats.enriched += 1;
    }

    for file in unmatched_files(&tx, code)? {
        let candidates = lookup_titles(&file);
        let hit = file.platform.parse::<Platform>().ok().and_then(|p| {
            candidates
                .iter()
                .find_map(|title| db.lookup(p, title).map(|entry| (p, title, entry)))
        });
        let Some((file_platform, title, entry)) = hit else {
            stats.filename_skipped += 1;
            stats
                .skipped_titles
                .entry(file.platform.clone())
                .or_default()
                .push(candidates.first().cloned().unwrap_or_default());
            continue;
        };

        let (game_id, _) = find_or_create_by_title(&tx, title, file_platform)?;
        let mut game = get_game(&tx, game_id)?.ok_or_else(|| OperationError::not_found("game", game_id))?;
        if game.meta.fill_missing(&entry.to_metadata()) > 0 {
            update_game_metadata(&tx, game_id, &game.meta)?;
        }
        link_file(&tx, file.id, game_id)?;
        log::debug!("{} -> {}", file.filename, title);
        stats.filename_enriched += 1;
    }

    tx.commit()?;

    log::info!(
        "Enriched {} games ({} skipped), {} unmatched files by name ({} skipped)",
        stats.enriched,
        stats.skipped,
        stats.filename_enriched,
        stats.filename_skipped
    );
    Ok(stats)
}

/// Reference-table titles to try for an unlinked file: its own name, then
/// its container's name, each without extension.
fn lookup_titles(file: &FileRecord) -> Vec<String> {
    let own = strip_extension(base_name(&file.filename)).to_string();
    let container = file.filename.split('/').next().unwrap_or_default();
    let container = strip_extension(container).to_string();

    let mut titles = vec![own];
    if !container.is_empty() && !titles.contains(&container) {
        titles.push(container);
    }
    titles
}

#[cfg(test)]
mod tests {
    use super::*;
    use romu_core::Fingerprint;

    fn file(filename: &str, entry: Option<&str>) -> FileRecord {
        FileRecord::scanned("/roms/x", entry, filename, Platform::GameBoy, &Fingerprint::default())
    }

    #[test]
    fn test_lookup_titles_plain_file() {
        assert_eq!(lookup_titles(&file("Tetris (World).gb", None)), vec!["Tetris (World)"]);
    }

    #[test]
    fn test_lookup_titles_container_entry() {
        assert_eq!(
            lookup_titles(&file("Tetris (World).zip/tetris.gb", Some("tetris.gb"))),
            vec!["tetris", "Tetris (World)"]
        );
        assert_eq!(
            lookup_titles(&file("pack.zip/sub/Dr. Mario (World).gb", Some("sub/Dr. Mario (World).gb"))),
            vec!["Dr. Mario (World)", "pack"]
        );
    }

    #[test]
    fn test_lookup_titles_same_name() {
        assert_eq!(
            lookup_titles(&file("Tetris (World).zip/Tetris (World).gb", Some("Tetris (World).gb"))),
            vec!["Tetris (World)"]
        );
    }
}
