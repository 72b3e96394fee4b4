//! Register checksum-database titles as games, and link scanned files to
//! games by hash.

use romu_catalog::{ChecksumRecord, ChecksumSet, GameMetadata, GameRecord, take_if_empty};
use romu_core::Platform;
use romu_db::{files_by_hash, find_game_by_title, get_game, insert_game, link_file, update_game_metadata};
use rusqlite::Connection;

use crate::error::ImportError;
use crate::progress::ImportProgress;

/// Statistics from a single checksum-database import.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ImportStats {
    /// Declared title of the database.
    pub source: String,
    pub total_records: u64,
    pub games_created: u64,
    pub games_existing: u64,
    /// Records without a title.
    pub skipped: u64,
}

/// Statistics from a hash match.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MatchStats {
    /// One per file a record's hash matched, linked or not.
    pub matched: u64,
    /// Files that gained a game link.
    pub linked: u64,
    pub games_created: u64,
    /// Already-linked games whose empty English title was filled.
    pub titles_filled: u64,
    /// Records with no usable hash.
    pub no_hash: u64,
}

/// Register every title of a checksum database as a game.
///
/// Games are keyed by (English title, platform); existing games are left
/// untouched and files are never linked here. Runs in one transaction.
pub fn import_checksums(
    conn: &Connection,
    set: &ChecksumSet,
    progress: Option<&dyn ImportProgress>,
) -> Result<ImportStats, ImportError> {
    let mut stats = ImportStats {
        source: set.source.clone(),
        total_records: set.records.len() as u64,
        ..Default::default()
    };
    if let Some(p) = progress {
        p.on_phase(&format!("Importing {} ({})", set.source, set.platform));
    }

    let tx = conn.unchecked_transaction()?;
    for (i, record) in set.records.iter().enumerate() {
        if record.game_title.is_empty() {
            log::warn!("Skipping checksum record without a title (crc {})", record.crc32);
            stats.skipped += 1;
        } else if find_or_create_by_title(&tx, &record.game_title, record.platform)?.1 {
            stats.games_created += 1;
        } else {
            stats.games_existing += 1;
        }
        if let Some(p) = progress {
            p.on_record(i + 1, set.records.len(), &record.game_title);
        }
    }
    tx.commit()?;

    log::info!(
        "Imported {}: {} new games, {} existing",
        stats.source,
        stats.games_created,
        stats.games_existing
    );
    if let Some(p) = progress {
        p.on_complete(&format!("{} new games from {}", stats.games_created, stats.source));
    }
    Ok(stats)
}

/// Parse checksum-database content and import it.
pub fn import_checksum_content(
    conn: &Connection,
    content: &str,
    platform: Option<Platform>,
    progress: Option<&dyn ImportProgress>,
) -> Result<ImportStats, ImportError> {
    let set = romu_dat::parse_checksum_db(content, platform)?;
    import_checksums(conn, &set, progress)
}

/// Link scanned files to games by hash.
///
/// Each record is matched on its strongest hash (SHA1, then MD5, then
/// CRC32) against every file in the catalog. A linked file keeps its game,
/// which only gains the record's title if it has none; an unlinked file is
/// linked to the game with the record's title, created when missing.
/// Runs in one transaction.
pub fn match_checksums(
    conn: &Connection,
    set: &ChecksumSet,
    progress: Option<&dyn ImportProgress>,
) -> Result<MatchStats, ImportError> {
    let mut stats = MatchStats::default();
    if let Some(p) = progress {
        p.on_phase(&format!("Matching {} ({})", set.source, set.platform));
    }

    let tx = conn.unchecked_transaction()?;
    for (i, record) in set.records.iter().enumerate() {
        match_record(&tx, record, &mut stats)?;
        if let Some(p) = progress {
            p.on_record(i + 1, set.records.len(), &record.game_title);
        }
    }
    tx.commit()?;

    log::info!(
        "Matched {} files against {} ({} newly linked, {} games created)",
        stats.matched,
        set.source,
        stats.linked,
        stats.games_created
    );
    if let Some(p) = progress {
        p.on_complete(&format!("{} files matched against {}", stats.matched, set.source));
    }
    Ok(stats)
}

/// Parse checksum-database content and match it against scanned files.
pub fn match_checksum_content(
    conn: &Connection,
    content: &str,
    platform: Option<Platform>,
    progress: Option<&dyn ImportProgress>,
) -> Result<MatchStats, ImportError> {
    let set = romu_dat::parse_checksum_db(content, platform)?;
    match_checksums(conn, &set, progress)
}

fn match_record(
    conn: &Connection,
    record: &ChecksumRecord,
    stats: &mut MatchStats,
) -> Result<(), ImportError> {
    let Some((kind, value)) = record.match_key() else {
        stats.no_hash += 1;
        return Ok(());
    };
    let files = files_by_hash(conn, kind, value)?;
    if files.is_empty() || record.game_title.is_empty() {
        return Ok(());
    }

    for file in files {
        stats.matched += 1;
        match file.game_id {
            Some(game_id) => {
                if fill_english_title(conn, game_id, &record.game_title)? {
                    stats.titles_filled += 1;
                }
            }
            None => {
                let (game_id, created) = find_or_create_by_title(conn, &record.game_title, record.platform)?;
                if created {
                    stats.games_created += 1;
                }
                link_file(conn, file.id, game_id)?;
                stats.linked += 1;
                log::debug!("{} -> {} ({} {})", file.filename, record.game_title, kind, value);
            }
        }
    }
    Ok(())
}

/// Set a game's English title if it has none. Returns whether it changed.
fn fill_english_title(conn: &Connection, game_id: i64, title: &str) -> Result<bool, ImportError> {
    let Some(mut game) = get_game(conn, game_id)? else {
        return Ok(false);
    };
    if !take_if_empty(&mut game.meta.title_en, Some(title)) {
        return Ok(false);
    }
    update_game_metadata(conn, game_id, &game.meta)?;
    Ok(true)
}

/// Find a game by (English title, platform), creating it with only those two
/// fields when missing. Returns the id and whether it was created.
pub(crate) fn find_or_create_by_title(
    conn: &Connection,
    title: &str,
    platform: Platform,
) -> Result<(i64, bool), ImportError> {
    if let Some(game) = find_game_by_title(conn, title, platform.code())? {
        return Ok((game.id, false));
    }
    let game = GameRecord::new(
        platform,
        GameMetadata {
            title_en: Some(title.to_string()),
            ..Default::default()
        },
    );
    Ok((insert_game(conn, &game)?, true))
}
