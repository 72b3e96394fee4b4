//! Gamelist (`gamelist.xml`) reconciliation: link files to games by
//! filename, and write the catalog back out as gamelists.

use std::path::{Path, PathBuf};

use romu_catalog::{GameRecord, MetadataEntry};
use romu_core::Platform;
use romu_db::{
    export_entries, files_matching_name, find_game_by_native_title, insert_game, link_file,
    list_platforms, update_game_metadata,
};
use romu_lib::walk_files;
use rusqlite::Connection;

use crate::error::ImportError;

const GAMELIST_FILE: &str = "gamelist.xml";

/// Totals from [`import_gamelists`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GamelistStats {
    pub lists: u64,
    pub games_created: u64,
    pub files_matched: u64,
    /// Lists skipped for an unknown platform folder or a parse failure.
    pub lists_skipped: u64,
}

/// Totals from [`export_gamelists`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ExportStats {
    /// Written files, one per platform with entries.
    pub written: Vec<(String, PathBuf, usize)>,
}

/// Link files on `platform` to games using one parsed gamelist.
///
/// An entry matches files whose display name is its filename, ends in
/// `/<filename>`, or starts with `<filename>/`. Matched files are linked to
/// the game with the entry's name as native title (created when missing,
/// otherwise only its empty fields are filled), replacing any earlier link.
/// Runs in one transaction. Returns `(games created, files matched)`.
pub fn match_metadata_list(
    conn: &Connection,
    entries: &[MetadataEntry],
    platform: Platform,
) -> Result<(u64, u64), ImportError> {
    let mut created = 0;
    let mut matched = 0;

    let tx = conn.unchecked_transaction()?;
    for entry in entries {
        let Some(name) = entry.name.as_deref().filter(|n| !n.is_empty()) else {
            continue;
        };
        let files = files_matching_name(&tx, platform.code(), &entry.filename)?;
        if files.is_empty() {
            log::debug!("No file for gamelist entry {}", entry.filename);
            continue;
        }

        let incoming = entry.to_metadata();
        let game_id = match find_game_by_native_title(&tx, name, platform.code())? {
            Some(mut game) => {
                if game.meta.fill_missing(&incoming) > 0 {
                    update_game_metadata(&tx, game.id, &game.meta)?;
                }
                game.id
            }
            None => {
                created += 1;
                insert_game(&tx, &GameRecord::new(platform, incoming))?
            }
        };

        for file in files {
            link_file(&tx, file.id, game_id)?;
            matched += 1;
        }
    }
    tx.commit()?;

    Ok((created, matched))
}

/// Find every `gamelist.xml` under `root` and match it against the catalog.
///
/// The platform comes from the list's parent folder name. Lists in unknown
/// folders, and lists that fail to parse, are logged and skipped.
pub fn import_gamelists(conn: &Connection, root: &Path) -> Result<GamelistStats, ImportError> {
    if !root.is_dir() {
        return Err(ImportError::NotADirectory(root.to_path_buf()));
    }

    let mut stats = GamelistStats::default();
    for item in walk_files(root) {
        let path = match item {
            Ok(path) => path,
            Err(e) => {
                log::warn!("Walk error: {}", e);
                continue;
            }
        };
        if path.file_name().and_then(|n| n.to_str()) != Some(GAMELIST_FILE) {
            continue;
        }

        let folder = path
            .parent()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let Some(platform) = Platform::from_folder_name(&folder) else {
            log::warn!("Skipping {} (unknown platform: {})", path.display(), folder);
            stats.lists_skipped += 1;
            continue;
        };

        let entries = match romu_dat::parse_gamelist_file(&path) {
            Ok(entries) => entries,
            Err(e) => {
                log::warn!("Skipping {}: {}", path.display(), e);
                stats.lists_skipped += 1;
                continue;
            }
        };

        let (created, matched) = match_metadata_list(conn, &entries, platform)?;
        log::info!(
            "  [{}] {}: {} games created, {} files matched",
            platform,
            folder,
            created,
            matched
        );
        stats.lists += 1;
        stats.games_created += created;
        stats.files_matched += matched;
    }

    Ok(stats)
}

/// Write `<out_dir>/<PLATFORM>/gamelist.xml` for one platform, or for every
/// platform in the catalog. Platforms without files are skipped.
pub fn export_gamelists(
    conn: &Connection,
    out_dir: &Path,
    platform: Option<Platform>,
) -> Result<ExportStats, ImportError> {
    let platforms = match platform {
        Some(p) => vec![p.code().to_string()],
        None => list_platforms(conn)?,
    };

    let mut stats = ExportStats::default();
    for code in platforms {
        let entries = export_entries(conn, &code)?;
        if entries.is_empty() {
            continue;
        }
        let path = out_dir.join(&code).join(GAMELIST_FILE);
        romu_dat::write_gamelist_file(&path, &entries)?;
        log::debug!("Wrote {} entries to {}", entries.len(), path.display());
        stats.written.push((code, path, entries.len()));
    }
    Ok(stats)
}
