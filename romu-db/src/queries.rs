//! Read-only queries: listing, search, statistics, export.

use std::collections::HashSet;

use romu_catalog::{FileRecord, GameMetadata, GameRecord, MetadataEntry};
use romu_core::util::base_name;
use rusqlite::types::Value;
use rusqlite::{Connection, params, params_from_iter};

use crate::operations::{FILE_COLUMNS, GAME_COLUMNS, OperationError, row_to_file, row_to_game, row_to_metadata};

/// Default page size for [`search_files`].
pub const DEFAULT_PAGE_SIZE: i64 = 50;

/// A file joined with its game's descriptive fields, if linked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRow {
    pub file: FileRecord,
    pub game: Option<GameMetadata>,
}

impl FileRow {
    /// Native title, then English title, then the file's display name.
    pub fn display_title(&self) -> &str {
        self.game
            .as_ref()
            .and_then(|g| {
                g.title_ja
                    .as_deref()
                    .filter(|s| !s.is_empty())
                    .or(g.title_en.as_deref().filter(|s| !s.is_empty()))
            })
            .unwrap_or(&self.file.filename)
    }
}

/// One page of search results.
#[derive(Debug, Clone)]
pub struct SearchPage {
    pub rows: Vec<FileRow>,
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
}

/// Per-platform file counts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlatformStats {
    pub platform: String,
    pub total: i64,
    pub matched: i64,
    pub unmatched: i64,
    pub has_title_en: i64,
    pub has_title_ja: i64,
}

/// Catalog-wide counts.
#[derive(Debug, Clone, Default)]
pub struct CatalogStats {
    pub platforms: Vec<PlatformStats>,
    pub total_files: i64,
    pub matched: i64,
    pub unmatched: i64,
    pub total_games: i64,
}

const JOINED_FROM: &str = "FROM rom_files f LEFT JOIN games g ON f.game_id = g.id";

fn row_to_file_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<FileRow> {
    let file = row_to_file(row, 0)?;
    // Joined game columns start after the 12 file columns; skip g.id, g.platform.
    let game = match file.game_id {
        Some(_) => Some(row_to_metadata(row, 14)?),
        None => None,
    };
    Ok(FileRow { file, game })
}

/// Every file with its game, ordered by platform then display name.
pub fn list_files(conn: &Connection) -> Result<Vec<FileRow>, OperationError> {
    let sql = format!(
        "SELECT {FILE_COLUMNS}, {GAME_COLUMNS} {JOINED_FROM} ORDER BY f.platform, f.filename"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], row_to_file_row)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

fn like_pattern(query: &str) -> String {
    let escaped = query
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

/// Substring search over display names and both titles.
///
/// `page` is 1-based; values ≤ 0 fall back to page 1 and
/// [`DEFAULT_PAGE_SIZE`] respectively.
pub fn search_files(
    conn: &Connection,
    query: &str,
    platform: Option<&str>,
    page: i64,
    page_size: i64,
) -> Result<SearchPage, OperationError> {
    let page = if page <= 0 { 1 } else { page };
    let page_size = if page_size <= 0 { DEFAULT_PAGE_SIZE } else { page_size };

    let pattern = like_pattern(query);
    let mut filter = String::from(
        "WHERE (f.filename LIKE ?1 ESCAPE '\\' OR g.title_ja LIKE ?1 ESCAPE '\\' OR g.title_en LIKE ?1 ESCAPE '\\')",
    );
    let mut args: Vec<Value> = vec![Value::Text(pattern)];
    if let Some(p) = platform {
        filter.push_str(" AND f.platform = ?2");
        args.push(Value::Text(p.to_string()));
    }

    let total: i64 = conn.query_row(
        &format!("SELECT COUNT(*) {JOINED_FROM} {filter}"),
        params_from_iter(args.iter()),
        |row| row.get(0),
    )?;

    let limit_idx = args.len() + 1;
    let sql = format!(
        "SELECT {FILE_COLUMNS}, {GAME_COLUMNS} {JOINED_FROM} {filter}
         ORDER BY f.platform, f.filename LIMIT ?{} OFFSET ?{}",
        limit_idx,
        limit_idx + 1
    );
    args.push(Value::Integer(page_size));
    args.push(Value::Integer((page - 1) * page_size));

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params_from_iter(args.iter()), row_to_file_row)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(SearchPage {
        rows,
        total,
        page,
        page_size,
    })
}

/// Per-platform totals of matched, unmatched and titled files.
pub fn catalog_stats(conn: &Connection) -> Result<CatalogStats, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT f.platform,
                COUNT(*),
                COUNT(f.game_id),
                SUM(CASE WHEN g.title_en IS NOT NULL AND g.title_en != '' THEN 1 ELSE 0 END),
                SUM(CASE WHEN g.title_ja IS NOT NULL AND g.title_ja != '' THEN 1 ELSE 0 END)
         FROM rom_files f LEFT JOIN games g ON f.game_id = g.id
         GROUP BY f.platform ORDER BY f.platform",
    )?;
    let platforms = stmt
        .query_map([], |row| {
            let total: i64 = row.get(1)?;
            let matched: i64 = row.get(2)?;
            Ok(PlatformStats {
                platform: row.get(0)?,
                total,
                matched,
                unmatched: total - matched,
                has_title_en: row.get(3)?,
                has_title_ja: row.get(4)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    let total_games: i64 = conn.query_row("SELECT COUNT(*) FROM games", [], |r| r.get(0))?;

    let mut stats = CatalogStats {
        total_games,
        ..Default::default()
    };
    for p in &platforms {
        stats.total_files += p.total;
        stats.matched += p.matched;
        stats.unmatched += p.unmatched;
    }
    stats.platforms = platforms;
    Ok(stats)
}

/// Distinct platform codes present among scanned files.
pub fn list_platforms(conn: &Connection) -> Result<Vec<String>, OperationError> {
    let mut stmt = conn.prepare("SELECT DISTINCT platform FROM rom_files ORDER BY platform")?;
    let rows = stmt.query_map([], |row| row.get(0))?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Gamelist entries for every file on a platform, ordered by display name.
///
/// Container entries export as their container (`./game.zip`); when several
/// entries share one container only the first is kept.
pub fn export_entries(conn: &Connection, platform: &str) -> Result<Vec<MetadataEntry>, OperationError> {
    let sql = format!(
        "SELECT {FILE_COLUMNS}, {GAME_COLUMNS} {JOINED_FROM} WHERE f.platform = ?1 ORDER BY f.filename, f.id"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params![platform], row_to_file_row)?
        .collect::<Result<Vec<_>, _>>()?;

    let mut seen = HashSet::new();
    let mut entries: Vec<MetadataEntry> = Vec::with_capacity(rows.len());
    for row in rows {
        let filename = if row.file.is_container_entry() {
            base_name(&row.file.path).to_string()
        } else {
            row.file.filename.clone()
        };
        let path = format!("./{filename}");
        if !seen.insert(path.clone()) {
            continue;
        }

        let meta = row.game.clone().unwrap_or_default();
        entries.push(MetadataEntry {
            path,
            filename,
            name: Some(row.display_title().to_string()),
            description: meta.description_ja,
            release_date: meta.release_date,
            developer: meta.developer,
            publisher: meta.publisher,
            genre: meta.genre,
            players: meta.players,
            rating: meta.rating,
            image: None,
            thumbnail: None,
            marquee: None,
        });
    }
    Ok(entries)
}

/// Games linked to at least one file and carrying an English title.
///
/// With `platform`, only games with a linked file on that platform.
pub fn enrichable_games(
    conn: &Connection,
    platform: Option<&str>,
) -> Result<Vec<GameRecord>, OperationError> {
    let mut sql = format!(
        "SELECT {GAME_COLUMNS} FROM games g
         WHERE g.title_en IS NOT NULL AND g.title_en != ''
           AND EXISTS (SELECT 1 FROM rom_files f WHERE f.game_id = g.id"
    );
    let mut args: Vec<Value> = Vec::new();
    if let Some(p) = platform {
        sql.push_str(" AND f.platform = ?1");
        args.push(Value::Text(p.to_string()));
    }
    sql.push_str(") ORDER BY g.id");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(args.iter()), |row| row_to_game(row, 0))?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Files with no game link, optionally on one platform.
pub fn unmatched_files(
    conn: &Connection,
    platform: Option<&str>,
) -> Result<Vec<FileRecord>, OperationError> {
    let mut sql = format!("SELECT {FILE_COLUMNS} FROM rom_files f WHERE f.game_id IS NULL");
    let mut args: Vec<Value> = Vec::new();
    if let Some(p) = platform {
        sql.push_str(" AND f.platform = ?1");
        args.push(Value::Text(p.to_string()));
    }
    sql.push_str(" ORDER BY f.platform, f.filename");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(args.iter()), |row| row_to_file(row, 0))?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Number of files with no game link, optionally on one platform.
pub fn count_unmatched_files(conn: &Connection, platform: Option<&str>) -> Result<i64, OperationError> {
    let count = match platform {
        Some(p) => conn.query_row(
            "SELECT COUNT(*) FROM rom_files WHERE game_id IS NULL AND platform = ?1",
            params![p],
            |r| r.get(0),
        )?,
        None => conn.query_row(
            "SELECT COUNT(*) FROM rom_files WHERE game_id IS NULL",
            [],
            |r| r.get(0),
        )?,
    };
    Ok(count)
}
