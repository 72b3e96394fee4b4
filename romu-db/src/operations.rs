//! Row-level operations on files and games.

use romu_catalog::{FileRecord, GameMetadata, GameRecord, HashKind};
use rusqlite::{Connection, OptionalExtension, Row, params};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OperationError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Entity not found: {entity_type} with id '{id}'")]
    NotFound { entity_type: String, id: String },
}

impl OperationError {
    pub fn not_found(entity_type: &str, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type: entity_type.to_string(),
            id: id.to_string(),
        }
    }
}

pub(crate) const FILE_COLUMNS: &str = "f.id, f.path, f.entry, f.filename, f.size, f.crc32, f.md5, f.sha1, f.platform, f.game_id, f.created_at, f.updated_at";

pub(crate) const GAME_COLUMNS: &str = "g.id, g.platform, g.title_en, g.title_ja, g.description_ja, g.developer, g.publisher, g.release_date, g.genre, g.players, g.rating, g.created_at, g.updated_at";

/// Map a row selected with [`FILE_COLUMNS`] starting at column `offset`.
pub(crate) fn row_to_file(row: &Row<'_>, offset: usize) -> rusqlite::Result<FileRecord> {
    Ok(FileRecord {
        id: row.get(offset)?,
        path: row.get(offset + 1)?,
        entry: row.get(offset + 2)?,
        filename: row.get(offset + 3)?,
        size: row.get::<_, i64>(offset + 4)?.max(0) as u64,
        crc32: row.get(offset + 5)?,
        md5: row.get(offset + 6)?,
        sha1: row.get(offset + 7)?,
        platform: row.get(offset + 8)?,
        game_id: row.get(offset + 9)?,
        created_at: row.get(offset + 10)?,
        updated_at: row.get(offset + 11)?,
    })
}

/// Map the descriptive columns of [`GAME_COLUMNS`] starting at `offset`
/// (the column after `g.platform`).
pub(crate) fn row_to_metadata(row: &Row<'_>, offset: usize) -> rusqlite::Result<GameMetadata> {
    Ok(GameMetadata {
        title_en: row.get(offset)?,
        title_ja: row.get(offset + 1)?,
        description_ja: row.get(offset + 2)?,
        developer: row.get(offset + 3)?,
        publisher: row.get(offset + 4)?,
        release_date: row.get(offset + 5)?,
        genre: row.get(offset + 6)?,
        players: row.get(offset + 7)?,
        rating: row.get(offset + 8)?,
    })
}

/// Map a row selected with [`GAME_COLUMNS`] starting at column `offset`.
pub(crate) fn row_to_game(row: &Row<'_>, offset: usize) -> rusqlite::Result<GameRecord> {
    Ok(GameRecord {
        id: row.get(offset)?,
        platform: row.get(offset + 1)?,
        meta: row_to_metadata(row, offset + 2)?,
        created_at: row.get(offset + 11)?,
        updated_at: row.get(offset + 12)?,
    })
}

// ── File Operations ─────────────────────────────────────────────────────────

/// Insert or refresh a scanned file keyed by `(path, entry)`.
///
/// Size, hashes, display name and platform are replaced; the game link is
/// never touched. Returns the row id.
pub fn upsert_file(conn: &Connection, file: &FileRecord) -> Result<i64, OperationError> {
    let id = conn.query_row(
        "INSERT INTO rom_files (path, entry, filename, size, crc32, md5, sha1, platform)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
         ON CONFLICT(path, entry) DO UPDATE SET
             filename = excluded.filename,
             size = excluded.size,
             crc32 = excluded.crc32,
             md5 = excluded.md5,
             sha1 = excluded.sha1,
             platform = excluded.platform,
             updated_at = datetime('now')
         RETURNING id",
        params![
            file.path,
            file.entry,
            file.filename,
            file.size as i64,
            file.crc32,
            file.md5,
            file.sha1,
            file.platform,
        ],
        |row| row.get(0),
    )?;
    Ok(id)
}

/// Fetch one file by id.
pub fn get_file(conn: &Connection, id: i64) -> Result<Option<FileRecord>, OperationError> {
    let sql = format!("SELECT {FILE_COLUMNS} FROM rom_files f WHERE f.id = ?1");
    let file = conn
        .query_row(&sql, params![id], |row| row_to_file(row, 0))
        .optional()?;
    Ok(file)
}

/// All files whose digest of the given kind equals `value` (uppercase hex).
pub fn files_by_hash(
    conn: &Connection,
    kind: HashKind,
    value: &str,
) -> Result<Vec<FileRecord>, OperationError> {
    if value.is_empty() {
        return Ok(Vec::new());
    }
    let sql = format!(
        "SELECT {FILE_COLUMNS} FROM rom_files f WHERE f.{} = ?1 ORDER BY f.id",
        kind.column()
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params![value], |row| row_to_file(row, 0))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Files on `platform` whose display name is `name`, ends in `/<name>`, or
/// starts with `<name>/`.
///
/// The last two forms let a container name match its entries
/// (`game.zip` ↔ `game.zip/game.nes`) and an entry name match the
/// container-qualified display name (`game.nes` ↔ `game.zip/game.nes`).
/// Comparison is exact and case-sensitive.
pub fn files_matching_name(
    conn: &Connection,
    platform: &str,
    name: &str,
) -> Result<Vec<FileRecord>, OperationError> {
    if name.is_empty() {
        return Ok(Vec::new());
    }
    let suffix = format!("/{name}");
    let prefix = format!("{name}/");
    let sql = format!(
        "SELECT {FILE_COLUMNS} FROM rom_files f
         WHERE f.platform = ?1
           AND (f.filename = ?2
                OR substr(f.filename, -length(?3)) = ?3
                OR substr(f.filename, 1, length(?4)) = ?4)
         ORDER BY f.id"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params![platform, name, suffix, prefix], |row| row_to_file(row, 0))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Point a file at a game, replacing any previous link.
pub fn link_file(conn: &Connection, file_id: i64, game_id: i64) -> Result<(), OperationError> {
    let changed = conn.execute(
        "UPDATE rom_files SET game_id = ?1, updated_at = datetime('now') WHERE id = ?2",
        params![game_id, file_id],
    )?;
    if changed == 0 {
        return Err(OperationError::not_found("rom_file", file_id));
    }
    Ok(())
}

// ── Game Operations ─────────────────────────────────────────────────────────

/// Insert a new game. Returns the generated id.
pub fn insert_game(conn: &Connection, game: &GameRecord) -> Result<i64, OperationError> {
    let m = &game.meta;
    conn.execute(
        "INSERT INTO games (platform, title_en, title_ja, description_ja, developer, publisher, release_date, genre, players, rating)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            game.platform,
            m.title_en,
            m.title_ja,
            m.description_ja,
            m.developer,
            m.publisher,
            m.release_date,
            m.genre,
            m.players,
            m.rating,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Fetch one game by id.
pub fn get_game(conn: &Connection, id: i64) -> Result<Option<GameRecord>, OperationError> {
    let sql = format!("SELECT {GAME_COLUMNS} FROM games g WHERE g.id = ?1");
    let game = conn
        .query_row(&sql, params![id], |row| row_to_game(row, 0))
        .optional()?;
    Ok(game)
}

/// First game (lowest id) with the given English title on a platform.
pub fn find_game_by_title(
    conn: &Connection,
    title_en: &str,
    platform: &str,
) -> Result<Option<GameRecord>, OperationError> {
    let sql = format!(
        "SELECT {GAME_COLUMNS} FROM games g WHERE g.title_en = ?1 AND g.platform = ?2 ORDER BY g.id LIMIT 1"
    );
    let game = conn
        .query_row(&sql, params![title_en, platform], |row| row_to_game(row, 0))
        .optional()?;
    Ok(game)
}

/// First game (lowest id) with the given native title on a platform.
pub fn find_game_by_native_title(
    conn: &Connection,
    title_ja: &str,
    platform: &str,
) -> Result<Option<GameRecord>, OperationError> {
    let sql = format!(
        "SELECT {GAME_COLUMNS} FROM games g WHERE g.title_ja = ?1 AND g.platform = ?2 ORDER BY g.id LIMIT 1"
    );
    let game = conn
        .query_row(&sql, params![title_ja, platform], |row| row_to_game(row, 0))
        .optional()?;
    Ok(game)
}

/// Overwrite every descriptive column of a game.
///
/// Callers merge first (see `GameMetadata::fill_missing`); this just persists.
pub fn update_game_metadata(
    conn: &Connection,
    id: i64,
    meta: &GameMetadata,
) -> Result<(), OperationError> {
    let changed = conn.execute(
        "UPDATE games SET
             title_en = ?2, title_ja = ?3, description_ja = ?4, developer = ?5,
             publisher = ?6, release_date = ?7, genre = ?8, players = ?9, rating = ?10,
             updated_at = datetime('now')
         WHERE id = ?1",
        params![
            id,
            meta.title_en,
            meta.title_ja,
            meta.description_ja,
            meta.developer,
            meta.publisher,
            meta.release_date,
            meta.genre,
            meta.players,
            meta.rating,
        ],
    )?;
    if changed == 0 {
        return Err(OperationError::not_found("game", id));
    }
    Ok(())
}
