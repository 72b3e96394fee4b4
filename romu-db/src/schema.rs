//! SQLite schema creation and migration.

use rusqlite::Connection;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Migration error: expected version {expected}, found {found}")]
    VersionMismatch { expected: i32, found: i32 },
}

/// Current schema version. Increment when adding migrations.
pub const CURRENT_VERSION: i32 = 2;

/// Create all tables and indexes if they don't exist.
///
/// This is idempotent and safe to call on an existing database.
pub fn create_schema(conn: &Connection) -> Result<(), SchemaError> {
    conn.execute_batch(SCHEMA_SQL)?;
    set_schema_version(conn, CURRENT_VERSION)?;
    Ok(())
}

/// Open or create a catalog database at the given path, creating parent
/// directories as needed.
pub fn open_database(path: &std::path::Path) -> Result<Connection, SchemaError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let conn = Connection::open(path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;

    let version = get_schema_version(&conn)?;
    if version == 0 {
        create_schema(&conn)?;
    } else if version != CURRENT_VERSION {
        migrate(&conn, version)?;
    }

    log::debug!("Opened catalog {} (schema v{})", path.display(), CURRENT_VERSION);
    Ok(conn)
}

/// Open an in-memory database with the full schema. Useful for testing.
pub fn open_memory() -> Result<Connection, SchemaError> {
    let conn = Connection::open_in_memory()?;
    conn.execute_batch("PRAGMA foreign_keys=ON;")?;
    create_schema(&conn)?;
    Ok(conn)
}

/// Get the current schema version, or 0 if no schema exists.
pub fn get_schema_version(conn: &Connection) -> Result<i32, SchemaError> {
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
        [],
        |row| row.get(0),
    )?;

    if !exists {
        return Ok(0);
    }

    let version: i32 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )?;
    Ok(version)
}

/// Record a schema version.
fn set_schema_version(conn: &Connection, version: i32) -> Result<(), SchemaError> {
    conn.execute(
        "INSERT INTO schema_version (version) VALUES (?1)",
        [version],
    )?;
    Ok(())
}

/// Run migrations from `from_version` up to `CURRENT_VERSION`.
fn migrate(conn: &Connection, from_version: i32) -> Result<(), SchemaError> {
    if from_version > CURRENT_VERSION {
        return Err(SchemaError::VersionMismatch {
            expected: CURRENT_VERSION,
            found: from_version,
        });
    }

    let mut version = from_version;
    while version < CURRENT_VERSION {
        if version == 1 {
            // v1 catalogs predate player counts and ratings.
            conn.execute_batch(
                "ALTER TABLE games ADD COLUMN players TEXT;
                 ALTER TABLE games ADD COLUMN rating TEXT;",
            )?;
        }
        version += 1;
        set_schema_version(conn, version)?;
        log::info!("Migrated catalog schema to v{}", version);
    }

    Ok(())
}

const SCHEMA_SQL: &str = r#"
-- Schema version tracking
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER NOT NULL,
    applied_at TEXT NOT NULL DEFAULT (datetime('now'))
);

-- Canonical game identities
CREATE TABLE IF NOT EXISTS games (
    id INTEGER PRIMARY KEY,
    title_en TEXT,
    title_ja TEXT,
    description_ja TEXT,
    platform TEXT NOT NULL,
    developer TEXT,
    publisher TEXT,
    release_date TEXT,
    genre TEXT,
    players TEXT,
    rating TEXT,
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);
CREATE INDEX IF NOT EXISTS idx_games_platform ON games(platform);
CREATE INDEX IF NOT EXISTS idx_games_title_en ON games(title_en, platform);
CREATE INDEX IF NOT EXISTS idx_games_title_ja ON games(title_ja, platform);

-- Scanned files; `entry` is the inner name for container entries
CREATE TABLE IF NOT EXISTS rom_files (
    id INTEGER PRIMARY KEY,
    path TEXT NOT NULL,
    entry TEXT NOT NULL DEFAULT '',
    filename TEXT NOT NULL,
    size INTEGER NOT NULL DEFAULT 0,
    crc32 TEXT NOT NULL DEFAULT '',
    md5 TEXT NOT NULL DEFAULT '',
    sha1 TEXT NOT NULL DEFAULT '',
    platform TEXT NOT NULL,
    game_id INTEGER REFERENCES games(id),
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now')),
    UNIQUE (path, entry)
);
CREATE INDEX IF NOT EXISTS idx_rom_files_crc32 ON rom_files(crc32);
CREATE INDEX IF NOT EXISTS idx_rom_files_md5 ON rom_files(md5);
CREATE INDEX IF NOT EXISTS idx_rom_files_sha1 ON rom_files(sha1);
CREATE INDEX IF NOT EXISTS idx_rom_files_platform ON rom_files(platform, filename);
CREATE INDEX IF NOT EXISTS idx_rom_files_game ON rom_files(game_id);

-- Cover art references
CREATE TABLE IF NOT EXISTS cover_arts (
    id INTEGER PRIMARY KEY,
    game_id INTEGER NOT NULL REFERENCES games(id),
    image_type TEXT NOT NULL,
    file_path TEXT NOT NULL,
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
);
"#;
