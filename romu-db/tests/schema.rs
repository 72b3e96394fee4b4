use romu_db::open_memory;
use romu_db::schema::{CURRENT_VERSION, create_schema, get_schema_version, open_database};

#[test]
fn create_schema_in_memory() {
    let conn = open_memory().unwrap();
    assert_eq!(get_schema_version(&conn).unwrap(), CURRENT_VERSION);
}

#[test]
fn schema_is_idempotent() {
    let conn = open_memory().unwrap();
    create_schema(&conn).unwrap();
}

#[test]
fn foreign_keys_enabled() {
    let conn = open_memory().unwrap();
    let fk: i32 = conn
        .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
        .unwrap();
    assert_eq!(fk, 1);
}

#[test]
fn all_tables_exist() {
    let conn = open_memory().unwrap();
    for table in ["schema_version", "games", "rom_files", "cover_arts"] {
        let exists: bool = conn
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name=?1)",
                [table],
                |row| row.get(0),
            )
            .unwrap();
        assert!(exists, "table {} should exist", table);
    }
}

#[test]
fn hash_indexes_exist() {
    let conn = open_memory().unwrap();
    for index in [
        "idx_rom_files_crc32",
        "idx_rom_files_md5",
        "idx_rom_files_sha1",
        "idx_games_platform",
    ] {
        let exists: bool = conn
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='index' AND name=?1)",
                [index],
                |row| row.get(0),
            )
            .unwrap();
        assert!(exists, "index {} should exist", index);
    }
}

#[test]
fn open_database_creates_parent_dirs() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("nested").join("romu.db");
    let conn = open_database(&path).unwrap();
    assert_eq!(get_schema_version(&conn).unwrap(), CURRENT_VERSION);
    drop(conn);

    // Reopening an existing catalog keeps the version.
    let conn = open_database(&path).unwrap();
    assert_eq!(get_schema_version(&conn).unwrap(), CURRENT_VERSION);
}

#[test]
fn migrates_v1_catalog() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("old.db");
    {
        let conn = rusqlite::Connection::open(&path).unwrap();
        conn.execute_batch(
            "CREATE TABLE schema_version (version INTEGER NOT NULL, applied_at TEXT NOT NULL DEFAULT (datetime('now')));
             INSERT INTO schema_version (version) VALUES (1);
             CREATE TABLE games (
                 id INTEGER PRIMARY KEY, title_en TEXT, title_ja TEXT, description_ja TEXT,
                 platform TEXT NOT NULL, developer TEXT, publisher TEXT, release_date TEXT, genre TEXT,
                 created_at TEXT NOT NULL DEFAULT (datetime('now')),
                 updated_at TEXT NOT NULL DEFAULT (datetime('now')));
             INSERT INTO games (title_en, platform) VALUES ('Tetris (World)', 'GB');",
        )
        .unwrap();
    }

    let conn = open_database(&path).unwrap();
    assert_eq!(get_schema_version(&conn).unwrap(), CURRENT_VERSION);
    let game = romu_db::get_game(&conn, 1).unwrap().unwrap();
    assert_eq!(game.meta.title_en.as_deref(), Some("Tetris (World)"));
    assert_eq!(game.meta.players, None);
    assert_eq!(game.meta.rating, None);
}

#[test]
fn newer_catalog_is_rejected() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("future.db");
    {
        let conn = rusqlite::Connection::open(&path).unwrap();
        conn.execute_batch(
            "CREATE TABLE schema_version (version INTEGER NOT NULL, applied_at TEXT NOT NULL DEFAULT (datetime('now')));
             INSERT INTO schema_version (version) VALUES (99);",
        )
        .unwrap();
    }
    assert!(matches!(
        open_database(&path),
        Err(romu_db::SchemaError::VersionMismatch { found: 99, .. })
    ));
}
