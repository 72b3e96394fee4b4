//! A failure part-way through a batch leaves the catalog as it was.

use romu_catalog::{ChecksumRecord, ChecksumSet, FileRecord, GameMetadata, GameRecord, MetadataEntry};
use romu_core::{Fingerprint, Platform};
use romu_dat::GameDb;
use romu_db::*;
use romu_import::*;
use rusqlite::Connection;

fn add_file(conn: &Connection, platform: Platform, name: &str, sha1: &str) -> i64 {
    let fp = Fingerprint {
        crc32: "00000000".into(),
        md5: String::new(),
        sha1: sha1.into(),
        size: 1,
    };
    let path = format!("/roms/{}/{name}", platform.code().to_lowercase());
    upsert_file(conn, &FileRecord::scanned(path.as_str(), None, name, platform, &fp)).unwrap()
}

/// Refuse to link the file with the given display name.
fn refuse_link(conn: &Connection, filename: &str) {
    conn.execute_batch(&format!(
        "CREATE TRIGGER refuse_link BEFORE UPDATE OF game_id ON rom_files
         WHEN NEW.filename = '{filename}'
         BEGIN SELECT RAISE(ABORT, 'link refused'); END;"
    ))
    .unwrap();
}

fn game_count(conn: &Connection) -> i64 {
    conn.query_row("SELECT COUNT(*) FROM games", [], |r| r.get(0)).unwrap()
}

fn linked_count(conn: &Connection) -> i64 {
    conn.query_row("SELECT COUNT(*) FROM rom_files WHERE game_id IS NOT NULL", [], |r| r.get(0))
        .unwrap()
}

fn sha1_record(title: &str, sha1: &str) -> ChecksumRecord {
    ChecksumRecord {
        game_title: title.to_string(),
        platform: Platform::GameBoy,
        crc32: String::new(),
        md5: String::new(),
        sha1: sha1.to_string(),
        size: 0,
    }
}

const SHA_A: &str = "1111111111111111111111111111111111111111";
const SHA_B: &str = "2222222222222222222222222222222222222222";

#[test]
fn failed_hash_match_rolls_back_whole_batch() {
    let conn = open_memory().unwrap();
    let kept_file = add_file(&conn, Platform::GameBoy, "kept.gb", "");
    let kept_game =
        insert_game(&conn, &GameRecord::new(Platform::GameBoy, GameMetadata::default())).unwrap();
    link_file(&conn, kept_file, kept_game).unwrap();

    add_file(&conn, Platform::GameBoy, "a.gb", SHA_A);
    add_file(&conn, Platform::GameBoy, "b.gb", SHA_B);
    refuse_link(&conn, "b.gb");

    let set = ChecksumSet {
        source: "Nintendo - Game Boy".into(),
        platform: Platform::GameBoy,
        records: vec![sha1_record("Alpha (World)", SHA_A), sha1_record("Beta (World)", SHA_B)],
    };
    assert!(match_checksums(&conn, &set, None).is_err());

    assert_eq!(game_count(&conn), 1);
    assert_eq!(linked_count(&conn), 1);
    assert!(find_game_by_title(&conn, "Alpha (World)", "GB").unwrap().is_none());
}

#[test]
fn failed_metadata_match_rolls_back_whole_batch() {
    let conn = open_memory().unwrap();
    add_file(&conn, Platform::Arcade, "1944j.zip", "");
    add_file(&conn, Platform::Arcade, "kof98.zip", "");
    refuse_link(&conn, "kof98.zip");

    let entries: Vec<MetadataEntry> = [("1944j.zip", "1944 ザ・ループマスター"), ("kof98.zip", "KOF'98")]
        .into_iter()
        .map(|(filename, name)| MetadataEntry {
            path: format!("./{filename}"),
            filename: filename.to_string(),
            name: Some(name.to_string()),
            developer: Some("Capcom".into()),
            ..Default::default()
        })
        .collect();

    assert!(match_metadata_list(&conn, &entries, Platform::Arcade).is_err());
    assert_eq!(game_count(&conn), 0);
    assert_eq!(linked_count(&conn), 0);
}

#[test]
fn failed_title_import_creates_no_games() {
    let conn = open_memory().unwrap();
    conn.execute_batch(
        "CREATE TRIGGER refuse_game BEFORE INSERT ON games
         WHEN NEW.title_en = 'Beta (World)'
         BEGIN SELECT RAISE(ABORT, 'game refused'); END;",
    )
    .unwrap();

    let set = ChecksumSet {
        source: "Nintendo - Game Boy".into(),
        platform: Platform::GameBoy,
        records: vec![sha1_record("Alpha (World)", SHA_A), sha1_record("Beta (World)", SHA_B)],
    };
    assert!(import_checksums(&conn, &set, None).is_err());
    assert_eq!(game_count(&conn), 0);
}

#[test]
fn failed_enrichment_rolls_back_earlier_links() {
    let conn = open_memory().unwrap();
    let db = GameDb::builtin().unwrap();
    add_file(&conn, Platform::Famicom, "Contra (USA).nes", "");
    add_file(&conn, Platform::Famicom, "Mega Man (USA).nes", "");
    refuse_link(&conn, "Mega Man (USA).nes");

    assert!(enrich(&conn, &db, None).is_err());
    assert_eq!(game_count(&conn), 0);
    assert_eq!(linked_count(&conn), 0);
}

#[test]
fn batch_after_failure_still_succeeds() {
    let conn = open_memory().unwrap();
    add_file(&conn, Platform::GameBoy, "a.gb", SHA_A);
    add_file(&conn, Platform::GameBoy, "b.gb", SHA_B);
    refuse_link(&conn, "b.gb");

    let set = ChecksumSet {
        source: "Nintendo - Game Boy".into(),
        platform: Platform::GameBoy,
        records: vec![sha1_record("Alpha (World)", SHA_A), sha1_record("Beta (World)", SHA_B)],
    };
    assert!(match_checksums(&conn, &set, None).is_err());

    conn.execute_batch("DROP TRIGGER refuse_link;").unwrap();
    let stats = match_checksums(&conn, &set, None).unwrap();
    assert_eq!(stats.matched, 2);
    assert_eq!(game_count(&conn), 2);
    assert_eq!(linked_count(&conn), 2);
}
