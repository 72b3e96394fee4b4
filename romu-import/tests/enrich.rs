use romu_catalog::{FileRecord, GameMetadata, GameRecord};
use romu_core::{Fingerprint, Platform};
use romu_dat::GameDb;
use romu_db::*;
use romu_import::*;

fn add_file(conn: &rusqlite::Connection, platform: Platform, path: &str, entry: Option<&str>, name: &str) -> i64 {
    let fp = Fingerprint {
        crc32: "00000000".into(),
        md5: String::new(),
        sha1: String::new(),
        size: 1,
    };
    upsert_file(conn, &FileRecord::scanned(path, entry, name, platform, &fp)).unwrap()
}

fn add_titled_game(conn: &rusqlite::Connection, platform: Platform, meta: GameMetadata, file: i64) -> i64 {
    let id = insert_game(conn, &GameRecord::new(platform, meta)).unwrap();
    link_file(conn, file, id).unwrap();
    id
}

fn en(title: &str) -> GameMetadata {
    GameMetadata {
        title_en: Some(title.into()),
        ..Default::default()
    }
}

#[test]
fn titled_games_gain_reference_fields() {
    let conn = open_memory().unwrap();
    let db = GameDb::builtin().unwrap();
    let file = add_file(&conn, Platform::Famicom, "/r/fc/smb.nes", None, "smb.nes");
    let mut meta = en("Super Mario Bros. (World)");
    meta.genre = Some("Action".into());
    let id = add_titled_game(&conn, Platform::Famicom, meta, file);

    let stats = enrich(&conn, &db, None).unwrap();
    assert_eq!(stats.enriched, 1);
    assert_eq!(stats.skipped, 0);

    let game = get_game(&conn, id).unwrap().unwrap();
    assert_eq!(game.meta.title_ja.as_deref(), Some("スーパーマリオブラザーズ"));
    assert_eq!(game.meta.developer.as_deref(), Some("Nintendo"));
    assert_eq!(game.meta.release_date.as_deref(), Some("1985-09-13"));
    assert_eq!(game.meta.genre.as_deref(), Some("Action"));
}

#[test]
fn unknown_titles_are_reported_per_platform() {
    let conn = open_memory().unwrap();
    let db = GameDb::builtin().unwrap();
    let a = add_file(&conn, Platform::Famicom, "/r/fc/a.nes", None, "a.nes");
    let b = add_file(&conn, Platform::Msx, "/r/msx/b.rom", None, "b.rom");
    add_titled_game(&conn, Platform::Famicom, en("Unlisted Game (Japan)"), a);
    add_titled_game(&conn, Platform::Msx, en("Metal Gear (Japan)"), b);

    let stats = enrich(&conn, &db, None).unwrap();
    assert_eq!(stats.enriched, 0);
    assert_eq!(stats.skipped, 2);
    assert_eq!(stats.skipped_titles["FC"], vec!["Unlisted Game (Japan)"]);
    assert_eq!(stats.skipped_titles["MSX"], vec!["Metal Gear (Japan)"]);
}

#[test]
fn unlinked_files_resolve_by_name() {
    let conn = open_memory().unwrap();
    let db = GameDb::builtin().unwrap();
    let plain = add_file(&conn, Platform::Famicom, "/r/fc/Contra (USA).nes", None, "Contra (USA).nes");
    let zipped = add_file(
        &conn,
        Platform::Famicom,
        "/r/fc/Mega Man (USA).zip",
        Some("rockman.nes"),
        "Mega Man (USA).zip/rockman.nes",
    );
    let miss = add_file(&conn, Platform::Famicom, "/r/fc/homebrew.nes", None, "homebrew.nes");

    let stats = enrich(&conn, &db, None).unwrap();
    assert_eq!(stats.unmatched_before, 3);
    assert_eq!(stats.filename_enriched, 2);
    assert_eq!(stats.filename_skipped, 1);
    assert_eq!(stats.skipped_titles["FC"], vec!["homebrew"]);

    let contra_id = get_file(&conn, plain).unwrap().unwrap().game_id.unwrap();
    let contra = get_game(&conn, contra_id).unwrap().unwrap();
    assert_eq!(contra.meta.title_en.as_deref(), Some("Contra (USA)"));
    assert_eq!(contra.meta.title_ja.as_deref(), Some("魂斗羅"));

    let rockman_id = get_file(&conn, zipped).unwrap().unwrap().game_id.unwrap();
    let rockman = get_game(&conn, rockman_id).unwrap().unwrap();
    assert_eq!(rockman.meta.title_en.as_deref(), Some("Mega Man (USA)"));
    assert_eq!(rockman.meta.developer.as_deref(), Some("Capcom"));

    assert_eq!(get_file(&conn, miss).unwrap().unwrap().game_id, None);
    assert_eq!(count_unmatched_files(&conn, None).unwrap(), 1);
}

#[test]
fn filename_hit_reuses_existing_game() {
    let conn = open_memory().unwrap();
    let db = GameDb::builtin().unwrap();
    let existing = insert_game(&conn, &GameRecord::new(Platform::Famicom, en("Contra (USA)"))).unwrap();
    let file = add_file(&conn, Platform::Famicom, "/r/fc/Contra (USA).nes", None, "Contra (USA).nes");

    enrich(&conn, &db, None).unwrap();
    assert_eq!(get_file(&conn, file).unwrap().unwrap().game_id, Some(existing));
    let games: i64 = conn.query_row("SELECT COUNT(*) FROM games", [], |r| r.get(0)).unwrap();
    assert_eq!(games, 1);
}

#[test]
fn platform_filter_limits_the_pass() {
    let conn = open_memory().unwrap();
    let db = GameDb::builtin().unwrap();
    add_file(&conn, Platform::Famicom, "/r/fc/Contra (USA).nes", None, "Contra (USA).nes");
    let gb = add_file(&conn, Platform::GameBoy, "/r/gb/Tetris (World) (Rev 1).gb", None, "Tetris (World) (Rev 1).gb");

    let stats = enrich(&conn, &db, Some(Platform::Famicom)).unwrap();
    assert_eq!(stats.unmatched_before, 1);
    assert_eq!(stats.filename_enriched, 1);
    assert_eq!(get_file(&conn, gb).unwrap().unwrap().game_id, None);
}

#[test]
fn enrich_twice_changes_nothing_more() {
    let conn = open_memory().unwrap();
    let db = GameDb::builtin().unwrap();
    add_file(&conn, Platform::Famicom, "/r/fc/Contra (USA).nes", None, "Contra (USA).nes");

    enrich(&conn, &db, None).unwrap();
    let second = enrich(&conn, &db, None).unwrap();
    assert_eq!(second.unmatched_before, 0);
    assert_eq!(second.filename_enriched, 0);
    assert_eq!(second.enriched, 1);
    let games: i64 = conn.query_row("SELECT COUNT(*) FROM games", [], |r| r.get(0)).unwrap();
    assert_eq!(games, 1);
}
