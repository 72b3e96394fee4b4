use romu_catalog::{FileRecord, GameMetadata, GameRecord, MetadataEntry};
use romu_core::{Fingerprint, Platform};
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

fn entry(filename: &str, name: &str) -> MetadataEntry {
    MetadataEntry {
        path: format!("./{filename}"),
        filename: filename.to_string(),
        name: Some(name.to_string()),
        ..Default::default()
    }
}

fn game_of(conn: &rusqlite::Connection, file_id: i64) -> GameRecord {
    let game_id = get_file(conn, file_id).unwrap().unwrap().game_id.unwrap();
    get_game(conn, game_id).unwrap().unwrap()
}

#[test]
fn filename_patterns_link_files() {
    let conn = open_memory().unwrap();
    let exact = add_file(&conn, Platform::Arcade, "/r/arcade/1944j.zip", None, "1944j.zip");
    let nested = add_file(&conn, Platform::Arcade, "/r/arcade/x.zip", Some("1944j.zip"), "x.zip/1944j.zip");
    let inner = add_file(&conn, Platform::Arcade, "/r/arcade/1944j.zip", Some("rom.bin"), "1944j.zip/rom.bin");
    let other = add_file(&conn, Platform::Arcade, "/r/arcade/1944.zip", None, "1944.zip");
    let elsewhere = add_file(&conn, Platform::NeoGeo, "/r/neogeo/1944j.zip", None, "1944j.zip");

    let mut e = entry("1944j.zip", "1944 ザ・ループマスター");
    e.developer = Some("Capcom".into());
    let (created, matched) = match_metadata_list(&conn, &[e], Platform::Arcade).unwrap();
    assert_eq!((created, matched), (1, 3));

    let game = game_of(&conn, exact);
    assert_eq!(game.platform, "ARCADE");
    assert_eq!(game.meta.title_ja.as_deref(), Some("1944 ザ・ループマスター"));
    assert_eq!(game.meta.title_en, None);
    assert_eq!(game.meta.developer.as_deref(), Some("Capcom"));
    assert_eq!(game_of(&conn, nested).id, game.id);
    assert_eq!(game_of(&conn, inner).id, game.id);
    assert_eq!(get_file(&conn, other).unwrap().unwrap().game_id, None);
    assert_eq!(get_file(&conn, elsewhere).unwrap().unwrap().game_id, None);
}

#[test]
fn entries_without_files_create_nothing() {
    let conn = open_memory().unwrap();
    let (created, matched) =
        match_metadata_list(&conn, &[entry("ghost.zip", "幽霊")], Platform::Arcade).unwrap();
    assert_eq!((created, matched), (0, 0));
    let games: i64 = conn.query_row("SELECT COUNT(*) FROM games", [], |r| r.get(0)).unwrap();
    assert_eq!(games, 0);
}

#[test]
fn existing_game_only_gains_missing_fields() {
    let conn = open_memory().unwrap();
    let file = add_file(&conn, Platform::Famicom, "/r/fc/smb.nes", None, "smb.nes");
    let id = insert_game(
        &conn,
        &GameRecord::new(
            Platform::Famicom,
            GameMetadata {
                title_ja: Some("スーパーマリオブラザーズ".into()),
                developer: Some("Nintendo R&D4".into()),
                ..Default::default()
            },
        ),
    )
    .unwrap();

    let mut e = entry("smb.nes", "スーパーマリオブラザーズ");
    e.developer = Some("Nintendo".into());
    e.genre = Some("Platform".into());
    let (created, matched) = match_metadata_list(&conn, &[e.clone()], Platform::Famicom).unwrap();
    assert_eq!((created, matched), (0, 1));

    let game = game_of(&conn, file);
    assert_eq!(game.id, id);
    assert_eq!(game.meta.developer.as_deref(), Some("Nintendo R&D4"));
    assert_eq!(game.meta.genre.as_deref(), Some("Platform"));

    let again = match_metadata_list(&conn, &[e], Platform::Famicom).unwrap();
    assert_eq!(again, (0, 1));
}

#[test]
fn metadata_match_replaces_existing_link() {
    let conn = open_memory().unwrap();
    let file = add_file(&conn, Platform::GameBoy, "/r/gb/t.gb", None, "t.gb");
    let hashed = insert_game(
        &conn,
        &GameRecord::new(
            Platform::GameBoy,
            GameMetadata {
                title_en: Some("Wrong Guess".into()),
                ..Default::default()
            },
        ),
    )
    .unwrap();
    link_file(&conn, file, hashed).unwrap();

    match_metadata_list(&conn, &[entry("t.gb", "テトリス")], Platform::GameBoy).unwrap();
    let game = game_of(&conn, file);
    assert_ne!(game.id, hashed);
    assert_eq!(game.meta.title_ja.as_deref(), Some("テトリス"));
}

#[test]
fn import_gamelists_walks_platform_folders() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    std::fs::create_dir_all(root.join("arcade")).unwrap();
    std::fs::create_dir_all(root.join("gb")).unwrap();
    std::fs::create_dir_all(root.join("misc")).unwrap();
    std::fs::write(
        root.join("arcade/gamelist.xml"),
        "<gameList><game><path>./1944j.zip</path><name>1944</name></game></gameList>",
    )
    .unwrap();
    std::fs::write(root.join("gb/gamelist.xml"), "<gameList><game><path>x</game></gameList>").unwrap();
    std::fs::write(
        root.join("misc/gamelist.xml"),
        "<gameList><game><path>./x.zip</path><name>X</name></game></gameList>",
    )
    .unwrap();

    let conn = open_memory().unwrap();
    let file = add_file(&conn, Platform::Arcade, "/r/arcade/1944j.zip", None, "1944j.zip");

    let stats = import_gamelists(&conn, root).unwrap();
    assert_eq!(stats.lists, 1);
    assert_eq!(stats.lists_skipped, 2);
    assert_eq!(stats.games_created, 1);
    assert_eq!(stats.files_matched, 1);
    assert_eq!(game_of(&conn, file).meta.title_ja.as_deref(), Some("1944"));
}

#[test]
fn import_gamelists_requires_directory() {
    let conn = open_memory().unwrap();
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        import_gamelists(&conn, &dir.path().join("nope")),
        Err(ImportError::NotADirectory(_))
    ));
}

#[test]
fn export_reproduces_imported_fields() {
    let conn = open_memory().unwrap();
    add_file(&conn, Platform::Arcade, "/r/arcade/1944j.zip", None, "1944j.zip");
    add_file(&conn, Platform::Arcade, "/r/arcade/kof98.zip", None, "kof98.zip");

    let list = r#"<?xml version="1.0"?>
<gameList>
  <game>
    <path>./1944j.zip</path>
    <name>1944 ザ・ループマスター</name>
    <desc>縦スクロールシューティング &amp; more</desc>
    <releasedate>20000601T000000</releasedate>
    <developer>Capcom</developer>
    <publisher>Capcom</publisher>
    <genre>Shooter</genre>
    <players>1-2</players>
    <rating>0.8</rating>
  </game>
  <game>
    <path>./kof98.zip</path>
    <name>ザ・キング・オブ・ファイターズ'98</name>
    <genre>Fighting</genre>
  </game>
</gameList>"#;
    let imported = romu_dat::parse_gamelist(list).unwrap();
    match_metadata_list(&conn, &imported, Platform::Arcade).unwrap();

    let out = tempfile::tempdir().unwrap();
    let stats = export_gamelists(&conn, out.path(), None).unwrap();
    assert_eq!(stats.written.len(), 1);
    let (code, path, count) = &stats.written[0];
    assert_eq!(code, "ARCADE");
    assert_eq!(*path, out.path().join("ARCADE").join("gamelist.xml"));
    assert_eq!(*count, 2);

    let exported = romu_dat::parse_gamelist_file(path).unwrap();
    assert_eq!(exported, imported);
    let text = std::fs::read_to_string(path).unwrap();
    assert!(!text.contains("<marquee>"));
    assert!(!text.contains("<developer></developer>"));
}

#[test]
fn export_collapses_container_entries() {
    let conn = open_memory().unwrap();
    add_file(&conn, Platform::Famicom, "/r/fc/pack.zip", Some("a.nes"), "pack.zip/a.nes");
    add_file(&conn, Platform::Famicom, "/r/fc/pack.zip", Some("b.nes"), "pack.zip/b.nes");
    add_file(&conn, Platform::GameBoy, "/r/gb/t.gb", None, "t.gb");

    let out = tempfile::tempdir().unwrap();
    let stats = export_gamelists(&conn, out.path(), Some(Platform::Famicom)).unwrap();
    assert_eq!(stats.written.len(), 1);

    let exported = romu_dat::parse_gamelist_file(&stats.written[0].1).unwrap();
    assert_eq!(exported.len(), 1);
    assert_eq!(exported[0].path, "./pack.zip");
    assert_eq!(exported[0].name.as_deref(), Some("pack.zip/a.nes"));
    assert!(!out.path().join("GB").exists());
}
