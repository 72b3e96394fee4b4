use romu_catalog::{ChecksumRecord, GameMetadata, GameRecord, HashKind, MetadataEntry, take_if_empty};
use romu_core::Platform;

fn s(v: &str) -> Option<String> {
    Some(v.to_string())
}

#[test]
fn take_fills_empty_slot() {
    let mut slot = None;
    assert!(take_if_empty(&mut slot, Some("Capcom")));
    assert_eq!(slot, s("Capcom"));
}

#[test]
fn take_treats_empty_string_as_empty() {
    let mut slot = s("");
    assert!(take_if_empty(&mut slot, Some("Capcom")));
    assert_eq!(slot, s("Capcom"));
}

#[test]
fn take_never_overwrites() {
    let mut slot = s("Nintendo");
    assert!(!take_if_empty(&mut slot, Some("Capcom")));
    assert_eq!(slot, s("Nintendo"));
}

#[test]
fn take_ignores_empty_value() {
    let mut slot = None;
    assert!(!take_if_empty(&mut slot, Some("")));
    assert!(!take_if_empty(&mut slot, None));
    assert_eq!(slot, None);
}

#[test]
fn fill_missing_counts_changed_fields() {
    let mut existing = GameMetadata {
        title_en: s("Contra"),
        developer: s("Konami"),
        ..Default::default()
    };
    let incoming = GameMetadata {
        title_en: s("Probotector"),
        developer: s("Someone Else"),
        genre: s("Shooter"),
        players: s("1-2"),
        ..Default::default()
    };
    assert_eq!(existing.fill_missing(&incoming), 2);
    assert_eq!(existing.title_en, s("Contra"));
    assert_eq!(existing.developer, s("Konami"));
    assert_eq!(existing.genre, s("Shooter"));
    assert_eq!(existing.players, s("1-2"));
}

#[test]
fn fill_missing_is_idempotent() {
    let mut existing = GameMetadata::default();
    let incoming = GameMetadata {
        title_ja: s("魂斗羅"),
        ..Default::default()
    };
    assert_eq!(existing.fill_missing(&incoming), 1);
    assert_eq!(existing.fill_missing(&incoming), 0);
}

#[test]
fn metadata_is_empty() {
    assert!(GameMetadata::default().is_empty());
    let blank = GameMetadata {
        genre: s(""),
        ..Default::default()
    };
    assert!(blank.is_empty());
    let filled = GameMetadata {
        genre: s("RPG"),
        ..Default::default()
    };
    assert!(!filled.is_empty());
}

fn checksum(crc: &str, md5: &str, sha1: &str) -> ChecksumRecord {
    ChecksumRecord {
        game_title: "Game".into(),
        platform: Platform::GameBoy,
        crc32: crc.into(),
        md5: md5.into(),
        sha1: sha1.into(),
        size: 0,
    }
}

#[test]
fn match_key_prefers_sha1_then_md5_then_crc() {
    let all = checksum("AAAAAAAA", "BB", "CC");
    assert_eq!(all.match_key(), Some((HashKind::Sha1, "CC")));
    let no_sha = checksum("AAAAAAAA", "BB", "");
    assert_eq!(no_sha.match_key(), Some((HashKind::Md5, "BB")));
    let crc_only = checksum("AAAAAAAA", "", "");
    assert_eq!(crc_only.match_key(), Some((HashKind::Crc32, "AAAAAAAA")));
    assert_eq!(checksum("", "", "").match_key(), None);
}

#[test]
fn metadata_entry_name_is_native_title() {
    let entry = MetadataEntry {
        path: "./1944j.zip".into(),
        filename: "1944j.zip".into(),
        name: s("1944 ザ・ループマスター"),
        description: s("縦スクロールシューティング"),
        developer: s("Capcom"),
        ..Default::default()
    };
    let meta = entry.to_metadata();
    assert_eq!(meta.title_en, None);
    assert_eq!(meta.title_ja, s("1944 ザ・ループマスター"));
    assert_eq!(meta.description_ja, s("縦スクロールシューティング"));
    assert_eq!(meta.developer, s("Capcom"));
}

#[test]
fn game_display_title_prefers_native_title() {
    let mut game = GameRecord::new(
        Platform::Famicom,
        GameMetadata {
            title_en: s("Contra (USA)"),
            title_ja: s("魂斗羅"),
            ..Default::default()
        },
    );
    assert_eq!(game.display_title(), Some("魂斗羅"));

    game.meta.title_ja = s("");
    assert_eq!(game.display_title(), Some("Contra (USA)"));

    game.meta.title_en = None;
    assert_eq!(game.display_title(), None);
    assert!(game.meta.is_empty());
}
