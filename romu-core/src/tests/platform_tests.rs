use super::*;

#[test]
fn all_has_23_variants() {
    assert_eq!(Platform::all().len(), 23);
}

#[test]
fn codes_round_trip() {
    for &platform in Platform::all() {
        let parsed: Platform = platform.code().parse().unwrap();
        assert_eq!(parsed, platform, "round-trip failed for {:?}", platform);
    }
}

#[test]
fn codes_are_unique() {
    let mut codes: Vec<&str> = Platform::all().iter().map(|p| p.code()).collect();
    codes.sort();
    codes.dedup();
    assert_eq!(codes.len(), Platform::all().len());
}

#[test]
fn folder_names_resolve_correctly() {
    let cases = [
        ("nes", Platform::Famicom),
        ("fc", Platform::Famicom),
        ("snes", Platform::SuperFamicom),
        ("genesis", Platform::MegaDrive),
        ("megadrive", Platform::MegaDrive),
        ("psx", Platform::Ps1),
        ("pcenginecd", Platform::PcEngine),
        ("wonderswancolor", Platform::WonderSwanColor),
        ("segasaturn", Platform::Saturn),
        ("neogeo", Platform::NeoGeo),
        ("arcade", Platform::Arcade),
    ];
    for (input, expected) in cases {
        assert_eq!(
            Platform::from_folder_name(input),
            Some(expected),
            "folder '{}' should resolve to {:?}",
            input,
            expected
        );
    }
}

#[test]
fn folder_names_are_case_insensitive() {
    assert_eq!(Platform::from_folder_name("GBA"), Some(Platform::GameBoyAdvance));
    assert_eq!(Platform::from_folder_name("NeoGeo"), Some(Platform::NeoGeo));
    assert_eq!(Platform::from_folder_name("SNES"), Some(Platform::SuperFamicom));
}

#[test]
fn unknown_folder_is_none() {
    assert_eq!(Platform::from_folder_name("roms"), None);
    assert_eq!(Platform::from_folder_name("saves"), None);
}

#[test]
fn unknown_string_returns_err() {
    let result: Result<Platform, _> = "commodore64".parse();
    assert!(result.is_err());
}

#[test]
fn extension_allow_list() {
    assert!(Platform::Famicom.accepts_file_name("Super Mario Bros.nes"));
    assert!(Platform::Famicom.accepts_file_name("LOUD.NES"));
    assert!(!Platform::Famicom.accepts_file_name("readme.txt"));
    assert!(!Platform::Famicom.accepts_file_name("noextension"));
    assert!(Platform::SuperFamicom.accepts_file_name("game.smc"));
    assert!(Platform::Ps1.accepts_file_name("disc/track01.bin"));
}

#[test]
fn empty_allow_list_accepts_anything() {
    assert!(Platform::Ports.extensions().is_empty());
    assert!(Platform::Ports.accepts_file_name("whatever.exe"));
    assert!(Platform::Ports.accepts_file_name("noextension"));
}

#[test]
fn container_policy() {
    assert!(Platform::NeoGeo.container_is_unit());
    assert!(Platform::Arcade.container_is_unit());
    assert!(!Platform::Famicom.container_is_unit());
    assert!(!Platform::GameBoyAdvance.container_is_unit());
}

#[test]
fn display_uses_code() {
    assert_eq!(Platform::GameBoyColor.to_string(), "GBC");
    assert_eq!(Platform::NeoGeo.to_string(), "NEOGEO");
}
