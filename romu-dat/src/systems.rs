use romu_core::Platform;

/// Maps a substring of a checksum database's header title to a platform.
pub struct HeaderPattern {
    pub needle: &'static str,
    pub platform: Platform,
}

/// Header patterns in evaluation order.
///
/// More specific names come before the names they contain ("game boy
/// advance" before "game boy"), so the first hit is the right one.
pub static HEADER_PATTERNS: &[HeaderPattern] = &[
    HeaderPattern {
        needle: "game boy advance",
        platform: Platform::GameBoyAdvance,
    },
    HeaderPattern {
        needle: "game boy color",
        platform: Platform::GameBoyColor,
    },
    HeaderPattern {
        needle: "game boy",
        platform: Platform::GameBoy,
    },
    HeaderPattern {
        needle: "wonderswan color",
        platform: Platform::WonderSwanColor,
    },
    HeaderPattern {
        needle: "wonderswan",
        platform: Platform::WonderSwan,
    },
    HeaderPattern {
        needle: "super nintendo",
        platform: Platform::SuperFamicom,
    },
    HeaderPattern {
        needle: "super famicom",
        platform: Platform::SuperFamicom,
    },
    HeaderPattern {
        needle: "nintendo entertainment system",
        platform: Platform::Famicom,
    },
    HeaderPattern {
        needle: "famicom",
        platform: Platform::Famicom,
    },
    HeaderPattern {
        needle: "mega drive",
        platform: Platform::MegaDrive,
    },
    HeaderPattern {
        needle: "genesis",
        platform: Platform::MegaDrive,
    },
    HeaderPattern {
        needle: "nintendo 64",
        platform: Platform::N64,
    },
    HeaderPattern {
        needle: "nintendo ds",
        platform: Platform::Ds,
    },
    HeaderPattern {
        needle: "pc engine",
        platform: Platform::PcEngine,
    },
    HeaderPattern {
        needle: "turbografx",
        platform: Platform::PcEngine,
    },
    HeaderPattern {
        needle: "game gear",
        platform: Platform::GameGear,
    },
    HeaderPattern {
        needle: "master system",
        platform: Platform::MasterSystem,
    },
    HeaderPattern {
        needle: "neo geo pocket",
        platform: Platform::NeoGeoPocket,
    },
    HeaderPattern {
        needle: "playstation",
        platform: Platform::Ps1,
    },
];

/// Infer the platform from a checksum database's header title (case-insensitive).
pub fn platform_from_header(title: &str) -> Option<Platform> {
    let lower = title.to_lowercase();
    HEADER_PATTERNS
        .iter()
        .find(|p| lower.contains(p.needle))
        .map(|p| p.platform)
}
