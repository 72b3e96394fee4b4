use serde::{Deserialize, Serialize};

/// Platform/console identifiers known to the catalog.
///
/// Every platform carries a short uppercase code (persisted in the catalog),
/// the folder names that identify it inside a ROM tree, the file extensions
/// accepted as payload, and its container policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Platform {
    // Nintendo
    Famicom,
    SuperFamicom,
    GameBoy,
    GameBoyColor,
    GameBoyAdvance,
    N64,
    Ds,

    // Sega
    MegaDrive,
    MasterSystem,
    GameGear,
    Saturn,

    // Sony
    Ps1,
    Ps2,

    // NEC
    PcEngine,
    PcFx,

    // Bandai
    WonderSwan,
    WonderSwanColor,

    // SNK
    NeoGeo,
    NeoGeoPocket,

    // Other
    Msx,
    Pico8,
    Arcade,
    Ports,
}

/// All platform variants in registration order.
const ALL_PLATFORMS: &[Platform] = &[
    Platform::Famicom,
    Platform::SuperFamicom,
    Platform::GameBoy,
    Platform::GameBoyColor,
    Platform::GameBoyAdvance,
    Platform::N64,
    Platform::Ds,
    Platform::MegaDrive,
    Platform::MasterSystem,
    Platform::GameGear,
    Platform::Saturn,
    Platform::Ps1,
    Platform::Ps2,
    Platform::PcEngine,
    Platform::PcFx,
    Platform::WonderSwan,
    Platform::WonderSwanColor,
    Platform::NeoGeo,
    Platform::NeoGeoPocket,
    Platform::Msx,
    Platform::Pico8,
    Platform::Arcade,
    Platform::Ports,
];

impl Platform {
    /// Short uppercase code stored in the catalog (e.g. "FC", "GBA").
    pub fn code(&self) -> &'static str {
        match self {
            Self::Famicom => "FC",
            Self::SuperFamicom => "SFC",
            Self::GameBoy => "GB",
            Self::GameBoyColor => "GBC",
            Self::GameBoyAdvance => "GBA",
            Self::N64 => "N64",
            Self::Ds => "NDS",
            Self::MegaDrive => "MD",
            Self::MasterSystem => "SMS",
            Self::GameGear => "GG",
            Self::Saturn => "SS",
            Self::Ps1 => "PS1",
            Self::Ps2 => "PS2",
            Self::PcEngine => "PCE",
            Self::PcFx => "PCFX",
            Self::WonderSwan => "WS",
            Self::WonderSwanColor => "WSC",
            Self::NeoGeo => "NEOGEO",
            Self::NeoGeoPocket => "NGP",
            Self::Msx => "MSX",
            Self::Pico8 => "PICO8",
            Self::Arcade => "ARCADE",
            Self::Ports => "PORTS",
        }
    }

    /// Full display name for the platform.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Famicom => "Nintendo Entertainment System / Famicom",
            Self::SuperFamicom => "Super Nintendo / Super Famicom",
            Self::GameBoy => "Game Boy",
            Self::GameBoyColor => "Game Boy Color",
            Self::GameBoyAdvance => "Game Boy Advance",
            Self::N64 => "Nintendo 64",
            Self::Ds => "Nintendo DS",
            Self::MegaDrive => "Sega Mega Drive / Genesis",
            Self::MasterSystem => "Sega Master System",
            Self::GameGear => "Sega Game Gear",
            Self::Saturn => "Sega Saturn",
            Self::Ps1 => "Sony PlayStation",
            Self::Ps2 => "Sony PlayStation 2",
            Self::PcEngine => "PC Engine / TurboGrafx-16",
            Self::PcFx => "NEC PC-FX",
            Self::WonderSwan => "Bandai WonderSwan",
            Self::WonderSwanColor => "Bandai WonderSwan Color",
            Self::NeoGeo => "SNK Neo Geo",
            Self::NeoGeoPocket => "SNK Neo Geo Pocket",
            Self::Msx => "MSX",
            Self::Pico8 => "PICO-8",
            Self::Arcade => "Arcade",
            Self::Ports => "Ports",
        }
    }

    /// Folder names that identify this platform in a ROM tree (lowercase,
    /// matched case-insensitively).
    pub fn folder_names(&self) -> &'static [&'static str] {
        match self {
            Self::Famicom => &["fc", "nes"],
            Self::SuperFamicom => &["sfc", "snes"],
            Self::GameBoy => &["gb"],
            Self::GameBoyColor => &["gbc"],
            Self::GameBoyAdvance => &["gba"],
            Self::N64 => &["n64"],
            Self::Ds => &["nds"],
            Self::MegaDrive => &["md", "genesis", "megadrive"],
            Self::MasterSystem => &["sms"],
            Self::GameGear => &["gg"],
            Self::Saturn => &["segasaturn"],
            Self::Ps1 => &["ps1", "psx"],
            Self::Ps2 => &["ps2"],
            Self::PcEngine => &["pce", "pcengine", "pcenginecd"],
            Self::PcFx => &["pcfx"],
            Self::WonderSwan => &["ws", "wonderswan"],
            Self::WonderSwanColor => &["wsc", "wonderswancolor"],
            Self::NeoGeo => &["neogeo"],
            Self::NeoGeoPocket => &["ngp"],
            Self::Msx => &["msx"],
            Self::Pico8 => &["pico8"],
            Self::Arcade => &["arcade"],
            Self::Ports => &["ports"],
        }
    }

    /// Accepted payload extensions (lowercase, with leading dot).
    ///
    /// An empty list means any extension is accepted.
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Self::Famicom => &[".nes"],
            Self::SuperFamicom => &[".sfc", ".smc"],
            Self::GameBoy => &[".gb"],
            Self::GameBoyColor => &[".gbc"],
            Self::GameBoyAdvance => &[".gba"],
            Self::N64 => &[".n64", ".z64", ".v64"],
            Self::Ds => &[".nds"],
            Self::MegaDrive => &[".md", ".bin", ".gen"],
            Self::MasterSystem => &[".sms"],
            Self::GameGear => &[".gg"],
            Self::Ps1 => &[".bin", ".cue", ".img", ".iso"],
            Self::Saturn | Self::Ps2 | Self::PcFx => &[".iso", ".bin", ".cue"],
            Self::PcEngine => &[".pce"],
            Self::WonderSwan => &[".ws"],
            Self::WonderSwanColor => &[".wsc"],
            Self::NeoGeo | Self::Arcade => &[".zip"],
            Self::NeoGeoPocket => &[".ngp"],
            Self::Msx => &[".rom"],
            Self::Pico8 => &[".p8", ".png"],
            Self::Ports => &[],
        }
    }

    /// Whether a file name carries an extension this platform accepts.
    ///
    /// Comparison is case-insensitive. Platforms without an allow-list
    /// accept everything.
    pub fn accepts_file_name(&self, name: &str) -> bool {
        let allowed = self.extensions();
        if allowed.is_empty() {
            return true;
        }
        match extension_of(name) {
            Some(ext) => allowed.iter().any(|a| a.eq_ignore_ascii_case(&ext)),
            None => false,
        }
    }

    /// Whether a zip container is itself the unit of identification.
    ///
    /// Arcade-style sets are hashed as a whole; on every other platform a
    /// zip is a carrier whose entries are cataloged individually.
    pub fn container_is_unit(&self) -> bool {
        matches!(self, Self::NeoGeo | Self::Arcade)
    }

    /// Resolve a single folder name (case-insensitive).
    pub fn from_folder_name(name: &str) -> Option<Platform> {
        let lower = name.to_lowercase();
        ALL_PLATFORMS
            .iter()
            .copied()
            .find(|p| p.folder_names().contains(&lower.as_str()))
    }

    /// All platform variants.
    pub fn all() -> &'static [Platform] {
        ALL_PLATFORMS
    }
}

/// Lowercase extension of a file name including the leading dot.
fn extension_of(name: &str) -> Option<String> {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    base.rfind('.')
        .filter(|&idx| idx + 1 < base.len())
        .map(|idx| base[idx..].to_lowercase())
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Error returned when a string cannot be parsed into a `Platform`.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown platform: '{0}'")]
pub struct PlatformParseError(pub String);

impl std::str::FromStr for Platform {
    type Err = PlatformParseError;

    /// Parse a platform from its code or any folder name (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        for &platform in ALL_PLATFORMS {
            if platform.code().eq_ignore_ascii_case(trimmed) {
                return Ok(platform);
            }
        }
        Platform::from_folder_name(trimmed).ok_or_else(|| PlatformParseError(s.to_string()))
    }
}

impl TryFrom<String> for Platform {
    type Error = PlatformParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Platform> for String {
    fn from(platform: Platform) -> Self {
        platform.code().to_string()
    }
}

#[cfg(test)]
#[path = "tests/platform_tests.rs"]
mod tests;
