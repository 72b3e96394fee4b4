//! Static reference table used to enrich games that already carry an
//! English title.
//!
//! Tables are JSON objects keyed by English title, one per platform. A small
//! set ships with the crate; more can be loaded from a directory of
//! `<CODE>.json` files, overriding built-in entries with the same title.

use std::collections::HashMap;
use std::path::Path;

use romu_catalog::GameMetadata;
use romu_core::Platform;
use serde::Deserialize;

use crate::error::DatError;

const BUILTIN: &[(Platform, &str)] = &[
    (Platform::Famicom, include_str!("../data/FC.json")),
    (Platform::SuperFamicom, include_str!("../data/SFC.json")),
    (Platform::GameBoy, include_str!("../data/GB.json")),
    (Platform::GameBoyAdvance, include_str!("../data/GBA.json")),
    (Platform::MegaDrive, include_str!("../data/MD.json")),
];

/// Descriptive fields for one title.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GameDbEntry {
    #[serde(default)]
    pub title_ja: String,
    #[serde(default, rename = "desc_ja")]
    pub description_ja: String,
    #[serde(default)]
    pub developer: String,
    #[serde(default)]
    pub publisher: String,
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub players: String,
}

impl GameDbEntry {
    pub fn to_metadata(&self) -> GameMetadata {
        fn opt(s: &str) -> Option<String> {
            (!s.is_empty()).then(|| s.to_string())
        }
        GameMetadata {
            title_en: None,
            title_ja: opt(&self.title_ja),
            description_ja: opt(&self.description_ja),
            developer: opt(&self.developer),
            publisher: opt(&self.publisher),
            release_date: opt(&self.release_date),
            genre: opt(&self.genre),
            players: opt(&self.players),
            rating: None,
        }
    }
}

/// Platform → English title → entry.
#[derive(Debug, Clone, Default)]
pub struct GameDb {
    tables: HashMap<Platform, HashMap<String, GameDbEntry>>,
}

impl GameDb {
    pub fn empty() -> Self {
        Self::default()
    }

    /// The tables bundled with the crate.
    pub fn builtin() -> Result<Self, DatError> {
        let mut db = Self::empty();
        for &(platform, json) in BUILTIN {
            db.load_json(platform, json)?;
        }
        Ok(db)
    }

    /// Merge one platform table from JSON. Returns the number of entries read.
    pub fn load_json(&mut self, platform: Platform, json: &str) -> Result<usize, DatError> {
        let entries: HashMap<String, GameDbEntry> = serde_json::from_str(json)?;
        let count = entries.len();
        self.tables.entry(platform).or_default().extend(entries);
        Ok(count)
    }

    /// Load every `<CODE>.json` in `dir`. Files whose stem is not a platform
    /// code are skipped. Returns the number of entries read.
    pub fn load_dir(&mut self, dir: &Path) -> Result<usize, DatError> {
        let mut paths: Vec<_> = std::fs::read_dir(dir)?
            .filter_map(|e| e.ok().map(|e| e.path()))
            .filter(|p| p.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json")))
            .collect();
        paths.sort();

        let mut total = 0;
        for path in paths {
            let stem = path
                .file_stem()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_default();
            let Ok(platform) = stem.parse::<Platform>() else {
                log::warn!("Skipping reference table with unknown platform: {}", path.display());
                continue;
            };
            let json = std::fs::read_to_string(&path)?;
            let count = self.load_json(platform, &json)?;
            log::debug!("Loaded {} reference entries for {} from {}", count, platform, path.display());
            total += count;
        }
        Ok(total)
    }

    /// Look up a title on a platform (exact match).
    pub fn lookup(&self, platform: Platform, title_en: &str) -> Option<&GameDbEntry> {
        self.tables.get(&platform)?.get(title_en)
    }

    /// Total entries across all platforms.
    pub fn len(&self) -> usize {
        self.tables.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
