//! Data model types for the ROM catalog.
//!
//! Persistent records (`FileRecord`, `GameRecord`) mirror the two catalog
//! tables. Transient records (`ChecksumRecord`, `MetadataEntry`) are the
//! canonical output of the parsers and live only for one import or match call.

use romu_core::{Fingerprint, Platform};
use serde::{Deserialize, Serialize};

// ── File ────────────────────────────────────────────────────────────────────

/// One scanned unit of identification.
///
/// Identity is `(path, entry)`: `path` is the file on disk, `entry` is the
/// inner entry name for files found inside a carrier container (empty
/// otherwise). Scanning refreshes everything except `game_id`, which only
/// reconciliation sets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    pub id: i64,
    pub path: String,
    #[serde(default)]
    pub entry: String,
    /// Display name: the file name, or `<container>/<entry>` for container entries.
    pub filename: String,
    pub size: u64,
    pub crc32: String,
    pub md5: String,
    pub sha1: String,
    pub platform: String,
    #[serde(default)]
    pub game_id: Option<i64>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

impl FileRecord {
    /// Build an unsaved record from a scan result.
    pub fn scanned(
        path: impl Into<String>,
        entry: Option<&str>,
        filename: impl Into<String>,
        platform: Platform,
        fingerprint: &Fingerprint,
    ) -> Self {
        Self {
            id: 0,
            path: path.into(),
            entry: entry.unwrap_or_default().to_string(),
            filename: filename.into(),
            size: fingerprint.size,
            crc32: fingerprint.crc32.clone(),
            md5: fingerprint.md5.clone(),
            sha1: fingerprint.sha1.clone(),
            platform: platform.code().to_string(),
            game_id: None,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    pub fn is_container_entry(&self) -> bool {
        !self.entry.is_empty()
    }

    /// The digest stored for one hash kind.
    pub fn hash(&self, kind: HashKind) -> &str {
        match kind {
            HashKind::Sha1 => &self.sha1,
            HashKind::Md5 => &self.md5,
            HashKind::Crc32 => &self.crc32,
        }
    }
}

/// Hash algorithms usable as a match key, in descending match priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashKind {
    Sha1,
    Md5,
    Crc32,
}

impl HashKind {
    /// Priority order used when picking a match key.
    pub const PRIORITY: [HashKind; 3] = [HashKind::Sha1, HashKind::Md5, HashKind::Crc32];

    /// Column holding this digest in the files table.
    pub fn column(&self) -> &'static str {
        match self {
            Self::Sha1 => "sha1",
            Self::Md5 => "md5",
            Self::Crc32 => "crc32",
        }
    }
}

impl std::fmt::Display for HashKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sha1 => write!(f, "SHA1"),
            Self::Md5 => write!(f, "MD5"),
            Self::Crc32 => write!(f, "CRC32"),
        }
    }
}

// ── Game ────────────────────────────────────────────────────────────────────

/// Descriptive fields shared by game records, metadata lists and the
/// reference table. `None` and `Some("")` both mean "not known".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameMetadata {
    #[serde(default)]
    pub title_en: Option<String>,
    #[serde(default)]
    pub title_ja: Option<String>,
    #[serde(default)]
    pub description_ja: Option<String>,
    #[serde(default)]
    pub developer: Option<String>,
    #[serde(default)]
    pub publisher: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub players: Option<String>,
    #[serde(default)]
    pub rating: Option<String>,
}

/// A canonical game identity.
///
/// `(title, platform)` is probed before every insert but is not a hard
/// uniqueness constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub id: i64,
    pub platform: String,
    #[serde(flatten)]
    pub meta: GameMetadata,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

impl GameRecord {
    /// Build an unsaved record.
    pub fn new(platform: Platform, meta: GameMetadata) -> Self {
        Self {
            id: 0,
            platform: platform.code().to_string(),
            meta,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    /// Best available display title: native, then English.
    pub fn display_title(&self) -> Option<&str> {
        non_empty(&self.meta.title_ja).or_else(|| non_empty(&self.meta.title_en))
    }
}

pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

// ── Transient parser output ─────────────────────────────────────────────────

/// One ROM entry of a checksum database, normalized.
///
/// Hash fields are uppercase hex or empty when the source omits them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecksumRecord {
    pub game_title: String,
    pub platform: Platform,
    pub crc32: String,
    pub md5: String,
    pub sha1: String,
    pub size: u64,
}

impl ChecksumRecord {
    /// First non-empty digest in priority order SHA1, MD5, CRC32.
    pub fn match_key(&self) -> Option<(HashKind, &str)> {
        HashKind::PRIORITY.into_iter().find_map(|kind| {
            let value = match kind {
                HashKind::Sha1 => self.sha1.as_str(),
                HashKind::Md5 => self.md5.as_str(),
                HashKind::Crc32 => self.crc32.as_str(),
            };
            (!value.is_empty()).then_some((kind, value))
        })
    }
}

/// A parsed checksum database: its declared title, resolved platform and records.
#[derive(Debug, Clone)]
pub struct ChecksumSet {
    pub source: String,
    pub platform: Platform,
    pub records: Vec<ChecksumRecord>,
}

/// One `<game>` of a metadata list.
///
/// `path` is kept as written in the list (used again on export);
/// `filename` is its last path component, used for matching.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataEntry {
    pub path: String,
    pub filename: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub release_date: Option<String>,
    pub developer: Option<String>,
    pub publisher: Option<String>,
    pub genre: Option<String>,
    pub players: Option<String>,
    pub rating: Option<String>,
    pub image: Option<String>,
    pub thumbnail: Option<String>,
    pub marquee: Option<String>,
}

impl MetadataEntry {
    /// Descriptive fields as game metadata (the list's name is a native title).
    pub fn to_metadata(&self) -> GameMetadata {
        GameMetadata {
            title_en: None,
            title_ja: self.name.clone(),
            description_ja: self.description.clone(),
            developer: self.developer.clone(),
            publisher: self.publisher.clone(),
            release_date: self.release_date.clone(),
            genre: self.genre.clone(),
            players: self.players.clone(),
            rating: self.rating.clone(),
        }
    }
}
