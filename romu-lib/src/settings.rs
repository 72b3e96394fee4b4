//! User settings (`~/.config/romu/settings.toml`) and catalog path resolution.
//!
//! ```toml
//! [library]
//! database = "/path/to/romu.db"
//! gamedb_dir = "/path/to/gamedb"
//! ```

use std::path::{Path, PathBuf};

use romu_dat::{DatError, GameDb};
use serde::{Deserialize, Serialize};

use crate::error::SettingsError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub library: LibrarySettings,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibrarySettings {
    /// Catalog database file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<PathBuf>,
    /// Directory of extra reference tables (`<CODE>.json`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gamedb_dir: Option<PathBuf>,
}

/// Canonical path to the settings file.
pub fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("romu").join("settings.toml")
}

/// Default catalog location when neither the CLI nor settings name one.
pub fn default_db_path() -> PathBuf {
    let data = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
    data.join("romu").join("romu.db")
}

impl Settings {
    /// Load the user's settings. A missing or unreadable file yields defaults.
    pub fn load() -> Self {
        let path = settings_path();
        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring settings at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Load settings from a specific file. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Write settings to `path`, replacing the file atomically.
    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let serialized = toml::to_string_pretty(self)?;
        let tmp = path.with_extension("toml.tmp");
        std::fs::write(&tmp, serialized)?;
        std::fs::rename(&tmp, path)?;
        Ok(())
    }

    /// Write settings to the canonical location.
    pub fn save(&self) -> Result<(), SettingsError> {
        self.save_to(&settings_path())
    }

    /// Resolve the catalog path:
    ///
    /// 1. CLI override (if `Some`)
    /// 2. `library.database` from settings
    /// 3. [`default_db_path`]
    pub fn resolve_db_path(&self, cli_override: Option<PathBuf>) -> PathBuf {
        cli_override
            .or_else(|| self.library.database.clone())
            .unwrap_or_else(default_db_path)
    }

    /// Built-in reference tables plus any found in `library.gamedb_dir`.
    pub fn reference_table(&self) -> Result<GameDb, DatError> {
        let mut db = GameDb::builtin()?;
        if let Some(dir) = &self.library.gamedb_dir {
            let count = db.load_dir(dir)?;
            log::debug!("Loaded {} extra reference entries from {}", count, dir.display());
        }
        Ok(db)
    }
}
