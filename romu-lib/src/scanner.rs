//! Platform classification and directory walking for a ROM library.
//!
//! A library is laid out as platform folders (`fc/`, `gba/`, `neogeo/`, ...)
//! which may sit at any depth below the scan root. Classification looks only
//! at folder names, never at file content.

use std::path::{Component, Path, PathBuf};

use romu_core::Platform;
use walkdir::WalkDir;

use crate::container::is_container;

/// What the scanner should do with one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileClass {
    /// Not under any recognized platform folder.
    Unknown,
    /// Under a platform folder but the extension is not accepted there.
    Rejected(Platform),
    /// Fingerprint the file itself (plain ROMs, and zips on platforms where
    /// the container is the unit).
    File(Platform),
    /// A zip whose entries are fingerprinted individually.
    Carrier(Platform),
}

/// Resolve the platform of `path` from folder names.
///
/// When the root's own name is a platform folder, everything below it
/// belongs to that platform. Otherwise the directories between `root` and
/// the file are checked top-down and the first recognized name wins.
pub fn classify_path(root: &Path, path: &Path) -> Option<Platform> {
    if let Some(platform) = root
        .file_name()
        .and_then(|n| n.to_str())
        .and_then(Platform::from_folder_name)
    {
        return Some(platform);
    }

    let rel = path.strip_prefix(root).ok()?;
    let dirs = rel.parent()?;
    dirs.components().find_map(|c| match c {
        Component::Normal(name) => name.to_str().and_then(Platform::from_folder_name),
        _ => None,
    })
}

/// Classify a file for scanning: platform, extension check and container policy.
pub fn classify_file(root: &Path, path: &Path) -> FileClass {
    let Some(platform) = classify_path(root, path) else {
        return FileClass::Unknown;
    };
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default();

    if is_container(path) && !platform.container_is_unit() {
        FileClass::Carrier(platform)
    } else if platform.accepts_file_name(&name) {
        FileClass::File(platform)
    } else {
        FileClass::Rejected(platform)
    }
}

/// Every regular file under `root`, depth-first with siblings sorted by name.
///
/// Entries that cannot be read are yielded as errors so callers can count
/// them and carry on.
pub fn walk_files(root: &Path) -> impl Iterator<Item = Result<PathBuf, walkdir::Error>> + use<> {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(e) if e.file_type().is_file() => Some(Ok(e.into_path())),
            Ok(_) => None,
            Err(err) => Some(Err(err)),
        })
}

#[cfg(test)]
#[path = "tests/scanner_tests.rs"]
mod tests;
