//! Walk a ROM library, fingerprint every recognized file and upsert it into
//! the catalog.
//!
//! Scanning never links files to games. Per-file failures are counted in
//! [`ScanStats::errors`] and the walk carries on; only an unusable root
//! aborts the scan.

use std::path::Path;

use romu_catalog::FileRecord;
use romu_core::Platform;
use romu_core::util::base_name;
use romu_db::upsert_file;
use romu_lib::{FileClass, classify_file, read_carrier, walk_files};
use rusqlite::Connection;

use crate::error::ScanError;

/// Counts from one scan.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScanStats {
    /// Files and container entries that were fingerprinted (or tried to be).
    pub scanned: u64,
    /// Records written to the catalog.
    pub added: u64,
    /// Files outside any platform folder, with a foreign extension, or
    /// carriers without payload.
    pub skipped: u64,
    pub errors: u64,
}

/// Progress callbacks for scanning.
pub trait ScanProgress {
    fn on_file(&self, platform: Platform, name: &str, crc32: &str);
    fn on_skip(&self, path: &str, reason: &str);
    fn on_error(&self, path: &str, error: &str);
    fn on_complete(&self, stats: &ScanStats);
}

/// Discards every update.
pub struct SilentScanProgress;

impl ScanProgress for SilentScanProgress {
    fn on_file(&self, _: Platform, _: &str, _: &str) {}
    fn on_skip(&self, _: &str, _: &str) {}
    fn on_error(&self, _: &str, _: &str) {}
    fn on_complete(&self, _: &ScanStats) {}
}

/// Progress reported through the `log` crate.
pub struct LogScanProgress;

impl ScanProgress for LogScanProgress {
    fn on_file(&self, platform: Platform, name: &str, crc32: &str) {
        log::info!("  [{}] {} (CRC32: {})", platform, name, crc32);
    }

    fn on_skip(&self, path: &str, reason: &str) {
        log::debug!("  skip {}: {}", path, reason);
    }

    fn on_error(&self, path: &str, error: &str) {
        log::warn!("  {}: {}", path, error);
    }

    fn on_complete(&self, stats: &ScanStats) {
        log::info!(
            "Scanned {} files: {} added, {} skipped, {} errors",
            stats.scanned,
            stats.added,
            stats.skipped,
            stats.errors
        );
    }
}

/// Scan `root` into the catalog.
///
/// All upserts share one transaction, committed when the walk finishes.
pub fn scan(
    conn: &Connection,
    root: &Path,
    progress: Option<&dyn ScanProgress>,
) -> Result<ScanStats, ScanError> {
    let root = std::path::absolute(root)?;
    if !root.is_dir() {
        return Err(ScanError::NotADirectory(root));
    }

    let mut stats = ScanStats::default();
    let tx = conn.unchecked_transaction()?;

    for item in walk_files(&root) {
        let path = match item {
            Ok(path) => path,
            Err(e) => {
                stats.errors += 1;
                let location = e.path().map(|p| p.display().to_string()).unwrap_or_default();
                if let Some(p) = progress {
                    p.on_error(&location, &e.to_string());
                }
                continue;
            }
        };
        let path_str = path.to_string_lossy().into_owned();

        match classify_file(&root, &path) {
            FileClass::Unknown => {
                stats.skipped += 1;
                if let Some(p) = progress {
                    p.on_skip(&path_str, "no platform folder");
                }
            }
            FileClass::Rejected(platform) => {
                stats.skipped += 1;
                if let Some(p) = progress {
                    p.on_skip(&path_str, &format!("not a {} file", platform));
                }
            }
            FileClass::File(platform) => {
                stats.scanned += 1;
                let fingerprint = match romu_dat::fingerprint_file(&path) {
                    Ok(fp) => fp,
                    Err(e) => {
                        stats.errors += 1;
                        if let Some(p) = progress {
                            p.on_error(&path_str, &e.to_string());
                        }
                        continue;
                    }
                };
                let name = base_name(&path_str).to_string();
                let record = FileRecord::scanned(path_str.as_str(), None, name, platform, &fingerprint);
                store(&tx, &record, platform, &mut stats, progress);
            }
            FileClass::Carrier(platform) => {
                let contents = match read_carrier(&path, platform) {
                    Ok(contents) => contents,
                    Err(e) => {
                        stats.errors += 1;
                        if let Some(p) = progress {
                            p.on_error(&path_str, &e.to_string());
                        }
                        continue;
                    }
                };
                if !contents.has_payload() {
                    stats.skipped += 1;
                    if let Some(p) = progress {
                        p.on_skip(&path_str, "no recognized payload");
                    }
                    continue;
                }

                for (name, error) in &contents.failures {
                    stats.scanned += 1;
                    stats.errors += 1;
                    if let Some(p) = progress {
                        p.on_error(&format!("{}!{}", path_str, name), &error.to_string());
                    }
                }
                for entry in &contents.entries {
                    stats.scanned += 1;
                    let record = FileRecord::scanned(
                        path_str.as_str(),
                        Some(&entry.name),
                        entry.display_name.as_str(),
                        platform,
                        &entry.fingerprint,
                    );
                    store(&tx, &record, platform, &mut stats, progress);
                }
            }
        }
    }

    tx.commit()?;

    log::debug!("Scan of {} finished: {:?}", root.display(), stats);
    if let Some(p) = progress {
        p.on_complete(&stats);
    }
    Ok(stats)
}

fn store(
    conn: &Connection,
    record: &FileRecord,
    platform: Platform,
    stats: &mut ScanStats,
    progress: Option<&dyn ScanProgress>,
) {
    match upsert_file(conn, record) {
        Ok(_) => {
            stats.added += 1;
            if let Some(p) = progress {
                p.on_file(platform, &record.filename, &record.crc32);
            }
        }
        Err(e) => {
            stats.errors += 1;
            if let Some(p) = progress {
                p.on_error(&record.filename, &e.to_string());
            }
        }
    }
}
