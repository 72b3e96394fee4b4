//! Reconciliation of a ROM library against the catalog.
//!
//! This crate owns the write paths: scanning files into the catalog,
//! registering titles from checksum databases, linking files to games by
//! hash or by gamelist filename, and backfilling metadata from the
//! reference table.

pub mod dat_import;
pub mod enrich;
pub mod error;
pub mod gamelist_import;
pub mod progress;
pub mod scan_import;

pub use dat_import::{
    ImportStats, MatchStats, import_checksum_content, import_checksums, match_checksum_content,
    match_checksums,
};
pub use enrich::{EnrichStats, enrich};
pub use error::{ImportError, ScanError};
pub use gamelist_import::{
    ExportStats, GamelistStats, export_gamelists, import_gamelists, match_metadata_list,
};
pub use progress::{ImportProgress, LogProgress, SilentProgress};
pub use scan_import::{LogScanProgress, ScanProgress, ScanStats, SilentScanProgress, scan};
