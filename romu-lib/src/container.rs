//! Zip container inspection.
//!
//! Whether a zip is cataloged as a whole or opened as a carrier is a fixed
//! per-platform policy (`Platform::container_is_unit`). This module handles
//! the carrier case: every accepted entry is fingerprinted straight from the
//! decompression stream.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use romu_core::{Fingerprint, Platform};
use zip::ZipArchive;

use crate::error::ContainerError;

/// Whether a path names a container this crate can open.
pub fn is_container(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("zip"))
}

/// One fingerprinted payload inside a carrier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerEntry {
    /// Name of the entry inside the archive.
    pub name: String,
    /// `<container file name>/<entry name>`.
    pub display_name: String,
    pub fingerprint: Fingerprint,
}

/// Result of reading a carrier.
///
/// `failures` holds accepted entries that could not be read; they still
/// count as payload.
#[derive(Debug, Default)]
pub struct CarrierContents {
    pub entries: Vec<ContainerEntry>,
    pub failures: Vec<(String, ContainerError)>,
}

impl CarrierContents {
    /// False when the archive held nothing the platform accepts.
    pub fn has_payload(&self) -> bool {
        !self.entries.is_empty() || !self.failures.is_empty()
    }
}

/// Open a zip and fingerprint every entry `platform` accepts.
///
/// Directory entries and entries with a foreign extension are skipped.
/// Failing to open the archive is an error; failing to read one entry is
/// recorded in [`CarrierContents::failures`].
pub fn read_carrier(path: &Path, platform: Platform) -> Result<CarrierContents, ContainerError> {
    let file = File::open(path)?;
    let mut zip = ZipArchive::new(BufReader::new(file))?;
    let container_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut contents = CarrierContents::default();
    for i in 0..zip.len() {
        let mut entry = match zip.by_index(i) {
            Ok(entry) => entry,
            Err(e) => {
                contents.failures.push((format!("entry #{i}"), e.into()));
                continue;
            }
        };
        if entry.is_dir() {
            continue;
        }
        let name = entry.name().to_string();
        if !platform.accepts_file_name(&name) {
            log::debug!("Ignoring {}/{}: not a {} file", container_name, name, platform);
            continue;
        }

        let size = entry.size();
        match romu_dat::fingerprint(&mut entry, Some(size)) {
            Ok(fingerprint) => contents.entries.push(ContainerEntry {
                display_name: format!("{container_name}/{name}"),
                name,
                fingerprint,
            }),
            Err(e) => contents.failures.push((name, e.into())),
        }
    }

    Ok(contents)
}
