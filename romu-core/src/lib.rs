use serde::{Deserialize, Serialize};

pub mod platform;
pub mod util;

pub use platform::{Platform, PlatformParseError};

/// Digests and length of one fully-read byte stream.
///
/// All digests are uppercase hex; `crc32` is always 8 digits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fingerprint {
    pub crc32: String,
    pub md5: String,
    pub sha1: String,
    pub size: u64,
}
