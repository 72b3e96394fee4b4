/// Errors raised while reading checksum databases, metadata lists and
/// reference tables, or while fingerprinting a stream.
#[derive(Debug, thiserror::Error)]
pub enum DatError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML parse error: {0}")]
    XmlParse(#[from] quick_xml::Error),

    #[error("XML attribute error: {0}")]
    XmlAttribute(#[from] quick_xml::events::attributes::AttrError),

    #[error("Invalid DAT file: {0}")]
    InvalidDat(String),

    #[error("Invalid gamelist: {0}")]
    InvalidGamelist(String),

    #[error("cannot detect platform from DAT header \"{header}\", use --platform flag")]
    UnresolvedPlatform { header: String },

    #[error("stream ended after {actual} of {expected} bytes")]
    TruncatedStream { expected: u64, actual: u64 },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DatError {
    pub fn invalid_dat(msg: impl Into<String>) -> Self {
        Self::InvalidDat(msg.into())
    }

    pub fn invalid_gamelist(msg: impl Into<String>) -> Self {
        Self::InvalidGamelist(msg.into())
    }

    pub fn unresolved_platform(header: impl Into<String>) -> Self {
        Self::UnresolvedPlatform {
            header: header.into(),
        }
    }
}
