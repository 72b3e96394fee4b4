pub mod dat;
pub mod error;
pub mod gamedb;
pub mod gamelist;
pub mod hasher;
pub mod systems;

pub use dat::{DatDialect, parse_checksum_db, parse_checksum_file};
pub use error::DatError;
pub use gamedb::{GameDb, GameDbEntry};
pub use gamelist::{parse_gamelist, parse_gamelist_file, write_gamelist, write_gamelist_file};
pub use hasher::{fingerprint, fingerprint_file};
pub use systems::platform_from_header;
