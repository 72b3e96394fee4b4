//! Filesystem side of the catalog: locating ROM files under a library root,
//! opening zip containers, and reading user settings.

pub mod container;
pub mod error;
pub mod scanner;
pub mod settings;

pub use container::{CarrierContents, ContainerEntry, is_container, read_carrier};
pub use error::{ContainerError, SettingsError};
pub use scanner::{FileClass, classify_file, classify_path, walk_files};
pub use settings::{LibrarySettings, Settings};

pub use romu_core::Platform;
