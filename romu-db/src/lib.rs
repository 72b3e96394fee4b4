//! SQLite persistence layer for the ROM catalog.
//!
//! Provides schema creation, row operations, and query APIs
//! backed by SQLite (via rusqlite with bundled feature).

pub mod operations;
pub mod queries;
pub mod schema;

pub use operations::{
    OperationError, files_by_hash, files_matching_name, find_game_by_native_title,
    find_game_by_title, get_file, get_game, insert_game, link_file, update_game_metadata,
    upsert_file,
};
pub use queries::{
    CatalogStats, FileRow, PlatformStats, SearchPage, catalog_stats, count_unmatched_files,
    enrichable_games, export_entries, list_files, list_platforms, search_files, unmatched_files,
};
pub use schema::{SchemaError, open_database, open_memory};
