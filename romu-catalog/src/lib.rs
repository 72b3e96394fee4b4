//! Catalog data model types and the field-merge primitive.
//!
//! This crate defines the records the catalog persists and the transient
//! records parsers hand to the reconciliation engine, without any database
//! dependencies. `romu-db` persists them; `romu-import` moves data between them.

pub mod merge;
pub mod types;

pub use merge::take_if_empty;
pub use types::*;
