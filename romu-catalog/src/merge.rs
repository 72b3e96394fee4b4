//! Field merge rules shared by every reconciliation path.
//!
//! A populated field is never overwritten. Checksum import, hash matching,
//! metadata-list matching and enrichment all go through [`take_if_empty`].

use crate::types::{GameMetadata, non_empty};

/// Store `value` into `slot` only if `slot` is currently empty and `value` is not.
///
/// Returns `true` if `slot` changed.
pub fn take_if_empty(slot: &mut Option<String>, value: Option<&str>) -> bool {
    if non_empty(slot).is_some() {
        return false;
    }
    match value.filter(|v| !v.is_empty()) {
        Some(v) => {
            *slot = Some(v.to_string());
            true
        }
        None => false,
    }
}

impl GameMetadata {
    /// Fill every empty field from `incoming`, leaving populated fields alone.
    ///
    /// Returns the number of fields that changed.
    pub fn fill_missing(&mut self, incoming: &GameMetadata) -> usize {
        [
            take_if_empty(&mut self.title_en, incoming.title_en.as_deref()),
            take_if_empty(&mut self.title_ja, incoming.title_ja.as_deref()),
            take_if_empty(&mut self.description_ja, incoming.description_ja.as_deref()),
            take_if_empty(&mut self.developer, incoming.developer.as_deref()),
            take_if_empty(&mut self.publisher, incoming.publisher.as_deref()),
            take_if_empty(&mut self.release_date, incoming.release_date.as_deref()),
            take_if_empty(&mut self.genre, incoming.genre.as_deref()),
            take_if_empty(&mut self.players, incoming.players.as_deref()),
            take_if_empty(&mut self.rating, incoming.rating.as_deref()),
        ]
        .into_iter()
        .filter(|changed| *changed)
        .count()
    }

    /// True when no field carries a value.
    pub fn is_empty(&self) -> bool {
        [
            &self.title_en,
            &self.title_ja,
            &self.description_ja,
            &self.developer,
            &self.publisher,
            &self.release_date,
            &self.genre,
            &self.players,
            &self.rating,
        ]
        .into_iter()
        .all(|f| non_empty(f).is_none())
    }
}
