//! Card identity and card values

use crate::loader::CardCatalog;
use crate::{GoldfishError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Stable catalog key for a card (e.g. "black-lotus")
///
/// Cheap to clone: the key is shared behind an `Arc` so a 99-card library
/// holds 99 pointers to one string rather than 99 copies.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(Arc<str>);

impl CardId {
    pub fn new(key: impl AsRef<str>) -> Self {
        CardId(Arc::from(key.as_ref()))
    }

    /// Derive a catalog key from a display name
    ///
    /// Folds to ASCII, lowercases, and collapses every run of
    /// non-alphanumeric characters into a single `-`:
    /// "Æther Vial" becomes "aether-vial".
    pub fn from_name(name: &str) -> Self {
        let folded = deunicode::deunicode(name).to_lowercase();
        let mut key = String::with_capacity(folded.len());
        for ch in folded.chars() {
            if ch.is_ascii_alphanumeric() {
                key.push(ch);
            } else if !key.is_empty() && !key.ends_with('-') {
                key.push('-');
            }
        }
        while key.ends_with('-') {
            key.pop();
        }
        CardId::new(key)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CardId {
    fn from(key: &str) -> Self {
        CardId::new(key)
    }
}

/// A card sitting in some zone
///
/// Cards are plain values: two cards with the same id are interchangeable,
/// there is no per-instance identity. Construction goes through the catalog
/// so a card in play always has display data behind it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Card {
    id: CardId,
}

impl Card {
    /// Build a card, failing with `UnknownCard` if the catalog lacks the id
    pub fn new(id: impl Into<CardId>, catalog: &CardCatalog) -> Result<Self> {
        let id = id.into();
        if !catalog.contains(&id) {
            return Err(GoldfishError::UnknownCard(id.to_string()));
        }
        Ok(Card { id })
    }

    pub fn id(&self) -> &CardId {
        &self.id
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}
