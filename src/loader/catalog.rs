//! Card catalog for looking up display data by card id

use crate::core::CardId;
use crate::{GoldfishError, Result};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Filler card the library starts with
pub const PLACEHOLDER: &str = "placeholder";

/// Image shown for the face-down library
pub const CARD_BACK: &str = "card-back";

/// The nine cards the oracle effect shuffles into the library
pub const POWER_NINE: [&str; 9] = [
    "black-lotus",
    "time-walk",
    "timetwister",
    "ancestral-recall",
    "mox-pearl",
    "mox-sapphire",
    "mox-jet",
    "mox-ruby",
    "mox-emerald",
];

const BUILTIN: [(&str, &str); 11] = [
    ("black-lotus", "Black Lotus"),
    ("time-walk", "Time Walk"),
    ("timetwister", "Timetwister"),
    ("ancestral-recall", "Ancestral Recall"),
    ("mox-pearl", "Mox Pearl"),
    ("mox-sapphire", "Mox Sapphire"),
    ("mox-jet", "Mox Jet"),
    ("mox-ruby", "Mox Ruby"),
    ("mox-emerald", "Mox Emerald"),
    (PLACEHOLDER, "Placeholder"),
    (CARD_BACK, "Card Back"),
];

/// Display data for one card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardInfo {
    #[serde(rename = "name")]
    pub display_name: String,

    #[serde(rename = "image")]
    pub image_ref: String,
}

/// Static lookup from card id to display data
#[derive(Debug, Clone, Default)]
pub struct CardCatalog {
    cards: FxHashMap<CardId, CardInfo>,
}

impl CardCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        CardCatalog {
            cards: FxHashMap::default(),
        }
    }

    /// The catalog the table ships with
    pub fn builtin() -> Self {
        let mut catalog = CardCatalog::new();
        for (id, name) in BUILTIN {
            catalog.add_card(
                CardId::new(id),
                CardInfo {
                    display_name: name.to_string(),
                    image_ref: format!("static/{id}.webp"),
                },
            );
        }
        catalog
    }

    /// Load a catalog from a JSON file
    ///
    /// The file is an object keyed by card id whose values carry `name`
    /// and `image`, e.g. `{"black-lotus": {"name": "Black Lotus", "image": "..."}}`.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(GoldfishError::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Catalog not found: {path:?}"),
            )));
        }
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let entries: FxHashMap<CardId, CardInfo> = serde_json::from_str(json)?;
        Ok(CardCatalog { cards: entries })
    }

    /// Add a single card
    pub fn add_card(&mut self, id: CardId, info: CardInfo) {
        self.cards.insert(id, info);
    }

    /// Add a card keyed by its normalized display name
    ///
    /// Returns the derived id.
    pub fn register_named(&mut self, name: &str, image_ref: impl Into<String>) -> CardId {
        let id = CardId::from_name(name);
        self.add_card(
            id.clone(),
            CardInfo {
                display_name: name.to_string(),
                image_ref: image_ref.into(),
            },
        );
        id
    }

    pub fn get(&self, id: &CardId) -> Option<&CardInfo> {
        self.cards.get(id)
    }

    pub fn contains(&self, id: &CardId) -> bool {
        self.cards.contains_key(id)
    }

    /// Display name, falling back to the raw id
    pub fn display_name<'a>(&'a self, id: &'a CardId) -> &'a str {
        self.get(id).map_or(id.as_str(), |info| info.display_name.as_str())
    }

    /// Total number of cards in the catalog
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
