//! Table configuration

use crate::core::CardId;
use crate::loader::{CardCatalog, PLACEHOLDER, POWER_NINE};
use crate::{GoldfishError, Result};

/// Setup constants for a table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableConfig {
    /// Number of placeholder cards a fresh library holds
    pub library_size: usize,

    /// Card the fresh library is filled with
    pub placeholder: CardId,

    /// Cards the oracle effect adds to the library
    pub power_set: Vec<CardId>,

    /// How many cards Timetwister draws after the reshuffle
    pub twister_draw: usize,

    /// RNG seed; `None` picks a random one at table creation
    pub seed: Option<u64>,
}

impl Default for TableConfig {
    fn default() -> Self {
        TableConfig {
            library_size: 99,
            placeholder: CardId::new(PLACEHOLDER),
            power_set: POWER_NINE.iter().map(|id| CardId::new(*id)).collect(),
            twister_draw: 7,
            seed: None,
        }
    }
}

impl TableConfig {
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check every configured card against the catalog
    pub fn validate(&self, catalog: &CardCatalog) -> Result<()> {
        std::iter::once(&self.placeholder)
            .chain(self.power_set.iter())
            .find(|id| !catalog.contains(id))
            .map_or(Ok(()), |id| Err(GoldfishError::UnknownCard(id.to_string())))
    }
}
