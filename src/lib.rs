//! MTG Goldfish - a single-player card table
//!
//! Keeps the five zones of a Magic: The Gathering table (library, hand,
//! battlefield, graveyard, exile) and the bulk actions a goldfishing player
//! runs on them: draws, shuffles, Timetwister, scry and surveil.

pub mod core;
pub mod error;
pub mod game;
pub mod loader;
pub mod zones;

pub use error::{GoldfishError, GoldfishWarning, Result};
