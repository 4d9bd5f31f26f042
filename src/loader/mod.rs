//! Card catalog loading
//!
//! The catalog maps card ids to display data and is fixed for the session.

pub mod catalog;

pub use catalog::{CardCatalog, CardInfo, CARD_BACK, PLACEHOLDER, POWER_NINE};
