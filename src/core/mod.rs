//! Core card types

pub mod card;

pub use card::{Card, CardId};
