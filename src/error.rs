//! Error types for the goldfish table

use crate::game::ScryKind;
use crate::zones::Zone;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GoldfishError {
    #[error("Cannot {action} {requested} cards. Library has {available} cards.")]
    InvalidCount {
        action: &'static str,
        requested: usize,
        available: usize,
    },

    #[error("{0} is empty")]
    EmptyZone(Zone),

    #[error("Index {index} out of range for {zone} ({len} cards)")]
    IndexOutOfRange { zone: Zone, index: usize, len: usize },

    #[error("Unknown card id: {0}")]
    UnknownCard(String),

    #[error("No saved game state found")]
    NotFound,

    #[error("A {0} is already in progress")]
    ScryPending(ScryKind),

    #[error("No scry or surveil in progress")]
    NoScryPending,

    #[error("Slot {slot} out of range ({len} cards staged)")]
    InvalidSlot { slot: usize, len: usize },

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for GoldfishError {
    fn from(err: serde_json::Error) -> Self {
        GoldfishError::SerializationError(err.to_string())
    }
}

/// Non-fatal conditions reported back to the caller instead of an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoldfishWarning {
    /// The zone an action reads from had nothing to act on
    EmptyZone { zone: Zone, action: &'static str },
}

impl fmt::Display for GoldfishWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GoldfishWarning::EmptyZone { zone, action } => {
                write!(f, "{} is empty - nothing to {action}.", zone.title())
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, GoldfishError>;
