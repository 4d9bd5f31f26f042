//! Scry and surveil staging
//!
//! Beginning a scry pulls the top N library cards into a `ScryTransaction`.
//! The caller sorts them into piles, then either commits (cards land by
//! pile) or cancels (cards go back on top in their original order). Both
//! consume the transaction, so staged cards can't be applied twice.

use crate::core::Card;
use crate::game::GameState;
use crate::{GoldfishError, Result};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;

/// Which kind of look-at-the-top effect is running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScryKind {
    /// Rejected cards go to the library bottom
    Scry,
    /// Rejected cards go to the graveyard
    Surveil,
}

impl ScryKind {
    pub fn name(self) -> &'static str {
        match self {
            ScryKind::Scry => "scry",
            ScryKind::Surveil => "surveil",
        }
    }
}

impl fmt::Display for ScryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Pile a staged card is sorted into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScryDestination {
    Top,
    Bottom,
    Unassigned,
}

impl FromStr for ScryDestination {
    type Err = GoldfishError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "top" => Ok(ScryDestination::Top),
            "bottom" => Ok(ScryDestination::Bottom),
            "unassign" | "unassigned" => Ok(ScryDestination::Unassigned),
            _ => Err(GoldfishError::ParseError(format!(
                "unknown destination '{s}' (expected: top, bottom, unassigned)"
            ))),
        }
    }
}

type Pile = SmallVec<[usize; 8]>;

/// Cards pulled off the library, waiting to be sorted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScryTransaction {
    kind: ScryKind,

    /// Pulled cards in library order; slot `i` is `staged[i]`
    staged: Vec<Card>,

    /// Slots per pile, in the order they were put there
    top: Pile,
    bottom: Pile,
    unassigned: Pile,
}

impl ScryTransaction {
    /// Pull the top `count` library cards into a new transaction
    ///
    /// Fails with `InvalidCount` unless `1 <= count <= |library|`; the
    /// library is untouched on failure.
    pub fn begin(state: &mut GameState, kind: ScryKind, count: usize) -> Result<Self> {
        state.check_library_count(kind.name(), count)?;
        let staged = state.library.take_top(count);
        Ok(ScryTransaction {
            kind,
            unassigned: (0..staged.len()).collect(),
            staged,
            top: Pile::new(),
            bottom: Pile::new(),
        })
    }

    pub fn kind(&self) -> ScryKind {
        self.kind
    }

    /// Pulled cards in their original library order
    pub fn staged(&self) -> &[Card] {
        &self.staged
    }

    pub fn len(&self) -> usize {
        self.staged.len()
    }

    pub fn is_empty(&self) -> bool {
        self.staged.is_empty()
    }

    /// Sort `slot` into `destination`
    ///
    /// The slot leaves whatever pile it was in and goes to the end of the
    /// new one, matching a card dropped onto a pile.
    pub fn assign(&mut self, slot: usize, destination: ScryDestination) -> Result<()> {
        if slot >= self.staged.len() {
            return Err(GoldfishError::InvalidSlot {
                slot,
                len: self.staged.len(),
            });
        }
        for pile in [&mut self.top, &mut self.bottom, &mut self.unassigned] {
            pile.retain(|s| *s != slot);
        }
        self.pile_mut(destination).push(slot);
        Ok(())
    }

    /// Current pile of `slot`
    pub fn destination(&self, slot: usize) -> Option<ScryDestination> {
        [
            ScryDestination::Top,
            ScryDestination::Bottom,
            ScryDestination::Unassigned,
        ]
        .into_iter()
        .find(|dest| self.pile(*dest).contains(&slot))
    }

    /// Slots in `destination`, in placement order
    pub fn pile(&self, destination: ScryDestination) -> &[usize] {
        match destination {
            ScryDestination::Top => &self.top,
            ScryDestination::Bottom => &self.bottom,
            ScryDestination::Unassigned => &self.unassigned,
        }
    }

    fn pile_mut(&mut self, destination: ScryDestination) -> &mut Pile {
        match destination {
            ScryDestination::Top => &mut self.top,
            ScryDestination::Bottom => &mut self.bottom,
            ScryDestination::Unassigned => &mut self.unassigned,
        }
    }

    /// Apply the sorting to `state`
    ///
    /// Top-pile cards go onto the library one at a time in placement order,
    /// so the last one placed ends up on top. Then the bottom pile followed
    /// by the unassigned pile either go under the library (scry) or onto the
    /// graveyard one at a time (surveil).
    pub fn commit(self, state: &mut GameState) {
        let ScryTransaction {
            kind,
            staged,
            top,
            bottom,
            unassigned,
        } = self;
        let mut slots: Vec<Option<Card>> = staged.into_iter().map(Some).collect();

        for card in top.iter().filter_map(|&s| slots[s].take()) {
            state.library.push_top(card);
        }
        let rejected = bottom.iter().chain(unassigned.iter());
        for card in rejected.filter_map(|&s| slots[s].take()) {
            match kind {
                ScryKind::Scry => state.library.push_bottom(card),
                ScryKind::Surveil => state.graveyard.push_top(card),
            }
        }
    }

    /// Put every staged card back on top of the library in original order
    pub fn cancel(self, state: &mut GameState) {
        for card in self.staged.into_iter().rev() {
            state.library.push_top(card);
        }
    }
}
