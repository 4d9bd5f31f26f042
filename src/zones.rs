//! Game zones (Library, Hand, Battlefield, Graveyard, Exile)
//!
//! Every zone is an ordered sequence where index 0 is the top and the last
//! index is the bottom. Order drives draws for the library; the other zones
//! keep it so graveyard and exile can show their most recent card.

use crate::core::{Card, CardId};
use crate::{GoldfishError, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

/// The five zones on the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Zone {
    Library,
    Hand,
    Battlefield,
    Graveyard,
    Exile,
}

impl Zone {
    pub const ALL: [Zone; 5] = [
        Zone::Library,
        Zone::Hand,
        Zone::Battlefield,
        Zone::Graveyard,
        Zone::Exile,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Zone::Library => "library",
            Zone::Hand => "hand",
            Zone::Battlefield => "battlefield",
            Zone::Graveyard => "graveyard",
            Zone::Exile => "exile",
        }
    }

    /// Capitalized name for user-facing messages
    pub fn title(self) -> &'static str {
        match self {
            Zone::Library => "Library",
            Zone::Hand => "Hand",
            Zone::Battlefield => "Battlefield",
            Zone::Graveyard => "Graveyard",
            Zone::Exile => "Exile",
        }
    }

    /// Whether the zone's cards are shown face up
    pub fn shows_face(self) -> bool {
        !matches!(self, Zone::Library)
    }

    /// Graveyard and exile render only their top card
    pub fn shows_top_only(self) -> bool {
        matches!(self, Zone::Graveyard | Zone::Exile)
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Zone {
    type Err = GoldfishError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "library" | "lib" => Ok(Zone::Library),
            "hand" => Ok(Zone::Hand),
            "battlefield" | "bf" => Ok(Zone::Battlefield),
            "graveyard" | "gy" => Ok(Zone::Graveyard),
            "exile" => Ok(Zone::Exile),
            _ => Err(GoldfishError::ParseError(format!(
                "unknown zone '{s}' (expected: library, hand, battlefield, graveyard, exile)"
            ))),
        }
    }
}

/// Where a card lands when inserted into a zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ZonePosition {
    /// Index 0
    #[default]
    Top,
    /// After the last card
    Bottom,
}

/// Stack of identical cards as the hand and battlefield display them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardGroup {
    pub id: CardId,
    pub count: usize,
    /// Index of the first card with this id; dragging the stack moves it
    pub first_index: usize,
}

/// An ordered zone of cards
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardZone {
    /// Zone type
    pub zone_type: Zone,

    /// Cards, top first
    cards: VecDeque<Card>,
}

impl CardZone {
    pub fn new(zone_type: Zone) -> Self {
        CardZone {
            zone_type,
            cards: VecDeque::new(),
        }
    }

    pub fn cards(&self) -> &VecDeque<Card> {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn push_top(&mut self, card: Card) {
        self.cards.push_front(card);
    }

    pub fn push_bottom(&mut self, card: Card) {
        self.cards.push_back(card);
    }

    pub fn insert(&mut self, card: Card, position: ZonePosition) {
        match position {
            ZonePosition::Top => self.push_top(card),
            ZonePosition::Bottom => self.push_bottom(card),
        }
    }

    /// Remove the card at `index`
    pub fn remove_at(&mut self, index: usize) -> Result<Card> {
        let len = self.cards.len();
        self.cards.remove(index).ok_or(GoldfishError::IndexOutOfRange {
            zone: self.zone_type,
            index,
            len,
        })
    }

    /// Draw from top
    ///
    /// Batch callers check the length up front so they can report one
    /// aggregate error; this only fails on a genuinely empty zone.
    pub fn draw_top(&mut self) -> Result<Card> {
        self.cards
            .pop_front()
            .ok_or(GoldfishError::EmptyZone(self.zone_type))
    }

    /// Remove the top `count` cards, top first
    pub fn take_top(&mut self, count: usize) -> Vec<Card> {
        let count = count.min(self.cards.len());
        self.cards.drain(..count).collect()
    }

    /// Remove every card, top first
    pub fn take_all(&mut self) -> Vec<Card> {
        std::mem::take(&mut self.cards).into()
    }

    /// Look at top card without removing it
    pub fn peek_top(&self) -> Option<&Card> {
        self.cards.front()
    }

    /// The face-up card a viewer sees, if the zone shows one
    pub fn visible(&self) -> Option<&Card> {
        if self.zone_type.shows_face() {
            self.peek_top()
        } else {
            None
        }
    }

    /// Fisher-Yates shuffle
    ///
    /// Walks from the last index down to 1, swapping each position with a
    /// uniformly chosen index in `0..=i`, which yields every permutation
    /// with equal probability.
    pub fn shuffle(&mut self, rng: &mut impl Rng) {
        for i in (1..self.cards.len()).rev() {
            let j = rng.gen_range(0..=i);
            self.cards.swap(i, j);
        }
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }

    /// Group cards by id in first-appearance order
    pub fn groups(&self) -> Vec<CardGroup> {
        let mut groups: Vec<CardGroup> = Vec::new();
        for (index, card) in self.cards.iter().enumerate() {
            match groups.iter_mut().find(|g| &g.id == card.id()) {
                Some(group) => group.count += 1,
                None => groups.push(CardGroup {
                    id: card.id().clone(),
                    count: 1,
                    first_index: index,
                }),
            }
        }
        groups
    }

    pub fn ids(&self) -> impl Iterator<Item = &CardId> {
        self.cards.iter().map(Card::id)
    }
}
