//! Main game state structure
//!
//! `GameState` is the five zones and nothing else. It is the unit that gets
//! persisted, and the bulk actions here are the only way the table mutates it.

use crate::core::Card;
use crate::error::GoldfishWarning;
use crate::game::actions::CardMove;
use crate::zones::{CardZone, Zone};
use crate::{GoldfishError, Result};
use rand::Rng;

/// Complete table state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub library: CardZone,
    pub hand: CardZone,
    pub battlefield: CardZone,
    pub graveyard: CardZone,
    pub exile: CardZone,
}

impl GameState {
    /// All five zones empty
    pub fn new() -> Self {
        GameState {
            library: CardZone::new(Zone::Library),
            hand: CardZone::new(Zone::Hand),
            battlefield: CardZone::new(Zone::Battlefield),
            graveyard: CardZone::new(Zone::Graveyard),
            exile: CardZone::new(Zone::Exile),
        }
    }

    pub fn zone(&self, zone: Zone) -> &CardZone {
        match zone {
            Zone::Library => &self.library,
            Zone::Hand => &self.hand,
            Zone::Battlefield => &self.battlefield,
            Zone::Graveyard => &self.graveyard,
            Zone::Exile => &self.exile,
        }
    }

    pub fn zone_mut(&mut self, zone: Zone) -> &mut CardZone {
        match zone {
            Zone::Library => &mut self.library,
            Zone::Hand => &mut self.hand,
            Zone::Battlefield => &mut self.battlefield,
            Zone::Graveyard => &mut self.graveyard,
            Zone::Exile => &mut self.exile,
        }
    }

    /// Cards across all zones
    pub fn total_cards(&self) -> usize {
        Zone::ALL.iter().map(|&z| self.zone(z).len()).sum()
    }

    pub fn clear(&mut self) {
        for zone in Zone::ALL {
            self.zone_mut(zone).clear();
        }
    }

    /// Reset to a library of `count` copies of `placeholder`
    pub fn initialize(&mut self, placeholder: &Card, count: usize) {
        self.clear();
        for _ in 0..count {
            self.library.push_bottom(placeholder.clone());
        }
    }

    /// Fail with `InvalidCount` unless `1 <= count <= |library|`
    pub fn check_library_count(&self, action: &'static str, count: usize) -> Result<()> {
        let available = self.library.len();
        if count == 0 || count > available {
            return Err(GoldfishError::InvalidCount {
                action,
                requested: count,
                available,
            });
        }
        Ok(())
    }

    /// Move one card; the source index is checked before anything changes
    pub fn move_card(&mut self, mv: &CardMove) -> Result<()> {
        let card = self.zone_mut(mv.from).remove_at(mv.index)?;
        self.zone_mut(mv.to).insert(card, mv.position);
        Ok(())
    }

    /// Draw `count` cards from the library top onto the bottom of the hand
    ///
    /// The first card drawn ends up deepest in hand, the same as drawing
    /// one at a time.
    pub fn draw(&mut self, count: usize) -> Result<()> {
        self.check_library_count("draw", count)?;
        self.draw_up_to(count);
        Ok(())
    }

    /// Draw as many of `count` as the library allows; returns the number drawn
    fn draw_up_to(&mut self, count: usize) -> usize {
        let drawn = self.library.take_top(count);
        let n = drawn.len();
        for card in drawn {
            self.hand.push_bottom(card);
        }
        n
    }

    /// Shuffle the library, or report that there is nothing to shuffle
    pub fn shuffle_library(&mut self, rng: &mut impl Rng) -> Option<GoldfishWarning> {
        if self.library.is_empty() {
            return Some(GoldfishWarning::EmptyZone {
                zone: Zone::Library,
                action: "shuffle",
            });
        }
        self.library.shuffle(rng);
        None
    }

    /// Put `cards` on the library bottom, then shuffle the whole library
    pub fn oracle_etb(&mut self, cards: &[Card], rng: &mut impl Rng) {
        for card in cards {
            self.library.push_bottom(card.clone());
        }
        self.library.shuffle(rng);
    }

    /// Hand then graveyard into the library, shuffle, draw up to `draw`
    ///
    /// Never fails: with fewer than `draw` cards left it draws them all.
    /// Returns the number of cards drawn.
    pub fn timetwister(&mut self, draw: usize, rng: &mut impl Rng) -> usize {
        for card in self.hand.take_all() {
            self.library.push_bottom(card);
        }
        for card in self.graveyard.take_all() {
            self.library.push_bottom(card);
        }
        self.library.shuffle(rng);
        self.draw_up_to(draw)
    }

    /// Move the graveyard onto exile one card at a time
    ///
    /// Each step takes the graveyard's current top and puts it on exile's
    /// current top. Returns the number of cards moved.
    pub fn exile_graveyard(&mut self) -> usize {
        let mut moved = 0;
        while let Ok(card) = self.graveyard.draw_top() {
            self.exile.push_top(card);
            moved += 1;
        }
        moved
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
