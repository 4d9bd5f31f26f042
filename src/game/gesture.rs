//! Pointer gestures to card moves
//!
//! Input layers (mouse, touch, a terminal prompt) feed `PointerEvent`s into a
//! `DragTracker`; a completed drag comes out as a `CardMove` for the table.
//! Nothing here knows about any particular input device.

use crate::game::actions::CardMove;
use crate::zones::{CardZone, Zone, ZonePosition};

/// How far a pending press may travel before it counts as a scroll
pub const DRAG_SLOP: f32 = 10.0;

/// Card a drag picks up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragSource {
    pub zone: Zone,
    pub index: usize,
}

impl DragSource {
    /// Source for the `stack`-th rendered stack of `zone`
    ///
    /// Library, graveyard and exile render a single pile and always give up
    /// their top card. Hand and battlefield render one stack per card id and
    /// give up the first card of that stack.
    pub fn for_stack(zone: &CardZone, stack: usize) -> Option<DragSource> {
        let index = match zone.zone_type {
            Zone::Library | Zone::Graveyard | Zone::Exile => {
                if stack != 0 || zone.is_empty() {
                    return None;
                }
                0
            }
            Zone::Hand | Zone::Battlefield => zone.groups().get(stack)?.first_index,
        };
        Some(DragSource {
            zone: zone.zone_type,
            index,
        })
    }
}

/// When a press turns into a drag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    /// Mouse: the drag starts at once
    Immediate,
    /// Touch: the drag starts after a hold, so short swipes can scroll
    Hold,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Press {
        source: DragSource,
        activation: Activation,
    },
    /// The hold timer for a `Hold` press fired
    HoldElapsed,
    /// Pointer moved `distance` from where it was pressed
    Moved { distance: f32 },
    /// Pointer is over `target` (or over no zone)
    Hover { target: Option<Zone> },
    /// Pointer lifted, over `target` if it is known
    Release { target: Option<Zone> },
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    /// Pressed, waiting for the hold to elapse
    Pending(DragSource),
    Dragging(DragSource),
}

/// Turns a stream of pointer events into card moves
#[derive(Debug, Clone, Default)]
pub struct DragTracker {
    state: DragState,
    hovered: Option<Zone>,
}

impl DragTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    /// Zone under the pointer while dragging, for highlighting
    pub fn hovered(&self) -> Option<Zone> {
        self.hovered
    }

    /// Feed one event; returns the move a finished drag asks for
    pub fn handle(&mut self, event: PointerEvent) -> Option<CardMove> {
        match (self.state, event) {
            (_, PointerEvent::Press { source, activation }) => {
                self.hovered = None;
                self.state = match activation {
                    Activation::Immediate => DragState::Dragging(source),
                    Activation::Hold => DragState::Pending(source),
                };
                None
            }
            (DragState::Pending(source), PointerEvent::HoldElapsed) => {
                self.state = DragState::Dragging(source);
                None
            }
            (DragState::Pending(_), PointerEvent::Moved { distance }) if distance > DRAG_SLOP => {
                self.reset();
                None
            }
            (DragState::Dragging(_), PointerEvent::Hover { target }) => {
                self.hovered = target;
                None
            }
            (DragState::Dragging(source), PointerEvent::Release { target }) => {
                let target = target.or(self.hovered);
                self.reset();
                target.map(|to| CardMove {
                    from: source.zone,
                    index: source.index,
                    to,
                    position: ZonePosition::Top,
                })
            }
            (_, PointerEvent::Release { .. } | PointerEvent::Cancel) => {
                self.reset();
                None
            }
            _ => None,
        }
    }

    fn reset(&mut self) {
        self.state = DragState::Idle;
        self.hovered = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Card;
    use crate::loader::CardCatalog;

    const HAND_1: DragSource = DragSource {
        zone: Zone::Hand,
        index: 1,
    };

    fn zone_of(zone_type: Zone, cards: &[&str]) -> CardZone {
        let catalog = CardCatalog::builtin();
        let mut zone = CardZone::new(zone_type);
        for id in cards {
            zone.push_bottom(Card::new(*id, &catalog).unwrap());
        }
        zone
    }

    #[test]
    fn test_mouse_drag_produces_move() {
        let mut tracker = DragTracker::new();
        tracker.handle(PointerEvent::Press {
            source: HAND_1,
            activation: Activation::Immediate,
        });
        assert!(tracker.is_dragging());

        let mv = tracker.handle(PointerEvent::Release {
            target: Some(Zone::Battlefield),
        });
        assert_eq!(
            mv,
            Some(CardMove {
                from: Zone::Hand,
                index: 1,
                to: Zone::Battlefield,
                position: ZonePosition::Top,
            })
        );
        assert_eq!(tracker.state(), DragState::Idle);
    }

    #[test]
    fn test_touch_hold_then_drop_on_hovered_zone() {
        let mut tracker = DragTracker::new();
        tracker.handle(PointerEvent::Press {
            source: HAND_1,
            activation: Activation::Hold,
        });
        assert_eq!(tracker.state(), DragState::Pending(HAND_1));

        // small jitter before the hold fires is fine
        tracker.handle(PointerEvent::Moved { distance: 4.0 });
        tracker.handle(PointerEvent::HoldElapsed);
        tracker.handle(PointerEvent::Hover {
            target: Some(Zone::Graveyard),
        });
        assert_eq!(tracker.hovered(), Some(Zone::Graveyard));

        let mv = tracker.handle(PointerEvent::Release { target: None }).unwrap();
        assert_eq!(mv.to, Zone::Graveyard);
    }

    #[test]
    fn test_touch_swipe_cancels() {
        let mut tracker = DragTracker::new();
        tracker.handle(PointerEvent::Press {
            source: HAND_1,
            activation: Activation::Hold,
        });
        tracker.handle(PointerEvent::Moved { distance: 25.0 });
        assert_eq!(tracker.state(), DragState::Idle);

        // a late timer fire does not revive the drag
        tracker.handle(PointerEvent::HoldElapsed);
        assert_eq!(tracker.handle(PointerEvent::Release { target: Some(Zone::Exile) }), None);
    }

    #[test]
    fn test_release_outside_zones() {
        let mut tracker = DragTracker::new();
        tracker.handle(PointerEvent::Press {
            source: HAND_1,
            activation: Activation::Immediate,
        });
        tracker.handle(PointerEvent::Hover { target: None });
        assert_eq!(tracker.handle(PointerEvent::Release { target: None }), None);
        assert_eq!(tracker.state(), DragState::Idle);
    }

    #[test]
    fn test_cancel_resets() {
        let mut tracker = DragTracker::new();
        tracker.handle(PointerEvent::Press {
            source: HAND_1,
            activation: Activation::Immediate,
        });
        tracker.handle(PointerEvent::Cancel);
        assert!(!tracker.is_dragging());
    }

    #[test]
    fn test_drag_sources() {
        let hand = zone_of(Zone::Hand, &["mox-jet", "mox-ruby", "mox-jet", "time-walk"]);
        assert_eq!(DragSource::for_stack(&hand, 1).unwrap().index, 1);
        assert_eq!(DragSource::for_stack(&hand, 2).unwrap().index, 3);
        assert_eq!(DragSource::for_stack(&hand, 3), None);

        let graveyard = zone_of(Zone::Graveyard, &["mox-jet", "time-walk"]);
        assert_eq!(
            DragSource::for_stack(&graveyard, 0),
            Some(DragSource {
                zone: Zone::Graveyard,
                index: 0
            })
        );
        assert_eq!(DragSource::for_stack(&graveyard, 1), None);

        let library = CardZone::new(Zone::Library);
        assert_eq!(DragSource::for_stack(&library, 0), None);
    }
}
