//! Table actions
//!
//! The closed set of things a user gesture can ask the table to do, plus the
//! text form the CLI reads them in.

use crate::error::GoldfishWarning;
use crate::game::{ScryDestination, ScryKind};
use crate::zones::{Zone, ZonePosition};
use crate::{GoldfishError, Result};
use std::fmt;
use std::str::FromStr;

/// A request to move one card between (or within) zones
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardMove {
    pub from: Zone,
    pub index: usize,
    pub to: Zone,
    pub position: ZonePosition,
}

impl fmt::Display for CardMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let position = match self.position {
            ZonePosition::Top => "top",
            ZonePosition::Bottom => "bottom",
        };
        write!(f, "{}[{}] -> {} {}", self.from, self.index, self.to, position)
    }
}

/// Everything the table can be asked to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableAction {
    /// Clear all zones and refill the library with placeholders
    Initialize,
    Draw(usize),
    ShuffleLibrary,
    /// Add the power set to the library and shuffle
    OracleEtb,
    /// Hand and graveyard into library, shuffle, draw seven
    Timetwister,
    ExileGraveyard,
    MoveCard(CardMove),
    BeginScry(ScryKind, usize),
    AssignScry {
        slot: usize,
        destination: ScryDestination,
    },
    CommitScry,
    CancelScry,
}

impl TableAction {
    /// Short name used to tag log lines
    pub fn name(&self) -> &'static str {
        match self {
            TableAction::Initialize => "initialize",
            TableAction::Draw(_) => "draw",
            TableAction::ShuffleLibrary => "shuffle",
            TableAction::OracleEtb => "oracle-etb",
            TableAction::Timetwister => "timetwister",
            TableAction::ExileGraveyard => "exile-graveyard",
            TableAction::MoveCard(_) => "move",
            TableAction::BeginScry(kind, _) => kind.name(),
            TableAction::AssignScry { .. } => "assign",
            TableAction::CommitScry => "confirm",
            TableAction::CancelScry => "cancel",
        }
    }

    /// Whether the action is allowed while a scry or surveil is staged
    pub fn works_on_staged_cards(&self) -> bool {
        matches!(
            self,
            TableAction::AssignScry { .. } | TableAction::CommitScry | TableAction::CancelScry
        )
    }
}

/// What happened when an action was applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// State changed as requested
    Applied,
    /// Nothing changed; the warning says why
    Skipped(GoldfishWarning),
}

fn parse_count(word: Option<&str>, action: &str) -> Result<usize> {
    let word = word.ok_or_else(|| GoldfishError::ParseError(format!("{action} needs a number")))?;
    word.parse::<usize>()
        .map_err(|_| GoldfishError::ParseError(format!("invalid number '{word}' for {action}")))
}

impl FromStr for TableAction {
    type Err = GoldfishError;

    /// Parse commands such as `draw 3`, `scry 2`, `top 0`, `move hand 1 battlefield`
    fn from_str(s: &str) -> Result<Self> {
        let mut words = s.split_whitespace();
        let verb = words
            .next()
            .ok_or_else(|| GoldfishError::ParseError("empty command".to_string()))?
            .to_lowercase();

        let action = match verb.as_str() {
            "draw" => match words.next() {
                Some(word) => TableAction::Draw(parse_count(Some(word), "draw")?),
                None => TableAction::Draw(1),
            },
            "shuffle" => TableAction::ShuffleLibrary,
            "oracle" | "oracle-etb" => TableAction::OracleEtb,
            "timetwister" | "twister" => TableAction::Timetwister,
            "exile-graveyard" | "exile-gy" => TableAction::ExileGraveyard,
            "scry" => TableAction::BeginScry(ScryKind::Scry, parse_count(words.next(), "scry")?),
            "surveil" => {
                TableAction::BeginScry(ScryKind::Surveil, parse_count(words.next(), "surveil")?)
            }
            "top" | "bottom" | "unassign" => TableAction::AssignScry {
                slot: parse_count(words.next(), &verb)?,
                destination: verb.parse()?,
            },
            "confirm" | "done" => TableAction::CommitScry,
            "cancel" => TableAction::CancelScry,
            "move" => {
                let from: Zone = words
                    .next()
                    .ok_or_else(|| GoldfishError::ParseError("move needs a source zone".to_string()))?
                    .parse()?;
                let index = parse_count(words.next(), "move")?;
                let to: Zone = words
                    .next()
                    .ok_or_else(|| GoldfishError::ParseError("move needs a target zone".to_string()))?
                    .parse()?;
                let position = match words.next().map(str::to_lowercase).as_deref() {
                    None | Some("top") => ZonePosition::Top,
                    Some("bottom") => ZonePosition::Bottom,
                    Some(other) => {
                        return Err(GoldfishError::ParseError(format!(
                            "invalid position '{other}' (expected: top, bottom)"
                        )))
                    }
                };
                TableAction::MoveCard(CardMove {
                    from,
                    index,
                    to,
                    position,
                })
            }
            _ => {
                return Err(GoldfishError::ParseError(format!("unknown command '{verb}'")));
            }
        };

        if let Some(extra) = words.next() {
            return Err(GoldfishError::ParseError(format!(
                "unexpected '{extra}' after {verb}"
            )));
        }
        Ok(action)
    }
}
