//! Overflow menu
//!
//! Menu entries name their action by key. The keys form a closed enum, so an
//! unknown key fails at parse time instead of silently doing nothing.

use crate::game::{ScryKind, TableAction};
use crate::zones::Zone;
use crate::{GoldfishError, Result};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuAction {
    Restart,
    OracleEtb,
    ShuffleLibrary,
    View(Zone),
    Timetwister,
    Scry,
    Surveil,
    Draw,
    ExileGraveyard,
}

/// What the caller should do once a menu entry is picked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    /// Ask for confirmation, then restart the session
    Restart,
    /// Show a zone's contents
    View(Zone),
    Apply(TableAction),
}

impl MenuAction {
    pub fn key(self) -> &'static str {
        match self {
            MenuAction::Restart => "restart",
            MenuAction::OracleEtb => "oracleETB",
            MenuAction::ShuffleLibrary => "shuffleLibrary",
            MenuAction::View(Zone::Library) => "viewLibrary",
            MenuAction::View(Zone::Graveyard) => "viewGraveyard",
            MenuAction::View(Zone::Exile) => "viewExile",
            MenuAction::View(Zone::Hand) => "viewHand",
            MenuAction::View(Zone::Battlefield) => "viewBattlefield",
            MenuAction::Timetwister => "timetwister",
            MenuAction::Scry => "scry",
            MenuAction::Surveil => "surveil",
            MenuAction::Draw => "draw",
            MenuAction::ExileGraveyard => "exileGraveyard",
        }
    }

    /// Scry, surveil and draw ask the user for a count first
    pub fn needs_count(self) -> bool {
        matches!(self, MenuAction::Scry | MenuAction::Surveil | MenuAction::Draw)
    }

    pub fn resolve(self, count: Option<usize>) -> Result<MenuCommand> {
        let counted = |build: fn(usize) -> TableAction| {
            count
                .map(|n| MenuCommand::Apply(build(n)))
                .ok_or_else(|| GoldfishError::ParseError(format!("{} needs a number", self.key())))
        };
        match self {
            MenuAction::Restart => Ok(MenuCommand::Restart),
            MenuAction::View(zone) => Ok(MenuCommand::View(zone)),
            MenuAction::OracleEtb => Ok(MenuCommand::Apply(TableAction::OracleEtb)),
            MenuAction::ShuffleLibrary => Ok(MenuCommand::Apply(TableAction::ShuffleLibrary)),
            MenuAction::Timetwister => Ok(MenuCommand::Apply(TableAction::Timetwister)),
            MenuAction::ExileGraveyard => Ok(MenuCommand::Apply(TableAction::ExileGraveyard)),
            MenuAction::Scry => counted(|n| TableAction::BeginScry(ScryKind::Scry, n)),
            MenuAction::Surveil => counted(|n| TableAction::BeginScry(ScryKind::Surveil, n)),
            MenuAction::Draw => counted(TableAction::Draw),
        }
    }
}

impl fmt::Display for MenuAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for MenuAction {
    type Err = GoldfishError;

    fn from_str(s: &str) -> Result<Self> {
        let action = match s {
            "restart" => MenuAction::Restart,
            "oracleETB" => MenuAction::OracleEtb,
            "shuffleLibrary" => MenuAction::ShuffleLibrary,
            "viewLibrary" => MenuAction::View(Zone::Library),
            "viewGraveyard" => MenuAction::View(Zone::Graveyard),
            "viewExile" => MenuAction::View(Zone::Exile),
            "viewHand" => MenuAction::View(Zone::Hand),
            "viewBattlefield" => MenuAction::View(Zone::Battlefield),
            "timetwister" => MenuAction::Timetwister,
            "scry" => MenuAction::Scry,
            "surveil" => MenuAction::Surveil,
            "draw" => MenuAction::Draw,
            "exileGraveyard" => MenuAction::ExileGraveyard,
            _ => return Err(GoldfishError::ParseError(format!("unknown menu action '{s}'"))),
        };
        Ok(action)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub id: String,
    pub label: String,
    pub action: MenuAction,
}

impl MenuItem {
    pub fn new(id: &str, label: &str, action: MenuAction) -> Self {
        MenuItem {
            id: id.to_string(),
            label: label.to_string(),
            action,
        }
    }
}

/// Menu shown when no menu configuration is supplied
pub fn default_menu() -> Vec<MenuItem> {
    vec![
        MenuItem::new("restart", "Restart Game", MenuAction::Restart),
        MenuItem::new("oracle-etb", "Oracle ETB Effect", MenuAction::OracleEtb),
        MenuItem::new("shuffle-library", "Shuffle Library", MenuAction::ShuffleLibrary),
        MenuItem::new("timetwister", "Timetwister", MenuAction::Timetwister),
        MenuItem::new("scry", "Scry X", MenuAction::Scry),
        MenuItem::new("surveil", "Surveil X", MenuAction::Surveil),
        MenuItem::new("draw", "Draw X", MenuAction::Draw),
        MenuItem::new("exile-graveyard", "Exile Graveyard", MenuAction::ExileGraveyard),
    ]
}
