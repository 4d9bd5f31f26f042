//! Table controller
//!
//! `Table` owns everything a play session mutates: the zones, the RNG, and
//! the scry or surveil in progress. Every user gesture arrives as one
//! `TableAction` and runs to completion before the next.

use crate::core::Card;
use crate::game::{
    CardMove, GameState, Outcome, ScryDestination, ScryKind, ScryTransaction, TableAction,
    TableConfig, TableLogger, VerbosityLevel, ZoneSnapshot,
};
use crate::loader::CardCatalog;
use crate::zones::{CardZone, Zone};
use crate::{GoldfishError, Result};
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;

/// A single-player table
pub struct Table {
    state: GameState,
    catalog: CardCatalog,
    config: TableConfig,
    seed: u64,
    rng: ChaCha12Rng,
    pending: Option<ScryTransaction>,
    pub logger: TableLogger,
}

impl Table {
    /// Fresh table with an initialized library
    pub fn new(catalog: CardCatalog, config: TableConfig, logger: TableLogger) -> Result<Self> {
        let mut table = Self::with_state(catalog, config, logger, GameState::new())?;
        table.apply(TableAction::Initialize)?;
        Ok(table)
    }

    /// Table holding a previously saved state
    pub fn from_snapshot(
        catalog: CardCatalog,
        config: TableConfig,
        logger: TableLogger,
        snapshot: &ZoneSnapshot,
    ) -> Result<Self> {
        let state = snapshot.restore(&catalog)?;
        let table = Self::with_state(catalog, config, logger, state)?;
        table.logger.normal(&format!(
            "Restored table ({} cards, library {})",
            table.state.total_cards(),
            table.state.library.len()
        ));
        Ok(table)
    }

    fn with_state(
        catalog: CardCatalog,
        config: TableConfig,
        logger: TableLogger,
        state: GameState,
    ) -> Result<Self> {
        config.validate(&catalog)?;
        let seed = config.seed.unwrap_or_else(rand::random);
        logger.verbose(&format!("RNG seed: {seed}"));
        Ok(Table {
            state,
            catalog,
            config,
            seed,
            rng: ChaCha12Rng::seed_from_u64(seed),
            pending: None,
            logger,
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn zone(&self, zone: Zone) -> &CardZone {
        self.state.zone(zone)
    }

    pub fn catalog(&self) -> &CardCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Seed the RNG started from
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// The scry or surveil waiting to be confirmed, if any
    pub fn pending_scry(&self) -> Option<&ScryTransaction> {
        self.pending.as_ref()
    }

    /// Cards on the table, counting any staged by a pending scry
    pub fn card_count(&self) -> usize {
        self.state.total_cards() + self.pending.as_ref().map_or(0, ScryTransaction::len)
    }

    /// Display name of a card
    pub fn card_name<'a>(&'a self, card: &'a Card) -> &'a str {
        self.catalog.display_name(card.id())
    }

    /// Persistable view of the table
    ///
    /// Cards staged by a pending scry are recorded back on top of the
    /// library in their original order.
    pub fn snapshot(&self) -> ZoneSnapshot {
        match &self.pending {
            Some(txn) => {
                let mut state = self.state.clone();
                txn.clone().cancel(&mut state);
                ZoneSnapshot::capture(&state)
            }
            None => ZoneSnapshot::capture(&self.state),
        }
    }

    /// Drop any pending scry and start over with a fresh library
    pub fn restart(&mut self) -> Result<()> {
        if let Some(txn) = self.pending.take() {
            self.logger.verbose(&format!("Discarded pending {}", txn.kind()));
        }
        self.apply(TableAction::Initialize)?;
        Ok(())
    }

    /// Apply one action
    ///
    /// Precondition failures leave the table untouched. While a scry or
    /// surveil is pending only assign, confirm and cancel are accepted.
    pub fn apply(&mut self, action: TableAction) -> Result<Outcome> {
        let blocked_by = self
            .pending
            .as_ref()
            .filter(|_| !action.works_on_staged_cards())
            .map(ScryTransaction::kind);
        let result = match blocked_by {
            Some(kind) => Err(GoldfishError::ScryPending(kind)),
            None => self.dispatch(action),
        };
        match &result {
            Ok(Outcome::Skipped(warning)) => {
                self.logger
                    .event(VerbosityLevel::Minimal, action.name(), &warning.to_string())
            }
            Err(err) => self
                .logger
                .event(VerbosityLevel::Minimal, action.name(), &err.to_string()),
            Ok(Outcome::Applied) => {}
        }
        result
    }

    fn dispatch(&mut self, action: TableAction) -> Result<Outcome> {
        match action {
            TableAction::Initialize => self.initialize(),
            TableAction::Draw(count) => self.draw(count),
            TableAction::ShuffleLibrary => return Ok(self.shuffle_library()),
            TableAction::OracleEtb => self.oracle_etb(),
            TableAction::Timetwister => self.timetwister(),
            TableAction::ExileGraveyard => self.exile_graveyard(),
            TableAction::MoveCard(mv) => self.move_card(mv),
            TableAction::BeginScry(kind, count) => self.begin_scry(kind, count),
            TableAction::AssignScry { slot, destination } => self.assign_scry(slot, destination),
            TableAction::CommitScry => self.commit_scry(),
            TableAction::CancelScry => self.cancel_scry(),
        }?;
        Ok(Outcome::Applied)
    }

    fn log_action(&self, action: &str, message: &str) {
        self.logger.event(VerbosityLevel::Normal, action, message);
    }

    fn initialize(&mut self) -> Result<()> {
        let placeholder = Card::new(self.config.placeholder.clone(), &self.catalog)?;
        self.state.initialize(&placeholder, self.config.library_size);
        self.log_action(
            "initialize",
            &format!(
                "Library reset to {} x {}",
                self.config.library_size,
                self.catalog.display_name(placeholder.id())
            ),
        );
        Ok(())
    }

    fn draw(&mut self, count: usize) -> Result<()> {
        self.state.draw(count)?;
        self.log_action(
            "draw",
            &format!(
                "Drew {count} card(s) (library {}, hand {})",
                self.state.library.len(),
                self.state.hand.len()
            ),
        );
        Ok(())
    }

    fn shuffle_library(&mut self) -> Outcome {
        match self.state.shuffle_library(&mut self.rng) {
            Some(warning) => Outcome::Skipped(warning),
            None => {
                self.log_action(
                    "shuffle",
                    &format!("Shuffled library ({} cards)", self.state.library.len()),
                );
                Outcome::Applied
            }
        }
    }

    fn oracle_etb(&mut self) -> Result<()> {
        let power = self
            .config
            .power_set
            .iter()
            .map(|id| Card::new(id.clone(), &self.catalog))
            .collect::<Result<Vec<_>>>()?;
        self.state.oracle_etb(&power, &mut self.rng);
        self.log_action(
            "oracle-etb",
            &format!(
                "Shuffled {} power cards into library ({} cards)",
                power.len(),
                self.state.library.len()
            ),
        );
        Ok(())
    }

    fn timetwister(&mut self) -> Result<()> {
        let returned = self.state.hand.len() + self.state.graveyard.len();
        let drawn = self.state.timetwister(self.config.twister_draw, &mut self.rng);
        self.log_action(
            "timetwister",
            &format!(
                "Shuffled {returned} card(s) from hand and graveyard into library, drew {drawn}"
            ),
        );
        Ok(())
    }

    fn exile_graveyard(&mut self) -> Result<()> {
        let moved = self.state.exile_graveyard();
        self.log_action("exile-graveyard", &format!("Exiled {moved} card(s) from graveyard"));
        Ok(())
    }

    fn move_card(&mut self, mv: CardMove) -> Result<()> {
        let card = self.state.zone(mv.from).cards().get(mv.index).cloned();
        self.state.move_card(&mv)?;
        if let Some(card) = card {
            self.log_action(
                "move",
                &format!("Moved {} from {} to {}", self.card_name(&card), mv.from, mv.to),
            );
        }
        self.logger.verbose(&format!("  {mv}"));
        Ok(())
    }

    fn begin_scry(&mut self, kind: ScryKind, count: usize) -> Result<()> {
        let txn = ScryTransaction::begin(&mut self.state, kind, count)?;
        self.log_action(kind.name(), &format!("Looking at the top {count} card(s)"));
        for (slot, card) in txn.staged().iter().enumerate() {
            self.logger
                .verbose(&format!("  [{slot}] {}", self.catalog.display_name(card.id())));
        }
        self.pending = Some(txn);
        Ok(())
    }

    fn assign_scry(&mut self, slot: usize, destination: ScryDestination) -> Result<()> {
        let txn = self.pending.as_mut().ok_or(GoldfishError::NoScryPending)?;
        txn.assign(slot, destination)?;
        self.logger.event(
            VerbosityLevel::Verbose,
            "assign",
            &format!("Slot {slot} -> {destination:?}"),
        );
        Ok(())
    }

    fn commit_scry(&mut self) -> Result<()> {
        let txn = self.pending.take().ok_or(GoldfishError::NoScryPending)?;
        let kind = txn.kind();
        let kept = txn.pile(ScryDestination::Top).len();
        let rejected = txn.len() - kept;
        txn.commit(&mut self.state);
        let rejected_to = match kind {
            ScryKind::Scry => "bottom of library",
            ScryKind::Surveil => "graveyard",
        };
        self.log_action(
            "confirm",
            &format!("{kind}: {kept} on top, {rejected} to {rejected_to}"),
        );
        Ok(())
    }

    fn cancel_scry(&mut self) -> Result<()> {
        let txn = self.pending.take().ok_or(GoldfishError::NoScryPending)?;
        let kind = txn.kind();
        let count = txn.len();
        txn.cancel(&mut self.state);
        self.log_action("cancel", &format!("{kind} cancelled, {count} card(s) back on top"));
        Ok(())
    }
}

impl std::fmt::Debug for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Table")
            .field("state", &self.state)
            .field("seed", &self.seed)
            .field("pending", &self.pending)
            .finish()
    }
}
