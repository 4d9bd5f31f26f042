//! Zone ordering and bulk action properties
//!
//! Runs the bulk actions against hand-built states and checks card
//! conservation plus the exact orderings each action promises.

use mtg_goldfish::{
    core::{Card, CardId},
    game::{
        GameState, ScryDestination, ScryKind, ScryTransaction, Table, TableAction, TableConfig,
        TableLogger, VerbosityLevel,
    },
    loader::CardCatalog,
    zones::{CardZone, Zone},
    GoldfishError, Result,
};
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;
use similar_asserts::assert_eq;

fn quiet_table(seed: u64) -> Result<Table> {
    let mut logger = TableLogger::with_verbosity(VerbosityLevel::Silent);
    logger.enable_capture();
    Table::new(CardCatalog::builtin(), TableConfig::default().with_seed(seed), logger)
}

fn fill(zone: &mut CardZone, ids: &[&str]) -> Result<()> {
    let catalog = CardCatalog::builtin();
    for id in ids {
        zone.push_bottom(Card::new(*id, &catalog)?);
    }
    Ok(())
}

fn ids(zone: &CardZone) -> Vec<&str> {
    zone.ids().map(CardId::as_str).collect()
}

#[test]
fn test_conservation_across_bulk_actions() -> Result<()> {
    let mut table = quiet_table(1)?;
    assert_eq!(table.card_count(), 99);

    table.apply(TableAction::OracleEtb)?;
    assert_eq!(table.card_count(), 108);

    let actions = [
        "draw 7",
        "move hand 0 battlefield",
        "move hand 0 graveyard",
        "move library 0 exile",
        "timetwister",
        "scry 3",
        "bottom 1",
        "top 2",
        "confirm",
        "surveil 2",
        "top 0",
        "confirm",
        "exile-graveyard",
        "shuffle",
        "move exile 0 library bottom",
    ];
    for command in actions {
        table.apply(command.parse()?)?;
        assert!(table.card_count() == 108, "card lost after '{command}'");
    }
    Ok(())
}

#[test]
fn test_draw_moves_top_cards_in_order() -> Result<()> {
    let mut state = GameState::new();
    fill(&mut state.library, &["mox-jet", "mox-ruby", "time-walk", "black-lotus", "mox-pearl"])?;

    state.draw(2)?;
    state.draw(1)?;

    assert_eq!(ids(&state.hand), vec!["mox-jet", "mox-ruby", "time-walk"]);
    assert_eq!(ids(&state.library), vec!["black-lotus", "mox-pearl"]);
    Ok(())
}

#[test]
fn test_draw_boundaries_leave_state_unchanged() -> Result<()> {
    let mut table = quiet_table(2)?;
    table.apply(TableAction::Draw(90))?;
    let before = table.state().clone();

    for count in [0, 10] {
        let err = table.apply(TableAction::Draw(count)).unwrap_err();
        assert!(matches!(
            err,
            GoldfishError::InvalidCount { requested, available: 9, .. } if requested == count
        ));
        assert_eq!(table.state(), &before);
    }

    table.apply(TableAction::Draw(9))?;
    assert!(table.zone(Zone::Library).is_empty());
    Ok(())
}

#[test]
fn test_timetwister_scenario() -> Result<()> {
    let mut state = GameState::new();
    fill(&mut state.hand, &["mox-jet", "mox-ruby"])?;
    fill(&mut state.graveyard, &["time-walk"])?;
    fill(&mut state.library, &["placeholder"; 10])?;
    let mut rng = ChaCha12Rng::seed_from_u64(99);

    let drawn = state.timetwister(7, &mut rng);

    assert_eq!(drawn, 7);
    assert_eq!(state.hand.len(), 7);
    assert_eq!(state.library.len(), 6);
    assert!(state.graveyard.is_empty());
    let mut all = ids(&state.hand);
    all.extend(ids(&state.library));
    for id in ["mox-jet", "mox-ruby", "time-walk"] {
        assert!(all.iter().filter(|c| **c == id).count() == 1, "{id} not absorbed exactly once");
    }
    Ok(())
}

#[test]
fn test_exile_graveyard_ordering() -> Result<()> {
    let mut state = GameState::new();
    fill(&mut state.graveyard, &["mox-jet", "mox-ruby", "time-walk"])?;

    state.exile_graveyard();

    // repeated take-top / push-top reverses the pile
    assert_eq!(ids(&state.exile), vec!["time-walk", "mox-ruby", "mox-jet"]);
    Ok(())
}

#[test]
fn test_scry_commit_determinism() -> Result<()> {
    let mut state = GameState::new();
    fill(&mut state.library, &["mox-jet", "mox-ruby", "time-walk", "black-lotus", "mox-pearl"])?;

    let mut txn = ScryTransaction::begin(&mut state, ScryKind::Scry, 3)?;
    txn.assign(0, ScryDestination::Top)?;
    txn.assign(1, ScryDestination::Bottom)?;
    txn.commit(&mut state);

    assert_eq!(
        ids(&state.library),
        vec!["mox-jet", "black-lotus", "mox-pearl", "mox-ruby", "time-walk"]
    );
    Ok(())
}

#[test]
fn test_surveil_commit_determinism() -> Result<()> {
    let mut state = GameState::new();
    fill(&mut state.library, &["mox-jet", "mox-ruby", "time-walk", "black-lotus"])?;

    let mut txn = ScryTransaction::begin(&mut state, ScryKind::Surveil, 3)?;
    txn.assign(0, ScryDestination::Top)?;
    txn.assign(1, ScryDestination::Bottom)?;
    txn.commit(&mut state);

    assert_eq!(ids(&state.library), vec!["mox-jet", "black-lotus"]);
    assert_eq!(ids(&state.graveyard), vec!["time-walk", "mox-ruby"]);
    Ok(())
}

#[test]
fn test_scry_whole_library() -> Result<()> {
    let mut table = quiet_table(5)?;
    table.apply(TableAction::Draw(96))?;

    assert!(table.apply(TableAction::BeginScry(ScryKind::Scry, 4)).is_err());
    table.apply(TableAction::BeginScry(ScryKind::Scry, 3))?;
    assert!(table.zone(Zone::Library).is_empty());

    table.apply(TableAction::CommitScry)?;
    assert_eq!(table.zone(Zone::Library).len(), 3);
    Ok(())
}

#[test]
fn test_cancel_restores_library_order() -> Result<()> {
    let mut table = quiet_table(8)?;
    table.apply(TableAction::OracleEtb)?;
    let before = table.state().clone();

    table.apply(TableAction::BeginScry(ScryKind::Surveil, 5))?;
    table.apply("bottom 3".parse()?)?;
    table.apply("top 1".parse()?)?;
    table.apply(TableAction::CancelScry)?;

    assert_eq!(table.state(), &before);
    Ok(())
}
