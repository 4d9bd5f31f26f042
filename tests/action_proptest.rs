//! Property tests over random action sequences
//!
//! Whatever the user does, no card is created or lost, failed actions leave
//! the table untouched, and every reachable state survives a save/load.

use mtg_goldfish::{
    game::{
        CardMove, Outcome, ScryDestination, ScryKind, Table, TableAction, TableConfig,
        TableLogger, VerbosityLevel, ZoneSnapshot,
    },
    loader::CardCatalog,
    zones::{Zone, ZonePosition},
};
use proptest::prelude::*;

fn zone_strategy() -> impl Strategy<Value = Zone> {
    prop::sample::select(Zone::ALL.to_vec())
}

fn action_strategy() -> impl Strategy<Value = TableAction> {
    let scry_kind = prop_oneof![Just(ScryKind::Scry), Just(ScryKind::Surveil)];
    let destination = prop_oneof![
        Just(ScryDestination::Top),
        Just(ScryDestination::Bottom),
        Just(ScryDestination::Unassigned),
    ];
    let position = prop_oneof![Just(ZonePosition::Top), Just(ZonePosition::Bottom)];

    prop_oneof![
        (0usize..12).prop_map(TableAction::Draw),
        Just(TableAction::ShuffleLibrary),
        Just(TableAction::OracleEtb),
        Just(TableAction::Timetwister),
        Just(TableAction::ExileGraveyard),
        (zone_strategy(), 0usize..10, zone_strategy(), position).prop_map(
            |(from, index, to, position)| {
                TableAction::MoveCard(CardMove {
                    from,
                    index,
                    to,
                    position,
                })
            }
        ),
        (scry_kind, 0usize..6).prop_map(|(kind, n)| TableAction::BeginScry(kind, n)),
        (0usize..6, destination)
            .prop_map(|(slot, destination)| TableAction::AssignScry { slot, destination }),
        Just(TableAction::CommitScry),
        Just(TableAction::CancelScry),
    ]
}

fn table(seed: u64) -> Table {
    let mut logger = TableLogger::with_verbosity(VerbosityLevel::Silent);
    logger.enable_capture();
    Table::new(CardCatalog::builtin(), TableConfig::default().with_seed(seed), logger).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn cards_are_conserved(seed in any::<u64>(), actions in prop::collection::vec(action_strategy(), 1..60)) {
        let mut table = table(seed);
        let mut expected = 99;

        for action in actions {
            let before = table.state().clone();
            let pending_before = table.pending_scry().cloned();
            match table.apply(action) {
                Ok(Outcome::Applied) if action == TableAction::OracleEtb => expected += 9,
                Ok(_) => {}
                Err(_) => {
                    prop_assert_eq!(table.state(), &before);
                    prop_assert_eq!(table.pending_scry(), pending_before.as_ref());
                }
            }
            prop_assert_eq!(table.card_count(), expected);
        }
    }

    #[test]
    fn snapshots_round_trip(seed in any::<u64>(), actions in prop::collection::vec(action_strategy(), 1..40)) {
        let mut table = table(seed);
        for action in actions {
            let _ = table.apply(action);
        }

        let snapshot = table.snapshot();
        prop_assert_eq!(snapshot.total_cards(), table.card_count());

        let json = snapshot.to_json().unwrap();
        let restored = ZoneSnapshot::from_json(&json).unwrap().restore(table.catalog()).unwrap();
        prop_assert_eq!(ZoneSnapshot::capture(&restored), snapshot);
        if table.pending_scry().is_none() {
            prop_assert_eq!(&restored, table.state());
        }
    }
}
