//! Play session: a table plus where its state is kept
//!
//! The session saves after every action. Load problems never stop a session
//! from starting; it logs them and deals a fresh table instead.

use crate::game::{
    Outcome, SnapshotStore, Table, TableAction, TableConfig, TableLogger, ZoneSnapshot,
};
use crate::loader::CardCatalog;
use crate::{GoldfishError, Result};

pub struct Session {
    table: Table,
    store: Box<dyn SnapshotStore>,
}

impl Session {
    /// Resume the stored table, or start a fresh one if it can't be loaded
    ///
    /// A missing, unreadable or unparseable snapshot, or one naming cards the
    /// catalog lacks, all fall back to a fresh table. Configuration errors
    /// still fail.
    pub fn open(
        catalog: CardCatalog,
        config: TableConfig,
        logger: TableLogger,
        store: Box<dyn SnapshotStore>,
    ) -> Result<Self> {
        config.validate(&catalog)?;

        let loaded = store
            .load()
            .and_then(|blob| ZoneSnapshot::from_json(&blob))
            .and_then(|snapshot| {
                Table::from_snapshot(catalog.clone(), config.clone(), logger.clone(), &snapshot)
            });

        let table = match loaded {
            Ok(table) => table,
            Err(GoldfishError::NotFound) => {
                logger.normal("No saved table, dealing a fresh one");
                Table::new(catalog, config, logger)?
            }
            Err(err) => {
                logger.minimal(&format!("Could not restore saved table ({err}); starting fresh"));
                Table::new(catalog, config, logger)?
            }
        };

        let mut session = Session { table, store };
        session.save();
        Ok(session)
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut Table {
        &mut self.table
    }

    pub fn store(&self) -> &dyn SnapshotStore {
        self.store.as_ref()
    }

    /// Apply an action, then persist the result
    ///
    /// Saving happens even when the action fails so the store always matches
    /// what the user sees; a failed save is logged and otherwise ignored.
    pub fn dispatch(&mut self, action: TableAction) -> Result<Outcome> {
        let outcome = self.table.apply(action);
        self.save();
        outcome
    }

    /// Forget the stored table and deal a fresh one
    ///
    /// Confirming with the user is the caller's job.
    pub fn restart(&mut self) -> Result<()> {
        if let Err(err) = self.store.clear() {
            self.table
                .logger
                .minimal(&format!("Could not clear saved table: {err}"));
        }
        self.table.restart()?;
        self.save();
        Ok(())
    }

    /// Write the current table to the store
    pub fn save(&mut self) {
        let result = self
            .table
            .snapshot()
            .to_json()
            .and_then(|blob| self.store.save(&blob));
        if let Err(err) = result {
            self.table
                .logger
                .minimal(&format!("Could not save table: {err}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{MemoryStore, VerbosityLevel};
    use crate::zones::Zone;

    fn logger() -> TableLogger {
        let mut logger = TableLogger::with_verbosity(VerbosityLevel::Verbose);
        logger.enable_capture();
        logger
    }

    fn open(store: MemoryStore) -> Session {
        Session::open(
            CardCatalog::builtin(),
            TableConfig::default().with_seed(11),
            logger(),
            Box::new(store),
        )
        .unwrap()
    }

    /// Store that refuses every write
    struct ReadOnlyStore;

    impl SnapshotStore for ReadOnlyStore {
        fn load(&self) -> Result<String> {
            Err(GoldfishError::NotFound)
        }

        fn save(&mut self, _blob: &str) -> Result<()> {
            Err(GoldfishError::IoError(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "read-only",
            )))
        }

        fn clear(&mut self) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_open_empty_store_deals_fresh() {
        let session = open(MemoryStore::new());
        assert_eq!(session.table().zone(Zone::Library).len(), 99);
    }

    #[test]
    fn test_open_resumes_saved_table() {
        let blob = r#"{"library":["mox-jet"],"hand":["black-lotus","time-walk"]}"#;
        let session = open(MemoryStore::with_blob(blob));

        let table = session.table();
        assert_eq!(table.zone(Zone::Library).len(), 1);
        assert_eq!(table.zone(Zone::Hand).len(), 2);
        assert!(table.zone(Zone::Exile).is_empty());
    }

    #[test]
    fn test_open_falls_back_on_bad_blob() {
        for blob in ["not json", r#"{"library":["sol-ring"]}"#] {
            let session = open(MemoryStore::with_blob(blob));
            assert_eq!(session.table().card_count(), 99);
            let logs = session.table().logger.logs();
            assert!(logs.iter().any(|e| e.message.starts_with("Could not restore saved table")));
        }
    }

    #[test]
    fn test_save_failure_is_not_fatal() {
        let mut session = Session::open(
            CardCatalog::builtin(),
            TableConfig::default(),
            logger(),
            Box::new(ReadOnlyStore),
        )
        .unwrap();

        session.dispatch(TableAction::Draw(2)).unwrap();

        assert_eq!(session.table().zone(Zone::Hand).len(), 2);
        let logs = session.table().logger.logs();
        assert!(logs.iter().any(|e| e.message == "Could not save table: IO error: read-only"));
    }

    #[test]
    fn test_restart_resets() {
        let mut session = open(MemoryStore::new());
        session.dispatch(TableAction::OracleEtb).unwrap();
        session.dispatch(TableAction::Draw(7)).unwrap();

        session.restart().unwrap();

        let table = session.table();
        assert_eq!(table.zone(Zone::Library).len(), 99);
        assert_eq!(table.card_count(), 99);

        let saved = ZoneSnapshot::from_json(&session.store().load().unwrap()).unwrap();
        assert_eq!(saved.total_cards(), 99);
        assert!(saved.hand.is_empty());
    }
}
