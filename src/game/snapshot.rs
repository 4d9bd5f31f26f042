//! Saving and restoring table state
//!
//! A snapshot is the id list of each zone and nothing more; display data
//! comes back from the catalog on restore. Where the blob lives is up to a
//! `SnapshotStore`.

use crate::core::{Card, CardId};
use crate::game::GameState;
use crate::loader::CardCatalog;
use crate::zones::Zone;
use crate::{GoldfishError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Zone contents as card ids, top first
///
/// Zones missing from a stored blob load as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneSnapshot {
    #[serde(default)]
    pub library: Vec<CardId>,
    #[serde(default)]
    pub hand: Vec<CardId>,
    #[serde(default)]
    pub battlefield: Vec<CardId>,
    #[serde(default)]
    pub graveyard: Vec<CardId>,
    #[serde(default)]
    pub exile: Vec<CardId>,
}

impl ZoneSnapshot {
    /// Record the ids in every zone of `state`
    pub fn capture(state: &GameState) -> Self {
        let ids = |zone: Zone| state.zone(zone).ids().cloned().collect::<Vec<_>>();
        ZoneSnapshot {
            library: ids(Zone::Library),
            hand: ids(Zone::Hand),
            battlefield: ids(Zone::Battlefield),
            graveyard: ids(Zone::Graveyard),
            exile: ids(Zone::Exile),
        }
    }

    pub fn zone(&self, zone: Zone) -> &[CardId] {
        match zone {
            Zone::Library => &self.library,
            Zone::Hand => &self.hand,
            Zone::Battlefield => &self.battlefield,
            Zone::Graveyard => &self.graveyard,
            Zone::Exile => &self.exile,
        }
    }

    pub fn total_cards(&self) -> usize {
        Zone::ALL.iter().map(|&z| self.zone(z).len()).sum()
    }

    /// Rebuild a game state, failing with `UnknownCard` on any catalog miss
    pub fn restore(&self, catalog: &CardCatalog) -> Result<GameState> {
        let mut state = GameState::new();
        for zone in Zone::ALL {
            let target = state.zone_mut(zone);
            for id in self.zone(zone) {
                target.push_bottom(Card::new(id.clone(), catalog)?);
            }
        }
        Ok(state)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Somewhere a single snapshot blob can be kept
pub trait SnapshotStore {
    /// Read the stored blob; `NotFound` when nothing has been saved
    fn load(&self) -> Result<String>;

    /// Replace the stored blob
    fn save(&mut self, blob: &str) -> Result<()>;

    /// Forget the stored blob; clearing an empty store is fine
    fn clear(&mut self) -> Result<()>;
}

/// Keeps the blob in a JSON file
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStore for FileStore {
    fn load(&self) -> Result<String> {
        match std::fs::read_to_string(&self.path) {
            Ok(blob) => Ok(blob),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Err(GoldfishError::NotFound),
            Err(err) => Err(err.into()),
        }
    }

    fn save(&mut self, blob: &str) -> Result<()> {
        std::fs::write(&self.path, blob)?;
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Err(err) if err.kind() != std::io::ErrorKind::NotFound => Err(err.into()),
            _ => Ok(()),
        }
    }
}

/// Keeps the blob in memory (tests, `--memory` sessions)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    blob: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `blob`
    pub fn with_blob(blob: impl Into<String>) -> Self {
        MemoryStore {
            blob: Some(blob.into()),
        }
    }

    pub fn blob(&self) -> Option<&str> {
        self.blob.as_deref()
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self) -> Result<String> {
        self.blob.clone().ok_or(GoldfishError::NotFound)
    }

    fn save(&mut self, blob: &str) -> Result<()> {
        self.blob = Some(blob.to_string());
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.blob = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_state() -> GameState {
        let catalog = CardCatalog::builtin();
        let mut state = GameState::new();
        for (zone, id) in [
            (Zone::Library, "placeholder"),
            (Zone::Library, "mox-jet"),
            (Zone::Hand, "black-lotus"),
            (Zone::Battlefield, "mox-ruby"),
            (Zone::Graveyard, "time-walk"),
            (Zone::Exile, "ancestral-recall"),
        ] {
            state.zone_mut(zone).push_bottom(Card::new(id, &catalog).unwrap());
        }
        state
    }

    #[test]
    fn test_capture_and_restore() {
        let state = sample_state();
        let snapshot = ZoneSnapshot::capture(&state);

        assert_eq!(snapshot.total_cards(), 6);
        assert_eq!(snapshot.library, vec![CardId::new("placeholder"), CardId::new("mox-jet")]);

        let restored = snapshot.restore(&CardCatalog::builtin()).unwrap();
        assert_eq!(restored, state);
    }

    #[test]
    fn test_json_layout() {
        let snapshot = ZoneSnapshot::capture(&sample_state());
        let json = snapshot.to_json().unwrap();

        assert!(json.contains(r#""library":["placeholder","mox-jet"]"#));
        assert!(json.contains(r#""exile":["ancestral-recall"]"#));
        assert_eq!(ZoneSnapshot::from_json(&json).unwrap(), snapshot);
    }

    #[test]
    fn test_missing_zones_default_empty() {
        let snapshot = ZoneSnapshot::from_json(r#"{"hand":["mox-jet"]}"#).unwrap();
        assert!(snapshot.library.is_empty());
        assert_eq!(snapshot.hand.len(), 1);
    }

    #[test]
    fn test_restore_unknown_card() {
        let snapshot = ZoneSnapshot::from_json(r#"{"library":["sol-ring"]}"#).unwrap();
        let err = snapshot.restore(&CardCatalog::builtin()).unwrap_err();
        assert!(matches!(err, GoldfishError::UnknownCard(ref id) if id == "sol-ring"));
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        assert!(matches!(store.load(), Err(GoldfishError::NotFound)));

        store.save("{}").unwrap();
        assert_eq!(store.load().unwrap(), "{}");

        store.clear().unwrap();
        assert!(matches!(store.load(), Err(GoldfishError::NotFound)));
    }

    #[test]
    fn test_file_store() {
        let path = std::env::temp_dir().join(format!("goldfish-store-{}.json", std::process::id()));
        let mut store = FileStore::new(&path);
        store.clear().unwrap();
        assert!(matches!(store.load(), Err(GoldfishError::NotFound)));

        store.save(r#"{"library":[]}"#).unwrap();
        assert_eq!(store.load().unwrap(), r#"{"library":[]}"#);

        store.clear().unwrap();
        store.clear().unwrap();
        assert!(!path.exists());
    }
}
