//! Table state, actions and the session around them

pub mod actions;
pub mod config;
pub mod gesture;
pub mod logger;
pub mod menu;
pub mod scry;
pub mod session;
pub mod snapshot;
pub mod state;
pub mod table;

pub use actions::{CardMove, Outcome, TableAction};
pub use config::TableConfig;
pub use gesture::{Activation, DragSource, DragState, DragTracker, PointerEvent, DRAG_SLOP};
pub use logger::{LogEntry, OutputFormat, OutputMode, TableLogger, VerbosityLevel};
pub use menu::{default_menu, MenuAction, MenuCommand, MenuItem};
pub use scry::{ScryDestination, ScryKind, ScryTransaction};
pub use session::Session;
pub use snapshot::{FileStore, MemoryStore, SnapshotStore, ZoneSnapshot};
pub use state::GameState;
pub use table::Table;
