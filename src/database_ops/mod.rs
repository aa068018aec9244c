//! SQLite destination: connection handle, schema and the reload transaction.
pub mod db;
pub mod loader;
pub mod schema;

pub use db::{Db, DbOptions};
pub use loader::{load, reconcile_games, GameRow, LoadSummary};
