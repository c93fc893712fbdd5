//! jeach_store: a tiny SQLite store used to show how `json_each()` hides a
//! table's row id.
//! - `json_each()` exposes its own `id` column (the element id)
//! - `SELECT *` over `table, json_each(table.entries)` yields two `id` columns
//! - reading rows by column name keeps the last one, so the row id is lost
//!
//! The four lookups in [`lookup`] contrast the naive query with the
//! re-aliased one, and show `SELECT DISTINCT` keeping rows whose array
//! repeats the matched value.

pub mod config;
pub mod drivers;
pub mod entries;
pub mod error;
pub mod lookup;
pub mod projection;
pub mod seed;
pub mod store;

pub use config::StoreConfig;
pub use drivers::{AssocRow, QueryResult};
pub use entries::{Entries, Row};
pub use error::{Error, Result};
pub use lookup::{LookupKind, ValueMatch};
pub use projection::{MatchedElement, Projection, Relation};
pub use seed::{SeedOutcome, seed_if_absent};
pub use store::Store;
