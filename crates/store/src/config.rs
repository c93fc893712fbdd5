use crate::error::{Error, Result};
use crate::lookup::ValueMatch;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

pub const DEFAULT_DB_FILE: &str = "sqlite_json_array_rowid_arrayid_confusion.db";
pub const DEFAULT_TABLE: &str = "test_sqlite_json_array";
pub const DEFAULT_ROWS: u32 = 10;

#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub db_path: PathBuf,
    pub table: String,
    /// Rows to seed, and the upper bound of the values looked up by each pass.
    pub rows: u32,
    /// Fixed RNG seed for reproducible data; `None` draws from OS entropy.
    pub seed: Option<u64>,
    pub value_match: ValueMatch,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_FILE),
            table: DEFAULT_TABLE.to_string(),
            rows: DEFAULT_ROWS,
            seed: None,
            value_match: ValueMatch::default(),
        }
    }
}

impl StoreConfig {
    pub fn set_db_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.db_path = path.as_ref().to_path_buf();
        self
    }

    pub fn set_table<S: Into<String>>(mut self, table: S) -> Self {
        self.table = table.into();
        self
    }

    pub fn set_rows(mut self, rows: u32) -> Self {
        self.rows = rows;
        self
    }

    pub fn set_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn set_value_match(mut self, value_match: ValueMatch) -> Self {
        self.value_match = value_match;
        self
    }

    /// The store file's presence is what gates seeding.
    pub fn store_exists(&self) -> bool {
        self.db_path.exists()
    }

    /// Values each lookup pass iterates over: `1..=rows`.
    pub fn lookup_values(&self) -> RangeInclusive<i64> {
        1..=i64::from(self.rows)
    }

    /// The table name is spliced into SQL text, so it must be a plain identifier.
    pub fn validate(&self) -> Result<()> {
        if is_identifier(&self.table) {
            Ok(())
        } else {
            Err(Error::InvalidIdentifier(self.table.clone()))
        }
    }
}

/// `[A-Za-z_][A-Za-z0-9_]*`
pub(crate) fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}
