pub mod sqlite;

use serde_json::{Map, Value};
use std::collections::HashSet;
use std::path::Path;

/// A result row read by column name.
pub type AssocRow = Map<String, Value>;

#[derive(Clone, Debug, Default)]
pub struct QueryResult {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>, // row-major
}

impl QueryResult {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Read every row as a name -> value map, left to right. A column whose
    /// name was already seen overwrites the earlier value but keeps its slot,
    /// which is how `json_each.id` ends up in place of the table's `id`.
    pub fn assoc_rows(&self) -> Vec<AssocRow> {
        self.rows
            .iter()
            .map(|row| {
                let mut assoc = Map::with_capacity(self.columns.len());
                for (name, value) in self.columns.iter().zip(row) {
                    assoc.insert(name.clone(), value.clone());
                }
                assoc
            })
            .collect()
    }

    /// Column names that appear more than once in the select list.
    pub fn shadowed_columns(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut shadowed: Vec<&str> = Vec::new();
        for name in &self.columns {
            if !seen.insert(name.as_str()) && !shadowed.contains(&name.as_str()) {
                shadowed.push(name);
            }
        }
        shadowed
    }
}

pub trait SqliteDriver {
    type Conn;
    fn open(path: &Path) -> Result<Self::Conn, rusqlite::Error>;
    fn open_in_memory() -> Result<Self::Conn, rusqlite::Error>;
    fn execute(conn: &Self::Conn, sql: &str, params: &[Value]) -> Result<usize, rusqlite::Error>;
    fn query(
        conn: &Self::Conn,
        sql: &str,
        params: &[Value],
    ) -> Result<QueryResult, rusqlite::Error>;
    fn last_insert_rowid(conn: &Self::Conn) -> i64;
}
