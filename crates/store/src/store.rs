use crate::config::StoreConfig;
use crate::drivers::sqlite::Driver;
use crate::drivers::{AssocRow, QueryResult, SqliteDriver};
use crate::entries::{Entries, Row};
use crate::error::{Error, Result};
use crate::lookup::{self, LookupKind, ValueMatch};
use crate::projection::{MatchedElement, Projection};
use rusqlite::Connection;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

/// An exclusively owned connection to the demo table. Closed on drop.
pub struct Store {
    conn: Connection,
    table: String,
    value_match: ValueMatch,
}

impl Store {
    pub fn open(config: &StoreConfig) -> Result<Self> {
        config.validate()?;
        let conn = Driver::open(&config.db_path).map_err(|source| Error::Open {
            path: config.db_path.clone(),
            source,
        })?;
        debug!(path = %config.db_path.display(), "opened store");
        Ok(Self::with_conn(conn, config))
    }

    pub fn open_in_memory(config: &StoreConfig) -> Result<Self> {
        config.validate()?;
        let conn = Driver::open_in_memory().map_err(|source| Error::Open {
            path: ":memory:".into(),
            source,
        })?;
        Ok(Self::with_conn(conn, config))
    }

    fn with_conn(conn: Connection, config: &StoreConfig) -> Self {
        Self {
            conn,
            table: config.table.clone(),
            value_match: config.value_match,
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn create_schema(&self) -> Result<()> {
        let sql = format!(
            "CREATE TABLE {} (id INTEGER PRIMARY KEY, entries JSON)",
            self.table
        );
        Driver::execute(&self.conn, &sql, &[]).map_err(Error::Schema)?;
        Ok(())
    }

    /// Insert a row and return the id SQLite assigned to it.
    pub fn insert_entries(&self, entries: &Entries) -> Result<i64> {
        let sql = format!("INSERT INTO {}(entries) VALUES (?1)", self.table);
        Driver::execute(&self.conn, &sql, &[Value::String(entries.to_json())])
            .map_err(Error::insert)?;
        Ok(Driver::last_insert_rowid(&self.conn))
    }

    /// Insert a row with a caller-chosen id.
    pub fn insert_row(&self, row: &Row) -> Result<i64> {
        let sql = format!("INSERT INTO {}(id, entries) VALUES (?1, ?2)", self.table);
        Driver::execute(
            &self.conn,
            &sql,
            &[Value::from(row.id), Value::String(row.entries.to_json())],
        )
        .map_err(Error::insert)?;
        Ok(row.id)
    }

    pub fn count(&self) -> Result<i64> {
        let sql = format!("SELECT COUNT(*) AS n FROM {}", self.table);
        scalar_i64(self.query(&sql, &[])?)
    }

    /// Every row, in id order.
    pub fn rows(&self) -> Result<Vec<Row>> {
        let sql = format!("SELECT id, entries FROM {} ORDER BY id ASC", self.table);
        decode(self.query(&sql, &[])?)
    }

    /// Run one lookup pass for `value` and return the raw result, duplicate
    /// column names included.
    pub fn query_pass(&self, kind: LookupKind, value: i64) -> Result<QueryResult> {
        let sql = kind.sql(&self.table, self.value_match);
        let out = self.query(&sql, &kind.params(self.value_match, value))?;
        debug!(
            ?kind,
            value,
            rows = out.row_count(),
            shadowed = ?out.shadowed_columns(),
            "lookup pass"
        );
        Ok(out)
    }

    /// Run one lookup pass for `value`, reading rows by column name.
    pub fn run_pass(&self, kind: LookupKind, value: i64) -> Result<Vec<AssocRow>> {
        Ok(self.query_pass(kind, value)?.assoc_rows())
    }

    /// The row whose id is `id`, if any.
    pub fn direct(&self, id: i64) -> Result<Option<AssocRow>> {
        Ok(self.run_pass(LookupKind::Direct, id)?.into_iter().next())
    }

    /// `SELECT *` over the `json_each()` join: `id` in each result is the
    /// element id, not the row id.
    pub fn naive_match(&self, value: i64) -> Result<Vec<AssocRow>> {
        self.run_pass(LookupKind::Naive, value)
    }

    /// The row id survives as `rowid`; `id` is still the element id.
    pub fn corrected_match(&self, value: i64) -> Result<Vec<AssocRow>> {
        self.run_pass(LookupKind::Corrected, value)
    }

    /// `SELECT DISTINCT` compares whole result tuples, so a row whose array
    /// repeats `value` is returned once per occurrence.
    pub fn corrected_distinct_match(&self, value: i64) -> Result<Vec<AssocRow>> {
        self.run_pass(LookupKind::CorrectedDistinct, value)
    }

    /// The array-match join with an explicit select list, decoded into `T`.
    pub fn projected_match<T: DeserializeOwned>(
        &self,
        projection: &Projection,
        value: i64,
    ) -> Result<Vec<T>> {
        if projection.is_empty() {
            return Err(Error::EmptyProjection);
        }
        let sql = lookup::projected_sql(projection, &self.table, self.value_match);
        let out = self.query(&sql, &[self.value_match.param(value)])?;
        decode(out)
    }

    pub fn qualified_match(&self, value: i64) -> Result<Vec<MatchedElement>> {
        self.projected_match(&Projection::qualified(), value)
    }

    fn query(&self, sql: &str, params: &[Value]) -> Result<QueryResult> {
        Driver::query(&self.conn, sql, params).map_err(|source| Error::query(sql, source))
    }
}

fn decode<T: DeserializeOwned>(out: QueryResult) -> Result<Vec<T>> {
    out.assoc_rows()
        .into_iter()
        .map(|row| serde_json::from_value(Value::Object(row)).map_err(Error::from))
        .collect()
}

/// The first cell of a single-value result; a missing or non-integer cell is
/// a decode error.
fn scalar_i64(out: QueryResult) -> Result<i64> {
    let cell = out
        .rows
        .into_iter()
        .next()
        .and_then(|r| r.into_iter().next())
        .unwrap_or(Value::Null);
    Ok(serde_json::from_value(cell)?)
}
