use super::{QueryResult, SqliteDriver};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use rusqlite::types::{Value as SqlValue, ValueRef};
use rusqlite::{Connection, params_from_iter};
use serde_json::{Number, Value};
use std::path::Path;

pub struct Driver;

impl SqliteDriver for Driver {
    type Conn = Connection;

    fn open(path: &Path) -> Result<Self::Conn, rusqlite::Error> {
        Connection::open(path)
    }

    fn open_in_memory() -> Result<Self::Conn, rusqlite::Error> {
        Connection::open_in_memory()
    }

    fn execute(conn: &Self::Conn, sql: &str, params: &[Value]) -> Result<usize, rusqlite::Error> {
        conn.execute(sql, params_from_iter(params.iter().map(bind_sqlite)))
    }

    fn query(
        conn: &Self::Conn,
        sql: &str,
        params: &[Value],
    ) -> Result<QueryResult, rusqlite::Error> {
        let mut stmt = conn.prepare(sql)?;
        // duplicate names are kept as-is; callers decide how to read them
        let columns: Vec<String> = stmt
            .column_names()
            .into_iter()
            .map(str::to_string)
            .collect();
        let col_len = columns.len();
        let mut rows = stmt.query(params_from_iter(params.iter().map(bind_sqlite)))?;
        let mut out_rows: Vec<Vec<Value>> = Vec::new();
        while let Some(r) = rows.next()? {
            let mut row_vals: Vec<Value> = Vec::with_capacity(col_len);
            for i in 0..col_len {
                row_vals.push(to_json(r.get_ref(i)?));
            }
            out_rows.push(row_vals);
        }
        Ok(QueryResult {
            columns,
            rows: out_rows,
        })
    }

    fn last_insert_rowid(conn: &Self::Conn) -> i64 {
        conn.last_insert_rowid()
    }
}

fn bind_sqlite(v: &Value) -> SqlValue {
    match v {
        Value::Null => SqlValue::Null,
        Value::Bool(b) => SqlValue::Integer(*b as i64),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                SqlValue::Integer(i)
            } else if let Some(u) = n.as_u64() {
                SqlValue::Integer(u as i64)
            } else if let Some(f) = n.as_f64() {
                SqlValue::Real(f)
            } else {
                SqlValue::Null
            }
        }
        Value::String(s) => SqlValue::Text(s.clone()),
        other => SqlValue::Text(other.to_string()),
    }
}

fn to_json(v: ValueRef<'_>) -> Value {
    match v {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::from(i),
        ValueRef::Real(f) => Number::from_f64(f).map_or(Value::Null, Value::Number),
        ValueRef::Text(t) => Value::String(String::from_utf8_lossy(t).into_owned()),
        ValueRef::Blob(b) => Value::String(BASE64.encode(b)),
    }
}
