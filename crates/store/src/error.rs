use std::path::PathBuf;
use thiserror::Error as ThisError;

///
/// Error
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error("failed to open store {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("failed to create schema: {0}")]
    Schema(#[source] rusqlite::Error),

    /// Insert failure during seeding; `code` is the SQLite extended result code.
    #[error("err: [{code}]: {info}")]
    Insert { code: i32, info: String },

    #[error("query failed: {source} (sql: {sql})")]
    Query {
        sql: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("invalid entries {values:?}: {reason}")]
    InvalidEntries {
        values: Vec<i64>,
        reason: &'static str,
    },

    #[error("invalid identifier: {0:?}")]
    InvalidIdentifier(String),

    #[error("duplicate projection alias: {0}")]
    DuplicateAlias(String),

    #[error("projection selects no columns")]
    EmptyProjection,

    #[error(transparent)]
    Decode(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    /// Map a failed INSERT to [`Error::Insert`], keeping SQLite's code and message.
    pub(crate) fn insert(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(ffi_err, msg) => Self::Insert {
                code: ffi_err.extended_code,
                info: msg.unwrap_or_else(|| ffi_err.to_string()),
            },
            other => Self::Insert {
                code: rusqlite::ffi::SQLITE_ERROR,
                info: other.to_string(),
            },
        }
    }

    pub(crate) fn query(sql: &str, source: rusqlite::Error) -> Self {
        Self::Query {
            sql: sql.to_string(),
            source,
        }
    }
}
