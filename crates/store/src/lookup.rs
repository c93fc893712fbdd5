//! SQL for the four lookup passes.
//!
//! Every array-match pass joins the table with `json_each(<table>.entries)`.
//! `json_each()` brings columns of its own (`key`, `value`, `type`, `atom`,
//! `id`, `parent`, `fullkey`, `path`), so with `SELECT *` the result carries
//! two columns named `id`: the table's row id first, the element id last.

use crate::projection::Projection;
use serde_json::Value;

/// How `json_each.value` is compared against the looked-up value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ValueMatch {
    /// `json_each.value LIKE ?`: text pattern matching, the comparison the
    /// demonstration was written with. Not numeric equality.
    #[default]
    Pattern,
    /// `json_each.value = ?` with an integer parameter.
    Exact,
}

impl ValueMatch {
    pub fn predicate(self) -> &'static str {
        match self {
            Self::Pattern => "json_each.value LIKE ?1",
            Self::Exact => "json_each.value = ?1",
        }
    }

    pub fn param(self, value: i64) -> Value {
        match self {
            Self::Pattern => Value::String(value.to_string()),
            Self::Exact => Value::from(value),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LookupKind {
    /// `WHERE id = ?`; no `json_each()`, so `id` is the row id.
    Direct,
    /// `SELECT *` over the join; `id` is the element id.
    Naive,
    /// Row id re-aliased as `rowid`.
    Corrected,
    /// Like `Corrected`, with `SELECT DISTINCT`.
    CorrectedDistinct,
}

impl LookupKind {
    pub const ALL: [LookupKind; 4] = [
        LookupKind::Direct,
        LookupKind::Naive,
        LookupKind::Corrected,
        LookupKind::CorrectedDistinct,
    ];

    pub fn header(self) -> &'static str {
        match self {
            Self::Direct => "All rows in the table.",
            Self::Naive => {
                "All rows in the table: 'WRONG' id. Displays the json_each() element id, not the row id."
            }
            Self::Corrected => {
                "All rows in the table: uses `rowid` for the row's ID, with array data."
            }
            Self::CorrectedDistinct => {
                "All rows in the table: SELECT DISTINCT with `rowid`. Repeated array values are not collapsed."
            }
        }
    }

    /// The result field that is printed as the row's identifier.
    pub fn id_field(self) -> &'static str {
        match self {
            Self::Direct | Self::Naive => "id",
            Self::Corrected | Self::CorrectedDistinct => "rowid",
        }
    }

    pub fn uses_json_each(self) -> bool {
        !matches!(self, Self::Direct)
    }

    pub fn sql(self, table: &str, value_match: ValueMatch) -> String {
        let predicate = value_match.predicate();
        match self {
            Self::Direct => format!("SELECT * FROM {table} WHERE id = ?1"),
            // `ORDER BY id` binds to the first result column named `id`,
            // which is the table's, not json_each's.
            Self::Naive => format!(
                "SELECT * FROM {table}, json_each({table}.entries) \
                 WHERE {predicate} ORDER BY id ASC"
            ),
            Self::Corrected => format!(
                "SELECT {table}.id AS rowid, {table}.*, * FROM {table}, json_each({table}.entries) \
                 WHERE {predicate} ORDER BY {table}.rowid ASC"
            ),
            Self::CorrectedDistinct => format!(
                "SELECT DISTINCT {table}.id AS rowid, {table}.*, * FROM {table}, json_each({table}.entries) \
                 WHERE {predicate} ORDER BY {table}.rowid ASC"
            ),
        }
    }

    pub fn params(self, value_match: ValueMatch, value: i64) -> Vec<Value> {
        match self {
            Self::Direct => vec![Value::from(value)],
            _ => vec![value_match.param(value)],
        }
    }
}

/// The array-match join with an explicit select list, ordered by row id and
/// then element position.
pub fn projected_sql(projection: &Projection, table: &str, value_match: ValueMatch) -> String {
    format!(
        "SELECT {} FROM {table}, json_each({table}.entries) \
         WHERE {} ORDER BY {table}.rowid ASC, json_each.key ASC",
        projection.select_list(table),
        value_match.predicate(),
    )
}
