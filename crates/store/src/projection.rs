//! Typed select lists for the `json_each()` join.
//!
//! A [`Projection`] names the source relation and an output alias for every
//! column, so the row id and the element id can never share a name.

use crate::config::is_identifier;
use crate::entries::Entries;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Relation {
    /// The base table.
    Rows,
    /// `json_each(<table>.entries)`.
    Each,
}

impl Relation {
    fn qualifier(self, table: &str) -> &str {
        match self {
            Self::Rows => table,
            Self::Each => "json_each",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProjectedColumn {
    pub relation: Relation,
    pub column: String,
    pub alias: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Projection {
    columns: Vec<ProjectedColumn>,
}

impl Projection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `relation.column AS alias`. Aliases must be unique.
    pub fn column(mut self, relation: Relation, column: &str, alias: &str) -> Result<Self> {
        for name in [column, alias] {
            if !is_identifier(name) {
                return Err(Error::InvalidIdentifier(name.to_string()));
            }
        }
        if self.columns.iter().any(|c| c.alias.eq_ignore_ascii_case(alias)) {
            return Err(Error::DuplicateAlias(alias.to_string()));
        }
        self.columns.push(ProjectedColumn {
            relation,
            column: column.to_string(),
            alias: alias.to_string(),
        });
        Ok(self)
    }

    /// Row id, entries, and the matched element's position, id and value.
    /// Decodes into [`MatchedElement`].
    pub fn qualified() -> Self {
        let cols = [
            (Relation::Rows, "id", "row_id"),
            (Relation::Rows, "entries", "entries"),
            (Relation::Each, "key", "position"),
            (Relation::Each, "id", "element_id"),
            (Relation::Each, "value", "value"),
        ];
        Self {
            columns: cols
                .into_iter()
                .map(|(relation, column, alias)| ProjectedColumn {
                    relation,
                    column: column.to_string(),
                    alias: alias.to_string(),
                })
                .collect(),
        }
    }

    pub fn columns(&self) -> &[ProjectedColumn] {
        &self.columns
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn select_list(&self, table: &str) -> String {
        self.columns
            .iter()
            .map(|c| format!("{}.{} AS {}", c.relation.qualifier(table), c.column, c.alias))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// One matched array element, as read through [`Projection::qualified`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchedElement {
    pub row_id: i64,
    pub entries: Entries,
    /// Zero-based index of the element in `entries` (`json_each.key`).
    pub position: i64,
    /// `json_each.id`; the value a naive `SELECT *` reports as `id`.
    pub element_id: i64,
    pub value: i64,
}
