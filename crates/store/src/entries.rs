use crate::error::{Error, Result};
use rand::Rng;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

pub const MIN_LEN: usize = 1;
pub const MAX_LEN: usize = 5;
pub const MIN_VALUE: i64 = 1;
pub const MAX_VALUE: i64 = 10;

///
/// Entries
///
/// The JSON array stored in a row: 1 to 5 integers in `1..=10`, sorted
/// ascending. Repeated values are allowed, and they are what make
/// `SELECT DISTINCT` return one result per occurrence.
///

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Entries(Vec<i64>);

impl Entries {
    pub fn new(values: Vec<i64>) -> Result<Self> {
        let reason = if values.len() < MIN_LEN {
            Some("empty")
        } else if values.len() > MAX_LEN {
            Some("more than 5 values")
        } else if values.iter().any(|v| !(MIN_VALUE..=MAX_VALUE).contains(v)) {
            Some("value outside 1..=10")
        } else if values.windows(2).any(|w| w[0] > w[1]) {
            Some("not sorted ascending")
        } else {
            None
        };
        match reason {
            Some(reason) => Err(Error::InvalidEntries { values, reason }),
            None => Ok(Self(values)),
        }
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let len = rng.gen_range(MIN_LEN..=MAX_LEN);
        let mut values: Vec<i64> = (0..len)
            .map(|_| rng.gen_range(MIN_VALUE..=MAX_VALUE))
            .collect();
        values.sort_unstable();
        Self(values)
    }

    pub fn values(&self) -> &[i64] {
        &self.0
    }

    pub fn has_duplicates(&self) -> bool {
        self.0.windows(2).any(|w| w[0] == w[1])
    }

    /// Zero-based positions of `value`, i.e. the `json_each.key` values a
    /// lookup for it will report.
    pub fn positions_of(&self, value: i64) -> Vec<usize> {
        self.0
            .iter()
            .enumerate()
            .filter(|(_, v)| **v == value)
            .map(|(i, _)| i)
            .collect()
    }

    /// Compact JSON text, as stored in the `entries` column.
    pub fn to_json(&self) -> String {
        serde_json::Value::from(self.0.clone()).to_string()
    }
}

impl fmt::Display for Entries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_json())
    }
}

impl TryFrom<Vec<i64>> for Entries {
    type Error = Error;

    fn try_from(values: Vec<i64>) -> Result<Self> {
        Self::new(values)
    }
}

impl FromStr for Entries {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let values: Vec<i64> = serde_json::from_str(s)?;
        Self::new(values)
    }
}

// Accepts an array, or the column's JSON text as read back from SQLite.
impl<'de> Deserialize<'de> for Entries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Values(Vec<i64>),
            Text(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Values(values) => Self::new(values).map_err(D::Error::custom),
            Repr::Text(text) => text.parse().map_err(D::Error::custom),
        }
    }
}

///
/// Row
///

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    pub id: i64,
    pub entries: Entries,
}
