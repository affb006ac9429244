//! Key column descriptors and decoded boundary values.

use chrono::{DateTime, Utc};

use crate::cursor::{self, CursorKey};
use crate::error::CursorError;
use crate::value::Value;

/// The column(s) a result set is keyed on.
///
/// Column names are trusted input: they are written into the SQL verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum KeyColumns {
    /// A single integer column, e.g. `id`.
    Id(String),
    /// A single timestamp column, e.g. `created_at`.
    Time(String),
    /// A timestamp column with an integer tie-breaker, e.g. `(created_at, id)`.
    TimeAndId {
        /// Primary sort column.
        time: String,
        /// Tie-breaker column.
        id: String,
    },
}

impl KeyColumns {
    /// Single integer key.
    pub fn id(column: impl Into<String>) -> Self {
        Self::Id(column.into())
    }

    /// Single timestamp key.
    pub fn time(column: impl Into<String>) -> Self {
        Self::Time(column.into())
    }

    /// Composite `(time, id)` key.
    pub fn time_and_id(time: impl Into<String>, id: impl Into<String>) -> Self {
        Self::TimeAndId {
            time: time.into(),
            id: id.into(),
        }
    }

    /// Column names in sort priority order.
    pub fn columns(&self) -> Vec<&str> {
        match self {
            Self::Id(col) | Self::Time(col) => vec![col.as_str()],
            Self::TimeAndId { time, id } => vec![time.as_str(), id.as_str()],
        }
    }

    /// Decode `cursor` into the boundary shape these columns expect.
    pub fn decode(&self, cursor: &str) -> Result<Boundary, CursorError> {
        Ok(match self {
            Self::Id(_) => Boundary::Int(cursor::decode(cursor)?),
            Self::Time(_) => Boundary::Time(cursor::decode(cursor)?),
            Self::TimeAndId { .. } => {
                let (time, id) = cursor::decode(cursor)?;
                Boundary::TimeAndId(time, id)
            },
        })
    }
}

/// Decoded key value(s) of a page boundary row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Boundary {
    /// Integer key.
    Int(i64),
    /// Timestamp key.
    Time(DateTime<Utc>),
    /// Composite key.
    TimeAndId(DateTime<Utc>, i64),
}

impl Boundary {
    /// Encode back into an opaque cursor.
    #[must_use]
    pub fn encode(&self) -> String {
        match self {
            Self::Int(id) => cursor::encode(id),
            Self::Time(t) => cursor::encode(t),
            Self::TimeAndId(t, id) => cursor::encode(&(*t, *id)),
        }
    }

    /// Raw big-endian cursor bytes.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            Self::Int(id) => id.to_bytes(),
            Self::Time(t) => t.to_bytes(),
            Self::TimeAndId(t, id) => (*t, *id).to_bytes(),
        }
    }

    /// The boundary as bind values, one per key column.
    pub fn values(&self) -> Vec<Value> {
        match self {
            Self::Int(id) => vec![Value::Int(*id)],
            Self::Time(t) => vec![Value::Timestamp(*t)],
            Self::TimeAndId(t, id) => vec![Value::Timestamp(*t), Value::Int(*id)],
        }
    }
}

impl From<i64> for Boundary {
    fn from(id: i64) -> Self {
        Self::Int(id)
    }
}

impl From<DateTime<Utc>> for Boundary {
    fn from(t: DateTime<Utc>) -> Self {
        Self::Time(t)
    }
}

impl From<(DateTime<Utc>, i64)> for Boundary {
    fn from((t, id): (DateTime<Utc>, i64)) -> Self {
        Self::TimeAndId(t, id)
    }
}
