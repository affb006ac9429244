//! Stable-window predicate generation.
//!
//! A window is the boundary condition that selects rows strictly beyond the
//! cursor in the direction of travel. For a single key column it is one
//! comparison; for `(time, id)` it is the lexicographic expansion
//!
//! ```text
//! (time > t) OR (time = t AND id > id)
//! ```
//!
//! (with `<` under a descending effective order), which neither skips nor
//! repeats rows that tie on `time`. See: <https://use-the-index-luke.com/no-offset>

use crate::cursor::MAX_CURSOR_LEN;
use crate::dialect::{Dialect, MySql};
use crate::error::CursorError;
use crate::keys::{Boundary, KeyColumns};
use crate::order::Order;
use crate::value::Value;

/// A boolean predicate over key columns.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Predicate {
    /// `column op value`
    Compare {
        /// Column name.
        column: String,
        /// One of `<`, `>`, `=`.
        op: &'static str,
        /// Bound value.
        value: Value,
    },
    /// All sub-predicates hold.
    All(Vec<Predicate>),
    /// At least one sub-predicate holds.
    Any(Vec<Predicate>),
}

impl Predicate {
    fn compare(column: &str, op: &'static str, value: Value) -> Self {
        Self::Compare {
            column: column.to_string(),
            op,
            value,
        }
    }

    /// Render with placeholders starting at `*idx`, pushing bind values in
    /// placeholder order.
    fn render<D: Dialect + ?Sized>(
        &self,
        dialect: &D,
        idx: &mut usize,
        params: &mut Vec<Value>,
    ) -> String {
        match self {
            Self::Compare { column, op, value } => {
                let sql = format!("{column} {op} {}", dialect.param(*idx));
                *idx += 1;
                params.push(value.clone());
                sql
            },
            Self::All(parts) => parts
                .iter()
                .map(|p| p.render(dialect, idx, params))
                .collect::<Vec<_>>()
                .join(" AND "),
            Self::Any(parts) => parts
                .iter()
                .map(|p| format!("({})", p.render(dialect, idx, params)))
                .collect::<Vec<_>>()
                .join(" OR "),
        }
    }
}

/// Boundary predicate for one page fetch.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub struct Window {
    /// The boundary condition.
    pub predicate: Predicate,
}

impl Window {
    /// Build the window for `boundary` under the effective order.
    ///
    /// Returns `None` if the boundary shape does not fit `keys`.
    #[must_use]
    pub fn new(keys: &KeyColumns, effective: Order, boundary: Boundary) -> Option<Self> {
        let op = effective.inequality_op();
        let predicate = match (keys, boundary) {
            (KeyColumns::Id(col), Boundary::Int(id)) => Predicate::compare(col, op, Value::Int(id)),
            (KeyColumns::Time(col), Boundary::Time(t)) => {
                Predicate::compare(col, op, Value::Timestamp(t))
            },
            (KeyColumns::TimeAndId { time, id: id_col }, Boundary::TimeAndId(t, id)) => {
                Predicate::Any(vec![
                    Predicate::compare(time, op, Value::Timestamp(t)),
                    Predicate::All(vec![
                        Predicate::compare(time, "=", Value::Timestamp(t)),
                        Predicate::compare(id_col, op, Value::Int(id)),
                    ]),
                ])
            },
            _ => return None,
        };
        Some(Self { predicate })
    }

    /// Decode `cursor` and build its window.
    ///
    /// An empty cursor yields `Ok(None)`. Decode failures are returned as-is;
    /// see [`Window::from_cursor`] for the fail-open variant.
    pub fn try_from_cursor(
        keys: &KeyColumns,
        effective: Order,
        cursor: &str,
    ) -> Result<Option<Self>, CursorError> {
        if cursor.is_empty() {
            return Ok(None);
        }
        let boundary = keys.decode(cursor)?;
        Ok(Self::new(keys, effective, boundary))
    }

    /// Decode `cursor` and build its window, failing open.
    ///
    /// An empty or undecodable cursor yields `None`, i.e. no boundary: the
    /// fetch starts from the first row in the direction of travel. Decode
    /// failures are logged at `warn` level and otherwise swallowed, so a stale
    /// or tampered cursor resets pagination instead of failing the request.
    #[must_use]
    pub fn from_cursor(keys: &KeyColumns, effective: Order, cursor: &str) -> Option<Self> {
        match Self::try_from_cursor(keys, effective, cursor) {
            Ok(window) => window,
            Err(error) => {
                tracing::warn!(
                    cursor = %log_prefix(cursor),
                    cursor_len = cursor.len(),
                    error = %error,
                    "invalid pagination cursor; starting from first page"
                );
                None
            },
        }
    }

    /// Bind values in placeholder order: `[v]` for a single key,
    /// `[t, t, id]` for `(time, id)`.
    pub fn values(&self) -> Vec<Value> {
        let mut params = Vec::new();
        let mut idx = 1;
        self.predicate.render(&MySql, &mut idx, &mut params);
        params
    }

    /// Render the predicate with placeholders numbered from `start_idx`.
    ///
    /// Returns the SQL fragment, its bind values and the next free index.
    pub fn to_sql<D: Dialect + ?Sized>(
        &self,
        dialect: &D,
        start_idx: usize,
    ) -> (String, Vec<Value>, usize) {
        let mut params = Vec::new();
        let mut idx = start_idx;
        let sql = self.predicate.render(dialect, &mut idx, &mut params);
        (sql, params, idx)
    }
}

/// At most [`MAX_CURSOR_LEN`] bytes of an untrusted cursor, cut on a char
/// boundary.
fn log_prefix(cursor: &str) -> &str {
    if cursor.len() <= MAX_CURSOR_LEN {
        return cursor;
    }
    let end = (0..=MAX_CURSOR_LEN)
        .rev()
        .find(|&i| cursor.is_char_boundary(i))
        .unwrap_or(0);
    cursor.get(..end).unwrap_or_default()
}

/// The composite `(time, id)` window with `?` placeholders, to be bound with
/// `(t, t, id)`.
///
/// ```
/// use keyset::{Order, stable_where_time_and_id};
///
/// assert_eq!(
///     stable_where_time_and_id("created_at", "id", Order::Descending),
///     "(created_at < ?) OR (created_at = ? AND id < ?)"
/// );
/// ```
#[must_use]
pub fn stable_where_time_and_id(time_col: &str, id_col: &str, order: Order) -> String {
    let op = order.inequality_op();
    format!("({time_col} {op} ?) OR ({time_col} = ? AND {id_col} {op} ?)")
}

/// Comma-joined `ORDER BY` body, one keyword per column.
///
/// ```
/// use keyset::{Order, order_clause};
///
/// assert_eq!(order_clause(&["created_at", "id"], Order::Descending), "created_at DESC, id DESC");
/// ```
#[must_use]
pub fn order_clause(columns: &[&str], order: Order) -> String {
    let keyword = order.sql_keyword();
    columns
        .iter()
        .map(|col| format!("{col} {keyword}"))
        .collect::<Vec<_>>()
        .join(", ")
}
