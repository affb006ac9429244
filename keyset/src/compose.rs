//! Textual query composition.
//!
//! Appends the stable window, `ORDER BY` and `LIMIT` to a caller-written base
//! query (`SELECT ... FROM ... [WHERE ...]`, without `ORDER BY`/`LIMIT`).
//!
//! # Known Limitation
//!
//! Whether the base already has a `WHERE` clause is decided by a
//! case-insensitive search for a standalone `WHERE` token, not by parsing.
//! A `where` inside a string literal or a quoted identifier fools it. When the
//! base filter contains a top-level `OR`, wrap it in parentheses yourself:
//! the window is joined with `AND`.

use crate::dialect::Dialect;
use crate::keys::KeyColumns;
use crate::order::{Order, Page};
use crate::value::Value;
use crate::window::{Predicate, Window, order_clause};

/// Query result with SQL string and parameters.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
#[must_use = "QueryResult must be used to execute the query"]
pub struct QueryResult {
    /// Final statement text.
    pub sql: String,
    /// Bind values in placeholder order: window values, then the limit.
    pub params: Vec<Value>,
}

/// Compose a keyset-paginated statement.
///
/// - `base`: a `SELECT ... FROM ... [WHERE ...]` prefix.
/// - `page`: pagination state; a non-positive limit becomes 50.
/// - `order`: base (display) order.
/// - `keys`: key column(s) the cursor was built from.
/// - `dialect`: placeholder strategy.
///
/// An empty or undecodable cursor produces no window (fail-open, see
/// [`Window::from_cursor`]); `ORDER BY` and `LIMIT` are always appended.
///
/// # Example
///
/// ```
/// use keyset::{KeyColumns, Order, Page, Postgres, compose};
///
/// let result = compose(
///     "SELECT id, title FROM posts",
///     &Page::new(10),
///     Order::Descending,
///     &KeyColumns::id("id"),
///     &Postgres,
/// );
/// assert_eq!(result.sql, "SELECT id, title FROM posts ORDER BY id DESC LIMIT $1");
/// ```
pub fn compose<D: Dialect + ?Sized>(
    base: &str,
    page: &Page,
    order: Order,
    keys: &KeyColumns,
    dialect: &D,
) -> QueryResult {
    let page = page.clone().with_defaults();
    let effective = page.effective_order(order);
    tracing::debug!(
        direction = %page.direction,
        base_order = %order,
        effective_order = %effective,
        limit = page.limit,
        "composing keyset query"
    );

    let mut sql = String::from(base);
    let mut params = Vec::new();
    let mut idx = 1usize;

    if let Some(window) = Window::from_cursor(keys, effective, &page.cursor) {
        let (condition, values, next_idx) = window.to_sql(dialect, idx);
        if has_where(base) {
            sql.push_str(" AND ");
            push_grouped(&mut sql, &window.predicate, &condition);
        } else {
            sql.push_str(" WHERE ");
            sql.push_str(&condition);
        }
        params.extend(values);
        idx = next_idx;
    }

    sql.push_str(" ORDER BY ");
    sql.push_str(&order_clause(&keys.columns(), effective));

    sql.push_str(" LIMIT ");
    sql.push_str(&dialect.param(idx));
    params.push(Value::Int(page.limit));

    QueryResult { sql, params }
}

/// Keyset query over a single integer column.
/// The cursor must come from [`encode_int64_cursor`](crate::encode_int64_cursor).
pub fn query_by_id<D: Dialect + ?Sized>(
    base: &str,
    page: &Page,
    order: Order,
    column: &str,
    dialect: &D,
) -> QueryResult {
    compose(base, page, order, &KeyColumns::id(column), dialect)
}

/// Keyset query over a single timestamp column.
/// The cursor must come from [`encode_time_cursor`](crate::encode_time_cursor).
pub fn query_by_time<D: Dialect + ?Sized>(
    base: &str,
    page: &Page,
    order: Order,
    column: &str,
    dialect: &D,
) -> QueryResult {
    compose(base, page, order, &KeyColumns::time(column), dialect)
}

/// Keyset query over the composite `(time, id)` key.
/// The cursor must come from
/// [`encode_time_and_int64_cursor`](crate::encode_time_and_int64_cursor).
pub fn query_by_time_and_id<D: Dialect + ?Sized>(
    base: &str,
    page: &Page,
    order: Order,
    time_column: &str,
    id_column: &str,
    dialect: &D,
) -> QueryResult {
    compose(
        base,
        page,
        order,
        &KeyColumns::time_and_id(time_column, id_column),
        dialect,
    )
}

/// Parenthesize an `OR` predicate before it is joined with `AND`.
fn push_grouped(sql: &mut String, predicate: &Predicate, condition: &str) {
    if matches!(predicate, Predicate::Any(_)) {
        sql.push('(');
        sql.push_str(condition);
        sql.push(')');
    } else {
        sql.push_str(condition);
    }
}

/// Whether `sql` contains a standalone `WHERE` token (case-insensitive).
pub(crate) fn has_where(sql: &str) -> bool {
    sql.split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .any(|token| token.eq_ignore_ascii_case("where"))
}
