//! Fluent-scope pagination for query builders and ORMs.
//!
//! [`paginate`] applies the same window, `ORDER BY` and `LIMIT` as
//! [`compose`](crate::compose), but through the [`Scope`] trait instead of
//! string concatenation. Fragments handed to a scope use `?` markers; the
//! scope decides how to number them.

use crate::compose::QueryResult;
use crate::dialect::{Dialect, MySql};
use crate::keys::KeyColumns;
use crate::order::{Order, Page};
use crate::value::Value;
use crate::window::{Window, order_clause};

/// The three operations keyset pagination needs from a query builder.
pub trait Scope: Sized {
    /// AND a condition onto the query. `sql` uses `?` markers, bound to
    /// `values` in order.
    fn where_fragment(self, sql: &str, values: Vec<Value>) -> Self;

    /// Append an `ORDER BY` body such as `created_at DESC, id DESC`.
    fn order_by(self, clause: &str) -> Self;

    /// Cap the number of rows.
    fn limit(self, limit: i64) -> Self;
}

/// Apply keyset pagination to `scope`.
///
/// Fails open on an undecodable cursor like [`compose`](crate::compose).
/// Rows come back in SQL order; normalize them before display.
pub fn paginate<S: Scope>(scope: S, page: &Page, order: Order, keys: &KeyColumns) -> S {
    let page = page.clone().with_defaults();
    let effective = page.effective_order(order);

    let scope = match Window::from_cursor(keys, effective, &page.cursor) {
        Some(window) => {
            let (sql, values, _) = window.to_sql(&MySql, 1);
            scope.where_fragment(&sql, values)
        },
        None => scope,
    };

    scope
        .order_by(&order_clause(&keys.columns(), effective))
        .limit(page.limit)
}

/// Minimal SELECT builder implementing [`Scope`].
///
/// # Example
///
/// ```
/// use keyset::{KeyColumns, Order, Page, Value, paginate, postgres};
///
/// let query = postgres("posts")
///     .fields(&["id", "title", "created_at"])
///     .filter_raw("author_id = ?", vec![Value::Int(7)]);
/// let result = paginate(query, &Page::new(20), Order::Descending, &KeyColumns::id("id")).build();
///
/// assert_eq!(
///     result.sql,
///     "SELECT id, title, created_at FROM posts WHERE author_id = $1 ORDER BY id DESC LIMIT $2"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct SelectBuilder<D: Dialect> {
    dialect: D,
    table: String,
    fields: Vec<String>,
    conditions: Vec<(String, Vec<Value>)>,
    order_by: Vec<String>,
    limit: Option<i64>,
}

impl<D: Dialect> SelectBuilder<D> {
    /// Create a new builder for the given table.
    pub fn new(dialect: D, table: impl Into<String>) -> Self {
        Self {
            dialect,
            table: table.into(),
            fields: Vec::new(),
            conditions: Vec::new(),
            order_by: Vec::new(),
            limit: None,
        }
    }

    /// Set the columns to SELECT. Empty means `*`.
    pub fn fields(mut self, fields: &[&str]) -> Self {
        self.fields = fields.iter().map(|s| (*s).to_string()).collect();
        self
    }

    /// Add a raw condition with `?` markers.
    ///
    /// The number of `?` markers outside single-quoted literals must equal
    /// `values.len()`.
    pub fn filter_raw(mut self, sql: impl Into<String>, values: Vec<Value>) -> Self {
        self.conditions.push((sql.into(), values));
        self
    }

    /// Build the SQL query and parameters.
    pub fn build(self) -> QueryResult {
        let mut params = Vec::new();
        let mut param_idx = 1usize;

        let select_str = if self.fields.is_empty() {
            "*".to_string()
        } else {
            self.fields.join(", ")
        };
        let mut sql = format!("SELECT {select_str} FROM {}", self.table);

        if !self.conditions.is_empty() {
            let grouped = self.conditions.len() > 1;
            let parts: Vec<String> = self
                .conditions
                .into_iter()
                .map(|(fragment, values)| {
                    let rendered = number_markers(&fragment, &self.dialect, &mut param_idx);
                    params.extend(values);
                    if grouped {
                        format!("({rendered})")
                    } else {
                        rendered
                    }
                })
                .collect();
            sql.push_str(" WHERE ");
            sql.push_str(&parts.join(" AND "));
        }

        if !self.order_by.is_empty() {
            sql.push_str(" ORDER BY ");
            sql.push_str(&self.order_by.join(", "));
        }

        if let Some(limit) = self.limit {
            sql.push_str(" LIMIT ");
            sql.push_str(&self.dialect.param(param_idx));
            params.push(Value::Int(limit));
        }

        QueryResult { sql, params }
    }
}

impl<D: Dialect> Scope for SelectBuilder<D> {
    fn where_fragment(self, sql: &str, values: Vec<Value>) -> Self {
        self.filter_raw(sql, values)
    }

    fn order_by(mut self, clause: &str) -> Self {
        self.order_by.push(clause.to_string());
        self
    }

    fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Replace each `?` outside single-quoted literals with the dialect's
/// placeholder, advancing `idx`.
fn number_markers<D: Dialect + ?Sized>(fragment: &str, dialect: &D, idx: &mut usize) -> String {
    let mut out = String::with_capacity(fragment.len());
    let mut in_literal = false;
    for c in fragment.chars() {
        match c {
            '\'' => {
                in_literal = !in_literal;
                out.push(c);
            },
            '?' if !in_literal => {
                out.push_str(&dialect.param(*idx));
                *idx += 1;
            },
            _ => out.push(c),
        }
    }
    out
}

/// Build a SELECT for Postgres.
pub fn postgres(table: &str) -> SelectBuilder<crate::Postgres> {
    SelectBuilder::new(crate::Postgres, table)
}

/// Build a SELECT for `SQLite`.
pub fn sqlite(table: &str) -> SelectBuilder<crate::Sqlite> {
    SelectBuilder::new(crate::Sqlite, table)
}
