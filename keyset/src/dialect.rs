//! Placeholder rendering for Postgres, `SQLite` and `MySQL`.
//!
//! The composer only needs one thing from a dialect: how to spell the N-th
//! bind placeholder. Any `Fn(usize) -> String` works as a dialect too.

/// Placeholder strategy for bind parameters.
///
/// Indices are 1-based and contiguous across a composed statement.
pub trait Dialect {
    /// Format a parameter placeholder (e.g., `$1` for Postgres, `?` for `MySQL`).
    fn param(&self, idx: usize) -> String;
}

impl<F: Fn(usize) -> String> Dialect for F {
    #[inline]
    fn param(&self, idx: usize) -> String {
        self(idx)
    }
}

/// Postgres dialect: `$1`, `$2`, ...
#[derive(Debug, Clone, Copy, Default)]
#[allow(clippy::exhaustive_structs)] // Unit marker, constructed by name
pub struct Postgres;

impl Dialect for Postgres {
    #[inline]
    fn param(&self, idx: usize) -> String {
        format!("${idx}")
    }
}

/// `SQLite` dialect: `?1`, `?2`, ...
#[derive(Debug, Clone, Copy, Default)]
#[allow(clippy::exhaustive_structs)] // Unit marker, constructed by name
pub struct Sqlite;

impl Dialect for Sqlite {
    #[inline]
    fn param(&self, idx: usize) -> String {
        format!("?{idx}")
    }
}

/// `MySQL` dialect: a bare `?` for every position.
///
/// Also correct for `SQLite` when binding strictly in order.
#[derive(Debug, Clone, Copy, Default)]
#[allow(clippy::exhaustive_structs)] // Unit marker, constructed by name
pub struct MySql;

impl Dialect for MySql {
    #[inline]
    fn param(&self, _idx: usize) -> String {
        "?".to_string()
    }
}
