// =============================================================================
// CRATE-LEVEL QUALITY LINTS (following Tokio/Serde standards)
// =============================================================================
#![forbid(unsafe_code)]
#![deny(unused_must_use)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![warn(rust_2018_idioms)]
#![warn(unreachable_pub)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
// =============================================================================
// CLIPPY CONFIGURATION
// =============================================================================
#![allow(clippy::doc_markdown)] // Code items in docs - extensive doc changes needed
#![allow(clippy::missing_errors_doc)] // Error variants are documented on the enums
#![allow(clippy::module_name_repetitions)] // Type names matching module - acceptable
#![allow(clippy::return_self_not_must_use)] // Builder methods return Self
#![allow(clippy::must_use_candidate)] // Builder methods - fluent API doesn't need must_use
#![allow(clippy::format_push_string)] // String building style preference
#![allow(clippy::double_must_use)] // Functions returning must_use types can have their own docs

//! # keyset - Seek Pagination with Opaque Cursors
//!
//! Keyset pagination bounds each page with a comparison against the previous
//! page's boundary key instead of an `OFFSET`, so pages stay correct while rows
//! are inserted or deleted concurrently.
//!
//! The crate covers the pure part of the problem and never touches a database:
//!
//! - **Cursor codec**: order-preserving, fixed-width cursors for `i64`,
//!   `DateTime<Utc>` and `(DateTime<Utc>, i64)` keys.
//! - **Order/direction algebra**: the order to apply to a fetch given the
//!   display order and the direction of travel.
//! - **Window predicates**: `id > ?` or
//!   `(created_at > ?) OR (created_at = ? AND id > ?)`.
//! - **Query composition**: as text with pluggable placeholders, or through a
//!   fluent [`Scope`].
//! - **Result normalization**: flipping a "previous page" back into display
//!   order.
//!
//! ## Quick Start
//!
//! ```
//! use keyset::prelude::*;
//!
//! // First page: newest posts first.
//! let page = Page::new(20);
//! let query = query_by_time_and_id(
//!     "SELECT id, title, created_at FROM posts",
//!     &page,
//!     Order::Descending,
//!     "created_at",
//!     "id",
//!     &Postgres,
//! );
//! assert_eq!(
//!     query.sql,
//!     "SELECT id, title, created_at FROM posts ORDER BY created_at DESC, id DESC LIMIT $1"
//! );
//! ```
//!
//! ## Paging Back and Forth
//!
//! ```
//! use chrono::{DateTime, Utc};
//! use keyset::prelude::*;
//!
//! let last_seen = DateTime::parse_from_rfc3339("2025-11-12T00:00:00Z")
//!     .unwrap()
//!     .with_timezone(&Utc);
//!
//! // Next page after the last visible row.
//! let next = Page::new(20).with_cursor(encode_time_and_int64_cursor(&last_seen, 123));
//! let query = query_by_time_and_id("SELECT * FROM posts", &next, Order::Descending, "created_at", "id", &Postgres);
//! assert!(query.sql.contains("WHERE (created_at < $1) OR (created_at = $2 AND id < $3)"));
//!
//! // Previous page before the first visible row: the fetch runs ascending...
//! let prev = next.clone().with_direction(Direction::Previous);
//! let query = query_by_time_and_id("SELECT * FROM posts", &prev, Order::Descending, "created_at", "id", &Postgres);
//! assert!(query.sql.ends_with("ORDER BY created_at ASC, id ASC LIMIT $4"));
//!
//! // ...so flip the rows back before showing them.
//! let rows = normalize_page_result(&prev, vec![125, 124]);
//! assert_eq!(rows, vec![124, 125]);
//! ```
//!
//! ## Invalid Cursors
//!
//! The codec reports [`CursorError`]s, but the composers **fail open**: an
//! empty, malformed or stale cursor produces the first page in the requested
//! direction and a `tracing` warning, never an error. Use
//! [`Window::try_from_cursor`] or the codec directly to surface the error
//! instead.
//!
//! ## Thread Safety
//!
//! Everything here is a pure function of its inputs. There is no global state.

mod compose;
mod cursor;
mod dialect;
mod error;
mod keys;
mod normalize;
mod order;
mod page_info;
mod scope;
mod value;
mod window;

pub use compose::{QueryResult, compose, query_by_id, query_by_time, query_by_time_and_id};
pub use cursor::{
    CursorKey, MAX_CURSOR_LEN, decode, decode_int64_cursor, decode_time_and_int64_cursor,
    decode_time_cursor, encode, encode_int64_cursor, encode_time_and_int64_cursor,
    encode_time_cursor,
};
pub use dialect::{Dialect, MySql, Postgres, Sqlite};
pub use error::{CursorError, ParseError};
pub use keys::{Boundary, KeyColumns};
pub use normalize::{find_page, normalize_page_result, normalize_page_result_in_place};
pub use order::{DEFAULT_LIMIT, Direction, Order, Page, effective_order};
pub use page_info::PageInfo;
pub use scope::{Scope, SelectBuilder, paginate, postgres, sqlite};
pub use value::Value;
pub use window::{Predicate, Window, order_clause, stable_where_time_and_id};

/// Prelude module for convenient imports.
///
/// ```
/// use keyset::prelude::*;
/// let page = Page::new(10).with_direction(Direction::Previous);
/// assert_eq!(page.effective_order(Order::Ascending), Order::Descending);
/// ```
pub mod prelude {
    pub use crate::{
        Boundary, CursorError, CursorKey, DEFAULT_LIMIT, Dialect, Direction, KeyColumns, MySql,
        Order, Page, PageInfo, ParseError, Postgres, QueryResult, Scope, SelectBuilder, Sqlite,
        Value, Window, compose, decode_int64_cursor, decode_time_and_int64_cursor,
        decode_time_cursor, effective_order, encode_int64_cursor, encode_time_and_int64_cursor,
        encode_time_cursor, find_page, normalize_page_result, normalize_page_result_in_place,
        paginate, postgres, query_by_id, query_by_time, query_by_time_and_id, sqlite,
    };
}
