//! Sort order, pagination direction and page request state.
//!
//! Two independent choices shape every page fetch:
//!
//! - [`Order`]: the order the caller wants rows *displayed* in.
//! - [`Direction`]: which way to move from the cursor.
//!
//! The order actually sent to the database is the [effective order]: the base
//! order when moving forward, its reverse when moving back. Scanning backwards
//! from the boundary with `LIMIT n` picks the `n` rows nearest to it; the
//! [normalizer](crate::normalize_page_result) then flips them back into
//! display order.
//!
//! [effective order]: effective_order

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ParseError;

/// Page size used when the caller asks for zero or a negative number of rows.
pub const DEFAULT_LIMIT: i64 = 50;

/// Sort order of a result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(clippy::exhaustive_enums)] // There are exactly two orders
pub enum Order {
    /// Smallest key first.
    Ascending,
    /// Largest key first.
    Descending,
}

impl Order {
    /// The opposite order.
    #[inline]
    #[must_use]
    pub const fn reverse(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    /// Comparison operator selecting rows strictly beyond a boundary when
    /// travelling in this order: `>` for ascending, `<` for descending.
    #[inline]
    #[must_use]
    pub const fn inequality_op(self) -> &'static str {
        match self {
            Self::Ascending => ">",
            Self::Descending => "<",
        }
    }

    /// `ASC` or `DESC`.
    #[inline]
    #[must_use]
    pub const fn sql_keyword(self) -> &'static str {
        match self {
            Self::Ascending => "ASC",
            Self::Descending => "DESC",
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        })
    }
}

impl FromStr for Order {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Ascending),
            "desc" | "descending" => Ok(Self::Descending),
            _ => Err(ParseError::InvalidOrder(s.to_string())),
        }
    }
}

impl Serialize for Order {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Order {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Direction of travel relative to the cursor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[allow(clippy::exhaustive_enums)] // Forward and back, nothing else
pub enum Direction {
    /// Rows after the cursor.
    #[default]
    Next,
    /// Rows before the cursor.
    Previous,
}

impl Direction {
    /// Parse external input, falling back to [`Direction::Next`] for anything
    /// unrecognized.
    #[must_use]
    pub fn parse_or_default(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Next => "next",
            Self::Previous => "previous",
        })
    }
}

impl FromStr for Direction {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "next" => Ok(Self::Next),
            "prev" | "previous" => Ok(Self::Previous),
            _ => Err(ParseError::InvalidDirection(s.to_string())),
        }
    }
}

impl Serialize for Direction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Unknown direction strings deserialize to [`Direction::Next`].
impl<'de> Deserialize<'de> for Direction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Self::parse_or_default(&s))
    }
}

/// The order to apply to a single fetch: `order` for [`Direction::Next`],
/// `order.reverse()` for [`Direction::Previous`].
#[inline]
#[must_use]
pub const fn effective_order(order: Order, direction: Direction) -> Order {
    match direction {
        Direction::Next => order,
        Direction::Previous => order.reverse(),
    }
}

/// Keyset pagination request state.
///
/// Deserializes from the usual HTTP shape `{"cursor": "...", "limit": 20,
/// "direction": "next"}`; every field is optional.
///
/// # Example
///
/// ```
/// use keyset::{Direction, Page};
///
/// let page = Page::new(20).with_cursor("AAAAAAAAAGQ").with_direction(Direction::Previous);
/// assert_eq!(page.limit, 20);
///
/// let page = Page::new(0).with_defaults();
/// assert_eq!(page.limit, 50);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
#[non_exhaustive]
pub struct Page {
    /// Encoded cursor of the boundary row. Empty means "start".
    pub cursor: String,
    /// Maximum rows to fetch. Zero or negative means [`DEFAULT_LIMIT`].
    pub limit: i64,
    /// Which way to move from the cursor.
    pub direction: Direction,
}

impl Page {
    /// A first page of `limit` rows, moving forward.
    pub const fn new(limit: i64) -> Self {
        Self {
            cursor: String::new(),
            limit,
            direction: Direction::Next,
        }
    }

    /// Set the boundary cursor.
    #[must_use]
    pub fn with_cursor(mut self, cursor: impl Into<String>) -> Self {
        self.cursor = cursor.into();
        self
    }

    /// Set the direction of travel.
    #[must_use]
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Replace a non-positive limit with [`DEFAULT_LIMIT`].
    pub const fn ensure_defaults(&mut self) {
        if self.limit <= 0 {
            self.limit = DEFAULT_LIMIT;
        }
    }

    /// Owned variant of [`ensure_defaults`](Self::ensure_defaults).
    #[must_use]
    pub fn with_defaults(mut self) -> Self {
        self.ensure_defaults();
        self
    }

    /// Whether a boundary cursor was supplied.
    #[inline]
    pub fn has_cursor(&self) -> bool {
        !self.cursor.is_empty()
    }

    /// Effective order for this page given the base `order`.
    #[inline]
    pub const fn effective_order(&self, order: Order) -> Order {
        effective_order(order, self.direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_order() {
        assert_eq!(
            effective_order(Order::Ascending, Direction::Next),
            Order::Ascending
        );
        assert_eq!(
            effective_order(Order::Ascending, Direction::Previous),
            Order::Descending
        );
        assert_eq!(
            effective_order(Order::Descending, Direction::Next),
            Order::Descending
        );
        assert_eq!(
            effective_order(Order::Descending, Direction::Previous),
            Order::Ascending
        );
    }

    #[test]
    fn test_reverse_is_involution() {
        for order in [Order::Ascending, Order::Descending] {
            assert_ne!(order.reverse(), order);
            assert_eq!(order.reverse().reverse(), order);
        }
    }

    #[test]
    fn test_operators_and_keywords() {
        assert_eq!(Order::Ascending.inequality_op(), ">");
        assert_eq!(Order::Descending.inequality_op(), "<");
        assert_eq!(Order::Ascending.sql_keyword(), "ASC");
        assert_eq!(Order::Descending.sql_keyword(), "DESC");
    }

    #[test]
    fn test_order_from_str() {
        assert_eq!("asc".parse::<Order>().unwrap(), Order::Ascending);
        assert_eq!("DESC".parse::<Order>().unwrap(), Order::Descending);
        assert_eq!(" Descending ".parse::<Order>().unwrap(), Order::Descending);
        assert_eq!(
            "up".parse::<Order>().unwrap_err(),
            ParseError::InvalidOrder("up".to_string())
        );
    }

    #[test]
    fn test_direction_from_str() {
        assert_eq!("next".parse::<Direction>().unwrap(), Direction::Next);
        assert_eq!("Prev".parse::<Direction>().unwrap(), Direction::Previous);
        assert_eq!("previous".parse::<Direction>().unwrap(), Direction::Previous);
        assert!("back".parse::<Direction>().is_err());
        assert_eq!(Direction::parse_or_default("back"), Direction::Next);
    }

    #[test]
    fn test_page_defaults() {
        assert_eq!(Page::new(0).with_defaults().limit, DEFAULT_LIMIT);
        assert_eq!(Page::new(-5).with_defaults().limit, DEFAULT_LIMIT);
        assert_eq!(Page::new(7).with_defaults().limit, 7);
        assert_eq!(Page::default().direction, Direction::Next);
        assert!(!Page::default().has_cursor());
    }

    #[test]
    fn test_page_deserialize() {
        let page: Page =
            serde_json::from_str(r#"{"cursor":"abc","limit":10,"direction":"previous"}"#).unwrap();
        assert_eq!(page.cursor, "abc");
        assert_eq!(page.limit, 10);
        assert_eq!(page.direction, Direction::Previous);

        let page: Page = serde_json::from_str(r#"{"direction":"sideways"}"#).unwrap();
        assert_eq!(page.direction, Direction::Next);
        assert_eq!(page.with_defaults().limit, DEFAULT_LIMIT);
    }

    #[test]
    fn test_order_serde() {
        assert_eq!(serde_json::to_string(&Order::Descending).unwrap(), "\"desc\"");
        let order: Order = serde_json::from_str("\"ascending\"").unwrap();
        assert_eq!(order, Order::Ascending);
        assert!(serde_json::from_str::<Order>("\"random\"").is_err());
    }
}
