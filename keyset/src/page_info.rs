//! PageInfo struct and methods for pagination responses.

use serde::Serialize;

use crate::keys::Boundary;
use crate::order::{Direction, Page};

/// Page information for paginated responses.
///
/// Cursors are taken from the rows *in display order*, after
/// [`normalize_page_result`](crate::normalize_page_result): the last row
/// bounds the next page, the first row bounds the previous one.
///
/// # Example
///
/// ```
/// use keyset::{Page, PageInfo, decode_int64_cursor};
///
/// struct Post { id: i64 }
///
/// let page = Page::new(2);
/// let rows = vec![Post { id: 10 }, Post { id: 11 }];
/// let info = PageInfo::from_rows(&page, &rows, |p| p.id);
///
/// assert!(info.has_next);
/// assert!(!info.has_prev);
/// assert_eq!(decode_int64_cursor(info.next_cursor.as_deref().unwrap()).unwrap(), 11);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub struct PageInfo {
    /// Whether there may be more items after this page.
    pub has_next: bool,
    /// Whether there may be items before this page.
    pub has_prev: bool,
    /// Cursor to fetch the next page ([`Direction::Next`]).
    pub next_cursor: Option<String>,
    /// Cursor to fetch the previous page ([`Direction::Previous`]).
    pub prev_cursor: Option<String>,
}

impl PageInfo {
    /// Derive flags and outbound cursors from a display-ordered page.
    ///
    /// A full page in the direction of travel means there may be more rows
    /// that way. Having arrived through a cursor means there are rows the
    /// other way.
    pub fn from_rows<T, K, F>(page: &Page, rows: &[T], key: F) -> Self
    where
        K: Into<Boundary>,
        F: Fn(&T) -> K,
    {
        let page = page.clone().with_defaults();
        let full = usize::try_from(page.limit).is_ok_and(|limit| rows.len() >= limit);
        let (has_next, has_prev) = match page.direction {
            Direction::Next => (full, page.has_cursor()),
            Direction::Previous => (page.has_cursor(), full),
        };

        let next_cursor = has_next.then(|| Self::cursor_from(rows.last(), &key)).flatten();
        let prev_cursor = has_prev.then(|| Self::cursor_from(rows.first(), &key)).flatten();

        Self {
            has_next: has_next && next_cursor.is_some(),
            has_prev: has_prev && prev_cursor.is_some(),
            next_cursor,
            prev_cursor,
        }
    }

    /// Encode a cursor from a boundary item using a key extractor.
    pub fn cursor_from<T, K, F>(item: Option<&T>, key: F) -> Option<String>
    where
        K: Into<Boundary>,
        F: Fn(&T) -> K,
    {
        item.map(|item| key(item).into().encode())
    }
}
