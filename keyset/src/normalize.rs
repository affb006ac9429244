//! Restoring display order after a fetch.
//!
//! A [`Direction::Previous`] fetch runs under the reversed order, so rows
//! arrive nearest-to-the-cursor first. Reversing them once puts them back in
//! the base order; forward fetches already are.

use crate::compose::QueryResult;
use crate::order::{Direction, Page};

/// Reverse `rows` in place if the page moved backwards.
pub fn normalize_page_result_in_place<T>(page: &Page, rows: &mut [T]) {
    if page.direction == Direction::Previous {
        rows.reverse();
    }
}

/// Owning variant of [`normalize_page_result_in_place`], for chaining.
///
/// ```
/// use keyset::{Direction, Page, normalize_page_result};
///
/// let page = Page::new(3).with_direction(Direction::Previous);
/// assert_eq!(normalize_page_result(&page, vec![5, 4, 3]), vec![3, 4, 5]);
/// ```
#[must_use]
pub fn normalize_page_result<T>(page: &Page, mut rows: Vec<T>) -> Vec<T> {
    normalize_page_result_in_place(page, &mut rows);
    rows
}

/// Run `fetch` on a composed query and return its rows in display order.
///
/// `fetch` is whatever executes SQL in the caller's stack; its error type is
/// passed through untouched.
pub fn find_page<T, E, F>(query: &QueryResult, page: &Page, fetch: F) -> Result<Vec<T>, E>
where
    F: FnOnce(&QueryResult) -> Result<Vec<T>, E>,
{
    fetch(query).map(|rows| normalize_page_result(page, rows))
}
