//! Error types for cursor decoding and input validation.

use thiserror::Error;

/// Errors that can occur when decoding a cursor.
///
/// Both variants describe bad user-supplied data. The query composer never
/// surfaces them: it logs a warning and falls back to the first page.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum CursorError {
    /// The payload is not valid unpadded base64url.
    #[error("invalid cursor encoding: {0}")]
    InvalidEncoding(#[from] base64::DecodeError),
    /// The decoded payload has the wrong byte count for the requested key shape.
    #[error("invalid cursor length: expected {expected} bytes, got {actual}")]
    InvalidLength {
        /// Byte width required by the key shape (8 or 16).
        expected: usize,
        /// Byte width actually decoded.
        actual: usize,
    },
}

impl CursorError {
    /// Returns `true` if the base64 layer rejected the cursor.
    #[inline]
    #[must_use]
    pub const fn is_encoding_error(&self) -> bool {
        matches!(self, Self::InvalidEncoding(_))
    }

    /// Returns `true` if the cursor decoded to the wrong number of bytes.
    #[inline]
    #[must_use]
    pub const fn is_length_error(&self) -> bool {
        matches!(self, Self::InvalidLength { .. })
    }
}

/// Errors raised when external text is converted into an [`Order`](crate::Order)
/// or [`Direction`](crate::Direction).
///
/// These mark caller mistakes (a misspelled order in configuration, a bad
/// enum literal in code), not bad page state from an end user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ParseError {
    /// Not one of `asc`, `ascending`, `desc`, `descending`.
    #[error("invalid order: {0:?} (expected \"asc\" or \"desc\")")]
    InvalidOrder(String),
    /// Not one of `next`, `prev`, `previous`.
    #[error("invalid direction: {0:?} (expected \"next\" or \"prev\")")]
    InvalidDirection(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_error_classification() {
        let err = CursorError::InvalidLength {
            expected: 8,
            actual: 3,
        };
        assert!(err.is_length_error());
        assert!(!err.is_encoding_error());

        let err = CursorError::from(base64::DecodeError::InvalidLength(5));
        assert!(err.is_encoding_error());
        assert!(!err.is_length_error());
    }

    #[test]
    fn test_cursor_error_display() {
        let err = CursorError::InvalidLength {
            expected: 16,
            actual: 8,
        };
        assert_eq!(
            err.to_string(),
            "invalid cursor length: expected 16 bytes, got 8"
        );
    }

    #[test]
    fn test_parse_error_display() {
        let err = ParseError::InvalidOrder("sideways".to_string());
        assert_eq!(
            err.to_string(),
            "invalid order: \"sideways\" (expected \"asc\" or \"desc\")"
        );
    }
}
