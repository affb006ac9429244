//! Cursor encoding/decoding for keyset pagination.
//!
//! A cursor is the sort key of a page's boundary row, written as fixed-width
//! big-endian bytes and wrapped in unpadded base64url:
//!
//! | Shape            | Bytes | Layout                                          |
//! |------------------|-------|-------------------------------------------------|
//! | `i64`            | 8     | two's-complement, big-endian                    |
//! | `DateTime<Utc>`  | 8     | nanoseconds since the Unix epoch, big-endian    |
//! | `(DateTime, i64)`| 16    | timestamp (8) followed by integer (8)           |
//!
//! Big-endian byte order makes byte-wise comparison equal numeric comparison of
//! the unsigned 64-bit word, so for non-negative keys (and post-epoch instants)
//! the raw cursor bytes sort the same way the keys do. Negative values keep
//! their two's-complement pattern and therefore sort above every non-negative
//! value; decode always inverts encode exactly regardless of sign.
//!
//! # Security Note
//!
//! Cursors are opaque, not secret. Anyone can decode them and anyone can forge
//! one. Do not rely on a cursor to restrict which rows a caller can reach.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, TimeZone, Utc};

use crate::error::CursorError;

/// Longest cursor string accepted by [`decode`], in characters.
///
/// The widest shape (16 bytes) encodes to 22 characters. Anything far beyond
/// that is rejected before base64 decoding allocates.
pub const MAX_CURSOR_LEN: usize = 64;

/// A sort key that can be written into a fixed-width cursor.
///
/// Implemented for the three supported key shapes: `i64`, `DateTime<Utc>` and
/// the composite `(DateTime<Utc>, i64)`.
pub trait CursorKey: Sized {
    /// Exact number of bytes the key occupies on the wire.
    const WIDTH: usize;

    /// Append the big-endian representation of the key to `out`.
    fn write_bytes(&self, out: &mut Vec<u8>);

    /// Read a key back from exactly [`Self::WIDTH`] bytes.
    ///
    /// Returns `None` if `bytes` is shorter than the key width.
    fn read_bytes(bytes: &[u8]) -> Option<Self>;

    /// The raw cursor bytes, before base64.
    ///
    /// Useful for ordering checks: comparing two byte vectors compares the
    /// keys as unsigned 64-bit words.
    fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(Self::WIDTH);
        self.write_bytes(&mut out);
        out
    }
}

impl CursorKey for i64 {
    const WIDTH: usize = 8;

    #[inline]
    fn write_bytes(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_be_bytes());
    }

    #[inline]
    fn read_bytes(bytes: &[u8]) -> Option<Self> {
        bytes.first_chunk::<8>().map(|b| Self::from_be_bytes(*b))
    }
}

impl CursorKey for DateTime<Utc> {
    const WIDTH: usize = 8;

    #[inline]
    fn write_bytes(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&unix_nanos(self).to_be_bytes());
    }

    #[inline]
    fn read_bytes(bytes: &[u8]) -> Option<Self> {
        bytes
            .first_chunk::<8>()
            .map(|b| DateTime::from_timestamp_nanos(i64::from_be_bytes(*b)))
    }
}

impl CursorKey for (DateTime<Utc>, i64) {
    const WIDTH: usize = 16;

    fn write_bytes(&self, out: &mut Vec<u8>) {
        self.0.write_bytes(out);
        self.1.write_bytes(out);
    }

    fn read_bytes(bytes: &[u8]) -> Option<Self> {
        let (time, rest) = bytes.split_first_chunk::<8>()?;
        let time = DateTime::<Utc>::read_bytes(time)?;
        let id = i64::read_bytes(rest)?;
        Some((time, id))
    }
}

/// Nanoseconds since the Unix epoch.
///
/// Instants outside the range an `i64` of nanoseconds can hold (roughly the
/// years 1677 to 2262) saturate to the nearest bound.
fn unix_nanos(t: &DateTime<Utc>) -> i64 {
    t.timestamp_nanos_opt()
        .unwrap_or(if t.timestamp() < 0 { i64::MIN } else { i64::MAX })
}

/// Encode a key into an opaque base64url cursor.
#[must_use]
pub fn encode<K: CursorKey>(key: &K) -> String {
    URL_SAFE_NO_PAD.encode(key.to_bytes())
}

/// Decode a cursor produced by [`encode`] for the same key shape.
///
/// # Errors
///
/// - [`CursorError::InvalidEncoding`] if the string is not unpadded base64url.
/// - [`CursorError::InvalidLength`] if the payload is not exactly `K::WIDTH`
///   bytes, or the string is longer than [`MAX_CURSOR_LEN`].
pub fn decode<K: CursorKey>(cursor: &str) -> Result<K, CursorError> {
    if cursor.len() > MAX_CURSOR_LEN {
        return Err(oversized_error(cursor, K::WIDTH));
    }
    let bytes = URL_SAFE_NO_PAD.decode(cursor)?;
    let invalid_length = || CursorError::InvalidLength {
        expected: K::WIDTH,
        actual: bytes.len(),
    };
    if bytes.len() != K::WIDTH {
        return Err(invalid_length());
    }
    K::read_bytes(&bytes).ok_or_else(invalid_length)
}

/// Classify an over-long cursor without decoding it.
///
/// A character outside the unpadded base64url alphabet is an encoding error,
/// as it would be for a short cursor. Otherwise the payload is too long.
fn oversized_error(cursor: &str, expected: usize) -> CursorError {
    let invalid = cursor
        .bytes()
        .enumerate()
        .find(|(_, b)| !(b.is_ascii_alphanumeric() || *b == b'-' || *b == b'_'));
    match invalid {
        Some((offset, byte)) => base64::DecodeError::InvalidByte(offset, byte).into(),
        None => CursorError::InvalidLength {
            expected,
            actual: cursor.len() * 3 / 4,
        },
    }
}

/// Encode a signed 64-bit integer key.
#[must_use]
pub fn encode_int64_cursor(id: i64) -> String {
    encode(&id)
}

/// Decode an integer cursor produced by [`encode_int64_cursor`].
pub fn decode_int64_cursor(cursor: &str) -> Result<i64, CursorError> {
    decode(cursor)
}

/// Encode a timestamp key. The instant is normalized to UTC first.
#[must_use]
pub fn encode_time_cursor<Tz: TimeZone>(t: &DateTime<Tz>) -> String {
    encode(&t.with_timezone(&Utc))
}

/// Decode a timestamp cursor produced by [`encode_time_cursor`].
pub fn decode_time_cursor(cursor: &str) -> Result<DateTime<Utc>, CursorError> {
    decode(cursor)
}

/// Encode a composite `(time, id)` key.
#[must_use]
pub fn encode_time_and_int64_cursor<Tz: TimeZone>(t: &DateTime<Tz>, id: i64) -> String {
    encode(&(t.with_timezone(&Utc), id))
}

/// Decode a composite cursor produced by [`encode_time_and_int64_cursor`].
pub fn decode_time_and_int64_cursor(cursor: &str) -> Result<(DateTime<Utc>, i64), CursorError> {
    decode(cursor)
}
