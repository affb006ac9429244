//! Property-based tests for the cursor codec using proptest.
//!
//! These tests generate random keys and random strings to check that
//! decoding inverts encoding, that only the expected widths are accepted,
//! and that raw cursor bytes sort like the keys they encode.

use chrono::{DateTime, Utc};
use keyset::{
    CursorError, CursorKey, MAX_CURSOR_LEN, decode_int64_cursor, decode_time_and_int64_cursor,
    decode_time_cursor, encode_int64_cursor, encode_time_and_int64_cursor, encode_time_cursor,
};
use proptest::prelude::*;

/// Instants an `i64` of nanoseconds can represent exactly.
fn instant() -> impl Strategy<Value = DateTime<Utc>> {
    any::<i64>().prop_map(DateTime::from_timestamp_nanos)
}

/// Post-epoch instants, where byte order and time order agree.
fn post_epoch_instant() -> impl Strategy<Value = DateTime<Utc>> {
    (0..=i64::MAX).prop_map(DateTime::from_timestamp_nanos)
}

// =============================================================================
// Round Trip Property Tests
// =============================================================================

proptest! {
    /// Any integer survives encode then decode
    #[test]
    fn int64_round_trips(v in any::<i64>()) {
        let cursor = encode_int64_cursor(v);
        prop_assert_eq!(cursor.len(), 11);
        prop_assert_eq!(decode_int64_cursor(&cursor).unwrap(), v);
    }

    /// Any representable instant survives at nanosecond precision
    #[test]
    fn time_round_trips(t in instant()) {
        let cursor = encode_time_cursor(&t);
        prop_assert_eq!(decode_time_cursor(&cursor).unwrap(), t);
    }

    /// Composite keys keep both halves
    #[test]
    fn composite_round_trips(t in instant(), id in any::<i64>()) {
        let cursor = encode_time_and_int64_cursor(&t, id);
        prop_assert_eq!(cursor.len(), 22);
        prop_assert_eq!(decode_time_and_int64_cursor(&cursor).unwrap(), (t, id));
    }

    /// Cursors only use the URL-safe alphabet and never carry padding
    #[test]
    fn cursors_are_url_safe(t in instant(), id in any::<i64>()) {
        let cursor = encode_time_and_int64_cursor(&t, id);
        prop_assert!(
            cursor.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'),
            "unexpected character in {}", cursor
        );
    }
}

// =============================================================================
// Length Validation Property Tests
// =============================================================================

proptest! {
    /// Payloads of any width other than 8 bytes are rejected by the integer decoder
    #[test]
    fn int64_rejects_other_widths(bytes in prop::collection::vec(any::<u8>(), 0..40)) {
        prop_assume!(bytes.len() != 8);
        let cursor = base64_url(&bytes);
        let err = decode_int64_cursor(&cursor).unwrap_err();
        prop_assert!(err.is_length_error(), "expected length error, got {:?}", err);
    }

    /// Payloads of any width other than 16 bytes are rejected by the composite decoder
    #[test]
    fn composite_rejects_other_widths(bytes in prop::collection::vec(any::<u8>(), 0..40)) {
        prop_assume!(bytes.len() != 16);
        let cursor = base64_url(&bytes);
        match decode_time_and_int64_cursor(&cursor) {
            Err(CursorError::InvalidLength { expected, .. }) => prop_assert_eq!(expected, 16),
            other => prop_assert!(false, "expected length error, got {:?}", other),
        }
    }

    /// Arbitrary strings never panic the decoders
    #[test]
    fn arbitrary_strings_never_panic(s in ".{0,80}") {
        let _ = decode_int64_cursor(&s);
        let _ = decode_time_cursor(&s);
        let _ = decode_time_and_int64_cursor(&s);
    }

    /// Oversized input is rejected before decoding
    #[test]
    fn oversized_is_rejected(extra in 1usize..64) {
        let cursor = "A".repeat(MAX_CURSOR_LEN + extra);
        prop_assert!(decode_int64_cursor(&cursor).unwrap_err().is_length_error());
    }

    /// Oversized input with a byte outside the alphabet is an encoding error
    #[test]
    fn oversized_garbage_is_encoding_error(
        extra in 1usize..64,
        bad in "[!@#$%^&*()+=/.,;: ]",
        at in 0usize..64,
    ) {
        let mut cursor = "A".repeat(MAX_CURSOR_LEN + extra);
        cursor.replace_range(at..=at, &bad);
        let err = decode_time_cursor(&cursor).unwrap_err();
        prop_assert!(err.is_encoding_error(), "expected encoding error, got {:?}", err);
    }
}

// =============================================================================
// Ordering Property Tests
// =============================================================================

proptest! {
    /// Non-negative integers sort the same as their cursor bytes
    #[test]
    fn int64_bytes_preserve_order(a in 0..=i64::MAX, b in 0..=i64::MAX) {
        prop_assert_eq!(a.cmp(&b), a.to_bytes().cmp(&b.to_bytes()));
    }

    /// Negative integers also sort correctly among themselves
    #[test]
    fn negative_int64_bytes_preserve_order(a in i64::MIN..0, b in i64::MIN..0) {
        prop_assert_eq!(a.cmp(&b), a.to_bytes().cmp(&b.to_bytes()));
    }

    /// Post-epoch instants sort the same as their cursor bytes
    #[test]
    fn time_bytes_preserve_order(a in post_epoch_instant(), b in post_epoch_instant()) {
        prop_assert_eq!(a.cmp(&b), a.to_bytes().cmp(&b.to_bytes()));
    }

    /// Composite bytes order by time first, then by id
    #[test]
    fn composite_bytes_preserve_order(
        a in (post_epoch_instant(), 0..=i64::MAX),
        b in (post_epoch_instant(), 0..=i64::MAX),
    ) {
        prop_assert_eq!(a.cmp(&b), a.to_bytes().cmp(&b.to_bytes()));
    }

    /// Equal timestamps are broken by the id half
    #[test]
    fn composite_ties_break_on_id(t in post_epoch_instant(), a in 0..=i64::MAX, b in 0..=i64::MAX) {
        prop_assert_eq!(a.cmp(&b), (t, a).to_bytes().cmp(&(t, b).to_bytes()));
    }
}

fn base64_url(bytes: &[u8]) -> String {
    use base64::Engine;
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}
