//! Benchmarks for cursor coding and keyset query composition.
//!
//! Run with: cargo bench -p keyset

use chrono::{DateTime, Utc};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use keyset::{
    Direction, KeyColumns, Order, Page, Postgres, compose, decode_int64_cursor,
    decode_time_and_int64_cursor, encode_int64_cursor, encode_time_and_int64_cursor,
    normalize_page_result, paginate, postgres, query_by_time_and_id,
};
use std::hint::black_box;

fn instant() -> DateTime<Utc> {
    DateTime::from_timestamp(1_762_905_600, 123_456_789).unwrap_or_default()
}

// =============================================================================
// Cursor Codec Benchmarks
// =============================================================================

fn bench_cursor_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("cursor");

    group.bench_function("encode_int64", |b| {
        b.iter(|| encode_int64_cursor(black_box(1_234_567)))
    });

    let t = instant();
    group.bench_function("encode_time_and_id", |b| {
        b.iter(|| encode_time_and_int64_cursor(black_box(&t), black_box(42)))
    });

    let int_cursor = encode_int64_cursor(1_234_567);
    group.bench_function("decode_int64", |b| {
        b.iter(|| decode_int64_cursor(black_box(&int_cursor)))
    });

    let composite = encode_time_and_int64_cursor(&t, 42);
    group.bench_function("decode_time_and_id", |b| {
        b.iter(|| decode_time_and_int64_cursor(black_box(&composite)))
    });

    // Rejected inputs should fail fast
    let inputs = [
        ("garbage", "!!not-a-cursor!!".to_string()),
        ("wrong_width", encode_int64_cursor(7)),
        ("oversized", "A".repeat(200)),
    ];
    for (name, input) in &inputs {
        group.bench_with_input(BenchmarkId::new("decode_invalid", name), input, |b, s| {
            b.iter(|| decode_time_and_int64_cursor(black_box(s)))
        });
    }

    group.finish();
}

// =============================================================================
// Query Composition Benchmarks
// =============================================================================

fn bench_compose(c: &mut Criterion) {
    let mut group = c.benchmark_group("compose");
    let keys = KeyColumns::time_and_id("created_at", "id");
    let cursor = encode_time_and_int64_cursor(&instant(), 42);

    group.bench_function("first_page", |b| {
        let page = Page::new(20);
        b.iter(|| {
            compose(
                black_box("SELECT id, title FROM posts"),
                &page,
                Order::Descending,
                &keys,
                &Postgres,
            )
        })
    });

    group.bench_function("next_page_with_where", |b| {
        let page = Page::new(20).with_cursor(cursor.clone());
        b.iter(|| {
            query_by_time_and_id(
                black_box("SELECT id, title FROM posts WHERE published = TRUE"),
                &page,
                Order::Descending,
                "created_at",
                "id",
                &Postgres,
            )
        })
    });

    group.bench_function("previous_page_scope", |b| {
        let page = Page::new(20)
            .with_cursor(cursor.clone())
            .with_direction(Direction::Previous);
        b.iter(|| {
            paginate(
                postgres(black_box("posts")).fields(&["id", "title", "created_at"]),
                &page,
                Order::Descending,
                &keys,
            )
            .build()
        })
    });

    group.finish();
}

// =============================================================================
// Normalization Benchmarks
// =============================================================================

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");
    let page = Page::new(100).with_direction(Direction::Previous);

    for size in [10i64, 100, 1000] {
        let rows: Vec<i64> = (0..size).collect();
        group.bench_with_input(BenchmarkId::new("previous", size), &rows, |b, rows| {
            b.iter(|| normalize_page_result(&page, black_box(rows.clone())))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_cursor_codec, bench_compose, bench_normalize);

criterion_main!(benches);
