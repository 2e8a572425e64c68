//! # Catalog Benchmarks
//!
//! Performance benchmarks for marquee-core catalog operations.
//!
//! Run with: `cargo bench -p marquee-core`

use chrono::NaiveDate;
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use marquee_core::{Catalog, Film, User, UserId};
use std::hint::black_box;
use std::time::Duration;

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2000, 1, 1).expect("valid date")
}

/// Create a catalog with `size` users and `size` films, where film i is liked
/// by the first i % 50 users and every user befriends the next one.
fn create_catalog(size: usize) -> (Catalog, Vec<UserId>) {
    let mut catalog = Catalog::seeded(17);
    let users: Vec<UserId> = (0..size)
        .map(|i| {
            catalog
                .create_user(User::new(format!("u{i}@example.com"), format!("u{i}"), date()))
                .expect("user")
                .id
        })
        .collect();

    for i in 0..size {
        let film = catalog
            .create_film(Film::new(format!("film {i}"), date(), Duration::from_secs(5400)))
            .expect("film");
        for fan in users.iter().take(i % 50) {
            catalog.add_like(film.id, *fan).expect("like");
        }
    }

    for pair in users.windows(2) {
        catalog.add_friend(pair[0], pair[1]).expect("friend");
    }

    (catalog, users)
}

/// Create a catalog where every user is friends with one hub user.
fn create_star_catalog(size: usize) -> (Catalog, UserId) {
    let mut catalog = Catalog::seeded(23);
    let hub = catalog
        .create_user(User::new("hub@example.com", "hub", date()))
        .expect("hub")
        .id;

    for i in 1..size {
        let spoke = catalog
            .create_user(User::new(format!("s{i}@example.com"), format!("s{i}"), date()))
            .expect("spoke")
            .id;
        catalog.add_friend(hub, spoke).expect("friend");
    }

    (catalog, hub)
}

// =============================================================================
// BENCHMARKS
// =============================================================================

fn bench_top_films(c: &mut Criterion) {
    let mut group = c.benchmark_group("top_films");

    for size in [100, 1000, 10000].iter() {
        let (catalog, _) = create_catalog(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| black_box(catalog.top_films(10)));
        });
    }

    group.finish();
}

fn bench_friends_of_hub(c: &mut Criterion) {
    let mut group = c.benchmark_group("friends_of_hub");

    for size in [100, 1000, 10000].iter() {
        let (catalog, hub) = create_star_catalog(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| black_box(catalog.friends(hub)));
        });
    }

    group.finish();
}

fn bench_add_friend(c: &mut Criterion) {
    c.bench_function("add_friend_chain_1000", |b| {
        b.iter(|| black_box(create_catalog(1000)));
    });
}

criterion_group!(
    benches,
    bench_top_films,
    bench_friends_of_hub,
    bench_add_friend
);
criterion_main!(benches);
