//! Micro-benchmark pitting store aggregation against an in-process pipeline.
//!
//! # Responsibility
//! - Time one delegated aggregation query and one in-memory
//!   filter/count/sort pipeline over the same table.
//!
//! # Invariants
//! - The two legs run *different* predicates (the in-memory leg additionally
//!   filters by year range and a title substring). The timings are
//!   illustrative only and the mismatch is kept on purpose.
//! - Reported timings are wall-clock seconds rounded to 5 decimal places.

use crate::repo::book_repo::{BookRepository, RepoResult, SqliteBookRepository};
use log::info;
use rusqlite::Connection;
use std::collections::HashMap;
use std::ops::RangeInclusive;
use std::time::Instant;

const BENCH_GENRES: [&str; 4] = ["Science Fiction", "Fantasy", "History", "Drama"];
const BENCH_YEAR_RANGE: RangeInclusive<i64> = 1980..=2025;
const BENCH_TITLE_NEEDLE: char = 'a';
const BENCH_MIN_COUNT: u64 = 1;
const BENCH_RESULT_CAP: usize = 1_000_000;

/// Elapsed wall-clock seconds for each benchmark leg.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BenchmarkReport {
    pub delegated_secs: f64,
    pub in_memory_secs: f64,
}

/// Runs both benchmark legs and returns their timings.
pub fn run_benchmark(conn: &Connection) -> RepoResult<BenchmarkReport> {
    let delegated_secs = time_delegated_leg(conn)?;
    let in_memory_secs = time_in_memory_leg(conn)?;

    let report = BenchmarkReport {
        delegated_secs: round5(delegated_secs),
        in_memory_secs: round5(in_memory_secs),
    };
    info!(
        "event=benchmark module=engine status=ok delegated_secs={} in_memory_secs={}",
        report.delegated_secs, report.in_memory_secs
    );
    Ok(report)
}

/// Times the fully materialized store-side aggregation.
fn time_delegated_leg(conn: &Connection) -> RepoResult<f64> {
    let started_at = Instant::now();

    let mut stmt = conn.prepare(
        "SELECT author, COUNT(*) AS total_books
         FROM books
         WHERE genre IN ('Science Fiction', 'Fantasy', 'History', 'Drama')
         GROUP BY author
         HAVING total_books >= 0
         ORDER BY total_books DESC
         LIMIT 1000000;",
    )?;
    let mut rows = stmt.query([])?;
    let mut results: Vec<(String, i64)> = Vec::new();
    while let Some(row) = rows.next()? {
        results.push((row.get(0)?, row.get(1)?));
    }
    drop(results);

    Ok(started_at.elapsed().as_secs_f64())
}

/// Times the in-process pipeline: filter by genre set, year range and title
/// substring, count per author, threshold, sort descending, cap.
fn time_in_memory_leg(conn: &Connection) -> RepoResult<f64> {
    let repo = SqliteBookRepository::new(conn);
    let started_at = Instant::now();

    let books = repo.list_all()?;

    let mut counter: HashMap<String, u64> = HashMap::new();
    for book in books {
        let genre_matches = book
            .genre
            .as_deref()
            .is_some_and(|genre| BENCH_GENRES.contains(&genre));
        let year_matches = book.year.is_some_and(|year| BENCH_YEAR_RANGE.contains(&year));
        let title_matches = book
            .title
            .to_ascii_lowercase()
            .contains(BENCH_TITLE_NEEDLE);
        if genre_matches && year_matches && title_matches {
            *counter.entry(book.author).or_insert(0) += 1;
        }
    }

    let mut top_authors: Vec<(String, u64)> = counter
        .into_iter()
        .filter(|(_, count)| *count >= BENCH_MIN_COUNT)
        .collect();
    top_authors.sort_by(|a, b| b.1.cmp(&a.1));
    top_authors.truncate(BENCH_RESULT_CAP);
    drop(top_authors);

    Ok(started_at.elapsed().as_secs_f64())
}

fn round5(value: f64) -> f64 {
    (value * 100_000.0).round() / 100_000.0
}

#[cfg(test)]
mod tests {
    use super::round5;

    #[test]
    fn round5_keeps_five_decimal_places() {
        assert_eq!(round5(0.123_456_78), 0.12346);
        assert_eq!(round5(0.0), 0.0);
        assert_eq!(round5(1.000_004), 1.0);
    }
}
