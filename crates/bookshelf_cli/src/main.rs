//! Catalog seeding tool.
//!
//! # Responsibility
//! - Fill a database file with pseudo-random books for manual testing and
//!   benchmark runs.
//!
//! Usage: `bookshelf_cli [db-path] [count]` (defaults: `books.db`, 150000).

use bookshelf_core::db::open_db;
use bookshelf_core::{BookDraft, BookRepository, RepoResult, SqliteBookRepository};
use rand::rngs::ThreadRng;
use rand::seq::SliceRandom;
use rand::Rng;
use rusqlite::Connection;
use std::process::ExitCode;

const DEFAULT_COUNT: u32 = 150_000;

const GENRES: [&str; 10] = [
    "Science Fiction",
    "Fantasy",
    "Mystery",
    "Non-fiction",
    "Romance",
    "Horror",
    "Thriller",
    "History",
    "Biography",
    "Poetry",
];

const TITLE_WORDS: [&str; 24] = [
    "silent", "garden", "winter", "glass", "river", "letters", "shadow", "harvest", "burning",
    "distant", "hollow", "crown", "atlas", "midnight", "salt", "ember", "orchard", "thunder",
    "paper", "iron", "violet", "harbor", "echo", "stone",
];

const FIRST_NAMES: [&str; 12] = [
    "Ada", "Bruno", "Clara", "Derek", "Elena", "Felix", "Greta", "Hugo", "Irene", "Jonas",
    "Katya", "Lionel",
];

const LAST_NAMES: [&str; 12] = [
    "Alvarez", "Brennan", "Castellan", "Demir", "Eriksen", "Fontaine", "Grimaldi", "Hartwell",
    "Ishida", "Jovanovic", "Kowalski", "Lindqvist",
];

fn main() -> ExitCode {
    let mut args = std::env::args().skip(1);
    let db_path = args.next().unwrap_or_else(|| "books.db".to_string());
    let count = match args.next() {
        None => DEFAULT_COUNT,
        Some(raw) => match raw.parse::<u32>() {
            Ok(count) => count,
            Err(_) => {
                eprintln!("count must be a number, got `{raw}`");
                return ExitCode::from(2);
            }
        },
    };

    let mut conn = match open_db(&db_path) {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("can't open `{db_path}`: {err}");
            return ExitCode::FAILURE;
        }
    };

    match seed(&mut conn, count) {
        Ok(()) => {
            println!("inserted {count} books into {db_path}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("seeding failed: {err}");
            ExitCode::FAILURE
        }
    }
}

/// Inserts `count` random books inside one transaction.
fn seed(conn: &mut Connection, count: u32) -> RepoResult<()> {
    let mut rng = rand::thread_rng();

    let tx = conn.transaction().map_err(bookshelf_core::RepoError::from)?;
    {
        let repo = SqliteBookRepository::new(&tx);
        for _ in 0..count {
            repo.create_book(&random_draft(&mut rng))?;
        }
    }
    tx.commit().map_err(bookshelf_core::RepoError::from)?;

    Ok(())
}

fn random_draft(rng: &mut ThreadRng) -> BookDraft {
    BookDraft {
        title: random_title(rng),
        author: format!(
            "{} {}",
            FIRST_NAMES.choose(rng).unwrap_or(&"Ada"),
            LAST_NAMES.choose(rng).unwrap_or(&"Alvarez"),
        ),
        genre: GENRES.choose(rng).map(|genre| genre.to_string()),
        year: Some(rng.gen_range(1950..=2025)),
    }
}

fn random_title(rng: &mut ThreadRng) -> String {
    let word_count = rng.gen_range(2..=5);
    let words: Vec<&str> = TITLE_WORDS
        .choose_multiple(rng, word_count)
        .copied()
        .collect();
    let mut title = words.join(" ");
    if let Some(first) = title.get_mut(0..1) {
        first.make_ascii_uppercase();
    }
    title
}
