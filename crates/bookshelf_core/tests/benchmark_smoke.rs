use bookshelf_core::db::open_db_in_memory;
use bookshelf_core::{run_benchmark, BookDraft, BookRepository, SqliteBookRepository};

#[test]
fn benchmark_reports_rounded_non_negative_timings() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteBookRepository::new(&conn);

    // A few rows that pass each leg's filters plus some that pass neither.
    let rows = [
        ("A tale of dust", "N. Okorafor", Some("Fantasy"), Some(2010)),
        ("Starlight archive", "N. Okorafor", Some("Science Fiction"), Some(1995)),
        ("Quiet rooms", "P. Highsmith", Some("Mystery"), Some(1962)),
        ("Maps and legends", "M. Chabon", Some("History"), None),
        ("Drama in amber", "T. Stoppard", Some("Drama"), Some(1984)),
    ];
    for (title, author, genre, year) in rows {
        repo.create_book(&BookDraft {
            title: title.to_string(),
            author: author.to_string(),
            genre: genre.map(str::to_string),
            year,
        })
        .unwrap();
    }

    let report = run_benchmark(&conn).unwrap();

    assert!(report.delegated_secs >= 0.0);
    assert!(report.in_memory_secs >= 0.0);
    assert!(report.delegated_secs.is_finite());
    assert!(report.in_memory_secs.is_finite());

    // Timings are already rounded to 5 decimal places.
    let rounded = (report.delegated_secs * 100_000.0).round() / 100_000.0;
    assert_eq!(rounded, report.delegated_secs);
    let rounded = (report.in_memory_secs * 100_000.0).round() / 100_000.0;
    assert_eq!(rounded, report.in_memory_secs);
}

#[test]
fn benchmark_runs_on_an_empty_catalog() {
    let conn = open_db_in_memory().unwrap();
    let report = run_benchmark(&conn).unwrap();
    assert!(report.delegated_secs >= 0.0);
    assert!(report.in_memory_secs >= 0.0);
}
