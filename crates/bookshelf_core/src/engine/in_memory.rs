//! In-memory catalog strategy.
//!
//! # Responsibility
//! - Load the full table and perform filtering, sorting, grouping and
//!   windowing with in-process code.
//!
//! # Invariants
//! - Listing results must be identical to the delegated strategy for the
//!   same inputs and underlying data.
//! - Substring matching folds ASCII case only, matching SQLite `LIKE`.
//! - Sorting is stable; rows without a year sort first, matching SQLite
//!   NULL ordering.
//! - Statistics groups appear in first-seen table order.

use super::CatalogStrategy;
use crate::model::book::Book;
use crate::query::{BookFilter, Dimension, Page, Paged, SortKey, LIST_PAGE_SIZE, STATS_PAGE_SIZE};
use crate::repo::book_repo::{BookRepository, GroupCount, RepoResult, SqliteBookRepository};
use log::debug;
use rusqlite::Connection;
use std::collections::HashMap;
use std::time::Instant;

/// Catalog strategy that scans the whole table into memory per request.
pub struct InMemoryCatalog<'conn> {
    repo: SqliteBookRepository<'conn>,
}

impl<'conn> InMemoryCatalog<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self {
            repo: SqliteBookRepository::new(conn),
        }
    }
}

impl CatalogStrategy for InMemoryCatalog<'_> {
    fn list_books(
        &self,
        filter: &BookFilter,
        sort: Option<SortKey>,
        page: Page,
    ) -> RepoResult<Paged<Book>> {
        let started_at = Instant::now();
        let mut books = self.repo.list_all()?;

        if let Some(author) = filter.author_contains.as_deref() {
            books.retain(|book| contains_fold(&book.author, author));
        }
        if let Some(genre) = filter.genre_contains.as_deref() {
            // Rows without a genre never match, like `genre LIKE ?` on NULL.
            books.retain(|book| {
                book.genre
                    .as_deref()
                    .is_some_and(|value| contains_fold(value, genre))
            });
        }
        if let Some(year) = filter.year {
            books.retain(|book| book.year == Some(year));
        }

        match sort {
            Some(SortKey::Title) => books.sort_by(|a, b| a.title.cmp(&b.title)),
            Some(SortKey::Author) => books.sort_by(|a, b| a.author.cmp(&b.author)),
            Some(SortKey::Year) => books.sort_by(|a, b| a.year.cmp(&b.year)),
            None => {}
        }

        let total = books.len() as u64;
        let items = slice_page(books, page.offset(LIST_PAGE_SIZE), LIST_PAGE_SIZE);

        debug!(
            "event=list_books module=engine strategy=in_memory status=ok page={} rows={} total={} duration_ms={}",
            page.number(),
            items.len(),
            total,
            started_at.elapsed().as_millis()
        );
        Ok(Paged { items, total })
    }

    fn group_stats(&self, dimension: Dimension, page: Page) -> RepoResult<Paged<GroupCount>> {
        let started_at = Instant::now();
        let books = self.repo.list_all()?;
        let groups = count_groups(&books, dimension);

        let total = groups.len() as u64;
        let items = slice_page(groups, page.offset(STATS_PAGE_SIZE), STATS_PAGE_SIZE);

        debug!(
            "event=group_stats module=engine strategy=in_memory status=ok dimension={} page={} groups={} total={} duration_ms={}",
            dimension.as_param(),
            page.number(),
            items.len(),
            total,
            started_at.elapsed().as_millis()
        );
        Ok(Paged { items, total })
    }
}

/// ASCII-case-insensitive "contains" match.
///
/// SQLite `LIKE` folds only ASCII letters, so the in-process side must not
/// use full Unicode lowercasing or the strategies would diverge.
pub(crate) fn contains_fold(haystack: &str, needle: &str) -> bool {
    haystack
        .to_ascii_lowercase()
        .contains(&needle.to_ascii_lowercase())
}

/// Counts members per group key, preserving first-seen table order.
fn count_groups(books: &[Book], dimension: Dimension) -> Vec<GroupCount> {
    let mut order: Vec<Option<String>> = Vec::new();
    let mut counts: HashMap<Option<String>, u64> = HashMap::new();

    for book in books {
        let key = match dimension {
            Dimension::Author => Some(book.author.clone()),
            Dimension::Genre => book.genre.clone(),
        };
        match counts.get_mut(&key) {
            Some(count) => *count += 1,
            None => {
                counts.insert(key.clone(), 1);
                order.push(key);
            }
        }
    }

    order
        .into_iter()
        .map(|key| {
            let count = counts.get(&key).copied().unwrap_or(0);
            GroupCount { key, count }
        })
        .collect()
}

/// Slices one page window out of the fully materialized result.
///
/// An offset past the end yields an empty page.
fn slice_page<T>(items: Vec<T>, offset: u64, page_size: u32) -> Vec<T> {
    items
        .into_iter()
        .skip(offset as usize)
        .take(page_size as usize)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{contains_fold, count_groups, slice_page};
    use crate::model::book::Book;
    use crate::query::Dimension;

    fn book(id: i64, author: &str, genre: Option<&str>) -> Book {
        Book {
            id,
            title: format!("Book {id}"),
            author: author.to_string(),
            genre: genre.map(str::to_string),
            year: None,
        }
    }

    #[test]
    fn contains_fold_ignores_ascii_case_only() {
        assert!(contains_fold("Ursula K. Le Guin", "le guin"));
        assert!(contains_fold("HISTORY", "history"));
        assert!(!contains_fold("History", "poetry"));
        // Non-ASCII case is not folded, same as SQLite LIKE.
        assert!(!contains_fold("ÉMILE", "émile"));
    }

    #[test]
    fn count_groups_preserves_first_seen_order() {
        let books = vec![
            book(1, "B", Some("Fantasy")),
            book(2, "A", None),
            book(3, "B", Some("Horror")),
            book(4, "C", None),
        ];

        let by_author = count_groups(&books, Dimension::Author);
        let keys: Vec<_> = by_author.iter().map(|g| g.key.clone()).collect();
        assert_eq!(
            keys,
            vec![
                Some("B".to_string()),
                Some("A".to_string()),
                Some("C".to_string())
            ]
        );
        assert_eq!(by_author[0].count, 2);

        let by_genre = count_groups(&books, Dimension::Genre);
        assert_eq!(by_genre.len(), 3, "absent genre forms its own group");
        assert_eq!(by_genre[1].key, None);
        assert_eq!(by_genre[1].count, 2);
    }

    #[test]
    fn slice_page_past_the_end_is_empty() {
        let items = vec![1, 2, 3];
        assert_eq!(slice_page(items.clone(), 0, 2), vec![1, 2]);
        assert_eq!(slice_page(items.clone(), 2, 2), vec![3]);
        assert!(slice_page(items, 10, 2).is_empty());
    }
}
