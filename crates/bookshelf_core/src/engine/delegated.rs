//! Store-delegated catalog strategy.
//!
//! # Responsibility
//! - Push predicate evaluation, ordering, counting and the page window into
//!   SQLite through the repository's query facility.
//!
//! # Invariants
//! - The returned total reflects all rows passing the filters, independent
//!   of the requested page.
//! - The page is a contiguous slice of the globally filtered-and-sorted
//!   result at offset `(page - 1) * page_size`.

use super::CatalogStrategy;
use crate::model::book::Book;
use crate::query::{BookFilter, Dimension, Page, Paged, SortKey, LIST_PAGE_SIZE, STATS_PAGE_SIZE};
use crate::repo::book_repo::{BookRepository, GroupCount, RepoResult, SqliteBookRepository};
use log::debug;
use rusqlite::Connection;
use std::time::Instant;

/// Catalog strategy that delegates all query work to the store.
pub struct DelegatedCatalog<'conn> {
    repo: SqliteBookRepository<'conn>,
}

impl<'conn> DelegatedCatalog<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self {
            repo: SqliteBookRepository::new(conn),
        }
    }
}

impl CatalogStrategy for DelegatedCatalog<'_> {
    fn list_books(
        &self,
        filter: &BookFilter,
        sort: Option<SortKey>,
        page: Page,
    ) -> RepoResult<Paged<Book>> {
        let started_at = Instant::now();
        let total = self.repo.count_books(filter)?;
        let items = self
            .repo
            .query_books(filter, sort, LIST_PAGE_SIZE, page.offset(LIST_PAGE_SIZE))?;

        debug!(
            "event=list_books module=engine strategy=delegated status=ok page={} rows={} total={} duration_ms={}",
            page.number(),
            items.len(),
            total,
            started_at.elapsed().as_millis()
        );
        Ok(Paged { items, total })
    }

    fn group_stats(&self, dimension: Dimension, page: Page) -> RepoResult<Paged<GroupCount>> {
        let started_at = Instant::now();
        let total = self.repo.group_total(dimension)?;
        let items =
            self.repo
                .group_counts(dimension, STATS_PAGE_SIZE, page.offset(STATS_PAGE_SIZE))?;

        debug!(
            "event=group_stats module=engine strategy=delegated status=ok dimension={} page={} groups={} total={} duration_ms={}",
            dimension.as_param(),
            page.number(),
            items.len(),
            total,
            started_at.elapsed().as_millis()
        );
        Ok(Paged { items, total })
    }
}
