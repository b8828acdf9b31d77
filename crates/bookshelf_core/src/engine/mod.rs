//! Query/aggregation strategies over the book store.
//!
//! # Responsibility
//! - Define the one polymorphic seam between the two query strategies.
//! - Select an implementation from the request-time strategy flag.
//!
//! # Invariants
//! - Both strategies honor the same filter/sort/page contract and must
//!   return identical listing results for the same inputs and data.
//! - Statistics group *order* is the one documented per strategy:
//!   store-defined when delegated, first-seen when in-memory.

use crate::model::book::Book;
use crate::query::{BookFilter, Dimension, Page, Paged, SortKey, Strategy};
use crate::repo::book_repo::{GroupCount, RepoResult};
use rusqlite::Connection;

pub mod benchmark;
mod delegated;
mod in_memory;

pub use delegated::DelegatedCatalog;
pub use in_memory::InMemoryCatalog;

/// One catalog query strategy: listing and statistics over the same store.
///
/// Page sizes are fixed per view (`LIST_PAGE_SIZE`, `STATS_PAGE_SIZE`);
/// a page beyond the last yields an empty item set, not an error.
pub trait CatalogStrategy {
    /// Returns one listing page plus the pagination-independent total.
    fn list_books(
        &self,
        filter: &BookFilter,
        sort: Option<SortKey>,
        page: Page,
    ) -> RepoResult<Paged<Book>>;

    /// Returns one page of (group key, count) statistics for the dimension.
    fn group_stats(&self, dimension: Dimension, page: Page) -> RepoResult<Paged<GroupCount>>;
}

/// Selects the strategy implementation for a request-scoped connection.
pub fn catalog_for(strategy: Strategy, conn: &Connection) -> Box<dyn CatalogStrategy + '_> {
    match strategy {
        Strategy::Delegated => Box::new(DelegatedCatalog::new(conn)),
        Strategy::InMemory => Box::new(InMemoryCatalog::new(conn)),
    }
}
