//! Core domain logic for Bookshelf.
//! This crate owns the catalog storage contract and both query strategies.

pub mod db;
pub mod engine;
pub mod logging;
pub mod model;
pub mod query;
pub mod repo;
pub mod service;

pub use engine::benchmark::{run_benchmark, BenchmarkReport};
pub use engine::{catalog_for, CatalogStrategy, DelegatedCatalog, InMemoryCatalog};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::book::{Book, BookDraft, BookId, BookValidationError};
pub use query::{
    BookFilter, Dimension, Page, Paged, SortKey, Strategy, LIST_PAGE_SIZE, STATS_PAGE_SIZE,
};
pub use repo::book_repo::{
    BookRepository, GroupCount, RepoError, RepoResult, SqliteBookRepository,
};
pub use service::catalog_service::CatalogService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
