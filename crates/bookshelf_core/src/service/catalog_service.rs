//! Catalog mutation use-cases.
//!
//! # Responsibility
//! - Provide stable CRUD entry points for presentation callers.
//! - Delegate persistence to repository implementations.
//!
//! # Invariants
//! - Service APIs never bypass repository validation contracts.
//! - The service layer remains storage-agnostic.

use crate::model::book::{Book, BookDraft, BookId};
use crate::repo::book_repo::{BookRepository, RepoResult};

/// Use-case wrapper for book CRUD operations.
pub struct CatalogService<R: BookRepository> {
    repo: R,
}

impl<R: BookRepository> CatalogService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Adds a book and returns its store-assigned id.
    pub fn add_book(&self, draft: &BookDraft) -> RepoResult<BookId> {
        self.repo.create_book(draft)
    }

    /// Fetches a book for display or edit; `None` when the id is absent.
    pub fn fetch_book(&self, id: BookId) -> RepoResult<Option<Book>> {
        self.repo.get_book(id)
    }

    /// Replaces every field except the id.
    ///
    /// Returns the repository's `NotFound` unchanged when the id is absent.
    pub fn edit_book(&self, id: BookId, draft: &BookDraft) -> RepoResult<()> {
        self.repo.update_book(id, draft)
    }

    /// Removes a book; a missing id is a no-op.
    pub fn remove_book(&self, id: BookId) -> RepoResult<()> {
        self.repo.delete_book(id)
    }
}
