//! Book domain model.
//!
//! # Responsibility
//! - Define the canonical book record stored in the `books` table.
//! - Separate the immutable id from the replaceable field set.
//!
//! # Invariants
//! - `id` is assigned by the store, immutable, and never reused.
//! - `title` and `author` are required; `genre` and `year` are optional.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store-assigned, monotonically increasing identifier.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type BookId = i64;

/// Canonical persisted book record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Stable store-assigned id.
    pub id: BookId,
    pub title: String,
    pub author: String,
    /// Free-text genre label; absent genre forms its own statistics group.
    pub genre: Option<String>,
    pub year: Option<i64>,
}

/// Write model: every book field except the id.
///
/// Used by both create and edit paths; the store assigns or preserves the id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookDraft {
    pub title: String,
    pub author: String,
    pub genre: Option<String>,
    pub year: Option<i64>,
}

impl BookDraft {
    /// Creates a draft with the required fields and no optional metadata.
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            genre: None,
            year: None,
        }
    }

    /// Checks required-field presence.
    ///
    /// Presence is the only validation the catalog enforces; everything else
    /// is left to the database, matching the storage contract.
    pub fn validate(&self) -> Result<(), BookValidationError> {
        if self.title.trim().is_empty() {
            return Err(BookValidationError::MissingTitle);
        }
        if self.author.trim().is_empty() {
            return Err(BookValidationError::MissingAuthor);
        }
        Ok(())
    }
}

impl Book {
    /// Returns the draft that would reproduce this record on edit.
    pub fn to_draft(&self) -> BookDraft {
        BookDraft {
            title: self.title.clone(),
            author: self.author.clone(),
            genre: self.genre.clone(),
            year: self.year,
        }
    }
}

/// Required-field presence failure for create/edit input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookValidationError {
    MissingTitle,
    MissingAuthor,
}

impl Display for BookValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingTitle => write!(f, "book title is required"),
            Self::MissingAuthor => write!(f, "book author is required"),
        }
    }
}

impl Error for BookValidationError {}
