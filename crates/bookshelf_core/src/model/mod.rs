//! Catalog domain model.
//!
//! # Responsibility
//! - Define the canonical book record and its write-side draft.
//!
//! # Invariants
//! - Every persisted book is identified by a stable `BookId`.
//! - Deletion is hard delete; ids are never reused.

pub mod book;
