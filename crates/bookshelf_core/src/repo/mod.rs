//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the record-store contract for book CRUD and delegated queries.
//! - Isolate SQLite query details from strategy/presentation code.
//!
//! # Invariants
//! - Repository writes must enforce `BookDraft::validate()` before SQL.
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.

pub mod book_repo;
