//! Book repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide durable CRUD over the `books` table.
//! - Provide the store-delegated filter/sort/count/window and grouping
//!   facilities the delegated strategy builds on.
//!
//! # Invariants
//! - Write paths call `BookDraft::validate()` before SQL mutations.
//! - `delete_book` is an idempotent no-op on missing ids.
//! - `update_book` reports a missing id as `NotFound` instead of silently
//!   claiming the write happened.

use crate::db::DbError;
use crate::model::book::{Book, BookDraft, BookId, BookValidationError};
use crate::query::{BookFilter, Dimension, SortKey};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const BOOK_SELECT_SQL: &str = "SELECT id, title, author, genre, year FROM books";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for book persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(BookValidationError),
    Db(DbError),
    NotFound(BookId),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "book not found: {id}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_) => None,
        }
    }
}

impl From<BookValidationError> for RepoError {
    fn from(value: BookValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// One statistics row: grouping key plus member count.
///
/// The key is `None` for the NULL-genre group; author keys are always set
/// because the column is NOT NULL.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupCount {
    pub key: Option<String>,
    pub count: u64,
}

/// Record-store contract for book CRUD and delegated query facilities.
pub trait BookRepository {
    fn create_book(&self, draft: &BookDraft) -> RepoResult<BookId>;
    fn get_book(&self, id: BookId) -> RepoResult<Option<Book>>;
    fn update_book(&self, id: BookId, draft: &BookDraft) -> RepoResult<()>;
    fn delete_book(&self, id: BookId) -> RepoResult<()>;
    /// Full-table snapshot in store order, no filtering.
    fn list_all(&self) -> RepoResult<Vec<Book>>;
    /// Filtered row count, independent of any pagination window.
    fn count_books(&self, filter: &BookFilter) -> RepoResult<u64>;
    /// Filtered, optionally sorted window of rows.
    fn query_books(
        &self,
        filter: &BookFilter,
        sort: Option<SortKey>,
        limit: u32,
        offset: u64,
    ) -> RepoResult<Vec<Book>>;
    /// One window of (group key, member count) rows. Group order is whatever
    /// the store produces; callers must not rely on it.
    fn group_counts(&self, dimension: Dimension, limit: u32, offset: u64)
        -> RepoResult<Vec<GroupCount>>;
    /// Number of distinct groups, the NULL group included.
    fn group_total(&self, dimension: Dimension) -> RepoResult<u64>;
}

/// SQLite-backed book repository borrowing a request-scoped connection.
pub struct SqliteBookRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteBookRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl BookRepository for SqliteBookRepository<'_> {
    fn create_book(&self, draft: &BookDraft) -> RepoResult<BookId> {
        draft.validate()?;

        self.conn.execute(
            "INSERT INTO books (title, author, genre, year) VALUES (?1, ?2, ?3, ?4);",
            params![
                draft.title.as_str(),
                draft.author.as_str(),
                draft.genre.as_deref(),
                draft.year,
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn get_book(&self, id: BookId) -> RepoResult<Option<Book>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{BOOK_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query(params![id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_book_row(row)?));
        }

        Ok(None)
    }

    fn update_book(&self, id: BookId, draft: &BookDraft) -> RepoResult<()> {
        draft.validate()?;

        let changed = self.conn.execute(
            "UPDATE books SET title = ?1, author = ?2, genre = ?3, year = ?4 WHERE id = ?5;",
            params![
                draft.title.as_str(),
                draft.author.as_str(),
                draft.genre.as_deref(),
                draft.year,
                id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn delete_book(&self, id: BookId) -> RepoResult<()> {
        // Idempotent by contract: 0 rows changed is not an error.
        self.conn
            .execute("DELETE FROM books WHERE id = ?1;", params![id])?;
        Ok(())
    }

    fn list_all(&self) -> RepoResult<Vec<Book>> {
        let mut stmt = self.conn.prepare(&format!("{BOOK_SELECT_SQL};"))?;
        let mut rows = stmt.query([])?;
        let mut books = Vec::new();

        while let Some(row) = rows.next()? {
            books.push(parse_book_row(row)?);
        }

        Ok(books)
    }

    fn count_books(&self, filter: &BookFilter) -> RepoResult<u64> {
        let mut sql = String::from("SELECT COUNT(*) FROM books WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();
        push_filter_clauses(&mut sql, &mut bind_values, filter);

        let count = self
            .conn
            .prepare(&sql)?
            .query_row(params_from_iter(bind_values), |row| row.get::<_, i64>(0))?;

        Ok(count.max(0) as u64)
    }

    fn query_books(
        &self,
        filter: &BookFilter,
        sort: Option<SortKey>,
        limit: u32,
        offset: u64,
    ) -> RepoResult<Vec<Book>> {
        let mut sql = format!("{BOOK_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();
        push_filter_clauses(&mut sql, &mut bind_values, filter);

        if let Some(sort) = sort {
            sql.push_str(" ORDER BY ");
            sql.push_str(sort.as_column());
        }

        sql.push_str(" LIMIT ? OFFSET ?");
        bind_values.push(Value::Integer(i64::from(limit)));
        bind_values.push(Value::Integer(offset as i64));

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut books = Vec::new();

        while let Some(row) = rows.next()? {
            books.push(parse_book_row(row)?);
        }

        Ok(books)
    }

    fn group_counts(
        &self,
        dimension: Dimension,
        limit: u32,
        offset: u64,
    ) -> RepoResult<Vec<GroupCount>> {
        let column = dimension.as_column();
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {column}, COUNT(*) FROM books GROUP BY {column} LIMIT ?1 OFFSET ?2;"
        ))?;

        let mut rows = stmt.query(params![limit, offset as i64])?;
        let mut groups = Vec::new();

        while let Some(row) = rows.next()? {
            let count: i64 = row.get(1)?;
            groups.push(GroupCount {
                key: row.get::<_, Option<String>>(0)?,
                count: count.max(0) as u64,
            });
        }

        Ok(groups)
    }

    fn group_total(&self, dimension: Dimension) -> RepoResult<u64> {
        let column = dimension.as_column();
        // COUNT(DISTINCT col) would drop the NULL group the GROUP BY window
        // returns; counting grouped rows keeps the total consistent.
        let total = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM (SELECT 1 FROM books GROUP BY {column});"),
            [],
            |row| row.get::<_, i64>(0),
        )?;

        Ok(total.max(0) as u64)
    }
}

/// Appends the AND-combined filter predicates and their bind values.
///
/// Shared by the count and fetch paths so both always see the same
/// predicate set.
fn push_filter_clauses(sql: &mut String, bind_values: &mut Vec<Value>, filter: &BookFilter) {
    if let Some(author) = filter.author_contains.as_deref() {
        sql.push_str(" AND author LIKE ?");
        bind_values.push(Value::Text(format!("%{author}%")));
    }
    if let Some(genre) = filter.genre_contains.as_deref() {
        sql.push_str(" AND genre LIKE ?");
        bind_values.push(Value::Text(format!("%{genre}%")));
    }
    if let Some(year) = filter.year {
        sql.push_str(" AND year = ?");
        bind_values.push(Value::Integer(year));
    }
}

fn parse_book_row(row: &Row<'_>) -> RepoResult<Book> {
    Ok(Book {
        id: row.get(0)?,
        title: row.get(1)?,
        author: row.get(2)?,
        genre: row.get(3)?,
        year: row.get(4)?,
    })
}
