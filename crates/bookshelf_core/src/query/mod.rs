//! Shared request vocabulary for catalog queries.
//!
//! # Responsibility
//! - Define filter, sort, strategy, aggregation and pagination types used by
//!   both query strategies and the presentation layer.
//!
//! # Invariants
//! - Page numbers are 1-based; page sizes are fixed per view.
//! - Unknown sort parameters mean "unsorted", never an error.

/// Fixed page size for the book listing view.
pub const LIST_PAGE_SIZE: u32 = 400;
/// Fixed page size for the statistics view.
pub const STATS_PAGE_SIZE: u32 = 5000;

/// Filter criteria for listing books. Absent fields impose no constraint;
/// present fields combine with logical AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookFilter {
    /// Case-insensitive "contains" match on the author field.
    pub author_contains: Option<String>,
    /// Case-insensitive "contains" match on the genre field.
    pub genre_contains: Option<String>,
    /// Exact publication-year match. Rows without a year never match.
    pub year: Option<i64>,
}

impl BookFilter {
    /// True when no criterion is set.
    pub fn is_unconstrained(&self) -> bool {
        self.author_contains.is_none() && self.genre_contains.is_none() && self.year.is_none()
    }
}

/// Sort key for the listing view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Title,
    Author,
    Year,
}

impl SortKey {
    /// Parses the `sort` request parameter.
    ///
    /// Any value outside the allowed set means unsorted/default order.
    pub fn from_param(value: &str) -> Option<Self> {
        match value {
            "title" => Some(Self::Title),
            "author" => Some(Self::Author),
            "year" => Some(Self::Year),
            _ => None,
        }
    }

    /// Column name used when ordering is delegated to SQLite.
    pub fn as_column(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Author => "author",
            Self::Year => "year",
        }
    }
}

/// Query execution strategy, selected per request by the `mode` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Filtering, sorting, counting and windowing pushed into SQLite.
    #[default]
    Delegated,
    /// Full-table scan processed in process memory.
    InMemory,
}

impl Strategy {
    /// Parses the `mode` request parameter.
    ///
    /// `"sql"` selects the delegated strategy; any other value selects the
    /// in-memory one, matching the original two-branch selector.
    pub fn from_param(value: &str) -> Self {
        if value == "sql" {
            Self::Delegated
        } else {
            Self::InMemory
        }
    }
}

/// Grouping key for the statistics view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dimension {
    #[default]
    Author,
    Genre,
}

impl Dimension {
    /// Parses the `aggregation` request parameter; author is the default.
    pub fn from_param(value: &str) -> Self {
        if value == "genre" {
            Self::Genre
        } else {
            Self::Author
        }
    }

    /// Column name used as the grouping key.
    pub fn as_column(self) -> &'static str {
        match self {
            Self::Author => "author",
            Self::Genre => "genre",
        }
    }

    pub fn as_param(self) -> &'static str {
        self.as_column()
    }
}

/// 1-based page selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page(u32);

impl Page {
    /// Clamps the requested number to at least 1.
    pub fn new(number: u32) -> Self {
        Self(number.max(1))
    }

    pub fn number(self) -> u32 {
        self.0
    }

    /// Row offset of this page for the given page size.
    pub fn offset(self, page_size: u32) -> u64 {
        u64::from(self.0 - 1) * u64::from(page_size)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self(1)
    }
}

/// One page of results plus the pagination-independent filtered total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paged<T> {
    pub items: Vec<T>,
    /// Total matching rows across all pages.
    pub total: u64,
}

impl<T> Paged<T> {
    /// Number of pages for the given page size: `ceil(total / page_size)`.
    pub fn total_pages(&self, page_size: u32) -> u64 {
        self.total.div_ceil(u64::from(page_size))
    }
}

#[cfg(test)]
mod tests {
    use super::{BookFilter, Dimension, Page, Paged, SortKey, Strategy};

    #[test]
    fn sort_key_parses_allowed_set_only() {
        assert_eq!(SortKey::from_param("title"), Some(SortKey::Title));
        assert_eq!(SortKey::from_param("author"), Some(SortKey::Author));
        assert_eq!(SortKey::from_param("year"), Some(SortKey::Year));
        assert_eq!(SortKey::from_param("id"), None);
        assert_eq!(SortKey::from_param(""), None);
    }

    #[test]
    fn strategy_defaults_to_delegated_and_falls_back_to_in_memory() {
        assert_eq!(Strategy::from_param("sql"), Strategy::Delegated);
        assert_eq!(Strategy::from_param("imperative"), Strategy::InMemory);
        assert_eq!(Strategy::from_param("anything"), Strategy::InMemory);
        assert_eq!(Strategy::default(), Strategy::Delegated);
    }

    #[test]
    fn dimension_defaults_to_author() {
        assert_eq!(Dimension::from_param("genre"), Dimension::Genre);
        assert_eq!(Dimension::from_param("author"), Dimension::Author);
        assert_eq!(Dimension::from_param("unknown"), Dimension::Author);
    }

    #[test]
    fn page_offsets_are_one_based() {
        assert_eq!(Page::new(1).offset(400), 0);
        assert_eq!(Page::new(3).offset(400), 800);
        assert_eq!(Page::new(0).number(), 1, "page 0 clamps to 1");
    }

    #[test]
    fn total_pages_rounds_up() {
        let paged = Paged::<()> {
            items: Vec::new(),
            total: 801,
        };
        assert_eq!(paged.total_pages(400), 3);
        let empty = Paged::<()> {
            items: Vec::new(),
            total: 0,
        };
        assert_eq!(empty.total_pages(400), 0);
    }

    #[test]
    fn unconstrained_filter_reports_itself() {
        assert!(BookFilter::default().is_unconstrained());
        let filter = BookFilter {
            year: Some(1999),
            ..BookFilter::default()
        };
        assert!(!filter.is_unconstrained());
    }
}
