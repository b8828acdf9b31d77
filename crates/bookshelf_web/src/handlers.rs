//! Route handlers for the catalog surface.
//!
//! # Responsibility
//! - Parse request parameters into the core query vocabulary.
//! - Open one connection per request and drop it on every exit path.
//! - Redirect mutations back to the listing, preserving the `mode` selector.
//!
//! # Invariants
//! - No query or aggregation logic lives here; handlers only translate
//!   between HTTP and `bookshelf_core`.

use axum::extract::{Path, Query, State};
use axum::response::Redirect;
use axum::Form;
use bookshelf_core::db::open_db;
use bookshelf_core::{
    catalog_for, run_benchmark, BookDraft, BookFilter, BookId, CatalogService, Dimension, Page,
    SortKey, SqliteBookRepository, Strategy,
};
use maud::Markup;
use serde::{Deserialize, Serialize};

use crate::error::WebError;
use crate::views;
use crate::AppState;

const DEFAULT_MODE: &str = "sql";

/// Query parameters of the listing view. Also serialized back into links,
/// so filters and mode survive navigation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
}

impl ListParams {
    pub fn mode(&self) -> &str {
        self.mode.as_deref().unwrap_or(DEFAULT_MODE)
    }

    /// Same parameters pointing at another page.
    pub fn with_page(&self, page: u32) -> Self {
        Self {
            page: Some(page),
            ..self.clone()
        }
    }

    /// Same parameters under another strategy selector, back on page 1.
    pub fn with_mode(&self, mode: &str) -> Self {
        Self {
            mode: Some(mode.to_string()),
            page: None,
            ..self.clone()
        }
    }

    pub fn href(&self) -> String {
        match serde_urlencoded::to_string(self) {
            Ok(query) if !query.is_empty() => format!("/?{query}"),
            _ => "/".to_string(),
        }
    }
}

/// Query parameters of the statistics view.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatsParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aggregation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
}

impl StatsParams {
    pub fn mode(&self) -> &str {
        self.mode.as_deref().unwrap_or(DEFAULT_MODE)
    }

    pub fn with_page(&self, page: u32) -> Self {
        Self {
            page: Some(page),
            ..self.clone()
        }
    }

    pub fn with_mode(&self, mode: &str) -> Self {
        Self {
            mode: Some(mode.to_string()),
            page: None,
            ..self.clone()
        }
    }

    pub fn with_aggregation(&self, aggregation: &str) -> Self {
        Self {
            aggregation: Some(aggregation.to_string()),
            page: None,
            ..self.clone()
        }
    }

    pub fn href(&self) -> String {
        match serde_urlencoded::to_string(self) {
            Ok(query) if !query.is_empty() => format!("/statistics?{query}"),
            _ => "/statistics".to_string(),
        }
    }
}

/// Bare strategy selector, carried through mutation routes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModeParam {
    pub mode: Option<String>,
}

impl ModeParam {
    pub fn mode(&self) -> &str {
        self.mode.as_deref().unwrap_or(DEFAULT_MODE)
    }
}

/// Add/edit form payload. Every field is required by the form markup;
/// genre and year may still be blank and then persist as absent.
#[derive(Debug, Clone, Deserialize)]
pub struct BookForm {
    pub title: String,
    pub author: String,
    pub genre: String,
    pub year: String,
}

pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Markup, WebError> {
    let conn = open_db(&state.db_path)?;

    let strategy = Strategy::from_param(params.mode());
    let filter = BookFilter {
        author_contains: non_blank(params.author.as_deref()),
        genre_contains: non_blank(params.genre.as_deref()),
        year: parse_year_filter(params.year.as_deref())?,
    };
    let sort = params.sort.as_deref().and_then(SortKey::from_param);
    let page = Page::new(params.page.unwrap_or(1));

    let listing = catalog_for(strategy, &conn).list_books(&filter, sort, page)?;
    Ok(views::listing_page(&listing, &params, page))
}

pub async fn statistics(
    State(state): State<AppState>,
    Query(params): Query<StatsParams>,
) -> Result<Markup, WebError> {
    let conn = open_db(&state.db_path)?;

    let strategy = Strategy::from_param(params.mode());
    let dimension = params
        .aggregation
        .as_deref()
        .map(Dimension::from_param)
        .unwrap_or_default();
    let page = Page::new(params.page.unwrap_or(1));

    let stats = catalog_for(strategy, &conn).group_stats(dimension, page)?;
    Ok(views::statistics_page(&stats, &params, dimension, page))
}

pub async fn benchmark(State(state): State<AppState>) -> Result<Markup, WebError> {
    let conn = open_db(&state.db_path)?;
    let report = run_benchmark(&conn)?;
    Ok(views::benchmark_page(&report))
}

pub async fn add_form(Query(params): Query<ModeParam>) -> Markup {
    views::add_page(params.mode())
}

pub async fn add_submit(
    State(state): State<AppState>,
    Query(params): Query<ModeParam>,
    Form(form): Form<BookForm>,
) -> Result<Redirect, WebError> {
    let conn = open_db(&state.db_path)?;
    let service = CatalogService::new(SqliteBookRepository::new(&conn));

    let draft = draft_from_form(&form)?;
    service.add_book(&draft)?;

    Ok(redirect_to_listing(params.mode()))
}

pub async fn edit_form(
    State(state): State<AppState>,
    Path(id): Path<BookId>,
    Query(params): Query<ModeParam>,
) -> Result<Markup, WebError> {
    let conn = open_db(&state.db_path)?;
    let service = CatalogService::new(SqliteBookRepository::new(&conn));

    let book = service
        .fetch_book(id)?
        .ok_or_else(|| WebError::NotFound(format!("book {id} does not exist")))?;

    Ok(views::edit_page(&book, params.mode()))
}

pub async fn edit_submit(
    State(state): State<AppState>,
    Path(id): Path<BookId>,
    Query(params): Query<ModeParam>,
    Form(form): Form<BookForm>,
) -> Result<Redirect, WebError> {
    let conn = open_db(&state.db_path)?;
    let service = CatalogService::new(SqliteBookRepository::new(&conn));

    let draft = draft_from_form(&form)?;
    service.edit_book(id, &draft)?;

    Ok(redirect_to_listing(params.mode()))
}

pub async fn delete_book(
    State(state): State<AppState>,
    Path(id): Path<BookId>,
    Query(params): Query<ModeParam>,
) -> Result<Redirect, WebError> {
    let conn = open_db(&state.db_path)?;
    let service = CatalogService::new(SqliteBookRepository::new(&conn));

    service.remove_book(id)?;

    Ok(redirect_to_listing(params.mode()))
}

fn redirect_to_listing(mode: &str) -> Redirect {
    let params = ListParams {
        mode: Some(mode.to_string()),
        ..ListParams::default()
    };
    Redirect::to(&params.href())
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Parses the year filter parameter. Blank means no constraint; anything
/// non-numeric is rejected here instead of being compared loosely downstream.
fn parse_year_filter(value: Option<&str>) -> Result<Option<i64>, WebError> {
    match non_blank(value) {
        None => Ok(None),
        Some(raw) => raw
            .parse::<i64>()
            .map(Some)
            .map_err(|_| WebError::Data(format!("year must be a number, got `{raw}`"))),
    }
}

fn draft_from_form(form: &BookForm) -> Result<BookDraft, WebError> {
    let year = match form.year.trim() {
        "" => None,
        raw => Some(raw.parse::<i64>().map_err(|_| {
            WebError::Data(format!("year must be a number, got `{raw}`"))
        })?),
    };

    Ok(BookDraft {
        title: form.title.clone(),
        author: form.author.clone(),
        genre: non_blank(Some(form.genre.as_str())),
        year,
    })
}

#[cfg(test)]
mod tests {
    use super::{draft_from_form, parse_year_filter, BookForm, ListParams};
    use crate::error::WebError;

    #[test]
    fn year_filter_accepts_blank_and_numbers_only() {
        assert_eq!(parse_year_filter(None).unwrap(), None);
        assert_eq!(parse_year_filter(Some("")).unwrap(), None);
        assert_eq!(parse_year_filter(Some(" 1999 ")).unwrap(), Some(1999));

        // The original compared years as text; typed parsing rejects the
        // loose input outright instead.
        let err = parse_year_filter(Some("ninety")).unwrap_err();
        assert!(matches!(err, WebError::Data(_)));
    }

    #[test]
    fn blank_optional_form_fields_become_absent() {
        let form = BookForm {
            title: "T".to_string(),
            author: "A".to_string(),
            genre: "  ".to_string(),
            year: String::new(),
        };

        let draft = draft_from_form(&form).unwrap();
        assert_eq!(draft.genre, None);
        assert_eq!(draft.year, None);
    }

    #[test]
    fn non_numeric_form_year_is_rejected() {
        let form = BookForm {
            title: "T".to_string(),
            author: "A".to_string(),
            genre: "G".to_string(),
            year: "soon".to_string(),
        };

        assert!(matches!(
            draft_from_form(&form).unwrap_err(),
            WebError::Data(_)
        ));
    }

    #[test]
    fn listing_links_keep_filters_and_encode_values() {
        let params = ListParams {
            mode: Some("memory".to_string()),
            author: Some("Le Guin".to_string()),
            page: Some(2),
            ..ListParams::default()
        };

        let href = params.href();
        assert!(href.starts_with("/?"));
        assert!(href.contains("mode=memory"));
        assert!(href.contains("author=Le+Guin"));
        assert!(href.contains("page=2"));

        let next = params.with_page(3);
        assert!(next.href().contains("page=3"));
        assert_eq!(next.author.as_deref(), Some("Le Guin"));

        let toggled = params.with_mode("sql");
        assert!(toggled.page.is_none(), "mode switch resets pagination");
    }
}
