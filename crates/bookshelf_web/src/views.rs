//! Maud page templates.
//!
//! # Responsibility
//! - Render listing, statistics, benchmark, form and message pages.
//! - Keep every link carrying the active strategy selector.

use bookshelf_core::{
    core_version, BenchmarkReport, Book, Dimension, GroupCount, Page, Paged, LIST_PAGE_SIZE,
    STATS_PAGE_SIZE,
};
use maud::{html, Markup, DOCTYPE};

use crate::handlers::{ListParams, StatsParams};

const STYLE: &str = "\
body { font-family: sans-serif; margin: 2em; }\
table { border-collapse: collapse; }\
td, th { border: 1px solid #999; padding: 0.3em 0.7em; }\
nav a, .pager a { margin-right: 1em; }\
form.filters input, form.filters select { margin-right: 0.5em; }";

fn layout(page_title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html {
            head {
                meta charset="utf-8";
                title { (page_title) " — Bookshelf" }
                style { (STYLE) }
            }
            body {
                nav {
                    a href="/" { "Books" }
                    a href="/statistics" { "Statistics" }
                    a href="/benchmark" { "Benchmark" }
                }
                h1 { (page_title) }
                (content)
                footer {
                    small { "bookshelf " (core_version()) }
                }
            }
        }
    }
}

fn mode_toggle(active: &str, sql_href: &str, memory_href: &str) -> Markup {
    html! {
        p {
            "Strategy: "
            @if active == "sql" {
                strong { "delegated (SQL)" }
                " | "
                a href=(memory_href) { "in-memory" }
            } @else {
                a href=(sql_href) { "delegated (SQL)" }
                " | "
                strong { "in-memory" }
            }
        }
    }
}

fn pager(page: Page, total_pages: u64, prev_href: &str, next_href: &str) -> Markup {
    let current = u64::from(page.number());
    html! {
        p class="pager" {
            @if current > 1 {
                a href=(prev_href) { "← previous" }
            }
            "page " (current) " of " (total_pages.max(1))
            @if current < total_pages {
                " "
                a href=(next_href) { "next →" }
            }
        }
    }
}

pub fn listing_page(listing: &Paged<Book>, params: &ListParams, page: Page) -> Markup {
    let total_pages = listing.total_pages(LIST_PAGE_SIZE);
    let mode = params.mode();
    let add_href = format!("/add?mode={mode}");

    layout(
        "Book catalog",
        html! {
            (mode_toggle(
                mode,
                &params.with_mode("sql").href(),
                &params.with_mode("memory").href(),
            ))
            form class="filters" method="get" action="/" {
                input type="hidden" name="mode" value=(mode);
                input type="text" name="author" placeholder="author contains"
                    value=(params.author.as_deref().unwrap_or(""));
                input type="text" name="genre" placeholder="genre contains"
                    value=(params.genre.as_deref().unwrap_or(""));
                input type="text" name="year" placeholder="exact year"
                    value=(params.year.as_deref().unwrap_or(""));
                select name="sort" {
                    @let sort = params.sort.as_deref().unwrap_or("");
                    option value="" selected[sort.is_empty()] { "unsorted" }
                    option value="title" selected[sort == "title"] { "title" }
                    option value="author" selected[sort == "author"] { "author" }
                    option value="year" selected[sort == "year"] { "year" }
                }
                button { "Filter" }
            }
            p {
                (listing.total) " matching books. "
                a href=(add_href) { "Add a book" }
            }
            table {
                thead {
                    tr {
                        th { "ID" }
                        th { "Title" }
                        th { "Author" }
                        th { "Genre" }
                        th { "Year" }
                        th { "" }
                    }
                }
                tbody {
                    @for book in &listing.items {
                        tr {
                            td { (book.id) }
                            td { (book.title) }
                            td { (book.author) }
                            td { (book.genre.as_deref().unwrap_or("—")) }
                            td {
                                @if let Some(year) = book.year { (year) } @else { "—" }
                            }
                            td {
                                a href={ "/edit/" (book.id) "?mode=" (mode) } { "edit" }
                                " "
                                a href={ "/delete/" (book.id) "?mode=" (mode) } { "delete" }
                            }
                        }
                    }
                }
            }
            (pager(
                page,
                total_pages,
                &params.with_page(page.number().saturating_sub(1).max(1)).href(),
                &params.with_page(page.number() + 1).href(),
            ))
        },
    )
}

pub fn statistics_page(
    stats: &Paged<GroupCount>,
    params: &StatsParams,
    dimension: Dimension,
    page: Page,
) -> Markup {
    let total_pages = stats.total_pages(STATS_PAGE_SIZE);
    let dimension_label = match dimension {
        Dimension::Author => "author",
        Dimension::Genre => "genre",
    };

    layout(
        "Catalog statistics",
        html! {
            (mode_toggle(
                params.mode(),
                &params.with_mode("sql").href(),
                &params.with_mode("memory").href(),
            ))
            p {
                "Group by: "
                @if dimension == Dimension::Author {
                    strong { "author" }
                    " | "
                    a href=(params.with_aggregation("genre").href()) { "genre" }
                } @else {
                    a href=(params.with_aggregation("author").href()) { "author" }
                    " | "
                    strong { "genre" }
                }
            }
            p { (stats.total) " groups." }
            table {
                thead {
                    tr {
                        th { (dimension_label) }
                        th { "books" }
                    }
                }
                tbody {
                    @for group in &stats.items {
                        tr {
                            td { (group.key.as_deref().unwrap_or("—")) }
                            td { (group.count) }
                        }
                    }
                }
            }
            (pager(
                page,
                total_pages,
                &params.with_page(page.number().saturating_sub(1).max(1)).href(),
                &params.with_page(page.number() + 1).href(),
            ))
        },
    )
}

pub fn benchmark_page(report: &BenchmarkReport) -> Markup {
    layout(
        "Aggregation benchmark",
        html! {
            table {
                thead {
                    tr {
                        th { "pipeline" }
                        th { "seconds" }
                    }
                }
                tbody {
                    tr {
                        td { "delegated (SQL aggregation)" }
                        td { (report.delegated_secs) }
                    }
                    tr {
                        td { "in-memory (scan + count + sort)" }
                        td { (report.in_memory_secs) }
                    }
                }
            }
            p {
                em {
                    "The two pipelines apply different filters, so the \
                     comparison is illustrative rather than a fair benchmark."
                }
            }
        },
    )
}

fn book_form(action: &str, book: Option<&Book>) -> Markup {
    let title = book.map(|b| b.title.as_str()).unwrap_or("");
    let author = book.map(|b| b.author.as_str()).unwrap_or("");
    let genre = book.and_then(|b| b.genre.as_deref()).unwrap_or("");
    let year = book
        .and_then(|b| b.year)
        .map(|y| y.to_string())
        .unwrap_or_default();

    html! {
        form method="post" action=(action) {
            p { label { "Title " input type="text" name="title" value=(title) required; } }
            p { label { "Author " input type="text" name="author" value=(author) required; } }
            p { label { "Genre " input type="text" name="genre" value=(genre) required; } }
            p { label { "Year " input type="text" name="year" value=(year) required; } }
            button { "Save" }
        }
    }
}

pub fn add_page(mode: &str) -> Markup {
    layout("Add a book", book_form(&format!("/add?mode={mode}"), None))
}

pub fn edit_page(book: &Book, mode: &str) -> Markup {
    layout(
        "Edit book",
        book_form(&format!("/edit/{}?mode={mode}", book.id), Some(book)),
    )
}

pub fn message_page(title: &str, message: &str) -> Markup {
    layout(
        title,
        html! {
            p { (message) }
            p { a href="/" { "Back to the catalog" } }
        },
    )
}
