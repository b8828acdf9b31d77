//! Bookshelf web front end.
//!
//! # Responsibility
//! - Bootstrap config, logging and the database schema.
//! - Serve the catalog routes; all query logic lives in `bookshelf_core`.

use axum::routing::get;
use bookshelf_core::{default_log_level, init_logging};
use std::path::PathBuf;

mod error;
mod handlers;
mod views;

/// Per-process configuration shared with handlers.
///
/// Only the database *path* is shared; every request opens and drops its
/// own connection.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db_path: PathBuf,
}

#[tokio::main]
async fn main() {
    let db_path = std::env::var("BOOKSHELF_DB").unwrap_or_else(|_| "books.db".to_string());
    let addr = std::env::var("BOOKSHELF_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

    if let Ok(log_dir) = std::env::var("BOOKSHELF_LOG_DIR") {
        let level = std::env::var("BOOKSHELF_LOG_LEVEL")
            .unwrap_or_else(|_| default_log_level().to_string());
        if let Err(err) = init_logging(&level, &log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    // Create the schema up front so request-scoped opens find it in place.
    bookshelf_core::db::open_db(&db_path).expect("can't open database");

    let app = axum::Router::new()
        .route("/", get(handlers::index))
        .route("/statistics", get(handlers::statistics))
        .route("/benchmark", get(handlers::benchmark))
        .route("/add", get(handlers::add_form).post(handlers::add_submit))
        .route(
            "/edit/:id",
            get(handlers::edit_form).post(handlers::edit_submit),
        )
        .route("/delete/:id", get(handlers::delete_book))
        .with_state(AppState {
            db_path: db_path.into(),
        });

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("can't bind listen address");
    axum::serve(listener, app).await.expect("server failed");
}
