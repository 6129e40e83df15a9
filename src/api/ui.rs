//! Front-end serving
//!
//! The single-page front end is embedded at compile time and served for
//! every path the API router does not claim.

use axum::response::Html;

const INDEX_HTML: &str = include_str!("../ui/index.html");

/// Router fallback: serves the front-end entry document.
pub async fn serve_index() -> Html<&'static str> {
    Html(INDEX_HTML)
}
