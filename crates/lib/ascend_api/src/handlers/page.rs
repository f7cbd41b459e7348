//! The browser form page.

use axum::response::Html;

const INDEX_HTML: &str = include_str!("../../assets/index.html");

/// `GET /` — the property details form and result panel.
pub async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}
