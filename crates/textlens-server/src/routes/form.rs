//! Form Routes - Browser input form

use axum::{response::Html, routing::get, Router};

use crate::views;
use crate::AppState;

async fn index() -> Html<&'static str> {
    Html(views::index_page())
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(index))
}
