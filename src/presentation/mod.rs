// Presentation layer - HTTP routes, handlers and page rendering
pub mod app_state;
pub mod handlers;
pub mod html;

use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    adhoc_panel, dashboard_page, health_check, home_page, list_pages, section_panel,
};
use axum::{routing::get, Router};
use std::sync::Arc;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(home_page))
        .route("/healthz", get(health_check))
        .route("/pages/:slug", get(dashboard_page))
        .route("/api/pages", get(list_pages))
        .route("/api/pages/:slug/sections/:index", get(section_panel))
        .route("/api/panel", get(adhoc_panel))
        .with_state(state)
}
