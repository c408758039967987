// HTTP request handlers
use crate::infrastructure::http_response::{panel_json, ApiError};
use crate::presentation::app_state::AppState;
use crate::presentation::html::{render_dashboard, render_home};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

#[derive(Deserialize)]
pub struct PanelQuery {
    pub indicators: String,
    pub entity: String,
}

#[derive(Serialize)]
pub struct PageSummary {
    pub slug: String,
    pub title: String,
    pub heading: String,
    pub entity: String,
    pub sections: usize,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

pub async fn home_page(State(state): State<Arc<AppState>>) -> Html<String> {
    let service = &state.dashboard_service;
    Html(render_home(service.site(), service.pages()))
}

/// Render every panel of a page
pub async fn dashboard_page(
    Path(slug): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Response {
    let service = &state.dashboard_service;
    match service.get_dashboard(&slug).await {
        Some(dashboard) => Html(render_dashboard(&dashboard, service.pages(), &slug)).into_response(),
        None => {
            tracing::debug!("Unknown page requested: {}", slug);
            (StatusCode::NOT_FOUND, Html("<h1>Page not found</h1>".to_string())).into_response()
        }
    }
}

pub async fn list_pages(State(state): State<Arc<AppState>>) -> Json<Vec<PageSummary>> {
    let pages = state
        .dashboard_service
        .pages()
        .iter()
        .map(|p| PageSummary {
            slug: p.slug.clone(),
            title: p.page.title.clone(),
            heading: p.heading.clone(),
            entity: p.entity.clone(),
            sections: p.sections.len(),
        })
        .collect();
    Json(pages)
}

/// Table and plotly figure for one section of a page
pub async fn section_panel(
    Path((slug, index)): Path<(String, usize)>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, ApiError> {
    let section = state
        .dashboard_service
        .get_section(&slug, index)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("section {} of page '{}'", index, slug)))?;

    let panel = section.panel?;
    Ok(Json(panel_json(Some(&section.heading), &panel)))
}

/// Panel for an ad-hoc indicator list, e.g. `?indicators=SP.POP.TOTL;FP.CPI.TOTL&entity=VNM`
pub async fn adhoc_panel(
    Query(query): Query<PanelQuery>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, ApiError> {
    let panel = state
        .dashboard_service
        .build_adhoc_panel(&query.indicators, &query.entity)
        .await?;
    Ok(Json(panel_json(None, &panel)))
}
