// HTTP response utilities for panel JSON and error mapping
use crate::domain::dashboard::Panel;
use crate::domain::error::PanelError;
use crate::infrastructure::plotly_mapper::figure_to_plotly;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::{json, Value};

/// Error returned by the JSON API
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    Panel(PanelError),
}

impl From<PanelError> for ApiError {
    fn from(err: PanelError) -> Self {
        Self::Panel(err)
    }
}

pub fn panel_status(err: &PanelError) -> StatusCode {
    match err {
        PanelError::InvalidGroup(_) => StatusCode::BAD_REQUEST,
        PanelError::MetadataResolution { .. } => StatusCode::NOT_FOUND,
        PanelError::DataSource(_) => StatusCode::BAD_GATEWAY,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::NotFound(what) => (
                StatusCode::NOT_FOUND,
                json!({ "error": format!("{} not found", what), "kind": "not_found" }),
            ),
            ApiError::Panel(err) => {
                let kind = match err {
                    PanelError::InvalidGroup(_) => "invalid_group",
                    PanelError::MetadataResolution { .. } => "metadata_resolution",
                    PanelError::DataSource(_) => "data_source",
                };
                let mut body = json!({ "error": err.to_string(), "kind": kind });
                if let PanelError::MetadataResolution { missing } = err {
                    body["missing"] = json!(missing);
                }
                (panel_status(err), body)
            }
        };

        (status, Json(body)).into_response()
    }
}

/// `{ heading?, table, figure }` with the figure in plotly form
pub fn panel_json(heading: Option<&str>, panel: &Panel) -> Value {
    let mut body = json!({
        "table": panel.table,
        "figure": figure_to_plotly(&panel.figure),
    });
    if let Some(heading) = heading {
        body["heading"] = json!(heading);
    }
    body
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panel_status_mapping() {
        assert_eq!(
            panel_status(&PanelError::InvalidGroup("empty".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            panel_status(&PanelError::MetadataResolution { missing: vec!["X".to_string()] }),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            panel_status(&PanelError::DataSource("timeout".to_string())),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_not_found_response() {
        let response = ApiError::NotFound("page 'x'".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
