//! California model handler.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use eo_common::Region;
use metrics::counter;
use serde_json::json;
use tracing::error;

use crate::state::AppState;
use crate::view::DashboardView;

/// GET /california-model - Run the analysis for California
///
/// Always 200 with a populated view, live or simulated. Only a
/// configuration fault yields 500.
pub async fn california_model_handler(Extension(state): Extension<Arc<AppState>>) -> Response {
    counter!("dashboard_requests_total", "endpoint" => "california-model").increment(1);

    match state.orchestrator.run(Region::California.id()).await {
        Ok(result) => Json(DashboardView::from_result(&result)).into_response(),
        Err(e) => {
            error!(error = %e, "Configuration error while planning California analysis");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
                .into_response()
        }
    }
}
