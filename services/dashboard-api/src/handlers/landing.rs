//! Landing handler.

use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Endpoint {
    pub path: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Serialize)]
pub struct LandingResponse {
    pub title: &'static str,
    pub description: &'static str,
    pub endpoints: Vec<Endpoint>,
}

/// GET / - Service description and available endpoints
pub async fn landing_handler() -> Json<LandingResponse> {
    Json(LandingResponse {
        title: "HabiTech NO2 Dashboard API",
        description: "Regional tropospheric NO2 analysis from NASA OMI/Aura Level-3 data",
        endpoints: vec![
            Endpoint {
                path: "/california-model",
                description: "Average tropospheric NO2 and risk for the Greater California Area",
            },
            Endpoint {
                path: "/health",
                description: "Liveness check",
            },
            Endpoint {
                path: "/metrics",
                description: "Prometheus metrics",
            },
        ],
    })
}
