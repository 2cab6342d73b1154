//! HTTP trigger surface.
//!
//! Two routes: a liveness check and the single "generate today's report"
//! operation. The caller always gets a structured payload — success,
//! no-events, or an error message — never a partial response.

use std::sync::Arc;

use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::get};
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use crate::pipeline::{DispatchOutcome, DispatchPipeline};

/// Build the router over a shared pipeline.
pub fn routes(pipeline: Arc<DispatchPipeline>) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/generate-route", get(generate_route))
        .layer(CorsLayer::permissive())
        .with_state(pipeline)
}

async fn health() -> impl IntoResponse {
    "Route service is running"
}

async fn generate_route(State(pipeline): State<Arc<DispatchPipeline>>) -> impl IntoResponse {
    info!("Dispatch triggered");
    match pipeline.run().await {
        Ok(DispatchOutcome::Sent {
            route_link,
            sms_status,
        }) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "status": "Wysłano SMS i e-mail",
                "maps_link": route_link,
                "sms_status": sms_status,
            })),
        ),
        Ok(DispatchOutcome::NoEvents) => (
            StatusCode::OK,
            Json(serde_json::json!({ "message": "Brak wydarzeń na dziś." })),
        ),
        Err(e) => {
            error!(error = %e, "Dispatch failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": e.to_string() })),
            )
        }
    }
}
