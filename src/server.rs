//! HTTP surface hit by the scheduler: `GET /` runs a battery check and
//! `GET /health` answers liveness probes.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use tokio::net::TcpListener;

use crate::config::Config;
use crate::pipeline;

pub fn router(config: Arc<Config>) -> Router {
    Router::new()
        .route("/", get(battery_check))
        .route("/health", get(health))
        .with_state(config)
}

pub async fn serve(config: Config) -> std::io::Result<()> {
    let listener = TcpListener::bind(config.listen_addr()).await?;
    log::info!("Battery alert service listening on {}", listener.local_addr()?);
    axum::serve(listener, router(Arc::new(config))).await
}

async fn battery_check(State(config): State<Arc<Config>>) -> Response {
    log::info!("Battery check triggered");
    // The pipeline blocks on HTTP calls, so keep it off the async workers
    match tokio::task::spawn_blocking(move || pipeline::run(&config)).await {
        Ok(Ok(outcome)) => (
            StatusCode::OK,
            Json(json!({
                "message": outcome.summary(),
                "details": outcome.details,
                "devices_checked": outcome.devices_checked,
                "devices_below_threshold": outcome.devices_below_threshold,
                "skipped": outcome.skipped,
                "delivered": outcome.delivered,
                "checked_at": outcome.checked_at,
            })),
        )
            .into_response(),
        Ok(Err(err)) => {
            log::error!("Error during battery check: {err}");
            (
                StatusCode::BAD_GATEWAY,
                Json(json!({ "error": err.to_string(), "stage": err.stage() })),
            )
                .into_response()
        }
        Err(err) => {
            log::error!("Battery check task did not complete: {err}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": err.to_string(), "stage": "internal" })),
            )
                .into_response()
        }
    }
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "healthy" }))
}
