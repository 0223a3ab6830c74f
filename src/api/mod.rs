use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::{OptimizationError, OptimizationResult, optimizer::FlightOptimizer};

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    optimizer: Arc<FlightOptimizer>,
    request_timeout: Duration,
}

impl AppState {
    pub fn new(optimizer: FlightOptimizer, request_timeout: Duration) -> Self {
        Self {
            optimizer: Arc::new(optimizer),
            request_timeout,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OptimizeRequest {
    pub from_city: String,
    pub to_cities: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

impl IntoResponse for OptimizationError {
    fn into_response(self) -> Response {
        let (status, detail) = if self.is_not_found() {
            (StatusCode::NOT_FOUND, self.to_string())
        } else {
            error!("Optimization failed: {}", self);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An unexpected error occurred.".to_string(),
            )
        };
        (status, Json(ErrorBody { detail })).into_response()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health_check))
        .nest("/api", api_routes())
        .with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new().route("/flight/optimize", post(optimize_flight))
}

async fn health_check() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok".to_string(),
    })
}

async fn optimize_flight(
    State(state): State<AppState>,
    Json(request): Json<OptimizeRequest>,
) -> Result<Json<OptimizationResult>, OptimizationError> {
    let result = tokio::time::timeout(
        state.request_timeout,
        state
            .optimizer
            .optimize(&request.from_city, &request.to_cities),
    )
    .await
    .map_err(|_| {
        OptimizationError::unexpected(format!(
            "optimize did not finish within {}s",
            state.request_timeout.as_secs()
        ))
    })??;

    Ok(Json(result))
}
