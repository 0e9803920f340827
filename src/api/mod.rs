//! HTTP surface: route registration, parameter parsing, error mapping.
//!
//! Plumbing only; every decision about the data lives in [`crate::domain`].

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing::warn;

use crate::domain::{build_index, list_commodities, match_routes, rank_routes};
use crate::domain::{CommodityEntry, TradeRoute};
use crate::infra::darkstat::{DarkstatClient, DarkstatError};

pub struct AppState {
    pub darkstat: DarkstatClient,
}

/// Build the router: three read-only API operations, a health probe and
/// the static frontend, with CORS open to any origin.
pub fn build_router(state: Arc<AppState>, static_dir: &str) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/stations", get(stations))
        .route("/api/routes", get(routes))
        .route("/api/commodities", get(commodities))
        .route("/api/health", get(health))
        .fallback_service(ServeDir::new(static_dir).append_index_html_on_directories(true))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Debug)]
enum ApiError {
    SourceUnreachable(DarkstatError),
    SourceEmpty,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = match self {
            ApiError::SourceUnreachable(error) => {
                warn!(%error, "market data source unreachable");
                "market data source is unreachable".to_string()
            }
            ApiError::SourceEmpty => {
                warn!("market data source returned no stations");
                "market data source returned no stations".to_string()
            }
        };
        (StatusCode::BAD_GATEWAY, Json(ErrorBody { error: message })).into_response()
    }
}

#[derive(Debug, Deserialize)]
struct RouteParams {
    /// Case-insensitive substring filter on commodity nickname or name.
    commodity: Option<String>,
    #[serde(default)]
    min_profit: f64,
    #[serde(default = "default_limit")]
    limit: usize,
}

fn default_limit() -> usize {
    100
}

/// Raw station payload, echoed verbatim from the market data source.
async fn stations(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Value>>, ApiError> {
    Ok(Json(fetch_stations(&state).await?))
}

/// Ranked trade routes derived from a fresh station fetch.
async fn routes(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RouteParams>,
) -> Result<Json<Vec<TradeRoute>>, ApiError> {
    let stations = fetch_stations(&state).await?;
    let index = build_index(&stations, params.commodity.as_deref());
    let candidates = match_routes(&index, params.min_profit);
    Ok(Json(rank_routes(candidates, params.limit)))
}

/// Distinct tradeable commodities, sorted by display name.
async fn commodities(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<CommodityEntry>>, ApiError> {
    let stations = fetch_stations(&state).await?;
    Ok(Json(list_commodities(&stations)))
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn fetch_stations(state: &AppState) -> Result<Vec<Value>, ApiError> {
    let stations = state
        .darkstat
        .fetch_stations(None)
        .await
        .map_err(ApiError::SourceUnreachable)?;
    require_nonempty(stations)
}

/// A failed fetch and an empty station list both surface as a source
/// failure: an empty-but-successful result would be indistinguishable from
/// a dead upstream to the caller.
fn require_nonempty(stations: Vec<Value>) -> Result<Vec<Value>, ApiError> {
    if stations.is_empty() {
        return Err(ApiError::SourceEmpty);
    }
    Ok(stations)
}
