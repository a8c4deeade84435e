use std::time::Duration;

use anyhow::Result;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::aggregate::aggregate_year;
use crate::config::Config;
use crate::response::{build_response, WrappedResponse};
use crate::validate::is_valid_address;
use crate::voyager::{UpstreamError, VoyagerClient};

#[derive(Clone)]
pub struct AppState {
    /// None when the server booted without a credential; wrapped requests then
    /// get the configuration-error response instead of an upstream call.
    pub client: Option<VoyagerClient>,
    pub request_deadline: Duration,
}

impl AppState {
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = match &config.voyager_api_key {
            Some(key) => Some(VoyagerClient::new(
                &config.voyager_base_url,
                key,
                config.fetch_timeout,
            )?),
            None => {
                tracing::warn!("VOYAGER_API_KEY not set; /api/wrapped will return 500 until it is");
                None
            }
        };
        Ok(Self {
            client,
            request_deadline: config.request_deadline,
        })
    }
}

pub enum ApiError {
    InvalidAddress,
    MissingCredential,
    Upstream(UpstreamError),
    DeadlineExceeded,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::InvalidAddress => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Invalid address" })),
            )
                .into_response(),
            ApiError::MissingCredential => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "VOYAGER_API_KEY is not set on the server",
                    "hint": "Add VOYAGER_API_KEY=... to your .env (server-side).",
                })),
            )
                .into_response(),
            ApiError::Upstream(err) => {
                // Status and body excerpt stay in server logs; the caller gets
                // a generic body so upstream internals never leak.
                tracing::error!(?err, "wrapped aggregation failed");
                (
                    StatusCode::BAD_GATEWAY,
                    Json(json!({ "error": "Upstream explorer request failed" })),
                )
                    .into_response()
            }
            ApiError::DeadlineExceeded => (
                StatusCode::GATEWAY_TIMEOUT,
                Json(json!({ "error": "Aggregation timed out" })),
            )
                .into_response(),
        }
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

#[derive(Deserialize)]
struct WrappedParams {
    #[serde(default)]
    address: String,
}

async fn wrapped(
    State(state): State<AppState>,
    Query(params): Query<WrappedParams>,
) -> Result<Json<WrappedResponse>, ApiError> {
    let address = params.address.trim();
    if !is_valid_address(address) {
        return Err(ApiError::InvalidAddress);
    }

    let client = state.client.as_ref().ok_or(ApiError::MissingCredential)?;

    let (contract, summary) =
        tokio::time::timeout(state.request_deadline, aggregate_year(client, address))
            .await
            .map_err(|_| ApiError::DeadlineExceeded)?
            .map_err(ApiError::Upstream)?;

    let now = chrono::Utc::now().timestamp();
    Ok(Json(build_response(address, &contract, &summary, now)))
}

pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/wrapped", get(wrapped))
        .with_state(state)
}

pub async fn run_http_server(addr: &str, state: AppState) -> Result<()> {
    let app = app_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("HTTP server listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
