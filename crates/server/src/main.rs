use std::{net::SocketAddr, sync::Arc};

use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, Path, Query, State},
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use catalog::CatalogEntry;
use serde::Deserialize;
use serde_json::Value;
use server_api::ApiContext;
use shared::{
    error::{ApiError, ErrorCode},
    protocol::{
        DeleteDesignResponse, DesignRecord, DesignSummary, ParseDescriptionResponse,
        SaveDesignResponse,
    },
};
use storage::Storage;
use tower_http::limit::RequestBodyLimitLayer;
use tracing::{error, info, warn};

mod config;

use config::{load_settings, normalize_database_url};

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ApiError>)>;

#[derive(Clone)]
struct AppState {
    api: ApiContext,
    body_limit_bytes: usize,
}

#[derive(Debug, Deserialize)]
struct ProductQuery {
    #[serde(default)]
    query: String,
    category: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let settings = load_settings();
    let database_url = normalize_database_url(&settings.database_url);
    let storage = Storage::new(&database_url).await.map_err(|error| {
        error!(
            %database_url,
            %error,
            "failed to open SQLite database; verify parent directory exists and permissions are correct"
        );
        error
    })?;

    let state = AppState {
        api: ApiContext::new(storage),
        body_limit_bytes: settings.body_limit_bytes,
    };
    let app = build_router(Arc::new(state));

    let addr: SocketAddr = settings.server_bind.parse()?;
    info!(%addr, body_limit_bytes = settings.body_limit_bytes, "server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    let body_limit = state.body_limit_bytes;
    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/design/parse", post(http_parse_description))
        .route("/api/design/save", post(http_save_design))
        .route(
            "/api/design/:id",
            get(http_load_design).delete(http_delete_design),
        )
        .route("/api/designs", get(http_list_designs))
        .route("/api/catalog/fixed", get(http_fixed_elements))
        .route("/api/catalog/products", get(http_search_products))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(middleware::map_response(payload_too_large_as_api_error))
        .with_state(state)
}

/// The body limit layer answers with a bare 413; give it the same
/// `ApiError` body as every other rejection.
async fn payload_too_large_as_api_error(response: Response) -> Response {
    if response.status() != StatusCode::PAYLOAD_TOO_LARGE {
        return response;
    }
    warn!("request body over the configured limit");
    error_response(ApiError::payload_too_large("request body is too large")).into_response()
}

async fn healthz(
    State(state): State<Arc<AppState>>,
) -> Result<&'static str, (StatusCode, Json<ApiError>)> {
    state.api.storage.health_check().await.map_err(|e| {
        warn!(error = %e, "health check failed");
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ApiError::internal(e.to_string())),
        )
    })?;
    Ok("ok")
}

async fn http_parse_description(body: Bytes) -> ApiResult<ParseDescriptionResponse> {
    let body = json_body(&body)?;
    server_api::parse_description(&body)
        .map(Json)
        .map_err(error_response)
}

async fn http_save_design(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> ApiResult<SaveDesignResponse> {
    let body = json_body(&body)?;
    server_api::save_design(&state.api, &body)
        .await
        .map(Json)
        .map_err(error_response)
}

async fn http_load_design(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<DesignRecord> {
    server_api::load_design(&state.api, &id)
        .await
        .map(Json)
        .map_err(error_response)
}

async fn http_delete_design(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<DeleteDesignResponse> {
    server_api::delete_design(&state.api, &id)
        .await
        .map(Json)
        .map_err(error_response)
}

async fn http_list_designs(State(state): State<Arc<AppState>>) -> ApiResult<Vec<DesignSummary>> {
    server_api::list_designs(&state.api)
        .await
        .map(Json)
        .map_err(error_response)
}

async fn http_fixed_elements(State(state): State<Arc<AppState>>) -> Json<Vec<CatalogEntry>> {
    Json(server_api::list_fixed_elements(&state.api))
}

async fn http_search_products(
    State(state): State<Arc<AppState>>,
    Query(q): Query<ProductQuery>,
) -> Json<Vec<CatalogEntry>> {
    Json(server_api::search_products(
        &state.api,
        &q.query,
        q.category.as_deref(),
    ))
}

/// Bodies are decoded here rather than through the `Json` extractor so that
/// malformed input is a 400 with an `ApiError` body.
fn json_body(body: &[u8]) -> Result<Value, (StatusCode, Json<ApiError>)> {
    serde_json::from_slice(body).map_err(|e| {
        error_response(ApiError::validation(format!(
            "request body must be JSON: {e}"
        )))
    })
}

fn error_response(error: ApiError) -> (StatusCode, Json<ApiError>) {
    let status = match error.code {
        ErrorCode::Validation => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
        ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(error))
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
