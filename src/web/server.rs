use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        DefaultBodyLimit, Path, Query, State},
    http::{HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower::limit::ConcurrencyLimitLayer;
use tower::ServiceBuilder;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::timeout::TimeoutLayer;

use crate::cli::ServeArgs;
use crate::core::types::SortOrder;
use crate::matching::generator::NameGenerator;
use crate::utils::validation::{validate_name, ValidationError};

/// Request body limit. Requests only carry a short name.
pub const MAX_BODY_SIZE: usize = 16 * 1024;

/// Generous upper bound for one generate request; enrichment alone may take
/// `call_timeout` per batch of lookups.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Shared application state
pub struct AppState {
    pub generator: NameGenerator,
}

/// Body of `POST /api/stickers/generate`
#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub name: String,
    #[serde(default, alias = "sortOrder")]
    pub sort_order: Option<String>,
}

/// Query of `GET /api/stickers/search`
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub name: String,
    #[serde(default, alias = "sortOrder")]
    pub sort_order: Option<String>,
}

/// Error body returned for every rejected request
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_type: String,
    pub details: Option<String>,
}

fn validation_error_response(name: &str, err: &ValidationError) -> Response {
    tracing::debug!("Rejected name {:?}: {}", name, err);
    let body = ErrorResponse {
        error: "Invalid name".to_string(),
        error_type: err.error_type().to_string(),
        details: Some(err.to_string()),
    };
    (StatusCode::BAD_REQUEST, Json(body)).into_response()
}

fn invalid_request_response(status: StatusCode, error: &str, details: String) -> Response {
    let body = ErrorResponse {
        error: error.to_string(),
        error_type: "invalid_request".to_string(),
        details: Some(details),
    };
    (status, Json(body)).into_response()
}

/// Run the web server
///
/// # Errors
///
/// Returns an error if the tokio runtime cannot be created, the catalog or
/// resolver cannot be set up, or the server fails to start.
pub fn run(args: ServeArgs) -> anyhow::Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move { run_server(args).await })
}

/// Routes without middleware, for callers that add their own layers
pub fn api_routes(generator: NameGenerator) -> Router {
    let state = Arc::new(AppState { generator });

    Router::new()
        .route("/api/stickers/generate", post(generate_handler))
        .route("/api/stickers/search", get(search_handler))
        .route("/api/stickers/debug/{name}", get(debug_handler))
        .route("/api/catalog", get(catalog_handler))
        .route(
            "/api/prices/cache",
            get(cache_size_handler).delete(clear_cache_handler),
        )
        .with_state(state)
}

/// Create the application router with all routes and middleware configured.
///
/// Rate limiting is keyed on the peer address, so the router must be served
/// with `into_make_service_with_connect_info::<SocketAddr>()`.
///
/// # Errors
///
/// Returns an error if the rate limiter configuration is rejected.
pub fn create_router(generator: NameGenerator) -> anyhow::Result<Router> {
    // Configure IP-based rate limiting
    let governor_conf = GovernorConfigBuilder::default()
        .per_second(10)
        .burst_size(50)
        .finish()
        .ok_or_else(|| anyhow::anyhow!("Invalid rate limiter configuration"))?;

    let app = api_routes(generator).layer(
        ServiceBuilder::new()
            // Security headers for browser protection
            .layer(SetResponseHeaderLayer::if_not_present(
                HeaderName::from_static("x-content-type-options"),
                HeaderValue::from_static("nosniff"),
            ))
            .layer(SetResponseHeaderLayer::if_not_present(
                HeaderName::from_static("x-frame-options"),
                HeaderValue::from_static("DENY"),
            ))
            .layer(SetResponseHeaderLayer::if_not_present(
                HeaderName::from_static("referrer-policy"),
                HeaderValue::from_static("strict-origin-when-cross-origin"),
            ))
            .layer(GovernorLayer::new(Arc::new(governor_conf)))
            .layer(TimeoutLayer::with_status_code(
                StatusCode::REQUEST_TIMEOUT,
                REQUEST_TIMEOUT,
            ))
            .layer(ConcurrencyLimitLayer::new(100))
            .layer(DefaultBodyLimit::max(MAX_BODY_SIZE)),
    );

    Ok(app)
}

async fn run_server(args: ServeArgs) -> anyhow::Result<()> {
    let generator = args.solver.build_generator()?;
    tracing::info!(
        "Serving {} stickers (max {} per combination)",
        generator.catalog().len(),
        generator.search_config().max_combo_size
    );
    let app = create_router(generator)?;

    let addr = format!("{}:{}", args.address, args.port);
    println!("Starting sticker-solver API at http://{addr}");

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

async fn generate_combinations(state: &AppState, raw_name: &str, sort: &str) -> Response {
    let name = match validate_name(raw_name) {
        Ok(name) => name,
        Err(e) => return validation_error_response(raw_name, &e),
    };

    let start_time = std::time::Instant::now();
    let combinations = state
        .generator
        .generate(&name, SortOrder::parse(sort))
        .await;

    tracing::info!(
        "Generated {} priced combinations for '{}' in {} ms",
        combinations.len(),
        name,
        start_time.elapsed().as_millis()
    );

    Json(combinations).into_response()
}

/// Search, price, and rank combinations for a name
async fn generate_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            return invalid_request_response(
                rejection.status(),
                "Invalid request body",
                rejection.body_text(),
            );
        }
    };

    let sort = request.sort_order.as_deref().unwrap_or("asc");
    generate_combinations(&state, &request.name, sort).await
}

/// Same as generate, with the name and sort order in the query string
async fn search_handler(
    State(state): State<Arc<AppState>>,
    query: Result<Query<SearchParams>, QueryRejection>,
) -> Response {
    let params = match query {
        Ok(Query(params)) => params,
        Err(rejection) => {
            return invalid_request_response(
                rejection.status(),
                "Invalid query string",
                rejection.body_text(),
            );
        }
    };

    let sort = params.sort_order.as_deref().unwrap_or("asc");
    generate_combinations(&state, &params.name, sort).await
}

/// Unpriced combinations in search order
async fn debug_handler(State(state): State<Arc<AppState>>, Path(name): Path<String>) -> Response {
    let validated = match validate_name(&name) {
        Ok(validated) => validated,
        Err(e) => return validation_error_response(&name, &e),
    };

    let combinations = state.generator.search_only(&validated);

    Json(serde_json::json!({
        "input_name": name,
        "combinations_count": combinations.len(),
        "combinations": combinations,
    }))
    .into_response()
}

/// Return list of stickers in catalog
async fn catalog_handler(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let catalog = state.generator.catalog();

    Json(serde_json::json!({
        "count": catalog.len(),
        "stickers": catalog.stickers,
    }))
}

async fn cache_size_handler(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "size": state.generator.resolver().cache_size(),
    }))
}

async fn clear_cache_handler(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let resolver = state.generator.resolver();
    let cleared = resolver.cache_size();
    resolver.clear_cache();
    tracing::info!("Cleared {} cached prices", cleared);

    Json(serde_json::json!({
        "cleared": cleared,
        "size": resolver.cache_size(),
    }))
}
