use axum::{
    Router,
    http::HeaderName,
    routing::{get, post},
};
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    services::ServeDir,
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

// Route table and the guard that enforces it.
pub mod guard;
pub mod models;
pub mod navigator;
pub mod routes;

// Client storage the guard reads the session token from.
pub mod storage;

// HTTP host.
pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;

// --- Public Re-exports ---

pub use config::AppConfig;
pub use guard::guard;
pub use navigator::{Navigator, navigate};
pub use routes::RouteTable;
pub use storage::{CookieTokenStore, FileTokenStore, MemoryTokenStore, StorageState, TokenStore};

/// ApiDoc
///
/// OpenAPI document for the host's JSON endpoints, served at `/api-docs/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    paths(handlers::list_routes, handlers::resolve_navigation, handlers::logout),
    components(
        schemas(models::RouteSummary, models::RouteTarget, models::NavigationResponse)
    ),
    tags(
        (name = "contacts-shell", description = "Contacts SPA route table and navigation guard")
    )
)]
struct ApiDoc;

/// AppState
///
/// Everything a request needs: the immutable route table and configuration.
/// There is no shared mutable state; each request brings its own cookies.
#[derive(Clone)]
pub struct AppState {
    pub routes: Arc<RouteTable>,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            routes: Arc::new(RouteTable::contacts_app()),
            config,
        }
    }
}

/// create_router
///
/// Assembles the host: JSON API, static assets, the guarded page fallback,
/// and the observability layers around all of it.
pub fn create_router(state: AppState) -> Router {
    // 1. CORS Configuration
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    // Header used to correlate every log line of one request.
    let x_request_id = HeaderName::from_static("x-request-id");

    // Static bundle output lives under the deployment base.
    let assets_path = format!("{}assets", state.config.base_url);
    let assets = ServeDir::new(state.config.assets_dir());

    // 2. Base Router Assembly
    let base_router = Router::new()
        // Documentation: Swagger UI over the generated OpenAPI document.
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Liveness probe for load balancers; never guarded.
        .route("/health", get(|| async { "ok" }))
        // JSON API: route table and server-side navigation resolution.
        .route("/api/routes", get(handlers::list_routes))
        .route("/api/navigate", get(handlers::resolve_navigation))
        .route("/logout", post(handlers::logout))
        // Bundled scripts and styles are served as-is, outside the guard.
        .nest_service(&assets_path, assets)
        // Every other path is a page of the SPA and goes through the guard.
        .fallback(handlers::serve_page)
        .with_state(state);

    // 3. Observability and Correlation Layers
    base_router
        .layer(
            ServiceBuilder::new()
                // 3a. Request ID: a fresh UUID unless the client already sent one.
                .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
                // 3b. Tracing: one span per request, tagged with the request ID,
                // and an INFO line with the latency once the response is ready.
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(trace_span_logger)
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(tower_http::LatencyUnit::Millis),
                        ),
                )
                // 3c. Propagation: echo the request ID back on the response.
                .layer(PropagateRequestIdLayer::new(x_request_id)),
        )
        // 4. CORS, outermost so preflight requests never reach the guard.
        .layer(cors)
}

/// trace_span_logger
///
/// Span for one HTTP request, correlated by the `x-request-id` header.
/// Guard decisions logged by the navigator land inside this span, so a
/// redirect can be traced back to the page request that caused it.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    // Fields every line of the request inherits.
    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}
