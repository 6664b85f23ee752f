use axum::{
    extract::State,
    http::{HeaderValue, Method, StatusCode},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::{DefaultMakeSpan, TraceLayer},
};

use crate::{app_state::AppState, config::Settings, routes};

pub fn create(connection_pool: PgPool, config: Settings, shutdown: CancellationToken) -> Router<()> {
    let app_state = AppState::new(
        connection_pool,
        config.search.to_search_config(),
        shutdown,
    );

    let api = Router::new().nest("/jobs", routes::jobs::router());

    let origins: Vec<HeaderValue> = config
        .application
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    let cors = CorsLayer::new()
        .allow_methods([Method::GET])
        .allow_origin(AllowOrigin::list(origins));

    Router::new()
        .route("/health", get(health))
        .nest("/api/v1", api)
        .with_state(app_state)
        .layer(cors)
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
}

async fn health(State(app_state): State<AppState>) -> (StatusCode, Json<Value>) {
    let database = if app_state.db_pool.is_closed() {
        "closed"
    } else {
        "open"
    };
    (StatusCode::OK, Json(json!({ "status": "ok", "database": database })))
}
