use super::{handlers, state::AppState};
use axum::extract::DefaultBodyLimit;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Extra room for the JSON envelope around the base64 image.
const BODY_LIMIT_SLACK: usize = 64 * 1024;

/// The largest request body accepted, derived from the decoded image limit.
///
/// Base64 expands data by 4/3 and JSON encoders may escape every `/` as `\/`,
/// so the limit allows twice the base64 length. Images between the decoded
/// limit and this ceiling are rejected by the validator instead.
pub fn body_limit(max_image_bytes: usize) -> usize {
    max_image_bytes
        .saturating_add(2)
        .saturating_div(3)
        .saturating_mul(4)
        .saturating_mul(2)
        .saturating_add(BODY_LIMIT_SLACK)
}

/// Creates the Axum router with all the application routes.
pub fn create_router(app_state: AppState) -> Router {
    let limit = body_limit(app_state.pipeline.max_image_bytes());

    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        .route("/test", get(handlers::test_page))
        .route("/transcribe", post(handlers::transcribe_handler))
        .route("/analyze", post(handlers::analyze_handler))
        .route("/process", post(handlers::process_handler))
        .layer(DefaultBodyLimit::max(limit))
        .with_state(app_state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
