use std::path::Path;

use axum::{
    routing::{get, post},
    Router,
};
use shared::api::Object;
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::AppState;

mod users;
pub use users::*;

mod exercises;
pub use exercises::*;

mod logs;
pub use logs::*;

/// Builds the full application: the API routes, the landing page at `/` and
/// everything under `assets_dir/public` as a fallback
pub fn router(state: AppState, assets_dir: &Path) -> Router {
    Router::new()
        .route(Object::Users.path(), post(create_user).get(list_users))
        .route(Object::UserExercises.path(), post(log_exercise))
        .route(Object::UserLogs.path(), get(fetch_logs))
        .route_service("/", ServeFile::new(assets_dir.join("views/index.html")))
        .fallback_service(ServeDir::new(assets_dir.join("public")))
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}
