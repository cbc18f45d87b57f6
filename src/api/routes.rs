use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use super::health::health_check;
use super::members::member_routes;
use super::workouts::workout_routes;
use crate::database::Database;

pub fn create_routes(db: Database) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/members", member_routes(db.clone()))
        .nest("/workouts", workout_routes(db))
        .layer(TraceLayer::new_for_http())
}
