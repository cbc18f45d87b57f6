use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use axum_extra::extract::WithRejection;
use serde_json::{json, Value};

use crate::database::Database;
use crate::errors::{ApiError, Result};
use crate::models::{validate_workout_session, WorkoutSession};
use crate::services::WorkoutSessionService;

#[derive(Clone)]
pub struct WorkoutsAppState {
    pub workout_session_service: WorkoutSessionService,
}

pub fn workout_routes(db: Database) -> Router {
    let shared_state = WorkoutsAppState {
        workout_session_service: WorkoutSessionService::new(db),
    };

    Router::new()
        .route("/", get(get_sessions).post(create_session))
        .route(
            "/:workout_id",
            get(get_session).put(update_session).delete(delete_session),
        )
        .route("/member/:member_id", get(get_sessions_by_member))
        .with_state(shared_state)
}

/// Schedule a new workout session
pub async fn create_session(
    State(state): State<WorkoutsAppState>,
    WithRejection(Json(payload), _): WithRejection<Json<Value>, ApiError>,
) -> Result<(StatusCode, Json<Value>)> {
    let session_data = validate_workout_session(&payload)?;
    let workout_id = state.workout_session_service.create_session(session_data).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "New session was added successfully",
            "workout_id": workout_id,
        })),
    ))
}

pub async fn update_session(
    State(state): State<WorkoutsAppState>,
    WithRejection(Path(workout_id), _): WithRejection<Path<i32>, ApiError>,
    WithRejection(Json(payload), _): WithRejection<Json<Value>, ApiError>,
) -> Result<Json<Value>> {
    let session_data = validate_workout_session(&payload)?;
    state
        .workout_session_service
        .update_session(workout_id, session_data)
        .await?;

    Ok(Json(json!({ "message": "Workout session was updated successfully" })))
}

/// List every workout session
pub async fn get_sessions(State(state): State<WorkoutsAppState>) -> Result<Json<Vec<WorkoutSession>>> {
    let sessions = state.workout_session_service.list_sessions().await?;
    Ok(Json(sessions))
}

pub async fn get_session(
    State(state): State<WorkoutsAppState>,
    WithRejection(Path(workout_id), _): WithRejection<Path<i32>, ApiError>,
) -> Result<Json<WorkoutSession>> {
    let session = state.workout_session_service.get_session_by_id(workout_id).await?;
    Ok(Json(session))
}

/// List the workout sessions of one member
pub async fn get_sessions_by_member(
    State(state): State<WorkoutsAppState>,
    WithRejection(Path(member_id), _): WithRejection<Path<i32>, ApiError>,
) -> Result<Json<Vec<WorkoutSession>>> {
    let sessions = state
        .workout_session_service
        .get_sessions_by_member_id(member_id)
        .await?;
    Ok(Json(sessions))
}

pub async fn delete_session(
    State(state): State<WorkoutsAppState>,
    WithRejection(Path(workout_id), _): WithRejection<Path<i32>, ApiError>,
) -> Result<Json<Value>> {
    state.workout_session_service.delete_session(workout_id).await?;
    Ok(Json(json!({ "message": "Workout session was deleted successfully" })))
}
