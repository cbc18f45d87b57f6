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
use crate::models::{validate_member, Member};
use crate::services::MemberService;

#[derive(Clone)]
pub struct MembersAppState {
    pub member_service: MemberService,
}

pub fn member_routes(db: Database) -> Router {
    let shared_state = MembersAppState {
        member_service: MemberService::new(db),
    };

    Router::new()
        .route("/", get(get_members).post(create_member))
        .route("/:id", get(get_member).put(update_member).delete(delete_member))
        .with_state(shared_state)
}

/// Add a new member
pub async fn create_member(
    State(state): State<MembersAppState>,
    WithRejection(Json(payload), _): WithRejection<Json<Value>, ApiError>,
) -> Result<(StatusCode, Json<Value>)> {
    let member_data = validate_member(&payload)?;
    let member_id = state.member_service.create_member(member_data).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "New member was added successfully",
            "member_id": member_id,
        })),
    ))
}

/// List all members ordered by identifier
pub async fn get_members(State(state): State<MembersAppState>) -> Result<Json<Vec<Member>>> {
    let members = state.member_service.list_members().await?;
    Ok(Json(members))
}

pub async fn get_member(
    State(state): State<MembersAppState>,
    WithRejection(Path(member_id), _): WithRejection<Path<i32>, ApiError>,
) -> Result<Json<Member>> {
    let member = state.member_service.get_member_by_id(member_id).await?;
    Ok(Json(member))
}

/// Replace a member's details. Unknown ids are not an error.
pub async fn update_member(
    State(state): State<MembersAppState>,
    WithRejection(Path(member_id), _): WithRejection<Path<i32>, ApiError>,
    WithRejection(Json(payload), _): WithRejection<Json<Value>, ApiError>,
) -> Result<Json<Value>> {
    let member_data = validate_member(&payload)?;
    state.member_service.update_member(member_id, member_data).await?;

    Ok(Json(json!({ "message": "Member details updated successfully" })))
}

/// Remove a member that has no workout sessions
pub async fn delete_member(
    State(state): State<MembersAppState>,
    WithRejection(Path(member_id), _): WithRejection<Path<i32>, ApiError>,
) -> Result<Json<Value>> {
    state.member_service.delete_member(member_id).await?;
    Ok(Json(json!({ "message": "Member removed successfully" })))
}
