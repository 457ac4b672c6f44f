use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::workout::{UpdateWorkoutRequest, WorkoutFilter, WorkoutRecordResponse},
};
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/users/{user_id}/workouts",
    params(
        ("user_id" = String, Path, description = "Owner of the workout history"),
        WorkoutFilter
    ),
    responses(
        (status = 200, description = "Workout history, newest first", body = Vec<WorkoutRecordResponse>)
    ),
    tag = "workouts"
)]
pub async fn list_workouts(
    State(db): State<Database>,
    Path(user_id): Path<String>,
    Query(filter): Query<WorkoutFilter>,
) -> Result<Response, WebError> {
    let records = services::list_workouts(db.pool(), &user_id, &filter).await?;

    let response: Vec<WorkoutRecordResponse> = records
        .into_iter()
        .map(WorkoutRecordResponse::from)
        .collect();

    Ok(Json(response).into_response())
}

#[utoipa::path(
    put,
    path = "/api/users/{user_id}/workouts/{id}",
    params(
        ("user_id" = String, Path, description = "Owner of the workout record"),
        ("id" = i32, Path, description = "Workout record id")
    ),
    request_body = UpdateWorkoutRequest,
    responses(
        (status = 200, description = "Record updated", body = WorkoutRecordResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Record not found")
    ),
    tag = "workouts"
)]
pub async fn update_workout(
    State(db): State<Database>,
    Path((user_id, id)): Path<(String, i32)>,
    Json(req): Json<UpdateWorkoutRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let updated = services::update_workout(db.pool(), &user_id, id, &req).await?;

    Ok(Json(WorkoutRecordResponse::from(updated)).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/users/{user_id}/workouts/{id}",
    params(
        ("user_id" = String, Path, description = "Owner of the workout record"),
        ("id" = i32, Path, description = "Workout record id")
    ),
    responses(
        (status = 204, description = "Record deleted"),
        (status = 404, description = "Record not found")
    ),
    tag = "workouts"
)]
pub async fn delete_workout(
    State(db): State<Database>,
    Path((user_id, id)): Path<(String, i32)>,
) -> Result<Response, WebError> {
    services::delete_workout(db.pool(), &user_id, id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
