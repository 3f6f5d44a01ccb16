use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use serde_json::Value;
use service::messages::ASSIGNED_MESSAGE;
use service::volunteer::{Store, Volunteer};

use crate::errors::ApiError;
use crate::metrics;
use crate::state::AppState;

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AssignResponse {
    pub message: String,
    pub assigned_volunteer: Volunteer,
}

/// Both volunteer lists, verbatim.
#[utoipa::path(get, path = "/api/data", tag = "volunteers", responses((status = 200, description = "Queued and assigned volunteers", body = crate::openapi::StoreDoc)))]
pub async fn get_data(State(state): State<AppState>) -> Result<Json<Store>, ApiError> {
    let store = state.volunteers.snapshot().await?;
    Ok(Json(store))
}

/// Add a volunteer to the back of the queue.
#[utoipa::path(
    post,
    path = "/api/volunteers",
    tag = "volunteers",
    request_body = crate::openapi::NewVolunteerDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::VolunteerDoc),
        (status = 400, description = "Missing or invalid field", body = crate::openapi::MessageDoc)
    )
)]
pub async fn add_volunteer(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Volunteer>), ApiError> {
    let Json(payload) = payload?;
    let volunteer = state.volunteers.enqueue(&payload).await?;
    metrics::ENQUEUED_TOTAL.inc();
    Ok((StatusCode::CREATED, Json(volunteer)))
}

/// Assign the highest-priority queued volunteer.
#[utoipa::path(
    post,
    path = "/api/assign",
    tag = "volunteers",
    responses(
        (status = 200, description = "Assigned", body = crate::openapi::AssignResponseDoc),
        (status = 404, description = "Queue is empty", body = crate::openapi::MessageDoc)
    )
)]
pub async fn assign_volunteer(State(state): State<AppState>) -> Result<Json<AssignResponse>, ApiError> {
    let volunteer = state.volunteers.assign().await?;
    metrics::ASSIGNED_TOTAL.inc();
    Ok(Json(AssignResponse {
        message: ASSIGNED_MESSAGE.to_string(),
        assigned_volunteer: volunteer,
    }))
}
