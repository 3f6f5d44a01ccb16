use axum::Json;
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

#[derive(Serialize, ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(Serialize, ToSchema)]
pub struct MessageDoc { pub message: String }

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewVolunteerDoc {
    pub name: String,
    pub experience_years: f64,
    pub availability_score: f64,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VolunteerDoc {
    pub id: u64,
    pub name: String,
    pub experience_years: f64,
    pub availability_score: f64,
    pub priority: f64,
}

#[derive(Serialize, ToSchema)]
pub struct StoreDoc {
    pub queued_volunteers: Vec<VolunteerDoc>,
    pub assigned_volunteers: Vec<VolunteerDoc>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignResponseDoc {
    pub message: String,
    pub assigned_volunteer: VolunteerDoc,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::volunteers::get_data,
        crate::routes::volunteers::add_volunteer,
        crate::routes::volunteers::assign_volunteer,
    ),
    components(
        schemas(
            HealthResponse,
            MessageDoc,
            NewVolunteerDoc,
            VolunteerDoc,
            StoreDoc,
            AssignResponseDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "volunteers")
    )
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
