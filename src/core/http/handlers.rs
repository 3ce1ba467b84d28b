use axum::{Json, http::StatusCode};
use serde::Serialize;
use time::OffsetDateTime;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct StatusResponse {
    message: &'static str,
    status: &'static str,
    #[serde(with = "time::serde::rfc3339")]
    timestamp: OffsetDateTime,
}

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service status", body = StatusResponse)
    ),
    tag = "Core"
)]
pub async fn status() -> (StatusCode, Json<StatusResponse>) {
    (
        StatusCode::OK,
        Json(StatusResponse {
            message: "Notes API is running",
            status: "active",
            timestamp: OffsetDateTime::now_utc(),
        }),
    )
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is alive", body = String, content_type = "text/plain")
    ),
    tag = "Core"
)]
pub async fn health() -> &'static str {
    "ok"
}
