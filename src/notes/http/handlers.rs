use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{
    AppState,
    error::{ApiError, ApiResult, INVALID_NOTE, NOTE_NOT_FOUND},
    extractors::{AuthUser, JsonBody, JsonOrDefault},
};

use super::dto::{CreateNoteRequest, MessageResponse, NoteDto, UpdateNoteRequest};

// Ids that are not UUIDs cannot name any note.
fn parse_note_id(raw: &str) -> ApiResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| ApiError::NotFound(NOTE_NOT_FOUND))
}

#[utoipa::path(
    get,
    path = "/api/notes",
    responses(
        (status = 200, description = "Notes of the current user, newest first", body = [NoteDto]),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorBody),
        (status = 500, description = "Internal server error", body = crate::error::ErrorBody)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Notes"
)]
pub async fn list_notes(
    user: AuthUser,
    State(state): State<AppState>,
) -> ApiResult<(StatusCode, Json<Vec<NoteDto>>)> {
    let notes = state
        .notes
        .list(user.id)
        .await
        .map_err(|e| ApiError::from_note(e, "Error fetching notes"))?;

    Ok((
        StatusCode::OK,
        Json(notes.into_iter().map(NoteDto::from).collect()),
    ))
}

#[utoipa::path(
    get,
    path = "/api/notes/{id}",
    params(
        ("id" = Uuid, Path, description = "Note id")
    ),
    responses(
        (status = 200, description = "Note", body = NoteDto),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorBody),
        (status = 404, description = "Note not found", body = crate::error::ErrorBody),
        (status = 500, description = "Internal server error", body = crate::error::ErrorBody)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Notes"
)]
pub async fn get_note(
    user: AuthUser,
    State(state): State<AppState>,
    Path(note_id): Path<String>,
) -> ApiResult<(StatusCode, Json<NoteDto>)> {
    let note_id = parse_note_id(&note_id)?;
    let note = state
        .notes
        .get(user.id, note_id)
        .await
        .map_err(|e| ApiError::from_note(e, "Error fetching note"))?;

    Ok((StatusCode::OK, Json(note.into())))
}

#[utoipa::path(
    post,
    path = "/api/notes",
    request_body = CreateNoteRequest,
    responses(
        (status = 201, description = "Note created", body = NoteDto),
        (status = 400, description = "Title or content missing", body = crate::error::ErrorBody),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorBody),
        (status = 500, description = "Internal server error", body = crate::error::ErrorBody)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Notes"
)]
pub async fn create_note(
    user: AuthUser,
    State(state): State<AppState>,
    payload: Result<JsonBody<CreateNoteRequest>, ApiError>,
) -> ApiResult<(StatusCode, Json<NoteDto>)> {
    // an unreadable body is the same as one without title and content
    let JsonBody(request) =
        payload.map_err(|_| ApiError::InvalidInput(INVALID_NOTE.to_string()))?;

    let note = state
        .notes
        .create(user.id, request.title.as_deref(), request.content.as_deref())
        .await
        .map_err(|e| ApiError::from_note(e, "Error creating note"))?;

    Ok((StatusCode::CREATED, Json(note.into())))
}

#[utoipa::path(
    put,
    path = "/api/notes/{id}",
    params(
        ("id" = Uuid, Path, description = "Note id")
    ),
    request_body = UpdateNoteRequest,
    responses(
        (status = 200, description = "Updated note", body = NoteDto),
        (status = 400, description = "Malformed JSON body", body = crate::error::ErrorBody),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorBody),
        (status = 404, description = "Note not found", body = crate::error::ErrorBody),
        (status = 500, description = "Internal server error", body = crate::error::ErrorBody)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Notes"
)]
pub async fn update_note(
    user: AuthUser,
    State(state): State<AppState>,
    Path(note_id): Path<String>,
    JsonOrDefault(request): JsonOrDefault<UpdateNoteRequest>,
) -> ApiResult<(StatusCode, Json<NoteDto>)> {
    let note_id = parse_note_id(&note_id)?;
    let note = state
        .notes
        .update(
            user.id,
            note_id,
            request.title.as_deref(),
            request.content.as_deref(),
        )
        .await
        .map_err(|e| ApiError::from_note(e, "Error updating note"))?;

    Ok((StatusCode::OK, Json(note.into())))
}

#[utoipa::path(
    delete,
    path = "/api/notes/{id}",
    params(
        ("id" = Uuid, Path, description = "Note id")
    ),
    responses(
        (status = 200, description = "Note deleted", body = MessageResponse),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorBody),
        (status = 404, description = "Note not found", body = crate::error::ErrorBody),
        (status = 500, description = "Internal server error", body = crate::error::ErrorBody)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Notes"
)]
pub async fn delete_note(
    user: AuthUser,
    State(state): State<AppState>,
    Path(note_id): Path<String>,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    let note_id = parse_note_id(&note_id)?;
    state
        .notes
        .delete(user.id, note_id)
        .await
        .map_err(|e| ApiError::from_note(e, "Error deleting note"))?;

    Ok((
        StatusCode::OK,
        Json(MessageResponse {
            message: "Note deleted successfully",
        }),
    ))
}
