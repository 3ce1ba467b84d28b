use std::any::Any;

use axum::{
    Json,
    extract::{Request, State},
    http::{StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{config::Environment, notes::NoteError, store::StoreError};

pub const INVALID_NOTE: &str = "Please provide title and content";
pub const NOTE_NOT_FOUND: &str = "Note not found";
pub const NOT_AUTHORIZED: &str = "Not authorized";
pub const SOMETHING_WENT_WRONG: &str = "Something went wrong!";

#[derive(Serialize, ToSchema)]
pub struct ErrorBody {
    pub message: String,
    /// Internal detail, only sent in development.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Attached to 500 responses so the detail can be added to the body later
/// when the environment allows it.
#[derive(Debug, Clone)]
pub struct ErrorReport {
    pub message: String,
    pub detail: String,
}

#[derive(Debug)]
pub enum ApiError {
    Unauthenticated,
    InvalidInput(String),
    NotFound(&'static str),
    Conflict(&'static str),
    Store {
        context: &'static str,
        source: StoreError,
    },
    Internal(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// Maps a note service failure, using `context` as the client message when
    /// the store itself failed.
    pub fn from_note(error: NoteError, context: &'static str) -> Self {
        match error {
            NoteError::InvalidInput => ApiError::InvalidInput(INVALID_NOTE.to_string()),
            NoteError::NotFound => ApiError::NotFound(NOTE_NOT_FOUND),
            NoteError::Store(source) => ApiError::Store { context, source },
        }
    }

    pub fn store(context: &'static str) -> impl FnOnce(StoreError) -> Self {
        move |source| ApiError::Store { context, source }
    }
}

fn message(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorBody {
            message: message.into(),
            error: None,
        }),
    )
        .into_response()
}

fn internal(message: &str, detail: String) -> Response {
    let mut res = self::message(StatusCode::INTERNAL_SERVER_ERROR, message);
    res.extensions_mut().insert(ErrorReport {
        message: message.to_string(),
        detail,
    });
    res
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Unauthenticated => message(StatusCode::UNAUTHORIZED, NOT_AUTHORIZED),
            ApiError::InvalidInput(msg) => message(StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => message(StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => message(StatusCode::CONFLICT, msg),
            ApiError::Store { context, source } => {
                tracing::error!(error = ?source, "{context}");
                internal(context, source.to_string())
            }
            ApiError::Internal(detail) => {
                tracing::error!("internal error: {detail}");
                internal(SOMETHING_WENT_WRONG, detail)
            }
        }
    }
}

/// Rewrites 500 bodies to carry the `error` detail when the environment
/// allows it.
pub async fn attach_error_details(
    State(environment): State<Environment>,
    request: Request,
    next: Next,
) -> Response {
    let response = next.run(request).await;
    if !environment.exposes_error_details() {
        return response;
    }
    let Some(report) = response.extensions().get::<ErrorReport>().cloned() else {
        return response;
    };

    let (mut parts, _) = response.into_parts();
    parts.headers.remove(header::CONTENT_LENGTH);
    (
        parts,
        Json(ErrorBody {
            message: report.message,
            error: Some(report.detail),
        }),
    )
        .into_response()
}

pub fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    tracing::error!("handler panicked: {detail}");
    internal(SOMETHING_WENT_WRONG, detail)
}
