use argon2::{
    Argon2, PasswordHash, PasswordVerifier,
    password_hash::{Error as PHError, PasswordHasher, SaltString, rand_core::OsRng},
};
use axum::{Json, extract::State, http::StatusCode};

use crate::{
    AppState,
    auth::http::{LoginRequest, LoginResponse, MeResponse, RegisterRequest, RegisterResponse},
    error::{ApiError, ApiResult},
    extractors::{AuthUser, JsonBody},
    store::StoreError,
};

const MIN_PASSWORD_LEN: usize = 6;

fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

fn hash_password(password: String) -> Result<String, String> {
    let salt_string = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt_string)
        .map(|hash| hash.to_string())
        .map_err(|error| error.to_string())
}

/// `Ok(false)` for a wrong password, `Err` only for an unreadable hash.
fn verify_password(password: String, stored_hash: String) -> Result<bool, String> {
    let parsed = PasswordHash::new(&stored_hash).map_err(|e| e.to_string())?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(PHError::Password) => Ok(false),
        Err(e) => Err(e.to_string()),
    }
}

#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = RegisterResponse),
        (status = 400, description = "Invalid email or password", body = crate::error::ErrorBody),
        (status = 409, description = "Email already exists", body = crate::error::ErrorBody),
        (status = 500, description = "Internal server error", body = crate::error::ErrorBody)
    ),
    tag = "Auth"
)]
pub async fn register(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<RegisterResponse>)> {
    let email = normalize_email(&req.email);
    if email.is_empty() || !email.contains('@') {
        return Err(ApiError::InvalidInput(
            "Please provide a valid email".to_string(),
        ));
    }
    if req.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ApiError::InvalidInput(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }

    let password_hash = tokio::task::spawn_blocking(move || hash_password(req.password))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?
        .map_err(ApiError::Internal)?;

    let user = match state.users.create(&email, &password_hash).await {
        Ok(user) => user,
        Err(StoreError::Duplicate) => return Err(ApiError::Conflict("Email already exists")),
        Err(source) => {
            return Err(ApiError::Store {
                context: "Error registering user",
                source,
            });
        }
    };
    tracing::info!(user_id = %user.id, "user registered");

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            id: user.id,
            email: user.email,
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Access token", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = crate::error::ErrorBody),
        (status = 500, description = "Internal server error", body = crate::error::ErrorBody)
    ),
    tag = "Auth"
)]
pub async fn login(
    State(state): State<AppState>,
    JsonBody(login_request): JsonBody<LoginRequest>,
) -> ApiResult<(StatusCode, Json<LoginResponse>)> {
    let email = normalize_email(&login_request.email);
    let row = state
        .users
        .find_credentials(&email)
        .await
        .map_err(ApiError::store("Error logging in"))?
        .ok_or(ApiError::Unauthenticated)?;

    let password = login_request.password;
    let verified =
        tokio::task::spawn_blocking(move || verify_password(password, row.password_hash))
            .await
            .map_err(|e| ApiError::Internal(e.to_string()))?
            .map_err(ApiError::Internal)?;
    if !verified {
        return Err(ApiError::Unauthenticated);
    }

    let issued = state
        .tokens
        .issue(row.id)
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    Ok((
        StatusCode::OK,
        Json(LoginResponse {
            token: issued.token,
            token_type: "Bearer",
            expires_in: issued.expires_in,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current user profile", body = MeResponse),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorBody),
        (status = 500, description = "Internal server error", body = crate::error::ErrorBody)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Auth"
)]
pub async fn me(
    user: AuthUser,
    State(state): State<AppState>,
) -> ApiResult<(StatusCode, Json<MeResponse>)> {
    let row = state
        .users
        .find_by_id(user.id)
        .await
        .map_err(ApiError::store("Error fetching user"))?
        .ok_or(ApiError::Unauthenticated)?;

    Ok((
        StatusCode::OK,
        Json(MeResponse {
            id: row.id,
            email: row.email,
        }),
    ))
}
