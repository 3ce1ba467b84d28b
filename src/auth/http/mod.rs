use axum::{
    Router,
    routing::{get, post},
};

use crate::AppState;

mod dto;
pub(crate) mod handlers;

pub use dto::{LoginRequest, LoginResponse, MeResponse, RegisterRequest, RegisterResponse};
pub use handlers::{login, me, register};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/me", get(me))
}
