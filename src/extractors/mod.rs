pub mod auth_user;
pub mod json_body;

pub use auth_user::AuthUser;
pub use json_body::{JsonBody, JsonOrDefault};
