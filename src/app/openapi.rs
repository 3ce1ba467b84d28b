use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};

/// Registers the JWT bearer scheme every note route refers to.
struct JwtBearer;

impl Modify for JwtBearer {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let scheme = HttpBuilder::new()
            .scheme(HttpAuthScheme::Bearer)
            .bearer_format("JWT")
            .description(Some("Access token returned by `POST /api/auth/login`"))
            .build();
        openapi
            .components
            .get_or_insert_with(Default::default)
            .add_security_scheme("bearer_auth", SecurityScheme::Http(scheme));
    }
}

#[derive(OpenApi)]
#[openapi(
    info(title = "Notes API", description = "Personal notes behind a bearer token"),
    paths(
        crate::core::http::handlers::status,
        crate::core::http::handlers::health,
        crate::auth::http::handlers::register,
        crate::auth::http::handlers::login,
        crate::auth::http::handlers::me,
        crate::notes::http::handlers::list_notes,
        crate::notes::http::handlers::get_note,
        crate::notes::http::handlers::create_note,
        crate::notes::http::handlers::update_note,
        crate::notes::http::handlers::delete_note
    ),
    components(schemas(
        crate::error::ErrorBody,
        crate::core::http::StatusResponse,
        crate::auth::http::RegisterRequest,
        crate::auth::http::RegisterResponse,
        crate::auth::http::LoginRequest,
        crate::auth::http::LoginResponse,
        crate::auth::http::MeResponse,
        crate::notes::http::CreateNoteRequest,
        crate::notes::http::UpdateNoteRequest,
        crate::notes::http::NoteDto,
        crate::notes::http::MessageResponse
    )),
    modifiers(&JwtBearer),
    tags(
        (name = "Core", description = "Service status endpoints"),
        (name = "Auth", description = "Registration, login and the current user"),
        (name = "Notes", description = "Personal notes of the current user")
    )
)]
pub struct ApiDoc;
