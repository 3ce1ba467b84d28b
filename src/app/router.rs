use std::path::PathBuf;

use axum::{
    Json, Router,
    http::{HeaderValue, Method, StatusCode, header},
    middleware,
    routing::get,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowOrigin, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::{
    AppState,
    app::docs,
    config::{Config, Environment},
    error::{ErrorBody, attach_error_details, handle_panic},
};

/// Outer HTTP surface settings that do not belong to request handling.
#[derive(Debug, Clone, Default)]
pub struct HttpOptions {
    pub cors_origins: Vec<String>,
    /// SPA build served for unmatched routes.
    pub static_dir: Option<PathBuf>,
}

impl HttpOptions {
    pub fn from_config(config: &Config) -> Self {
        let static_dir = match config.environment {
            Environment::Production => Some(config.static_dir.clone()),
            Environment::Development | Environment::Unspecified => None,
        };
        Self {
            cors_origins: config.cors_origins.clone(),
            static_dir,
        }
    }
}

pub async fn route_not_found() -> (StatusCode, Json<ErrorBody>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody {
            message: "Route not found".to_string(),
            error: None,
        }),
    )
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}

pub fn build_router(state: AppState, options: &HttpOptions) -> Router {
    let environment = state.environment;

    let router = Router::new()
        .merge(crate::core::http::routes())
        .nest("/api/auth", crate::auth::http::routes())
        .nest("/api/notes", crate::notes::http::routes())
        .route(
            "/api/notes/",
            get(crate::notes::http::list_notes).post(crate::notes::http::create_note),
        )
        .route("/docs", get(docs::docs_page))
        .route(docs::OPENAPI_PATH, get(docs::openapi_json))
        .method_not_allowed_fallback(route_not_found);

    let router = match &options.static_dir {
        Some(dir) => {
            if !dir.is_dir() {
                tracing::warn!(dir = %dir.display(), "static directory does not exist");
            }
            router.fallback_service(
                ServeDir::new(dir).fallback(ServeFile::new(dir.join("index.html"))),
            )
        }
        None => router.fallback(route_not_found),
    };

    router
        .with_state(state)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(middleware::from_fn_with_state(
            environment,
            attach_error_details,
        ))
        .layer(cors_layer(&options.cors_origins))
        .layer(TraceLayer::new_for_http())
}
