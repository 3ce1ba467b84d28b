mod common;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use notes_api::app::router::HttpOptions;
use serde_json::Value;
use uuid::Uuid;

use crate::common::{TestApp, message};

#[tokio::test]
async fn root_reports_status_and_health_is_ok() {
    let app = TestApp::new();

    let (status, body) = app.get_json("/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(message(&body), Some("Notes API is running"));
    assert_eq!(body.get("status").and_then(Value::as_str), Some("active"));
    assert!(body.get("timestamp").and_then(Value::as_str).is_some());

    let (status, body) = app.get_text("/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");
}

#[tokio::test]
async fn unknown_routes_and_methods_are_not_found() {
    let app = TestApp::new();

    let (status, body) = app.get_json("/api/nothing-here", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(message(&body), Some("Route not found"));

    let (status, body) = app.delete_json("/api/notes", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(message(&body), Some("Route not found"));
}

#[tokio::test]
async fn docs_and_openapi_are_available() {
    let app = TestApp::new();

    let (status, html) = app.get_text("/docs", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("SwaggerUIBundle"));

    let (status, openapi_json) = app.get_json("/api-docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        openapi_json.get("openapi").and_then(Value::as_str),
        Some("3.1.0")
    );
    assert!(openapi_json["paths"].get("/api/notes/{id}").is_some());
    assert_eq!(openapi_json["info"]["title"], "Notes API");
    assert_eq!(
        openapi_json["components"]["securitySchemes"]["bearer_auth"]["scheme"],
        "bearer"
    );
    assert!(html.contains("Notes API"));
}

#[tokio::test]
async fn cors_preflight_allows_only_listed_origins() {
    let app = TestApp::with_options(&HttpOptions {
        cors_origins: vec!["http://localhost:5173".to_string()],
        static_dir: None,
    });

    let preflight = |origin: &str| {
        Request::builder()
            .method(Method::OPTIONS)
            .uri("/api/notes")
            .header(header::ORIGIN, origin)
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "authorization,content-type")
            .body(Body::empty())
            .unwrap()
    };

    let (_, headers, _) = app.send(preflight("http://localhost:5173")).await;
    assert_eq!(
        headers
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok()),
        Some("http://localhost:5173")
    );
    assert_eq!(
        headers
            .get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS)
            .and_then(|v| v.to_str().ok()),
        Some("true")
    );

    let (_, headers, _) = app.send(preflight("https://evil.example")).await;
    assert!(headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
}

#[tokio::test]
async fn static_dir_serves_the_spa_for_unknown_paths() {
    let dir = std::env::temp_dir().join(format!("notes-api-spa-{}", Uuid::new_v4()));
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("index.html"), "<div id=\"root\"></div>").unwrap();

    let app = TestApp::with_options(&HttpOptions {
        cors_origins: Vec::new(),
        static_dir: Some(dir.clone()),
    });

    let (status, html) = app.get_text("/some/client/route", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("id=\"root\""));

    // API routes still take precedence
    let (status, _) = app.get_json("/api/notes", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    std::fs::remove_dir_all(&dir).ok();
}
