use axum::{Json, response::Html};
use utoipa::OpenApi;

use crate::app::openapi::ApiDoc;

pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

/// Swagger UI page pointed at [`OPENAPI_PATH`]. The bearer token entered in
/// the UI is kept across reloads.
pub async fn docs_page() -> Html<String> {
    let info = ApiDoc::openapi().info;
    Html(format!(
        r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <title>{title} {version}</title>
  <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css" />
</head>
<body>
  <div id="notes-docs"></div>
  <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
  <script>
    SwaggerUIBundle({{
      url: '{spec}',
      dom_id: '#notes-docs',
      persistAuthorization: true,
      tryItOutEnabled: true,
    }});
  </script>
</body>
</html>
"#,
        title = info.title,
        version = info.version,
        spec = OPENAPI_PATH,
    ))
}

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
