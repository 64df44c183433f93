use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};

use crate::constants::API_NAME;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/app.js", get(app_js))
        .route("/style.css", get(style_css))
}

async fn index(State(state): State<AppState>) -> Response {
    serve_asset(&state, "index.html", "text/html", "Frontend not found").await
}

async fn app_js(State(state): State<AppState>) -> Response {
    serve_asset(&state, "app.js", "application/javascript", "JavaScript not found").await
}

async fn style_css(State(state): State<AppState>) -> Response {
    serve_asset(&state, "style.css", "text/css", "CSS not found").await
}

// A missing or empty asset reads as "not found" so a half-deployed
// frontend directory never serves blank pages.
async fn serve_asset(
    state: &AppState,
    file_name: &str,
    content_type: &'static str,
    missing_message: &'static str,
) -> Response {
    let path = format!("{}/{}", state.config.frontend_dir, file_name);
    let content = tokio::fs::read_to_string(&path).await.unwrap_or_default();

    if content.is_empty() {
        tracing::warn!("{} Frontend asset missing: {}", API_NAME, path);
        return (
            StatusCode::NOT_FOUND,
            [(header::CONTENT_TYPE, "text/plain")],
            missing_message,
        )
            .into_response();
    }

    ([(header::CONTENT_TYPE, content_type)], content).into_response()
}
