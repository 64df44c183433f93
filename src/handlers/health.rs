use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/healthCheck", get(health_check))
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "OK",
        "message": "Car Inventory API is running"
    }))
}
