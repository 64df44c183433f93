use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::constants::{API_NAME, REQUIRED_CAR_FIELDS};

/// Request failures a handler can surface. Everything that reaches the wire
/// goes through `IntoResponse` below, so the JSON error shape is uniform.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid JSON")]
    InvalidJson,

    #[error("missing required fields")]
    MissingFields,

    #[error("Car not found")]
    NotFound,

    #[error("{0}")]
    Persistence(&'static str),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::InvalidJson => {
                tracing::warn!("{} Rejected request: body is not valid JSON", API_NAME);
                (StatusCode::BAD_REQUEST, "Invalid JSON".to_string())
            }
            AppError::MissingFields => {
                tracing::warn!("{} Rejected request: missing required fields", API_NAME);
                (
                    StatusCode::BAD_REQUEST,
                    format!("Missing required fields: {}", REQUIRED_CAR_FIELDS.join(", ")),
                )
            }
            AppError::NotFound => {
                tracing::warn!("{} Car not found", API_NAME);
                (StatusCode::NOT_FOUND, "Car not found".to_string())
            }
            AppError::Persistence(msg) => {
                tracing::error!("{} {}", API_NAME, msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg.to_string())
            }
        };

        let body = Json(json!({ "error": message }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(error: AppError) -> (StatusCode, serde_json::Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn not_found_maps_to_404_with_fixed_body() {
        let (status, body) = body_json(AppError::NotFound).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, serde_json::json!({ "error": "Car not found" }));
    }

    #[tokio::test]
    async fn missing_fields_lists_every_required_field() {
        let (status, body) = body_json(AppError::MissingFields).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["error"],
            "Missing required fields: make, model, year, price, mileageKm"
        );
    }

    #[tokio::test]
    async fn persistence_maps_to_500_with_generic_message() {
        let (status, body) = body_json(AppError::Persistence(
            "Failed to create car (possible duplicate VIN)",
        ))
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Failed to create car (possible duplicate VIN)");
    }
}
