use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::Value;

use crate::constants::{API_NAME, REQUIRED_CAR_FIELDS};
use crate::error::AppError;
use crate::models::{Car, CarResponse};
use crate::normalize::{to_title_case, to_upper_case};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(list_cars).post(create_car).options(collection_options),
        )
        .route(
            "/{id}",
            get(get_car)
                .put(replace_car)
                .patch(patch_car)
                .delete(delete_car)
                .options(item_options),
        )
}

// Body extraction is deliberately permissive: a missing key yields the
// default, and so does a present key holding the wrong JSON type. Only the
// key-presence check for POST/PUT can reject a body.

fn get_string(body: &Value, key: &str) -> String {
    match body.get(key) {
        Some(Value::String(s)) => s.clone(),
        _ => String::new(),
    }
}

fn get_i64(body: &Value, key: &str) -> i64 {
    match body.get(key) {
        Some(value) => value
            .as_i64()
            .or_else(|| value.as_f64().map(|f| f as i64))
            .unwrap_or(0),
        None => 0,
    }
}

fn get_f64(body: &Value, key: &str) -> f64 {
    body.get(key).and_then(Value::as_f64).unwrap_or(0.0)
}

fn parse_body(body: &str) -> Result<Value, AppError> {
    serde_json::from_str(body).map_err(|_| AppError::InvalidJson)
}

fn require_car_fields(body: &Value) -> Result<(), AppError> {
    let missing = REQUIRED_CAR_FIELDS
        .iter()
        .any(|field| body.get(*field).is_none());
    if missing {
        Err(AppError::MissingFields)
    } else {
        Ok(())
    }
}

/// Builds a car from a POST or PUT body: fields extracted permissively,
/// free-text fields normalized to their canonical case.
fn car_from_body(body: &Value) -> Car {
    Car {
        make: to_title_case(&get_string(body, "make")),
        model: to_title_case(&get_string(body, "model")),
        year: get_i64(body, "year"),
        price: get_f64(body, "price"),
        mileage_km: get_i64(body, "mileageKm"),
        color: to_title_case(&get_string(body, "color")),
        vin: to_upper_case(&get_string(body, "vin")),
        image_data_url: get_string(body, "imageDataUrl"),
        ..Car::default()
    }
}

async fn list_cars(State(state): State<AppState>) -> Json<Vec<CarResponse>> {
    // A read failure degrades to an empty listing; the repository has
    // already logged the cause.
    let cars = state.repo.get_all().await.unwrap_or_default();
    Json(cars.into_iter().map(CarResponse::from).collect())
}

async fn get_car(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<CarResponse>, AppError> {
    match state.repo.get_by_id(id).await {
        Ok(Some(car)) => Ok(Json(CarResponse::from(car))),
        _ => Err(AppError::NotFound),
    }
}

async fn create_car(State(state): State<AppState>, body: String) -> Result<Response, AppError> {
    let body = parse_body(&body)?;
    require_car_fields(&body)?;

    let car = car_from_body(&body);
    let new_id = state
        .repo
        .insert(&car)
        .await
        .map_err(|_| AppError::Persistence("Failed to create car (possible duplicate VIN)"))?;

    tracing::info!("{} Created car {} ({} {})", API_NAME, new_id, car.make, car.model);

    // Respond with the stored row so server-assigned fields are included.
    let created = state
        .repo
        .get_by_id(new_id)
        .await
        .ok()
        .flatten()
        .unwrap_or_default();

    let response = (
        StatusCode::CREATED,
        [(header::LOCATION, format!("/api/cars/{}", new_id))],
        Json(CarResponse::from(created)),
    );
    Ok(response.into_response())
}

async fn replace_car(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    body: String,
) -> Result<Json<CarResponse>, AppError> {
    if !state.repo.exists(id).await.unwrap_or(false) {
        return Err(AppError::NotFound);
    }

    let body = parse_body(&body)?;
    require_car_fields(&body)?;

    let car = car_from_body(&body);
    state
        .repo
        .update(id, &car)
        .await
        .map_err(|_| AppError::Persistence("Failed to update car (possible duplicate VIN)"))?;

    tracing::info!("{} Replaced car {}", API_NAME, id);

    let updated = state.repo.get_by_id(id).await.ok().flatten().unwrap_or_default();
    Ok(Json(CarResponse::from(updated)))
}

async fn patch_car(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    body: String,
) -> Result<Json<CarResponse>, AppError> {
    if !state.repo.exists(id).await.unwrap_or(false) {
        return Err(AppError::NotFound);
    }

    let body = parse_body(&body)?;

    let mut car = match state.repo.get_by_id(id).await {
        Ok(Some(car)) => car,
        _ => return Err(AppError::NotFound),
    };

    // Only keys present in the body change the record. Normalization is
    // opt-in for PATCH; by default values are stored verbatim.
    let normalize = state.config.normalize_patch;
    if body.get("make").is_some() {
        let raw = get_string(&body, "make");
        car.make = if normalize { to_title_case(&raw) } else { raw };
    }
    if body.get("model").is_some() {
        let raw = get_string(&body, "model");
        car.model = if normalize { to_title_case(&raw) } else { raw };
    }
    if body.get("year").is_some() {
        car.year = get_i64(&body, "year");
    }
    if body.get("price").is_some() {
        car.price = get_f64(&body, "price");
    }
    if body.get("mileageKm").is_some() {
        car.mileage_km = get_i64(&body, "mileageKm");
    }
    if body.get("color").is_some() {
        let raw = get_string(&body, "color");
        car.color = if normalize { to_title_case(&raw) } else { raw };
    }
    if body.get("vin").is_some() {
        let raw = get_string(&body, "vin");
        car.vin = if normalize { to_upper_case(&raw) } else { raw };
    }
    if body.get("imageDataUrl").is_some() {
        car.image_data_url = get_string(&body, "imageDataUrl");
    }

    state
        .repo
        .update(id, &car)
        .await
        .map_err(|_| AppError::Persistence("Failed to update car"))?;

    tracing::info!("{} Patched car {}", API_NAME, id);

    let updated = state.repo.get_by_id(id).await.ok().flatten().unwrap_or_default();
    Ok(Json(CarResponse::from(updated)))
}

async fn delete_car(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    if !state.repo.exists(id).await.unwrap_or(false) {
        return Err(AppError::NotFound);
    }

    state
        .repo
        .delete(id)
        .await
        .map_err(|_| AppError::Persistence("Failed to delete car"))?;

    tracing::info!("{} Deleted car {}", API_NAME, id);
    Ok(StatusCode::NO_CONTENT)
}

async fn collection_options() -> impl IntoResponse {
    (
        StatusCode::NO_CONTENT,
        [
            (header::ALLOW, "GET, POST, OPTIONS"),
            (
                header::ACCESS_CONTROL_ALLOW_METHODS,
                "GET, POST, PUT, PATCH, DELETE, OPTIONS",
            ),
            (
                header::ACCESS_CONTROL_ALLOW_HEADERS,
                "Content-Type, Authorization",
            ),
        ],
    )
}

async fn item_options() -> impl IntoResponse {
    (
        StatusCode::NO_CONTENT,
        [
            (header::ALLOW, "GET, PUT, PATCH, DELETE, OPTIONS"),
            (
                header::ACCESS_CONTROL_ALLOW_METHODS,
                "GET, POST, PUT, PATCH, DELETE, OPTIONS",
            ),
            (
                header::ACCESS_CONTROL_ALLOW_HEADERS,
                "Content-Type, Authorization",
            ),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn get_string_defaults_missing_and_wrong_typed_keys() {
        let body = json!({ "make": "Honda", "year": 2020 });
        assert_eq!(get_string(&body, "make"), "Honda");
        assert_eq!(get_string(&body, "model"), "");
        assert_eq!(get_string(&body, "year"), "");
    }

    #[test]
    fn get_i64_accepts_any_json_number() {
        let body = json!({ "year": 2020, "mileageKm": 42000.9, "price": "lots" });
        assert_eq!(get_i64(&body, "year"), 2020);
        // Floats truncate toward zero.
        assert_eq!(get_i64(&body, "mileageKm"), 42000);
        assert_eq!(get_i64(&body, "price"), 0);
        assert_eq!(get_i64(&body, "absent"), 0);
    }

    #[test]
    fn get_f64_defaults_non_numbers() {
        let body = json!({ "price": 19999, "year": true });
        assert_eq!(get_f64(&body, "price"), 19999.0);
        assert_eq!(get_f64(&body, "year"), 0.0);
        assert_eq!(get_f64(&body, "absent"), 0.0);
    }

    #[test]
    fn helpers_treat_non_object_bodies_as_empty() {
        let body = json!([1, 2, 3]);
        assert_eq!(get_string(&body, "make"), "");
        assert_eq!(get_i64(&body, "year"), 0);
        assert!(require_car_fields(&body).is_err());
    }

    #[test]
    fn require_car_fields_checks_presence_not_type() {
        let complete = json!({
            "make": 1, "model": null, "year": "x", "price": [], "mileageKm": {}
        });
        assert!(require_car_fields(&complete).is_ok());

        let partial = json!({ "make": "Honda" });
        assert!(require_car_fields(&partial).is_err());
    }

    #[test]
    fn car_from_body_normalizes_text_fields() {
        let body = json!({
            "make": "  toYOTA ",
            "model": "camry",
            "year": 2020,
            "price": 21500.5,
            "mileageKm": 42000,
            "color": "midnight blue",
            "vin": " 1hgcm82633a123456 ",
            "imageDataUrl": "data:image/png;base64,AAAA"
        });

        let car = car_from_body(&body);
        assert_eq!(car.make, "Toyota");
        assert_eq!(car.model, "Camry");
        assert_eq!(car.year, 2020);
        assert_eq!(car.price, 21500.5);
        assert_eq!(car.mileage_km, 42000);
        assert_eq!(car.color, "Midnight Blue");
        assert_eq!(car.vin, "1HGCM82633A123456");
        // Image payloads are opaque and never normalized.
        assert_eq!(car.image_data_url, "data:image/png;base64,AAAA");
        assert_eq!(car.id, 0);
    }

    #[test]
    fn car_from_body_substitutes_defaults_for_wrong_types() {
        let body = json!({
            "make": "Honda",
            "model": "Civic",
            "year": "2020",
            "price": false,
            "mileageKm": null
        });

        let car = car_from_body(&body);
        assert_eq!(car.year, 0);
        assert_eq!(car.price, 0.0);
        assert_eq!(car.mileage_km, 0);
        assert_eq!(car.color, "");
        assert_eq!(car.vin, "");
    }

    #[test]
    fn parse_body_rejects_malformed_json() {
        assert!(parse_body("{\"make\": \"Honda\"}").is_ok());
        assert!(parse_body("not json").is_err());
        assert!(parse_body("").is_err());
    }
}
