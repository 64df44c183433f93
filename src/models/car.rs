use serde::Serialize;
use sqlx::FromRow;

/// One inventory record as the repository stores and loads it.
///
/// Optional text columns (`color`, `vin`, `image_data_url`) are represented
/// as plain strings; the repository maps SQL NULL to "" on read and "" to
/// NULL on write, so an empty string is the only "absent" marker above the
/// storage boundary.
#[derive(Debug, Clone, Default, FromRow)]
pub struct Car {
    pub id: i64,
    pub make: String,
    pub model: String,
    pub year: i64,
    pub price: f64,
    pub mileage_km: i64,
    pub color: String,
    pub vin: String,
    pub image_data_url: String,
    pub created_at: String,
    pub updated_at: String,
}

/// The wire shape of a car. One contract for every car-bearing response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarResponse {
    pub id: i64,
    pub make: String,
    pub model: String,
    pub year: i64,
    pub price: f64,
    pub mileage_km: i64,
    pub color: String,
    pub vin: String,
    pub image_data_url: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Car> for CarResponse {
    fn from(car: Car) -> Self {
        CarResponse {
            id: car.id,
            make: car.make,
            model: car.model,
            year: car.year,
            price: car.price,
            mileage_km: car.mileage_km,
            color: car.color,
            vin: car.vin,
            image_data_url: car.image_data_url,
            created_at: car.created_at,
            updated_at: car.updated_at,
        }
    }
}
