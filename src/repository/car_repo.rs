use sqlx::SqlitePool;

use crate::constants::API_NAME;
use crate::models::Car;

/// Table plus indexes, applied statement by statement on startup. The VIN
/// index is partial so any number of rows may leave the column NULL.
const SCHEMA: [&str; 4] = [
    "CREATE TABLE IF NOT EXISTS cars (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        make TEXT NOT NULL,
        model TEXT NOT NULL,
        year INTEGER NOT NULL,
        price REAL NOT NULL,
        mileage_km INTEGER NOT NULL,
        color TEXT,
        vin TEXT UNIQUE,
        image_data_url TEXT,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS idx_cars_make_model ON cars(make, model)",
    "CREATE INDEX IF NOT EXISTS idx_cars_year ON cars(year)",
    "CREATE UNIQUE INDEX IF NOT EXISTS idx_cars_vin ON cars(vin) WHERE vin IS NOT NULL",
];

/// Sole owner of the store connection. All SQL for the cars table lives
/// here; callers see entities and `sqlx` errors, never query strings.
/// Statement failures are logged at error level before they are returned.
#[derive(Clone)]
pub struct CarRepository {
    pool: SqlitePool,
}

impl CarRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Creates the table and indexes if absent. A failure here is fatal to
    /// startup; main propagates it.
    pub async fn initialize(&self) -> Result<(), sqlx::Error> {
        for statement in SCHEMA {
            if let Err(e) = sqlx::query(statement).execute(&self.pool).await {
                tracing::error!("{} Failed to initialize schema: {}", API_NAME, e);
                return Err(e);
            }
        }
        Ok(())
    }

    /// Inserts a car, assigning both timestamps, and returns the new id.
    /// Empty optional text fields are stored as NULL. A duplicate non-null
    /// VIN fails the statement and leaves no partial state behind.
    pub async fn insert(&self, car: &Car) -> Result<i64, sqlx::Error> {
        let timestamp = now_timestamp();

        let result = sqlx::query(
            "INSERT INTO cars (make, model, year, price, mileage_km, color, vin, image_data_url, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&car.make)
        .bind(&car.model)
        .bind(car.year)
        .bind(car.price)
        .bind(car.mileage_km)
        .bind(opt_text(&car.color))
        .bind(opt_text(&car.vin))
        .bind(opt_text(&car.image_data_url))
        .bind(&timestamp)
        .bind(&timestamp)
        .execute(&self.pool)
        .await;

        match result {
            Ok(done) => Ok(done.last_insert_rowid()),
            Err(e) => {
                tracing::error!("{} Failed to insert car: {}", API_NAME, e);
                Err(e)
            }
        }
    }

    /// Replaces all mutable columns of an existing row and refreshes
    /// `updated_at`. `id` and `created_at` are never touched. The caller is
    /// expected to have checked existence already.
    pub async fn update(&self, id: i64, car: &Car) -> Result<(), sqlx::Error> {
        let timestamp = now_timestamp();

        let result = sqlx::query(
            "UPDATE cars SET make = ?, model = ?, year = ?, price = ?, mileage_km = ?, \
             color = ?, vin = ?, image_data_url = ?, updated_at = ? WHERE id = ?",
        )
        .bind(&car.make)
        .bind(&car.model)
        .bind(car.year)
        .bind(car.price)
        .bind(car.mileage_km)
        .bind(opt_text(&car.color))
        .bind(opt_text(&car.vin))
        .bind(opt_text(&car.image_data_url))
        .bind(&timestamp)
        .bind(id)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) => {
                tracing::error!("{} Failed to update car {}: {}", API_NAME, id, e);
                Err(e)
            }
        }
    }

    /// Hard-deletes the row. An Ok result means the statement completed,
    /// not that a row existed; callers check existence beforehand.
    pub async fn delete(&self, id: i64) -> Result<(), sqlx::Error> {
        match sqlx::query("DELETE FROM cars WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
        {
            Ok(_) => Ok(()),
            Err(e) => {
                tracing::error!("{} Failed to delete car {}: {}", API_NAME, id, e);
                Err(e)
            }
        }
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Option<Car>, sqlx::Error> {
        let result = sqlx::query_as::<_, Car>(
            "SELECT id, make, model, year, price, mileage_km, \
             COALESCE(color, '') AS color, COALESCE(vin, '') AS vin, \
             COALESCE(image_data_url, '') AS image_data_url, \
             created_at, updated_at FROM cars WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;

        match result {
            Ok(car) => Ok(car),
            Err(e) => {
                tracing::error!("{} Failed to load car {}: {}", API_NAME, id, e);
                Err(e)
            }
        }
    }

    /// All rows in ascending id order. An empty store yields an empty Vec.
    pub async fn get_all(&self) -> Result<Vec<Car>, sqlx::Error> {
        let result = sqlx::query_as::<_, Car>(
            "SELECT id, make, model, year, price, mileage_km, \
             COALESCE(color, '') AS color, COALESCE(vin, '') AS vin, \
             COALESCE(image_data_url, '') AS image_data_url, \
             created_at, updated_at FROM cars ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await;

        match result {
            Ok(cars) => Ok(cars),
            Err(e) => {
                tracing::error!("{} Failed to load cars: {}", API_NAME, e);
                Err(e)
            }
        }
    }

    pub async fn exists(&self, id: i64) -> Result<bool, sqlx::Error> {
        match sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM cars WHERE id = ?)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
        {
            Ok(found) => Ok(found),
            Err(e) => {
                tracing::error!("{} Failed to check car {}: {}", API_NAME, id, e);
                Err(e)
            }
        }
    }

    /// False for an empty VIN by definition; the partial index never sees
    /// empty values because they are stored as NULL.
    pub async fn vin_exists(&self, vin: &str) -> Result<bool, sqlx::Error> {
        if vin.is_empty() {
            return Ok(false);
        }

        match sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM cars WHERE vin = ?)")
            .bind(vin)
            .fetch_one(&self.pool)
            .await
        {
            Ok(found) => Ok(found),
            Err(e) => {
                tracing::error!("{} Failed to check vin: {}", API_NAME, e);
                Err(e)
            }
        }
    }
}

/// Server-assigned timestamps, local time, second resolution.
fn now_timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

fn opt_text(value: &str) -> Option<&str> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_has_the_fixed_wire_format() {
        let ts = now_timestamp();
        assert_eq!(ts.len(), 19);
        assert_eq!(&ts[4..5], "-");
        assert_eq!(&ts[7..8], "-");
        assert_eq!(&ts[10..11], " ");
        assert_eq!(&ts[13..14], ":");
        assert_eq!(&ts[16..17], ":");
    }

    #[test]
    fn empty_text_binds_as_null() {
        assert_eq!(opt_text(""), None);
        assert_eq!(opt_text("Blue"), Some("Blue"));
    }
}
