pub const API_NAME: &str = "[car-inventory-api]";

/// Field names a POST or PUT body must contain (presence only, not type).
pub const REQUIRED_CAR_FIELDS: [&str; 5] = ["make", "model", "year", "price", "mileageKm"];
