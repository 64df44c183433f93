pub mod cars;
pub mod frontend;
pub mod health;
