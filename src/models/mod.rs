pub mod car;

pub use car::{Car, CarResponse};
