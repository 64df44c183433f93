pub mod config;
pub mod constants;
pub mod error;
pub mod handlers;
pub mod models;
pub mod normalize;
pub mod repository;

use std::sync::Arc;

use axum::Router;

use crate::config::Config;
use crate::repository::CarRepository;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub repo: CarRepository,
    pub config: Arc<Config>,
}

/// Builds the application router: the car CRUD API under /api/cars,
/// the health check, and the static frontend at the root.
///
/// No router-level CORS middleware: it would answer every OPTIONS request
/// before routing, and the explicit OPTIONS handlers own that surface.
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .nest("/api/cars", handlers::cars::router())
        .merge(handlers::health::router())
        .merge(handlers::frontend::router())
        .with_state(state)
}
