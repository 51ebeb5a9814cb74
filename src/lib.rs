pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod extract;
pub mod mapping;
pub mod models;
pub mod openapi;
pub mod patch;
pub mod routes;
pub mod store;

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::store::FilmeStore;

#[derive(Clone)]
pub struct AppState {
    pub store: FilmeStore,
}

pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .nest("/filme", routes::router())
        .route("/swagger/v1/swagger.json", get(openapi::document))
        .with_state(state)
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
}
