pub mod status;
pub mod upload;

use axum::Router;
use axum::routing::{get, post};

use crate::state::SharedState;

pub fn api_routes() -> Router<SharedState> {
    Router::new()
        .route("/", get(status::index))
        .route("/health", get(status::health))
        .route("/upload", post(upload::upload))
}
