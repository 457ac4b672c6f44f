use axum::{Router, routing::post};
use storage::Database;

use super::handlers::{login, register};

pub fn routes() -> Router<Database> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}
