use axum::{Router, routing::post};
use storage::Database;

use super::handlers::upload_workout_csv;

pub fn routes() -> Router<Database> {
    Router::new().route("/", post(upload_workout_csv))
}
