use axum::{
    Router,
    routing::{delete, get, put},
};
use storage::Database;

use super::handlers::{delete_workout, list_workouts, update_workout};

pub fn routes() -> Router<Database> {
    Router::new()
        .route("/", get(list_workouts))
        .route("/:id", put(update_workout))
        .route("/:id", delete(delete_workout))
}
