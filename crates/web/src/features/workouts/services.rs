use sqlx::PgPool;
use storage::{
    dto::workout::{UpdateWorkoutRequest, WorkoutFilter},
    error::Result,
    models::WorkoutRecord,
    repository::workout::WorkoutRepository,
};

/// List a user's workout history with optional filters
pub async fn list_workouts(
    pool: &PgPool,
    user_id: &str,
    filter: &WorkoutFilter,
) -> Result<Vec<WorkoutRecord>> {
    let repo = WorkoutRepository::new(pool);
    repo.list(user_id, filter).await
}

/// Replace one workout record's fields
pub async fn update_workout(
    pool: &PgPool,
    user_id: &str,
    id: i32,
    req: &UpdateWorkoutRequest,
) -> Result<WorkoutRecord> {
    let repo = WorkoutRepository::new(pool);
    repo.update(user_id, id, req).await
}

/// Delete one workout record
pub async fn delete_workout(pool: &PgPool, user_id: &str, id: i32) -> Result<()> {
    let repo = WorkoutRepository::new(pool);
    repo.delete(user_id, id).await
}
