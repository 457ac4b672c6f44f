use async_trait::async_trait;
use storage::dto::workout::NewWorkoutRecord;
use storage::models::WorkoutRecord;

/// Persistence seam consumed by the CSV importer.
///
/// `begin` opens the transactional scope for one import; every row is
/// written through the returned session and the session is committed or
/// rolled back exactly once, after the last row.
#[async_trait]
pub trait WorkoutStore: Send + Sync {
    type Session: StoreSession;

    async fn begin(&self) -> storage::Result<Self::Session>;
}

#[async_trait]
pub trait StoreSession: Send {
    /// Create one workout record scoped to `user_id`. The record is not
    /// visible outside the session until `commit` succeeds.
    async fn create(
        &mut self,
        user_id: &str,
        fields: &NewWorkoutRecord,
    ) -> storage::Result<WorkoutRecord>;

    async fn commit(self) -> storage::Result<()>;

    async fn rollback(self) -> storage::Result<()>;
}
