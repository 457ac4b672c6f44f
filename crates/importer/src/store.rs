use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use storage::dto::workout::NewWorkoutRecord;
use storage::models::WorkoutRecord;
use storage::repository::WorkoutRepository;

use crate::traits::{StoreSession, WorkoutStore};

/// Postgres-backed workout store.
pub struct PgWorkoutStore {
    pool: PgPool,
}

impl PgWorkoutStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

pub struct PgStoreSession {
    pool: PgPool,
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl WorkoutStore for PgWorkoutStore {
    type Session = PgStoreSession;

    async fn begin(&self) -> storage::Result<Self::Session> {
        let tx = self.pool.begin().await?;

        Ok(PgStoreSession {
            pool: self.pool.clone(),
            tx,
        })
    }
}

#[async_trait]
impl StoreSession for PgStoreSession {
    async fn create(
        &mut self,
        user_id: &str,
        fields: &NewWorkoutRecord,
    ) -> storage::Result<WorkoutRecord> {
        WorkoutRepository::new(&self.pool)
            .create(&mut self.tx, user_id, fields)
            .await
    }

    async fn commit(self) -> storage::Result<()> {
        Ok(self.tx.commit().await?)
    }

    async fn rollback(self) -> storage::Result<()> {
        Ok(self.tx.rollback().await?)
    }
}
