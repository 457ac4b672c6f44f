use sqlx::{PgPool, Postgres, QueryBuilder, Transaction};

use crate::dto::workout::{NewWorkoutRecord, UpdateWorkoutRequest, WorkoutFilter};
use crate::error::{Result, StorageError};
use crate::models::WorkoutRecord;

const RECORD_COLUMNS: &str = "id, user_id, date, exercise, category, weight, weight_unit, reps, \
     distance, distance_unit, time, comment, created_at, updated_at";

pub struct WorkoutRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> WorkoutRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert one record inside the caller's transaction. Nothing is
    /// visible to other sessions until that transaction commits.
    pub async fn create(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user_id: &str,
        fields: &NewWorkoutRecord,
    ) -> Result<WorkoutRecord> {
        let record = sqlx::query_as::<_, WorkoutRecord>(&format!(
            "INSERT INTO workout_history \
                 (user_id, date, exercise, category, weight, weight_unit, reps, \
                  distance, distance_unit, time, comment) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             RETURNING {RECORD_COLUMNS}"
        ))
        .bind(user_id)
        .bind(fields.date)
        .bind(&fields.exercise)
        .bind(&fields.category)
        .bind(fields.weight)
        .bind(&fields.weight_unit)
        .bind(fields.reps)
        .bind(fields.distance)
        .bind(&fields.distance_unit)
        .bind(&fields.time)
        .bind(&fields.comment)
        .fetch_one(&mut **tx)
        .await?;

        Ok(record)
    }

    /// List a user's workout history, newest first, with optional date
    /// range, exercise and category filters.
    pub async fn list(&self, user_id: &str, filter: &WorkoutFilter) -> Result<Vec<WorkoutRecord>> {
        let mut query = QueryBuilder::<Postgres>::new(format!(
            "SELECT {RECORD_COLUMNS} FROM workout_history WHERE user_id = "
        ));
        query.push_bind(user_id);

        if let Some(start_date) = filter.start_date {
            query.push(" AND date >= ");
            query.push_bind(start_date);
        }
        if let Some(end_date) = filter.end_date {
            query.push(" AND date <= ");
            query.push_bind(end_date);
        }
        if let Some(exercise) = &filter.exercise {
            query.push(" AND exercise = ");
            query.push_bind(exercise);
        }
        if let Some(category) = &filter.category {
            query.push(" AND category = ");
            query.push_bind(category);
        }

        query.push(" ORDER BY date DESC, created_at DESC");

        let records = query
            .build_query_as::<WorkoutRecord>()
            .fetch_all(self.pool)
            .await?;

        Ok(records)
    }

    /// Find one record owned by `user_id`
    pub async fn find_by_id(&self, user_id: &str, id: i32) -> Result<WorkoutRecord> {
        let record = sqlx::query_as::<_, WorkoutRecord>(&format!(
            "SELECT {RECORD_COLUMNS} FROM workout_history WHERE id = $1 AND user_id = $2"
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(record)
    }

    /// Replace an existing record's fields
    pub async fn update(
        &self,
        user_id: &str,
        id: i32,
        req: &UpdateWorkoutRequest,
    ) -> Result<WorkoutRecord> {
        let record = sqlx::query_as::<_, WorkoutRecord>(&format!(
            "UPDATE workout_history \
             SET date = $3, \
                 exercise = $4, \
                 category = $5, \
                 weight = $6, \
                 weight_unit = $7, \
                 reps = $8, \
                 distance = $9, \
                 distance_unit = $10, \
                 time = $11, \
                 comment = $12, \
                 updated_at = NOW() \
             WHERE id = $1 AND user_id = $2 \
             RETURNING {RECORD_COLUMNS}"
        ))
        .bind(id)
        .bind(user_id)
        .bind(req.date)
        .bind(&req.exercise)
        .bind(&req.category)
        .bind(req.weight)
        .bind(&req.weight_unit)
        .bind(req.reps)
        .bind(req.distance)
        .bind(&req.distance_unit)
        .bind(&req.time)
        .bind(&req.comment)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(record)
    }

    /// Delete one record owned by `user_id`
    pub async fn delete(&self, user_id: &str, id: i32) -> Result<()> {
        let result = sqlx::query("DELETE FROM workout_history WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}
