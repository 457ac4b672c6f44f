use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// One row of a user's workout history.
///
/// `date`, `exercise` and `category` are always present; the remaining
/// measurement fields are optional and stay `NULL` when the source data
/// had no value for them.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct WorkoutRecord {
    pub id: i32,
    pub user_id: String,
    pub date: NaiveDate,
    pub exercise: String,
    pub category: String,
    pub weight: Option<f64>,
    pub weight_unit: Option<String>,
    pub reps: Option<i32>,
    pub distance: Option<f64>,
    pub distance_unit: Option<String>,
    pub time: Option<String>,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}
