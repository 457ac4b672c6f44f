use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::models::WorkoutRecord;

/// Field values for one workout record, as handed to the store's create
/// operation. Optional fields are `None` when the source had no value,
/// never a zero placeholder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NewWorkoutRecord {
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
}

/// Flat serialized form of a persisted record, with all temporal fields
/// rendered as ISO-8601 strings.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WorkoutRecordResponse {
    pub id: i32,
    pub user_id: String,
    pub date: String,
    pub exercise: String,
    pub category: String,
    pub weight: Option<f64>,
    pub weight_unit: Option<String>,
    pub reps: Option<i32>,
    pub distance: Option<f64>,
    pub distance_unit: Option<String>,
    pub time: Option<String>,
    pub comment: Option<String>,
    pub created_at: String,
    pub updated_at: Option<String>,
}

impl From<WorkoutRecord> for WorkoutRecordResponse {
    fn from(record: WorkoutRecord) -> Self {
        Self {
            id: record.id,
            user_id: record.user_id,
            date: record.date.format("%Y-%m-%d").to_string(),
            exercise: record.exercise,
            category: record.category,
            weight: record.weight,
            weight_unit: record.weight_unit,
            reps: record.reps,
            distance: record.distance,
            distance_unit: record.distance_unit,
            time: record.time,
            comment: record.comment,
            created_at: record.created_at.to_rfc3339(),
            updated_at: record.updated_at.map(|ts| ts.to_rfc3339()),
        }
    }
}

/// Optional filters for listing a user's workout history.
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct WorkoutFilter {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub exercise: Option<String>,
    pub category: Option<String>,
}

/// Full-replace update payload for an existing workout record.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateWorkoutRequest {
    pub date: NaiveDate,

    #[validate(length(min = 1, max = 255, message = "Exercise must not be empty"))]
    pub exercise: String,

    #[validate(length(min = 1, max = 100, message = "Category must not be empty"))]
    pub category: String,

    pub weight: Option<f64>,

    #[validate(length(max = 10))]
    pub weight_unit: Option<String>,

    pub reps: Option<i32>,

    pub distance: Option<f64>,

    #[validate(length(max = 10))]
    pub distance_unit: Option<String>,

    #[validate(length(max = 50))]
    pub time: Option<String>,

    pub comment: Option<String>,
}
