use std::sync::{Arc, Mutex};

use chrono::{NaiveDate, Utc};
use storage::StorageError;
use storage::dto::workout::NewWorkoutRecord;
use storage::models::WorkoutRecord;

use crate::error::ImportError;
use crate::importer::{CsvWorkoutImporter, parse_records};
use crate::traits::{StoreSession, WorkoutStore};

const USER: &str = "11111111-2222-3333-4444-555555555555";

/// In-memory stand-in for the Postgres store. Records created through a
/// session stay staged until `commit`; a dropped or rolled-back session
/// leaves the committed set untouched, mirroring the transactional
/// behavior the importer relies on.
#[derive(Default)]
struct MemoryStore {
    inner: Arc<Mutex<StoreState>>,
}

#[derive(Default)]
struct StoreState {
    committed: Vec<WorkoutRecord>,
    create_calls: usize,
    fail_create_on_call: Option<usize>,
    fail_commit: bool,
}

impl MemoryStore {
    fn failing_create(call: usize) -> Self {
        let store = Self::default();
        store.inner.lock().unwrap().fail_create_on_call = Some(call);
        store
    }

    fn failing_commit() -> Self {
        let store = Self::default();
        store.inner.lock().unwrap().fail_commit = true;
        store
    }

    fn committed(&self) -> Vec<WorkoutRecord> {
        self.inner.lock().unwrap().committed.clone()
    }

    fn create_calls(&self) -> usize {
        self.inner.lock().unwrap().create_calls
    }
}

struct MemorySession {
    inner: Arc<Mutex<StoreState>>,
    staged: Vec<WorkoutRecord>,
}

#[async_trait::async_trait]
impl WorkoutStore for MemoryStore {
    type Session = MemorySession;

    async fn begin(&self) -> storage::Result<Self::Session> {
        Ok(MemorySession {
            inner: Arc::clone(&self.inner),
            staged: Vec::new(),
        })
    }
}

#[async_trait::async_trait]
impl StoreSession for MemorySession {
    async fn create(
        &mut self,
        user_id: &str,
        fields: &NewWorkoutRecord,
    ) -> storage::Result<WorkoutRecord> {
        let mut state = self.inner.lock().unwrap();
        state.create_calls += 1;
        if state.fail_create_on_call == Some(state.create_calls) {
            return Err(StorageError::ConstraintViolation(
                "simulated insert failure".to_string(),
            ));
        }

        let id = (state.committed.len() + self.staged.len() + 1) as i32;
        let record = WorkoutRecord {
            id,
            user_id: user_id.to_string(),
            date: fields.date,
            exercise: fields.exercise.clone(),
            category: fields.category.clone(),
            weight: fields.weight,
            weight_unit: fields.weight_unit.clone(),
            reps: fields.reps,
            distance: fields.distance,
            distance_unit: fields.distance_unit.clone(),
            time: fields.time.clone(),
            comment: fields.comment.clone(),
            created_at: Utc::now(),
            updated_at: None,
        };

        self.staged.push(record.clone());
        Ok(record)
    }

    async fn commit(mut self) -> storage::Result<()> {
        let mut state = self.inner.lock().unwrap();
        if state.fail_commit {
            return Err(StorageError::Database(sqlx::Error::PoolClosed));
        }

        state.committed.append(&mut self.staged);
        Ok(())
    }

    async fn rollback(self) -> storage::Result<()> {
        Ok(())
    }
}

#[tokio::test]
async fn imports_rows_in_file_order() {
    let store = MemoryStore::default();
    let importer = CsvWorkoutImporter::new(&store);

    let csv = "date,exercise,category,weight,weight_unit,reps\n\
               2024-03-14,Bench Press,Chest,82.5,kg,5\n\
               03/15/2024,Squat,Legs,120,kg,3\n\
               16-03-2024,Deadlift,Back,140.25,kg,1\n";

    let records = importer.import(USER, csv).await.unwrap();

    assert_eq!(records.len(), 3);
    assert_eq!(
        records.iter().map(|r| r.exercise.as_str()).collect::<Vec<_>>(),
        vec!["Bench Press", "Squat", "Deadlift"]
    );
    assert_eq!(records[0].id, 1);
    assert_eq!(records[0].user_id, USER);
    assert_eq!(records[0].date, "2024-03-14");
    assert!((records[0].weight.unwrap() - 82.5).abs() < 1e-9);
    assert_eq!(records[0].reps, Some(5));
    assert_eq!(records[1].date, "2024-03-15");
    assert_eq!(records[2].date, "2024-03-16");
    assert!((records[2].weight.unwrap() - 140.25).abs() < 1e-9);

    assert_eq!(store.committed().len(), 3);
}

#[tokio::test]
async fn every_date_format_yields_the_same_calendar_date() {
    let store = MemoryStore::default();
    let importer = CsvWorkoutImporter::new(&store);

    let csv = "date,exercise,category\n\
               2024-03-14,Run,Cardio\n\
               03/14/2024,Run,Cardio\n\
               14/03/2024,Run,Cardio\n\
               2024/03/14,Run,Cardio\n\
               03-14-2024,Run,Cardio\n\
               14-03-2024,Run,Cardio\n";

    let records = importer.import(USER, csv).await.unwrap();

    assert_eq!(records.len(), 6);
    assert!(records.iter().all(|r| r.date == "2024-03-14"));
}

#[tokio::test]
async fn invalid_row_rolls_back_the_whole_import() {
    let store = MemoryStore::default();
    let importer = CsvWorkoutImporter::new(&store);

    let csv = "date,exercise,category\n\
               2024-03-14,Bench Press,Chest\n\
               not-a-date,Squat,Legs\n\
               2024-03-16,Deadlift,Back\n";

    let err = importer.import(USER, csv).await.unwrap_err();

    match err {
        ImportError::InvalidRow { row, ref reason } => {
            assert_eq!(row, 2);
            assert!(reason.contains("not-a-date"));
        }
        other => panic!("expected InvalidRow, got {other:?}"),
    }

    // Row 1 was created inside the transaction but must not survive it.
    assert_eq!(store.create_calls(), 1);
    assert!(store.committed().is_empty());
}

#[tokio::test]
async fn blank_weight_is_absent_not_zero() {
    let store = MemoryStore::default();
    let importer = CsvWorkoutImporter::new(&store);

    let csv = "date,exercise,category,weight\n\
               2024-03-14,Plank,Core,\n";

    let records = importer.import(USER, csv).await.unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].weight, None);
}

#[tokio::test]
async fn unparsable_weight_names_row_and_field() {
    let store = MemoryStore::default();
    let importer = CsvWorkoutImporter::new(&store);

    let csv = "date,exercise,category,weight\n\
               2024-03-14,Bench Press,Chest,abc\n";

    let err = importer.import(USER, csv).await.unwrap_err();
    let message = err.to_string();

    assert!(matches!(err, ImportError::InvalidRow { row: 1, .. }));
    assert!(message.contains("weight"));
    assert!(store.committed().is_empty());
}

#[tokio::test]
async fn missing_required_column_fails_before_any_write() {
    let store = MemoryStore::default();
    let importer = CsvWorkoutImporter::new(&store);

    let csv = "date,exercise,weight\n2024-03-14,Bench Press,82.5\n";

    let err = importer.import(USER, csv).await.unwrap_err();

    match err {
        ImportError::MissingColumns { columns } => {
            assert_eq!(columns, vec!["category".to_string()]);
        }
        other => panic!("expected MissingColumns, got {other:?}"),
    }

    assert_eq!(store.create_calls(), 0);
}

#[tokio::test]
async fn unknown_column_fails_before_any_write() {
    let store = MemoryStore::default();
    let importer = CsvWorkoutImporter::new(&store);

    let csv = "date,exercise,category,notes2\n2024-03-14,Bench Press,Chest,hello\n";

    let err = importer.import(USER, csv).await.unwrap_err();

    match err {
        ImportError::UnknownColumns { columns } => {
            assert_eq!(columns, vec!["notes2".to_string()]);
        }
        other => panic!("expected UnknownColumns, got {other:?}"),
    }

    assert_eq!(store.create_calls(), 0);
}

#[tokio::test]
async fn header_case_and_spacing_are_interchangeable() {
    let store = MemoryStore::default();
    let importer = CsvWorkoutImporter::new(&store);

    let csv = "Date,EXERCISE,Category,Weight,Weight Unit,Distance,DISTANCE_UNIT\n\
               2024-03-14,Row,Cardio,,,5.2,km\n";

    let records = importer.import(USER, csv).await.unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].distance_unit.as_deref(), Some("km"));
    assert!((records[0].distance.unwrap() - 5.2).abs() < 1e-9);
    assert_eq!(records[0].weight, None);
}

#[tokio::test]
async fn missing_exercise_value_fails_the_row() {
    let store = MemoryStore::default();
    let importer = CsvWorkoutImporter::new(&store);

    let csv = "date,exercise,category\n\
               2024-03-14,Bench Press,Chest\n\
               2024-03-15,  ,Legs\n";

    let err = importer.import(USER, csv).await.unwrap_err();
    let message = err.to_string();

    assert!(matches!(err, ImportError::InvalidRow { row: 2, .. }));
    assert!(message.contains("exercise"));
    assert!(store.committed().is_empty());
}

#[tokio::test]
async fn fractional_reps_fail_the_row() {
    let store = MemoryStore::default();
    let importer = CsvWorkoutImporter::new(&store);

    let csv = "date,exercise,category,reps\n2024-03-14,Squat,Legs,3.5\n";

    let err = importer.import(USER, csv).await.unwrap_err();

    assert!(matches!(err, ImportError::InvalidRow { row: 1, .. }));
    assert!(err.to_string().contains("reps"));
}

#[tokio::test]
async fn store_failure_reports_the_row_and_rolls_back() {
    let store = MemoryStore::failing_create(2);
    let importer = CsvWorkoutImporter::new(&store);

    let csv = "date,exercise,category\n\
               2024-03-14,Bench Press,Chest\n\
               2024-03-15,Squat,Legs\n";

    let err = importer.import(USER, csv).await.unwrap_err();

    match err {
        ImportError::Store { row, source } => {
            assert_eq!(row, 2);
            assert!(matches!(source, StorageError::ConstraintViolation(_)));
        }
        other => panic!("expected Store, got {other:?}"),
    }

    assert!(store.committed().is_empty());
}

#[tokio::test]
async fn commit_failure_means_zero_records_persisted() {
    let store = MemoryStore::failing_commit();
    let importer = CsvWorkoutImporter::new(&store);

    let csv = "date,exercise,category\n2024-03-14,Bench Press,Chest\n";

    let err = importer.import(USER, csv).await.unwrap_err();

    assert!(matches!(err, ImportError::Commit { .. }));
    assert!(err.to_string().contains("no records were imported"));
    assert!(store.committed().is_empty());
}

#[tokio::test]
async fn passthrough_fields_are_copied_verbatim() {
    let store = MemoryStore::default();
    let importer = CsvWorkoutImporter::new(&store);

    let csv = "date,exercise,category,time,comment\n\
               2024-03-14,Run,Cardio,25:30,felt strong today\n";

    let records = importer.import(USER, csv).await.unwrap();

    assert_eq!(records[0].time.as_deref(), Some("25:30"));
    assert_eq!(records[0].comment.as_deref(), Some("felt strong today"));
    // Columns absent from the upload stay absent on the record.
    assert_eq!(records[0].weight_unit, None);
    assert_eq!(records[0].distance_unit, None);
}

#[tokio::test]
async fn empty_input_reports_all_required_columns_missing() {
    let store = MemoryStore::default();
    let importer = CsvWorkoutImporter::new(&store);

    let err = importer.import(USER, "").await.unwrap_err();

    match err {
        ImportError::MissingColumns { columns } => {
            assert_eq!(columns, vec!["date", "exercise", "category"]);
        }
        other => panic!("expected MissingColumns, got {other:?}"),
    }
}

#[tokio::test]
async fn header_only_input_imports_zero_records() {
    let store = MemoryStore::default();
    let importer = CsvWorkoutImporter::new(&store);

    let records = importer
        .import(USER, "date,exercise,category\n")
        .await
        .unwrap();

    assert!(records.is_empty());
    assert!(store.committed().is_empty());
}

#[test]
fn parse_records_validates_without_a_store() {
    let csv = "date,exercise,category,weight\n\
               2024-03-14,Bench Press,Chest,82.5\n\
               14/03/2024,Squat,Legs,\n";

    let records = parse_records(csv).unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(
        records[0].date,
        NaiveDate::from_ymd_opt(2024, 3, 14).unwrap()
    );
    assert_eq!(records[0].weight, Some(82.5));
    assert_eq!(records[1].date, records[0].date);
    assert_eq!(records[1].weight, None);
}

#[test]
fn parse_records_reports_row_numbers_after_the_header() {
    let csv = "date,exercise,category\n\
               2024-03-14,Bench Press,Chest\n\
               2024-03-15,Squat,\n";

    let err = parse_records(csv).unwrap_err();

    assert!(matches!(err, ImportError::InvalidRow { row: 2, .. }));
    assert!(err.to_string().contains("category"));
}
