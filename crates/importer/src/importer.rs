use csv::{ReaderBuilder, StringRecord};
use storage::dto::workout::{NewWorkoutRecord, WorkoutRecordResponse};
use tracing::{error, info};

use crate::error::{ImportError, Result};
use crate::fields;
use crate::schema::{ColumnMap, WorkoutColumn};
use crate::traits::{StoreSession, WorkoutStore};

/// Imports a user-supplied CSV of workout entries.
///
/// The whole upload runs inside one store session: rows are written
/// strictly in file order through the same transaction, and the
/// transaction is committed exactly once, after the last row. Any row
/// failure rolls everything back, so a partial upload never reaches the
/// store.
pub struct CsvWorkoutImporter<'a, S> {
    store: &'a S,
}

impl<'a, S: WorkoutStore> CsvWorkoutImporter<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Import every data row of `csv_text` for `user_id`.
    ///
    /// On success the persisted records come back in input order,
    /// serialized flat with their assigned ids and timestamps. On any
    /// failure no record list is returned and the store is left
    /// unchanged.
    pub async fn import(
        &self,
        user_id: &str,
        csv_text: &str,
    ) -> Result<Vec<WorkoutRecordResponse>> {
        let (columns, rows) = read_rows(csv_text)?;

        let mut session = self.store.begin().await?;
        let mut imported = Vec::with_capacity(rows.len());

        for (idx, row) in rows.iter().enumerate() {
            let row_number = idx + 1;

            let fields = match parse_row(&columns, row, row_number) {
                Ok(fields) => fields,
                Err(err) => {
                    abort(session).await;
                    return Err(err);
                }
            };

            match session.create(user_id, &fields).await {
                Ok(record) => imported.push(WorkoutRecordResponse::from(record)),
                Err(source) => {
                    error!(
                        row = row_number,
                        error = %source,
                        "workout record insert failed, rolling back import"
                    );
                    abort(session).await;
                    return Err(ImportError::Store {
                        row: row_number,
                        source,
                    });
                }
            }
        }

        session
            .commit()
            .await
            .map_err(|source| ImportError::Commit { source })?;

        info!(
            user_id,
            records = imported.len(),
            "workout csv import committed"
        );

        Ok(imported)
    }
}

/// Parse and validate `csv_text` without touching any store. Used for
/// dry runs; the importer itself interleaves parsing with writes so a
/// bad row still aborts the shared transaction.
pub fn parse_records(csv_text: &str) -> Result<Vec<NewWorkoutRecord>> {
    let (columns, rows) = read_rows(csv_text)?;

    rows.iter()
        .enumerate()
        .map(|(idx, row)| parse_row(&columns, row, idx + 1))
        .collect()
}

async fn abort<T: StoreSession>(session: T) {
    if let Err(err) = session.rollback().await {
        error!(error = %err, "rollback after failed import also failed");
    }
}

fn read_rows(csv_text: &str) -> Result<(ColumnMap, Vec<StringRecord>)> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .from_reader(csv_text.as_bytes());

    // An upload without a header line resolves to an empty header and
    // is reported as all required columns missing.
    let header = reader.headers()?.clone();
    let columns = ColumnMap::resolve(&header)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        rows.push(record?);
    }

    Ok((columns, rows))
}

fn parse_row(columns: &ColumnMap, row: &StringRecord, row_number: usize) -> Result<NewWorkoutRecord> {
    let date = fields::parse_date(columns.cell(row, WorkoutColumn::Date), row_number)?;
    let exercise = fields::required_text(
        columns.cell(row, WorkoutColumn::Exercise),
        row_number,
        "exercise",
    )?;
    let category = fields::required_text(
        columns.cell(row, WorkoutColumn::Category),
        row_number,
        "category",
    )?;

    let weight = fields::parse_optional_f64(
        columns.cell(row, WorkoutColumn::Weight),
        row_number,
        "weight",
    )?;
    let reps =
        fields::parse_optional_i32(columns.cell(row, WorkoutColumn::Reps), row_number, "reps")?;
    let distance = fields::parse_optional_f64(
        columns.cell(row, WorkoutColumn::Distance),
        row_number,
        "distance",
    )?;

    Ok(NewWorkoutRecord {
        date,
        exercise,
        category,
        weight,
        weight_unit: fields::passthrough(columns.cell(row, WorkoutColumn::WeightUnit)),
        reps,
        distance,
        distance_unit: fields::passthrough(columns.cell(row, WorkoutColumn::DistanceUnit)),
        time: fields::passthrough(columns.cell(row, WorkoutColumn::Time)),
        comment: fields::passthrough(columns.cell(row, WorkoutColumn::Comment)),
    })
}
