use importer::{CsvWorkoutImporter, PgWorkoutStore};
use storage::Database;
use storage::dto::workout::WorkoutRecordResponse;

use crate::error::WebResult;

/// Run the transactional CSV import for one user.
pub async fn import_csv(
    db: &Database,
    user_id: &str,
    csv_text: &str,
) -> WebResult<Vec<WorkoutRecordResponse>> {
    let store = PgWorkoutStore::new(db.pool().clone());
    let importer = CsvWorkoutImporter::new(&store);

    Ok(importer.import(user_id, csv_text).await?)
}
