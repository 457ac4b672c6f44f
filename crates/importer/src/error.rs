use storage::StorageError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ImportError>;

/// Failures raised by the CSV workout importer.
///
/// Schema problems are reported before any row is read; row-level
/// problems carry the 1-indexed data row they occurred on. Store and
/// commit failures are infrastructure errors, kept distinct from
/// data-quality errors so callers and logs can tell them apart.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("missing required columns: {}", .columns.join(", "))]
    MissingColumns { columns: Vec<String> },

    #[error("unknown columns: {}", .columns.join(", "))]
    UnknownColumns { columns: Vec<String> },

    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("row {row}: {reason}")]
    InvalidRow { row: usize, reason: String },

    #[error("row {row}: database error: {source}")]
    Store {
        row: usize,
        #[source]
        source: StorageError,
    },

    #[error("commit failed, no records were imported: {source}")]
    Commit {
        #[source]
        source: StorageError,
    },

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}
