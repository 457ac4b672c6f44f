use std::collections::HashMap;

use csv::StringRecord;

use crate::error::{ImportError, Result};

/// Recognized columns of a workout CSV upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkoutColumn {
    Date,
    Exercise,
    Category,
    Weight,
    WeightUnit,
    Reps,
    Distance,
    DistanceUnit,
    Time,
    Comment,
}

impl WorkoutColumn {
    pub const REQUIRED: [WorkoutColumn; 3] = [Self::Date, Self::Exercise, Self::Category];

    pub fn canonical_name(&self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Exercise => "exercise",
            Self::Category => "category",
            Self::Weight => "weight",
            Self::WeightUnit => "weight_unit",
            Self::Reps => "reps",
            Self::Distance => "distance",
            Self::DistanceUnit => "distance_unit",
            Self::Time => "time",
            Self::Comment => "comment",
        }
    }

    fn from_normalized(name: &str) -> Option<Self> {
        match name {
            "date" => Some(Self::Date),
            "exercise" => Some(Self::Exercise),
            "category" => Some(Self::Category),
            "weight" => Some(Self::Weight),
            "weight_unit" => Some(Self::WeightUnit),
            "reps" => Some(Self::Reps),
            "distance" => Some(Self::Distance),
            "distance_unit" => Some(Self::DistanceUnit),
            "time" => Some(Self::Time),
            "comment" => Some(Self::Comment),
            _ => None,
        }
    }
}

/// Lowercase a header token and fold spaces into underscores, so
/// "Weight Unit", "weight_unit" and "WEIGHT_UNIT" all resolve to the
/// same logical column.
fn normalize(header: &str) -> String {
    header.trim().to_lowercase().replace(' ', "_")
}

/// Positions of the recognized columns within a CSV header row.
#[derive(Debug, Clone)]
pub struct ColumnMap {
    indices: HashMap<WorkoutColumn, usize>,
}

impl ColumnMap {
    /// Resolve a header row against the strict schema.
    ///
    /// Missing required columns are reported first; after that, any
    /// unrecognized column fails the import. Either way the error is
    /// raised before a single data row is read.
    pub fn resolve(header: &StringRecord) -> Result<Self> {
        let mut indices = HashMap::new();
        let mut unknown = Vec::new();

        for (idx, raw) in header.iter().enumerate() {
            let name = normalize(raw);
            match WorkoutColumn::from_normalized(&name) {
                Some(column) => {
                    indices.insert(column, idx);
                }
                None => unknown.push(name),
            }
        }

        let missing: Vec<String> = WorkoutColumn::REQUIRED
            .iter()
            .filter(|column| !indices.contains_key(column))
            .map(|column| column.canonical_name().to_string())
            .collect();

        if !missing.is_empty() {
            return Err(ImportError::MissingColumns { columns: missing });
        }
        if !unknown.is_empty() {
            return Err(ImportError::UnknownColumns { columns: unknown });
        }

        Ok(Self { indices })
    }

    pub fn contains(&self, column: WorkoutColumn) -> bool {
        self.indices.contains_key(&column)
    }

    /// Cell text for `column` in `row`, if the column exists and the row
    /// is long enough to reach it.
    pub fn cell<'r>(&self, row: &'r StringRecord, column: WorkoutColumn) -> Option<&'r str> {
        self.indices.get(&column).and_then(|&idx| row.get(idx))
    }
}
