use chrono::NaiveDate;

use crate::error::{ImportError, Result};

/// Date formats accepted for the `date` cell, tried in this order. The
/// first format that parses wins, so ambiguous day/month values resolve
/// as MM/DD before DD/MM.
pub const DATE_FORMATS: [&str; 6] = [
    "%Y-%m-%d",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%Y/%m/%d",
    "%m-%d-%Y",
    "%d-%m-%Y",
];

pub(crate) fn parse_date(value: Option<&str>, row: usize) -> Result<NaiveDate> {
    let trimmed = value.unwrap_or_default().trim();
    if trimmed.is_empty() {
        return Err(ImportError::InvalidRow {
            row,
            reason: "missing required field 'date'".to_string(),
        });
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Ok(date);
        }
    }

    Err(ImportError::InvalidRow {
        row,
        reason: format!(
            "invalid date '{trimmed}'; supported formats are YYYY-MM-DD, MM/DD/YYYY, \
             DD/MM/YYYY, YYYY/MM/DD, MM-DD-YYYY, DD-MM-YYYY"
        ),
    })
}

pub(crate) fn required_text(value: Option<&str>, row: usize, column: &str) -> Result<String> {
    match value {
        Some(text) if !text.trim().is_empty() => Ok(text.to_string()),
        _ => Err(ImportError::InvalidRow {
            row,
            reason: format!("missing required field '{column}'"),
        }),
    }
}

/// A blank cell is an absent value, never zero; a present but
/// unparsable cell fails the row.
pub(crate) fn parse_optional_f64(
    value: Option<&str>,
    row: usize,
    column: &str,
) -> Result<Option<f64>> {
    let Some(raw) = value else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    trimmed
        .parse::<f64>()
        .map(Some)
        .map_err(|_| ImportError::InvalidRow {
            row,
            reason: format!("field '{column}' must be a number, got '{trimmed}'"),
        })
}

pub(crate) fn parse_optional_i32(
    value: Option<&str>,
    row: usize,
    column: &str,
) -> Result<Option<i32>> {
    let Some(raw) = value else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    trimmed
        .parse::<i32>()
        .map(Some)
        .map_err(|_| ImportError::InvalidRow {
            row,
            reason: format!("field '{column}' must be an integer, got '{trimmed}'"),
        })
}

/// Pass-through cells are copied verbatim; an absent column yields an
/// absent value.
pub(crate) fn passthrough(value: Option<&str>) -> Option<String> {
    value.map(str::to_string)
}
