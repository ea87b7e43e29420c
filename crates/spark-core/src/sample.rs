//! Time-series samples bound to a sparkline
//!
//! Rows arrive as loose JSON objects; the date and value fields are picked out
//! by label and everything else is carried along in `raw_fields` for tooltips.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

// ============================================================================
// ERRORS
// ============================================================================

/// Why a single row could not become a [`Sample`]
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RowError {
    #[error("row is not a JSON object")]
    NotAnObject,
    #[error("missing field `{0}`")]
    MissingField(String),
    #[error("field `{field}` is not a date: {raw}")]
    InvalidDate { field: String, raw: String },
    #[error("field `{field}` is not a number: {raw}")]
    InvalidValue { field: String, raw: String },
}

/// Dataset ingestion errors
#[derive(Debug, Error)]
pub enum DataError {
    #[error("invalid dataset JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("dataset must be a JSON array of rows")]
    NotAnArray,
    #[error("row {index}: {source}")]
    Row {
        index: usize,
        #[source]
        source: RowError,
    },
}

// ============================================================================
// FIELD LABELS
// ============================================================================

/// Names of the date and value fields inside caller-supplied rows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SampleLabels {
    pub date_label: String,
    pub value_label: String,
}

impl Default for SampleLabels {
    fn default() -> Self {
        Self {
            date_label: "date".to_string(),
            value_label: "value".to_string(),
        }
    }
}

impl SampleLabels {
    pub fn new(date_label: impl Into<String>, value_label: impl Into<String>) -> Self {
        Self {
            date_label: date_label.into(),
            value_label: value_label.into(),
        }
    }
}

// ============================================================================
// SAMPLE
// ============================================================================

/// One point of a sparkline series
///
/// Sequences of samples are expected in ascending `timestamp` order. Nothing
/// here checks that; the resolver relies on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Unix timestamp in milliseconds
    pub timestamp: i64,
    pub value: f64,
    /// Every other field of the source row
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub raw_fields: Map<String, Value>,
}

impl Sample {
    pub fn new(timestamp: i64, value: f64) -> Self {
        Self {
            timestamp,
            value,
            raw_fields: Map::new(),
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, value: Value) -> Self {
        self.raw_fields.insert(name.into(), value);
        self
    }

    /// Timestamp as a UTC date-time (None if out of chrono's range)
    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.timestamp).single()
    }

    /// Build a sample from a JSON row using the given field labels
    pub fn from_row(row: &Value, labels: &SampleLabels) -> Result<Self, RowError> {
        let object = row.as_object().ok_or(RowError::NotAnObject)?;

        let raw_date = object
            .get(&labels.date_label)
            .ok_or_else(|| RowError::MissingField(labels.date_label.clone()))?;
        let timestamp = parse_timestamp(raw_date).ok_or_else(|| RowError::InvalidDate {
            field: labels.date_label.clone(),
            raw: raw_date.to_string(),
        })?;

        let raw_value = object
            .get(&labels.value_label)
            .ok_or_else(|| RowError::MissingField(labels.value_label.clone()))?;
        let value = parse_number(raw_value).ok_or_else(|| RowError::InvalidValue {
            field: labels.value_label.clone(),
            raw: raw_value.to_string(),
        })?;

        let raw_fields = object
            .iter()
            .filter(|(k, _)| **k != labels.date_label && **k != labels.value_label)
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        Ok(Self {
            timestamp,
            value,
            raw_fields,
        })
    }
}

/// Parse a slice of JSON rows into samples, failing on the first bad row
pub fn samples_from_rows(rows: &[Value], labels: &SampleLabels) -> Result<Vec<Sample>, DataError> {
    rows.iter()
        .enumerate()
        .map(|(index, row)| {
            Sample::from_row(row, labels).map_err(|source| DataError::Row { index, source })
        })
        .collect()
}

/// Parse a JSON array document into samples
pub fn parse_rows(json: &str, labels: &SampleLabels) -> Result<Vec<Sample>, DataError> {
    let doc: Value = serde_json::from_str(json)?;
    let rows = doc.as_array().ok_or(DataError::NotAnArray)?;
    let samples = samples_from_rows(rows, labels)?;
    tracing::debug!(rows = samples.len(), "parsed sparkline dataset");
    Ok(samples)
}

/// Earliest and latest timestamp of a series (order independent)
pub fn time_extent(samples: &[Sample]) -> Option<(i64, i64)> {
    samples.iter().fold(None, |acc, s| match acc {
        None => Some((s.timestamp, s.timestamp)),
        Some((lo, hi)) => Some((lo.min(s.timestamp), hi.max(s.timestamp))),
    })
}

/// Smallest and largest value of a series
pub fn value_extent(samples: &[Sample]) -> Option<(f64, f64)> {
    samples.iter().fold(None, |acc, s| match acc {
        None => Some((s.value, s.value)),
        Some((lo, hi)) => Some((lo.min(s.value), hi.max(s.value))),
    })
}

/// Unix millis, limited to what chrono can represent as a UTC instant
fn parse_timestamp(raw: &Value) -> Option<i64> {
    let millis = match raw {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64)),
        Value::String(s) => parse_date_str(s.trim()),
        _ => None,
    }?;
    Utc.timestamp_millis_opt(millis).single().map(|_| millis)
}

fn parse_date_str(s: &str) -> Option<i64> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.timestamp_millis());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Some(naive.and_utc().timestamp_millis());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(naive.and_utc().timestamp_millis());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().timestamp_millis())
}

fn parse_number(raw: &Value) -> Option<f64> {
    match raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}
