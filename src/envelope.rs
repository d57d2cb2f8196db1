//! Envelope normalization for station responses.
//!
//! The upstream API has historically wrapped station data inconsistently:
//! sometimes a bare array of measurements, sometimes `{"data": [...]}`,
//! sometimes keyed by the station id. Each known shape is a strategy that
//! either matches or passes; only when every strategy misses do we fail,
//! with a bounded preview of the payload.

use serde_json::Value;

use crate::error::StationError;

/// Maximum number of characters of payload included in an
/// `UnrecognizedEnvelope` error.
const PREVIEW_LIMIT: usize = 200;

/// Extracts the ordered list of raw measurement records from a station
/// response, regardless of which known envelope shape wrapped it.
///
/// Shapes are tried in precedence order: bare array, `data` field,
/// station-id field.
///
/// # Errors
///
/// Returns [`StationError::UnrecognizedEnvelope`] if the payload matches
/// none of the known shapes.
pub fn extract_records(raw: &Value, station_id: &str) -> Result<Vec<Value>, StationError> {
    let matched = bare_array(raw)
        .or_else(|| data_field(raw))
        .or_else(|| station_keyed(raw, station_id));

    match matched {
        Some(records) => Ok(records.clone()),
        None => Err(StationError::UnrecognizedEnvelope {
            station_id: station_id.to_string(),
            preview: payload_preview(raw),
        }),
    }
}

/// Shape (a): the payload is itself the measurement array.
fn bare_array(raw: &Value) -> Option<&Vec<Value>> {
    raw.as_array()
}

/// Shape (b): the payload is an object with a `data` array.
fn data_field(raw: &Value) -> Option<&Vec<Value>> {
    raw.get("data").and_then(Value::as_array)
}

/// Shape (c): the payload is an object keyed by the station id.
fn station_keyed<'a>(raw: &'a Value, station_id: &str) -> Option<&'a Vec<Value>> {
    raw.get(station_id).and_then(Value::as_array)
}

/// Serializes the payload and truncates it so error messages stay bounded.
fn payload_preview(raw: &Value) -> String {
    let rendered = raw.to_string();
    if rendered.chars().count() > PREVIEW_LIMIT {
        let truncated: String = rendered.chars().take(PREVIEW_LIMIT).collect();
        format!("{truncated}…")
    } else {
        rendered
    }
}
