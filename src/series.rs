//! Builds a normalized reading series from raw station measurements.
//!
//! Raw records are sorted by their `GMT` timestamp, trimmed to the most
//! recent N, and mapped into the wave or wind schema selected by the owning
//! station's class. Normalization is best-effort throughout: it never fails
//! a series for a malformed timestamp or numeric string.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::stations::StationClass;

/// One normalized wave-class reading.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WaveReading {
    #[serde(rename = "timestampUTC")]
    pub timestamp_utc: String,
    #[serde(rename = "waveHeight")]
    pub wave_height: Option<f64>,
    #[serde(rename = "wavePeriod")]
    pub wave_period: Option<f64>,
    #[serde(rename = "swellDirection")]
    pub swell_direction: Option<String>,
}

/// One normalized wind-class reading.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindReading {
    #[serde(rename = "timestampUTC")]
    pub timestamp_utc: String,
    #[serde(rename = "windSpeed")]
    pub wind_speed: Option<f64>,
    #[serde(rename = "windGust")]
    pub wind_gust: Option<f64>,
    #[serde(rename = "windDirection")]
    pub wind_direction: Option<String>,
    #[serde(rename = "airTemp")]
    pub air_temp: Option<f64>,
    #[serde(rename = "waterTemp")]
    pub water_temp: Option<f64>,
}

/// A normalized reading. Every reading belongs to exactly one variant,
/// determined by the owning station's class.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Reading {
    Wave(WaveReading),
    Wind(WindReading),
}

impl Reading {
    pub fn timestamp_utc(&self) -> &str {
        match self {
            Reading::Wave(r) => &r.timestamp_utc,
            Reading::Wind(r) => &r.timestamp_utc,
        }
    }

    pub fn as_wave(&self) -> Option<&WaveReading> {
        match self {
            Reading::Wave(r) => Some(r),
            Reading::Wind(_) => None,
        }
    }

    pub fn as_wind(&self) -> Option<&WindReading> {
        match self {
            Reading::Wind(r) => Some(r),
            Reading::Wave(_) => None,
        }
    }
}

/// Sorts raw records by timestamp, keeps the `limit` most recent, and maps
/// each into the schema for `class`. The result is ordered oldest→newest.
///
/// Records whose `GMT` field fails to parse sort after every parseable
/// record, keeping their original relative order.
pub fn build_series(records: &[Value], limit: usize, class: StationClass) -> Vec<Reading> {
    let mut indexed: Vec<(usize, &Value)> = records.iter().enumerate().collect();
    indexed.sort_by_cached_key(|(idx, record)| {
        let parsed = record
            .get("GMT")
            .and_then(Value::as_str)
            .and_then(parse_timestamp);
        (parsed.is_none(), parsed, *idx)
    });

    let start = indexed.len().saturating_sub(limit);
    indexed[start..]
        .iter()
        .map(|(_, record)| map_record(record, class))
        .collect()
}

/// Parses a source timestamp into an absolute instant. Accepts RFC 3339 as
/// well as zone-less ISO strings, which the source treats as UTC.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    raw.parse::<NaiveDateTime>().ok().map(|naive| naive.and_utc())
}

fn map_record(record: &Value, class: StationClass) -> Reading {
    let timestamp_utc = normalized_timestamp(record);
    match class {
        StationClass::Wave => Reading::Wave(WaveReading {
            timestamp_utc,
            wave_height: numeric_field(record, "height"),
            wave_period: numeric_field(record, "period"),
            swell_direction: direction_field(record, "swellDir"),
        }),
        StationClass::Wind => Reading::Wind(WindReading {
            timestamp_utc,
            wind_speed: numeric_field(record, "windSpeed"),
            wind_gust: numeric_field(record, "windGust"),
            wind_direction: direction_field(record, "windDir"),
            air_temp: numeric_field(record, "airTemp"),
            water_temp: numeric_field(record, "waterTemp"),
        }),
    }
}

/// Re-renders the `GMT` field as ISO-8601 UTC with millisecond precision.
/// An unparseable timestamp passes through unchanged: the reading is kept
/// in a degraded state rather than dropped.
fn normalized_timestamp(record: &Value) -> String {
    match record.get("GMT").and_then(Value::as_str) {
        Some(raw) => parse_timestamp(raw)
            .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
            .unwrap_or_else(|| raw.to_string()),
        None => String::new(),
    }
}

/// Total numeric conversion: absent or null stays `None`; everything else
/// parses as f64, with malformed values becoming `NaN` rather than an
/// error. Renderers treat `NaN` like a missing value.
fn numeric_field(record: &Value, key: &str) -> Option<f64> {
    match record.get(key) {
        None | Some(Value::Null) => None,
        Some(Value::Number(n)) => Some(n.as_f64().unwrap_or(f64::NAN)),
        Some(Value::String(s)) => Some(s.trim().parse::<f64>().unwrap_or(f64::NAN)),
        Some(_) => Some(f64::NAN),
    }
}

/// Direction strings pass through as-is; absent, null, or empty becomes
/// `None`.
fn direction_field(record: &Value, key: &str) -> Option<String> {
    record
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
