//! Rendering of a normalized reading series.
//!
//! Two formats: `structured` serializes the series as pretty-printed JSON
//! with no extra metadata; `readable` produces a compact fixed-order text
//! block whose lines are index-aligned across the series. Readable
//! timestamps are converted to Hawaiʻi time resolved from the named zone —
//! the zone happens to observe no daylight saving, but the offset is never
//! hard-coded.

use std::fmt::Display;

use anyhow::Result;
use chrono::DateTime;
use chrono_tz::Tz;
use clap::ValueEnum;

use crate::series::Reading;
use crate::stations::{Station, StationClass};

/// Display timezone for readable output, independent of the machine's own
/// timezone setting.
const DISPLAY_ZONE: Tz = chrono_tz::Pacific::Honolulu;

/// Output format for a rendered series.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Pretty-printed JSON of the normalized series.
    Structured,
    /// Compact multi-line text block with local-time timestamps.
    Readable,
}

/// Renders a series for one station in the requested format.
pub fn render(series: &[Reading], station: &Station, format: Format) -> Result<String> {
    match format {
        Format::Structured => Ok(serde_json::to_string_pretty(series)?),
        Format::Readable => Ok(render_readable(series, station)),
    }
}

/// Readable block for one station. Wave-class stations get six lines
/// (arrival order, offset hours, heights, periods, directions, times);
/// the wind station gets four (times, speeds, gusts, directions). Reading
/// *i* occupies position *i* on every line, so missing values render as
/// the literal token `null` instead of being omitted.
pub fn render_readable(series: &[Reading], station: &Station) -> String {
    match station.class {
        StationClass::Wave => {
            let waves: Vec<_> = series.iter().filter_map(Reading::as_wave).collect();
            [
                format!("arrival order: {}", meta(station.arrival_order)),
                format!("offset hours from Pauwela: {}", meta(station.relative_hours)),
                format!("heights: {}", joined(waves.iter().map(|w| number(w.wave_height)))),
                format!("periods: {}", joined(waves.iter().map(|w| number(w.wave_period)))),
                format!(
                    "directions: {}",
                    joined(waves.iter().map(|w| direction(&w.swell_direction)))
                ),
                format!(
                    "times: {}",
                    joined(waves.iter().map(|w| local_time(&w.timestamp_utc)))
                ),
            ]
            .join("\n")
        }
        StationClass::Wind => {
            let winds: Vec<_> = series.iter().filter_map(Reading::as_wind).collect();
            [
                format!(
                    "times: {}",
                    joined(winds.iter().map(|w| local_time(&w.timestamp_utc)))
                ),
                format!("wind speeds: {}", joined(winds.iter().map(|w| number(w.wind_speed)))),
                format!("wind gusts: {}", joined(winds.iter().map(|w| number(w.wind_gust)))),
                format!(
                    "wind directions: {}",
                    joined(winds.iter().map(|w| direction(&w.wind_direction)))
                ),
            ]
            .join("\n")
        }
    }
}

/// Converts a stored UTC instant to the display zone, `MM/DD HH:MM`.
/// A timestamp kept in its degraded unparsed form passes through as-is.
fn local_time(timestamp_utc: &str) -> String {
    match DateTime::parse_from_rfc3339(timestamp_utc) {
        Ok(dt) => dt
            .with_timezone(&DISPLAY_ZONE)
            .format("%m/%d %H:%M")
            .to_string(),
        Err(_) => timestamp_utc.to_string(),
    }
}

fn number(value: Option<f64>) -> String {
    match value {
        Some(v) if !v.is_nan() => format!("{v}"),
        _ => "null".to_string(),
    }
}

fn direction(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| "null".to_string())
}

fn meta<T: Display>(value: Option<T>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "NA".to_string(),
    }
}

fn joined(items: impl Iterator<Item = String>) -> String {
    items.collect::<Vec<_>>().join(" | ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::{WaveReading, WindReading};
    use crate::stations::find_station;

    fn wave(ts: &str, height: Option<f64>, period: Option<f64>, dir: Option<&str>) -> Reading {
        Reading::Wave(WaveReading {
            timestamp_utc: ts.to_string(),
            wave_height: height,
            wave_period: period,
            swell_direction: dir.map(str::to_string),
        })
    }

    #[test]
    fn test_structured_render_is_series_only() {
        let station = find_station("51205").unwrap();
        let series = vec![wave("2024-01-01T21:26:00.000Z", Some(1.6), Some(16.7), Some("NW"))];
        let out = render(&series, station, Format::Structured).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        // No station metadata is merged into the structured series.
        assert!(value.is_array());
        assert_eq!(value[0]["waveHeight"], 1.6);
        assert!(value[0].get("arrivalOrder").is_none());
    }

    #[test]
    fn test_readable_wave_block_has_six_aligned_lines() {
        let station = find_station("51205").unwrap();
        let series = vec![
            wave("2024-01-01T21:26:00.000Z", Some(1.6), Some(16.7), Some("NW")),
            wave("2024-01-02T03:26:00.000Z", None, Some(15.0), Some("NNW")),
        ];
        let out = render_readable(&series, station);
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], "arrival order: 5");
        assert_eq!(lines[1], "offset hours from Pauwela: 0");
        assert_eq!(lines[2], "heights: 1.6 | null");
        assert_eq!(lines[3], "periods: 16.7 | 15");
        assert_eq!(lines[4], "directions: NW | NNW");
        // Each line carries one entry per reading, so positions align.
        assert_eq!(lines[5].matches(" | ").count(), 1);
    }

    #[test]
    fn test_readable_wind_block_has_four_lines() {
        let station = find_station("KLIH1").unwrap();
        let series = vec![Reading::Wind(WindReading {
            timestamp_utc: "2024-01-01T21:26:00.000Z".to_string(),
            wind_speed: Some(12.5),
            wind_gust: None,
            wind_direction: Some("ENE".to_string()),
            air_temp: Some(25.0),
            water_temp: None,
        })];
        let out = render_readable(&series, station);
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1], "wind speeds: 12.5");
        assert_eq!(lines[2], "wind gusts: null");
        assert_eq!(lines[3], "wind directions: ENE");
    }

    #[test]
    fn test_timestamps_render_in_hawaii_time() {
        // 21:26 UTC is 11:26 in Pacific/Honolulu (UTC-10, no DST),
        // regardless of the executing process's own timezone.
        let station = find_station("51205").unwrap();
        let series = vec![wave("2024-01-01T21:26:00.000Z", Some(1.6), Some(16.7), Some("NW"))];
        let out = render_readable(&series, station);
        let times_line = out.lines().last().unwrap();
        assert!(times_line.ends_with("11:26"), "got: {times_line}");
        assert_eq!(times_line, "times: 01/01 11:26");
    }

    #[test]
    fn test_degraded_timestamp_passes_through_readable() {
        let station = find_station("51205").unwrap();
        let series = vec![wave("garbage-time", Some(1.0), Some(10.0), Some("N"))];
        let out = render_readable(&series, station);
        assert!(out.lines().last().unwrap().ends_with("garbage-time"));
    }

    #[test]
    fn test_nan_renders_as_null_token() {
        let station = find_station("51205").unwrap();
        let series = vec![wave("2024-01-01T21:26:00.000Z", Some(f64::NAN), Some(14.0), None)];
        let out = render_readable(&series, station);
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines[2], "heights: null");
        assert_eq!(lines[4], "directions: null");
    }

    #[test]
    fn test_not_applicable_metadata_renders_as_na() {
        let station = find_station("51002").unwrap();
        let out = render_readable(&[], station);
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines[0], "arrival order: NA");
        assert_eq!(lines[1], "offset hours from Pauwela: NA");
    }

    #[test]
    fn test_rendering_is_idempotent() {
        let station = find_station("51205").unwrap();
        let series = vec![
            wave("2024-01-01T21:26:00.000Z", Some(1.6), Some(16.7), Some("NW")),
            wave("2024-01-02T03:26:00.000Z", None, Some(15.0), None),
        ];
        for format in [Format::Structured, Format::Readable] {
            let first = render(&series, station, format).unwrap();
            let second = render(&series, station, format).unwrap();
            assert_eq!(first, second);
        }
    }
}
