//! Concurrent fan-out over the station catalog.
//!
//! Each station runs its fetch → envelope → series pipeline on its own
//! tokio task; a failing station is logged and dropped from the result,
//! never aborting the others. The run returns only after every task has
//! settled.

use std::sync::Arc;

use anyhow::Result;
use serde_json::{Map, Value, json};
use tracing::{Instrument, error, info};

use crate::envelope::extract_records;
use crate::error::StationError;
use crate::fetch::{HttpClient, fetch_station_json, station_url};
use crate::render::render_readable;
use crate::series::{Reading, build_series};
use crate::stations::{STATION_CATALOG, Station};

/// One station's result for a single run.
///
/// Created empty, populated exactly once by a successful pipeline pass,
/// and frozen after publication. A failed station stays empty and marked
/// failed — it is never partially populated.
#[derive(Debug)]
pub struct BuoyRecord {
    pub station: &'static Station,
    pub series: Vec<Reading>,
    pub failed: bool,
}

impl BuoyRecord {
    fn new(station: &'static Station) -> Self {
        Self {
            station,
            series: Vec::new(),
            failed: true,
        }
    }

    fn publish(&mut self, series: Vec<Reading>) {
        self.series = series;
        self.failed = false;
    }
}

/// Cross-station result of one run: the structured map keyed by display
/// name plus the concatenated readable report, both covering only the
/// stations that fetched successfully. Built fresh every run.
#[derive(Debug)]
pub struct AggregatedResult {
    pub structured: Map<String, Value>,
    pub readable: String,
}

/// Runs the full report: every cataloged station concurrently, join-all.
pub async fn run_report<C>(
    client: Arc<C>,
    base_url: &str,
    reading_limit: usize,
) -> Result<AggregatedResult>
where
    C: HttpClient + 'static,
{
    let mut tasks = Vec::with_capacity(STATION_CATALOG.len());
    for station in STATION_CATALOG {
        let client = client.clone();
        let base_url = base_url.to_string();
        let span = tracing::info_span!(
            "process_station",
            station_id = station.id,
            station_name = station.name,
        );
        tasks.push(tokio::spawn(
            async move { process_station(client.as_ref(), &base_url, station, reading_limit).await }
                .instrument(span),
        ));
    }

    let mut records = Vec::with_capacity(tasks.len());
    for (station, task) in STATION_CATALOG.iter().zip(tasks) {
        match task.await {
            Ok(record) => records.push(record),
            Err(join_err) => {
                error!(station_id = station.id, error = %join_err, "Station task panicked");
                records.push(BuoyRecord::new(station));
            }
        }
    }

    assemble(&records)
}

/// One station's pipeline. Failures are caught here, logged with station
/// context, and converted into an empty failed record.
async fn process_station<C: HttpClient + ?Sized>(
    client: &C,
    base_url: &str,
    station: &'static Station,
    reading_limit: usize,
) -> BuoyRecord {
    let mut record = BuoyRecord::new(station);
    match station_series(client, base_url, station, reading_limit).await {
        Ok(series) => {
            info!(readings = series.len(), "Station processed");
            record.publish(series);
        }
        Err(e) => {
            error!(station_id = station.id, error = %e, "Station pipeline failed");
        }
    }
    record
}

async fn station_series<C: HttpClient + ?Sized>(
    client: &C,
    base_url: &str,
    station: &Station,
    reading_limit: usize,
) -> Result<Vec<Reading>, StationError> {
    let url = station_url(base_url, station.id);
    let raw = fetch_station_json(client, &url, station.id).await?;
    let records = extract_records(&raw, station.id)?;
    Ok(build_series(&records, reading_limit, station.class))
}

fn assemble(records: &[BuoyRecord]) -> Result<AggregatedResult> {
    let mut structured = Map::new();
    let mut blocks = Vec::new();

    for record in records {
        if record.failed {
            // Absent from the map, empty readable segment.
            continue;
        }
        structured.insert(record.station.name.to_string(), station_export(record)?);
        blocks.push(format!(
            "{} ({})\n{}",
            record.station.name,
            record.station.id,
            render_readable(&record.series, record.station),
        ));
    }

    Ok(AggregatedResult {
        structured,
        readable: blocks.join("\n\n"),
    })
}

/// The per-station structured form: station metadata plus the normalized
/// series, with `"NA"` standing in for inapplicable metadata.
fn station_export(record: &BuoyRecord) -> Result<Value> {
    Ok(json!({
        "arrivalOrder": not_applicable_or(record.station.arrival_order),
        "relativeOffsetHours": not_applicable_or(record.station.relative_hours),
        "series": serde_json::to_value(&record.series)?,
    }))
}

fn not_applicable_or<T: serde::Serialize>(value: Option<T>) -> Value {
    match value {
        Some(v) => json!(v),
        None => json!("NA"),
    }
}
