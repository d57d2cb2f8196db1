mod basic;
mod client;

pub use basic::BasicClient;
pub use client::HttpClient;

use serde_json::Value;
use tracing::debug;

use crate::error::StationError;

/// Base URL for the station data endpoint; the station id is appended as
/// the final path segment. Overridable via `SURFBUOYS_BASE_URL`.
pub const DEFAULT_BASE_URL: &str = "https://api.surfbuoys.com/wavedata/stationId";

/// Fetches one station's raw JSON payload.
///
/// # Errors
///
/// Returns [`StationError::FetchStatus`] for a non-success HTTP status and
/// [`StationError::Fetch`] for transport or body-decode failures, both
/// carrying the source identifier.
pub async fn fetch_station_json<C: HttpClient + ?Sized>(
    client: &C,
    url: &str,
    source_id: &str,
) -> Result<Value, StationError> {
    debug!(url, source_id, "Fetching station payload");

    let resp = client.get(url).await.map_err(|cause| StationError::Fetch {
        source: source_id.to_string(),
        cause,
    })?;

    let status = resp.status();
    if !status.is_success() {
        return Err(StationError::FetchStatus {
            source_id: source_id.to_string(),
            status,
        });
    }

    resp.json::<Value>()
        .await
        .map_err(|cause| StationError::Fetch {
            source: source_id.to_string(),
            cause,
        })
}

/// Builds the endpoint URL for a station.
pub fn station_url(base_url: &str, station_id: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), station_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_station_url_joins_base_and_id() {
        assert_eq!(
            station_url(DEFAULT_BASE_URL, "51205"),
            "https://api.surfbuoys.com/wavedata/stationId/51205"
        );
    }

    #[test]
    fn test_station_url_tolerates_trailing_slash() {
        assert_eq!(
            station_url("http://stations.test/", "KLIH1"),
            "http://stations.test/KLIH1"
        );
    }
}
