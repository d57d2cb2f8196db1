//! Error taxonomy for the report pipeline.
//!
//! Station failures and forecast failures are deliberately separate types:
//! a station that fails is dropped from the aggregated result, while a
//! forecast failure is reported on its own and never hides station data.

use thiserror::Error;

/// A failure inside one station's fetch/normalize pipeline.
///
/// These are caught at the per-station task boundary; they never abort
/// the other stations or the run as a whole.
#[derive(Error, Debug)]
pub enum StationError {
    /// Transport-level failure (connection, TLS, body decode, bad URL).
    #[error("fetch for station {source} failed: {cause}")]
    Fetch {
        source: String,
        #[source]
        cause: reqwest::Error,
    },

    /// The endpoint answered with a non-success HTTP status.
    ///
    /// The station identifier is named `source_id` rather than `source`
    /// because thiserror reserves the `source` field name for error
    /// chaining, and a `String` cannot be an error source.
    #[error("fetch for station {source_id} returned HTTP {status}")]
    FetchStatus {
        source_id: String,
        status: reqwest::StatusCode,
    },

    /// The payload matched none of the known envelope shapes. Carries a
    /// bounded preview of the offending payload for diagnosis.
    #[error(
        "unrecognized envelope for station {station_id}: expected an array, \
         {{\"data\": [...]}}, or {{\"{station_id}\": [...]}}, got: {preview}"
    )]
    UnrecognizedEnvelope { station_id: String, preview: String },
}

/// A failure while retrieving or extracting the free-text surf forecast.
#[derive(Error, Debug)]
pub enum ForecastError {
    #[error("forecast page fetch failed: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("forecast page returned HTTP {0}")]
    Status(reqwest::StatusCode),

    #[error("no element containing the forecast markers was found")]
    ElementNotFound,

    #[error("could not extract forecast text between markers")]
    MarkersNotMatched,
}
