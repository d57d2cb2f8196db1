//! Station catalog for the Hawaiian buoy network.
//!
//! The canonical list of stations polled by this tool, with their display
//! names, swell-arrival ordering, and time offsets relative to the Pauwela
//! reference buoy. This is the single source of truth for station metadata —
//! other modules look stations up here rather than hardcoding ids.

/// Which field schema a station's readings follow. Selected purely by
/// station identity, never inferred from which fields a raw record carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StationClass {
    /// Ocean buoy: wave height, wave period, swell direction.
    Wave,
    /// Weather station: wind speed/gust/direction, air and water temperature.
    Wind,
}

/// Metadata for a single station. Immutable after load.
#[derive(Debug)]
pub struct Station {
    /// NDBC-style station id (e.g. "51205", "KLIH1").
    pub id: &'static str,
    /// Human-readable display name, used as the key in structured output.
    pub name: &'static str,
    /// Rank in the expected NW swell arrival timeline, if applicable.
    pub arrival_order: Option<u32>,
    /// Hours this station's readings lag behind Pauwela, if applicable.
    pub relative_hours: Option<f64>,
    /// Field schema for this station's readings.
    pub class: StationClass,
}

/// All stations polled each run, in report order: the NW swell chain from
/// furthest out to Maui, then the south-swell and outlier buoys, then wind.
pub static STATION_CATALOG: &[Station] = &[
    Station {
        id: "51101",
        name: "H2NorthWest",
        arrival_order: Some(1),
        relative_hours: Some(24.0),
        class: StationClass::Wave,
    },
    Station {
        id: "51208",
        name: "Hanalei",
        arrival_order: Some(2),
        relative_hours: Some(12.0),
        class: StationClass::Wave,
    },
    Station {
        id: "51201",
        name: "Waimea",
        arrival_order: Some(3),
        relative_hours: Some(6.0),
        class: StationClass::Wave,
    },
    Station {
        id: "51210",
        name: "Kaneohe",
        arrival_order: Some(4),
        relative_hours: None,
        class: StationClass::Wave,
    },
    Station {
        // Shares arrival order with Kaneohe: both sit off windward Oahu.
        id: "51202",
        name: "Mokapu",
        arrival_order: Some(4),
        relative_hours: None,
        class: StationClass::Wave,
    },
    Station {
        // Reference station for relative timing.
        id: "51205",
        name: "Pauwela",
        arrival_order: Some(5),
        relative_hours: Some(0.0),
        class: StationClass::Wave,
    },
    Station {
        id: "51213",
        name: "Kaumalapau, (Buoy for SouthSwells!)",
        arrival_order: None,
        relative_hours: None,
        class: StationClass::Wave,
    },
    Station {
        id: "51002",
        name: "215NM SSW of Hilo, HI",
        arrival_order: None,
        relative_hours: None,
        class: StationClass::Wave,
    },
    Station {
        // The only wind-class station in the catalog.
        id: "KLIH1",
        name: "Kahului Airport",
        arrival_order: None,
        relative_hours: None,
        class: StationClass::Wind,
    },
];

/// Looks up a station by id. Returns `None` if not in the catalog.
pub fn find_station(id: &str) -> Option<&'static Station> {
    STATION_CATALOG.iter().find(|s| s.id == id)
}

/// Returns the ids of all cataloged stations, in report order.
pub fn all_station_ids() -> Vec<&'static str> {
    STATION_CATALOG.iter().map(|s| s.id).collect()
}
