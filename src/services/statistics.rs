use log::info;
use std::collections::BTreeSet;
use std::fmt;

use crate::error::Result;
use crate::models::{Station, SubwayNetwork};
use crate::store::{Aggregate, GraphStore};

/// Coordinates coming back from an aggregate are compared with this slack
const COORDINATE_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compass {
    North,
    South,
    East,
    West,
}

impl Compass {
    fn aggregate(self) -> Aggregate {
        match self {
            Self::North => Aggregate::MaxLat,
            Self::South => Aggregate::MinLat,
            Self::East => Aggregate::MaxLon,
            Self::West => Aggregate::MinLon,
        }
    }

    fn coordinate(self, station: &Station) -> f64 {
        match self {
            Self::North | Self::South => station.lat,
            Self::East | Self::West => station.lon,
        }
    }
}

impl fmt::Display for Compass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::North => "northernmost",
            Self::South => "southernmost",
            Self::East => "easternmost",
            Self::West => "westernmost",
        })
    }
}

/// Size of the loaded network
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkSummary {
    pub stations: usize,
    pub segments: usize,
    pub lines: usize,
}

impl NetworkSummary {
    #[must_use]
    pub fn of(network: &SubwayNetwork) -> Self {
        let lines: BTreeSet<_> = network.stations().flat_map(|s| s.lines.iter().copied()).collect();
        Self {
            stations: network.station_count(),
            segments: network.segment_count(),
            lines: lines.len(),
        }
    }
}

impl fmt::Display for NetworkSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} stations, {} tunnel segments on {} lines", self.stations, self.segments, self.lines)
    }
}

/// The station furthest towards `compass`, found by asking the store for the
/// extreme coordinate and looking it up among the loaded stations.
///
/// Returns `Ok(None)` if no loaded station sits at that coordinate.
///
/// # Errors
///
/// Returns `Transport` if the aggregate query fails.
pub async fn extremal_station<'a, S: GraphStore>(
    store: &S,
    network: &'a SubwayNetwork,
    compass: Compass,
) -> Result<Option<&'a Station>> {
    let value = store.aggregate(compass.aggregate()).await?;
    let station = network
        .stations()
        .find(|station| (compass.coordinate(station) - value).abs() < COORDINATE_EPSILON);

    match station {
        Some(station) => info!("{compass} station: {} ({value})", station.name),
        None => info!("no loaded station at the {compass} coordinate {value}"),
    }
    Ok(station)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MapError;
    use crate::models::StationId;
    use crate::services::load_network;
    use crate::store::fake::FakeStore;
    use futures::executor::block_on;

    #[test]
    fn test_summary_counts_lines_once() {
        let network = block_on(load_network(&FakeStore::chatelet())).expect("loads");
        let summary = NetworkSummary::of(&network);
        assert_eq!(summary, NetworkSummary { stations: 5, segments: 5, lines: 3 });
        assert_eq!(summary.to_string(), "5 stations, 5 tunnel segments on 3 lines");
    }

    #[test]
    fn test_extremal_stations() {
        let store = FakeStore::chatelet();
        let network = block_on(load_network(&store)).expect("loads");

        let name = |compass| {
            block_on(extremal_station(&store, &network, compass))
                .expect("query succeeds")
                .map(|station| station.name.clone())
        };
        assert_eq!(name(Compass::North).as_deref(), Some("Les Halles"));
        assert_eq!(name(Compass::South).as_deref(), Some("Cite"));
        assert_eq!(name(Compass::East).as_deref(), Some("Hotel de Ville"));
        assert_eq!(name(Compass::West).as_deref(), Some("Louvre Rivoli"));
    }

    #[test]
    fn test_extremal_station_outside_loaded_network() {
        let mut store = FakeStore::chatelet();
        let network = block_on(load_network(&store)).expect("loads");
        store.stations.get_mut(&StationId::new("V4")).expect("V4 exists").lat = 49.0;

        let result = block_on(extremal_station(&store, &network, Compass::North)).expect("query succeeds");
        assert!(result.is_none());
    }

    #[test]
    fn test_extremal_station_transport_error() {
        let store = FakeStore::chatelet();
        let network = block_on(load_network(&store)).expect("loads");
        store.offline.set(true);
        let result = block_on(extremal_station(&store, &network, Compass::North));
        assert!(matches!(result, Err(MapError::Transport(_))));
    }
}
