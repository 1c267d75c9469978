use indexmap::IndexSet;
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::error::{MapError, Result};
use crate::models::{Extents, MetroLine, SegmentKey, Station, StationId, SubwayNetwork};
use crate::store::{Aggregate, GraphStore};

/// Where the map's geographic bounds come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ExtentSource {
    /// Min/max aggregates computed by the store over every station
    #[default]
    Store,
    /// Bounding box of the stations actually loaded
    Stations,
}

/// Build the in-memory network from the store's route relations.
///
/// Line labels are checked before any station is fetched, and every distinct
/// endpoint is fetched exactly once.
///
/// # Errors
///
/// Returns `Transport` if the store fails, and `LoadInconsistency` for an
/// unknown line label or an endpoint without attributes.
pub async fn load_network<S: GraphStore>(store: &S) -> Result<SubwayNetwork> {
    let rows = store.stations_and_routes().await?;
    info!("Loaded {} route relations", rows.len());

    let keys = rows
        .iter()
        .map(|row| {
            let line = MetroLine::from_label(&row.line_label).ok_or_else(|| {
                MapError::LoadInconsistency(format!(
                    "unknown line {:?} between {} and {}",
                    row.line_label, row.station_a, row.station_b
                ))
            })?;
            Ok(SegmentKey::new(row.station_a.clone(), row.station_b.clone(), line))
        })
        .collect::<Result<Vec<_>>>()?;

    let endpoints: IndexSet<&StationId> = keys.iter().flat_map(|key| [&key.a, &key.b]).collect();

    let mut network = SubwayNetwork::new();
    for id in endpoints {
        let attributes = store.station_attributes(id).await?.ok_or_else(|| {
            MapError::LoadInconsistency(format!("station {id} has no name, code or coordinates"))
        })?;
        network.add_or_get_station(Station::new(id.clone(), attributes));
    }

    let mut duplicates = 0;
    for key in keys {
        if !network.add_segment(key)? {
            duplicates += 1;
        }
    }
    if duplicates > 0 {
        warn!("Ignored {duplicates} duplicate route relations");
    }

    info!(
        "Network has {} stations and {} tunnel segments",
        network.station_count(),
        network.segment_count()
    );
    Ok(network)
}

/// Bounds from the store's min/max aggregates over all stations
///
/// # Errors
///
/// Returns `Transport` if any aggregate query fails.
pub async fn query_extents<S: GraphStore>(store: &S) -> Result<Extents> {
    Ok(Extents {
        min_lon: store.aggregate(Aggregate::MinLon).await?,
        max_lon: store.aggregate(Aggregate::MaxLon).await?,
        min_lat: store.aggregate(Aggregate::MinLat).await?,
        max_lat: store.aggregate(Aggregate::MaxLat).await?,
    })
}

/// # Errors
///
/// Returns `DegenerateGeometry` if the bounds are empty in either direction,
/// and `Transport` if the store fails.
pub async fn load_extents<S: GraphStore>(store: &S, network: &SubwayNetwork, source: ExtentSource) -> Result<Extents> {
    let extents = match source {
        ExtentSource::Store => query_extents(store).await?,
        ExtentSource::Stations => network
            .extents()
            .ok_or_else(|| MapError::DegenerateGeometry("the network has no stations".to_string()))?,
    };
    extents.validate()?;
    Ok(extents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::fake::FakeStore;
    use crate::store::RouteRow;
    use futures::executor::block_on;

    #[test]
    fn test_load_network() {
        let store = FakeStore::chatelet();
        let network = block_on(load_network(&store)).expect("loads");

        assert_eq!(network.station_count(), 5);
        // M1 V1-V3 appears twice in the routes
        assert_eq!(network.segment_count(), 5);

        let chatelet = network.station(&"V1".into()).expect("station");
        assert_eq!(chatelet.name, "Chatelet");
        assert_eq!(chatelet.line_labels(), "M1, M4, M11");
    }

    #[test]
    fn test_each_endpoint_fetched_once() {
        let store = FakeStore::chatelet();
        block_on(load_network(&store)).expect("loads");

        let mut fetched = store.attribute_calls();
        let total = fetched.len();
        fetched.sort();
        fetched.dedup();
        assert_eq!(total, fetched.len());
        assert_eq!(total, 5);
    }

    #[test]
    fn test_unknown_line_fails_before_fetching() {
        let mut store = FakeStore::chatelet();
        store.routes.push(RouteRow {
            line_label: "RER A".to_string(),
            station_a: "V1".into(),
            station_b: "V4".into(),
        });

        let result = block_on(load_network(&store));
        assert!(matches!(result, Err(MapError::LoadInconsistency(_))));
        assert!(store.attribute_calls().is_empty());
    }

    #[test]
    fn test_missing_attributes() {
        let mut store = FakeStore::chatelet();
        store.stations.remove(&StationId::new("V5"));
        let result = block_on(load_network(&store));
        assert!(matches!(result, Err(MapError::LoadInconsistency(_))));
    }

    #[test]
    fn test_extent_sources_agree() {
        let store = FakeStore::chatelet();
        let network = block_on(load_network(&store)).expect("loads");

        let from_store = block_on(load_extents(&store, &network, ExtentSource::Store)).expect("extents");
        let from_stations = block_on(load_extents(&store, &network, ExtentSource::Stations)).expect("extents");
        assert_eq!(from_store, from_stations);
        assert_eq!(from_store.min_lat, 48.8550);
        assert_eq!(from_store.max_lon, 2.3522);
    }

    #[test]
    fn test_empty_network_extents() {
        let store = FakeStore::default();
        let network = SubwayNetwork::new();
        let result = block_on(load_extents(&store, &network, ExtentSource::Stations));
        assert!(matches!(result, Err(MapError::DegenerateGeometry(_))));
    }
}
