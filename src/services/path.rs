use log::{debug, info};
use std::collections::BTreeSet;

use crate::error::{MapError, Result};
use crate::models::{MetroLine, StationId, SubwayNetwork};
use crate::store::{graql, GraphStore};

/// A straight piece of a drawn path, in scaled canvas coordinates
pub type LineSegment = ((f64, f64), (f64, f64));

fn no_path(from: &StationId, to: &StationId) -> MapError {
    MapError::NoPathFound { from: from.to_string(), to: to.to_string() }
}

/// Shortest path between two stations as reported by the store.
///
/// The store's path runs through route relation nodes as well as stations;
/// only station nodes are kept, in path order.
///
/// # Errors
///
/// Returns `NoPathFound` if the store has no path and `Transport` if it fails.
pub async fn shortest_path<S: GraphStore>(store: &S, from: &StationId, to: &StationId) -> Result<Vec<StationId>> {
    let raw = store
        .shortest_path(from, to)
        .await?
        .ok_or_else(|| no_path(from, to))?;

    let mut stations = Vec::with_capacity(raw.len());
    for node in raw {
        let node_type = store.node_type(&node).await?;
        if node_type == graql::STATION_TYPE {
            stations.push(node);
        } else {
            debug!("skipping {node_type} node {node}");
        }
    }

    if stations.is_empty() {
        return Err(no_path(from, to));
    }

    info!("path {from} -> {to}: {} stations", stations.len());
    Ok(stations)
}

/// Line segments joining consecutive stations of `path`, scaled by `scale`
///
/// # Errors
///
/// Returns `StationNotOnMap` if the path names a station missing from the network.
pub fn path_segments(network: &SubwayNetwork, path: &[StationId], scale: f64) -> Result<Vec<LineSegment>> {
    let points = path
        .iter()
        .map(|id| {
            network
                .station(id)
                .map(|s| (s.canvas.0 * scale, s.canvas.1 * scale))
                .ok_or_else(|| MapError::StationNotOnMap { overlay: "shortest path", id: id.clone() })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(points.windows(2).map(|pair| (pair[0], pair[1])).collect())
}

fn station_name(network: &SubwayNetwork, id: &StationId) -> String {
    network.station(id).map_or_else(|| id.to_string(), |s| s.name.clone())
}

/// Human readable itinerary: the first station, then one line per leg with
/// the line(s) joining the two stations and the station reached
#[must_use]
pub fn describe_path(network: &SubwayNetwork, path: &[StationId]) -> String {
    let Some(first) = path.first() else {
        return String::new();
    };

    let mut lines = vec![station_name(network, first)];
    for leg in path.windows(2) {
        let serving: BTreeSet<MetroLine> = network
            .neighbours(&leg[0])
            .into_iter()
            .filter(|(station, _)| station.id == leg[1])
            .map(|(_, line)| line)
            .collect();
        let serving = if serving.is_empty() {
            "?".to_string()
        } else {
            serving.iter().map(|line| line.label()).collect::<Vec<_>>().join("/")
        };
        lines.push(format!("  {serving} to {}", station_name(network, &leg[1])));
    }
    lines.join("\n")
}
