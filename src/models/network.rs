use indexmap::IndexMap;
use petgraph::stable_graph::{NodeIndex, StableUnGraph};
use petgraph::visit::{EdgeRef, IntoEdgeReferences};
use std::collections::{HashMap, HashSet};

use crate::error::{MapError, Result};
use crate::geometry::Projection;
use super::{Extents, MetroLine, SegmentKey, Station, StationId, TunnelSegment};

/// In-memory copy of the subway network: stations as nodes, one edge per
/// (station pair, line).
#[derive(Debug, Clone, Default)]
pub struct SubwayNetwork {
    pub graph: StableUnGraph<Station, TunnelSegment>,
    pub station_id_to_index: HashMap<StationId, NodeIndex>,
    segment_keys: HashSet<SegmentKey>,
}

impl SubwayNetwork {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a station node if it doesn't exist, return its `NodeIndex`
    pub fn add_or_get_station(&mut self, station: Station) -> NodeIndex {
        if let Some(&index) = self.station_id_to_index.get(&station.id) {
            return index;
        }
        let id = station.id.clone();
        let index = self.graph.add_node(station);
        self.station_id_to_index.insert(id, index);
        index
    }

    /// Add a tunnel segment between two stations already in the network.
    ///
    /// Returns `false` if a segment with the same key already exists.
    ///
    /// # Errors
    ///
    /// Returns `LoadInconsistency` if either endpoint is not a known station.
    pub fn add_segment(&mut self, key: SegmentKey) -> Result<bool> {
        if self.segment_keys.contains(&key) {
            return Ok(false);
        }

        let a = self.require_index(&key.a)?;
        let b = self.require_index(&key.b)?;

        for index in [a, b] {
            if let Some(station) = self.graph.node_weight_mut(index) {
                station.lines.insert(key.line);
            }
        }

        self.graph.add_edge(a, b, TunnelSegment { key: key.clone() });
        self.segment_keys.insert(key);
        Ok(true)
    }

    fn require_index(&self, id: &StationId) -> Result<NodeIndex> {
        self.station_id_to_index
            .get(id)
            .copied()
            .ok_or_else(|| MapError::LoadInconsistency(format!("tunnel segment references unknown station {id}")))
    }

    #[must_use]
    pub fn station(&self, id: &StationId) -> Option<&Station> {
        self.station_id_to_index
            .get(id)
            .and_then(|&index| self.graph.node_weight(index))
    }

    #[must_use]
    pub fn contains_station(&self, id: &StationId) -> bool {
        self.station_id_to_index.contains_key(id)
    }

    pub fn stations(&self) -> impl Iterator<Item = &Station> {
        self.graph.node_weights()
    }

    #[must_use]
    pub fn station_count(&self) -> usize {
        self.graph.node_count()
    }

    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Lines serving each station pair, in insertion order of the pairs.
    ///
    /// The lines of a pair are sorted so parallel lines are always drawn in the
    /// same order.
    #[must_use]
    pub fn tunnels_by_pair(&self) -> IndexMap<(StationId, StationId), Vec<MetroLine>> {
        let mut pairs: IndexMap<(StationId, StationId), Vec<MetroLine>> = IndexMap::new();
        for edge in self.graph.edge_references() {
            let key = &edge.weight().key;
            pairs.entry((key.a.clone(), key.b.clone())).or_default().push(key.line);
        }
        for lines in pairs.values_mut() {
            lines.sort_unstable();
        }
        pairs
    }

    /// Stations adjacent to `id`, one entry per connecting line
    #[must_use]
    pub fn neighbours(&self, id: &StationId) -> Vec<(&Station, MetroLine)> {
        let Some(&index) = self.station_id_to_index.get(id) else {
            return Vec::new();
        };
        self.graph
            .edges(index)
            .filter_map(|edge| {
                let other = if edge.source() == index { edge.target() } else { edge.source() };
                self.graph.node_weight(other).map(|station| (station, edge.weight().line()))
            })
            .collect()
    }

    #[must_use]
    pub fn extents(&self) -> Option<Extents> {
        Extents::enclosing(self.stations())
    }

    /// Recompute every station's canvas position with one projection.
    ///
    /// Positions are computed for all stations before any is written, so a
    /// failure leaves the previous positions untouched.
    ///
    /// # Errors
    ///
    /// Returns `DegenerateGeometry` if the projection's extents are empty.
    pub fn project(&mut self, projection: &Projection) -> Result<()> {
        let positions = self
            .graph
            .node_indices()
            .map(|index| {
                let station = &self.graph[index];
                projection.project(station.lon, station.lat).map(|pos| (index, pos))
            })
            .collect::<Result<Vec<_>>>()?;

        for (index, pos) in positions {
            self.graph[index].canvas = pos;
        }
        Ok(())
    }
}
