//! In-memory `GraphStore` used by the unit tests.

use indexmap::IndexSet;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use crate::error::StoreError;
use crate::models::{StationAttributes, StationId};
use crate::services::centrality::CentralityMetric;
use super::{graql, Aggregate, CentralityRow, GraphStore, RouteRow};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Aggregate(Aggregate),
    Routes,
    Attributes(StationId),
    Path(StationId, StationId),
    NodeType(StationId),
    Centrality(CentralityMetric),
    ByName(String),
}

#[derive(Debug, Default)]
pub struct FakeStore {
    pub routes: Vec<RouteRow>,
    pub stations: HashMap<StationId, StationAttributes>,
    /// Non-station concepts that may appear inside paths
    pub node_types: HashMap<StationId, String>,
    pub paths: HashMap<(StationId, StationId), Vec<StationId>>,
    pub centrality: HashMap<CentralityMetric, Vec<CentralityRow>>,
    pub offline: Cell<bool>,
    pub calls: RefCell<Vec<Call>>,
}

fn id(raw: &str) -> StationId {
    StationId::new(raw)
}

fn route(line: &str, a: &str, b: &str) -> RouteRow {
    RouteRow {
        line_label: line.to_string(),
        station_a: id(a),
        station_b: id(b),
    }
}

impl FakeStore {
    /// Five stations around Châtelet.
    ///
    /// V1-V3 is served by both M1 and M11; the M1 relation is listed twice,
    /// once in each direction. R1-R4 are route relation nodes.
    pub fn chatelet() -> Self {
        let mut store = Self::default();

        for (raw, name, code, lon, lat) in [
            ("V1", "Chatelet", 1, 2.3470, 48.8583),
            ("V2", "Louvre Rivoli", 2, 2.3409, 48.8609),
            ("V3", "Hotel de Ville", 3, 2.3522, 48.8573),
            ("V4", "Les Halles", 4, 2.3461, 48.8625),
            ("V5", "Cite", 5, 2.3470, 48.8550),
        ] {
            store.stations.insert(
                id(raw),
                StationAttributes { name: name.to_string(), code, lat, lon },
            );
        }

        store.routes = vec![
            route("M1", "V2", "V1"),
            route("M1", "V1", "V3"),
            route("M11", "V1", "V3"),
            route("M4", "V1", "V4"),
            route("M4", "V5", "V1"),
            route("M1", "V3", "V1"),
        ];

        for relation in ["R1", "R2", "R3", "R4"] {
            store.node_types.insert(id(relation), "route".to_string());
        }

        store.add_path("V2", "V3", &["V2", "R1", "V1", "R2", "V3"]);
        store.add_path("V3", "V4", &["V3", "R2", "V1", "R3", "V4"]);
        store.add_path("V4", "V5", &["V4", "R3", "V1", "R4", "V5"]);

        store.centrality.insert(
            CentralityMetric::TunnelKCore,
            vec![
                CentralityRow { score: 2.0, members: [id("V1"), id("V3")].into_iter().collect() },
                CentralityRow { score: 1.0, members: [id("V2"), id("V4"), id("V5")].into_iter().collect() },
            ],
        );
        store.centrality.insert(
            CentralityMetric::RouteKCore,
            vec![CentralityRow { score: 4.0, members: [id("V1")].into_iter().collect() }],
        );

        store
    }

    pub fn add_path(&mut self, from: &str, to: &str, raw: &[&str]) {
        self.paths.insert((id(from), id(to)), raw.iter().map(|r| id(r)).collect());
    }

    pub fn path_calls(&self) -> Vec<(StationId, StationId)> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                Call::Path(from, to) => Some((from.clone(), to.clone())),
                _ => None,
            })
            .collect()
    }

    pub fn attribute_calls(&self) -> Vec<StationId> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                Call::Attributes(station) => Some(station.clone()),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) -> Result<(), StoreError> {
        self.calls.borrow_mut().push(call);
        if self.offline.get() {
            return Err(StoreError::Status {
                status: 503,
                body: "gateway offline".to_string(),
            });
        }
        Ok(())
    }
}

impl GraphStore for FakeStore {
    async fn aggregate(&self, kind: Aggregate) -> Result<f64, StoreError> {
        self.record(Call::Aggregate(kind))?;
        let values = self.stations.values().map(|s| match kind {
            Aggregate::MinLat | Aggregate::MaxLat => s.lat,
            Aggregate::MinLon | Aggregate::MaxLon => s.lon,
        });
        let value = match kind {
            Aggregate::MinLat | Aggregate::MinLon => values.fold(f64::INFINITY, f64::min),
            Aggregate::MaxLat | Aggregate::MaxLon => values.fold(f64::NEG_INFINITY, f64::max),
        };
        Ok(value)
    }

    async fn stations_and_routes(&self) -> Result<Vec<RouteRow>, StoreError> {
        self.record(Call::Routes)?;
        Ok(self.routes.clone())
    }

    async fn station_attributes(&self, station: &StationId) -> Result<Option<StationAttributes>, StoreError> {
        self.record(Call::Attributes(station.clone()))?;
        Ok(self.stations.get(station).cloned())
    }

    async fn shortest_path(&self, from: &StationId, to: &StationId) -> Result<Option<Vec<StationId>>, StoreError> {
        self.record(Call::Path(from.clone(), to.clone()))?;
        if let Some(path) = self.paths.get(&(from.clone(), to.clone())) {
            return Ok(Some(path.clone()));
        }
        // Paths are symmetric
        Ok(self
            .paths
            .get(&(to.clone(), from.clone()))
            .map(|path| path.iter().rev().cloned().collect()))
    }

    async fn node_type(&self, node: &StationId) -> Result<String, StoreError> {
        self.record(Call::NodeType(node.clone()))?;
        if self.stations.contains_key(node) {
            return Ok(graql::STATION_TYPE.to_string());
        }
        self.node_types.get(node).cloned().ok_or_else(|| StoreError::UnexpectedAnswer {
            query: format!("match $x id {node}; get $x;"),
            detail: "no such concept".to_string(),
        })
    }

    async fn centrality(&self, metric: CentralityMetric) -> Result<Vec<CentralityRow>, StoreError> {
        self.record(Call::Centrality(metric))?;
        Ok(self.centrality.get(&metric).cloned().unwrap_or_default())
    }

    async fn station_by_name(&self, name: &str) -> Result<Option<StationId>, StoreError> {
        self.record(Call::ByName(name.to_string()))?;
        Ok(self
            .stations
            .iter()
            .find(|(_, attributes)| attributes.name == name)
            .map(|(station, _)| station.clone()))
    }
}

/// Members helper for tests building rows by hand
pub fn members(ids: &[&str]) -> IndexSet<StationId> {
    ids.iter().map(|raw| id(raw)).collect()
}
