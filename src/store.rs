mod answer;
#[cfg(test)]
pub mod fake;
pub mod graql;
mod http;

pub use answer::{Answer, Concept};
pub use http::HttpGraphStore;

use indexmap::IndexSet;

use crate::error::StoreError;
use crate::models::{StationAttributes, StationId};
use crate::services::centrality::CentralityMetric;

/// Aggregates over station attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Aggregate {
    MinLat,
    MaxLat,
    MinLon,
    MaxLon,
}

impl Aggregate {
    fn function(self) -> &'static str {
        match self {
            Self::MinLat | Self::MinLon => "min",
            Self::MaxLat | Self::MaxLon => "max",
        }
    }

    fn attribute(self) -> &'static str {
        match self {
            Self::MinLat | Self::MaxLat => "lat",
            Self::MinLon | Self::MaxLon => "lon",
        }
    }
}

/// A route relation: two stations joined by a line
#[derive(Debug, Clone, PartialEq)]
pub struct RouteRow {
    pub line_label: String,
    pub station_a: StationId,
    pub station_b: StationId,
}

/// Stations sharing one centrality score
#[derive(Debug, Clone, PartialEq)]
pub struct CentralityRow {
    pub score: f64,
    pub members: IndexSet<StationId>,
}

/// The narrow set of queries the map needs from the graph database.
///
/// Implementations own their connection; one long-lived handle is created at
/// start-up and shared by the loader and the services.
#[allow(async_fn_in_trait)]
pub trait GraphStore {
    /// Min or max of a numeric attribute across all stations
    async fn aggregate(&self, kind: Aggregate) -> Result<f64, StoreError>;

    /// Every route relation with its line label and both endpoints
    async fn stations_and_routes(&self) -> Result<Vec<RouteRow>, StoreError>;

    /// Attributes of one station, `None` if the store has no complete record
    async fn station_attributes(&self, id: &StationId) -> Result<Option<StationAttributes>, StoreError>;

    /// Raw concept ids along the shortest path, which may include relation
    /// nodes. `None` means the store found no path.
    async fn shortest_path(&self, from: &StationId, to: &StationId) -> Result<Option<Vec<StationId>>, StoreError>;

    /// Type label of a concept, e.g. `"station"` or `"route"`
    async fn node_type(&self, id: &StationId) -> Result<String, StoreError>;

    async fn centrality(&self, metric: CentralityMetric) -> Result<Vec<CentralityRow>, StoreError>;

    /// Station with exactly this name
    async fn station_by_name(&self, name: &str) -> Result<Option<StationId>, StoreError>;
}
