use crate::models::StationId;
use crate::services::centrality::CentralityMetric;
use thiserror::Error;

/// Failures talking to the graph store gateway
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Gateway answered with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decode answer: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Unexpected answer to `{query}`: {detail}")]
    UnexpectedAnswer { query: String, detail: String },

    #[error("Refusing to query with malformed id {0:?}")]
    InvalidId(String),
}

/// Everything that can go wrong while loading, querying or drawing the map
#[derive(Debug, Error)]
pub enum MapError {
    /// The store could not be reached or answered at the protocol level
    #[error("Graph store unavailable: {0}")]
    Transport(#[from] StoreError),

    #[error("Degenerate geometry: {0}")]
    DegenerateGeometry(String),

    /// `from` and `to` hold station names once the controller has resolved them
    #[error("No route found between {from} and {to}")]
    NoPathFound { from: String, to: String },

    #[error("Inconsistent network data: {0}")]
    LoadInconsistency(String),

    #[error("The {0} query returned no results")]
    EmptyResult(CentralityMetric),

    #[error("No station named {0:?}")]
    UnknownStation(String),

    /// A query answer drawn over the loaded map names a station the map lacks
    #[error("The {overlay} names station {id}, which is not on the map")]
    StationNotOnMap { overlay: &'static str, id: StationId },
}

impl MapError {
    /// Recoverable errors abort only the requested overlay; the map stays interactive
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::DegenerateGeometry(_) | Self::LoadInconsistency(_))
    }
}

pub type Result<T> = std::result::Result<T, MapError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlay_errors_are_recoverable() {
        let dangling = MapError::StationNotOnMap { overlay: "shortest path", id: StationId::new("V99") };
        assert!(dangling.is_recoverable());
        assert!(MapError::EmptyResult(CentralityMetric::RouteKCore).is_recoverable());
        assert!(MapError::NoPathFound { from: "Cite".into(), to: "Louvre Rivoli".into() }.is_recoverable());
    }

    #[test]
    fn test_load_errors_are_fatal() {
        assert!(!MapError::LoadInconsistency("unknown line".into()).is_recoverable());
        assert!(!MapError::DegenerateGeometry("empty extents".into()).is_recoverable());
    }
}
