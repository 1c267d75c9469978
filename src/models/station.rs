use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use super::MetroLine;

/// Opaque concept id the graph store assigns to a node
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StationId(String);

impl StationId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StationId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Attributes stored on a station entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationAttributes {
    pub name: String,
    /// The network operator's short numeric code
    pub code: u32,
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub id: StationId,
    pub name: String,
    pub code: u32,
    pub lon: f64,
    pub lat: f64,
    /// Derived from (lon, lat) by the current projection; never set by hand
    #[serde(skip)]
    pub canvas: (f64, f64),
    pub lines: BTreeSet<MetroLine>,
}

impl Station {
    #[must_use]
    pub fn new(id: StationId, attributes: StationAttributes) -> Self {
        Self {
            id,
            name: attributes.name,
            code: attributes.code,
            lon: attributes.lon,
            lat: attributes.lat,
            canvas: (0.0, 0.0),
            lines: BTreeSet::new(),
        }
    }

    /// Comma separated line labels, e.g. "M1, M4"
    #[must_use]
    pub fn line_labels(&self) -> String {
        self.lines.iter().map(|line| line.label()).collect::<Vec<_>>().join(", ")
    }
}
