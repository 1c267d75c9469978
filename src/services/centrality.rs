use indexmap::{IndexMap, IndexSet};
use log::info;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{MapError, Result};
use crate::models::{StationId, SubwayNetwork};
use crate::store::{CentralityRow, GraphStore};

/// Which k-core centrality to ask the store for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CentralityMetric {
    /// k-core over the whole network
    TunnelKCore,
    /// k-core restricted to the station/route subgraph
    RouteKCore,
}

impl fmt::Display for CentralityMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TunnelKCore => write!(f, "tunnel k-core"),
            Self::RouteKCore => write!(f, "route k-core"),
        }
    }
}

/// Stations that share one centrality score
#[derive(Debug, Clone, PartialEq)]
pub struct CentralityGroup {
    pub score: f64,
    pub members: IndexSet<StationId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CentralityResult {
    pub metric: CentralityMetric,
    pub max_score: f64,
    pub groups: Vec<CentralityGroup>,
}

impl CentralityResult {
    /// Build a result from raw rows. Rows with the same score are merged and
    /// member ids de-duplicated.
    ///
    /// # Errors
    ///
    /// Returns `EmptyResult` if there are no rows.
    pub fn from_rows(metric: CentralityMetric, rows: Vec<CentralityRow>) -> Result<Self> {
        if rows.is_empty() {
            return Err(MapError::EmptyResult(metric));
        }

        let mut by_score: IndexMap<u64, CentralityGroup> = IndexMap::new();
        for row in rows {
            by_score
                .entry(row.score.to_bits())
                .or_insert_with(|| CentralityGroup { score: row.score, members: IndexSet::new() })
                .members
                .extend(row.members);
        }

        let groups: Vec<CentralityGroup> = by_score.into_values().collect();
        let max_score = groups.iter().map(|g| g.score).fold(f64::NEG_INFINITY, f64::max);

        Ok(Self { metric, max_score, groups })
    }

    /// Circle radius for `score`, relative to the best-scoring group
    #[must_use]
    pub fn radius_for(&self, score: f64, max_radius: f64) -> f64 {
        if self.max_score <= 0.0 {
            return 0.0;
        }
        score / self.max_score * max_radius
    }

    #[must_use]
    pub fn member_count(&self) -> usize {
        self.groups.iter().map(|g| g.members.len()).sum()
    }

    /// # Errors
    ///
    /// Returns `StationNotOnMap` naming the first member the network doesn't know.
    pub fn ensure_members_in(&self, network: &SubwayNetwork) -> Result<()> {
        let dangling = self
            .groups
            .iter()
            .flat_map(|g| g.members.iter())
            .find(|id| !network.contains_station(id));

        match dangling {
            Some(id) => Err(MapError::StationNotOnMap { overlay: "centrality overlay", id: id.clone() }),
            None => Ok(()),
        }
    }
}

/// Ask the store for a k-core centrality and group the answer by score.
///
/// # Errors
///
/// Returns `Transport` if the store fails and `EmptyResult` if it has no answer.
pub async fn compute_centrality<S: GraphStore>(store: &S, metric: CentralityMetric) -> Result<CentralityResult> {
    let rows = store.centrality(metric).await?;
    let result = CentralityResult::from_rows(metric, rows)?;
    info!(
        "{metric}: {} groups over {} stations, max score {}",
        result.groups.len(),
        result.member_count(),
        result.max_score
    );
    Ok(result)
}
