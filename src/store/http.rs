use log::debug;
use serde::Serialize;

use crate::error::StoreError;
use crate::models::{StationAttributes, StationId};
use crate::services::centrality::CentralityMetric;
use super::{answer, graql, Aggregate, Answer, CentralityRow, GraphStore, RouteRow};

#[derive(Serialize)]
struct QueryRequest<'a> {
    query: &'a str,
}

/// Graph store reached through an HTTP gateway that runs Graql read queries.
///
/// The gateway accepts `POST {"query": "..."}` and answers with a JSON array of
/// [`Answer`]s.
#[derive(Debug, Clone)]
pub struct HttpGraphStore {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpGraphStore {
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Run one read query
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The HTTP request fails
    /// - The response status is not ok
    /// - The response body cannot be deserialized
    pub async fn run(&self, query: &str) -> Result<Vec<Answer>, StoreError> {
        debug!("graql: {query}");

        let response = self
            .client
            .post(&self.endpoint)
            .json(&QueryRequest { query })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(StoreError::Status { status: status.as_u16(), body });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

impl GraphStore for HttpGraphStore {
    async fn aggregate(&self, kind: Aggregate) -> Result<f64, StoreError> {
        let query = graql::aggregate(kind);
        answer::number(&query, &self.run(&query).await?)
    }

    async fn stations_and_routes(&self) -> Result<Vec<RouteRow>, StoreError> {
        let query = graql::STATIONS_AND_ROUTES;
        answer::route_rows(query, &self.run(query).await?)
    }

    async fn station_attributes(&self, id: &StationId) -> Result<Option<StationAttributes>, StoreError> {
        let query = graql::station_attributes(id)?;
        answer::station_attributes(&query, &self.run(&query).await?)
    }

    async fn shortest_path(&self, from: &StationId, to: &StationId) -> Result<Option<Vec<StationId>>, StoreError> {
        let query = graql::shortest_path(from, to)?;
        answer::path(&query, &self.run(&query).await?)
    }

    async fn node_type(&self, id: &StationId) -> Result<String, StoreError> {
        let query = graql::node_type(id)?;
        answer::node_type(&query, &self.run(&query).await?)
    }

    async fn centrality(&self, metric: CentralityMetric) -> Result<Vec<CentralityRow>, StoreError> {
        let query = graql::centrality(metric);
        answer::centrality_rows(query, &self.run(query).await?)
    }

    async fn station_by_name(&self, name: &str) -> Result<Option<StationId>, StoreError> {
        let query = graql::station_by_name(name);
        answer::station_id(&query, &self.run(&query).await?)
    }
}
