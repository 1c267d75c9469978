//! Graql text for every query the map issues.
//!
//! Concept ids and names are spliced into query strings, so ids are checked
//! against the store's id alphabet and names are escaped first.

use crate::error::StoreError;
use crate::models::StationId;
use crate::services::centrality::CentralityMetric;
use super::Aggregate;

pub const STATIONS_AND_ROUTES: &str =
    "match $route ($sta1, $sta2) isa route, has station_ligne $ligne; get $sta1, $sta2, $ligne;";

pub const CENTRALITY_TUNNEL_KCORE: &str = "compute centrality of station, using k-core;";
pub const CENTRALITY_ROUTE_KCORE: &str = "compute centrality of station, in [station, route], using k-core;";

/// Type label of station entities
pub const STATION_TYPE: &str = "station";

fn checked_id(id: &StationId) -> Result<&str, StoreError> {
    let raw = id.as_str();
    if !raw.is_empty() && raw.chars().all(|c| c.is_ascii_alphanumeric()) {
        Ok(raw)
    } else {
        Err(StoreError::InvalidId(raw.to_string()))
    }
}

fn quoted(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{escaped}\"")
}

#[must_use]
pub fn aggregate(kind: Aggregate) -> String {
    format!("compute {} of {}, in station;", kind.function(), kind.attribute())
}

/// # Errors
///
/// Returns `InvalidId` if the id contains characters outside `[A-Za-z0-9]`.
pub fn station_attributes(id: &StationId) -> Result<String, StoreError> {
    Ok(format!(
        "match $sta id {}, has name $name, has station_id $code, has lat $lat, has lon $lon; get $name, $code, $lat, $lon;",
        checked_id(id)?
    ))
}

/// # Errors
///
/// Returns `InvalidId` if either id contains characters outside `[A-Za-z0-9]`.
pub fn shortest_path(from: &StationId, to: &StationId) -> Result<String, StoreError> {
    Ok(format!("compute path from {}, to {};", checked_id(from)?, checked_id(to)?))
}

/// # Errors
///
/// Returns `InvalidId` if the id contains characters outside `[A-Za-z0-9]`.
pub fn node_type(id: &StationId) -> Result<String, StoreError> {
    Ok(format!("match $x id {}; get $x;", checked_id(id)?))
}

#[must_use]
pub fn centrality(metric: CentralityMetric) -> &'static str {
    match metric {
        CentralityMetric::TunnelKCore => CENTRALITY_TUNNEL_KCORE,
        CentralityMetric::RouteKCore => CENTRALITY_ROUTE_KCORE,
    }
}

#[must_use]
pub fn station_by_name(name: &str) -> String {
    format!("match $sta isa station, has name {}; get $sta;", quoted(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aggregate_queries() {
        assert_eq!(aggregate(Aggregate::MinLat), "compute min of lat, in station;");
        assert_eq!(aggregate(Aggregate::MaxLon), "compute max of lon, in station;");
    }

    #[test]
    fn test_shortest_path_query() {
        let query = shortest_path(&"V4136".into(), &"V8272".into()).expect("valid ids");
        assert_eq!(query, "compute path from V4136, to V8272;");
    }

    #[test]
    fn test_rejects_injected_id() {
        let result = node_type(&"V1; delete $x".into());
        assert!(matches!(result, Err(StoreError::InvalidId(_))));
        assert!(station_attributes(&"".into()).is_err());
    }

    #[test]
    fn test_station_by_name_escapes_quotes() {
        let query = station_by_name("Saint \"Lazare\"");
        assert_eq!(query, r#"match $sta isa station, has name "Saint \"Lazare\""; get $sta;"#);
    }

    #[test]
    fn test_centrality_queries_differ() {
        assert_ne!(
            centrality(CentralityMetric::TunnelKCore),
            centrality(CentralityMetric::RouteKCore)
        );
        assert!(centrality(CentralityMetric::RouteKCore).contains("[station, route]"));
    }
}
