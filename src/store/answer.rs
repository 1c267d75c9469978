use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::StoreError;
use crate::models::{StationAttributes, StationId};
use super::{CentralityRow, RouteRow};

/// One answer as returned by the Graql gateway
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Answer {
    Value { number: f64 },
    ConceptMap { map: HashMap<String, Concept> },
    ConceptList { list: Vec<String> },
    ConceptSetMeasure { measurement: f64, set: Vec<String> },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Concept {
    pub id: String,
    #[serde(rename = "type")]
    pub type_label: String,
    #[serde(default)]
    pub value: Option<serde_json::Value>,
}

impl Concept {
    fn text(&self) -> Option<String> {
        match self.value.as_ref()? {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Numeric attribute value; the CSV import left some numbers as strings
    fn number(&self) -> Option<f64> {
        match self.value.as_ref()? {
            serde_json::Value::Number(n) => n.as_f64(),
            serde_json::Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

fn unexpected(query: &str, detail: impl Into<String>) -> StoreError {
    StoreError::UnexpectedAnswer {
        query: query.to_string(),
        detail: detail.into(),
    }
}

fn concept<'a>(query: &str, map: &'a HashMap<String, Concept>, var: &str) -> Result<&'a Concept, StoreError> {
    map.get(var).ok_or_else(|| unexpected(query, format!("missing variable ${var}")))
}

fn concept_maps<'a>(query: &str, answers: &'a [Answer]) -> Result<Vec<&'a HashMap<String, Concept>>, StoreError> {
    answers
        .iter()
        .map(|answer| match answer {
            Answer::ConceptMap { map } => Ok(map),
            other => Err(unexpected(query, format!("expected a concept map, got {other:?}"))),
        })
        .collect()
}

/// # Errors
///
/// Returns `UnexpectedAnswer` unless the answers are exactly one value.
pub fn number(query: &str, answers: &[Answer]) -> Result<f64, StoreError> {
    match answers {
        [Answer::Value { number }] => Ok(*number),
        _ => Err(unexpected(query, format!("expected one value, got {} answers", answers.len()))),
    }
}

/// # Errors
///
/// Returns `UnexpectedAnswer` if an answer lacks `$sta1`, `$sta2` or a textual `$ligne`.
pub fn route_rows(query: &str, answers: &[Answer]) -> Result<Vec<RouteRow>, StoreError> {
    concept_maps(query, answers)?
        .into_iter()
        .map(|map| {
            let line = concept(query, map, "ligne")?;
            Ok(RouteRow {
                line_label: line.text().ok_or_else(|| unexpected(query, "$ligne has no value"))?,
                station_a: StationId::new(concept(query, map, "sta1")?.id.clone()),
                station_b: StationId::new(concept(query, map, "sta2")?.id.clone()),
            })
        })
        .collect()
}

/// First matching attribute row, `None` when the station has no complete row.
///
/// # Errors
///
/// Returns `UnexpectedAnswer` if a row is missing variables or holds non-numeric coordinates.
pub fn station_attributes(query: &str, answers: &[Answer]) -> Result<Option<StationAttributes>, StoreError> {
    let Some(map) = concept_maps(query, answers)?.into_iter().next() else {
        return Ok(None);
    };

    let name = concept(query, map, "name")?
        .text()
        .ok_or_else(|| unexpected(query, "$name has no value"))?;
    let code = concept(query, map, "code")?
        .number()
        .filter(|code| code.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(code))
        .ok_or_else(|| unexpected(query, "$code is not a station code"))?;
    let lat = concept(query, map, "lat")?
        .number()
        .ok_or_else(|| unexpected(query, "$lat is not numeric"))?;
    let lon = concept(query, map, "lon")?
        .number()
        .ok_or_else(|| unexpected(query, "$lon is not numeric"))?;

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let code = code as u32;

    Ok(Some(StationAttributes { name, code, lat, lon }))
}

/// Raw node ids along the path, `None` if the store found no path.
///
/// The store answers with every shortest path of equal length; the first
/// non-empty one is used.
///
/// # Errors
///
/// Returns `UnexpectedAnswer` if any answer is not a concept list.
pub fn path(query: &str, answers: &[Answer]) -> Result<Option<Vec<StationId>>, StoreError> {
    let mut first = None;
    for answer in answers {
        match answer {
            Answer::ConceptList { list } => {
                if first.is_none() && !list.is_empty() {
                    first = Some(list);
                }
            }
            other => return Err(unexpected(query, format!("expected a concept list, got {other:?}"))),
        }
    }
    Ok(first.map(|list| list.iter().cloned().map(StationId::new).collect()))
}

/// # Errors
///
/// Returns `UnexpectedAnswer` unless the first answer binds `$x`.
pub fn node_type(query: &str, answers: &[Answer]) -> Result<String, StoreError> {
    let map = concept_maps(query, answers)?
        .into_iter()
        .next()
        .ok_or_else(|| unexpected(query, "no such concept"))?;
    Ok(concept(query, map, "x")?.type_label.clone())
}

/// # Errors
///
/// Returns `UnexpectedAnswer` if any answer is not a set measure.
pub fn centrality_rows(query: &str, answers: &[Answer]) -> Result<Vec<CentralityRow>, StoreError> {
    answers
        .iter()
        .map(|answer| match answer {
            Answer::ConceptSetMeasure { measurement, set } => Ok(CentralityRow {
                score: *measurement,
                members: set.iter().cloned().map(StationId::new).collect::<IndexSet<_>>(),
            }),
            other => Err(unexpected(query, format!("expected a set measure, got {other:?}"))),
        })
        .collect()
}

/// # Errors
///
/// Returns `UnexpectedAnswer` if the first answer does not bind `$sta`.
pub fn station_id(query: &str, answers: &[Answer]) -> Result<Option<StationId>, StoreError> {
    let Some(map) = concept_maps(query, answers)?.into_iter().next() else {
        return Ok(None);
    };
    Ok(Some(StationId::new(concept(query, map, "sta")?.id.clone())))
}
