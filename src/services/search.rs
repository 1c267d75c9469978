use log::debug;

use crate::models::{Station, SubwayNetwork};

/// Below this Jaro-Winkler similarity a name is not considered a match
pub const MIN_SIMILARITY: f64 = 0.8;

/// Lowercase, fold French accents and treat hyphens and apostrophes as spaces
fn normalize(name: &str) -> String {
    let folded: String = name
        .chars()
        .flat_map(char::to_lowercase)
        .map(|c| match c {
            'à' | 'â' | 'ä' => 'a',
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'î' | 'ï' => 'i',
            'ô' | 'ö' => 'o',
            'ù' | 'û' | 'ü' => 'u',
            'ç' => 'c',
            '-' | '\'' | '’' => ' ',
            other => other,
        })
        .collect();
    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// The loaded station whose name best matches a user-typed `query`.
///
/// Returns `None` if nothing reaches [`MIN_SIMILARITY`]. On a tie the station
/// loaded first wins.
#[must_use]
pub fn best_match<'a>(network: &'a SubwayNetwork, query: &str) -> Option<&'a Station> {
    let query = normalize(query);
    if query.is_empty() {
        return None;
    }

    let mut best: Option<(f64, &Station)> = None;
    for station in network.stations() {
        let score = strsim::jaro_winkler(&query, &normalize(&station.name));
        if score >= MIN_SIMILARITY && !matches!(best, Some((top, _)) if top >= score) {
            best = Some((score, station));
        }
    }

    if let Some((score, station)) = best {
        debug!("{query:?} matches {:?} ({score:.2})", station.name);
    }
    best.map(|(_, station)| station)
}
