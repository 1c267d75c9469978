use serde::{Deserialize, Serialize};

use crate::error::{MapError, Result};
use super::Station;

/// Geographic bounding box of the network
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extents {
    pub min_lon: f64,
    pub max_lon: f64,
    pub min_lat: f64,
    pub max_lat: f64,
}

impl Extents {
    /// Smallest box containing every station, `None` for an empty network
    pub fn enclosing<'a>(stations: impl IntoIterator<Item = &'a Station>) -> Option<Self> {
        stations.into_iter().fold(None, |acc, station| {
            Some(match acc {
                None => Self {
                    min_lon: station.lon,
                    max_lon: station.lon,
                    min_lat: station.lat,
                    max_lat: station.lat,
                },
                Some(e) => Self {
                    min_lon: e.min_lon.min(station.lon),
                    max_lon: e.max_lon.max(station.lon),
                    min_lat: e.min_lat.min(station.lat),
                    max_lat: e.max_lat.max(station.lat),
                },
            })
        })
    }

    /// # Errors
    ///
    /// Returns `DegenerateGeometry` if the box has zero width or height.
    pub fn validate(&self) -> Result<()> {
        if self.max_lon == self.min_lon {
            return Err(MapError::DegenerateGeometry(format!(
                "all stations share longitude {}",
                self.min_lon
            )));
        }
        if self.max_lat == self.min_lat {
            return Err(MapError::DegenerateGeometry(format!(
                "all stations share latitude {}",
                self.min_lat
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{StationAttributes, StationId};

    fn station(lon: f64, lat: f64) -> Station {
        Station::new(
            StationId::new("V1"),
            StationAttributes { name: "Test".to_string(), code: 1, lat, lon },
        )
    }

    #[test]
    fn test_enclosing_empty() {
        assert_eq!(Extents::enclosing(std::iter::empty()), None);
    }

    #[test]
    fn test_enclosing_stations() {
        let stations = [station(2.3, 48.9), station(2.2, 48.8), station(2.4, 48.85)];
        let extents = Extents::enclosing(&stations).expect("non-empty");
        assert_eq!(extents.min_lon, 2.2);
        assert_eq!(extents.max_lon, 2.4);
        assert_eq!(extents.min_lat, 48.8);
        assert_eq!(extents.max_lat, 48.9);
    }

    #[test]
    fn test_single_station_is_degenerate() {
        let extents = Extents::enclosing(&[station(2.3, 48.9)]).expect("non-empty");
        assert!(matches!(extents.validate(), Err(MapError::DegenerateGeometry(_))));
    }
}
