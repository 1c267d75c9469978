//! Centre line of the Seine through Paris, upstream to downstream.

use crate::error::Result;
use crate::geometry::Projection;

/// (lat, lon) waypoints
#[allow(clippy::unreadable_literal)]
pub const SEINE_WAYPOINTS: [(f64, f64); 59] = [
    (48.772773, 2.411356),
    (48.776891, 2.414646),
    (48.780865, 2.417483),
    (48.789266, 2.422638),
    (48.796402, 2.420453),
    (48.803774, 2.411313),
    (48.810861, 2.409492),
    (48.817982, 2.405901),
    (48.822129, 2.395588),
    (48.827270, 2.387981),
    (48.833969, 2.379891),
    (48.839630, 2.373289),
    (48.841611, 2.370717),
    (48.844485, 2.366576),
    (48.846830, 2.363550),
    (48.850086, 2.357603),
    (48.852350, 2.352977),
    (48.854405, 2.347717),
    (48.856159, 2.343282),
    (48.858270, 2.3384868),
    (48.859230, 2.334001),
    (48.860105, 2.330278),
    (48.862279, 2.323819),
    (48.863648, 2.318809),
    (48.863739, 2.313971),
    (48.863626, 2.310742),
    (48.863668, 2.308489),
    (48.863569, 2.303575),
    (48.863421, 2.300507),
    (48.861685, 2.294263),
    (48.859483, 2.291173),
    (48.857351, 2.288748),
    (48.855614, 2.286731),
    (48.854124, 2.285014),
    (48.852540, 2.282690),
    (48.850782, 2.280297),
    (48.849389, 2.278434),
    (48.847447, 2.276385),
    (48.845534, 2.274261),
    (48.842688, 2.271418),
    (48.838428, 2.267431),
    (48.834586, 2.263558),
    (48.830250, 2.258462),
    (48.824797, 2.249568),
    (48.823117, 2.237919),
    (48.830194, 2.226450),
    (48.839076, 2.222887),
    (48.849427, 2.225365),
    (48.862338, 2.226384),
    (48.872883, 2.237832),
    (48.885122, 2.253422),
    (48.885122, 2.253422),
    (48.902401, 2.283997),
    (48.908843, 2.298647),
    (48.916216, 2.320786),
    (48.929868, 2.337285),
    (48.943158, 2.336514),
    (48.950066, 2.305815),
    (48.947636, 2.272512),
];

/// River waypoints in canvas coordinates.
///
/// Waypoints outside the network's extents land off-canvas; they are kept so
/// the river still runs off the edge when the view is panned.
///
/// # Errors
///
/// Returns `DegenerateGeometry` if the projection's extents are empty.
pub fn project_river(projection: &Projection) -> Result<Vec<(f64, f64)>> {
    SEINE_WAYPOINTS
        .iter()
        .map(|&(lat, lon)| projection.project(lon, lat))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Extents;

    #[test]
    fn test_river_crosses_central_paris() {
        let extents = Extents { min_lon: 2.25, max_lon: 2.45, min_lat: 48.80, max_lat: 48.90 };
        let projection = Projection::new(extents, 1000.0, 500.0).expect("valid");
        let points = project_river(&projection).expect("projects");

        assert_eq!(points.len(), SEINE_WAYPOINTS.len());
        let inside = points
            .iter()
            .filter(|(x, y)| (0.0..=1000.0).contains(x) && (0.0..=500.0).contains(y))
            .count();
        assert!(inside > points.len() / 2);
    }
}
