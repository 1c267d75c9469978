use crate::error::{MapError, Result};
use crate::models::Extents;

/// Linearly maps `val` from `[old_min, old_max]` onto `[new_min, new_max]`.
///
/// # Errors
///
/// Returns `DegenerateGeometry` if the source range is empty.
pub fn transform_to_range(val: f64, old_min: f64, old_max: f64, new_min: f64, new_max: f64) -> Result<f64> {
    let old_range = old_max - old_min;
    if old_range == 0.0 {
        return Err(MapError::DegenerateGeometry(format!(
            "cannot scale from an empty range [{old_min}, {old_max}]"
        )));
    }
    let new_range = new_max - new_min;
    Ok((val - old_min) * new_range / old_range + new_min)
}

/// Projects geographic coordinates onto a canvas of `width` x `height` pixels.
///
/// Longitude maps onto `[0, width]`. Latitude maps onto `[0, height]` and is then
/// flipped, since north is up on screen while canvas y grows downwards.
///
/// # Examples
/// ```
/// use paris_subway_map::geometry::project;
///
/// let (x, y) = project(2.0, 48.0, 2.0, 3.0, 48.0, 49.0, 100.0, 50.0).unwrap();
/// assert_eq!((x, y), (0.0, 50.0));
/// ```
///
/// # Errors
///
/// Returns `DegenerateGeometry` when either extent has zero width.
#[allow(clippy::too_many_arguments)]
pub fn project(
    lon: f64,
    lat: f64,
    min_lon: f64,
    max_lon: f64,
    min_lat: f64,
    max_lat: f64,
    width: f64,
    height: f64,
) -> Result<(f64, f64)> {
    let x = transform_to_range(lon, min_lon, max_lon, 0.0, width)?;
    let y = height - transform_to_range(lat, min_lat, max_lat, 0.0, height)?;
    Ok((x, y))
}

/// Offset between parallel lines drawn along a connection of gradient `grad`,
/// so that consecutive lines sit `spacing` apart.
#[must_use]
pub fn parallel_offset(grad: f64, spacing: f64) -> (f64, f64) {
    let dy = spacing / (grad * grad + 1.0).sqrt();
    let dx = grad * dy;
    (dx, dy)
}

/// Parallel-line offset for the segment `from -> to`.
///
/// A line drawn `i` places away from the centre line runs through
/// `(x - i * dx, y + i * dy)`. Vertical segments have no gradient and get a
/// purely horizontal offset.
///
/// # Errors
///
/// Returns `DegenerateGeometry` for a zero-length segment.
pub fn segment_offset(from: (f64, f64), to: (f64, f64), spacing: f64) -> Result<(f64, f64)> {
    let dx_total = to.0 - from.0;
    let dy_total = to.1 - from.1;

    if dx_total == 0.0 {
        if dy_total == 0.0 {
            return Err(MapError::DegenerateGeometry(format!(
                "zero-length segment at ({:.1}, {:.1})",
                from.0, from.1
            )));
        }
        return Ok((spacing, 0.0));
    }

    Ok(parallel_offset(dy_total / dx_total, spacing))
}

/// Extents plus target canvas size: everything needed to place a station on screen
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub extents: Extents,
    pub width: f64,
    pub height: f64,
}

impl Projection {
    /// # Errors
    ///
    /// Returns `DegenerateGeometry` if the extents are empty in either direction.
    pub fn new(extents: Extents, width: f64, height: f64) -> Result<Self> {
        extents.validate()?;
        Ok(Self { extents, width, height })
    }

    /// Uses the full `width` and derives the height from the extents' aspect ratio
    /// (longitude span over latitude span).
    ///
    /// # Errors
    ///
    /// Returns `DegenerateGeometry` if the extents are empty in either direction.
    pub fn fit_width(extents: Extents, width: f64) -> Result<Self> {
        extents.validate()?;
        let aspect_ratio = (extents.max_lon - extents.min_lon) / (extents.max_lat - extents.min_lat);
        Self::new(extents, width, width / aspect_ratio)
    }

    /// # Errors
    ///
    /// Returns `DegenerateGeometry` if the extents are empty in either direction.
    pub fn project(&self, lon: f64, lat: f64) -> Result<(f64, f64)> {
        let e = &self.extents;
        project(lon, lat, e.min_lon, e.max_lon, e.min_lat, e.max_lat, self.width, self.height)
    }
}
