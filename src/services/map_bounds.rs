use crate::models::location::{MapBounds, ResolvedLocation};

/// Degrees added on every side so single points still get a visible box.
pub const PADDING: f64 = 0.01;

/// Smallest lat/lng box containing every location, padded by [`PADDING`].
/// Returns `None` for an empty slice.
pub fn compute_bounds(locations: &[ResolvedLocation]) -> Option<MapBounds> {
    let first = locations.first()?;

    let initial = MapBounds {
        north: first.lat,
        south: first.lat,
        east: first.lng,
        west: first.lng,
    };

    let bounds = locations.iter().skip(1).fold(initial, |acc, location| MapBounds {
        north: acc.north.max(location.lat),
        south: acc.south.min(location.lat),
        east: acc.east.max(location.lng),
        west: acc.west.min(location.lng),
    });

    Some(MapBounds {
        north: bounds.north + PADDING,
        south: bounds.south - PADDING,
        east: bounds.east + PADDING,
        west: bounds.west - PADDING,
    })
}
