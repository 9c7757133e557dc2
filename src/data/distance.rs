use geo::{point, GeodesicDistance};

use crate::data::models::{Coordinate, CoordinateRecord, DistanceEdge};
use crate::utils::PairsExtension;

/// Meters between two coordinates on the WGS-84 ellipsoid (Karney's method).
pub fn geodesic_meters(from: &Coordinate, to: &Coordinate) -> f64 {
    let from = point!(x: from.longitude, y: from.latitude);
    let to = point!(x: to.longitude, y: to.latitude);
    from.geodesic_distance(&to)
}

/// Shortest round-trip representation, always with a fractional part.
pub fn format_meters(meters: f64) -> String {
    format!("{:?}", meters)
}

/// One edge per unordered pair of records, in combination order of the file.
pub fn pairwise_distances(records: &[CoordinateRecord]) -> Vec<DistanceEdge> {
    records
        .pairs()
        .map(|(origin, destination)| DistanceEdge {
            name: format!("{}{}", origin.point, destination.point),
            distance: format_meters(geodesic_meters(&origin.coordinate, &destination.coordinate)),
        })
        .collect()
}
