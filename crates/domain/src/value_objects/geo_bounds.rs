//! Rectangular latitude/longitude bounds

use serde::{Deserialize, Serialize};

use super::GeoPoint;

/// Axis-aligned bounds enclosing a set of points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    south: f64,
    west: f64,
    north: f64,
    east: f64,
}

impl GeoBounds {
    /// Smallest bounds containing every point, or `None` for an empty set
    #[must_use]
    pub fn enclosing<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a GeoPoint>,
    {
        points.into_iter().fold(None, |bounds, point| {
            let lat = point.latitude();
            let lon = point.longitude();
            Some(match bounds {
                None => Self {
                    south: lat,
                    west: lon,
                    north: lat,
                    east: lon,
                },
                Some(b) => Self {
                    south: b.south.min(lat),
                    west: b.west.min(lon),
                    north: b.north.max(lat),
                    east: b.east.max(lon),
                },
            })
        })
    }

    /// Bounds grown by `ratio` of their span on every side, clamped to valid ranges
    #[must_use]
    pub fn padded(&self, ratio: f64) -> Self {
        let lat_pad = (self.north - self.south) * ratio;
        let lon_pad = (self.east - self.west) * ratio;
        Self {
            south: (self.south - lat_pad).max(-90.0),
            west: (self.west - lon_pad).max(-180.0),
            north: (self.north + lat_pad).min(90.0),
            east: (self.east + lon_pad).min(180.0),
        }
    }

    /// South-west corner
    #[must_use]
    pub const fn south_west(&self) -> GeoPoint {
        GeoPoint::new_unchecked(self.south, self.west)
    }

    /// North-east corner
    #[must_use]
    pub const fn north_east(&self) -> GeoPoint {
        GeoPoint::new_unchecked(self.north, self.east)
    }

    /// Center of the bounds
    #[must_use]
    pub fn center(&self) -> GeoPoint {
        GeoPoint::new_unchecked(
            f64::midpoint(self.south, self.north),
            f64::midpoint(self.west, self.east),
        )
    }

    /// Whether the bounds collapse to a single point
    #[must_use]
    pub fn is_point(&self) -> bool {
        (self.north - self.south).abs() < f64::EPSILON && (self.east - self.west).abs() < f64::EPSILON
    }

    /// Whether `point` lies inside the bounds (edges included)
    #[must_use]
    pub fn contains(&self, point: &GeoPoint) -> bool {
        (self.south..=self.north).contains(&point.latitude())
            && (self.west..=self.east).contains(&point.longitude())
    }
}
