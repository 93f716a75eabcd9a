//! Axis-aligned extent shared by boundary polygons and hierarchies.

use geo::{Coord, Rect};
use serde::{Deserialize, Serialize};

/// How a coordinate lying exactly on an extent edge is treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgePolicy {
    /// Edge coordinates are outside (`min < v < max`).
    #[default]
    Strict,
    /// Edge coordinates are inside (`min <= v <= max`).
    Inclusive,
}

/// Bounding box in `(min_lon, max_lon, min_lat, max_lat)` order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub min_lon: f64,
    pub max_lon: f64,
    pub min_lat: f64,
    pub max_lat: f64,
}

impl Extent {
    /// Maximal-empty sentinel. Widening it by any extent yields that extent,
    /// and no coordinate lies inside it.
    pub const EMPTY: Extent = Extent {
        min_lon: 180.0,
        max_lon: -180.0,
        min_lat: 180.0,
        max_lat: -180.0,
    };

    pub fn new(min_lon: f64, max_lon: f64, min_lat: f64, max_lat: f64) -> Self {
        Self {
            min_lon,
            max_lon,
            min_lat,
            max_lat,
        }
    }

    /// Build from a `geo` rectangle (x = longitude, y = latitude)
    pub fn from_rect(rect: Rect<f64>) -> Self {
        Self::new(rect.min().x, rect.max().x, rect.min().y, rect.max().y)
    }

    /// The four bounds as `[min_lon, max_lon, min_lat, max_lat]`
    pub fn to_array(&self) -> [f64; 4] {
        [self.min_lon, self.max_lon, self.min_lat, self.max_lat]
    }

    /// True while nothing has been merged into the sentinel (or the box is inverted).
    pub fn is_empty(&self) -> bool {
        !(self.min_lon <= self.max_lon && self.min_lat <= self.max_lat)
    }

    /// All four bounds are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.to_array().iter().all(|v| v.is_finite())
    }

    /// Grow this extent component-wise so it also covers `other`.
    ///
    /// Bounds are only ever pushed outward; the extent never shrinks.
    pub fn widen(&mut self, other: &Extent) {
        if other.min_lon < self.min_lon {
            self.min_lon = other.min_lon;
        }
        if other.max_lon > self.max_lon {
            self.max_lon = other.max_lon;
        }
        if other.min_lat < self.min_lat {
            self.min_lat = other.min_lat;
        }
        if other.max_lat > self.max_lat {
            self.max_lat = other.max_lat;
        }
    }

    /// Strict containment: a coordinate on any edge is outside.
    ///
    /// NaN ordinates fail every comparison and are never contained.
    pub fn contains(&self, coord: Coord<f64>) -> bool {
        self.contains_with(coord, EdgePolicy::Strict)
    }

    pub fn contains_with(&self, coord: Coord<f64>, policy: EdgePolicy) -> bool {
        match policy {
            EdgePolicy::Strict => {
                coord.x > self.min_lon
                    && coord.x < self.max_lon
                    && coord.y > self.min_lat
                    && coord.y < self.max_lat
            }
            EdgePolicy::Inclusive => {
                coord.x >= self.min_lon
                    && coord.x <= self.max_lon
                    && coord.y >= self.min_lat
                    && coord.y <= self.max_lat
            }
        }
    }

    /// True when `other` lies within this extent (edges may touch).
    pub fn covers(&self, other: &Extent) -> bool {
        other.min_lon >= self.min_lon
            && other.max_lon <= self.max_lon
            && other.min_lat >= self.min_lat
            && other.max_lat <= self.max_lat
    }
}

impl Default for Extent {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl From<Rect<f64>> for Extent {
    fn from(rect: Rect<f64>) -> Self {
        Self::from_rect(rect)
    }
}
