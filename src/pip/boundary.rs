//! Boundary polygons and the containment capability the hierarchy relies on.

use std::sync::Arc;

use geo::{BoundingRect, Contains, Coord, MultiPolygon, Point};

use crate::error::{BorderError, Result};
use crate::models::Extent;

/// Anything with an extent and an exact containment test.
///
/// Implemented by leaf polygons ([`BorderPolygon`]) and by
/// [`BorderHierarchy`](super::BorderHierarchy) itself, so hierarchies can be
/// nested as further tiers.
pub trait BoundaryPolygon {
    /// Axis-aligned extent of this boundary
    fn extent(&self) -> Extent;

    /// Cheap bounding-box check (strict edges).
    fn in_bbox(&self, coord: Coord<f64>) -> bool {
        self.extent().contains(coord)
    }

    /// Exact point-in-polygon test
    fn contains(&self, coord: Coord<f64>) -> bool;
}

impl<T: BoundaryPolygon + ?Sized> BoundaryPolygon for &T {
    fn extent(&self) -> Extent {
        (**self).extent()
    }

    fn in_bbox(&self, coord: Coord<f64>) -> bool {
        (**self).in_bbox(coord)
    }

    fn contains(&self, coord: Coord<f64>) -> bool {
        (**self).contains(coord)
    }
}

impl<T: BoundaryPolygon + ?Sized> BoundaryPolygon for Arc<T> {
    fn extent(&self) -> Extent {
        (**self).extent()
    }

    fn in_bbox(&self, coord: Coord<f64>) -> bool {
        (**self).in_bbox(coord)
    }

    fn contains(&self, coord: Coord<f64>) -> bool {
        (**self).contains(coord)
    }
}

impl<T: BoundaryPolygon + ?Sized> BoundaryPolygon for Box<T> {
    fn extent(&self) -> Extent {
        (**self).extent()
    }

    fn in_bbox(&self, coord: Coord<f64>) -> bool {
        (**self).in_bbox(coord)
    }

    fn contains(&self, coord: Coord<f64>) -> bool {
        (**self).contains(coord)
    }
}

/// A single boundary (one country or region) backed by `geo` geometry
#[derive(Debug, Clone)]
pub struct BorderPolygon {
    pub id: i64,
    pub name: Option<String>,
    pub geometry: MultiPolygon<f64>,
    extent: Extent,
}

impl BorderPolygon {
    /// Wrap loader geometry, caching its extent.
    pub fn new(id: i64, name: Option<String>, geometry: MultiPolygon<f64>) -> Result<Self> {
        let rect = geometry
            .bounding_rect()
            .ok_or(BorderError::EmptyGeometry { id })?;
        let extent = Extent::from_rect(rect);

        if !extent.is_finite() {
            return Err(BorderError::InvalidExtent { id, extent });
        }

        Ok(Self {
            id,
            name,
            geometry,
            extent,
        })
    }
}

impl BoundaryPolygon for BorderPolygon {
    fn extent(&self) -> Extent {
        self.extent
    }

    fn contains(&self, coord: Coord<f64>) -> bool {
        // Skip the ring walk when the box already rules the point out
        self.extent.contains(coord) && self.geometry.contains(&Point::from(coord))
    }
}
