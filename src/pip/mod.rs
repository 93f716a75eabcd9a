//! Point-in-Polygon (PIP) border lookups.
//!
//! Boundary polygons are grouped into hierarchies that share one aggregate
//! extent. Lookups reject whole hierarchies by that extent before asking
//! individual polygons.

mod boundary;
mod hierarchy;
mod index;
mod service;

pub use boundary::{BorderPolygon, BoundaryPolygon};
pub use hierarchy::{BorderHierarchy, HierarchyBuilder};
pub use index::{BorderIndex, BorderIndexBuilder};
pub use service::BorderService;
