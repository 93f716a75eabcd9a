//! Borders - two-tier containment lookups over administrative boundaries
//!
//! This library answers "which boundaries contain this coordinate?" for a
//! static, load-once set of country and region polygons.

pub mod config;
pub mod error;
pub mod models;
pub mod pip;

pub use config::{Config, LookupConfig};
pub use error::{BorderError, Result};
pub use models::{EdgePolicy, Extent};
pub use pip::{
    BorderHierarchy, BorderIndex, BorderIndexBuilder, BorderPolygon, BorderService,
    BoundaryPolygon, HierarchyBuilder,
};
