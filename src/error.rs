//! Error types for wrapping boundary geometry.

use thiserror::Error;

use crate::models::Extent;

#[derive(Debug, Error)]
pub enum BorderError {
    /// The geometry has no coordinates, so no extent can be derived.
    #[error("boundary {id} has no coordinates")]
    EmptyGeometry { id: i64 },

    #[error("boundary {id} has a non-finite extent {extent:?}")]
    InvalidExtent { id: i64, extent: Extent },
}

pub type Result<T> = std::result::Result<T, BorderError>;
