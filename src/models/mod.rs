//! Core value types for boundary lookups.

pub mod extent;

pub use extent::{EdgePolicy, Extent};
