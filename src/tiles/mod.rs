//! Cached tile layers
//!
//! - resolution catalogs with nearest-resolution matching and coverage checks
//! - tile image format lookup
//! - TileCache layer definitions and their tile grid

pub mod catalog;
pub mod format;
pub mod layer;

// Re-exports for convenience
pub use catalog::{ResolutionCatalog, ResolutionInfo};
pub use format::ImageFormat;
pub use layer::{TileLayer, TileRequest};
