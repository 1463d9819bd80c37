//! # mapprint
//!
//! The map-rendering core of a map-to-document print service.
//!
//! A print job describes a map (center, scale, rotation, DPI) for every page of a
//! configured layout. This library decides how each map block lands on the page
//! (flowing with the document or pinned at absolute page coordinates), builds the
//! coordinate transform between map units and page points, and picks the cached
//! tile resolution that best serves the requested output resolution.
//!
//! The PDF writer, tile transport and image decoding live outside this crate and
//! are reached through the [`rendering::surface::PageSurface`] trait.

pub mod core;
pub mod data;
pub mod layout;
pub mod prelude;
pub mod rendering;
pub mod tiles;
pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    bounds::Bounds,
    color::Color,
    config::{LayoutConfig, PrintConfig},
    geo::{DistanceUnit, Point},
};

pub use data::params::{JsonArray, JsonNode};

pub use layout::{
    block::{Align, Block, SpacerBlock},
    flow::{FlowTarget, PageFlow, Placeholder},
    map_block::{ClientConfig, MapBlock},
    page::{render_job, Page},
};

pub use rendering::{
    context::RenderContext,
    drawer::MapChunkDrawer,
    overlay::PageOverlays,
    surface::{DrawCommand, PageSurface, RecordingSurface, Rect},
    transform::Transformer,
};

pub use tiles::{
    catalog::{ResolutionCatalog, ResolutionInfo},
    format::ImageFormat,
    layer::{TileLayer, TileRequest},
};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, PrintError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum PrintError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Deployment or tile layer setup that cannot be used.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A job parameter is present but its value is not acceptable.
    #[error("Invalid value for '{field}': {value}")]
    InvalidValue { field: String, value: String },

    #[error("Missing required field '{path}'")]
    MissingField { path: String },

    #[error("Field '{path}' is not of type {expected}")]
    WrongType { path: String, expected: &'static str },

    #[error("Render error: {0}")]
    Render(String),
}

impl PrintError {
    pub fn invalid_value(field: impl Into<String>, value: impl std::fmt::Display) -> Self {
        PrintError::InvalidValue {
            field: field.into(),
            value: value.to_string(),
        }
    }

    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        PrintError::InvalidConfiguration(message.into())
    }
}

/// Error type alias for convenience
pub type Error = PrintError;
