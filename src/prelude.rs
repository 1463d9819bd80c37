//! Prelude module for common mapprint types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use mapprint::prelude::*;`

pub use crate::core::{
    bounds::Bounds,
    color::Color,
    config::{LayoutConfig, PrintConfig},
    geo::{DistanceUnit, Point},
};

pub use crate::data::params::{JsonArray, JsonNode};

pub use crate::layout::{
    block::{Align, Block, SpacerBlock},
    flow::{FlowTarget, PageFlow, Placeholder},
    map_block::{ClientConfig, MapBlock},
    page::{render_job, Page},
};

pub use crate::rendering::{
    context::RenderContext,
    drawer::MapChunkDrawer,
    overlay::PageOverlays,
    surface::{DrawCommand, PageSurface, RecordingSurface, Rect},
    transform::Transformer,
};

pub use crate::tiles::{
    catalog::{ResolutionCatalog, ResolutionInfo},
    format::ImageFormat,
    layer::{TileLayer, TileRequest},
};

pub use crate::{Error as PrintError, Result};

pub use std::sync::Arc;

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
