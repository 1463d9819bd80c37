//! The map block: where a map goes on the page and how it is drawn there

use crate::core::constants::{DEFAULT_MAP_HEIGHT, DEFAULT_MAP_WIDTH};
use crate::data::params::JsonNode;
use crate::layout::block::Align;
use crate::layout::flow::{FlowTarget, Placeholder};
use crate::rendering::context::RenderContext;
use crate::rendering::drawer::MapChunkDrawer;
use crate::rendering::surface::Rect;
use crate::rendering::transform::Transformer;
use crate::{PrintError, Result};
use serde::{Deserialize, Serialize};

/// Size of a map block as exported to client-side previews
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub width: u32,
    pub height: u32,
}

/// Layout definition of a map block.
///
/// Configured once per deployment and reused for every render; the transformer
/// and drawer are built per render call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapBlock {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    #[serde(default)]
    pub spacing_after: u32,
    /// Page x of the block's left edge when pinned
    #[serde(default)]
    pub absolute_x: Option<i32>,
    /// Page y of the block's top edge when pinned
    #[serde(default)]
    pub absolute_y: Option<i32>,
    /// Scale multiplier of an overview map; unset (or NaN) for the primary map
    #[serde(default)]
    pub overview_map: Option<f64>,
    #[serde(default)]
    pub background_color: Option<String>,
    #[serde(default)]
    pub align: Align,
}

fn default_width() -> u32 {
    DEFAULT_MAP_WIDTH
}

fn default_height() -> u32 {
    DEFAULT_MAP_HEIGHT
}

impl Default for MapBlock {
    fn default() -> Self {
        Self {
            width: DEFAULT_MAP_WIDTH,
            height: DEFAULT_MAP_HEIGHT,
            spacing_after: 0,
            absolute_x: None,
            absolute_y: None,
            overview_map: None,
            background_color: None,
            align: Align::Left,
        }
    }
}

impl MapBlock {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn with_spacing_after(mut self, spacing_after: u32) -> Self {
        self.spacing_after = spacing_after;
        self
    }

    pub fn with_absolute_x(mut self, x: i32) -> Self {
        self.absolute_x = Some(x);
        self
    }

    pub fn with_absolute_y(mut self, y: i32) -> Self {
        self.absolute_y = Some(y);
        self
    }

    pub fn with_absolute_position(self, x: i32, y: i32) -> Self {
        self.with_absolute_x(x).with_absolute_y(y)
    }

    pub fn with_overview_map(mut self, scale_factor: f64) -> Self {
        self.overview_map = Some(scale_factor);
        self
    }

    pub fn with_background_color(mut self, color: impl Into<String>) -> Self {
        self.background_color = Some(color.into());
        self
    }

    pub fn with_align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    /// Top-left page position when both coordinates are configured
    pub fn absolute_position(&self) -> Option<(i32, i32)> {
        match (self.absolute_x, self.absolute_y) {
            (Some(x), Some(y)) => Some((x, y)),
            _ => None,
        }
    }

    /// Pinned blocks are drawn in the page overlay pass; a lone coordinate does not pin.
    pub fn is_absolute(&self) -> bool {
        self.absolute_position().is_some()
    }

    fn overview_scale(&self) -> Option<f64> {
        self.overview_map.filter(|scale| scale.is_finite())
    }

    pub fn is_overview(&self) -> bool {
        self.overview_scale().is_some()
    }

    /// The primary map this block stands for: itself, or none for an overview
    pub fn map(&self) -> Option<&MapBlock> {
        if self.is_overview() {
            None
        } else {
            Some(self)
        }
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            width: self.width,
            height: self.height,
        }
    }

    pub fn print_client_config(&self) -> serde_json::Value {
        serde_json::json!({
            "width": self.width,
            "height": self.height,
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(PrintError::invalid_configuration(format!(
                "map block size {}x{} is empty",
                self.width, self.height
            )));
        }
        if self.absolute_x.is_some() != self.absolute_y.is_some() {
            log::warn!(
                "map block sets only one of absoluteX/absoluteY; it will flow with the document"
            );
        }
        Ok(())
    }

    /// DPI of the page, or the job's default, checked against the deployment
    pub fn resolve_dpi(&self, params: &JsonNode, context: &RenderContext) -> Result<u32> {
        let dpi = match params.opt_int("dpi")? {
            Some(dpi) => dpi,
            None => context.default_dpi()?,
        };
        if !context.config().is_dpi_allowed(dpi) {
            return Err(PrintError::invalid_value("dpi", dpi));
        }
        u32::try_from(dpi).map_err(|_| PrintError::invalid_value("dpi", dpi))
    }

    pub fn create_transformer(
        &self,
        context: &RenderContext,
        params: &JsonNode,
    ) -> Result<Transformer> {
        let dpi = self.resolve_dpi(params, context)?;

        let center = params.get_array("center")?;
        let units = context.units()?;
        let rotation = params.opt_float("rotation", 0.0)?.to_radians();

        Transformer::new(
            center.get_float(0)?,
            center.get_float(1)?,
            self.width as f64,
            self.height as f64,
            params.get_int("scale")? as f64,
            dpi,
            units,
            rotation,
        )
    }

    pub fn create_drawer(
        &self,
        context: &RenderContext,
        params: &JsonNode,
    ) -> Result<MapChunkDrawer> {
        let transformer = self.create_transformer(context, params)?;
        let background = context.resolve_color(self.background_color.as_deref(), params)?;
        Ok(MapChunkDrawer::new(
            transformer,
            context.tile_layers().to_vec(),
            self.overview_scale(),
            background,
        ))
    }

    /// Places the map for one page.
    ///
    /// Pinned blocks register a drawer that runs when the page overlays are
    /// flushed; flowing blocks reserve their paper area in `target` right away.
    pub fn render(
        &self,
        params: &JsonNode,
        target: &mut dyn FlowTarget,
        context: &mut RenderContext,
    ) -> Result<()> {
        let drawer = self.create_drawer(context, params)?;

        if let Some((x, y)) = self.absolute_position() {
            log::debug!("map block pinned at ({}, {})", x, y);
            let (width, height) = (self.width as f64, self.height as f64);
            let (x, y) = (x as f64, y as f64);
            context.overlays_mut().add_absolute_drawer(move |surface| {
                let rect = Rect::from_corners(x, y - height, x + width, y);
                drawer.render(rect, surface)
            });
            Ok(())
        } else {
            let transformer = drawer.transformer();
            log::debug!(
                "map block flows with the document ({}x{})",
                transformer.paper_width(),
                transformer.paper_height()
            );
            let placeholder =
                Placeholder::new(transformer.paper_width(), transformer.paper_height())
                    .with_spacing_after(self.spacing_after as f64)
                    .with_align(self.align)
                    .with_drawer(move |rect, surface| drawer.render(rect, surface));
            target.add_placeholder(placeholder)
        }
    }
}
