//! Tile cache layers referenced by a print job

use crate::core::bounds::Bounds;
use crate::core::constants::TILE_SIZE;
use crate::core::geo::Point;
use crate::data::params::JsonNode;
use crate::tiles::catalog::{ResolutionCatalog, ResolutionInfo};
use crate::tiles::format::ImageFormat;
use crate::{PrintError, Result};
use std::sync::Arc;

const TILE_CACHE_TYPE: &str = "tilecache";

/// One tile to fetch and paint
#[derive(Debug, Clone, PartialEq)]
pub struct TileRequest {
    pub layer: String,
    pub url: String,
    pub resolution: ResolutionInfo,
    pub column: i64,
    pub row: i64,
    /// Tile extent in map units
    pub bounds: Bounds,
    pub format: ImageFormat,
}

/// A TileCache layer: where its tiles live and which resolutions exist
#[derive(Debug, Clone)]
pub struct TileLayer {
    base_url: String,
    name: String,
    catalog: Arc<ResolutionCatalog>,
    format: ImageFormat,
}

impl TileLayer {
    pub fn new(
        base_url: impl Into<String>,
        name: impl Into<String>,
        catalog: ResolutionCatalog,
    ) -> Result<Self> {
        let format = ImageFormat::from_extension(catalog.extension())?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            name: name.into(),
            catalog: Arc::new(catalog),
            format,
        })
    }

    /// Reads a layer entry of the job's `layers` array.
    ///
    /// Entries of any other `type` are not tile caches and yield `None`.
    pub fn from_params(params: &JsonNode) -> Result<Option<Self>> {
        if !params.get_string("type")?.eq_ignore_ascii_case(TILE_CACHE_TYPE) {
            return Ok(None);
        }

        let (width, height) = match params.opt_array("tileSize")? {
            Some(tile_size) => (
                tile_dimension(tile_size.get_int(0)?, params.path())?,
                tile_dimension(tile_size.get_int(1)?, params.path())?,
            ),
            None => (TILE_SIZE, TILE_SIZE),
        };

        let extent = params.get_array("maxExtent")?;
        let bounds = Bounds::from_coords(
            extent.get_float(0)?,
            extent.get_float(1)?,
            extent.get_float(2)?,
            extent.get_float(3)?,
        );

        let catalog = match params.opt_array("resolutions")? {
            Some(resolutions) => ResolutionCatalog::new(
                resolutions.to_floats()?,
                width,
                height,
                bounds,
                params.get_string("extension")?,
            )?,
            None => ResolutionCatalog::from_text(
                params.get_string("resolutions")?,
                width,
                height,
                bounds,
                params.get_string("format")?,
            )?,
        };

        Self::new(params.get_string("baseURL")?, params.get_string("layer")?, catalog).map(Some)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn catalog(&self) -> &Arc<ResolutionCatalog> {
        &self.catalog
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    /// Size of one tile in map units at `resolution`
    pub fn tile_span(&self, resolution: f64) -> (f64, f64) {
        (
            self.catalog.width() as f64 * resolution,
            self.catalog.height() as f64 * resolution,
        )
    }

    /// Tiles of the grid at `resolution` that cover `view`, keeping only those
    /// the layer fully covers.
    pub fn tiles_for(&self, view: &Bounds, resolution: ResolutionInfo) -> Vec<TileRequest> {
        let (tile_width, tile_height) = self.tile_span(resolution.value);
        if !(tile_width > 0.0 && tile_height > 0.0) {
            return Vec::new();
        }

        // cells outside the layer extent can never be visible
        let view = match view.intersection(self.catalog.bounds()) {
            Some(view) => view,
            None => return Vec::new(),
        };

        let origin = Point::new(self.catalog.min_x(), self.catalog.min_y());
        let first_column = ((view.min.x - origin.x) / tile_width).floor() as i64;
        let last_column = ((view.max.x - origin.x) / tile_width).ceil() as i64 - 1;
        let first_row = ((view.min.y - origin.y) / tile_height).floor() as i64;
        let last_row = ((view.max.y - origin.y) / tile_height).ceil() as i64 - 1;

        let mut tiles = Vec::new();
        for row in first_row..=last_row.max(first_row) {
            for column in first_column..=last_column.max(first_column) {
                let min = Point::new(
                    origin.x + column as f64 * tile_width,
                    origin.y + row as f64 * tile_height,
                );
                let bounds = Bounds::new(min, Point::new(min.x + tile_width, min.y + tile_height));
                if !self
                    .catalog
                    .is_visible(bounds.min.x, bounds.min.y, bounds.max.x, bounds.max.y)
                {
                    continue;
                }
                tiles.push(TileRequest {
                    layer: self.name.clone(),
                    url: self.tile_url(resolution.index, column, row),
                    resolution,
                    column,
                    row,
                    bounds,
                    format: self.format,
                });
            }
        }
        tiles
    }

    /// TileCache disk layout: `zz/xxx/xxx/xxx/yyy/yyy/yyy.ext`
    fn tile_url(&self, zoom: usize, column: i64, row: i64) -> String {
        format!(
            "{}/{}/{:02}/{:03}/{:03}/{:03}/{:03}/{:03}/{:03}.{}",
            self.base_url,
            self.name,
            zoom,
            column / 1_000_000,
            (column / 1000) % 1000,
            column % 1000,
            row / 1_000_000,
            (row / 1000) % 1000,
            row % 1000,
            self.format.extension()
        )
    }
}

fn tile_dimension(value: i64, path: &str) -> Result<u32> {
    u32::try_from(value)
        .ok()
        .filter(|size| *size > 0)
        .ok_or_else(|| PrintError::invalid_value(format!("{}.tileSize", path), value))
}
