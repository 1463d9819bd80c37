//! Deployment configuration for the print service
//!
//! A deployment declares the DPIs clients may request, the scales it advertises
//! and the named page layouts. Each layout lists its blocks in document order;
//! blocks are selected by their `type` tag when the configuration is loaded.

use crate::core::constants::{DEFAULT_PAGE_MARGIN, DEFAULT_PAGE_SIZE};
use crate::layout::block::Block;
use crate::layout::map_block::MapBlock;
use crate::prelude::HashSet;
use crate::{PrintError, Result};
use serde::Deserialize;
use serde_json::json;
use std::collections::BTreeSet;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintConfig {
    /// DPIs a job may ask for
    pub dpis: BTreeSet<u32>,
    #[serde(default)]
    pub scales: Vec<u32>,
    #[serde(default)]
    pub layouts: Vec<LayoutConfig>,
}

impl PrintConfig {
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: PrintConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<()> {
        if self.dpis.is_empty() {
            return Err(PrintError::invalid_configuration(
                "at least one DPI must be allowed",
            ));
        }

        let mut names = HashSet::default();
        for layout in &self.layouts {
            if !names.insert(layout.name.as_str()) {
                return Err(PrintError::invalid_configuration(format!(
                    "duplicate layout '{}'",
                    layout.name
                )));
            }
            layout.validate()?;
        }
        Ok(())
    }

    pub fn is_dpi_allowed(&self, dpi: i64) -> bool {
        u32::try_from(dpi).map_or(false, |dpi| self.dpis.contains(&dpi))
    }

    pub fn layout(&self, name: &str) -> Option<&LayoutConfig> {
        self.layouts.iter().find(|layout| layout.name == name)
    }

    /// Capabilities handed to client-side print dialogs
    pub fn client_info(&self) -> serde_json::Value {
        let layouts: Vec<_> = self
            .layouts
            .iter()
            .map(|layout| {
                let mut entry = json!({ "name": layout.name });
                if let Some(map) = layout.main_map() {
                    entry["map"] = map.print_client_config();
                }
                entry
            })
            .collect();

        json!({
            "dpis": self.dpis,
            "scales": self.scales,
            "layouts": layouts,
        })
    }
}

/// A named page layout
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutConfig {
    pub name: String,
    /// Page width and height in points
    #[serde(default = "default_page_size")]
    pub size: (f64, f64),
    #[serde(default = "default_margin")]
    pub margin: f64,
    #[serde(default)]
    pub blocks: Vec<Block>,
}

fn default_page_size() -> (f64, f64) {
    DEFAULT_PAGE_SIZE
}

fn default_margin() -> f64 {
    DEFAULT_PAGE_MARGIN
}

impl LayoutConfig {
    pub fn validate(&self) -> Result<()> {
        let (width, height) = self.size;
        if width <= 2.0 * self.margin || height <= 2.0 * self.margin {
            return Err(PrintError::invalid_configuration(format!(
                "layout '{}' leaves no room inside its margins",
                self.name
            )));
        }
        for block in &self.blocks {
            block.validate()?;
        }
        Ok(())
    }

    /// The first block acting as a primary (non-overview) map
    pub fn main_map(&self) -> Option<&MapBlock> {
        self.blocks.iter().find_map(Block::map)
    }
}
