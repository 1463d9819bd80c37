use crate::data::params::JsonNode;
use crate::layout::flow::{FlowTarget, Placeholder};
use crate::layout::map_block::MapBlock;
use crate::rendering::context::RenderContext;
use crate::{PrintError, Result};
use serde::{Deserialize, Serialize};

/// Horizontal placement of a block inside the page frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// The blocks a layout can be made of, chosen by their `type` tag
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Block {
    Map(MapBlock),
    Spacer(SpacerBlock),
}

impl Block {
    pub fn validate(&self) -> Result<()> {
        match self {
            Block::Map(map) => map.validate(),
            Block::Spacer(spacer) => spacer.validate(),
        }
    }

    pub fn render(
        &self,
        params: &JsonNode,
        target: &mut dyn FlowTarget,
        context: &mut RenderContext,
    ) -> Result<()> {
        match self {
            Block::Map(map) => map.render(params, target, context),
            Block::Spacer(spacer) => spacer.render(target),
        }
    }

    /// What a client-side preview needs to know about the block, if anything
    pub fn print_client_config(&self) -> Option<serde_json::Value> {
        match self {
            Block::Map(map) => Some(map.print_client_config()),
            Block::Spacer(_) => None,
        }
    }

    /// The primary map this block stands for
    pub fn map(&self) -> Option<&MapBlock> {
        match self {
            Block::Map(map) => map.map(),
            Block::Spacer(_) => None,
        }
    }
}

/// Vertical gap in the document flow
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct SpacerBlock {
    pub height: f64,
}

impl SpacerBlock {
    pub fn new(height: f64) -> Self {
        Self { height }
    }

    fn validate(&self) -> Result<()> {
        if self.height.is_finite() && self.height >= 0.0 {
            Ok(())
        } else {
            Err(PrintError::invalid_configuration(format!(
                "spacer height {} must be a non-negative length",
                self.height
            )))
        }
    }

    fn render(&self, target: &mut dyn FlowTarget) -> Result<()> {
        target.add_placeholder(Placeholder::new(0.0, self.height))
    }
}
