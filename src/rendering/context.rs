use crate::core::color::Color;
use crate::core::config::PrintConfig;
use crate::core::geo::DistanceUnit;
use crate::data::params::JsonNode;
use crate::rendering::overlay::PageOverlays;
use crate::tiles::layer::TileLayer;
use crate::{PrintError, Result};
use serde_json::Value;
use std::sync::Arc;

/// State shared by every block rendered for one print job
#[derive(Debug)]
pub struct RenderContext {
    config: Arc<PrintConfig>,
    job: Arc<Value>,
    tile_layers: Vec<Arc<TileLayer>>,
    overlays: PageOverlays,
}

impl RenderContext {
    /// Sets up a job, reading its tile layer definitions once.
    pub fn new(config: Arc<PrintConfig>, job: Value) -> Result<Self> {
        let job = Arc::new(job);
        let tile_layers = {
            let root = JsonNode::root(&job)?;
            let mut layers = Vec::new();
            if let Some(entries) = root.opt_array("layers")? {
                for entry in entries.objects() {
                    if let Some(layer) = TileLayer::from_params(&entry?)? {
                        layers.push(Arc::new(layer));
                    }
                }
            }
            layers
        };
        log::debug!("job uses {} tile layer(s)", tile_layers.len());

        Ok(Self {
            config,
            job,
            tile_layers,
            overlays: PageOverlays::new(),
        })
    }

    pub fn config(&self) -> &PrintConfig {
        &self.config
    }

    /// The whole job description; page parameters live under its `pages` array
    pub fn job(&self) -> &Arc<Value> {
        &self.job
    }

    pub fn global_params(&self) -> Result<JsonNode<'_>> {
        JsonNode::root(&self.job)
    }

    /// DPI used by pages that do not ask for one
    pub fn default_dpi(&self) -> Result<i64> {
        self.global_params()?.get_int("dpi")
    }

    /// Unit system of the job's map coordinates
    pub fn units(&self) -> Result<DistanceUnit> {
        self.global_params()?.get_string("units")?.parse()
    }

    pub fn tile_layers(&self) -> &[Arc<TileLayer>] {
        &self.tile_layers
    }

    pub fn overlays(&self) -> &PageOverlays {
        &self.overlays
    }

    pub fn overlays_mut(&mut self) -> &mut PageOverlays {
        &mut self.overlays
    }

    /// Replaces `${name}` with the page value of `name`, falling back to the job value.
    pub fn eval_string(&self, template: &str, params: &JsonNode) -> Result<String> {
        let global = self.global_params()?;
        let mut result = String::with_capacity(template.len());
        let mut rest = template;
        while let Some(start) = rest.find("${") {
            result.push_str(&rest[..start]);
            let after = &rest[start + 2..];
            let end = after.find('}').ok_or_else(|| {
                PrintError::invalid_configuration(format!(
                    "unterminated variable in '{}'",
                    template
                ))
            })?;
            let name = &after[..end];
            let value = params
                .raw(name)
                .or_else(|| global.raw(name))
                .ok_or_else(|| PrintError::MissingField {
                    path: name.to_string(),
                })?;
            match value {
                Value::String(text) => result.push_str(text),
                other => result.push_str(&other.to_string()),
            }
            rest = &after[end + 1..];
        }
        result.push_str(rest);
        Ok(result)
    }

    /// Background colour of a block, if it declares one
    pub fn resolve_color(
        &self,
        template: Option<&str>,
        params: &JsonNode,
    ) -> Result<Option<Color>> {
        match template {
            Some(template) => Color::parse(&self.eval_string(template, params)?).map(Some),
            None => Ok(None),
        }
    }
}
