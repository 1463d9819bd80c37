use crate::core::config::LayoutConfig;
use crate::data::params::JsonNode;
use crate::layout::flow::PageFlow;
use crate::rendering::context::RenderContext;
use crate::rendering::surface::{PageSurface, Rect};
use crate::Result;

/// One document page laid out with a configured layout
#[derive(Debug, Clone, Copy)]
pub struct Page<'a> {
    layout: &'a LayoutConfig,
}

impl<'a> Page<'a> {
    pub fn new(layout: &'a LayoutConfig) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &'a LayoutConfig {
        self.layout
    }

    /// Page area inside the margins
    pub fn content_frame(&self) -> Rect {
        let (width, height) = self.layout.size;
        let margin = self.layout.margin;
        Rect::new(
            margin,
            margin,
            (width - 2.0 * margin).max(0.0),
            (height - 2.0 * margin).max(0.0),
        )
    }

    /// Renders every block of the layout for one set of page parameters.
    ///
    /// Flowing content is drawn first; drawers registered for pinned blocks
    /// run afterwards so they end up on top of it.
    pub fn render(
        &self,
        params: &JsonNode,
        context: &mut RenderContext,
        surface: &mut dyn PageSurface,
    ) -> Result<()> {
        if let Err(err) = self.draw_flow(params, context, surface) {
            // a reused context starts the next page without them
            if !context.overlays().is_empty() {
                log::debug!(
                    "dropping {} pinned block(s) of failed page {}",
                    context.overlays().len(),
                    params.path()
                );
                context.overlays_mut().clear();
            }
            return Err(err);
        }

        let pending = context.overlays().len();
        if pending > 0 {
            log::debug!("drawing {} pinned block(s) on {}", pending, params.path());
        }
        context.overlays_mut().flush(surface)
    }

    fn draw_flow(
        &self,
        params: &JsonNode,
        context: &mut RenderContext,
        surface: &mut dyn PageSurface,
    ) -> Result<()> {
        let mut flow = PageFlow::new(self.content_frame());
        for block in &self.layout.blocks {
            block.render(params, &mut flow, context)?;
        }
        flow.draw(surface)
    }
}

/// Renders each entry of the job's `pages` array onto its own surface.
pub fn render_job<S>(layout: &LayoutConfig, context: &mut RenderContext) -> Result<Vec<S>>
where
    S: PageSurface + Default,
{
    let job = context.job().clone();
    let pages = JsonNode::root(&job)?.get_array("pages")?;
    let page = Page::new(layout);

    let mut surfaces = Vec::with_capacity(pages.len());
    for params in pages.objects() {
        let params = params?;
        let mut surface = S::default();
        page.render(&params, context, &mut surface)?;
        surfaces.push(surface);
    }
    log::info!(
        "rendered {} page(s) with layout '{}'",
        surfaces.len(),
        layout.name
    );
    Ok(surfaces)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::PrintConfig;
    use crate::rendering::surface::{DrawCommand, RecordingSurface};
    use serde_json::json;
    use std::sync::Arc;

    fn config() -> PrintConfig {
        PrintConfig::from_json_str(
            r##"{
                "dpis": [72, 150],
                "layouts": [{
                    "name": "A4",
                    "size": [600, 800],
                    "margin": 50,
                    "blocks": [
                        { "type": "map", "width": 300, "height": 200,
                          "absoluteX": 10, "absoluteY": 790, "backgroundColor": "#ff0000" },
                        { "type": "map", "width": 400, "height": 300, "backgroundColor": "#ffffff" }
                    ]
                }]
            }"##,
        )
        .unwrap()
    }

    #[test]
    fn test_content_frame_respects_margin() {
        let config = config();
        let page = Page::new(config.layout("A4").unwrap());
        assert_eq!(page.content_frame(), Rect::new(50.0, 50.0, 500.0, 700.0));
    }

    #[test]
    fn test_pinned_blocks_draw_after_flow() {
        let config = Arc::new(config());
        let job = json!({
            "units": "m", "dpi": 72,
            "pages": [{ "center": [0, 0], "scale": 25000 }]
        });
        let mut ctx = RenderContext::new(config.clone(), job).unwrap();
        let pages: Vec<RecordingSurface> =
            render_job(config.layout("A4").unwrap(), &mut ctx).unwrap();

        assert_eq!(pages.len(), 1);
        let fills: Vec<_> = pages[0]
            .commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::FillRect { rect, color } => Some((*rect, *color)),
                _ => None,
            })
            .collect();
        assert_eq!(
            fills,
            vec![
                (Rect::new(50.0, 450.0, 400.0, 300.0), crate::core::color::Color::WHITE),
                (Rect::new(10.0, 590.0, 300.0, 200.0), crate::core::color::Color::RED),
            ]
        );
        assert!(ctx.overlays().is_empty());
    }

    #[test]
    fn test_failed_page_leaves_no_pinned_drawers() {
        let config = Arc::new(
            PrintConfig::from_json_str(
                r##"{
                    "dpis": [72],
                    "layouts": [{
                        "name": "A4",
                        "blocks": [
                            { "type": "map", "absoluteX": 10, "absoluteY": 790 },
                            { "type": "map", "backgroundColor": "${tint}" }
                        ]
                    }]
                }"##,
            )
            .unwrap(),
        );
        let job = json!({
            "units": "m", "dpi": 72,
            "pages": [{ "center": [0, 0], "scale": 25000 }]
        });
        let mut ctx = RenderContext::new(config.clone(), job).unwrap();
        let job = ctx.job().clone();
        let params = JsonNode::root(&job)
            .unwrap()
            .get_array("pages")
            .unwrap()
            .get_object(0)
            .unwrap();

        let page = Page::new(config.layout("A4").unwrap());
        let mut surface = RecordingSurface::new();
        let result = page.render(&params, &mut ctx, &mut surface);
        assert!(matches!(result, Err(crate::PrintError::MissingField { .. })));
        assert!(ctx.overlays().is_empty());
        assert!(surface.commands.is_empty());
    }

    #[test]
    fn test_job_without_pages_fails() {
        let config = Arc::new(config());
        let job = json!({ "units": "m", "dpi": 72 });
        let mut ctx = RenderContext::new(config.clone(), job).unwrap();
        let result: Result<Vec<RecordingSurface>> =
            render_job(config.layout("A4").unwrap(), &mut ctx);
        assert!(result.is_err());
    }
}
