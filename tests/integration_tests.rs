use mapprint::prelude::*;
use serde_json::{json, Value};

/// End-to-end print jobs: configuration, tile layers and page rendering
#[cfg(test)]
mod integration_tests {
    use super::*;

    const CONFIG: &str = r##"{
        "dpis": [72, 150, 254],
        "scales": [5000, 10000, 25000],
        "layouts": [{
            "name": "A4 portrait",
            "size": [600, 800],
            "margin": 50,
            "blocks": [
                { "type": "map", "width": 150, "height": 100, "overviewMap": 4,
                  "absoluteX": 380, "absoluteY": 780 },
                { "type": "map", "width": 200, "height": 100, "spacingAfter": 10,
                  "backgroundColor": "${paper}" },
                { "type": "spacer", "height": 20 }
            ]
        }]
    }"##;

    fn config() -> Arc<PrintConfig> {
        Arc::new(PrintConfig::from_json_str(CONFIG).unwrap())
    }

    fn job(pages: Value) -> Value {
        json!({
            "layout": "A4 portrait",
            "units": "m",
            "dpi": 254,
            "paper": "#ffffff",
            "layers": [{
                "type": "TileCache",
                "baseURL": "http://tiles.example.com",
                "layer": "base",
                "resolutions": "10 3 0.75 0.5",
                "tileSize": [256, 256],
                "maxExtent": [0, 0, 100000, 100000],
                "format": "image/jpg"
            }],
            "pages": pages
        })
    }

    fn render(config: &Arc<PrintConfig>, job: Value) -> Result<Vec<RecordingSurface>> {
        let mut context = RenderContext::new(config.clone(), job)?;
        render_job(config.layout("A4 portrait").unwrap(), &mut context)
    }

    #[test]
    fn test_full_page_rendering() {
        let config = config();
        let pages = render(
            &config,
            job(json!([{ "center": [50000, 50000], "scale": 10000 }])),
        )
        .unwrap();
        assert_eq!(pages.len(), 1);
        let commands = &pages[0].commands;

        // flowing map first: background, clip, tiles
        assert_eq!(
            commands[0],
            DrawCommand::FillRect {
                rect: Rect::new(50.0, 650.0, 200.0, 100.0),
                color: Color::WHITE
            }
        );
        assert_eq!(
            commands[1],
            DrawCommand::Clip {
                rect: Rect::new(50.0, 650.0, 200.0, 100.0)
            }
        );

        // 254 dpi at 1:10000 in meters asks for about one unit per pixel
        let tiles: Vec<_> = pages[0].tiles().collect();
        assert!(!tiles.is_empty());
        for tile in &tiles {
            match tile {
                DrawCommand::Tile { resolution, url, layer, .. } => {
                    assert_eq!(layer, "base");
                    assert!(url.starts_with("http://tiles.example.com/base/"));
                    assert!(url.ends_with(".jpeg"));
                    assert!(*resolution == 0.75 || *resolution == 3.0);
                }
                _ => unreachable!(),
            }
        }

        // pinned overview last, on top of the flow
        assert_eq!(
            pages[0].clips(),
            vec![
                Rect::new(50.0, 650.0, 200.0, 100.0),
                Rect::new(380.0, 680.0, 150.0, 100.0)
            ]
        );
        assert!(matches!(
            commands.last(),
            Some(DrawCommand::Polygon { color, .. }) if *color == Color::RED
        ));
    }

    #[test]
    fn test_overview_uses_coarser_resolution() {
        let config = config();
        let pages = render(
            &config,
            job(json!([{ "center": [50000, 50000], "scale": 10000 }])),
        )
        .unwrap();

        let clip_positions: Vec<usize> = pages[0]
            .commands
            .iter()
            .enumerate()
            .filter(|(_, command)| matches!(command, DrawCommand::Clip { .. }))
            .map(|(index, _)| index)
            .collect();
        let (main, overview) = pages[0].commands.split_at(clip_positions[1]);

        let resolutions = |commands: &[DrawCommand]| -> Vec<f64> {
            commands
                .iter()
                .filter_map(|command| match command {
                    DrawCommand::Tile { resolution, .. } => Some(*resolution),
                    _ => None,
                })
                .collect()
        };
        assert!(resolutions(main).iter().all(|value| *value == 0.75));
        assert!(resolutions(overview).iter().all(|value| *value == 3.0));
        assert!(!resolutions(main).is_empty());
        assert!(!resolutions(overview).is_empty());
    }

    #[test]
    fn test_each_page_gets_its_own_overlays() {
        let config = config();
        let pages = render(
            &config,
            job(json!([
                { "center": [50000, 50000], "scale": 10000 },
                { "center": [20000, 30000], "scale": 25000, "dpi": 150, "rotation": 30 }
            ])),
        )
        .unwrap();
        assert_eq!(pages.len(), 2);
        for page in &pages {
            let outlines = page
                .commands
                .iter()
                .filter(|command| matches!(command, DrawCommand::Polygon { .. }))
                .count();
            assert_eq!(outlines, 1);
            assert_eq!(page.clips().len(), 2);
        }
    }

    #[test]
    fn test_disallowed_dpi_aborts_the_job() {
        let config = config();
        let result = render(
            &config,
            job(json!([{ "center": [50000, 50000], "scale": 10000, "dpi": 96 }])),
        );
        match result {
            Err(PrintError::InvalidValue { field, value }) => {
                assert_eq!(field, "dpi");
                assert_eq!(value, "96");
            }
            other => panic!("unexpected result {:?}", other.map(|pages| pages.len())),
        }
    }

    #[test]
    fn test_tile_outside_catalog_is_skipped() {
        let config = config();
        let pages = render(
            &config,
            job(json!([{ "center": [-50000, -50000], "scale": 10000 }])),
        )
        .unwrap();
        assert_eq!(pages[0].tiles().count(), 0);
        assert_eq!(pages[0].clips().len(), 2);
    }

    #[test]
    fn test_client_info_lists_layouts_and_main_map() {
        let config = config();
        let info = config.client_info();
        assert_eq!(info["dpis"], json!([72, 150, 254]));
        assert_eq!(info["scales"], json!([5000, 10000, 25000]));
        assert_eq!(info["layouts"][0]["name"], "A4 portrait");
        assert_eq!(info["layouts"][0]["map"], json!({ "width": 200, "height": 100 }));

        let layout = config.layout("A4 portrait").unwrap();
        let main = layout.main_map().unwrap();
        assert_eq!(main.client_config(), ClientConfig { width: 200, height: 100 });
    }

    struct FailingSurface;

    impl PageSurface for FailingSurface {
        fn fill_rect(&mut self, _rect: Rect, _color: Color) -> Result<()> {
            Ok(())
        }

        fn clip_rect(&mut self, _rect: Rect) -> Result<()> {
            Ok(())
        }

        fn draw_tile(&mut self, tile: &TileRequest, _corners: [Point; 4]) -> Result<()> {
            Err(PrintError::Render(format!("cannot fetch {}", tile.url)))
        }

        fn stroke_polygon(&mut self, _points: &[Point], _color: Color, _width: f64) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_tile_failure_aborts_the_page() {
        let config = config();
        let mut context = RenderContext::new(
            config.clone(),
            job(json!([{ "center": [50000, 50000], "scale": 10000 }])),
        )
        .unwrap();
        let job = context.job().clone();
        let params = JsonNode::root(&job)
            .unwrap()
            .get_array("pages")
            .unwrap()
            .get_object(0)
            .unwrap();

        let page = Page::new(config.layout("A4 portrait").unwrap());
        let result = page.render(&params, &mut context, &mut FailingSurface);
        assert!(matches!(result, Err(PrintError::Render(_))));
    }
}
