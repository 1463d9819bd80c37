use crate::core::bounds::Bounds;
use crate::core::color::Color;
use crate::rendering::surface::{PageSurface, Rect};
use crate::rendering::transform::{apply, Transformer};
use crate::tiles::layer::TileLayer;
use crate::Result;
use std::sync::Arc;

const OVERVIEW_OUTLINE: Color = Color::RED;
const OVERVIEW_OUTLINE_WIDTH: f64 = 1.0;

/// Draws one map block into whatever rectangle the page gives it
#[derive(Debug, Clone)]
pub struct MapChunkDrawer {
    transformer: Transformer,
    layers: Vec<Arc<TileLayer>>,
    /// Scale multiplier of an overview map
    overview_scale: Option<f64>,
    background: Option<Color>,
}

impl MapChunkDrawer {
    pub fn new(
        transformer: Transformer,
        layers: Vec<Arc<TileLayer>>,
        overview_scale: Option<f64>,
        background: Option<Color>,
    ) -> Self {
        Self {
            transformer,
            layers,
            overview_scale: overview_scale.filter(|scale| scale.is_finite()),
            background,
        }
    }

    pub fn transformer(&self) -> &Transformer {
        &self.transformer
    }

    pub fn is_overview(&self) -> bool {
        self.overview_scale.is_some()
    }

    pub fn render(&self, rect: Rect, surface: &mut dyn PageSurface) -> Result<()> {
        if let Some(color) = self.background {
            surface.fill_rect(rect, color)?;
        }
        surface.clip_rect(rect)?;

        let view = match self.overview_scale {
            Some(factor) => self.transformer.with_scale_factor(factor)?,
            None => self.transformer.clone(),
        };
        let to_page = view.geo_to_page(&rect);
        let target_resolution = view.resolution();
        let view_box = view.rotated_geo_bounds();

        for layer in &self.layers {
            // one resolution per layer and render
            let resolution = layer.catalog().nearest_resolution(target_resolution);
            let tiles = layer.tiles_for(&view_box, resolution);
            if tiles.is_empty() {
                log::debug!("layer {} has no tile covering the map", layer.name());
                continue;
            }
            log::debug!(
                "layer {}: {} tile(s) at {}",
                layer.name(),
                tiles.len(),
                resolution
            );
            for tile in &tiles {
                let corners = tile.bounds.corners().map(|corner| apply(&to_page, &corner));
                surface.draw_tile(tile, corners)?;
            }
        }

        if self.is_overview() {
            let outline = self
                .transformer
                .geo_polygon()
                .map(|corner| apply(&to_page, &corner));
            surface.stroke_polygon(&outline, OVERVIEW_OUTLINE, OVERVIEW_OUTLINE_WIDTH)?;
        }
        Ok(())
    }

    /// Map area the drawer asks tiles for
    pub fn requested_extent(&self) -> Result<Bounds> {
        Ok(match self.overview_scale {
            Some(factor) => self.transformer.with_scale_factor(factor)?.rotated_geo_bounds(),
            None => self.transformer.rotated_geo_bounds(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geo::DistanceUnit;
    use crate::rendering::surface::{DrawCommand, RecordingSurface};
    use crate::tiles::catalog::ResolutionCatalog;

    fn transformer() -> Transformer {
        // resolution 1 map unit per pixel, 1270 x 635 units around (1000, 1000)
        Transformer::new(
            1000.0,
            1000.0,
            360.0,
            180.0,
            10_000.0,
            254,
            DistanceUnit::Meter,
            0.0,
        )
        .unwrap()
    }

    fn layer() -> Arc<TileLayer> {
        let catalog = ResolutionCatalog::new(
            vec![8.0, 4.0, 2.0, 0.5],
            256,
            256,
            Bounds::from_coords(0.0, 0.0, 4096.0, 4096.0),
            "png",
        )
        .unwrap();
        Arc::new(TileLayer::new("http://tiles", "base", catalog).unwrap())
    }

    #[test]
    fn test_render_picks_resolution_and_tiles() {
        let drawer = MapChunkDrawer::new(transformer(), vec![layer()], None, Some(Color::WHITE));
        let rect = Rect::new(0.0, 0.0, 360.0, 180.0);
        let mut surface = RecordingSurface::new();
        drawer.render(rect, &mut surface).unwrap();

        assert_eq!(
            surface.commands[0],
            DrawCommand::FillRect {
                rect,
                color: Color::WHITE
            }
        );
        assert_eq!(surface.commands[1], DrawCommand::Clip { rect });

        // target resolution 1 → catalog picks 0.5 (index 3); tiles span 128 units
        let tiles: Vec<_> = surface.tiles().collect();
        assert!(!tiles.is_empty());
        for tile in &tiles {
            match tile {
                DrawCommand::Tile { resolution, url, .. } => {
                    assert_eq!(*resolution, 0.5);
                    assert!(url.starts_with("http://tiles/base/03/"));
                }
                _ => unreachable!(),
            }
        }
        // 1270 / 128 → columns 2..=12, 635 / 128 → rows 5..=10
        assert_eq!(tiles.len(), 11 * 6);
    }

    #[test]
    fn test_render_without_coverage_draws_no_tiles() {
        let far_away = Transformer::new(
            1e6,
            1e6,
            360.0,
            180.0,
            10_000.0,
            254,
            DistanceUnit::Meter,
            0.0,
        )
        .unwrap();
        let drawer = MapChunkDrawer::new(far_away, vec![layer()], None, None);
        let mut surface = RecordingSurface::new();
        drawer
            .render(Rect::new(0.0, 0.0, 360.0, 180.0), &mut surface)
            .unwrap();
        assert_eq!(surface.commands.len(), 1);
        assert_eq!(surface.tiles().count(), 0);
    }

    #[test]
    fn test_overview_zooms_out_and_outlines_main_extent() {
        let drawer = MapChunkDrawer::new(transformer(), vec![layer()], Some(4.0), None);
        assert!(drawer.is_overview());
        let extent = drawer.requested_extent().unwrap();
        assert!((extent.width() - 4.0 * 1270.0).abs() < 1e-6);

        let mut surface = RecordingSurface::new();
        drawer
            .render(Rect::new(0.0, 0.0, 360.0, 180.0), &mut surface)
            .unwrap();
        match surface.commands.last() {
            Some(DrawCommand::Polygon { points, color, .. }) => {
                assert_eq!(*color, Color::RED);
                // main extent is a quarter of the overview box, centred
                assert!((points[0].x - 135.0).abs() < 1e-6);
                assert!((points[0].y - 67.5).abs() < 1e-6);
                assert!((points[2].x - 225.0).abs() < 1e-6);
                assert!((points[2].y - 112.5).abs() < 1e-6);
            }
            other => panic!("expected an outline, got {:?}", other),
        }
    }

    #[test]
    fn test_nan_overview_scale_is_primary() {
        let drawer = MapChunkDrawer::new(transformer(), vec![], Some(f64::NAN), None);
        assert!(!drawer.is_overview());
    }
}
