use crate::core::color::Color;
use crate::core::geo::Point;
use crate::tiles::layer::TileRequest;
use crate::Result;
use serde::Serialize;

/// Rectangle on the page in points, origin at the lower-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Builds a rectangle from its lower-left and upper-right corners
    pub fn from_corners(llx: f64, lly: f64, urx: f64, ury: f64) -> Self {
        Self::new(llx, lly, urx - llx, ury - lly)
    }

    pub fn top(&self) -> f64 {
        self.y + self.height
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Where drawing ends up: the content stream of one page.
///
/// Implemented by the document writer. Tile fetching and decoding happen behind
/// `draw_tile`; any failure it reports aborts the document.
pub trait PageSurface {
    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<()>;

    /// Restricts the following drawing of the current block to `rect`
    fn clip_rect(&mut self, rect: Rect) -> Result<()>;

    /// Paints one tile; `corners` are the tile corners in page points
    /// (lower-left, lower-right, upper-right, upper-left).
    fn draw_tile(&mut self, tile: &TileRequest, corners: [Point; 4]) -> Result<()>;

    fn stroke_polygon(&mut self, points: &[Point], color: Color, width: f64) -> Result<()>;
}

/// A drawing operation captured by [`RecordingSurface`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum DrawCommand {
    FillRect {
        rect: Rect,
        color: Color,
    },
    Clip {
        rect: Rect,
    },
    Tile {
        layer: String,
        url: String,
        resolution: f64,
        corners: [Point; 4],
    },
    Polygon {
        points: Vec<Point>,
        color: Color,
        width: f64,
    },
}

/// Surface that only remembers what was drawn
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tiles(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|command| matches!(command, DrawCommand::Tile { .. }))
    }

    pub fn clips(&self) -> Vec<Rect> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Clip { rect } => Some(*rect),
                _ => None,
            })
            .collect()
    }
}

impl PageSurface for RecordingSurface {
    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<()> {
        self.commands.push(DrawCommand::FillRect { rect, color });
        Ok(())
    }

    fn clip_rect(&mut self, rect: Rect) -> Result<()> {
        self.commands.push(DrawCommand::Clip { rect });
        Ok(())
    }

    fn draw_tile(&mut self, tile: &TileRequest, corners: [Point; 4]) -> Result<()> {
        self.commands.push(DrawCommand::Tile {
            layer: tile.layer.clone(),
            url: tile.url.clone(),
            resolution: tile.resolution.value,
            corners,
        });
        Ok(())
    }

    fn stroke_polygon(&mut self, points: &[Point], color: Color, width: f64) -> Result<()> {
        self.commands.push(DrawCommand::Polygon {
            points: points.to_vec(),
            color,
            width,
        });
        Ok(())
    }
}
