//! Flowing placement of blocks down a page frame

use crate::layout::block::Align;
use crate::rendering::surface::{PageSurface, Rect};
use crate::Result;

/// Drawing bound to a placeholder, run once the page is drawn
pub type PlaceholderDrawer = Box<dyn FnOnce(Rect, &mut dyn PageSurface) -> Result<()>>;

/// Space reserved in the document flow, optionally filled by a drawer
pub struct Placeholder {
    pub width: f64,
    pub height: f64,
    pub spacing_after: f64,
    pub align: Align,
    drawer: Option<PlaceholderDrawer>,
}

impl Placeholder {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            spacing_after: 0.0,
            align: Align::Left,
            drawer: None,
        }
    }

    pub fn with_spacing_after(mut self, spacing_after: f64) -> Self {
        self.spacing_after = spacing_after;
        self
    }

    pub fn with_align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn with_drawer<F>(mut self, drawer: F) -> Self
    where
        F: FnOnce(Rect, &mut dyn PageSurface) -> Result<()> + 'static,
    {
        self.drawer = Some(Box::new(drawer));
        self
    }

    pub fn has_drawer(&self) -> bool {
        self.drawer.is_some()
    }
}

impl std::fmt::Debug for Placeholder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Placeholder")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("spacing_after", &self.spacing_after)
            .field("align", &self.align)
            .field("has_drawer", &self.has_drawer())
            .finish()
    }
}

/// Anything blocks can be appended to in document order
pub trait FlowTarget {
    fn add_placeholder(&mut self, placeholder: Placeholder) -> Result<()>;
}

/// A page frame filled from the top down.
///
/// A placeholder gets its rectangle as soon as it is added; its drawer runs when
/// the flow is drawn.
pub struct PageFlow {
    frame: Rect,
    cursor_y: f64,
    placed: Vec<(Rect, Option<PlaceholderDrawer>)>,
}

impl PageFlow {
    pub fn new(frame: Rect) -> Self {
        Self {
            frame,
            cursor_y: 0.0,
            placed: Vec::new(),
        }
    }

    pub fn frame(&self) -> Rect {
        self.frame
    }

    pub fn remaining_height(&self) -> f64 {
        (self.frame.height - self.cursor_y).max(0.0)
    }

    /// Rectangles handed out so far, in insertion order
    pub fn placed_rects(&self) -> Vec<Rect> {
        self.placed.iter().map(|(rect, _)| *rect).collect()
    }

    /// Runs every placeholder drawer in document order
    pub fn draw(&mut self, surface: &mut dyn PageSurface) -> Result<()> {
        for (rect, drawer) in std::mem::take(&mut self.placed) {
            if let Some(drawer) = drawer {
                drawer(rect, surface)?;
            }
        }
        Ok(())
    }
}

impl FlowTarget for PageFlow {
    fn add_placeholder(&mut self, placeholder: Placeholder) -> Result<()> {
        if placeholder.height > self.remaining_height() {
            log::warn!(
                "block of height {} overflows the page frame ({} left)",
                placeholder.height,
                self.remaining_height()
            );
        }

        let x = match placeholder.align {
            Align::Left => self.frame.x,
            Align::Center => self.frame.x + (self.frame.width - placeholder.width) / 2.0,
            Align::Right => self.frame.right() - placeholder.width,
        };
        let y = self.frame.top() - self.cursor_y - placeholder.height;
        let rect = Rect::new(x, y, placeholder.width, placeholder.height);

        self.cursor_y += placeholder.height + placeholder.spacing_after;
        self.placed.push((rect, placeholder.drawer));
        Ok(())
    }
}
