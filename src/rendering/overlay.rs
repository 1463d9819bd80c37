use crate::rendering::surface::PageSurface;
use crate::Result;

/// A drawing deferred until the page's flowing content is in place
pub type AbsoluteDrawer = Box<dyn FnOnce(&mut dyn PageSurface) -> Result<()>>;

/// Absolutely positioned drawers registered for the current page.
///
/// Drawers run in registration order when the page is flushed, after every
/// flowing block of that page has been drawn.
#[derive(Default)]
pub struct PageOverlays {
    drawers: Vec<AbsoluteDrawer>,
}

impl PageOverlays {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_absolute_drawer<F>(&mut self, drawer: F)
    where
        F: FnOnce(&mut dyn PageSurface) -> Result<()> + 'static,
    {
        self.drawers.push(Box::new(drawer));
    }

    pub fn len(&self) -> usize {
        self.drawers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drawers.is_empty()
    }

    /// Drops pending drawers without running them
    pub fn clear(&mut self) {
        self.drawers.clear();
    }

    /// Runs and drops every pending drawer; the first failure stops the flush.
    pub fn flush(&mut self, surface: &mut dyn PageSurface) -> Result<()> {
        for drawer in std::mem::take(&mut self.drawers) {
            drawer(surface)?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for PageOverlays {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageOverlays")
            .field("pending", &self.drawers.len())
            .finish()
    }
}
