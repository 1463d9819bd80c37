pub mod context;
pub mod drawer;
pub mod overlay;
pub mod surface;
pub mod transform;

// Re-export main types
pub use context::RenderContext;
pub use drawer::MapChunkDrawer;
pub use overlay::PageOverlays;
pub use surface::{DrawCommand, PageSurface, RecordingSurface, Rect};
pub use transform::Transformer;
