//! Page layout
//!
//! - blocks and their configuration
//! - flowing placement down a page frame
//! - map blocks, pinned or flowing
//! - page rendering order

pub mod block;
pub mod flow;
pub mod map_block;
pub mod page;

pub use block::{Align, Block, SpacerBlock};
pub use flow::{FlowTarget, PageFlow, Placeholder};
pub use map_block::{ClientConfig, MapBlock};
pub use page::{render_job, Page};
