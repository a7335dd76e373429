//! Whole-trace rendering.
//!
//! Sub-modules:
//! - [`options`]: `RenderOptions`
//! - [`output`]: `RenderedFrame`, `EnhancedTrace`
//! - [`renderer`]: `StackRenderer`

mod options;
mod output;
mod renderer;


pub use options::{DEFAULT_FRAME_PREFIX, DEFAULT_LINE_SEPARATOR, RenderOptions};
pub use output::{EnhancedTrace, RenderedFrame};
pub use renderer::StackRenderer;
