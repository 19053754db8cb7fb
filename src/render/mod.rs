mod frame;
mod null_renderer;
mod primitives;

pub use frame::RenderFrame;
pub use null_renderer::NullRenderer;
pub use primitives::{
    Color, LinePrimitive, PointPrimitive, RectPrimitive, TextHAlign, TextPrimitive, palette,
};

use std::path::Path;

use crate::error::PlotResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized, deterministic `RenderFrame` so
/// drawing code remains isolated from chart domain and interaction logic.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> PlotResult<()>;
}

/// Capability to encode a composed frame to an image file.
///
/// Export is deferred: a chart records the request and the encode runs inside
/// the next draw cycle, exactly once per request.
pub trait FrameEncoder {
    fn encode_frame(&mut self, frame: &RenderFrame, path: &Path) -> PlotResult<()>;
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoRenderStats, CairoRenderer};
