use std::path::{Path, PathBuf};

use crate::error::PlotResult;
use crate::render::{FrameEncoder, RenderFrame, Renderer};

/// No-op renderer used by tests and headless engine usage.
///
/// It still validates frame content so tests can catch invalid geometry before
/// a real backend is introduced. Export requests are counted instead of
/// encoded, which the deferred-export tests rely on.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub last_line_count: usize,
    pub last_point_count: usize,
    pub last_text_count: usize,
    pub encoded_paths: Vec<PathBuf>,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> PlotResult<()> {
        frame.validate()?;
        self.last_line_count = frame.lines.len();
        self.last_point_count = frame.points.len();
        self.last_text_count = frame.texts.len();
        Ok(())
    }
}

impl FrameEncoder for NullRenderer {
    fn encode_frame(&mut self, frame: &RenderFrame, path: &Path) -> PlotResult<()> {
        frame.validate()?;
        self.encoded_paths.push(path.to_path_buf());
        Ok(())
    }
}
