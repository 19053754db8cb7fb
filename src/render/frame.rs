use crate::core::PixelSize;
use crate::error::{PlotError, PlotResult};
use crate::render::{LinePrimitive, PointPrimitive, RectPrimitive, TextPrimitive};

/// Backend-agnostic composed scene for one chart draw pass.
///
/// Frames are deterministic: identical inputs produce identical primitive
/// lists, which is what the bifurcation idempotence tests assert on.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub size: PixelSize,
    pub lines: Vec<LinePrimitive>,
    pub rects: Vec<RectPrimitive>,
    pub points: Vec<PointPrimitive>,
    pub texts: Vec<TextPrimitive>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(size: PixelSize) -> Self {
        Self {
            size,
            lines: Vec::new(),
            rects: Vec::new(),
            points: Vec::new(),
            texts: Vec::new(),
        }
    }

    pub fn push_line(&mut self, line: LinePrimitive) {
        self.lines.push(line);
    }

    pub fn push_rect(&mut self, rect: RectPrimitive) {
        self.rects.push(rect);
    }

    pub fn push_point(&mut self, point: PointPrimitive) {
        self.points.push(point);
    }

    pub fn push_text(&mut self, text: TextPrimitive) {
        self.texts.push(text);
    }

    /// Appends every primitive of `other` onto this frame.
    ///
    /// This is the compositing step the bifurcation cache uses to blit its
    /// retained layer into the frame being presented.
    pub fn composite(&mut self, other: &RenderFrame) {
        self.lines.extend(other.lines.iter().copied());
        self.rects.extend(other.rects.iter().copied());
        self.points.extend(other.points.iter().copied());
        self.texts.extend(other.texts.iter().cloned());
    }

    pub fn validate(&self) -> PlotResult<()> {
        if !self.size.is_valid() {
            return Err(PlotError::InvalidData(format!(
                "frame size must be non-zero, got {}x{}",
                self.size.width, self.size.height
            )));
        }

        for line in &self.lines {
            line.validate()?;
        }
        for rect in &self.rects {
            rect.validate()?;
        }
        for point in &self.points {
            point.validate()?;
        }
        for text in &self.texts {
            text.validate()?;
        }

        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
            && self.rects.is_empty()
            && self.points.is_empty()
            && self.texts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::RenderFrame;
    use crate::core::PixelSize;
    use crate::render::{Color, LinePrimitive, PointPrimitive};

    #[test]
    fn composite_appends_all_primitive_kinds() {
        let mut base = RenderFrame::new(PixelSize::new(100, 100));
        base.push_line(LinePrimitive::new(
            0.0,
            0.0,
            10.0,
            10.0,
            1.0,
            Color::rgb(0.5, 0.5, 0.5),
        ));

        let mut layer = RenderFrame::new(PixelSize::new(100, 100));
        layer.push_point(PointPrimitive::new(
            5.0,
            5.0,
            Some(2.0),
            Color::rgb(0.1, 0.1, 0.85),
        ));

        base.composite(&layer);
        assert_eq!(base.lines.len(), 1);
        assert_eq!(base.points.len(), 1);
    }

    #[test]
    fn zero_size_frame_fails_validation() {
        let frame = RenderFrame::new(PixelSize::new(0, 50));
        assert!(frame.validate().is_err());
    }
}
