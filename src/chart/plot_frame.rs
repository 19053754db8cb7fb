use std::path::PathBuf;

use crate::core::{PixelSize, PlotRect, Viewport};
use crate::error::{PlotError, PlotResult};
use crate::interaction::{ZoomController, ZoomGuards};
use crate::render::{
    LinePrimitive, RectPrimitive, RenderFrame, TextHAlign, TextPrimitive, palette,
};

pub const TITLE_FONT_PX: f64 = 12.0;
pub const LABEL_FONT_PX: f64 = 11.0;

/// Vertical space one title line occupies, including leading.
const TITLE_LINE_PX: f64 = 16.0;

/// Reserved pixel margins around the plotting rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gutters {
    pub side: f64,
    pub bottom: f64,
}

impl Gutters {
    #[must_use]
    pub fn new(side: f64, bottom: f64) -> Self {
        Self { side, bottom }
    }
}

/// Composed output of one draw cycle, plus an export request if one was
/// pending when the frame ended.
#[derive(Debug)]
pub struct FrameOutput {
    pub frame: RenderFrame,
    pub export: Option<PathBuf>,
}

/// Shared per-chart drawing protocol: layout, titles, axis rendering, zoom
/// overlay, and deferred export.
///
/// Every variant drives the same cycle: `start_draw`, axis calls, series
/// drawing into `frame_mut`, then `end_draw`.
#[derive(Debug)]
pub struct PlotFrame {
    viewport: Viewport,
    gutters: Gutters,
    square: bool,
    zoomable: bool,
    zoom: ZoomController,
    export_request: Option<PathBuf>,
    plot: PlotRect,
    frame: Option<RenderFrame>,
}

impl PlotFrame {
    #[must_use]
    pub fn new(viewport: Viewport, gutters: Gutters, square: bool, zoomable: bool) -> Self {
        Self::with_guards(viewport, gutters, square, zoomable, ZoomGuards::GENERAL)
    }

    #[must_use]
    pub fn with_guards(
        viewport: Viewport,
        gutters: Gutters,
        square: bool,
        zoomable: bool,
        guards: ZoomGuards,
    ) -> Self {
        Self {
            viewport,
            gutters,
            square,
            zoomable,
            zoom: ZoomController::new(guards),
            export_request: None,
            plot: PlotRect::new(0.0, 0.0, 0.0, 0.0),
            frame: None,
        }
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Plotting rectangle computed by the most recent `start_draw`.
    #[must_use]
    pub fn plot_rect(&self) -> PlotRect {
        self.plot
    }

    #[must_use]
    pub fn is_zoomable(&self) -> bool {
        self.zoomable
    }

    pub fn zoom_mut(&mut self) -> &mut ZoomController {
        &mut self.zoom
    }

    /// Defers an export of the composed frame to the next `end_draw`.
    pub fn request_export(&mut self, path: impl Into<PathBuf>) {
        self.export_request = Some(path.into());
    }

    /// Measures the client area, computes the plotting rectangle, clears the
    /// composed frame, and draws the border and the two title lines.
    pub fn start_draw(&mut self, size: PixelSize, title: &str, subtitle: &str) -> PlotResult<PlotRect> {
        if !size.is_valid() {
            return Err(PlotError::InvalidData(format!(
                "chart size must be non-zero, got {}x{}",
                size.width, size.height
            )));
        }

        let width = f64::from(size.width);
        let height = f64::from(size.height);
        let top_gutter = 2.0 * TITLE_LINE_PX + 5.0;

        let mut plot_width = (width - self.gutters.side).max(0.0);
        let mut plot_height = (height - self.gutters.bottom - top_gutter).max(0.0);
        let mut left = self.gutters.side;

        // Return maps read best at equal horizontal and vertical scale.
        if self.square {
            let extent = plot_width.min(plot_height);
            plot_width = extent;
            plot_height = extent;
            left = (width - extent) / 2.0;
        }

        self.plot = PlotRect::new(left, top_gutter, plot_width, plot_height);

        let mut frame = RenderFrame::new(size);
        frame.push_rect(RectPrimitive::outline(
            self.plot.left,
            self.plot.top,
            self.plot.width,
            self.plot.height + 1.0,
            palette::AXIS,
        ));
        if !title.is_empty() {
            frame.push_text(TextPrimitive::new(
                title,
                width / 2.0,
                2.0,
                TITLE_FONT_PX,
                palette::TITLE,
                TextHAlign::Center,
            ));
        }
        if !subtitle.is_empty() {
            frame.push_text(TextPrimitive::new(
                subtitle,
                width / 2.0,
                4.0 + TITLE_LINE_PX,
                TITLE_FONT_PX,
                palette::TITLE,
                TextHAlign::Center,
            ));
        }

        self.frame = Some(frame);
        Ok(self.plot)
    }

    /// Frame being composed between `start_draw` and `end_draw`.
    pub fn frame_mut(&mut self) -> &mut RenderFrame {
        self.frame.get_or_insert_with(|| RenderFrame::new(PixelSize::new(1, 1)))
    }

    /// Draws grid lines and labels along the vertical axis.
    ///
    /// Labels run `start + i * interval`; positions advance upward from the
    /// plot floor by even steps.
    pub fn draw_y_axis(&mut self, start: f64, end: f64, interval: f64) -> PlotResult<()> {
        let plot = self.plot;
        let scale = plot.height / (end - start).abs();
        let frame = self.frame_mut();

        for (value, offset) in axis_stops(start, end, interval)? {
            let y = plot.bottom() - scale * offset;
            frame.push_text(TextPrimitive::new(
                format_axis_label(value, interval),
                plot.left - 6.0,
                y - LABEL_FONT_PX / 2.0,
                LABEL_FONT_PX,
                palette::TITLE,
                TextHAlign::Right,
            ));
            frame.push_line(LinePrimitive::new(
                plot.left - 5.0,
                y,
                plot.right(),
                y,
                1.0,
                palette::AXIS,
            ));
        }
        Ok(())
    }

    /// Draws grid lines and labels along the horizontal axis.
    ///
    /// A negative interval labels the axis in descending order left to
    /// right, which the bifurcation diagram uses.
    pub fn draw_x_axis(&mut self, start: f64, end: f64, interval: f64) -> PlotResult<()> {
        let plot = self.plot;
        let scale = plot.width / (end - start).abs();
        let frame = self.frame_mut();

        for (value, offset) in axis_stops(start, end, interval)? {
            let x = plot.left + scale * offset;
            frame.push_text(TextPrimitive::new(
                format_axis_label(value, interval),
                x,
                plot.bottom() + 5.0,
                LABEL_FONT_PX,
                palette::TITLE,
                TextHAlign::Center,
            ));
            frame.push_line(LinePrimitive::new(
                x,
                plot.bottom() + 5.0,
                x,
                plot.top,
                1.0,
                palette::AXIS,
            ));
        }
        Ok(())
    }

    /// Finishes the cycle: zoom overlay, then hands the composed frame and
    /// any pending export request back to the caller.
    pub fn end_draw(&mut self) -> FrameOutput {
        let mut frame = self
            .frame
            .take()
            .unwrap_or_else(|| RenderFrame::new(PixelSize::new(1, 1)));

        if self.zoomable
            && let Some((start, current)) = self.zoom.selection()
        {
            frame.push_rect(RectPrimitive {
                x: start.x.min(current.x),
                y: start.y.min(current.y),
                width: (current.x - start.x).abs(),
                height: (current.y - start.y).abs(),
                fill_color: palette::ZOOM_BOX,
                border_color: palette::SERIES_GREEN,
                border_width: 1.0,
            });
        }

        FrameOutput {
            frame,
            export: self.export_request.take(),
        }
    }
}

/// Grid stops for one axis: `(label value, data offset from the start edge)`.
fn axis_stops(start: f64, end: f64, interval: f64) -> PlotResult<Vec<(f64, f64)>> {
    let span = (end - start).abs();
    if !span.is_finite() || span == 0.0 || !interval.is_finite() || interval == 0.0 {
        return Err(PlotError::InvalidData(format!(
            "axis range [{start}, {end}] with interval {interval} is not drawable"
        )));
    }

    // Epsilon keeps float noise from conjuring an extra stop when the
    // interval divides the span exactly.
    let count = (span / interval.abs() - 1e-9).ceil() as usize + 1;
    Ok((0..count)
        .map(|i| {
            let i = i as f64;
            (start + i * interval, i * interval.abs())
        })
        .collect())
}

/// Axis label text: one decimal place for small fractional intervals,
/// integer formatting otherwise.
#[must_use]
pub fn format_axis_label(value: f64, interval: f64) -> String {
    let fractional = (interval - interval.trunc()).abs() > 0.05;
    if fractional && interval.trunc().abs() < 2.0 {
        format!("{value:.1}")
    } else {
        format!("{}", value as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::{FrameOutput, Gutters, PlotFrame, format_axis_label};
    use crate::core::{PixelPoint, PixelSize, Viewport};

    fn frame() -> PlotFrame {
        let viewport = Viewport::new(0.0, 1024.0, 0.0, 1024.0).expect("valid viewport");
        PlotFrame::new(viewport, Gutters::new(20.0, 20.0), false, true)
    }

    #[test]
    fn start_draw_reserves_gutters() {
        let mut plot_frame = frame();
        let plot = plot_frame
            .start_draw(PixelSize::new(640, 480), "Phase Portrait", "-X' (V) vs. X (V)")
            .expect("layout");

        assert_eq!(plot.left, 20.0);
        assert_eq!(plot.top, 37.0);
        assert_eq!(plot.width, 620.0);
        assert_eq!(plot.height, 480.0 - 20.0 - 37.0);
    }

    #[test]
    fn square_layout_centers_plot() {
        let viewport = Viewport::new(0.0, 1024.0, 0.0, 1024.0).expect("valid viewport");
        let mut plot_frame = PlotFrame::new(viewport, Gutters::new(15.0, 20.0), true, true);
        let plot = plot_frame
            .start_draw(PixelSize::new(800, 400), "Return Map", "")
            .expect("layout");

        assert_eq!(plot.width, plot.height);
        assert_eq!(plot.left, (800.0 - plot.width) / 2.0);
    }

    #[test]
    fn axis_draws_expected_grid_line_count() {
        let mut plot_frame = frame();
        plot_frame
            .start_draw(PixelSize::new(640, 480), "t", "s")
            .expect("layout");
        let before = plot_frame.frame_mut().lines.len();
        plot_frame.draw_y_axis(0.0, 1024.0, 256.0).expect("y axis");
        let after = plot_frame.frame_mut().lines.len();

        // 1024 / 256 = 4 intervals -> 5 grid lines.
        assert_eq!(after - before, 5);
    }

    #[test]
    fn fractional_interval_uses_one_decimal() {
        assert_eq!(format_axis_label(0.55, 0.55), "0.6");
        assert_eq!(format_axis_label(2.75, 0.55), "2.8");
    }

    #[test]
    fn integer_interval_uses_integer_labels() {
        assert_eq!(format_axis_label(341.0, 341.0), "341");
        assert_eq!(format_axis_label(-256.0, -256.0), "-256");
        // Fractional but large intervals still label as integers.
        assert_eq!(format_axis_label(1200.5, 1200.5), "1200");
    }

    #[test]
    fn zoom_overlay_is_drawn_only_while_dragging() {
        let mut plot_frame = frame();
        plot_frame
            .start_draw(PixelSize::new(640, 480), "t", "s")
            .expect("layout");
        let FrameOutput { frame: quiet, .. } = plot_frame.end_draw();

        plot_frame
            .start_draw(PixelSize::new(640, 480), "t", "s")
            .expect("layout");
        plot_frame.zoom_mut().on_pointer_down(PixelPoint::new(100.0, 100.0));
        plot_frame.zoom_mut().on_pointer_move(PixelPoint::new(200.0, 180.0));
        let FrameOutput { frame: dragging, .. } = plot_frame.end_draw();

        assert_eq!(dragging.rects.len(), quiet.rects.len() + 1);
    }

    #[test]
    fn export_request_is_taken_exactly_once() {
        let mut plot_frame = frame();
        plot_frame.request_export("/tmp/plot.png");

        plot_frame
            .start_draw(PixelSize::new(640, 480), "t", "s")
            .expect("layout");
        let first = plot_frame.end_draw();
        assert!(first.export.is_some());

        plot_frame
            .start_draw(PixelSize::new(640, 480), "t", "s")
            .expect("layout");
        let second = plot_frame.end_draw();
        assert!(second.export.is_none());
    }
}
