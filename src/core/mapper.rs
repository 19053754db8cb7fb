use crate::core::types::PlotRect;
use crate::core::viewport::Viewport;

/// Value returned by `to_value` when the axis has no pixel extent yet.
///
/// Status readouts keep showing a stable harmless value instead of the chart
/// crashing on a division by zero before the first layout pass.
pub const DEGENERATE_SENTINEL: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisDirection {
    /// Larger data values map to larger pixel coordinates.
    Forward,
    /// Larger data values map to smaller pixel coordinates.
    ///
    /// Screen Y axes grow downward, and the bifurcation X axis plots the
    /// largest key on the left, so both use this direction.
    Inverted,
}

/// Bidirectional linear transform between one data axis and pixel space.
///
/// Stateless given the current viewport range and plotting rectangle; every
/// chart variant builds its mappers fresh each draw call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisMapper {
    origin_px: f64,
    extent_px: f64,
    min: f64,
    max: f64,
    direction: AxisDirection,
}

impl AxisMapper {
    #[must_use]
    pub fn new(origin_px: f64, extent_px: f64, min: f64, max: f64, direction: AxisDirection) -> Self {
        Self {
            origin_px,
            extent_px,
            min,
            max,
            direction,
        }
    }

    /// Mapper for a chart's horizontal axis over the viewport X range.
    #[must_use]
    pub fn horizontal(plot: PlotRect, viewport: Viewport, direction: AxisDirection) -> Self {
        Self::new(
            plot.left,
            plot.width,
            viewport.x_min(),
            viewport.x_max(),
            direction,
        )
    }

    /// Mapper for a chart's vertical axis over the viewport Y range.
    ///
    /// Always inverted: the largest data value sits at the top of the plot.
    #[must_use]
    pub fn vertical(plot: PlotRect, viewport: Viewport) -> Self {
        Self::new(
            plot.top,
            plot.height,
            viewport.y_min(),
            viewport.y_max(),
            AxisDirection::Inverted,
        )
    }

    #[must_use]
    pub fn to_pixel(self, value: f64) -> f64 {
        let span = self.max - self.min;
        let normalized = match self.direction {
            AxisDirection::Forward => (value - self.min) / span,
            AxisDirection::Inverted => (self.max - value) / span,
        };
        self.origin_px + normalized * self.extent_px
    }

    #[must_use]
    pub fn to_value(self, pixel: f64) -> f64 {
        if self.extent_px == 0.0 {
            return DEGENERATE_SENTINEL;
        }

        let span = self.max - self.min;
        let normalized = (pixel - self.origin_px) / self.extent_px;
        match self.direction {
            AxisDirection::Forward => self.min + normalized * span,
            AxisDirection::Inverted => self.max - normalized * span,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AxisDirection, AxisMapper, DEGENERATE_SENTINEL};
    use crate::core::types::PlotRect;
    use crate::core::viewport::Viewport;
    use approx::assert_abs_diff_eq;

    #[test]
    fn forward_mapping_round_trips() {
        let plot = PlotRect::new(20.0, 45.0, 600.0, 400.0);
        let viewport = Viewport::new(0.0, 1024.0, 0.0, 1024.0).expect("valid viewport");
        let mapper = AxisMapper::horizontal(plot, viewport, AxisDirection::Forward);

        let px = mapper.to_pixel(512.0);
        assert_abs_diff_eq!(px, 320.0, epsilon = 1e-9);
        assert_abs_diff_eq!(mapper.to_value(px), 512.0, epsilon = 1e-9);
    }

    #[test]
    fn inverted_mapping_puts_largest_value_at_origin() {
        let plot = PlotRect::new(20.0, 45.0, 800.0, 400.0);
        let viewport = Viewport::new(0.0, 4095.0, 0.0, 1024.0).expect("valid viewport");
        let mapper = AxisMapper::horizontal(plot, viewport, AxisDirection::Inverted);

        assert_abs_diff_eq!(mapper.to_pixel(4095.0), plot.left, epsilon = 1e-9);
        assert_abs_diff_eq!(mapper.to_pixel(0.0), plot.right(), epsilon = 1e-9);
        assert_abs_diff_eq!(mapper.to_value(mapper.to_pixel(1000.0)), 1000.0, epsilon = 1e-9);
    }

    #[test]
    fn vertical_mapper_grows_upward() {
        let plot = PlotRect::new(20.0, 45.0, 600.0, 400.0);
        let viewport = Viewport::new(0.0, 1024.0, 0.0, 1024.0).expect("valid viewport");
        let mapper = AxisMapper::vertical(plot, viewport);

        assert_abs_diff_eq!(mapper.to_pixel(1024.0), plot.top, epsilon = 1e-9);
        assert_abs_diff_eq!(mapper.to_pixel(0.0), plot.bottom(), epsilon = 1e-9);
    }

    #[test]
    fn zero_extent_returns_sentinel() {
        let mapper = AxisMapper::new(0.0, 0.0, 0.0, 1024.0, AxisDirection::Forward);
        assert_eq!(mapper.to_value(37.0), DEGENERATE_SENTINEL);
    }
}
