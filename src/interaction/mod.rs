use tracing::debug;

use crate::core::{AxisMapper, PixelPoint, Viewport};

/// Minimum pointer travel, in pixels, before a drag counts as a zoom.
pub const MIN_DRAG_PX: f64 = 10.0;

/// Per-axis lower bounds on the data span a zoom commit may produce.
///
/// An axis whose selection would end up narrower than its guard keeps its
/// current range, so runaway zoom-ins cannot collapse the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomGuards {
    pub x_min_span: f64,
    pub y_min_span: f64,
}

impl ZoomGuards {
    /// Guard used by every chart except the bifurcation diagram.
    pub const GENERAL: Self = Self {
        x_min_span: 25.0,
        y_min_span: 25.0,
    };

    /// The bifurcation diagram sweeps thousands of keys, so it tolerates a
    /// coarser minimum span.
    pub const BIFURCATION: Self = Self {
        x_min_span: 50.0,
        y_min_span: 50.0,
    };
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ZoomGesture {
    drag_start: PixelPoint,
    current: PixelPoint,
}

/// Tracks a drag gesture and turns it into a viewport replacement.
///
/// State machine: idle until pointer-down, dragging until pointer-up, then
/// each axis independently commits or keeps its range. Commits are idempotent
/// no-ops when the thresholds are unmet, so no explicit cancel path exists.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomController {
    guards: ZoomGuards,
    gesture: Option<ZoomGesture>,
}

impl ZoomController {
    #[must_use]
    pub fn new(guards: ZoomGuards) -> Self {
        Self {
            guards,
            gesture: None,
        }
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.gesture.is_some()
    }

    /// Current selection rectangle corners while a drag is in progress.
    #[must_use]
    pub fn selection(&self) -> Option<(PixelPoint, PixelPoint)> {
        self.gesture
            .map(|gesture| (gesture.drag_start, gesture.current))
    }

    pub fn on_pointer_down(&mut self, position: PixelPoint) {
        self.gesture = Some(ZoomGesture {
            drag_start: position,
            current: position,
        });
    }

    pub fn on_pointer_move(&mut self, position: PixelPoint) {
        if let Some(gesture) = &mut self.gesture {
            gesture.current = position;
        }
    }

    /// Ends the drag and computes the new viewport, if any axis qualifies.
    ///
    /// Both the pixel delta and the resulting data span must clear their
    /// thresholds, evaluated per axis. Returns `None` when nothing changed.
    pub fn on_pointer_up(
        &mut self,
        position: PixelPoint,
        x_mapper: AxisMapper,
        y_mapper: AxisMapper,
        viewport: Viewport,
    ) -> Option<Viewport> {
        let gesture = self.gesture.take()?;
        let start = gesture.drag_start;

        let mut zoomed = viewport;
        let mut changed = false;

        if (position.x - start.x).abs() > MIN_DRAG_PX {
            let v1 = x_mapper.to_value(start.x.min(position.x));
            let v2 = x_mapper.to_value(start.x.max(position.x));
            let (low, high) = (v1.min(v2), v1.max(v2));
            if high - low > self.guards.x_min_span
                && let Ok(next) = zoomed.with_x_range(low, high)
            {
                zoomed = next;
                changed = true;
            }
        }

        if (position.y - start.y).abs() > MIN_DRAG_PX {
            let v1 = y_mapper.to_value(start.y.min(position.y));
            let v2 = y_mapper.to_value(start.y.max(position.y));
            let (low, high) = (v1.min(v2), v1.max(v2));
            if high - low > self.guards.y_min_span
                && let Ok(next) = zoomed.with_y_range(low, high)
            {
                zoomed = next;
                changed = true;
            }
        }

        if changed {
            debug!(
                x_min = zoomed.x_min(),
                x_max = zoomed.x_max(),
                y_min = zoomed.y_min(),
                y_max = zoomed.y_max(),
                "zoom committed"
            );
            Some(zoomed)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ZoomController, ZoomGuards};
    use crate::core::{AxisDirection, AxisMapper, PixelPoint, PlotRect, Viewport};

    fn mappers(viewport: Viewport) -> (AxisMapper, AxisMapper) {
        let plot = PlotRect::new(20.0, 45.0, 600.0, 400.0);
        (
            AxisMapper::horizontal(plot, viewport, AxisDirection::Forward),
            AxisMapper::vertical(plot, viewport),
        )
    }

    #[test]
    fn short_drag_does_not_commit() {
        let viewport = Viewport::new(0.0, 1024.0, 0.0, 1024.0).expect("valid viewport");
        let (x_mapper, y_mapper) = mappers(viewport);
        let mut zoom = ZoomController::new(ZoomGuards::GENERAL);

        zoom.on_pointer_down(PixelPoint::new(100.0, 100.0));
        zoom.on_pointer_move(PixelPoint::new(105.0, 100.0));
        let result = zoom.on_pointer_up(PixelPoint::new(105.0, 100.0), x_mapper, y_mapper, viewport);

        assert!(result.is_none());
        assert!(!zoom.is_dragging());
    }

    #[test]
    fn narrow_span_keeps_axis_range() {
        // 30 px maps to ~51 data units on a 600 px / 1024 unit axis, but we
        // shrink the viewport so the selection span lands under the guard.
        let viewport = Viewport::new(0.0, 100.0, 0.0, 1024.0).expect("valid viewport");
        let (x_mapper, y_mapper) = mappers(viewport);
        let mut zoom = ZoomController::new(ZoomGuards::GENERAL);

        zoom.on_pointer_down(PixelPoint::new(100.0, 100.0));
        let result = zoom.on_pointer_up(PixelPoint::new(130.0, 100.0), x_mapper, y_mapper, viewport);

        // 30 px over 600 px of a 100-unit domain is a span of 5: under 25.
        assert!(result.is_none());
    }

    #[test]
    fn qualifying_drag_commits_x_axis_only() {
        let viewport = Viewport::new(0.0, 1024.0, 0.0, 1024.0).expect("valid viewport");
        let (x_mapper, y_mapper) = mappers(viewport);
        let mut zoom = ZoomController::new(ZoomGuards::GENERAL);

        zoom.on_pointer_down(PixelPoint::new(100.0, 100.0));
        let zoomed = zoom
            .on_pointer_up(PixelPoint::new(200.0, 104.0), x_mapper, y_mapper, viewport)
            .expect("x axis qualifies");

        assert!(zoomed.x_span() < viewport.x_span());
        assert_eq!(zoomed.y_min(), viewport.y_min());
        assert_eq!(zoomed.y_max(), viewport.y_max());
    }

    #[test]
    fn committed_span_never_undershoots_guard() {
        let viewport = Viewport::new(0.0, 1024.0, 0.0, 1024.0).expect("valid viewport");
        let (x_mapper, y_mapper) = mappers(viewport);
        let mut zoom = ZoomController::new(ZoomGuards::GENERAL);

        zoom.on_pointer_down(PixelPoint::new(50.0, 60.0));
        if let Some(zoomed) =
            zoom.on_pointer_up(PixelPoint::new(480.0, 420.0), x_mapper, y_mapper, viewport)
        {
            assert!(zoomed.x_span() > ZoomGuards::GENERAL.x_min_span);
            assert!(zoomed.y_span() > ZoomGuards::GENERAL.y_min_span);
        }
    }

    #[test]
    fn pointer_up_without_drag_is_a_no_op() {
        let viewport = Viewport::new(0.0, 1024.0, 0.0, 1024.0).expect("valid viewport");
        let (x_mapper, y_mapper) = mappers(viewport);
        let mut zoom = ZoomController::new(ZoomGuards::GENERAL);

        let result = zoom.on_pointer_up(PixelPoint::new(10.0, 10.0), x_mapper, y_mapper, viewport);
        assert!(result.is_none());
    }
}
