use std::f64::consts::PI;

use crate::chart::plot_frame::{Gutters, PlotFrame};
use crate::chart::providers::SeriesProvider;
use crate::chart::{PlotVariant, SeriesContext, VariantLayout};
use crate::core::{FrameSettings, Viewport};
use crate::error::PlotResult;
use crate::render::{LinePrimitive, palette};

/// Steps in one full revolution of the projection.
pub const ROTATION_STEPS: u32 = 25;

/// ADC count of the 2 V bias point; the attractor rotates around it instead
/// of orbiting the origin.
const BIAS_COUNTS: f64 = 409.0;

/// Rotating 3D-style projection of the attractor.
///
/// Projects `x*cos(a*t) + x''*sin(a*t)` against -X', with the phase counter
/// advanced by the host scheduler through `tick`.
#[derive(Debug, Default)]
pub struct RotatingPhasePortrait {
    phase: u32,
}

impl RotatingPhasePortrait {
    /// Jumps the rotation to a specific step of the revolution.
    pub fn set_rotation(&mut self, step: u32) {
        self.phase = step;
    }

    #[must_use]
    pub fn rotation(&self) -> u32 {
        self.phase
    }
}

impl PlotVariant for RotatingPhasePortrait {
    type Source = dyn SeriesProvider;

    fn layout(&self) -> VariantLayout {
        VariantLayout {
            gutters: Gutters::new(20.0, 0.0),
            square: false,
            zoomable: true,
        }
    }

    fn default_viewport(&self) -> Viewport {
        // The projection swings below zero, so the X range reaches past the
        // ADC domain on the left.
        Viewport::from_const(-218.0, 1024.0, 0.0, 1024.0)
    }

    fn titles(&self, settings: &FrameSettings) -> (String, String) {
        let unit = settings.y_axis_units.suffix();
        (
            "Rotating Phase Portrait".to_owned(),
            format!("-X' ({unit}) vs. X ({unit})"),
        )
    }

    fn draw_axes(&self, frame: &mut PlotFrame, settings: &FrameSettings) -> PlotResult<()> {
        let viewport = frame.viewport();
        let units = settings.y_axis_units;
        let (y_min, y_max) = (
            units.to_display(viewport.y_min()),
            units.to_display(viewport.y_max()),
        );
        frame.draw_y_axis(y_min, y_max, (y_max - y_min) / 4.0)
    }

    fn draw_series(
        &mut self,
        source: &mut Self::Source,
        ctx: &mut SeriesContext<'_>,
    ) -> PlotResult<()> {
        let count = source.point_count();
        if count == 0 {
            return Ok(());
        }

        let angle = 2.0 * PI / f64::from(ROTATION_STEPS) * f64::from(self.phase);
        let (sin, cos) = angle.sin_cos();
        let project = |x1: f64, x3: f64| (x1 - BIAS_COUNTS) * cos + (x3 - BIAS_COUNTS) * sin + BIAS_COUNTS;

        let first = source.point_at(0);
        let mut prev = (
            ctx.x.to_pixel(project(first.x1, first.x3)),
            ctx.y.to_pixel(first.x2),
        );

        for i in 1..count {
            let point = source.point_at(i);
            let next = (
                ctx.x.to_pixel(project(point.x1, point.x3)),
                ctx.y.to_pixel(point.x2),
            );
            if ctx.plot.contains(prev.0, prev.1) && ctx.plot.contains(next.0, next.1) {
                ctx.frame.push_line(LinePrimitive::new(
                    prev.0,
                    prev.1,
                    next.0,
                    next.1,
                    1.0,
                    palette::SERIES_RED,
                ));
            }
            prev = next;
        }
        Ok(())
    }

    fn tick(&mut self) {
        self.phase = self.phase.wrapping_add(1);
    }
}
