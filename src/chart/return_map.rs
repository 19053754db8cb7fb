use indexmap::IndexSet;
use ordered_float::OrderedFloat;

use crate::chart::plot_frame::{Gutters, PlotFrame};
use crate::chart::providers::SeriesProvider;
use crate::chart::{PlotVariant, SeriesContext, VariantLayout};
use crate::core::{AxisUnits, FrameSettings, Viewport};
use crate::error::PlotResult;
use crate::render::{LinePrimitive, PointPrimitive, palette};

/// Maximum unique points the second return map retains across frames.
pub const HISTORY_CAPACITY: usize = 600;

/// Upstream point count past which the provider buffer is recycled.
pub const RESET_THRESHOLD: usize = 500;

/// Segments of the follow-the-curve overlay per animation cycle.
const FOLLOW_CYCLE: u32 = 20;

const ADC_FULL_SCALE: f64 = 1024.0;

fn return_map_titles(order: &str, settings: &FrameSettings) -> (String, String) {
    let unit = match settings.y_axis_units {
        AxisUnits::Adc => "ADC",
        _ => "V",
    };
    (
        format!("{order} Return Map"),
        format!(
            "Peak(n+{offset}) ({unit}) vs. Peak(n) ({unit})",
            offset = if order == "First" { 1 } else { 2 }
        ),
    )
}

/// Peak(n+1) against Peak(n), with an optional animated cobweb overlay that
/// walks the map one segment per tick.
#[derive(Debug, Default)]
pub struct FirstReturnMap {
    follow_enabled: bool,
    follow_phase: u32,
}

impl FirstReturnMap {
    /// Toggles the follow-the-curve overlay; disabling resets its phase.
    pub fn toggle_follow(&mut self) {
        if self.follow_enabled {
            self.follow_enabled = false;
            self.follow_phase = 0;
        } else {
            self.follow_enabled = true;
        }
    }

    #[must_use]
    pub fn follow_enabled(&self) -> bool {
        self.follow_enabled
    }
}

impl PlotVariant for FirstReturnMap {
    type Source = dyn SeriesProvider;

    fn layout(&self) -> VariantLayout {
        VariantLayout {
            gutters: Gutters::new(15.0, 20.0),
            square: true,
            zoomable: false,
        }
    }

    fn default_viewport(&self) -> Viewport {
        Viewport::from_const(0.0, ADC_FULL_SCALE, 0.0, ADC_FULL_SCALE)
    }

    fn titles(&self, settings: &FrameSettings) -> (String, String) {
        return_map_titles("First", settings)
    }

    fn draw_axes(&self, frame: &mut PlotFrame, _settings: &FrameSettings) -> PlotResult<()> {
        frame.draw_y_axis(0.0, 3.3, 1.0)?;
        frame.draw_x_axis(0.0, 3.3, 1.0)
    }

    fn draw_series(
        &mut self,
        source: &mut Self::Source,
        ctx: &mut SeriesContext<'_>,
    ) -> PlotResult<()> {
        let plot = ctx.plot;
        let x_scale = plot.width / ADC_FULL_SCALE;
        let y_scale = plot.height / ADC_FULL_SCALE;

        // Identity line, corner to corner; fixed points of the map sit on it.
        ctx.frame.push_line(LinePrimitive::new(
            plot.left,
            plot.bottom(),
            plot.right(),
            plot.top,
            1.0,
            palette::AXIS,
        ));

        for i in 0..source.point_count() {
            let point = source.point_at(i);
            ctx.frame.push_point(PointPrimitive::new(
                point.x1 * x_scale + plot.left,
                plot.bottom() - point.x2 * y_scale,
                ctx.settings.point_size.radius(),
                palette::SERIES_BLUE,
            ));
        }

        if self.follow_enabled {
            let segments = (self.follow_phase % FOLLOW_CYCLE) as usize;
            for i in 0..source.point_count().min(segments) {
                let point = source.point_at(i);
                let x = point.x1 * x_scale;
                let y = point.x2 * y_scale;
                ctx.frame.push_line(LinePrimitive::new(
                    x + plot.left,
                    plot.bottom() - x,
                    x + plot.left,
                    plot.bottom() - y,
                    1.0,
                    palette::SERIES_GREEN,
                ));
                ctx.frame.push_line(LinePrimitive::new(
                    x + plot.left,
                    plot.bottom() - y,
                    y + plot.left,
                    plot.bottom() - y,
                    1.0,
                    palette::SERIES_GREEN,
                ));
            }
        }
        Ok(())
    }

    fn tick(&mut self) {
        if self.follow_enabled {
            self.follow_phase = self.follow_phase.wrapping_add(1);
        }
    }
}

/// Peak(n+2) against Peak(n).
///
/// Keeps a bounded history of unique accepted points across frames so a
/// refreshed upstream series does not replot duplicates; the history is
/// invalidated when the device key or either axis span changes.
#[derive(Debug, Default)]
pub struct SecondReturnMap {
    history: IndexSet<(OrderedFloat<f64>, OrderedFloat<f64>)>,
    last_key: u16,
    last_x_span: f64,
    last_y_span: f64,
}

impl SecondReturnMap {
    #[must_use]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }
}

impl PlotVariant for SecondReturnMap {
    type Source = dyn SeriesProvider;

    fn layout(&self) -> VariantLayout {
        VariantLayout {
            gutters: Gutters::new(15.0, 20.0),
            square: true,
            zoomable: true,
        }
    }

    fn default_viewport(&self) -> Viewport {
        Viewport::from_const(0.0, ADC_FULL_SCALE, 0.0, ADC_FULL_SCALE)
    }

    fn titles(&self, settings: &FrameSettings) -> (String, String) {
        return_map_titles("Second", settings)
    }

    fn draw_axes(&self, frame: &mut PlotFrame, settings: &FrameSettings) -> PlotResult<()> {
        let viewport = frame.viewport();
        let units = settings.y_axis_units;
        let (y_min, y_max) = (
            units.to_display(viewport.y_min()),
            units.to_display(viewport.y_max()),
        );
        let (x_min, x_max) = (
            units.to_display(viewport.x_min()),
            units.to_display(viewport.x_max()),
        );

        frame.draw_y_axis(y_min, y_max, (y_max - y_min) / 3.0)?;
        frame.draw_x_axis(x_min, x_max, (x_max - x_min) / 3.0)
    }

    fn draw_series(
        &mut self,
        source: &mut Self::Source,
        ctx: &mut SeriesContext<'_>,
    ) -> PlotResult<()> {
        let viewport = ctx.viewport;

        if ctx.tick.current_key != self.last_key
            || viewport.x_span() != self.last_x_span
            || viewport.y_span() != self.last_y_span
        {
            self.history.clear();
            self.last_key = ctx.tick.current_key;
            self.last_x_span = viewport.x_span();
            self.last_y_span = viewport.y_span();
        }

        let count = source.point_count();
        for i in 0..count {
            let point = source.point_at(i);
            let inside = point.x1 > viewport.x_min()
                && point.x1 < viewport.x_max()
                && point.x2 > viewport.y_min()
                && point.x2 < viewport.y_max();
            if inside && self.history.len() < HISTORY_CAPACITY {
                self.history
                    .insert((OrderedFloat(point.x1), OrderedFloat(point.x2)));
            }
        }

        if count > RESET_THRESHOLD {
            source.reset_buffer();
        }

        let plot = ctx.plot;
        ctx.frame.push_line(LinePrimitive::new(
            plot.left,
            plot.bottom(),
            plot.right(),
            plot.top,
            1.0,
            palette::AXIS,
        ));

        for (x, y) in &self.history {
            ctx.frame.push_point(PointPrimitive::new(
                ctx.x.to_pixel(x.into_inner()),
                ctx.y.to_pixel(y.into_inner()),
                ctx.settings.point_size.radius(),
                palette::SERIES_BLUE,
            ));
        }
        Ok(())
    }
}
