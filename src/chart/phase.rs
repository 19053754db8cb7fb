use crate::chart::plot_frame::{Gutters, PlotFrame};
use crate::chart::providers::SeriesProvider;
use crate::chart::{PlotVariant, SeriesContext, VariantLayout};
use crate::core::{FrameSettings, Viewport};
use crate::error::PlotResult;
use crate::render::{LinePrimitive, palette};

/// XY phase portrait: -X' against X for the current sample window.
#[derive(Debug, Default)]
pub struct PhasePortrait;

impl PlotVariant for PhasePortrait {
    type Source = dyn SeriesProvider;

    fn layout(&self) -> VariantLayout {
        VariantLayout {
            gutters: Gutters::new(20.0, 20.0),
            square: false,
            zoomable: true,
        }
    }

    fn default_viewport(&self) -> Viewport {
        Viewport::from_const(0.0, 1024.0, 0.0, 1024.0)
    }

    fn titles(&self, settings: &FrameSettings) -> (String, String) {
        let unit = settings.y_axis_units.suffix();
        (
            "Phase Portrait".to_owned(),
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
        let (x_min, x_max) = (
            units.to_display(viewport.x_min()),
            units.to_display(viewport.x_max()),
        );

        frame.draw_y_axis(y_min, y_max, (y_max - y_min) / 6.0)?;
        frame.draw_x_axis(x_min, x_max, (x_max - x_min) / 6.0)
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

        let first = source.point_at(0);
        let mut prev = (ctx.x.to_pixel(first.x1), ctx.y.to_pixel(first.x2));

        for i in 1..count {
            let point = source.point_at(i);
            let next = (ctx.x.to_pixel(point.x1), ctx.y.to_pixel(point.x2));
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
}
