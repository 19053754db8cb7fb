use crate::chart::plot_frame::{Gutters, PlotFrame};
use crate::chart::providers::SeriesProvider;
use crate::chart::{PlotVariant, SeriesContext, VariantLayout};
use crate::core::{AxisUnits, FrameSettings, Viewport};
use crate::error::PlotResult;
use crate::render::{Color, LinePrimitive, palette};

/// Samples shown per sweep when the plot is wide enough.
pub const XT_POINTS: usize = 300;

/// Full-scale ADC range the vertical axis always spans.
const ADC_FULL_SCALE: f64 = 1024.0;

/// Time-series view of the waveform: X, X' and X'' against sample index,
/// starting at the upstream trigger point. Channel visibility is host
/// controlled; the chart is not zoomable.
#[derive(Debug)]
pub struct TimeSeries {
    x1_visible: bool,
    x2_visible: bool,
    x3_visible: bool,
}

impl Default for TimeSeries {
    fn default() -> Self {
        Self {
            x1_visible: true,
            x2_visible: false,
            x3_visible: false,
        }
    }
}

impl TimeSeries {
    pub fn set_x1_visible(&mut self, visible: bool) {
        self.x1_visible = visible;
    }

    pub fn set_x2_visible(&mut self, visible: bool) {
        self.x2_visible = visible;
    }

    pub fn set_x3_visible(&mut self, visible: bool) {
        self.x3_visible = visible;
    }
}

impl PlotVariant for TimeSeries {
    type Source = dyn SeriesProvider;

    fn layout(&self) -> VariantLayout {
        VariantLayout {
            gutters: Gutters::new(15.0, 1.0),
            square: false,
            zoomable: false,
        }
    }

    fn default_viewport(&self) -> Viewport {
        Viewport::from_const(0.0, ADC_FULL_SCALE, 0.0, ADC_FULL_SCALE)
    }

    fn titles(&self, settings: &FrameSettings) -> (String, String) {
        let unit = settings.y_axis_units.suffix();
        (
            "Timegraph of the waveform".to_owned(),
            format!("X ({unit}) vs. T"),
        )
    }

    fn draw_axes(&self, frame: &mut PlotFrame, settings: &FrameSettings) -> PlotResult<()> {
        match settings.y_axis_units {
            AxisUnits::VoltsGround => frame.draw_y_axis(0.0, 3.3, 1.0),
            AxisUnits::VoltsBias => frame.draw_y_axis(-1.2, 2.1, 0.5),
            AxisUnits::Adc => frame.draw_y_axis(0.0, ADC_FULL_SCALE, 341.0),
        }
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

        let plot = ctx.plot;
        let plot_width = (plot.width - 2.0).max(0.0);
        let (points, x_scale) = if plot_width > XT_POINTS as f64 {
            (XT_POINTS, plot_width / XT_POINTS as f64)
        } else {
            (plot_width as usize, 1.0)
        };
        let y_scale = plot.height / ADC_FULL_SCALE;
        let to_y = |adc: f64| plot.bottom() - adc * y_scale;

        let start = source.trigger_index();
        if start >= count {
            return Ok(());
        }

        let channels: [(bool, fn(&crate::chart::SeriesPoint) -> f64, Color); 3] = [
            (self.x1_visible, |p| p.x1, palette::SERIES_RED),
            (self.x2_visible, |p| p.x2, palette::SERIES_BLUE),
            (self.x3_visible, |p| p.x3, palette::SERIES_GREEN),
        ];

        let mut prev = source.point_at(start);
        for i in 1..points {
            let index = start + i;
            if index >= count {
                break;
            }
            let point = source.point_at(index);
            let x_prev = x_scale * (i as f64 - 1.0) + plot.left + 1.0;
            let x_next = x_scale * i as f64 + plot.left + 1.0;

            for (visible, channel, color) in channels {
                if visible {
                    ctx.frame.push_line(LinePrimitive::new(
                        x_prev,
                        to_y(channel(&prev)),
                        x_next,
                        to_y(channel(&point)),
                        2.0,
                        color,
                    ));
                }
            }
            prev = point;
        }
        Ok(())
    }
}
