use crate::chart::plot_frame::{Gutters, PlotFrame};
use crate::chart::providers::SpectrumProvider;
use crate::chart::{PlotVariant, SeriesContext, VariantLayout};
use crate::core::{FrameSettings, Viewport};
use crate::error::PlotResult;
use crate::render::{LinePrimitive, palette};

/// Frequency bins plotted per frame.
pub const SPECTRUM_BINS: usize = 400;

/// Transform length the upstream spectrum is computed over.
pub const FFT_SIZE: usize = 8192;

/// Acquisition sample rate in hertz.
pub const SAMPLE_RATE_HZ: f64 = 72_000.0;

/// Power spectral density against frequency.
#[derive(Debug, Default)]
pub struct Spectrum;

impl Spectrum {
    /// Highest frequency on the axis given the plotted bin count.
    #[must_use]
    pub fn max_frequency_hz() -> f64 {
        (SPECTRUM_BINS as f64 / (FFT_SIZE as f64 / SAMPLE_RATE_HZ)).floor()
    }
}

impl PlotVariant for Spectrum {
    type Source = dyn SpectrumProvider;

    fn layout(&self) -> VariantLayout {
        VariantLayout {
            gutters: Gutters::new(0.0, 20.0),
            square: false,
            zoomable: false,
        }
    }

    fn default_viewport(&self) -> Viewport {
        Viewport::from_const(0.0, SPECTRUM_BINS as f64, 0.0, 15.0)
    }

    fn titles(&self, _settings: &FrameSettings) -> (String, String) {
        (
            "Fast Fourier transform".to_owned(),
            "Power Spectral Density vs. Frequency (Hz)".to_owned(),
        )
    }

    fn draw_axes(&self, frame: &mut PlotFrame, _settings: &FrameSettings) -> PlotResult<()> {
        frame.draw_x_axis(0.0, Self::max_frequency_hz(), 1200.0)
    }

    fn draw_series(
        &mut self,
        source: &mut Self::Source,
        ctx: &mut SeriesContext<'_>,
    ) -> PlotResult<()> {
        let bins = source.bin_count();
        if bins < 2 {
            return Ok(());
        }

        let plot = ctx.plot;
        let x_scale = plot.width / SPECTRUM_BINS as f64;
        let y_scale = plot.height / 15.0;
        // Magnitudes below the plot floor clamp instead of spilling into the
        // gutter.
        let to_y = |magnitude: f64| (plot.bottom() - magnitude * y_scale).min(plot.bottom());

        // The DC bin is skipped.
        let mut y_prev = to_y(source.magnitude_at(1));
        for i in 0..SPECTRUM_BINS {
            let bin = i + 2;
            if bin >= bins {
                break;
            }
            let y = to_y(source.magnitude_at(bin));
            ctx.frame.push_line(LinePrimitive::new(
                i as f64 * x_scale + plot.left,
                y_prev,
                (i + 1) as f64 * x_scale + plot.left,
                y,
                2.0,
                palette::SERIES_BLUE,
            ));
            y_prev = y;
        }
        Ok(())
    }
}
