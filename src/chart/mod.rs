//! Chart variants and the shared draw pipeline.
//!
//! Every variant implements [`PlotVariant`] and is driven by the concrete
//! [`Chart`] type; the bifurcation diagram wraps the same protocol with its
//! incremental cache and lives in [`bifurcation`].

pub mod bifurcation;
pub mod phase;
pub mod plot_frame;
pub mod providers;
pub mod return_map;
pub mod rotating;
pub mod spectrum;
pub mod timeseries;

pub use bifurcation::BifurcationChart;
pub use phase::PhasePortrait;
pub use plot_frame::{FrameOutput, Gutters, PlotFrame};
pub use providers::{
    MDAC_MAX, PeakBuffer, PeakProvider, SeriesPoint, SeriesProvider, SpectrumProvider, TickContext,
};
pub use return_map::{FirstReturnMap, SecondReturnMap};
pub use rotating::RotatingPhasePortrait;
pub use spectrum::Spectrum;
pub use timeseries::TimeSeries;

use std::path::PathBuf;

use tracing::{info, warn};

use crate::core::{AxisDirection, AxisMapper, FrameSettings, PixelPoint, PlotRect, Viewport};
use crate::error::PlotResult;
use crate::interaction::ZoomGuards;
use crate::render::{FrameEncoder, RenderFrame, Renderer};

/// Static layout configuration a variant hands to its [`PlotFrame`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VariantLayout {
    pub gutters: Gutters,
    pub square: bool,
    pub zoomable: bool,
}

/// Everything a variant needs while drawing its series for one frame.
pub struct SeriesContext<'a> {
    pub frame: &'a mut RenderFrame,
    pub plot: PlotRect,
    pub viewport: Viewport,
    pub x: AxisMapper,
    pub y: AxisMapper,
    pub settings: &'a FrameSettings,
    pub tick: &'a TickContext,
}

/// Strategy interface implemented once per chart variant.
///
/// Variants configure layout and axes and draw their series; the generic
/// [`Chart`] owns the viewport, zoom gesture, and frame lifecycle.
pub trait PlotVariant {
    /// Data source consumed while drawing, borrowed fresh each frame.
    type Source: ?Sized;

    fn layout(&self) -> VariantLayout;

    fn default_viewport(&self) -> Viewport;

    /// Title and subtitle, resolved against the frame settings so unit
    /// selection changes take effect on the next draw.
    fn titles(&self, settings: &FrameSettings) -> (String, String);

    fn draw_axes(&self, frame: &mut PlotFrame, settings: &FrameSettings) -> PlotResult<()>;

    /// Horizontal mapping direction; the bifurcation diagram inverts it.
    fn x_direction(&self) -> AxisDirection {
        AxisDirection::Forward
    }

    fn draw_series(
        &mut self,
        source: &mut Self::Source,
        ctx: &mut SeriesContext<'_>,
    ) -> PlotResult<()>;

    /// Advances any internal animation phase. Invoked by the host scheduler;
    /// variants without animation ignore it.
    fn tick(&mut self) {}
}

/// Concrete chart: a [`PlotVariant`] composed with the shared frame protocol.
#[derive(Debug)]
pub struct Chart<V: PlotVariant> {
    variant: V,
    frame: PlotFrame,
}

impl<V: PlotVariant> Chart<V> {
    #[must_use]
    pub fn new(variant: V) -> Self {
        let layout = variant.layout();
        let frame = PlotFrame::with_guards(
            variant.default_viewport(),
            layout.gutters,
            layout.square,
            layout.zoomable,
            ZoomGuards::GENERAL,
        );
        Self { variant, frame }
    }

    #[must_use]
    pub fn variant(&self) -> &V {
        &self.variant
    }

    pub fn variant_mut(&mut self) -> &mut V {
        &mut self.variant
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.frame.viewport()
    }

    /// Runs one full draw cycle and presents the composed frame.
    ///
    /// Idempotent per tick: identical inputs produce an identical frame.
    /// A disconnected source degrades to axes and titles only.
    pub fn draw<R: Renderer + FrameEncoder>(
        &mut self,
        renderer: &mut R,
        source: &mut V::Source,
        tick: &TickContext,
        settings: &FrameSettings,
    ) -> PlotResult<()> {
        let (title, subtitle) = self.variant.titles(settings);
        self.frame.start_draw(tick.size, &title, &subtitle)?;
        self.variant.draw_axes(&mut self.frame, settings)?;

        if tick.connected {
            let plot = self.frame.plot_rect();
            let viewport = self.frame.viewport();
            let x = AxisMapper::horizontal(plot, viewport, self.variant.x_direction());
            let y = AxisMapper::vertical(plot, viewport);
            let mut ctx = SeriesContext {
                frame: self.frame.frame_mut(),
                plot,
                viewport,
                x,
                y,
                settings,
                tick,
            };
            self.variant.draw_series(source, &mut ctx)?;
        }

        let output = self.frame.end_draw();
        present(renderer, output)
    }

    pub fn tick(&mut self) {
        self.variant.tick();
    }

    pub fn reset_zoom(&mut self) {
        self.frame.set_viewport(self.variant.default_viewport());
    }

    pub fn request_export(&mut self, path: impl Into<PathBuf>) {
        self.frame.request_export(path);
    }

    pub fn on_pointer_down(&mut self, position: PixelPoint) {
        self.frame.zoom_mut().on_pointer_down(position);
    }

    pub fn on_pointer_move(&mut self, position: PixelPoint) {
        self.frame.zoom_mut().on_pointer_move(position);
    }

    /// Ends a drag; returns `true` when the viewport changed.
    pub fn on_pointer_up(&mut self, position: PixelPoint) -> bool {
        let plot = self.frame.plot_rect();
        let viewport = self.frame.viewport();
        let x = AxisMapper::horizontal(plot, viewport, self.variant.x_direction());
        let y = AxisMapper::vertical(plot, viewport);
        match self.frame.zoom_mut().on_pointer_up(position, x, y, viewport) {
            Some(zoomed) => {
                self.frame.set_viewport(zoomed);
                true
            }
            None => false,
        }
    }

    /// Data-space coordinates under a pixel, for status readouts.
    ///
    /// Returns the degenerate sentinel before the first layout pass.
    #[must_use]
    pub fn value_at(&self, position: PixelPoint) -> (f64, f64) {
        let plot = self.frame.plot_rect();
        let viewport = self.frame.viewport();
        let x = AxisMapper::horizontal(plot, viewport, self.variant.x_direction());
        let y = AxisMapper::vertical(plot, viewport);
        (x.to_value(position.x), y.to_value(position.y))
    }
}

/// Presents a finished frame: renders it, then runs at most one deferred
/// export. Export failures are reported as warnings and never abort the
/// draw cycle.
pub fn present<R: Renderer + FrameEncoder>(
    renderer: &mut R,
    output: FrameOutput,
) -> PlotResult<()> {
    renderer.render(&output.frame)?;
    if let Some(path) = output.export {
        match renderer.encode_frame(&output.frame, &path) {
            Ok(()) => info!(path = %path.display(), "exported chart image"),
            Err(err) => warn!(error = %err, "chart export failed"),
        }
    }
    Ok(())
}
