use std::path::PathBuf;

use tracing::debug;

use crate::chart::plot_frame::{Gutters, PlotFrame};
use crate::chart::providers::{MDAC_MAX, PeakProvider, TickContext};
use crate::chart::present;
use crate::core::{
    AxisDirection, AxisMapper, BifXAxisMode, FrameSettings, PixelPoint, PixelSize, Viewport,
};
use crate::error::PlotResult;
use crate::interaction::ZoomGuards;
use crate::render::{FrameEncoder, LinePrimitive, PointPrimitive, RenderFrame, Renderer, palette};

/// Retained layer of every peak drawn so far, valid for one pixel size.
/// Composited under the marker on each presented frame.
#[derive(Debug)]
struct CachedLayer {
    frame: RenderFrame,
    size: PixelSize,
}

/// Incremental rendering state for the bifurcation diagram.
///
/// While the layer is clean, a draw only composites it and fetches at most a
/// budgeted handful of missing keys; a dirty flag or a size change forces one
/// full rebuild sweep before incremental extension resumes.
#[derive(Debug)]
struct BifurcationCache {
    layer: Option<CachedLayer>,
    dirty: bool,
    last_requested_key: Option<u16>,
}

impl BifurcationCache {
    fn new() -> Self {
        Self {
            layer: None,
            dirty: true,
            last_requested_key: None,
        }
    }

    fn rebuild_required(&self, size: PixelSize) -> bool {
        match &self.layer {
            // A stale layer size always forces a rebuild, dirty or not.
            Some(layer) => self.dirty || layer.size != size,
            None => true,
        }
    }
}

/// Bifurcation diagram: detected peaks against the swept MDAC value.
///
/// Wraps the shared [`PlotFrame`] protocol with the dual-level cache: the
/// retained layer below, and the upstream bounded peak cache it budgets its
/// miss fetches against.
#[derive(Debug)]
pub struct BifurcationChart {
    frame: PlotFrame,
    cache: BifurcationCache,
    paused: bool,
}

impl Default for BifurcationChart {
    fn default() -> Self {
        Self::new()
    }
}

impl BifurcationChart {
    #[must_use]
    pub fn new() -> Self {
        Self {
            frame: PlotFrame::with_guards(
                default_viewport(),
                Gutters::new(20.0, 30.0),
                false,
                true,
                ZoomGuards::BIFURCATION,
            ),
            cache: BifurcationCache::new(),
            paused: false,
        }
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.frame.viewport()
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Stops miss fetches; cached keys continue to composite.
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Forces the next draw to run a full rebuild sweep.
    pub fn invalidate_cache(&mut self) {
        self.cache.dirty = true;
    }

    /// Last MDAC key whose peaks were requested on a cache miss, exposed so
    /// the host can steer the live device toward it.
    #[must_use]
    pub fn last_requested_key(&self) -> Option<u16> {
        self.cache.last_requested_key
    }

    pub fn reset_zoom(&mut self) {
        self.frame.set_viewport(default_viewport());
        self.cache.dirty = true;
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

    /// Ends a drag; a committed zoom replaces the viewport and dirties the
    /// cache. Returns `true` when the viewport changed.
    pub fn on_pointer_up(&mut self, position: PixelPoint) -> bool {
        let (x, y) = self.mappers();
        let viewport = self.frame.viewport();
        match self.frame.zoom_mut().on_pointer_up(position, x, y, viewport) {
            Some(zoomed) => {
                self.frame.set_viewport(zoomed);
                self.cache.dirty = true;
                true
            }
            None => false,
        }
    }

    /// Data-space coordinates under a pixel: `(mdac key, adc counts)`.
    #[must_use]
    pub fn value_at(&self, position: PixelPoint) -> (f64, f64) {
        let (x, y) = self.mappers();
        (x.to_value(position.x), y.to_value(position.y))
    }

    /// Runs one draw cycle.
    ///
    /// Decides full-rebuild vs. incremental extension, sweeps the visible
    /// key domain under the per-frame fetch budget, composites the retained
    /// layer, and draws the current-key marker on top.
    pub fn draw<R, P>(
        &mut self,
        renderer: &mut R,
        provider: &mut P,
        tick: &TickContext,
        settings: &FrameSettings,
    ) -> PlotResult<()>
    where
        R: Renderer + FrameEncoder,
        P: PeakProvider + ?Sized,
    {
        let (title, subtitle) = self.titles(settings);
        self.frame.start_draw(tick.size, &title, &subtitle)?;
        self.draw_axes(provider, settings)?;

        let rebuild = self.cache.rebuild_required(tick.size);
        if rebuild && !tick.connected {
            // Axes-only frame; the rebuild requirement survives until a
            // sweep completes with the source connected.
            let output = self.frame.end_draw();
            return present(renderer, output);
        }

        let plot = self.frame.plot_rect();
        let viewport = self.frame.viewport();
        let (x_mapper, y_mapper) = self.mappers();

        // Base layer for this frame: empty on rebuild, the retained layer
        // otherwise. Replacement is wholesale; no partially rebuilt layer is
        // ever observable.
        let mut layer = if rebuild {
            debug!(width = tick.size.width, height = tick.size.height, "bifurcation rebuild");
            RenderFrame::new(tick.size)
        } else {
            match self.cache.layer.take() {
                Some(cached) => cached.frame,
                None => RenderFrame::new(tick.size),
            }
        };

        if tick.connected {
            let mut budget = if self.paused || tick.paused {
                0
            } else {
                tick.fetch_budget
            };
            let mut fetches: u32 = 0;

            let step_px = ((plot.width / f64::from(settings.steps_per_window)) as usize).max(1);
            let key_stride = ((viewport.x_span() / f64::from(settings.steps_per_window)) as i64).max(1);

            let mut px = 1usize;
            while (px as f64) < plot.width {
                let key = quantize_key(
                    viewport.x_max() - viewport.x_span() * (px as f64 / plot.width),
                    key_stride,
                );
                let hit = provider.peaks_cache_hit(key);

                let draw_now = (rebuild && hit) || (!hit && budget > 0);
                if draw_now {
                    if !hit {
                        if fetches == 0 {
                            // Collateral upstream work pauses for the burst
                            // of synchronous miss fetches.
                            provider.set_background_work_enabled(false);
                        }
                        budget -= 1;
                        fetches += 1;
                        self.cache.last_requested_key = Some(key);
                    }

                    let peaks = match provider.fetch_peaks(key) {
                        Ok(peaks) => peaks,
                        Err(err) => {
                            if fetches > 0 {
                                provider.set_background_work_enabled(true);
                            }
                            return Err(err);
                        }
                    };

                    let x_px = x_mapper.to_pixel(f64::from(key));
                    for peak in peaks.iter().take(settings.peaks_per_key) {
                        let y_px = y_mapper.to_pixel(f64::from(*peak));
                        if y_px > plot.top && y_px < plot.bottom() {
                            layer.push_point(PointPrimitive::new(
                                x_px,
                                y_px,
                                settings.point_size.radius(),
                                palette::SERIES_BLUE,
                            ));
                        }
                    }
                }

                px += step_px;
            }

            if fetches > 0 {
                provider.set_background_work_enabled(true);
            }

            if rebuild {
                self.cache.dirty = false;
            }
        }

        // Blit the layer under the marker; axes and titles were drawn fresh
        // by start_draw, so settings changes show up without a rebuild.
        self.frame.frame_mut().composite(&layer);
        self.cache.layer = Some(CachedLayer {
            frame: layer,
            size: tick.size,
        });

        if tick.connected {
            let marker_x = x_mapper.to_pixel(f64::from(tick.current_key));
            self.frame.frame_mut().push_line(LinePrimitive::new(
                marker_x,
                plot.top,
                marker_x,
                plot.bottom(),
                1.0,
                palette::SERIES_RED,
            ));
        }

        let output = self.frame.end_draw();
        present(renderer, output)
    }

    fn titles(&self, settings: &FrameSettings) -> (String, String) {
        let x_axis = match settings.bif_x_axis {
            BifXAxisMode::MdacValues => "Mdac values",
            BifXAxisMode::ResistanceValues => "Resistance (Ohms)",
        };
        let unit = settings.y_axis_units.suffix();
        (
            "Bifurcation Plot".to_owned(),
            format!("Peaks ({unit}) vs. {x_axis}"),
        )
    }

    fn draw_axes<P>(&mut self, provider: &P, settings: &FrameSettings) -> PlotResult<()>
    where
        P: PeakProvider + ?Sized,
    {
        let viewport = self.frame.viewport();
        let units = settings.y_axis_units;
        let (y_min, y_max) = (
            units.to_display(viewport.y_min()),
            units.to_display(viewport.y_max()),
        );
        self.frame.draw_y_axis(y_min, y_max, (y_max - y_min) / 4.0)?;

        match settings.bif_x_axis {
            BifXAxisMode::MdacValues => {
                // Largest key on the left, so the axis runs descending.
                self.frame.draw_x_axis(
                    viewport.x_max(),
                    viewport.x_min(),
                    -viewport.x_span() / 4.0,
                )
            }
            BifXAxisMode::ResistanceValues => {
                let low = provider.resistance_for_key(clamp_key(viewport.x_max()));
                let high = provider.resistance_for_key(clamp_key(viewport.x_min()));
                self.frame.draw_x_axis(low, high, (high - low) / 4.0)
            }
        }
    }

    fn mappers(&self) -> (AxisMapper, AxisMapper) {
        let plot = self.frame.plot_rect();
        let viewport = self.frame.viewport();
        (
            AxisMapper::horizontal(plot, viewport, AxisDirection::Inverted),
            AxisMapper::vertical(plot, viewport),
        )
    }
}

fn default_viewport() -> Viewport {
    Viewport::from_const(0.0, f64::from(MDAC_MAX), 0.0, 1024.0)
}

/// Quantizes a raw swept position to the key stride and clamps it to the
/// absolute MDAC domain. Zoomed views can reach slightly past the domain
/// edges; clamping keeps axis alignment stable instead of skipping columns.
fn quantize_key(raw: f64, stride: i64) -> u16 {
    let mut key = raw as i64;
    key -= key.rem_euclid(stride);
    key.clamp(0, i64::from(MDAC_MAX)) as u16
}

fn clamp_key(raw: f64) -> u16 {
    (raw as i64).clamp(0, i64::from(MDAC_MAX)) as u16
}

#[cfg(test)]
mod tests {
    use super::quantize_key;

    #[test]
    fn keys_quantize_down_to_stride_multiples() {
        assert_eq!(quantize_key(437.0, 81), 405);
        assert_eq!(quantize_key(405.0, 81), 405);
        assert_eq!(quantize_key(80.9, 81), 0);
    }

    #[test]
    fn keys_clamp_to_mdac_domain() {
        assert_eq!(quantize_key(5000.0, 81), 4050);
        assert_eq!(quantize_key(-3.0, 81), 0);
        assert_eq!(quantize_key(4095.0, 1), 4095);
    }
}
