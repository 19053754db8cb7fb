use smallvec::SmallVec;

use crate::core::PixelSize;
use crate::error::PlotResult;

/// Absolute MDAC domain of the instrument, inclusive.
pub const MDAC_MAX: u16 = 4095;

/// Peak buffer returned per key; stays inline for typical peak counts.
pub type PeakBuffer = SmallVec<[i32; 16]>;

/// One waveform sample triple: x, x' and x'' in ADC counts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesPoint {
    pub x1: f64,
    pub x2: f64,
    pub x3: f64,
}

impl SeriesPoint {
    #[must_use]
    pub fn new(x1: f64, x2: f64, x3: f64) -> Self {
        Self { x1, x2, x3 }
    }
}

/// Upstream bounded cache of detected waveform peaks, keyed by MDAC value.
///
/// A hit is assumed cheap; a miss triggers acquisition and is expensive,
/// which is why the bifurcation cache budgets miss fetches per frame.
pub trait PeakProvider {
    fn peaks_cache_hit(&self, key: u16) -> bool;

    fn fetch_peaks(&mut self, key: u16) -> PlotResult<PeakBuffer>;

    /// Equivalent circuit resistance for a key, used for ohm-labeled axes.
    fn resistance_for_key(&self, key: u16) -> f64;

    /// Suspends or resumes collateral upstream work (e.g. spectrum math)
    /// around a burst of synchronous miss fetches.
    fn set_background_work_enabled(&mut self, enabled: bool);
}

/// Per-frame sample series for the non-bifurcation charts.
pub trait SeriesProvider {
    fn point_count(&self) -> usize;

    fn point_at(&self, index: usize) -> SeriesPoint;

    /// Index of the trigger sample the time-series display starts from.
    fn trigger_index(&self) -> usize {
        0
    }

    /// Asks the upstream to discard and refill its point buffer.
    fn reset_buffer(&mut self);
}

/// Power-spectrum bins computed upstream.
pub trait SpectrumProvider {
    fn bin_count(&self) -> usize;

    fn magnitude_at(&self, index: usize) -> f64;
}

/// Host-supplied context for one draw tick.
///
/// Passed by value every refresh so charts never read live host state
/// mid-frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickContext {
    pub connected: bool,
    /// Current MDAC position reported by the device.
    pub current_key: u16,
    pub paused: bool,
    /// Maximum number of miss fetches the bifurcation sweep may issue.
    pub fetch_budget: u8,
    pub size: PixelSize,
}

impl TickContext {
    #[must_use]
    pub fn new(connected: bool, current_key: u16, paused: bool, size: PixelSize) -> Self {
        Self {
            connected,
            current_key,
            paused,
            fetch_budget: 2,
            size,
        }
    }

    #[must_use]
    pub fn with_fetch_budget(mut self, budget: u8) -> Self {
        self.fetch_budget = budget;
        self
    }
}
