use serde::{Deserialize, Serialize};

use crate::core::units::AxisUnits;

/// Labeling mode for the bifurcation diagram's horizontal axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BifXAxisMode {
    /// Raw MDAC register values.
    #[default]
    MdacValues,
    /// Equivalent resistance in ohms, resolved through the data provider.
    ResistanceValues,
}

/// Marker size for scatter-style series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PointSize {
    /// Single pixel.
    Small,
    #[default]
    Medium,
    Large,
}

impl PointSize {
    /// Circle radius in pixels; `None` draws a single-pixel point.
    #[must_use]
    pub fn radius(self) -> Option<f64> {
        match self {
            Self::Small => None,
            Self::Medium => Some(2.0),
            Self::Large => Some(3.0),
        }
    }
}

/// Immutable-per-frame drawing configuration.
///
/// Owned by the host and handed into every `draw` call, so no chart reads
/// process-wide mutable state mid-frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameSettings {
    pub y_axis_units: AxisUnits,
    pub bif_x_axis: BifXAxisMode,
    pub point_size: PointSize,
    /// Number of independent-variable steps swept per visible window width.
    pub steps_per_window: u32,
    /// Points contributed per sampled key in the bifurcation diagram.
    pub peaks_per_key: usize,
}

impl Default for FrameSettings {
    fn default() -> Self {
        Self {
            y_axis_units: AxisUnits::default(),
            bif_x_axis: BifXAxisMode::default(),
            point_size: PointSize::default(),
            steps_per_window: 50,
            peaks_per_key: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::FrameSettings;

    #[test]
    fn settings_round_trip_through_json() {
        let settings = FrameSettings::default();
        let encoded = serde_json::to_string(&settings).expect("serialize settings");
        let decoded: FrameSettings = serde_json::from_str(&encoded).expect("deserialize settings");
        assert_eq!(decoded, settings);
    }
}
