use serde::{Deserialize, Serialize};

/// Display units for axis labels and cursor readouts.
///
/// The circuit samples through a 10-bit ADC with a 3.3 V reference and a
/// 1.2 V bias point. Mapping stays in raw ADC counts; only labels and status
/// text are converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AxisUnits {
    /// Raw ADC counts, 0..=1023.
    Adc,
    /// Volts referenced to ground: `v * 3.3 / 1024`.
    VoltsGround,
    /// Volts referenced to the bias point: `v * 3.3 / 1024 - 1.2`.
    #[default]
    VoltsBias,
}

impl AxisUnits {
    /// Converts a raw ADC count to the display value for this unit mode.
    #[must_use]
    pub fn to_display(self, adc: f64) -> f64 {
        match self {
            Self::Adc => adc,
            Self::VoltsGround => adc * 3.3 / 1024.0,
            Self::VoltsBias => adc * 3.3 / 1024.0 - 1.2,
        }
    }

    /// Inverse of `to_display`.
    #[must_use]
    pub fn from_display(self, value: f64) -> f64 {
        match self {
            Self::Adc => value,
            Self::VoltsGround => value * 1024.0 / 3.3,
            Self::VoltsBias => (value + 1.2) * 1024.0 / 3.3,
        }
    }

    /// Unit suffix used in chart subtitles, e.g. "X (V) vs. T".
    #[must_use]
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Adc => "ADC",
            Self::VoltsGround | Self::VoltsBias => "V",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::AxisUnits;
    use approx::assert_abs_diff_eq;

    #[test]
    fn display_conversion_round_trips() {
        for units in [AxisUnits::Adc, AxisUnits::VoltsGround, AxisUnits::VoltsBias] {
            let shown = units.to_display(512.0);
            assert_abs_diff_eq!(units.from_display(shown), 512.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn bias_mode_subtracts_bias_voltage() {
        assert_abs_diff_eq!(AxisUnits::VoltsBias.to_display(0.0), -1.2, epsilon = 1e-9);
    }
}
