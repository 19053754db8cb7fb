use crate::error::{PlotError, PlotResult};

/// Currently visible data-space rectangle of a chart.
///
/// Replaced wholesale by zoom commits or a reset to the variant default,
/// never partially mutated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
}

impl Viewport {
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> PlotResult<Self> {
        let finite =
            x_min.is_finite() && x_max.is_finite() && y_min.is_finite() && y_max.is_finite();
        if !finite || x_max <= x_min || y_max <= y_min {
            return Err(PlotError::InvalidViewport {
                x_min,
                x_max,
                y_min,
                y_max,
            });
        }

        Ok(Self {
            x_min,
            x_max,
            y_min,
            y_max,
        })
    }

    /// Infallible constructor for statically known-valid ranges, used by the
    /// chart variants' default viewports.
    #[must_use]
    pub(crate) const fn from_const(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    #[must_use]
    pub fn x_min(self) -> f64 {
        self.x_min
    }

    #[must_use]
    pub fn x_max(self) -> f64 {
        self.x_max
    }

    #[must_use]
    pub fn y_min(self) -> f64 {
        self.y_min
    }

    #[must_use]
    pub fn y_max(self) -> f64 {
        self.y_max
    }

    #[must_use]
    pub fn x_span(self) -> f64 {
        self.x_max - self.x_min
    }

    #[must_use]
    pub fn y_span(self) -> f64 {
        self.y_max - self.y_min
    }

    /// Returns a copy with the X range replaced, keeping Y untouched.
    pub fn with_x_range(self, x_min: f64, x_max: f64) -> PlotResult<Self> {
        Self::new(x_min, x_max, self.y_min, self.y_max)
    }

    /// Returns a copy with the Y range replaced, keeping X untouched.
    pub fn with_y_range(self, y_min: f64, y_max: f64) -> PlotResult<Self> {
        Self::new(self.x_min, self.x_max, y_min, y_max)
    }
}

#[cfg(test)]
mod tests {
    use super::Viewport;

    #[test]
    fn viewport_rejects_collapsed_ranges() {
        assert!(Viewport::new(0.0, 0.0, 0.0, 1024.0).is_err());
        assert!(Viewport::new(0.0, 1024.0, 5.0, 5.0).is_err());
        assert!(Viewport::new(10.0, 0.0, 0.0, 1024.0).is_err());
    }

    #[test]
    fn viewport_rejects_non_finite_bounds() {
        assert!(Viewport::new(f64::NAN, 1.0, 0.0, 1.0).is_err());
        assert!(Viewport::new(0.0, f64::INFINITY, 0.0, 1.0).is_err());
    }

    #[test]
    fn axis_replacement_keeps_other_axis() {
        let viewport = Viewport::new(0.0, 4095.0, 0.0, 1024.0).expect("valid viewport");
        let zoomed = viewport.with_x_range(100.0, 900.0).expect("valid x range");
        assert_eq!(zoomed.y_min(), 0.0);
        assert_eq!(zoomed.y_max(), 1024.0);
        assert_eq!(zoomed.x_span(), 800.0);
    }
}
