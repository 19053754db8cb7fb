use chaos_plot::core::{AxisDirection, AxisMapper, PlotRect, Viewport};
use proptest::prelude::*;

proptest! {
    #[test]
    fn forward_axis_round_trip_property(
        x_min in -1_000_000.0f64..1_000_000.0,
        x_span in 0.001f64..1_000_000.0,
        value_factor in 0.0f64..1.0
    ) {
        let x_max = x_min + x_span;
        let value = x_min + value_factor * x_span;

        let plot = PlotRect::new(20.0, 37.0, 620.0, 423.0);
        let viewport = Viewport::new(x_min, x_max, 0.0, 1024.0).expect("valid viewport");
        let mapper = AxisMapper::horizontal(plot, viewport, AxisDirection::Forward);

        let px = mapper.to_pixel(value);
        let recovered = mapper.to_value(px);

        prop_assert!((recovered - value).abs() <= x_span * 1e-9 + 1e-7);
    }

    #[test]
    fn inverted_axis_round_trip_property(
        x_min in -1_000_000.0f64..1_000_000.0,
        x_span in 0.001f64..1_000_000.0,
        value_factor in 0.0f64..1.0
    ) {
        let x_max = x_min + x_span;
        let value = x_min + value_factor * x_span;

        let plot = PlotRect::new(20.0, 37.0, 620.0, 423.0);
        let viewport = Viewport::new(x_min, x_max, 0.0, 1024.0).expect("valid viewport");
        let mapper = AxisMapper::horizontal(plot, viewport, AxisDirection::Inverted);

        let px = mapper.to_pixel(value);
        let recovered = mapper.to_value(px);

        prop_assert!((recovered - value).abs() <= x_span * 1e-9 + 1e-7);
    }

    #[test]
    fn inverted_axis_reverses_ordering_property(
        x_span in 1.0f64..1_000_000.0,
        a_factor in 0.0f64..0.49,
        b_factor in 0.51f64..1.0
    ) {
        let viewport = Viewport::new(0.0, x_span, 0.0, 1024.0).expect("valid viewport");
        let plot = PlotRect::new(0.0, 0.0, 800.0, 400.0);
        let mapper = AxisMapper::horizontal(plot, viewport, AxisDirection::Inverted);

        let low_px = mapper.to_pixel(a_factor * x_span);
        let high_px = mapper.to_pixel(b_factor * x_span);

        prop_assert!(high_px < low_px);
    }
}
