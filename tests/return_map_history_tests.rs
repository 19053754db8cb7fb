use chaos_plot::Chart;
use chaos_plot::chart::return_map::{HISTORY_CAPACITY, RESET_THRESHOLD};
use chaos_plot::chart::{
    FirstReturnMap, SecondReturnMap, SeriesPoint, SeriesProvider, TickContext,
};
use chaos_plot::core::{FrameSettings, PixelSize};
use chaos_plot::render::NullRenderer;

struct FakeSeries {
    points: Vec<SeriesPoint>,
    resets: usize,
}

impl FakeSeries {
    fn with_points(points: Vec<SeriesPoint>) -> Self {
        Self { points, resets: 0 }
    }

    fn spread(count: usize) -> Self {
        // Distinct in-viewport points; no two share both coordinates.
        let points = (0..count)
            .map(|i| {
                let v = 10.0 + (i as f64) * (1000.0 / count as f64);
                SeriesPoint::new(v, 1010.0 - v * 0.7, v)
            })
            .collect();
        Self::with_points(points)
    }
}

impl SeriesProvider for FakeSeries {
    fn point_count(&self) -> usize {
        self.points.len()
    }

    fn point_at(&self, index: usize) -> SeriesPoint {
        self.points[index]
    }

    fn reset_buffer(&mut self) {
        self.resets += 1;
        self.points.clear();
    }
}

fn tick_with_key(key: u16) -> TickContext {
    TickContext::new(true, key, false, PixelSize::new(640, 480))
}

#[test]
fn repeated_series_does_not_duplicate_history() {
    let mut chart = Chart::new(SecondReturnMap::default());
    let mut renderer = NullRenderer::default();
    let mut source = FakeSeries::spread(40);
    let settings = FrameSettings::default();

    chart
        .draw(&mut renderer, &mut source, &tick_with_key(1000), &settings)
        .expect("first frame");
    assert_eq!(chart.variant().history_len(), 40);
    let points = renderer.last_point_count;

    // The upstream keeps serving the same samples on the next refresh.
    chart
        .draw(&mut renderer, &mut source, &tick_with_key(1000), &settings)
        .expect("second frame");
    assert_eq!(chart.variant().history_len(), 40);
    assert_eq!(renderer.last_point_count, points);
}

#[test]
fn history_is_bounded_at_capacity() {
    let mut chart = Chart::new(SecondReturnMap::default());
    let mut renderer = NullRenderer::default();
    let mut source = FakeSeries::spread(RESET_THRESHOLD);
    let settings = FrameSettings::default();

    chart
        .draw(&mut renderer, &mut source, &tick_with_key(1000), &settings)
        .expect("first batch");

    source.points = FakeSeries::spread(RESET_THRESHOLD).points
        .into_iter()
        .map(|p| SeriesPoint::new(p.x1 + 3.0, p.x2 + 3.0, p.x3))
        .collect();
    chart
        .draw(&mut renderer, &mut source, &tick_with_key(1000), &settings)
        .expect("second batch");

    assert_eq!(chart.variant().history_len(), HISTORY_CAPACITY);
}

#[test]
fn overfull_upstream_buffer_is_recycled() {
    let mut chart = Chart::new(SecondReturnMap::default());
    let mut renderer = NullRenderer::default();
    let mut source = FakeSeries::spread(RESET_THRESHOLD + 50);
    let settings = FrameSettings::default();

    chart
        .draw(&mut renderer, &mut source, &tick_with_key(1000), &settings)
        .expect("overfull frame");

    assert_eq!(source.resets, 1);
    assert!(source.points.is_empty());
}

#[test]
fn device_key_change_clears_the_history() {
    let mut chart = Chart::new(SecondReturnMap::default());
    let mut renderer = NullRenderer::default();
    let mut source = FakeSeries::spread(40);
    let settings = FrameSettings::default();

    chart
        .draw(&mut renderer, &mut source, &tick_with_key(1000), &settings)
        .expect("first key");
    assert_eq!(chart.variant().history_len(), 40);

    source.points.truncate(10);
    chart
        .draw(&mut renderer, &mut source, &tick_with_key(2000), &settings)
        .expect("new key");
    assert_eq!(chart.variant().history_len(), 10);
}

#[test]
fn out_of_viewport_points_are_rejected() {
    let mut chart = Chart::new(SecondReturnMap::default());
    let mut renderer = NullRenderer::default();
    let mut source = FakeSeries::with_points(vec![
        SeriesPoint::new(500.0, 500.0, 0.0),
        SeriesPoint::new(-5.0, 500.0, 0.0),
        SeriesPoint::new(500.0, 2000.0, 0.0),
    ]);
    let settings = FrameSettings::default();

    chart
        .draw(&mut renderer, &mut source, &tick_with_key(1000), &settings)
        .expect("mixed frame");
    assert_eq!(chart.variant().history_len(), 1);
}

#[test]
fn follow_overlay_walks_one_segment_pair_per_tick() {
    let mut chart = Chart::new(FirstReturnMap::default());
    let mut renderer = NullRenderer::default();
    let mut source = FakeSeries::spread(40);
    let settings = FrameSettings::default();
    let tick = tick_with_key(1000);

    chart
        .draw(&mut renderer, &mut source, &tick, &settings)
        .expect("follow off");
    let baseline = renderer.last_line_count;

    chart.variant_mut().toggle_follow();
    for _ in 0..3 {
        chart.tick();
    }
    chart
        .draw(&mut renderer, &mut source, &tick, &settings)
        .expect("follow on");
    assert_eq!(renderer.last_line_count, baseline + 6);

    chart.variant_mut().toggle_follow();
    chart
        .draw(&mut renderer, &mut source, &tick, &settings)
        .expect("follow cleared");
    assert_eq!(renderer.last_line_count, baseline);
}
