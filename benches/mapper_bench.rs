use chaos_plot::BifurcationChart;
use chaos_plot::chart::{PeakBuffer, PeakProvider, TickContext};
use chaos_plot::core::{AxisDirection, AxisMapper, FrameSettings, PixelSize, PlotRect, Viewport};
use chaos_plot::error::PlotResult;
use chaos_plot::render::NullRenderer;
use criterion::{Criterion, criterion_group, criterion_main};
use smallvec::smallvec;
use std::hint::black_box;

fn bench_axis_mapper_round_trip(c: &mut Criterion) {
    let plot = PlotRect::new(20.0, 37.0, 620.0, 423.0);
    let viewport = Viewport::new(0.0, 4095.0, 0.0, 1024.0).expect("valid viewport");
    let mapper = AxisMapper::horizontal(plot, viewport, AxisDirection::Inverted);

    c.bench_function("axis_mapper_round_trip", |b| {
        b.iter(|| {
            let px = mapper.to_pixel(black_box(1234.5));
            let _ = mapper.to_value(black_box(px));
        })
    });
}

struct SaturatedPeaks;

impl PeakProvider for SaturatedPeaks {
    fn peaks_cache_hit(&self, _key: u16) -> bool {
        true
    }

    fn fetch_peaks(&mut self, key: u16) -> PlotResult<PeakBuffer> {
        let base = i32::from(key % 512);
        Ok(smallvec![base + 100, base + 300, 900 - base % 300])
    }

    fn resistance_for_key(&self, key: u16) -> f64 {
        114_000.0 - f64::from(key) * 25.0
    }

    fn set_background_work_enabled(&mut self, _enabled: bool) {}
}

fn bench_bifurcation_cached_frame(c: &mut Criterion) {
    let mut chart = BifurcationChart::new();
    let mut renderer = NullRenderer::default();
    let mut provider = SaturatedPeaks;
    let settings = FrameSettings::default();
    let tick = TickContext::new(true, 2048, false, PixelSize::new(1024, 600));

    // First draw pays for the rebuild; the measured loop hits the layer.
    chart
        .draw(&mut renderer, &mut provider, &tick, &settings)
        .expect("rebuild frame");

    c.bench_function("bifurcation_cached_frame", |b| {
        b.iter(|| {
            chart
                .draw(
                    black_box(&mut renderer),
                    black_box(&mut provider),
                    black_box(&tick),
                    black_box(&settings),
                )
                .expect("cached frame");
        })
    });
}

criterion_group!(benches, bench_axis_mapper_round_trip, bench_bifurcation_cached_frame);
criterion_main!(benches);
