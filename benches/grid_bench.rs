use criterion::{criterion_group, criterion_main, Criterion};

use photomode::rendering::raster::PixelSurface;
use photomode::rendering::{Rgba, Surface};
use photomode::{CaptureEngine, ManualClock, PhotoModeConfig, Viewport};

const CANVAS: Viewport = Viewport { width: 640, height: 480 };

fn filled_engine() -> CaptureEngine<PixelSurface> {
    let mut engine = CaptureEngine::with_clock(PhotoModeConfig::default(), ManualClock::new(0))
        .expect("default config is valid");
    engine.activate_at(0);
    let mut now = 0;
    while engine.is_capturing_active() {
        now += engine.config().capture_interval_ms;
        engine
            .update(now, CANVAS, true, |s, p| {
                s.clear(Rgba::opaque(20 * p.index as u8, 90, 160));
                Ok(())
            })
            .expect("capture");
    }
    engine
}

fn bench_render_grid(c: &mut Criterion) {
    let engine = filled_engine();
    let mut target = PixelSurface::create(CANVAS).unwrap();

    c.bench_function("render_grid_4x3_640x480", |b| {
        b.iter(|| engine.render_grid(&mut target))
    });
}

fn bench_capture_session(c: &mut Criterion) {
    c.bench_function("capture_12_panels_640x480", |b| {
        b.iter(|| {
            let engine = filled_engine();
            assert_eq!(engine.panels_created(), 12);
        })
    });
}

criterion_group!(benches, bench_render_grid, bench_capture_session);
criterion_main!(benches);
