use photomode::rendering::raster::PixelSurface;
use photomode::rendering::{Rgba, Surface};
use photomode::{
    CaptureEngine, FrameKind, ManualClock, PanelParams, PhotoBooth, PhotoModeConfig, Sketch,
    Viewport,
};

/// Camera-style sketch: not ready until its feed warms up
struct Feed {
    now_ms: u64,
    warm_at_ms: u64,
    live_frames: u32,
}

impl Sketch<PixelSurface> for Feed {
    fn draw(&mut self, surface: &mut PixelSurface, params: Option<&PanelParams>) -> anyhow::Result<()> {
        if params.is_none() {
            self.live_frames += 1;
        }
        surface.clear(Rgba::opaque((self.now_ms / 10 % 256) as u8, 40, 90));
        Ok(())
    }

    fn ready(&self) -> bool {
        self.now_ms >= self.warm_at_ms
    }
}

#[test]
fn sixty_fps_session_with_warmup() {
    let cfg = PhotoModeConfig::default();
    let engine = CaptureEngine::with_clock(cfg, ManualClock::new(0)).unwrap();
    let mut booth: PhotoBooth<PixelSurface> = PhotoBooth::with_engine(engine);
    let mut target = PixelSurface::create(Viewport { width: 320, height: 240 }).unwrap();
    let mut feed = Feed { now_ms: 0, warm_at_ms: 1_000, live_frames: 0 };

    let mut first_grid = None;
    for frame in 0..240u64 {
        let now = frame * 16;
        feed.now_ms = now;
        let kind = booth.frame(true, now, &mut feed, &mut target).unwrap();
        if kind == FrameKind::Grid && first_grid.is_none() {
            first_grid = Some(now);
        }
    }

    let engine = booth.engine();
    assert_eq!(engine.panels_created(), 12);
    let stamps: Vec<u64> = engine.panels().iter().map(|p| p.captured_at_ms()).collect();
    assert!(stamps[0] >= 1_000, "captured before the feed was ready: {:?}", stamps);
    for pair in stamps.windows(2) {
        assert!(pair[1] - pair[0] >= 150, "captures too close: {:?}", stamps);
    }
    let grid_at = first_grid.expect("grid reached");
    assert_eq!(grid_at, *stamps.last().unwrap());
    // Live frames stop once the grid takes over.
    assert_eq!(feed.live_frames as u64, grid_at / 16);
}
