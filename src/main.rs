use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use photomode::rendering::raster::PixelSurface;
use photomode::rendering::{Rect, Rgba, Surface};
use photomode::{FrameKind, PanelParams, PhotoBooth, PhotoModeConfig, Sketch, Viewport};

/// Run a procedural sketch through photo mode on a simulated frame clock
#[derive(Parser, Debug)]
#[command(name = "photomode", version)]
struct Cli {
    /// JSON configuration file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    max_panels: Option<u32>,
    #[arg(long)]
    interval_ms: Option<u64>,
    #[arg(long)]
    cols: Option<u32>,
    #[arg(long)]
    rows: Option<u32>,
    #[arg(long)]
    gap: Option<u32>,
    #[arg(long, default_value_t = 640)]
    width: u32,
    #[arg(long, default_value_t = 480)]
    height: u32,
    /// Simulated frame duration
    #[arg(long, default_value_t = 16)]
    frame_ms: u64,
    #[arg(long, default_value_t = 300)]
    frames: u32,
    /// The sketch reports not-ready until this time, like a camera warming up
    #[arg(long, default_value_t = 0)]
    warmup_ms: u64,
    /// Print the final engine state as JSON
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn photo_config(&self) -> anyhow::Result<PhotoModeConfig> {
        let mut cfg = match &self.config {
            Some(path) => PhotoModeConfig::from_json_file(path)?,
            None => PhotoModeConfig::default(),
        };
        if let Some(v) = self.max_panels {
            cfg.max_panels = v;
        }
        if let Some(v) = self.interval_ms {
            cfg.capture_interval_ms = v;
        }
        if let Some(v) = self.cols {
            cfg.grid_cols = v;
        }
        if let Some(v) = self.rows {
            cfg.grid_rows = v;
        }
        if let Some(v) = self.gap {
            cfg.panel_gap = v;
        }
        cfg.validate()?;
        Ok(cfg)
    }
}

/// Diagonal colour bands drifting with time
struct Bands {
    now_ms: u64,
    warmup_ms: u64,
}

impl Sketch<PixelSurface> for Bands {
    fn draw(&mut self, surface: &mut PixelSurface, _params: Option<&PanelParams>) -> anyhow::Result<()> {
        let band = 16u32;
        let shift = (self.now_ms / 20) as u32;
        let (w, h) = (surface.width(), surface.height());
        for x in (0..w).step_by(band as usize) {
            let k = (x / band + shift) % 6;
            let color = match k {
                0 => Rgba::opaque(230, 57, 70),
                1 => Rgba::opaque(241, 143, 1),
                2 => Rgba::opaque(252, 211, 77),
                3 => Rgba::opaque(42, 157, 143),
                4 => Rgba::opaque(38, 70, 83),
                _ => Rgba::opaque(131, 56, 236),
            };
            surface.fill_rect(Rect::new(x as i32, 0, band, h), color);
        }
        Ok(())
    }

    fn ready(&self) -> bool {
        self.now_ms >= self.warmup_ms
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let cfg = cli.photo_config()?;

    let canvas = Viewport {
        width: cli.width,
        height: cli.height,
    };
    let mut target = PixelSurface::create(canvas).context("Failed to allocate canvas")?;
    let mut booth: PhotoBooth<PixelSurface> = PhotoBooth::new(cfg)?;
    let mut sketch = Bands {
        now_ms: 0,
        warmup_ms: cli.warmup_ms,
    };

    let mut grid_at = None;
    for frame in 0..cli.frames {
        let now = frame as u64 * cli.frame_ms;
        sketch.now_ms = now;
        let kind = booth
            .frame(true, now, &mut sketch, &mut target)
            .with_context(|| format!("frame {} failed", frame))?;
        if kind == FrameKind::Grid && grid_at.is_none() {
            grid_at = Some((frame, now));
        }
    }

    let state = booth.engine().state();
    match grid_at {
        Some((frame, now)) => println!("grid displayed from frame {} ({}ms)", frame, now),
        None => {
            println!("still capturing after {} frames", cli.frames);
            booth.progress(&mut target);
        }
    }
    println!("panels: {} / {}", state.panels_created, state.max_panels);
    println!("canvas digest: {}", target.digest());
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&state)?);
    }
    Ok(())
}
