//! Photomode
//!
//! A capture-and-composite engine that can be attached to any real-time
//! visual sketch. While a session is active the engine periodically
//! snapshots the sketch into offscreen panels; once enough panels exist it
//! stops capturing and the host renders the panels as a static grid instead
//! of the live sketch.
//!
//! The engine only knows two things about the sketch it wraps: a render
//! callback `(surface, params) -> Result` and a per-frame readiness flag.
//!
//! # Example
//!
//! ```
//! use photomode::rendering::raster::PixelSurface;
//! use photomode::rendering::{Rgba, Surface};
//! use photomode::{CaptureEngine, Phase, PhotoModeConfig, Viewport};
//!
//! # fn main() -> photomode::Result<()> {
//! let config = PhotoModeConfig {
//!     max_panels: 2,
//!     capture_interval_ms: 100,
//!     ..Default::default()
//! };
//! let mut engine: CaptureEngine<PixelSurface> = CaptureEngine::new(config)?;
//! let canvas = Viewport { width: 64, height: 48 };
//!
//! engine.activate_at(0);
//! for now in [100, 200] {
//!     engine.update(now, canvas, true, |surface, _params| {
//!         surface.clear(Rgba::WHITE);
//!         Ok(())
//!     })?;
//! }
//! assert_eq!(engine.phase(), Phase::GridDisplay);
//!
//! let mut target = PixelSurface::create(canvas)?;
//! engine.render_grid(&mut target);
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

pub mod error;
pub use error::{Error, Result};

pub mod booth;
pub mod clock;
pub mod engine;
pub mod rendering;

pub use booth::{FrameKind, PhotoBooth, Sketch};
pub use clock::{Clock, ManualClock, MonotonicClock};
pub use engine::{CaptureEngine, EngineState, Panel, PanelParams, Phase};

use rendering::Rgba;

/// Canvas dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}

/// What `update` does when the render callback fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaptureErrorPolicy {
    /// Drop the half-drawn panel and retry the same index on the next update
    #[default]
    Retry,
    /// End the session, discarding every captured panel
    Abort,
}

/// Configuration for a photo mode session
///
/// Immutable once handed to an engine. The defaults give a 4x3 contact sheet
/// filled at roughly seven frames per second.
///
/// # Examples
///
/// ```
/// let cfg = photomode::PhotoModeConfig::default();
/// assert_eq!(cfg.max_panels, 12);
/// assert_eq!(cfg.grid_cols * cfg.grid_rows, 12);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhotoModeConfig {
    /// Panels to capture before switching to the grid
    pub max_panels: u32,
    /// Minimum wall-clock spacing between captures
    pub capture_interval_ms: u64,
    pub grid_cols: u32,
    pub grid_rows: u32,
    /// Pixels around and between grid cells
    pub panel_gap: u32,
    /// Neutral fill behind the grid and progress views
    pub background: Rgba,
    /// Progress indicator colour
    pub text_color: Rgba,
    pub on_capture_error: CaptureErrorPolicy,
}

impl Default for PhotoModeConfig {
    fn default() -> Self {
        Self {
            max_panels: 12,
            capture_interval_ms: 150,
            grid_cols: 4,
            grid_rows: 3,
            panel_gap: 15,
            background: Rgba(24, 24, 24, 255),
            text_color: Rgba(235, 235, 235, 255),
            on_capture_error: CaptureErrorPolicy::Retry,
        }
    }
}

impl PhotoModeConfig {
    /// Reject non-positive counts and intervals.
    ///
    /// Values are never clamped; an engine cannot be built from an invalid
    /// configuration.
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("max_panels", self.max_panels as u64),
            ("capture_interval_ms", self.capture_interval_ms),
            ("grid_cols", self.grid_cols as u64),
            ("grid_rows", self.grid_rows as u64),
        ];
        for (name, value) in positive {
            if value == 0 {
                return Err(Error::ConfigError(format!("{} must be positive", name)));
            }
        }
        Ok(())
    }

    /// Number of cells the grid can show.
    pub fn grid_capacity(&self) -> u32 {
        self.grid_cols.saturating_mul(self.grid_rows)
    }

    /// Parse and validate a JSON configuration. Missing fields take defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let cfg: PhotoModeConfig = serde_json::from_str(json)
            .map_err(|e| Error::ConfigError(format!("Failed to parse config: {}", e)))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            Error::ConfigError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&text)
    }
}

/// Create an engine reading activation time from a [`MonotonicClock`].
pub fn new_engine<S: rendering::Surface>(config: PhotoModeConfig) -> Result<CaptureEngine<S>> {
    CaptureEngine::new(config)
}
