//! Host-side driver that wires a sketch to a capture engine.
//!
//! Every sketch that supports photo mode needs the same per-frame glue:
//! follow the "photo mode requested" toggle, feed the engine, and choose
//! between drawing the live sketch and drawing the grid. `PhotoBooth` is
//! that glue.

use serde::Serialize;

use crate::engine::{CaptureEngine, PanelParams, Phase};
use crate::rendering::Surface;
use crate::{Error, PhotoModeConfig, Result};

/// A visual sketch as seen by photo mode
pub trait Sketch<S: Surface> {
    /// Draw one frame into `surface`.
    ///
    /// `params` is `Some` when the frame is being captured into a panel and
    /// `None` for the live canvas.
    fn draw(&mut self, surface: &mut S, params: Option<&PanelParams>) -> anyhow::Result<()>;

    /// Whether upstream resources (camera, audio) are usable this frame.
    fn ready(&self) -> bool {
        true
    }
}

impl<S, F> Sketch<S> for F
where
    S: Surface,
    F: FnMut(&mut S, Option<&PanelParams>) -> anyhow::Result<()>,
{
    fn draw(&mut self, surface: &mut S, params: Option<&PanelParams>) -> anyhow::Result<()> {
        self(surface, params)
    }
}

/// Which path a frame took
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameKind {
    /// Photo mode off, live sketch drawn
    Live,
    /// Live sketch drawn while panels are being captured
    Capturing,
    /// Grid composite drawn instead of the sketch
    Grid,
}

pub struct PhotoBooth<S: Surface> {
    engine: CaptureEngine<S>,
    requested: bool,
}

impl<S: Surface> PhotoBooth<S> {
    pub fn new(config: PhotoModeConfig) -> Result<Self> {
        Ok(Self::with_engine(CaptureEngine::new(config)?))
    }

    pub fn with_engine(engine: CaptureEngine<S>) -> Self {
        Self {
            engine,
            requested: false,
        }
    }

    pub fn engine(&self) -> &CaptureEngine<S> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut CaptureEngine<S> {
        &mut self.engine
    }

    /// Run one host frame.
    ///
    /// A rising edge of `requested` starts a fresh session at `now_ms` and a
    /// falling edge ends it; holding the toggle does not restart capture.
    /// Capture errors are returned before anything is drawn.
    pub fn frame<K>(
        &mut self,
        requested: bool,
        now_ms: u64,
        sketch: &mut K,
        target: &mut S,
    ) -> Result<FrameKind>
    where
        K: Sketch<S> + ?Sized,
    {
        if requested != self.requested {
            self.requested = requested;
            if requested {
                self.engine.activate_at(now_ms);
            } else {
                self.engine.deactivate();
            }
        }

        if self.engine.phase() == Phase::Capturing {
            let ready = sketch.ready();
            self.engine
                .update(now_ms, target.viewport(), ready, |s, p| sketch.draw(s, Some(p)))?;
        }

        let kind = match self.engine.phase() {
            Phase::GridDisplay => {
                self.engine.render_grid(target);
                return Ok(FrameKind::Grid);
            }
            Phase::Capturing => FrameKind::Capturing,
            Phase::Inactive => FrameKind::Live,
        };
        sketch.draw(target, None).map_err(Error::DrawFailed)?;
        Ok(kind)
    }

    /// Draw the capture progress view into `target`.
    pub fn progress(&self, target: &mut S) {
        self.engine.render_progress(target);
    }
}
