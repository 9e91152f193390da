//! Capture engine: session phase, panel ownership and the grid composite.
//!
//! Hosts drive a [`CaptureEngine`] once per frame:
//! - `activate` / `deactivate` follow the host's "photo mode requested" toggle
//! - `update` captures a new panel when the interval has elapsed and the
//!   sketch is ready
//! - `render_grid` / `render_progress` draw into the host's canvas
//!
//! ```text
//! Inactive --activate--> Capturing --max_panels reached--> GridDisplay
//!     ^                      |                                  |
//!     +------deactivate------+-----------deactivate-------------+
//! ```

use log::{debug, info, warn};
use serde::Serialize;

use crate::clock::{Clock, MonotonicClock};
use crate::rendering::layout::GridLayout;
use crate::rendering::paint::{self, PaintCommand};
use crate::rendering::Surface;
use crate::{CaptureErrorPolicy, Error, PhotoModeConfig, Result, Viewport};

/// Session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Inactive,
    Capturing,
    GridDisplay,
}

/// Parameters handed to the render callback for one capture.
///
/// Only identifies the panel; there are no transform or effect hints, so a
/// panel is exactly what the live sketch would have drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PanelParams {
    pub index: u32,
    /// Milliseconds since activation
    pub timestamp_ms: u64,
}

/// One captured snapshot. Read-only once created.
#[derive(Debug)]
pub struct Panel<S> {
    surface: S,
    params: PanelParams,
}

impl<S> Panel<S> {
    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn index(&self) -> u32 {
        self.params.index
    }

    /// Milliseconds since activation at which the panel was captured.
    pub fn captured_at_ms(&self) -> u64 {
        self.params.timestamp_ms
    }

    pub fn params(&self) -> &PanelParams {
        &self.params
    }
}

/// Read-only snapshot of engine state for diagnostics and host logic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EngineState {
    pub phase: Phase,
    pub panels_created: u32,
    pub max_panels: u32,
    pub last_capture_ms: u64,
    pub activated_at_ms: u64,
}

pub struct CaptureEngine<S: Surface> {
    config: PhotoModeConfig,
    clock: Box<dyn Clock>,
    phase: Phase,
    last_capture_ms: u64,
    activated_at_ms: u64,
    // Index whose capture last failed, so repeated failures log once
    failing_index: Option<u32>,
    // Length is the panel count; it never exceeds `config.max_panels`.
    panels: Vec<Panel<S>>,
}

impl<S: Surface> CaptureEngine<S> {
    /// Build an engine that reads activation time from a [`MonotonicClock`].
    pub fn new(config: PhotoModeConfig) -> Result<Self> {
        Self::with_clock(config, MonotonicClock::new())
    }

    pub fn with_clock(config: PhotoModeConfig, clock: impl Clock + 'static) -> Result<Self> {
        config.validate()?;
        if config.max_panels > config.grid_capacity() {
            warn!(
                "max_panels ({}) exceeds the {}x{} grid; panels past cell {} will not be drawn",
                config.max_panels,
                config.grid_cols,
                config.grid_rows,
                config.grid_capacity().saturating_sub(1)
            );
        }
        Ok(Self {
            config,
            clock: Box::new(clock),
            phase: Phase::Inactive,
            last_capture_ms: 0,
            activated_at_ms: 0,
            failing_index: None,
            panels: Vec::new(),
        })
    }

    pub fn config(&self) -> &PhotoModeConfig {
        &self.config
    }

    /// Current reading of the engine's clock.
    ///
    /// Sessions started with [`activate`](Self::activate) are on this
    /// timeline; drive them with [`update_now`](Self::update_now) or pass
    /// this value to [`update`](Self::update).
    pub fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }

    /// Start a fresh session at the clock's current reading.
    pub fn activate(&mut self) {
        let now = self.clock.now_ms();
        self.activate_at(now);
    }

    /// Start a fresh session at `now_ms`.
    ///
    /// Any panels from a previous session are dropped, whatever the phase.
    pub fn activate_at(&mut self, now_ms: u64) {
        if !self.panels.is_empty() {
            debug!("discarding {} panels from previous session", self.panels.len());
        }
        self.panels.clear();
        self.failing_index = None;
        self.last_capture_ms = now_ms;
        self.activated_at_ms = now_ms;
        self.phase = Phase::Capturing;
        info!(
            "photo mode activated at {}ms: {} panels every {}ms",
            now_ms, self.config.max_panels, self.config.capture_interval_ms
        );
    }

    /// End the session and drop every panel. No-op when inactive.
    pub fn deactivate(&mut self) {
        if self.phase == Phase::Inactive {
            return;
        }
        self.panels.clear();
        self.phase = Phase::Inactive;
        info!("photo mode deactivated");
    }

    /// Per-frame tick.
    ///
    /// Captures a panel when the engine is capturing, `ready` is true and at
    /// least `capture_interval_ms` has passed since the last capture (or
    /// activation). A new surface the size of `canvas` is allocated and
    /// handed to `render` together with the panel's [`PanelParams`].
    ///
    /// Returns the index of the captured panel, or `None` when nothing was
    /// due. If `render` fails the error is returned as
    /// [`Error::CaptureFailed`] and the configured [`CaptureErrorPolicy`]
    /// decides whether the session survives.
    pub fn update<F>(
        &mut self,
        now_ms: u64,
        canvas: Viewport,
        ready: bool,
        mut render: F,
    ) -> Result<Option<u32>>
    where
        F: FnMut(&mut S, &PanelParams) -> anyhow::Result<()>,
    {
        if self.phase != Phase::Capturing || !ready || !self.capture_due(now_ms) {
            return Ok(None);
        }

        let index = self.panels_created();
        let params = PanelParams {
            index,
            timestamp_ms: now_ms.saturating_sub(self.activated_at_ms),
        };

        let mut surface = match S::create(canvas) {
            Ok(s) => s,
            Err(e) => return Err(self.capture_error(index, e)),
        };
        if let Err(source) = render(&mut surface, &params) {
            return Err(self.capture_error(index, Error::CaptureFailed { index, source }));
        }

        self.panels.push(Panel { surface, params });
        self.last_capture_ms = now_ms;
        self.failing_index = None;
        debug!(
            "captured panel {} at +{}ms ({}x{})",
            index, params.timestamp_ms, canvas.width, canvas.height
        );

        if self.panels_created() >= self.config.max_panels {
            self.phase = Phase::GridDisplay;
            info!("captured {} panels, showing grid", self.panels_created());
        }
        Ok(Some(index))
    }

    /// [`update`](Self::update) at the engine clock's current reading.
    pub fn update_now<F>(&mut self, canvas: Viewport, ready: bool, render: F) -> Result<Option<u32>>
    where
        F: FnMut(&mut S, &PanelParams) -> anyhow::Result<()>,
    {
        let now = self.clock.now_ms();
        self.update(now, canvas, ready, render)
    }

    fn capture_due(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.last_capture_ms) >= self.config.capture_interval_ms
    }

    fn capture_error(&mut self, index: u32, err: Error) -> Error {
        match self.config.on_capture_error {
            CaptureErrorPolicy::Retry => {
                if self.failing_index == Some(index) {
                    debug!("capture of panel {} failed again: {}", index, err);
                } else {
                    warn!("capture of panel {} failed, will retry: {}", index, err);
                    self.failing_index = Some(index);
                }
            }
            CaptureErrorPolicy::Abort => {
                warn!("capture of panel {} failed, ending session: {}", index, err);
                self.deactivate();
            }
        }
        err
    }

    /// Grid geometry for a target of the given size.
    pub fn grid_layout(&self, viewport: Viewport) -> GridLayout {
        GridLayout::new(
            viewport,
            self.config.grid_cols,
            self.config.grid_rows,
            self.config.panel_gap,
        )
    }

    /// Paint commands for the grid overview on a target of the given size.
    pub fn paint_grid(&self, viewport: Viewport) -> Vec<PaintCommand> {
        let layout = self.grid_layout(viewport);
        if layout.is_degenerate() && !self.panels.is_empty() {
            warn!(
                "{}x{} target leaves no room for {}x{} cells with a {}px gap",
                viewport.width, viewport.height, layout.cols, layout.rows, layout.gap
            );
        }
        paint::grid_commands(&layout, self.panels_created(), self.config.background)
    }

    /// Draw every captured panel into its grid cell.
    ///
    /// Does not check the phase; hosts should only call it once
    /// [`Phase::GridDisplay`] is reached. Panels beyond the grid capacity
    /// stay undrawn.
    pub fn render_grid(&self, target: &mut S) {
        let cmds = self.paint_grid(target.viewport());
        paint::replay(&cmds, target, |i| self.panel(i).map(Panel::surface));
    }

    /// Draw a centered `"created / max"` indicator.
    pub fn render_progress(&self, target: &mut S) {
        let cmds = paint::progress_commands(
            target.width(),
            target.height(),
            self.panels_created(),
            self.config.max_panels,
            self.config.background,
            self.config.text_color,
        );
        paint::replay(&cmds, target, |i| self.panel(i).map(Panel::surface));
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.phase != Phase::Inactive
    }

    pub fn is_capturing_active(&self) -> bool {
        self.phase == Phase::Capturing && self.panels_created() < self.config.max_panels
    }

    pub fn panels_created(&self) -> u32 {
        self.panels.len() as u32
    }

    pub fn panels(&self) -> &[Panel<S>] {
        &self.panels
    }

    pub fn panel(&self, index: u32) -> Option<&Panel<S>> {
        self.panels.get(index as usize)
    }

    pub fn state(&self) -> EngineState {
        EngineState {
            phase: self.phase,
            panels_created: self.panels_created(),
            max_panels: self.config.max_panels,
            last_capture_ms: self.last_capture_ms,
            activated_at_ms: self.activated_at_ms,
        }
    }
}
