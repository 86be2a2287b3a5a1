//! # Render-State Controller
//!
//! Owns a display's attributes and turns change notifications into at most
//! one render-state rebuild per tick.
//!
//! ```text
//! apply / notify ──▶ pending flags (RENDER | DURATION | START)
//!                          │
//!          tick() ─────────┤ START    → start_tick = tick + delay
//!                          │ DURATION → latch duration
//!                          │ RENDER   → rebuild RenderState
//!                          ▼
//!          frame(partial) ──▶ RenderState::sample(progress)
//! ```
//!
//! The rebuild seeds new interpolators from the old state at the last
//! progress that was actually shown, so changing a value mid-interpolation
//! continues smoothly from where the viewer saw it.

use crate::attributes::{Attribute, AttributeUpdate, DisplayData, DisplayKind};
use crate::progress::InterpolationClock;
use crate::state::{RenderFrame, RenderState};

const PENDING_RENDER: u8 = 1 << 0;
const PENDING_DURATION: u8 = 1 << 1;
const PENDING_START: u8 = 1 << 2;
const PENDING_ALL: u8 = PENDING_RENDER | PENDING_DURATION | PENDING_START;

/// Per-display render-state controller.
#[derive(Clone, Debug)]
pub struct RenderStateController {
    data: DisplayData,
    pending: u8,
    clock: InterpolationClock,
    render_state: Option<RenderState>,
    rebuilds: u64,
}

impl RenderStateController {
    /// Creates a controller. Its first [`Self::tick`] builds a constant state.
    #[must_use]
    pub fn new(data: DisplayData) -> Self {
        Self {
            data,
            pending: PENDING_ALL,
            clock: InterpolationClock::new(),
            render_state: None,
            rebuilds: 0,
        }
    }

    /// Change callback: records that `attribute` changed this tick.
    pub fn notify(&mut self, attribute: Attribute) {
        match attribute {
            Attribute::InterpolationDuration => self.pending |= PENDING_DURATION,
            Attribute::InterpolationDelay => self.pending |= PENDING_START,
            other if other.affects_render_state() => self.pending |= PENDING_RENDER,
            _ => {}
        }
    }

    /// Stores `update` and notifies.
    ///
    /// Returns `false` if the update is for content this display does not
    /// have; nothing changes in that case.
    pub fn apply(&mut self, update: AttributeUpdate) -> bool {
        let attribute = update.attribute();
        if !self.data.apply(update) {
            tracing::warn!(
                ?attribute,
                kind = ?self.data.kind(),
                "Ignoring attribute update for another display kind"
            );
            return false;
        }
        self.notify(attribute);
        true
    }

    /// Processes this tick's notifications.
    pub fn tick(&mut self) {
        self.clock.advance();

        if self.pending & PENDING_START != 0 {
            self.clock.restart(self.data.interpolation_delay);
        }
        if self.pending & PENDING_DURATION != 0 {
            self.clock.set_duration(self.data.interpolation_duration);
        }
        if self.pending & PENDING_RENDER != 0 {
            self.rebuild();
        }
        self.pending = 0;
    }

    fn rebuild(&mut self) {
        let progress = self.clock.last_progress();
        let next = match &self.render_state {
            Some(previous) if self.clock.duration() > 0 => previous.interpolated(&self.data, progress),
            _ => RenderState::fresh(&self.data),
        };
        self.render_state = Some(next);
        self.rebuilds += 1;
        tracing::trace!(
            tick = self.clock.tick(),
            progress,
            rebuilds = self.rebuilds,
            "Rebuilt render state"
        );
    }

    /// Interpolation progress at `partial_tick`, remembered for the next
    /// rebuild.
    pub fn progress(&mut self, partial_tick: f32) -> f32 {
        self.clock.progress(partial_tick)
    }

    /// Samples the current state at `partial_tick`. `None` before the first
    /// tick.
    pub fn frame(&mut self, partial_tick: f32) -> Option<RenderFrame<'_>> {
        let progress = self.clock.progress(partial_tick);
        self.render_state.as_ref().map(|state| state.sample(progress))
    }

    /// The current render state, `None` before the first tick.
    #[must_use]
    pub fn render_state(&self) -> Option<&RenderState> {
        self.render_state.as_ref()
    }

    /// Current attributes.
    #[must_use]
    pub fn data(&self) -> &DisplayData {
        &self.data
    }

    /// Display kind.
    #[must_use]
    pub fn kind(&self) -> DisplayKind {
        self.data.kind()
    }

    /// Number of rebuilds so far.
    #[must_use]
    pub fn rebuilds(&self) -> u64 {
        self.rebuilds
    }

    /// Whether any notification is waiting for the next tick.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.pending != 0
    }
}
