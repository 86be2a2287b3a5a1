//! # Motion Interpolation
//!
//! Spreads each authoritative pose update over a fixed number of ticks.
//!
//! ## State Machine
//!
//! ```text
//!                 set_target(new pose)
//!     ┌──────┐ ─────────────────────────▶ ┌───────────────┐
//!     │ Idle │                            │ Interpolating │ ◀─┐ set_target(differs)
//!     └──────┘ ◀───────────────────────── └───────────────┘ ──┘ (restart)
//!        ▲       advance(), steps hit 0           │
//!        └────────────── cancel() ────────────────┘
//! ```
//!
//! Each `advance()` moves the body `1 / steps_remaining` of the way to the
//! target, so a three-step interpolation covers 1/3, then 1/2 of the rest,
//! then all of what is left.
//!
//! ## External Motion
//!
//! The body may also be moved by local physics between ticks. Before each
//! step the interpolator diffs the body against where it left it last tick.
//! If the diff can be applied to the target without the collision oracle
//! objecting, the target moves with it, so local motion and network
//! smoothing add up instead of fighting each other. If the probe fails the
//! diff is dropped for that tick.

use glide_shared::math::{lerp, rot_lerp};
use glide_shared::{Aabb, DVec3, Pose, DEFAULT_INTERPOLATION_STEPS};

/// An object whose rendered pose is driven by a [`MotionInterpolator`].
pub trait MotionBody {
    /// The body's current pose.
    fn pose(&self) -> Pose;

    /// Moves the body.
    fn set_pose(&mut self, pose: Pose);

    /// The bounding volume the body would occupy standing at `position`.
    fn volume_at(&self, position: DVec3) -> Aabb;
}

/// Host-supplied collision check.
pub trait CollisionOracle {
    /// Returns `true` if `volume` is free of obstacles.
    fn no_collision(&self, volume: &Aabb) -> bool;
}

/// An oracle that never reports a collision.
#[derive(Clone, Copy, Debug, Default)]
pub struct OpenSpace;

impl CollisionOracle for OpenSpace {
    fn no_collision(&self, _volume: &Aabb) -> bool {
        true
    }
}

impl<F> CollisionOracle for F
where
    F: Fn(&Aabb) -> bool,
{
    fn no_collision(&self, volume: &Aabb) -> bool {
        self(volume)
    }
}

/// The pending interpolation: where we are going and how many ticks are left.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InterpolationTarget {
    /// Ticks left until the target is reached. Never zero while stored.
    pub steps_remaining: u32,
    /// The pose being interpolated towards.
    pub target: Pose,
}

/// Interpolator phase.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MotionPhase {
    /// Nothing pending; the body renders at its own pose.
    Idle,
    /// Moving towards a target.
    Interpolating(InterpolationTarget),
}

/// Per-object motion interpolation state machine.
#[derive(Clone, Debug)]
pub struct MotionInterpolator {
    /// Steps a new target is spread over (0 = snap).
    step_count: u32,
    /// Current phase.
    phase: MotionPhase,
    /// Pose the interpolator left the body at, for diffing external motion.
    last_rendered: Option<Pose>,
}

impl MotionInterpolator {
    /// Creates an idle interpolator with the given step count.
    #[must_use]
    pub const fn new(step_count: u32) -> Self {
        Self {
            step_count,
            phase: MotionPhase::Idle,
            last_rendered: None,
        }
    }

    /// Configured step count (0 = snap).
    #[must_use]
    pub const fn step_count(&self) -> u32 {
        self.step_count
    }

    /// Changes the step count used by the next `set_target`.
    ///
    /// An interpolation already in flight keeps its remaining steps.
    pub fn set_step_count(&mut self, step_count: u32) {
        self.step_count = step_count;
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> MotionPhase {
        self.phase
    }

    /// Ticks left in the current interpolation, 0 when idle.
    #[must_use]
    pub const fn steps_remaining(&self) -> u32 {
        match self.phase {
            MotionPhase::Idle => 0,
            MotionPhase::Interpolating(pending) => pending.steps_remaining,
        }
    }

    /// Returns true while a target is pending.
    #[must_use]
    pub const fn is_interpolating(&self) -> bool {
        matches!(self.phase, MotionPhase::Interpolating(_))
    }

    /// The pending target, if any.
    #[must_use]
    pub const fn target(&self) -> Option<Pose> {
        match self.phase {
            MotionPhase::Idle => None,
            MotionPhase::Interpolating(pending) => Some(pending.target),
        }
    }

    /// The pose this object should be treated as having: the pending target
    /// while interpolating, the body's own pose otherwise.
    #[must_use]
    pub fn current_pose<B: MotionBody + ?Sized>(&self, body: &B) -> Pose {
        self.target().unwrap_or_else(|| body.pose())
    }

    /// Accepts a new authoritative pose.
    ///
    /// With a step count of 0 the body snaps immediately. Otherwise a target
    /// equal to [`Self::current_pose`] is ignored, and anything else
    /// (re)starts a full interpolation from where the body is now.
    pub fn set_target<B: MotionBody + ?Sized>(&mut self, body: &mut B, target: Pose) {
        if self.step_count == 0 {
            body.set_pose(target);
            self.cancel();
            tracing::debug!(pose = ?target, "Motion snapped");
            return;
        }

        if self.current_pose(body) == target {
            tracing::trace!(pose = ?target, "Redundant motion target ignored");
            return;
        }

        let restarting = self.is_interpolating();
        self.phase = MotionPhase::Interpolating(InterpolationTarget {
            steps_remaining: self.step_count,
            target,
        });
        self.last_rendered = Some(body.pose());
        tracing::debug!(pose = ?target, steps = self.step_count, restarting, "Motion interpolation started");
    }

    /// Advances one tick towards the target.
    pub fn advance<B, C>(&mut self, body: &mut B, oracle: &C)
    where
        B: MotionBody + ?Sized,
        C: CollisionOracle + ?Sized,
    {
        let MotionPhase::Interpolating(mut pending) = self.phase else {
            self.cancel();
            return;
        };

        let current = body.pose();
        if let Some(last) = self.last_rendered {
            fold_external_motion(&mut pending.target, current, last, body, oracle);
        }

        let fraction = 1.0 / pending.steps_remaining as f32;
        let next = Pose::new(
            current.position.lerp(pending.target.position, 1.0 / f64::from(pending.steps_remaining)),
            rot_lerp(fraction, current.yaw, pending.target.yaw),
            lerp(fraction, current.pitch, pending.target.pitch),
        );
        body.set_pose(next);

        pending.steps_remaining -= 1;
        self.phase = if pending.steps_remaining == 0 {
            tracing::trace!(pose = ?pending.target, "Motion interpolation complete");
            MotionPhase::Idle
        } else {
            MotionPhase::Interpolating(pending)
        };
        self.last_rendered = Some(next);
    }

    /// Drops any pending interpolation and the diff-tracking state.
    pub fn cancel(&mut self) {
        if self.is_interpolating() {
            tracing::debug!(steps_remaining = self.steps_remaining(), "Motion interpolation cancelled");
        }
        self.phase = MotionPhase::Idle;
        self.last_rendered = None;
    }
}

impl Default for MotionInterpolator {
    fn default() -> Self {
        Self::new(DEFAULT_INTERPOLATION_STEPS)
    }
}

/// Moves `target` by however far the body was pushed since `last`.
fn fold_external_motion<B, C>(target: &mut Pose, current: Pose, last: Pose, body: &B, oracle: &C)
where
    B: MotionBody + ?Sized,
    C: CollisionOracle + ?Sized,
{
    let diff = current.position - last.position;
    if diff != DVec3::ZERO {
        let moved = target.position + diff;
        if oracle.no_collision(&body.volume_at(moved)) {
            tracing::trace!(?diff, "External motion folded into target");
            target.position = moved;
        } else {
            tracing::trace!(?diff, "External motion rejected by collision probe");
        }
    }

    target.yaw += current.yaw - last.yaw;
    target.pitch += current.pitch - last.pitch;
}
