//! Simulated bodies.

use glide_motion::MotionBody;
use glide_shared::{Aabb, AbsoluteTransform, DVec3, Pose};

/// Default footprint width of a body.
pub const DEFAULT_WIDTH: f64 = 0.6;

/// Default height of a body.
pub const DEFAULT_HEIGHT: f64 = 1.8;

/// A client-side body: the pose it is drawn at plus what local physics
/// needs.
#[derive(Clone, Debug, PartialEq)]
pub struct SimBody {
    pose: Pose,
    previous: Pose,
    velocity: DVec3,
    width: f64,
    height: f64,
}

impl SimBody {
    /// A body at `pose` with the given footprint.
    #[must_use]
    pub fn new(pose: Pose, width: f64, height: f64) -> Self {
        Self {
            pose,
            previous: pose,
            velocity: DVec3::ZERO,
            width,
            height,
        }
    }

    /// A body of the default size.
    #[must_use]
    pub fn at(pose: Pose) -> Self {
        Self::new(pose, DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }

    /// Velocity in blocks per tick.
    #[must_use]
    pub fn velocity(&self) -> DVec3 {
        self.velocity
    }

    /// Replaces the velocity.
    pub fn set_velocity(&mut self, velocity: DVec3) {
        self.velocity = velocity;
    }

    /// Pose at the start of the current tick.
    #[must_use]
    pub fn previous_pose(&self) -> Pose {
        self.previous
    }

    /// Remembers the current pose as the start of the next tick.
    pub fn begin_tick(&mut self) {
        self.previous = self.pose;
    }

    /// Moves the body and forgets where it was, so the move is not drawn.
    pub fn teleport(&mut self, pose: Pose) {
        self.pose = pose;
        self.previous = pose;
    }

    /// Moves the body by `delta` outside of interpolation, as local physics
    /// would.
    pub fn push(&mut self, delta: DVec3) {
        self.pose.position = self.pose.position + delta;
    }

    /// Pose to draw at `partial_tick` between the previous and current tick.
    #[must_use]
    pub fn render_pose(&self, partial_tick: f32) -> Pose {
        self.previous.lerp(self.pose, partial_tick.clamp(0.0, 1.0))
    }

    /// Pose and velocity as an authoritative transform.
    #[must_use]
    pub fn transform(&self) -> AbsoluteTransform {
        AbsoluteTransform::with_pose(self.pose, self.velocity)
    }

    /// Current bounding volume.
    #[must_use]
    pub fn volume(&self) -> Aabb {
        self.volume_at(self.pose.position)
    }
}

impl MotionBody for SimBody {
    fn pose(&self) -> Pose {
        self.pose
    }

    fn set_pose(&mut self, pose: Pose) {
        self.pose = pose;
    }

    fn volume_at(&self, position: DVec3) -> Aabb {
        Aabb::from_feet(position, self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_pose_between_ticks() {
        let mut body = SimBody::at(Pose::default());
        body.begin_tick();
        body.set_pose(Pose::new(DVec3::new(4.0, 0.0, 0.0), 90.0, 0.0));

        let mid = body.render_pose(0.25);
        assert_eq!(mid.position.x, 1.0);
        assert_eq!(mid.yaw, 22.5);
        assert_eq!(body.render_pose(1.0), body.pose());
    }

    #[test]
    fn test_teleport_is_not_drawn() {
        let mut body = SimBody::at(Pose::default());
        let far = Pose::new(DVec3::new(100.0, 64.0, -3.0), 0.0, 0.0);
        body.teleport(far);
        assert_eq!(body.render_pose(0.0), far);
    }

    #[test]
    fn test_volume_follows_pose() {
        let body = SimBody::new(Pose::new(DVec3::new(1.0, 2.0, 3.0), 0.0, 0.0), 2.0, 1.0);
        let volume = body.volume();
        assert_eq!(volume.min, DVec3::new(0.0, 2.0, 2.0));
        assert_eq!(volume.max, DVec3::new(2.0, 3.0, 4.0));
    }
}
