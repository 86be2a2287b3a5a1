//! # Client World
//!
//! Every object the client knows about, keyed by identity.
//!
//! ```text
//!  apply_move / apply_teleport ──▶ combine(current pose, packet) ──▶ MotionInterpolator
//!  apply_attribute ──────────────▶ RenderStateController
//!  attach ───────────────────────▶ Anchor { ObjectReference<BodyHandle>, offset }
//!
//!  tick():  1. every object: begin_tick, advance motion, tick display
//!           2. every anchored object: resolve anchor, follow or detach
//!
//!  frame(partial): render pose + sampled render state
//! ```
//!
//! Objects live in an [`ObjectRegistry`], so an anchor whose target is
//! despawned notices on its next resolve and detaches.

use glide_motion::{combine, CollisionOracle, MotionBody, MotionInterpolator};
use glide_refs::{Handle, Identity, LiveHandle, ObjectReference, ObjectRegistry};
use glide_render::{AttributeUpdate, DisplayData, RenderFrame, RenderStateController};
use glide_shared::{Aabb, AbsoluteTransform, DVec3, Pose, RelativeMovePacket};

use crate::body::SimBody;
use crate::config::GlideConfig;
use crate::error::{GlideError, GlideResult};

/// Immovable collision boxes used to vet externally caused motion.
#[derive(Clone, Debug, Default)]
pub struct StaticColliders {
    boxes: Vec<Aabb>,
}

impl StaticColliders {
    /// No colliders.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a box.
    pub fn add(&mut self, aabb: Aabb) {
        self.boxes.push(aabb);
    }

    /// Removes every box.
    pub fn clear(&mut self) {
        self.boxes.clear();
    }

    /// Number of boxes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    /// Whether there are no boxes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }
}

impl CollisionOracle for StaticColliders {
    fn no_collision(&self, volume: &Aabb) -> bool {
        !self.boxes.iter().any(|aabb| aabb.intersects(volume))
    }
}

/// A display following another object at a fixed offset.
#[derive(Clone, Debug)]
struct Anchor {
    target: ObjectReference<BodyHandle>,
    offset: DVec3,
}

/// One object in the world.
#[derive(Debug)]
pub struct WorldObject {
    body: SimBody,
    motion: MotionInterpolator,
    display: Option<RenderStateController>,
    anchor: Option<Anchor>,
}

impl WorldObject {
    fn new(body: SimBody, steps: u32, display: Option<RenderStateController>) -> Self {
        Self {
            body,
            motion: MotionInterpolator::new(steps),
            display,
            anchor: None,
        }
    }

    /// The body.
    #[must_use]
    pub fn body(&self) -> &SimBody {
        &self.body
    }

    /// The motion interpolator.
    #[must_use]
    pub fn motion(&self) -> &MotionInterpolator {
        &self.motion
    }

    /// The render-state controller, `None` for plain bodies.
    #[must_use]
    pub fn display(&self) -> Option<&RenderStateController> {
        self.display.as_ref()
    }

    /// Whether this object is a display.
    #[must_use]
    pub fn is_display(&self) -> bool {
        self.display.is_some()
    }

    /// Identity of the anchor target, if anchored.
    #[must_use]
    pub fn anchor(&self) -> Option<Identity> {
        self.anchor.as_ref().map(|anchor| anchor.target.identity())
    }

    fn resolve(&self, packet: &RelativeMovePacket) -> AbsoluteTransform {
        let base = AbsoluteTransform::with_pose(self.motion.current_pose(&self.body), self.body.velocity());
        combine(&base, &packet.transform, packet.mask)
    }

    fn step(&mut self, colliders: &StaticColliders) {
        self.body.begin_tick();
        self.motion.advance(&mut self.body, colliders);
        if let Some(display) = &mut self.display {
            display.tick();
        }
    }

    fn frame(&mut self, identity: Identity, partial_tick: f32) -> ObjectFrame<'_> {
        ObjectFrame {
            identity,
            pose: self.body.render_pose(partial_tick),
            display: self.display.as_mut().and_then(|display| display.frame(partial_tick)),
        }
    }
}

/// Handle to an object that can be anchored to (anything but a display).
#[derive(Clone, Debug)]
pub struct BodyHandle(Handle<WorldObject>);

impl TryFrom<Handle<WorldObject>> for BodyHandle {
    type Error = Handle<WorldObject>;

    fn try_from(handle: Handle<WorldObject>) -> Result<Self, Self::Error> {
        let is_display = handle.read().is_display();
        if is_display {
            Err(handle)
        } else {
            Ok(Self(handle))
        }
    }
}

impl LiveHandle for BodyHandle {
    fn identity(&self) -> Identity {
        self.0.identity()
    }

    fn is_valid(&self) -> bool {
        self.0.is_valid()
    }
}

/// What to draw for one object this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ObjectFrame<'a> {
    /// The object.
    pub identity: Identity,
    /// Pose between the previous and current tick.
    pub pose: Pose,
    /// Sampled render state for displays that have ticked at least once.
    pub display: Option<RenderFrame<'a>>,
}

/// The client's view of the world.
#[derive(Debug)]
pub struct ClientWorld {
    config: GlideConfig,
    objects: ObjectRegistry<WorldObject>,
    colliders: StaticColliders,
    tick: u64,
    scratch: Vec<Handle<WorldObject>>,
}

impl ClientWorld {
    /// An empty world.
    #[must_use]
    pub fn new(config: GlideConfig) -> Self {
        Self {
            config,
            objects: ObjectRegistry::new(),
            colliders: StaticColliders::new(),
            tick: 0,
            scratch: Vec::new(),
        }
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &GlideConfig {
        &self.config
    }

    /// Collision boxes.
    #[must_use]
    pub fn colliders(&self) -> &StaticColliders {
        &self.colliders
    }

    /// Mutable collision boxes.
    pub fn colliders_mut(&mut self) -> &mut StaticColliders {
        &mut self.colliders
    }

    /// The object registry, usable as an identity lookup.
    #[must_use]
    pub fn objects(&self) -> &ObjectRegistry<WorldObject> {
        &self.objects
    }

    /// Ticks processed so far.
    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    /// Number of objects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the world is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Whether `identity` is loaded.
    #[must_use]
    pub fn contains(&self, identity: Identity) -> bool {
        self.objects.contains(identity)
    }

    /// Spawns a default-sized body using the configured step count.
    pub fn spawn_body(&mut self, identity: Identity, pose: Pose) {
        let object = WorldObject::new(SimBody::at(pose), self.config.motion.steps, None);
        self.objects.insert(identity, object);
        tracing::info!(%identity, position = ?pose.position, "Spawned body");
    }

    /// Spawns a display. Its motion step count comes from
    /// [`DisplayData::pos_rot_interpolation_duration`].
    pub fn spawn_display(&mut self, identity: Identity, pose: Pose, data: DisplayData) {
        let steps = data.pos_rot_interpolation_duration;
        let kind = data.kind();
        let controller = RenderStateController::new(data);
        let object = WorldObject::new(SimBody::new(pose, 0.0, 0.0), steps, Some(controller));
        self.objects.insert(identity, object);
        tracing::info!(%identity, ?kind, position = ?pose.position, "Spawned display");
    }

    /// Removes an object. Anchors pointing at it detach on the next tick.
    ///
    /// # Errors
    ///
    /// [`GlideError::UnknownObject`] if nothing is registered under
    /// `identity`.
    pub fn despawn(&mut self, identity: Identity) -> GlideResult<()> {
        self.objects
            .remove(identity)
            .ok_or(GlideError::UnknownObject(identity))?;
        tracing::info!(%identity, "Despawned object");
        Ok(())
    }

    fn handle(&self, identity: Identity) -> GlideResult<Handle<WorldObject>> {
        self.objects
            .get(identity)
            .ok_or(GlideError::UnknownObject(identity))
    }

    /// Runs `f` against an object.
    ///
    /// # Errors
    ///
    /// [`GlideError::UnknownObject`] if `identity` is not loaded.
    pub fn with_object<R>(&self, identity: Identity, f: impl FnOnce(&WorldObject) -> R) -> GlideResult<R> {
        let handle = self.handle(identity)?;
        let object = handle.read();
        Ok(f(&object))
    }

    /// Current (not render-interpolated) pose of an object.
    ///
    /// # Errors
    ///
    /// [`GlideError::UnknownObject`] if `identity` is not loaded.
    pub fn pose(&self, identity: Identity) -> GlideResult<Pose> {
        self.with_object(identity, |object| object.body.pose())
    }

    /// Applies an encoded relative-move packet, interpolating towards the
    /// result.
    ///
    /// Relative fields are resolved against the pending target while the
    /// object is still interpolating, so consecutive relative moves add up.
    ///
    /// # Errors
    ///
    /// [`GlideError::Wire`] if the payload is truncated,
    /// [`GlideError::UnknownObject`] if `identity` is not loaded.
    pub fn apply_move(&mut self, identity: Identity, payload: &[u8]) -> GlideResult<()> {
        let packet = RelativeMovePacket::from_bytes(payload)?;
        let handle = self.handle(identity)?;
        let mut object = handle.write();
        let next = object.resolve(&packet);

        let WorldObject { body, motion, .. } = &mut *object;
        body.set_velocity(next.velocity);
        motion.set_target(body, next.pose());
        Ok(())
    }

    /// Applies an encoded relative-move packet as a teleport: any pending
    /// interpolation is dropped and the object jumps.
    ///
    /// # Errors
    ///
    /// As [`Self::apply_move`].
    pub fn apply_teleport(&mut self, identity: Identity, payload: &[u8]) -> GlideResult<()> {
        let packet = RelativeMovePacket::from_bytes(payload)?;
        let handle = self.handle(identity)?;
        let mut object = handle.write();
        let next = object.resolve(&packet);

        object.motion.cancel();
        object.body.set_velocity(next.velocity);
        object.body.teleport(next.pose());
        tracing::debug!(%identity, position = ?next.position, "Teleported object");
        Ok(())
    }

    /// Applies an attribute update to a display.
    ///
    /// Returns `Ok(false)` if the object is not a display or the update is
    /// for another display kind. A new pos/rot interpolation duration also
    /// becomes the object's motion step count.
    ///
    /// # Errors
    ///
    /// [`GlideError::UnknownObject`] if `identity` is not loaded.
    pub fn apply_attribute(&mut self, identity: Identity, update: AttributeUpdate) -> GlideResult<bool> {
        let handle = self.handle(identity)?;
        let mut object = handle.write();
        let WorldObject { motion, display, .. } = &mut *object;

        let Some(display) = display else {
            tracing::warn!(%identity, attribute = ?update.attribute(), "Attribute update for a non-display object");
            return Ok(false);
        };

        let steps = match update {
            AttributeUpdate::PosRotInterpolationDuration(steps) => Some(steps),
            _ => None,
        };
        if !display.apply(update) {
            return Ok(false);
        }
        if let Some(steps) = steps {
            motion.set_step_count(steps);
        }
        Ok(true)
    }

    /// Makes `identity` follow `target` at `offset` from the next tick on.
    ///
    /// # Errors
    ///
    /// [`GlideError::UnknownObject`] if either object is not loaded, or if
    /// `target` is a display (displays cannot be anchored to).
    pub fn attach(&mut self, identity: Identity, target: Identity, offset: DVec3) -> GlideResult<()> {
        let target_handle = BodyHandle::try_from(self.handle(target)?)
            .map_err(|_| GlideError::UnknownObject(target))?;
        let handle = self.handle(identity)?;
        handle.write().anchor = Some(Anchor {
            target: ObjectReference::resolved(target_handle),
            offset,
        });
        tracing::debug!(%identity, %target, "Attached to anchor");
        Ok(())
    }

    /// Stops `identity` following its anchor. Returns whether it had one.
    ///
    /// # Errors
    ///
    /// [`GlideError::UnknownObject`] if `identity` is not loaded.
    pub fn detach(&mut self, identity: Identity) -> GlideResult<bool> {
        let handle = self.handle(identity)?;
        let detached = handle.write().anchor.take().is_some();
        if detached {
            tracing::debug!(%identity, "Detached from anchor");
        }
        Ok(detached)
    }

    /// Advances every object by one tick, then moves anchored objects onto
    /// their targets.
    pub fn tick(&mut self) {
        self.tick += 1;
        let mut handles = std::mem::take(&mut self.scratch);
        self.objects.collect_handles(&mut handles);

        for handle in &handles {
            handle.write().step(&self.colliders);
        }
        for handle in &handles {
            self.follow_anchor(handle);
        }

        handles.clear();
        self.scratch = handles;
    }

    fn follow_anchor(&self, handle: &Handle<WorldObject>) {
        let Some(mut anchor) = handle.write().anchor.take() else {
            return;
        };

        let Some(target) = anchor.target.resolve(&self.objects) else {
            tracing::info!(
                identity = %handle.identity(),
                target = %anchor.target.identity(),
                "Anchor target gone, detaching"
            );
            return;
        };
        let target_pose = target.0.read().body.pose();

        let mut object = handle.write();
        object.motion.cancel();
        object.body.set_pose(Pose::new(
            target_pose.position + anchor.offset,
            target_pose.yaw,
            target_pose.pitch,
        ));
        object.anchor = Some(anchor);
    }

    /// Calls `f` with the frame of one object at `partial_tick`.
    ///
    /// The object stays locked while `f` runs, so `f` cannot reach back into
    /// the world:
    ///
    /// ```compile_fail
    /// use glide::refs::Identity;
    /// use glide::shared::Pose;
    /// use glide::{ClientWorld, GlideConfig};
    ///
    /// let mut world = ClientWorld::new(GlideConfig::default());
    /// let id = Identity::from_u128(1);
    /// world.spawn_body(id, Pose::default());
    /// let _ = world.frame(id, 0.5, |frame| (frame.pose, world.pose(id).is_ok()));
    /// ```
    ///
    /// # Errors
    ///
    /// [`GlideError::UnknownObject`] if `identity` is not loaded.
    pub fn frame<R>(
        &mut self,
        identity: Identity,
        partial_tick: f32,
        f: impl FnOnce(ObjectFrame<'_>) -> R,
    ) -> GlideResult<R> {
        let handle = self.handle(identity)?;
        let mut object = handle.write();
        Ok(f(object.frame(identity, partial_tick)))
    }

    /// Calls `f` with the frame of every object at `partial_tick`, in no
    /// particular order.
    pub fn frames(&mut self, partial_tick: f32, mut f: impl FnMut(ObjectFrame<'_>)) {
        let mut handles = std::mem::take(&mut self.scratch);
        self.objects.collect_handles(&mut handles);

        for handle in &handles {
            let identity = handle.identity();
            let mut object = handle.write();
            f(object.frame(identity, partial_tick));
        }

        handles.clear();
        self.scratch = handles;
    }

    /// Moves a body outside of interpolation, as local physics would.
    ///
    /// # Errors
    ///
    /// [`GlideError::UnknownObject`] if `identity` is not loaded.
    pub fn push(&mut self, identity: Identity, delta: DVec3) -> GlideResult<()> {
        let handle = self.handle(identity)?;
        handle.write().body.push(delta);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glide_render::{DisplayKind, SubFrame};
    use glide_shared::{RelativeFlag, RelativeUpdateMask};

    const BODY: Identity = Identity::from_u128(1);
    const LABEL: Identity = Identity::from_u128(2);

    fn move_to(x: f64) -> [u8; RelativeMovePacket::ENCODED_LEN] {
        let transform = AbsoluteTransform::absolute(DVec3::new(x, 0.0, 0.0), 0.0, 0.0);
        RelativeMovePacket::new(transform, RelativeUpdateMask::NONE).to_bytes()
    }

    fn world() -> ClientWorld {
        let mut world = ClientWorld::new(GlideConfig::default());
        world.spawn_body(BODY, Pose::default());
        world
    }

    #[test]
    fn test_move_interpolates_over_configured_steps() {
        let mut world = world();
        world.apply_move(BODY, &move_to(9.0)).unwrap();

        let mut xs = Vec::new();
        for _ in 0..4 {
            world.tick();
            xs.push(world.pose(BODY).unwrap().position.x);
        }
        assert!((xs[0] - 3.0).abs() < 1e-9);
        assert!((xs[1] - 6.0).abs() < 1e-9);
        assert!((xs[2] - 9.0).abs() < 1e-9);
        assert!((xs[3] - 9.0).abs() < 1e-9);
    }

    #[test]
    fn test_relative_moves_accumulate_on_target() {
        let mut world = world();
        let step = AbsoluteTransform::absolute(DVec3::new(1.0, 0.0, 0.0), 0.0, 0.0);
        let packet = RelativeMovePacket::new(step, RelativeUpdateMask::POSITION).to_bytes();

        world.apply_move(BODY, &packet).unwrap();
        world.apply_move(BODY, &packet).unwrap();
        for _ in 0..3 {
            world.tick();
        }
        assert!((world.pose(BODY).unwrap().position.x - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_teleport_snaps() {
        let mut world = world();
        world.apply_move(BODY, &move_to(5.0)).unwrap();
        world.apply_teleport(BODY, &move_to(50.0)).unwrap();

        assert_eq!(world.pose(BODY).unwrap().position.x, 50.0);
        let interpolating = world.with_object(BODY, |o| o.motion().is_interpolating()).unwrap();
        assert!(!interpolating);
        let drawn = world.frame(BODY, 0.0, |frame| frame.pose.position.x).unwrap();
        assert_eq!(drawn, 50.0);
    }

    #[test]
    fn test_velocity_from_packet() {
        let mut world = world();
        let transform = AbsoluteTransform::new(DVec3::ZERO, DVec3::new(0.0, 0.5, 0.0), 0.0, 0.0);
        let mask = RelativeUpdateMask::NONE | RelativeFlag::X;
        world
            .apply_move(BODY, &RelativeMovePacket::new(transform, mask).to_bytes())
            .unwrap();
        let velocity = world.with_object(BODY, |o| o.body().velocity()).unwrap();
        assert_eq!(velocity, DVec3::new(0.0, 0.5, 0.0));
    }

    #[test]
    fn test_errors() {
        let mut world = world();
        let ghost = Identity::from_u128(99);
        assert!(matches!(
            world.apply_move(ghost, &move_to(1.0)),
            Err(GlideError::UnknownObject(id)) if id == ghost
        ));
        assert!(matches!(
            world.apply_move(BODY, &[0u8; 10]),
            Err(GlideError::Wire(_))
        ));
        assert!(matches!(world.despawn(ghost), Err(GlideError::UnknownObject(_))));
    }

    #[test]
    fn test_collider_blocks_external_motion_fold() {
        let mut world = world();
        world.colliders_mut().add(Aabb::new(
            DVec3::new(9.5, 0.0, 1.0),
            DVec3::new(10.5, 2.0, 2.0),
        ));
        world.apply_move(BODY, &move_to(10.0)).unwrap();
        world.tick();

        world.push(BODY, DVec3::new(0.0, 0.0, 1.0)).unwrap();
        world.tick();
        let target = world.with_object(BODY, |o| o.motion().target()).unwrap();
        assert_eq!(target.map(|t| t.position.z), Some(0.0));
    }

    #[test]
    fn test_display_renders_and_follows_anchor() {
        let mut world = world();
        let mut data = DisplayData::new(DisplayKind::Text);
        data.apply(AttributeUpdate::Text("hello".into()));
        world.spawn_display(LABEL, Pose::default(), data);
        world.attach(LABEL, BODY, DVec3::new(0.0, 2.0, 0.0)).unwrap();

        world.apply_teleport(BODY, &move_to(4.0)).unwrap();
        world.tick();

        let (pose, text) = world
            .frame(LABEL, 1.0, |frame| {
                let text = match frame.display.map(|d| d.sub) {
                    Some(SubFrame::Text(text)) => text.text.to_owned(),
                    _ => String::new(),
                };
                (frame.pose, text)
            })
            .unwrap();
        assert_eq!(pose.position, DVec3::new(4.0, 2.0, 0.0));
        assert_eq!(text, "hello");
    }

    #[test]
    fn test_anchor_detaches_when_target_despawned() {
        let mut world = world();
        world.spawn_display(LABEL, Pose::default(), DisplayData::new(DisplayKind::Block));
        world.attach(LABEL, BODY, DVec3::ZERO).unwrap();
        world.tick();
        assert_eq!(world.with_object(LABEL, WorldObject::anchor).unwrap(), Some(BODY));

        world.despawn(BODY).unwrap();
        world.tick();
        assert_eq!(world.with_object(LABEL, WorldObject::anchor).unwrap(), None);
    }

    #[test]
    fn test_cannot_anchor_to_display() {
        let mut world = world();
        world.spawn_display(LABEL, Pose::default(), DisplayData::new(DisplayKind::Block));
        assert!(matches!(
            world.attach(BODY, LABEL, DVec3::ZERO),
            Err(GlideError::UnknownObject(id)) if id == LABEL
        ));
    }

    #[test]
    fn test_pos_rot_duration_sets_display_steps() {
        let mut world = ClientWorld::new(GlideConfig::default());
        world.spawn_display(LABEL, Pose::default(), DisplayData::new(DisplayKind::Item));

        world.apply_move(LABEL, &move_to(2.0)).unwrap();
        assert_eq!(world.pose(LABEL).unwrap().position.x, 2.0);

        assert!(world
            .apply_attribute(LABEL, AttributeUpdate::PosRotInterpolationDuration(2))
            .unwrap());
        world.apply_move(LABEL, &move_to(4.0)).unwrap();
        world.tick();
        assert!((world.pose(LABEL).unwrap().position.x - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_frame_releases_object_before_returning() {
        let mut world = world();
        world.apply_teleport(BODY, &move_to(3.0)).unwrap();

        let drawn = world.frame(BODY, 0.5, |frame| frame.pose).unwrap();
        assert_eq!(drawn, world.pose(BODY).unwrap());
        let pushed = world.push(BODY, DVec3::new(1.0, 0.0, 0.0));
        assert!(pushed.is_ok());
    }

    #[test]
    fn test_frames_visits_every_object_across_ticks() {
        let mut world = world();
        world.spawn_display(LABEL, Pose::default(), DisplayData::new(DisplayKind::Text));

        for _ in 0..3 {
            world.tick();
            let mut seen = Vec::new();
            world.frames(1.0, |frame| seen.push(frame.identity));
            seen.sort();
            assert_eq!(seen, vec![BODY, LABEL]);
        }

        world.despawn(LABEL).unwrap();
        world.tick();
        let mut count = 0;
        world.frames(1.0, |_| count += 1);
        assert_eq!(count, 1);
    }

    #[test]
    fn test_detach_reports_anchor() {
        let mut world = world();
        world.spawn_display(LABEL, Pose::default(), DisplayData::new(DisplayKind::Text));
        world.attach(LABEL, BODY, DVec3::ZERO).unwrap();

        assert!(world.detach(LABEL).unwrap());
        assert!(!world.detach(LABEL).unwrap());
        assert_eq!(world.with_object(LABEL, WorldObject::anchor).unwrap(), None);
    }

    #[test]
    fn test_attribute_on_body_is_ignored() {
        let mut world = world();
        let applied = world
            .apply_attribute(BODY, AttributeUpdate::ShadowRadius(1.0))
            .unwrap();
        assert!(!applied);
    }
}
