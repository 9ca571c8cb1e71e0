//! Per-tick simulation step.
//!
//! Every registered rigid body is integrated in turn. A body that moved is
//! tested against every other registered body: first a padded bounding-box
//! check (broad phase), then a pixel-level buffer intersection (narrow
//! phase). Collision state is edge-triggered through the moving body's
//! `contacts` set:
//!
//! | before      | intersecting now | event     |
//! |-------------|------------------|-----------|
//! | not contact | yes              | `Entered` |
//! | contact     | yes              | `Contact` |
//! | contact     | no               | `Exited`  |
//!
//! The engine never resolves collisions itself; observers react to events.

use crate::body::{BodyEvent, BodyEventKind, BodyId, PhysicsBody};
use crate::core::{BufferAt, IntersectingPixel, PixelBuffer};
use crate::scene::{NodeId, Scene};
use crate::types::{BoundingBox, Point, TickerDelta, ROUGHLY_EQUALS_FUZZINESS};

/// Work counters of the last [`Scene::process`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProcessStats {
    pub moved: usize,
    pub broad_phase_checks: usize,
    pub narrow_phase_checks: usize,
}

/// Shrink `velocity` by `linear_damp * delta_ms`, never past zero.
///
/// Velocities roughly equal to zero snap to zero.
pub fn damp_velocity(velocity: Point, linear_damp: f64, delta_ms: f64) -> Point {
    if velocity.roughly_equals(Point::ZERO, ROUGHLY_EQUALS_FUZZINESS) {
        return Point::ZERO;
    }
    let magnitude = (velocity.magnitude() - linear_damp * delta_ms).max(0.0);
    velocity.normalize() * magnitude
}

impl Scene {
    /// Advance the simulation by `delta.delta_ms` and return the events raised.
    ///
    /// Events are delivered to the moving body's observers before they are
    /// returned. The body registry is snapshotted first, so nothing an
    /// observer does can change which bodies this step visits.
    pub fn process(&mut self, delta: &TickerDelta) -> Vec<BodyEvent> {
        self.stats = ProcessStats::default();
        let registered: Vec<NodeId> = self.bodies.iter().copied().collect();
        let mut events = Vec::new();

        for id in registered.iter().copied() {
            if self.integrate(id, delta.delta_ms) {
                self.stats.moved += 1;
                self.detect_collisions(id, &registered, &mut events);
            }
        }

        log::trace!(
            "process: moved={} broad={} narrow={} events={}",
            self.stats.moved,
            self.stats.broad_phase_checks,
            self.stats.narrow_phase_checks,
            events.len()
        );
        events
    }

    pub fn stats(&self) -> ProcessStats {
        self.stats
    }

    /// Returns whether the body changed position.
    fn integrate(&mut self, id: NodeId, delta_ms: f64) -> bool {
        let scene_force = self.constant_force;
        let Some(node) = self.get_mut(id) else {
            return false;
        };
        let start = node.precise_position();
        let Some(rigid) = node.body.as_mut().and_then(PhysicsBody::as_rigid_mut) else {
            return false;
        };

        let next = start
            + scene_force * delta_ms
            + rigid.constant_force * delta_ms
            + rigid.linear_velocity * delta_ms;
        rigid.linear_velocity = damp_velocity(rigid.linear_velocity, rigid.linear_damp, delta_ms);

        if next == start {
            return false;
        }
        node.position = next;
        node.position_fn = None;
        self.mark_dirty(id);
        true
    }

    /// World box padded to whole cells; `None` for bodies that draw nothing.
    fn collision_box(&self, id: NodeId) -> Option<BoundingBox> {
        let (local, _) = self.local_bounds(self.get(id)?);
        let world = local?.offset(self.world_origin(id).ok()?);
        Some(BoundingBox::new(
            world.left,
            world.top,
            world.right + 1.0,
            world.bottom + 1.0,
        ))
    }

    fn placed_buffer(&self, id: NodeId) -> Option<(PixelBuffer, Point)> {
        self.draw(id).ok().zip(self.world_origin(id).ok())
    }

    fn detect_collisions(&mut self, id: NodeId, registered: &[NodeId], events: &mut Vec<BodyEvent>) {
        let hull = self.collision_hull_thickness;
        let own_box = self.collision_box(id);
        let mut own: Option<(PixelBuffer, Point)> = None;
        let mut hits: Vec<(NodeId, Vec<IntersectingPixel>)> = Vec::new();

        for other in registered.iter().copied() {
            if other == id || !self.bodies.contains(&other) {
                continue;
            }
            self.stats.broad_phase_checks += 1;
            let overlapping = match (own_box, self.collision_box(other)) {
                (Some(a), Some(b)) => a.overlaps(&b, hull),
                _ => false,
            };
            if !overlapping {
                continue;
            }

            self.stats.narrow_phase_checks += 1;
            if own.is_none() {
                own = self.placed_buffer(id);
            }
            let (Some((own_buffer, own_origin)), Some((other_buffer, other_origin))) =
                (own.as_ref(), self.placed_buffer(other))
            else {
                continue;
            };
            let intersections = PixelBuffer::intersect(
                BufferAt::new(own_buffer, *own_origin),
                BufferAt::new(&other_buffer, other_origin),
            );
            if !intersections.is_empty() {
                hits.push((other, intersections));
            }
        }

        let other_bodies: Vec<_> = hits
            .iter()
            .map(|(other, _)| self.body(*other).map(PhysicsBody::id).unwrap_or_default())
            .collect();
        let touching: Vec<NodeId> = hits.iter().map(|(other, _)| *other).collect();
        // looked up before the mover is borrowed; detached bodies never stay in contacts
        let exited: Vec<(NodeId, BodyId)> = match self.body(id) {
            Ok(body) => body
                .contacts
                .iter()
                .filter(|other| !touching.contains(other))
                .map(|&other| (other, self.body(other).map(PhysicsBody::id).unwrap_or_default()))
                .collect(),
            Err(_) => return,
        };
        let Ok(body) = self.body_mut(id) else {
            return;
        };

        let mut raised = Vec::with_capacity(hits.len());
        for ((other, intersections), other_body) in hits.into_iter().zip(other_bodies) {
            let kind = if body.contacts.insert(other) {
                BodyEventKind::Entered
            } else {
                BodyEventKind::Contact
            };
            raised.push(BodyEvent {
                kind,
                target: id,
                other,
                other_body,
                intersections,
            });
        }

        for (other, other_body) in exited {
            body.contacts.remove(&other);
            raised.push(BodyEvent {
                kind: BodyEventKind::Exited,
                target: id,
                other,
                other_body,
                intersections: Vec::new(),
            });
        }

        for event in raised {
            if event.kind != BodyEventKind::Contact {
                log::debug!("{} {} {}", event.kind.as_str(), event.target, event.other);
            }
            body.dispatch(&event);
            events.push(event);
        }
    }
}
