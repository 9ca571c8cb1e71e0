//! Physics bodies and their typed observers.
//!
//! A body is a capability attached to a scene node. Rigid bodies move under
//! velocity and constant forces; static bodies never move but still collide.
//!
//! Observers get mutable access to the body that raised the event and nothing
//! else, so a handler can steer its own body (reverse a force, stop) but cannot
//! touch the scene's body registry while the simulation step iterates it.

use std::collections::BTreeSet;
use std::fmt;
use std::mem;

use crate::core::IntersectingPixel;
use crate::scene::NodeId;
use crate::types::Point;

/// Scene-unique, never reused body identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct BodyId(pub u64);

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "body-{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RigidBody {
    /// Cells per millisecond, decays by `linear_damp`.
    pub linear_velocity: Point,
    /// Cells per millisecond, applied every tick.
    pub constant_force: Point,
    /// Velocity magnitude lost per millisecond.
    pub linear_damp: f64,
    pub inertia: f64,
}

impl RigidBody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_velocity(mut self, velocity: Point) -> Self {
        self.linear_velocity = velocity;
        self
    }

    pub fn with_constant_force(mut self, force: Point) -> Self {
        self.constant_force = force;
        self
    }

    pub fn with_linear_damp(mut self, damp: f64) -> Self {
        self.linear_damp = damp;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BodyKind {
    Rigid(RigidBody),
    Static,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyEventKind {
    Entered,
    Contact,
    Exited,
}

impl BodyEventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BodyEventKind::Entered => "bodyEntered",
            BodyEventKind::Contact => "bodyContact",
            BodyEventKind::Exited => "bodyExited",
        }
    }
}

/// One collision transition, raised on the moving body.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyEvent {
    pub kind: BodyEventKind,
    pub target: NodeId,
    pub other: NodeId,
    pub other_body: BodyId,
    /// Overlapping cells; empty for [`BodyEventKind::Exited`].
    pub intersections: Vec<IntersectingPixel>,
}

pub type BodyObserver = Box<dyn FnMut(&mut PhysicsBody, &BodyEvent)>;

/// Handle returned on registration, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObserverId(u64);

type ObserverList = Vec<(ObserverId, BodyObserver)>;

#[derive(Default)]
struct Observers {
    entered: ObserverList,
    contact: ObserverList,
    exited: ObserverList,
    next_id: u64,
    // the list being dispatched is taken out, so removals requested from a
    // handler are applied once it is put back
    dispatching: Option<BodyEventKind>,
    removed: Vec<ObserverId>,
    cleared: bool,
}

impl Observers {
    fn list_mut(&mut self, kind: BodyEventKind) -> &mut ObserverList {
        match kind {
            BodyEventKind::Entered => &mut self.entered,
            BodyEventKind::Contact => &mut self.contact,
            BodyEventKind::Exited => &mut self.exited,
        }
    }
}

pub struct PhysicsBody {
    pub(crate) id: BodyId,
    pub kind: BodyKind,
    pub(crate) contacts: BTreeSet<NodeId>,
    observers: Observers,
}

impl PhysicsBody {
    pub fn rigid(body: RigidBody) -> Self {
        Self::with_kind(BodyKind::Rigid(body))
    }

    pub fn fixed() -> Self {
        Self::with_kind(BodyKind::Static)
    }

    fn with_kind(kind: BodyKind) -> Self {
        Self {
            id: BodyId::default(),
            kind,
            contacts: BTreeSet::new(),
            observers: Observers::default(),
        }
    }

    /// Assigned by the scene when the node is added.
    pub fn id(&self) -> BodyId {
        self.id
    }

    pub fn is_rigid(&self) -> bool {
        matches!(self.kind, BodyKind::Rigid(_))
    }

    pub fn as_rigid(&self) -> Option<&RigidBody> {
        match &self.kind {
            BodyKind::Rigid(rigid) => Some(rigid),
            BodyKind::Static => None,
        }
    }

    pub fn as_rigid_mut(&mut self) -> Option<&mut RigidBody> {
        match &mut self.kind {
            BodyKind::Rigid(rigid) => Some(rigid),
            BodyKind::Static => None,
        }
    }

    /// Bodies this body currently overlaps.
    pub fn contacts(&self) -> &BTreeSet<NodeId> {
        &self.contacts
    }

    /// Register `observer` for events of `kind`.
    pub fn on(
        &mut self,
        kind: BodyEventKind,
        observer: impl FnMut(&mut PhysicsBody, &BodyEvent) + 'static,
    ) -> ObserverId {
        let id = ObserverId(self.observers.next_id);
        self.observers.next_id += 1;
        self.observers.list_mut(kind).push((id, Box::new(observer)));
        id
    }

    pub fn on_entered(&mut self, observer: impl FnMut(&mut PhysicsBody, &BodyEvent) + 'static) -> ObserverId {
        self.on(BodyEventKind::Entered, observer)
    }

    pub fn on_contact(&mut self, observer: impl FnMut(&mut PhysicsBody, &BodyEvent) + 'static) -> ObserverId {
        self.on(BodyEventKind::Contact, observer)
    }

    pub fn on_exited(&mut self, observer: impl FnMut(&mut PhysicsBody, &BodyEvent) + 'static) -> ObserverId {
        self.on(BodyEventKind::Exited, observer)
    }

    /// Unsubscribe one observer. Returns whether it was registered for `kind`.
    ///
    /// Called from a handler of the same kind, the observer is skipped for
    /// the rest of the current dispatch.
    pub fn off(&mut self, kind: BodyEventKind, id: ObserverId) -> bool {
        let list = self.observers.list_mut(kind);
        let before = list.len();
        list.retain(|(registered, _)| *registered != id);
        if list.len() != before {
            return true;
        }
        if self.observers.dispatching == Some(kind) && !self.observers.removed.contains(&id) {
            self.observers.removed.push(id);
            return true;
        }
        false
    }

    /// Unsubscribe every observer of `kind`.
    pub fn clear(&mut self, kind: BodyEventKind) {
        self.observers.list_mut(kind).clear();
        if self.observers.dispatching == Some(kind) {
            self.observers.cleared = true;
        }
    }

    pub fn observer_count(&self, kind: BodyEventKind) -> usize {
        match kind {
            BodyEventKind::Entered => self.observers.entered.len(),
            BodyEventKind::Contact => self.observers.contact.len(),
            BodyEventKind::Exited => self.observers.exited.len(),
        }
    }

    pub(crate) fn dispatch(&mut self, event: &BodyEvent) {
        let kind = event.kind;
        let mut observers = mem::take(self.observers.list_mut(kind));
        self.observers.dispatching = Some(kind);
        for (id, observer) in observers.iter_mut() {
            if self.observers.cleared || self.observers.removed.contains(id) {
                continue;
            }
            observer(self, event);
        }
        self.observers.dispatching = None;

        let removed = mem::take(&mut self.observers.removed);
        if mem::take(&mut self.observers.cleared) {
            observers.clear();
        } else {
            observers.retain(|(id, _)| !removed.contains(id));
        }
        // keep observers registered from inside a handler
        let added = mem::replace(self.observers.list_mut(kind), observers);
        self.observers.list_mut(kind).extend(added);
    }
}

impl fmt::Debug for PhysicsBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PhysicsBody")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("contacts", &self.contacts)
            .finish_non_exhaustive()
    }
}
