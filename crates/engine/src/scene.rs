//! Arena-backed scene graph.
//!
//! Nodes live in a slot arena and are addressed by generational [`NodeId`]s,
//! so a parent owns its children by id and a destroyed node's id can never
//! alias a new one. The scene also keeps the registry of every physics body
//! reachable from the root, updated in lockstep with `append_child` and
//! `remove_child`.
//!
//! # Frames
//!
//! - A node's **local frame** has its origin position at `(0, 0)`; its visual
//!   and its children's positions are expressed there.
//! - [`Scene::bounding_box`] is in the **parent frame**: the local content box
//!   moved by the node's origin position.
//! - [`Scene::world_origin`] sums origin positions up to the root.
//!
//! Bounding boxes are memoized per node and invalidated on the node and all of
//! its ancestors whenever position, anchor, visual or children change.

use std::collections::BTreeSet;
use std::fmt;

use crate::body::{BodyId, PhysicsBody, RigidBody};
use crate::core::{MergeOptions, PixelBuffer, PositionSpec, Shader};
use crate::error::SceneError;
use crate::node::Node;
use crate::physics::ProcessStats;
use crate::settings::Settings;
use crate::types::{BoundingBox, Point, COLLISION_HULL_THICKNESS};
use crate::visual::{Renderable, Visual};

/// Generational handle to a node in a [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

impl NodeId {
    pub(crate) fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    pub fn index(&self) -> usize {
        self.index as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}v{}", self.index, self.generation)
    }
}

struct Slot {
    generation: u32,
    node: Option<Node>,
}

pub struct Scene {
    slots: Vec<Slot>,
    free: Vec<u32>,
    root: NodeId,
    pub(crate) bodies: BTreeSet<NodeId>,
    next_body_id: u64,
    /// Force applied to every rigid body, in cells per millisecond.
    pub constant_force: Point,
    /// Padding added to both boxes in the broad phase.
    pub collision_hull_thickness: f64,
    pub(crate) stats: ProcessStats,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    pub fn new() -> Self {
        let mut scene = Self {
            slots: Vec::new(),
            free: Vec::new(),
            root: NodeId::new(0, 0),
            bodies: BTreeSet::new(),
            next_body_id: 0,
            constant_force: Point::ZERO,
            collision_hull_thickness: COLLISION_HULL_THICKNESS,
            stats: ProcessStats::default(),
        };
        scene.root = scene.insert(Node::new().named("scene"));
        scene
    }

    pub fn with_settings(settings: &Settings) -> Self {
        let mut scene = Self::new();
        scene.collision_hull_thickness = settings.collision_hull_thickness;
        scene
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Add a detached node. Bodies receive their identity here.
    pub fn add(&mut self, mut node: Node) -> NodeId {
        if let Some(body) = node.body.as_mut() {
            body.id = BodyId(self.next_body_id);
            self.next_body_id += 1;
        }
        node.parent = None;
        node.children.clear();
        self.insert(node)
    }

    /// Add a node and attach it under `parent` in one step.
    pub fn spawn(&mut self, parent: NodeId, node: Node) -> Result<NodeId, SceneError> {
        self.require(parent)?;
        let id = self.add(node);
        self.append_child(parent, id)?;
        Ok(id)
    }

    fn insert(&mut self, node: Node) -> NodeId {
        match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.node = Some(node);
                NodeId::new(index, slot.generation)
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    node: Some(node),
                });
                NodeId::new((self.slots.len() - 1) as u32, 0)
            }
        }
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.node.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.slots
            .get(id.index())
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.slots
            .get_mut(id.index())
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
    }

    fn require(&self, id: NodeId) -> Result<&Node, SceneError> {
        self.get(id).ok_or(SceneError::UnknownNode(id))
    }

    fn require_mut(&mut self, id: NodeId) -> Result<&mut Node, SceneError> {
        self.get_mut(id).ok_or(SceneError::UnknownNode(id))
    }

    pub fn node(&self, id: NodeId) -> Result<&Node, SceneError> {
        self.require(id)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|node| node.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |node| node.children.as_slice())
    }

    /// Whether the node is the root or reaches it through its parents.
    pub fn is_attached(&self, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node_id) = current {
            if node_id == self.root {
                return true;
            }
            current = self.parent(node_id);
        }
        false
    }

    fn is_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node_id) = current {
            if node_id == ancestor {
                return true;
            }
            current = self.parent(node_id);
        }
        false
    }

    /// `id` and everything below it, parents before children.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(node_id) = stack.pop() {
            if let Some(node) = self.get(node_id) {
                out.push(node_id);
                stack.extend(node.children.iter().rev().copied());
            }
        }
        out
    }

    /// Attach `child` as the last child of `parent`.
    ///
    /// If `parent` is part of the live tree, every body in the child's subtree
    /// joins the body registry.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), SceneError> {
        self.require(parent)?;
        let child_node = self.require(child)?;
        if child == self.root {
            return Err(SceneError::RootNode);
        }
        if child_node.parent.is_some() {
            return Err(SceneError::AlreadyAttached(child));
        }
        if self.is_ancestor(child, parent) {
            return Err(SceneError::CycleDetected(child));
        }

        self.require_mut(child)?.parent = Some(parent);
        self.require_mut(parent)?.children.push(child);
        self.mark_dirty(parent);

        if self.is_attached(parent) {
            for id in self.descendants(child) {
                if self.get(id).is_some_and(|n| n.body.is_some()) {
                    self.bodies.insert(id);
                }
            }
        }
        Ok(())
    }

    /// Detach `child` from `parent`. The node stays in the arena and can be
    /// attached again.
    ///
    /// Bodies in the subtree leave the registry and disappear from every
    /// remaining body's contacts.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), SceneError> {
        self.require(parent)?;
        if self.require(child)?.parent != Some(parent) {
            return Err(SceneError::NotAChild(child));
        }

        self.require_mut(parent)?.children.retain(|c| *c != child);
        self.require_mut(child)?.parent = None;
        self.mark_dirty(parent);
        self.mark_dirty(child);

        let removed: Vec<NodeId> = self
            .descendants(child)
            .into_iter()
            .filter(|id| self.bodies.contains(id))
            .collect();
        if removed.is_empty() {
            return Ok(());
        }
        for id in &removed {
            self.bodies.remove(id);
        }
        let remaining: Vec<NodeId> = self.bodies.iter().copied().collect();
        for id in remaining.into_iter().chain(removed.iter().copied()) {
            if let Some(body) = self.get_mut(id).and_then(|n| n.body.as_mut()) {
                body.contacts.retain(|c| !removed.contains(c));
            }
        }
        log::debug!("deregistered {} bodies", removed.len());
        Ok(())
    }

    /// Detach (if needed) and free a node and its whole subtree.
    pub fn destroy(&mut self, id: NodeId) -> Result<(), SceneError> {
        if id == self.root {
            return Err(SceneError::RootNode);
        }
        if let Some(parent) = self.require(id)?.parent {
            self.remove_child(parent, id)?;
        }
        for node_id in self.descendants(id) {
            if let Some(slot) = self.slots.get_mut(node_id.index()) {
                slot.node = None;
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(node_id.index);
            }
        }
        Ok(())
    }

    /// Invalidate cached bounds of `id` and every ancestor.
    pub(crate) fn mark_dirty(&self, id: NodeId) {
        let mut current = Some(id);
        while let Some(node_id) = current {
            match self.get(node_id) {
                Some(node) => {
                    node.dirty.set(true);
                    current = node.parent;
                }
                None => break,
            }
        }
    }

    pub fn set_position(&mut self, id: NodeId, position: Point) -> Result<(), SceneError> {
        let node = self.require_mut(id)?;
        node.position = position;
        node.position_fn = None;
        self.mark_dirty(id);
        Ok(())
    }

    pub fn set_position_fn(
        &mut self,
        id: NodeId,
        provider: impl Fn() -> Point + 'static,
    ) -> Result<(), SceneError> {
        self.require_mut(id)?.position_fn = Some(Box::new(provider));
        self.mark_dirty(id);
        Ok(())
    }

    /// Set or clear the anchor string.
    pub fn set_origin(&mut self, id: NodeId, origin: Option<&str>) -> Result<(), SceneError> {
        let spec = origin.map(str::parse::<PositionSpec>).transpose()?;
        self.require_mut(id)?.origin = spec;
        self.mark_dirty(id);
        Ok(())
    }

    pub fn set_visible(&mut self, id: NodeId, visible: bool) -> Result<(), SceneError> {
        self.require_mut(id)?.visible = visible;
        Ok(())
    }

    pub fn set_visual(&mut self, id: NodeId, visual: Option<Visual>) -> Result<(), SceneError> {
        self.require_mut(id)?.visual = visual;
        self.mark_dirty(id);
        Ok(())
    }

    /// Mutate the node's visual in place (e.g. advance a sprite sheet).
    pub fn update_visual<R>(
        &mut self,
        id: NodeId,
        update: impl FnOnce(&mut Visual) -> R,
    ) -> Result<Option<R>, SceneError> {
        let result = self.require_mut(id)?.visual.as_mut().map(update);
        self.mark_dirty(id);
        Ok(result)
    }

    pub fn add_shader(&mut self, id: NodeId, shader: impl Shader + 'static) -> Result<(), SceneError> {
        self.require_mut(id)?.shaders.push(Box::new(shader));
        Ok(())
    }

    pub fn body(&self, id: NodeId) -> Result<&PhysicsBody, SceneError> {
        self.require(id)?.body.as_ref().ok_or(SceneError::NotABody(id))
    }

    pub fn body_mut(&mut self, id: NodeId) -> Result<&mut PhysicsBody, SceneError> {
        self.require_mut(id)?
            .body
            .as_mut()
            .ok_or(SceneError::NotABody(id))
    }

    pub fn rigid_body_mut(&mut self, id: NodeId) -> Result<&mut RigidBody, SceneError> {
        self.body_mut(id)?
            .as_rigid_mut()
            .ok_or(SceneError::NotARigidBody(id))
    }

    /// Registered bodies in id order.
    pub fn bodies(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.bodies.iter().copied()
    }

    pub fn is_registered(&self, id: NodeId) -> bool {
        self.bodies.contains(&id)
    }

    pub fn position(&self, id: NodeId) -> Result<Point, SceneError> {
        Ok(self.require(id)?.position())
    }

    /// Where the node's local `(0, 0)` sits in its parent frame.
    pub fn origin_position(&self, id: NodeId) -> Result<Point, SceneError> {
        let node = self.require(id)?;
        let (local, _) = self.local_bounds(node);
        Ok(self.origin_of(node, local))
    }

    /// Origin position accumulated up to the root.
    pub fn world_origin(&self, id: NodeId) -> Result<Point, SceneError> {
        let mut total = self.origin_position(id)?;
        let mut current = self.parent(id);
        while let Some(node_id) = current {
            total = total + self.origin_position(node_id)?;
            current = self.parent(node_id);
        }
        Ok(total)
    }

    /// Content box in the parent frame; [`BoundingBox::EMPTY`] if nothing was drawn.
    pub fn bounding_box(&self, id: NodeId) -> Result<BoundingBox, SceneError> {
        let node = self.require(id)?;
        let (local, _) = self.local_bounds(node);
        Ok(local.map_or(BoundingBox::EMPTY, |b| b.offset(self.origin_of(node, local))))
    }

    /// Content box in root coordinates.
    pub fn world_bounding_box(&self, id: NodeId) -> Result<BoundingBox, SceneError> {
        let (local, _) = self.local_bounds(self.require(id)?);
        match local {
            Some(b) => Ok(b.offset(self.world_origin(id)?)),
            None => Ok(BoundingBox::EMPTY),
        }
    }

    fn origin_of(&self, node: &Node, local: Option<BoundingBox>) -> Point {
        let position = node.position();
        match (&node.origin, local) {
            (Some(spec), Some(bounds)) => position + spec.anchor_offset(&bounds),
            _ => position,
        }
    }

    /// Content bounds in the node's own frame, plus whether they may be cached.
    ///
    /// Anything depending on a position provider is recomputed every time.
    pub(crate) fn local_bounds(&self, node: &Node) -> (Option<BoundingBox>, bool) {
        if !node.dirty.get() {
            if let Some(memo) = node.memo.get() {
                return (memo, true);
            }
        }

        let mut merged = node.visual.as_ref().and_then(|visual| {
            let buffer = visual.render();
            (!buffer.is_empty()).then(|| buffer.bounding_box())
        });
        let mut cacheable = true;
        for child in node.children.iter().filter_map(|id| self.get(*id)) {
            let (child_local, child_cacheable) = self.local_bounds(child);
            cacheable &= child_cacheable && !child.is_dynamic();
            if let Some(bounds) = child_local {
                let placed = bounds.offset(self.origin_of(child, child_local));
                merged = Some(merged.map_or(placed, |m| m.merge(&placed)));
            }
        }

        if cacheable {
            node.memo.set(Some(merged));
            node.dirty.set(false);
        }
        (merged, cacheable)
    }

    /// Render a node and its visible descendants in the node's local frame.
    ///
    /// Shaders run on the composed buffer before it is handed to the caller.
    pub fn draw(&self, id: NodeId) -> Result<PixelBuffer, SceneError> {
        Ok(self.draw_node(self.require(id)?))
    }

    fn draw_node(&self, node: &Node) -> PixelBuffer {
        let mut buffer = node
            .visual
            .as_ref()
            .map(Renderable::render)
            .unwrap_or_default();

        for child in node.children.iter().filter_map(|id| self.get(*id)) {
            if !child.visible {
                continue;
            }
            let (local, _) = self.local_bounds(child);
            let offset = self.origin_of(child, local);
            buffer.merge(&self.draw_node(child), MergeOptions::at(offset));
        }

        for shader in &node.shaders {
            shader.apply(&mut buffer);
        }
        buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Background, Rectangle, Shape};
    use std::cell::Cell;
    use std::rc::Rc;

    fn block(width: f64, height: f64, fill: char) -> Node {
        Node::new()
            .with_visual(Shape::from(Rectangle::new(Point::ZERO, width, height)))
            .with_shader(Background::fill(fill))
    }

    #[test]
    fn test_append_and_draw() {
        let mut scene = Scene::new();
        let root = scene.root();
        let a = scene.spawn(root, block(2.0, 1.0, 'a').named("a")).unwrap();
        scene.set_position(a, Point::new(1.0, 1.0)).unwrap();
        let buffer = scene.draw(root).unwrap();
        assert_eq!(buffer.to_string(), "aa\n");
        assert_eq!(buffer.get(1, 1), Some(Some('a')));
    }

    #[test]
    fn test_invisible_children_are_not_drawn() {
        let mut scene = Scene::new();
        let root = scene.root();
        scene.spawn(root, block(1.0, 1.0, 'x').hidden()).unwrap();
        assert!(scene.draw(root).unwrap().is_empty());
    }

    #[test]
    fn test_bounding_box_merges_children_in_parent_frame() {
        let mut scene = Scene::new();
        let root = scene.root();
        let group = scene.spawn(root, Node::at((10.0, 10.0))).unwrap();
        let a = scene.spawn(group, block(2.0, 2.0, 'a')).unwrap();
        let b = scene.spawn(group, block(1.0, 1.0, 'b')).unwrap();
        scene.set_position(a, Point::new(0.0, 0.0)).unwrap();
        scene.set_position(b, Point::new(4.0, 3.0)).unwrap();

        assert_eq!(
            scene.bounding_box(group).unwrap(),
            BoundingBox::new(10.0, 10.0, 14.0, 13.0)
        );
        assert_eq!(scene.world_origin(b).unwrap(), Point::new(14.0, 13.0));
        assert_eq!(
            scene.world_bounding_box(b).unwrap(),
            BoundingBox::new(14.0, 13.0, 14.0, 13.0)
        );
    }

    #[test]
    fn test_moving_a_child_invalidates_ancestors() {
        let mut scene = Scene::new();
        let root = scene.root();
        let group = scene.spawn(root, Node::new()).unwrap();
        let leaf = scene.spawn(group, block(1.0, 1.0, 'x')).unwrap();

        assert_eq!(scene.bounding_box(root).unwrap().right, 0.0);
        scene.set_position(leaf, Point::new(5.0, 0.0)).unwrap();
        assert_eq!(scene.bounding_box(root).unwrap().right, 5.0);
    }

    #[test]
    fn test_dynamic_position_is_never_cached() {
        let mut scene = Scene::new();
        let root = scene.root();
        let x = Rc::new(Cell::new(0.0));
        let source = x.clone();
        let node = block(1.0, 1.0, 'o').with_position_fn(move || Point::new(source.get(), 0.0));
        scene.spawn(root, node).unwrap();

        assert_eq!(scene.bounding_box(root).unwrap().left, 0.0);
        x.set(3.0);
        assert_eq!(scene.bounding_box(root).unwrap().left, 3.0);
    }

    #[test]
    fn test_origin_anchors_box() {
        let mut scene = Scene::new();
        let root = scene.root();
        // 5 x 3 cells anchored at its bottom-right cell
        let node = block(5.0, 3.0, '#').with_origin("100% 100%").unwrap();
        let id = scene.spawn(root, node).unwrap();
        scene.set_position(id, Point::new(10.0, 10.0)).unwrap();

        assert_eq!(scene.origin_position(id).unwrap(), Point::new(6.0, 8.0));
        assert_eq!(
            scene.bounding_box(id).unwrap(),
            BoundingBox::new(6.0, 8.0, 10.0, 10.0)
        );

        scene.set_origin(id, None).unwrap();
        assert_eq!(scene.origin_position(id).unwrap(), Point::new(10.0, 10.0));
        assert!(scene.set_origin(id, Some("bogus")).is_err());
    }

    #[test]
    fn test_tree_errors() {
        let mut scene = Scene::new();
        let root = scene.root();
        let a = scene.spawn(root, Node::new()).unwrap();
        let b = scene.spawn(a, Node::new()).unwrap();

        assert_eq!(scene.append_child(root, a), Err(SceneError::AlreadyAttached(a)));
        assert_eq!(scene.append_child(b, root), Err(SceneError::RootNode));
        scene.remove_child(root, a).unwrap();
        assert_eq!(scene.append_child(b, a), Err(SceneError::CycleDetected(a)));
        assert_eq!(scene.remove_child(root, b), Err(SceneError::NotAChild(b)));
        assert_eq!(scene.destroy(root), Err(SceneError::RootNode));
    }

    #[test]
    fn test_destroyed_ids_are_not_reused() {
        let mut scene = Scene::new();
        let root = scene.root();
        let a = scene.spawn(root, Node::new()).unwrap();
        let child = scene.spawn(a, Node::new()).unwrap();
        scene.destroy(a).unwrap();

        assert!(!scene.contains(a));
        assert!(!scene.contains(child));
        assert!(scene.children(root).is_empty());

        let fresh = scene.add(Node::new());
        assert_eq!(fresh.index(), child.index());
        assert_ne!(fresh, child);
        assert_eq!(scene.position(child), Err(SceneError::UnknownNode(child)));
    }

    #[test]
    fn test_body_registry_tracks_subtrees() {
        let mut scene = Scene::new();
        let root = scene.root();

        let group = scene.add(Node::new());
        let body = scene.add(Node::new().with_body(PhysicsBody::fixed()));
        scene.append_child(group, body).unwrap();
        assert!(!scene.is_registered(body));

        scene.append_child(root, group).unwrap();
        assert!(scene.is_registered(body));

        scene.remove_child(root, group).unwrap();
        assert_eq!(scene.bodies().count(), 0);
    }

    #[test]
    fn test_body_ids_are_monotonic() {
        let mut scene = Scene::new();
        let a = scene.add(Node::new().with_body(PhysicsBody::fixed()));
        let plain = scene.add(Node::new());
        let b = scene.add(Node::new().with_body(PhysicsBody::rigid(RigidBody::new())));
        assert_eq!(scene.body(a).unwrap().id(), BodyId(0));
        assert_eq!(scene.body(b).unwrap().id(), BodyId(1));
        assert_eq!(scene.body(plain).unwrap_err(), SceneError::NotABody(plain));
        assert_eq!(scene.rigid_body_mut(a).unwrap_err(), SceneError::NotARigidBody(a));
    }

    #[test]
    fn test_update_visual_marks_dirty() {
        let mut scene = Scene::new();
        let root = scene.root();
        let id = scene.spawn(root, block(1.0, 1.0, 'x')).unwrap();
        assert_eq!(scene.bounding_box(id).unwrap().width, 0.0);

        scene
            .update_visual(id, |visual| {
                *visual = Visual::shape(Rectangle::new(Point::ZERO, 3.0, 1.0));
            })
            .unwrap();
        assert_eq!(scene.bounding_box(id).unwrap().width, 2.0);
    }
}
