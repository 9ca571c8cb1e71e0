//! Scene graph nodes.
//!
//! A node is composed from optional capabilities instead of a class
//! hierarchy: a position (fixed or provided by a closure), an anchor, a
//! visual, shaders and a physics body. Tree links and cached bounds are owned
//! by the [`Scene`](crate::Scene) arena.

use std::cell::Cell;
use std::fmt;

use crate::body::PhysicsBody;
use crate::core::{CoreError, PositionSpec, Shader};
use crate::scene::NodeId;
use crate::types::{BoundingBox, Point};
use crate::visual::Visual;

pub type PositionFn = Box<dyn Fn() -> Point>;

pub struct Node {
    pub name: Option<String>,
    pub(crate) position: Point,
    pub(crate) position_fn: Option<PositionFn>,
    pub(crate) origin: Option<PositionSpec>,
    pub(crate) visible: bool,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) visual: Option<Visual>,
    pub(crate) shaders: Vec<Box<dyn Shader>>,
    pub(crate) body: Option<PhysicsBody>,
    // content bounds in the node's own frame
    pub(crate) dirty: Cell<bool>,
    pub(crate) memo: Cell<Option<Option<BoundingBox>>>,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            name: None,
            position: Point::ZERO,
            position_fn: None,
            origin: None,
            visible: true,
            parent: None,
            children: Vec::new(),
            visual: None,
            shaders: Vec::new(),
            body: None,
            dirty: Cell::new(true),
            memo: Cell::new(None),
        }
    }
}

impl Node {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at(position: impl Into<Point>) -> Self {
        Self {
            position: position.into(),
            ..Self::default()
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_visual(mut self, visual: impl Into<Visual>) -> Self {
        self.visual = Some(visual.into());
        self
    }

    pub fn with_shader(mut self, shader: impl Shader + 'static) -> Self {
        self.shaders.push(Box::new(shader));
        self
    }

    pub fn with_body(mut self, body: PhysicsBody) -> Self {
        self.body = Some(body);
        self
    }

    /// Anchor such as `"50% 100%"`; see [`PositionSpec`].
    pub fn with_origin(mut self, origin: &str) -> Result<Self, CoreError> {
        self.origin = Some(origin.parse()?);
        Ok(self)
    }

    /// Take the position from `provider` every time it is queried.
    pub fn with_position_fn(mut self, provider: impl Fn() -> Point + 'static) -> Self {
        self.position_fn = Some(Box::new(provider));
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Floored position (or the provider's value, unmodified).
    pub fn position(&self) -> Point {
        match &self.position_fn {
            Some(provider) => provider(),
            None => self.position.floor(),
        }
    }

    /// Unrounded position used by the simulation step.
    pub fn precise_position(&self) -> Point {
        match &self.position_fn {
            Some(provider) => provider(),
            None => self.position,
        }
    }

    pub fn origin(&self) -> Option<&PositionSpec> {
        self.origin.as_ref()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_dynamic(&self) -> bool {
        self.position_fn.is_some()
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn visual(&self) -> Option<&Visual> {
        self.visual.as_ref()
    }

    pub fn body(&self) -> Option<&PhysicsBody> {
        self.body.as_ref()
    }

    pub fn shader_count(&self) -> usize {
        self.shaders.len()
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("name", &self.name)
            .field("position", &self.position)
            .field("dynamic", &self.is_dynamic())
            .field("origin", &self.origin)
            .field("visible", &self.visible)
            .field("parent", &self.parent)
            .field("children", &self.children)
            .field("visual", &self.visual)
            .field("shaders", &self.shaders)
            .field("body", &self.body)
            .finish()
    }
}
