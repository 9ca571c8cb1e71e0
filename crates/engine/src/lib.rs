//! Scene graph, physics and frame timing
//!
//! This crate owns the mutable world: a tree of [`Node`]s stored in a
//! [`Scene`] arena, the physics bodies attached to them and the per-frame
//! simulation step. Rendering stops at [`PixelBuffer`](crate::core::PixelBuffer);
//! turning buffers into terminal output is the job of the term crate.
//!
//! # Module Structure
//!
//! - [`scene`]: `Scene` arena, tree editing, cached bounding boxes, drawing
//! - [`node`]: node capabilities (position, anchor, visual, shaders, body)
//! - [`visual`]: shapes, sprites and sprite sheets
//! - [`body`]: rigid and static bodies, identities, typed observers
//! - [`physics`]: `Scene::process` integration and collision events
//! - [`ticker`]: elapsed time to `TickerDelta`
//! - [`settings`]: JSON and environment configuration
//!
//! # Example
//!
//! ```
//! use asciiscape_engine::{Node, PhysicsBody, RigidBody, Scene};
//! use asciiscape_engine::core::{Background, Rectangle, Shape};
//! use asciiscape_engine::types::{Point, TickerDelta};
//!
//! let mut scene = Scene::new();
//! let root = scene.root();
//! let ball = Node::at((0.0, 0.0))
//!     .with_visual(Shape::from(Rectangle::new(Point::ZERO, 1.0, 1.0)))
//!     .with_shader(Background::fill('o'))
//!     .with_body(PhysicsBody::rigid(
//!         RigidBody::new().with_constant_force(Point::new(1.0, 0.0)),
//!     ));
//! let ball = scene.spawn(root, ball).unwrap();
//!
//! scene.process(&TickerDelta::from_ms(2.0));
//! assert_eq!(scene.position(ball).unwrap(), Point::new(2.0, 0.0));
//! assert_eq!(scene.draw(root).unwrap().to_string(), "o\n");
//! ```

pub mod body;
pub mod error;
pub mod node;
pub mod physics;
pub mod scene;
pub mod settings;
pub mod ticker;
pub mod visual;

pub use asciiscape_core as core;
pub use asciiscape_types as types;

pub use body::{
    BodyEvent, BodyEventKind, BodyId, BodyKind, BodyObserver, ObserverId, PhysicsBody, RigidBody,
};
pub use error::SceneError;
pub use node::{Node, PositionFn};
pub use physics::{damp_velocity, ProcessStats};
pub use scene::{NodeId, Scene};
pub use settings::{Settings, SettingsError};
pub use ticker::Ticker;
pub use visual::{Renderable, Sprite, SpriteSheet, Visual};
