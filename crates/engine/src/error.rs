//! Scene graph errors.

use std::fmt;

use crate::core::CoreError;
use crate::scene::NodeId;

#[derive(Debug, Clone, PartialEq)]
pub enum SceneError {
    /// The id was never issued or its node has been destroyed.
    UnknownNode(NodeId),
    /// The child already has a parent.
    AlreadyAttached(NodeId),
    /// Attaching would make a node its own ancestor.
    CycleDetected(NodeId),
    /// `remove_child` with a node that is not a child of the given parent.
    NotAChild(NodeId),
    /// The scene root cannot be attached elsewhere or destroyed.
    RootNode,
    NotABody(NodeId),
    NotARigidBody(NodeId),
    Core(CoreError),
}

impl SceneError {
    pub fn code(&self) -> &'static str {
        match self {
            SceneError::UnknownNode(_) => "unknown_node",
            SceneError::AlreadyAttached(_) => "already_attached",
            SceneError::CycleDetected(_) => "cycle_detected",
            SceneError::NotAChild(_) => "not_a_child",
            SceneError::RootNode => "root_node",
            SceneError::NotABody(_) => "not_a_body",
            SceneError::NotARigidBody(_) => "not_a_rigid_body",
            SceneError::Core(err) => err.code(),
        }
    }

    pub fn message(&self) -> String {
        match self {
            SceneError::UnknownNode(id) => format!("node {} does not exist", id),
            SceneError::AlreadyAttached(id) => format!("node {} already has a parent", id),
            SceneError::CycleDetected(id) => {
                format!("attaching node {} would create a cycle", id)
            }
            SceneError::NotAChild(id) => format!("node {} is not a child of the given parent", id),
            SceneError::RootNode => "the scene root cannot be moved or destroyed".to_string(),
            SceneError::NotABody(id) => format!("node {} is not a physics body", id),
            SceneError::NotARigidBody(id) => format!("node {} is not a rigid body", id),
            SceneError::Core(err) => err.message(),
        }
    }
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message(), self.code())
    }
}

impl std::error::Error for SceneError {}

impl From<CoreError> for SceneError {
    fn from(err: CoreError) -> Self {
        SceneError::Core(err)
    }
}
