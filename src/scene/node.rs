use smallvec::SmallVec;

use crate::scene::transform::Transform;
use crate::scene::{MeshKey, NodeHandle};

/// A scene node: hierarchy links, a local transform and an optional mesh.
///
/// Bones are ordinary nodes referenced by a [`Skeleton`](crate::scene::Skeleton).
#[derive(Debug, Clone)]
pub struct Node {
    pub name: String,
    pub(crate) parent: Option<NodeHandle>,
    pub(crate) children: SmallVec<[NodeHandle; 4]>,
    pub transform: Transform,
    pub mesh: Option<MeshKey>,
}

impl Node {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            children: SmallVec::new(),
            transform: Transform::new(),
            mesh: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<NodeHandle> {
        self.parent
    }

    #[inline]
    #[must_use]
    pub fn children(&self) -> &[NodeHandle] {
        &self.children
    }
}
