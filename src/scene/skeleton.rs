use glam::Affine3A;
use rustc_hash::FxHashMap;
use slotmap::SlotMap;
use uuid::Uuid;

use crate::scene::{Node, NodeHandle};

#[derive(Debug, Clone)]
pub struct Skeleton {
    pub id: Uuid,
    pub name: String,

    // Ordered bone list: bones[i] is joint i of every mesh skinned to this
    // skeleton, so per-vertex joint indices resolve through this vector.
    pub bones: Vec<NodeHandle>,

    // Static, unchanged after load.
    pub inverse_bind_matrices: Vec<Affine3A>,

    pub(crate) root_bone_index: usize,
}

impl Skeleton {
    #[must_use]
    pub fn new(
        name: &str,
        bones: Vec<NodeHandle>,
        inverse_bind_matrices: Vec<Affine3A>,
        root_bone_index: usize,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            bones,
            inverse_bind_matrices,
            root_bone_index,
        }
    }

    #[inline]
    #[must_use]
    pub fn root_bone(&self) -> Option<NodeHandle> {
        self.bones.get(self.root_bone_index).copied()
    }

    /// Bone names in joint order. Bones missing from `nodes` are skipped.
    #[must_use]
    pub fn bone_names<'a>(&self, nodes: &'a SlotMap<NodeHandle, Node>) -> Vec<&'a str> {
        self.bones
            .iter()
            .filter_map(|&b| nodes.get(b).map(|n| n.name.as_str()))
            .collect()
    }

    /// Copy of this skeleton whose joints point at the nodes `node_map`
    /// assigns to the original bones. Joint order, and therefore every
    /// mesh's joint indices, is preserved.
    #[must_use]
    pub(crate) fn remapped(&self, node_map: &FxHashMap<NodeHandle, NodeHandle>) -> Self {
        let bones = self
            .bones
            .iter()
            .filter_map(|b| node_map.get(b).copied())
            .collect::<Vec<_>>();

        debug_assert_eq!(bones.len(), self.bones.len(), "bone outside cloned hierarchy");

        Self {
            id: Uuid::new_v4(),
            name: self.name.clone(),
            bones,
            inverse_bind_matrices: self.inverse_bind_matrices.clone(),
            root_bone_index: self.root_bone_index,
        }
    }
}
