use std::sync::Arc;

use glam::Affine3A;
use rustc_hash::FxHashMap;
use slotmap::SlotMap;

use crate::scene::material::{Material, MaterialPreset};
use crate::scene::node::Node;
use crate::scene::skeleton::Skeleton;
use crate::scene::{MeshKey, NodeHandle, SkeletonKey};

#[derive(Debug, Clone)]
pub struct Mesh {
    pub name: String,
    /// Currently displayed material; replaced wholesale by presets.
    pub material: Arc<Material>,
    /// Skeleton whose bones this mesh's joint indices refer to.
    pub skin: Option<SkeletonKey>,
}

impl Mesh {
    #[must_use]
    pub fn new(name: impl Into<String>, material: Material) -> Self {
        Self {
            name: name.into(),
            material: Arc::new(material),
            skin: None,
        }
    }

    #[must_use]
    pub fn with_skin(mut self, skin: SkeletonKey) -> Self {
        self.skin = Some(skin);
        self
    }
}

/// Node hierarchy plus the meshes and skeletons hanging off it.
///
/// Besides the live component pools the graph keeps a side-table of each
/// mesh's *original* material. It is filled once per mesh, the first time
/// the mesh is seen, and presets never write to it.
#[derive(Debug, Clone, Default)]
pub struct SceneGraph {
    pub nodes: SlotMap<NodeHandle, Node>,
    pub roots: Vec<NodeHandle>,

    pub meshes: SlotMap<MeshKey, Mesh>,
    pub skins: SlotMap<SkeletonKey, Skeleton>,

    original_materials: FxHashMap<MeshKey, Arc<Material>>,
}

impl SceneGraph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Hierarchy
    // ========================================================================

    /// Adds a root node.
    pub fn add_node(&mut self, node: Node) -> NodeHandle {
        let handle = self.nodes.insert(node);
        self.roots.push(handle);
        handle
    }

    /// Adds `node` as the last child of `parent`.
    /// Falls back to a root node if `parent` does not exist.
    pub fn add_child(&mut self, parent: NodeHandle, node: Node) -> NodeHandle {
        if !self.nodes.contains_key(parent) {
            return self.add_node(node);
        }
        let handle = self.nodes.insert(node);
        self.nodes[handle].parent = Some(parent);
        self.nodes[parent].children.push(handle);
        handle
    }

    #[inline]
    #[must_use]
    pub fn get_node(&self, handle: NodeHandle) -> Option<&Node> {
        self.nodes.get(handle)
    }

    #[inline]
    pub fn get_node_mut(&mut self, handle: NodeHandle) -> Option<&mut Node> {
        self.nodes.get_mut(handle)
    }

    /// Depth-first search from the roots, in child order.
    #[must_use]
    pub fn find_node_by_name(&self, name: &str) -> Option<NodeHandle> {
        self.iter_depth_first()
            .find(|&h| self.nodes.get(h).is_some_and(|n| n.name == name))
    }

    /// Handles of every node reachable from the roots, parents before
    /// children.
    pub fn iter_depth_first(&self) -> impl Iterator<Item = NodeHandle> + '_ {
        let mut stack: Vec<NodeHandle> = self.roots.iter().rev().copied().collect();
        std::iter::from_fn(move || {
            let handle = stack.pop()?;
            if let Some(node) = self.nodes.get(handle) {
                stack.extend(node.children.iter().rev().copied());
            }
            Some(handle)
        })
    }

    /// World matrix computed by walking up the parent chain.
    #[must_use]
    pub fn world_matrix(&self, handle: NodeHandle) -> Option<Affine3A> {
        let mut node = self.nodes.get(handle)?;
        let mut matrix = node.transform.local_matrix();
        while let Some(parent) = node.parent.and_then(|p| self.nodes.get(p)) {
            matrix = parent.transform.local_matrix() * matrix;
            node = parent;
        }
        Some(matrix)
    }

    // ========================================================================
    // Components
    // ========================================================================

    /// Attaches a mesh to `node` and records its material as the original.
    pub fn add_mesh(&mut self, node: NodeHandle, mesh: Mesh) -> Option<MeshKey> {
        if !self.nodes.contains_key(node) {
            return None;
        }
        let key = self.meshes.insert(mesh);
        self.nodes[node].mesh = Some(key);
        self.record_original_materials();
        Some(key)
    }

    pub fn add_skeleton(&mut self, skeleton: Skeleton) -> SkeletonKey {
        self.skins.insert(skeleton)
    }

    /// Names of every bone of every skeleton, deduplicated, joint order.
    #[must_use]
    pub fn bone_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for skeleton in self.skins.values() {
            for name in skeleton.bone_names(&self.nodes) {
                if !names.iter().any(|n| n == name) {
                    names.push(name.to_string());
                }
            }
        }
        names
    }

    // ========================================================================
    // Original materials & presets
    // ========================================================================

    /// Remembers the current material of every mesh not seen before.
    /// Existing entries are never overwritten.
    pub fn record_original_materials(&mut self) {
        for (key, mesh) in &self.meshes {
            self.original_materials
                .entry(key)
                .or_insert_with(|| Arc::clone(&mesh.material));
        }
    }

    /// The material `mesh` had when first recorded.
    #[must_use]
    pub fn original_material(&self, mesh: MeshKey) -> Option<&Arc<Material>> {
        self.original_materials.get(&mesh)
    }

    pub(crate) fn set_original_material(&mut self, mesh: MeshKey, material: Arc<Material>) {
        self.original_materials.entry(mesh).or_insert(material);
    }

    /// Applies `preset` to every mesh of this graph only.
    pub fn apply_material_preset(&mut self, preset: MaterialPreset) {
        self.record_original_materials();

        let shared = preset.override_arc();
        for (key, mesh) in &mut self.meshes {
            let next = match &shared {
                Some(material) => Arc::clone(material),
                None => match self.original_materials.get(&key) {
                    Some(original) => Arc::clone(original),
                    None => continue,
                },
            };
            mesh.material = next;
        }
        log::debug!("Applied material preset '{}'", preset.label());
    }
}
