use std::sync::Arc;

use rustc_hash::FxHashMap;
use uuid::Uuid;

use crate::animation::{AnimationClip, AnimationMixer};
use crate::scene::graph::{Mesh, SceneGraph};
use crate::scene::material::MaterialPreset;
use crate::scene::model::ModelAsset;
use crate::scene::{NodeHandle, SkeletonKey};

/// An independently animatable copy of a [`ModelAsset`].
///
/// Owns its own nodes (bones included), skeletons, materials and mixer.
/// Posing or re-skinning it never touches the source or any other instance.
#[derive(Debug)]
pub struct SceneInstance {
    source_id: Uuid,
    pub graph: SceneGraph,
    mixer: AnimationMixer,
    preset: MaterialPreset,
}

impl SceneInstance {
    /// Id of the asset this instance was cloned from.
    #[inline]
    #[must_use]
    pub fn source_id(&self) -> Uuid {
        self.source_id
    }

    #[inline]
    #[must_use]
    pub fn preset(&self) -> MaterialPreset {
        self.preset
    }

    #[inline]
    #[must_use]
    pub fn mixer(&self) -> &AnimationMixer {
        &self.mixer
    }

    /// Binds `clip` to this instance's nodes, replacing the previous clip.
    pub fn bind_clip(&mut self, clip: Option<&Arc<AnimationClip>>) {
        self.mixer.bind(clip.cloned(), &self.graph);
    }

    /// Poses the instance at `time` seconds of the bound clip.
    pub fn pose(&mut self, time: f32) {
        self.mixer.apply(time, &mut self.graph);
    }

    pub fn apply_preset(&mut self, preset: MaterialPreset) {
        self.preset = preset;
        self.graph.apply_material_preset(preset);
    }

    /// Stops the mixer. Must run before the instance is dropped or replaced.
    pub fn release(&mut self) {
        self.mixer.stop();
        log::debug!("Released scene instance of {}", self.source_id);
    }
}

pub struct SceneInstanceCloner;

impl SceneInstanceCloner {
    /// Deep-clones `source` into a new [`SceneInstance`] and applies
    /// `preset` to the clone only.
    ///
    /// Returns `None` when there is no source; the requesting view stays
    /// empty.
    #[must_use]
    pub fn clone_instance(
        source: Option<&ModelAsset>,
        preset: MaterialPreset,
    ) -> Option<SceneInstance> {
        let Some(source) = source else {
            log::debug!("Nothing to clone: no source model");
            return None;
        };

        let graph = clone_graph(&source.graph);
        log::debug!(
            "Cloned '{}': {} nodes, {} meshes, {} skeletons",
            source.name,
            graph.nodes.len(),
            graph.meshes.len(),
            graph.skins.len()
        );

        let mut instance = SceneInstance {
            source_id: source.id,
            graph,
            mixer: AnimationMixer::new(),
            preset,
        };
        instance.apply_preset(preset);
        Some(instance)
    }
}

/// Skeleton-aware deep copy.
///
/// Every node is copied and re-linked through a handle map; skeletons are
/// rebuilt on the copied bones; meshes get a private copy of their
/// *original* material, not of whatever preset is currently displayed.
fn clone_graph(source: &SceneGraph) -> SceneGraph {
    let mut graph = SceneGraph::new();
    let mut node_map: FxHashMap<NodeHandle, NodeHandle> = FxHashMap::default();
    node_map.reserve(source.nodes.len());

    for (old, node) in &source.nodes {
        let mut copy = node.clone();
        copy.parent = None;
        copy.children.clear();
        copy.mesh = None;
        node_map.insert(old, graph.nodes.insert(copy));
    }

    for (old, node) in &source.nodes {
        let new = node_map[&old];
        let parent = node.parent.and_then(|p| node_map.get(&p).copied());
        let children = node
            .children
            .iter()
            .filter_map(|c| node_map.get(c).copied())
            .collect();
        let copy = &mut graph.nodes[new];
        copy.parent = parent;
        copy.children = children;
    }

    graph.roots = source
        .roots
        .iter()
        .filter_map(|r| node_map.get(r).copied())
        .collect();

    let mut skin_map: FxHashMap<SkeletonKey, SkeletonKey> = FxHashMap::default();
    for (old, skeleton) in &source.skins {
        skin_map.insert(old, graph.add_skeleton(skeleton.remapped(&node_map)));
    }

    for (old, node) in &source.nodes {
        let Some(mesh) = node.mesh.and_then(|k| source.meshes.get(k).map(|m| (k, m))) else {
            continue;
        };
        let (old_key, mesh) = mesh;

        let original = source
            .original_material(old_key)
            .unwrap_or(&mesh.material);
        let material = Arc::new(original.as_ref().clone());

        let key = graph.meshes.insert(Mesh {
            name: mesh.name.clone(),
            material: Arc::clone(&material),
            skin: mesh.skin.and_then(|s| skin_map.get(&s).copied()),
        });
        graph.nodes[node_map[&old]].mesh = Some(key);
        graph.set_original_material(key, material);
    }

    graph
}
