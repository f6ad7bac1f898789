use crate::animation::clip::AnimationClip;
use crate::scene::{NodeHandle, SceneGraph};

/// Defines the target property for animation data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetPath {
    Translation, // Maps to transform.position
    Rotation,    // Maps to transform.rotation
    Scale,       // Maps to transform.scale
}

/// Maps track `track_index` of a clip to the target property of `node`
/// in one particular scene graph.
#[derive(Debug, Clone, Copy)]
pub struct PropertyBinding {
    pub track_index: usize,
    pub node: NodeHandle,
    pub target: TargetPath,
}

pub struct Binder;

impl Binder {
    /// Resolves every track of `clip` against the node names of `graph`.
    /// Tracks whose node does not exist in the graph are skipped.
    #[must_use]
    pub fn bind(graph: &SceneGraph, clip: &AnimationClip) -> Vec<PropertyBinding> {
        let mut bindings = Vec::with_capacity(clip.tracks.len());
        let mut unresolved = 0usize;

        for (track_index, track) in clip.tracks.iter().enumerate() {
            match graph.find_node_by_name(&track.meta.node_name) {
                Some(node) => bindings.push(PropertyBinding {
                    track_index,
                    node,
                    target: track.meta.target,
                }),
                None => unresolved += 1,
            }
        }

        if unresolved > 0 {
            log::debug!(
                "Clip '{}': {unresolved} of {} tracks have no matching node",
                clip.name,
                clip.tracks.len()
            );
        }

        bindings
    }
}
