use std::sync::Arc;

use uuid::Uuid;

use crate::animation::AnimationClip;
use crate::scene::graph::SceneGraph;

/// A loaded character or animation asset, as handed over by the scene
/// loader. Shared read-only between views; every view that animates it
/// works on its own [`SceneInstance`](crate::scene::SceneInstance).
#[derive(Debug, Clone)]
pub struct ModelAsset {
    pub id: Uuid,
    pub name: String,
    pub graph: SceneGraph,
    pub animations: Vec<Arc<AnimationClip>>,
    pub bone_names: Vec<String>,
}

impl ModelAsset {
    /// Wraps a freshly loaded graph. This is the first time the graph's
    /// meshes are seen, so their materials are recorded as originals here.
    #[must_use]
    pub fn new(name: impl Into<String>, mut graph: SceneGraph, animations: Vec<AnimationClip>) -> Self {
        graph.record_original_materials();
        let bone_names = graph.bone_names();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            graph,
            animations: animations.into_iter().map(Arc::new).collect(),
            bone_names,
        }
    }

    /// First clip that can actually drive playback.
    #[must_use]
    pub fn first_playable_clip(&self) -> Option<&Arc<AnimationClip>> {
        self.animations.iter().find(|c| c.is_playable())
    }

    #[must_use]
    pub fn find_clip(&self, name: &str) -> Option<&Arc<AnimationClip>> {
        self.animations.iter().find(|c| c.name == name)
    }
}
