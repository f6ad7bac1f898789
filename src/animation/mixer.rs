use std::sync::Arc;

use crate::animation::binder::{Binder, PropertyBinding, TargetPath};
use crate::animation::clip::{AnimationClip, TrackData};
use crate::animation::tracks::KeyframeCursor;
use crate::scene::SceneGraph;

/// Writes one clip's sampled values into the nodes of one scene graph.
///
/// The mixer holds no clock of its own: the owning view's
/// [`PlaybackController`](crate::animation::PlaybackController) decides the
/// time and the mixer only poses.
#[derive(Debug, Default)]
pub struct AnimationMixer {
    clip: Option<Arc<AnimationClip>>,
    bindings: Vec<PropertyBinding>,
    cursors: Vec<KeyframeCursor>,
}

impl AnimationMixer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves `clip` against `graph`, dropping any previous clip.
    pub fn bind(&mut self, clip: Option<Arc<AnimationClip>>, graph: &SceneGraph) {
        self.stop();
        let Some(clip) = clip else {
            return;
        };
        self.bindings = Binder::bind(graph, &clip);
        self.cursors = vec![KeyframeCursor::default(); clip.tracks.len()];
        self.clip = Some(clip);
    }

    /// Detaches the clip. Subsequent [`apply`](Self::apply) calls are no-ops.
    pub fn stop(&mut self) {
        self.clip = None;
        self.bindings.clear();
        self.cursors.clear();
    }

    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.clip.is_some()
    }

    #[inline]
    #[must_use]
    pub fn clip(&self) -> Option<&Arc<AnimationClip>> {
        self.clip.as_ref()
    }

    #[inline]
    #[must_use]
    pub fn bindings(&self) -> &[PropertyBinding] {
        &self.bindings
    }

    /// Poses `graph` at `time` seconds.
    pub fn apply(&mut self, time: f32, graph: &mut SceneGraph) {
        let Some(clip) = &self.clip else {
            return;
        };

        for binding in &self.bindings {
            let track = &clip.tracks[binding.track_index];
            let cursor = &mut self.cursors[binding.track_index];
            let Some(node) = graph.get_node_mut(binding.node) else {
                continue;
            };

            match (&track.data, binding.target) {
                (TrackData::Vector3(t), TargetPath::Translation) => {
                    if let Some(v) = t.sample_with_cursor(time, cursor) {
                        node.transform.position = v;
                    }
                }
                (TrackData::Vector3(t), TargetPath::Scale) => {
                    if let Some(v) = t.sample_with_cursor(time, cursor) {
                        node.transform.scale = v;
                    }
                }
                (TrackData::Quaternion(t), TargetPath::Rotation) => {
                    if let Some(q) = t.sample_with_cursor(time, cursor) {
                        node.transform.rotation = q;
                    }
                }
                _ => {}
            }
        }
    }
}
