use glam::{Quat, Vec3};
use uuid::Uuid;

use crate::animation::binder::TargetPath;
use crate::animation::tracks::KeyframeTrack;

#[derive(Debug, Clone)]
pub struct TrackMeta {
    /// Name of the scene node (usually a bone) this track drives.
    pub node_name: String,
    pub target: TargetPath,
}

#[derive(Debug, Clone)]
pub enum TrackData {
    Vector3(KeyframeTrack<Vec3>),
    Quaternion(KeyframeTrack<Quat>),
}

impl TrackData {
    #[must_use]
    pub fn end_time(&self) -> f32 {
        match self {
            TrackData::Vector3(t) => t.end_time(),
            TrackData::Quaternion(t) => t.end_time(),
        }
    }
}

/// A complete track definition: metadata plus keyframe data.
#[derive(Debug, Clone)]
pub struct Track {
    pub meta: TrackMeta,
    pub data: TrackData,
}

/// An immutable animation clip, shared through `Arc` by every binding that
/// plays it.
#[derive(Debug, Clone)]
pub struct AnimationClip {
    pub id: Uuid,
    pub name: String,
    /// Seconds, never negative.
    pub duration: f32,
    pub tracks: Vec<Track>,
}

impl AnimationClip {
    /// Builds a clip whose duration is the last keyframe time across all
    /// tracks.
    #[must_use]
    pub fn new(name: impl Into<String>, tracks: Vec<Track>) -> Self {
        let duration = tracks
            .iter()
            .map(|t| t.data.end_time())
            .fold(0.0_f32, f32::max);
        Self::with_duration(name, duration, tracks)
    }

    /// Builds a clip with an explicit duration, as reported by the loader.
    /// Negative or non-finite durations are stored as 0.
    #[must_use]
    pub fn with_duration(name: impl Into<String>, duration: f32, tracks: Vec<Track>) -> Self {
        let duration = if duration.is_finite() {
            duration.max(0.0)
        } else {
            0.0
        };
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            duration,
            tracks,
        }
    }

    #[inline]
    #[must_use]
    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }

    /// A clip can drive playback only with a positive duration and at least
    /// one track.
    #[inline]
    #[must_use]
    pub fn is_playable(&self) -> bool {
        self.duration > 0.0 && !self.tracks.is_empty()
    }

    /// Distinct node names targeted by this clip, in first-seen order.
    #[must_use]
    pub fn target_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for track in &self.tracks {
            let name = track.meta.node_name.as_str();
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }
}
