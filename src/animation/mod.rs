//! Animation System
//!
//! - [`AnimationClip`]: named keyframe tracks targeting scene nodes by name
//! - [`ClipBinding`]: one clip plus its time cursor
//! - [`PlaybackController`]: transport state machine driving one binding
//! - [`AnimationMixer`]: poses a scene instance from a clip at a given time
//! - [`compat`]: skeleton compatibility between animations and characters

pub mod binder;
pub mod binding;
pub mod clip;
pub mod compat;
pub mod controller;
pub mod mixer;
pub mod tracks;
pub mod values;

pub use binder::{Binder, PropertyBinding, TargetPath};
pub use binding::{ClipBinding, LoopEvent};
pub use clip::{AnimationClip, Track, TrackData, TrackMeta};
pub use compat::{SkeletonCompatibility, normalize_bone_name};
pub use controller::{
    MAX_PRESET_SPEED, MIN_PRESET_SPEED, PlaybackController, PlaybackState, REPORT_THRESHOLD,
    SPEED_PRESETS, TimeUpdate, TimeUpdateKind,
};
pub use mixer::AnimationMixer;
pub use tracks::{InterpolationMode, KeyframeCursor, KeyframeTrack};
