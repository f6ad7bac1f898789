#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod animation;
pub mod comparison;
pub mod errors;
pub mod scene;
pub mod settings;
pub mod storage;
pub mod utils;
pub mod viewer;

pub use animation::{
    AnimationClip, AnimationMixer, ClipBinding, LoopEvent, PlaybackController, PlaybackState,
    SkeletonCompatibility, TimeUpdate,
};
pub use comparison::{
    CameraSyncBridge, CameraSyncOutcome, ComparisonCoordinator, ComparisonFrame, ComparisonLayout,
    ViewId,
};
pub use errors::{Result, RigviewError};
pub use scene::{
    Material, MaterialPreset, ModelAsset, SceneGraph, SceneInstance, SceneInstanceCloner,
};
pub use settings::ViewerSettings;
pub use storage::{AssetStore, MemoryStore};
pub use utils::orbit_control::OrbitControls;
pub use utils::time::FrameTimer;
pub use viewer::{SessionFrame, ViewerSession};
