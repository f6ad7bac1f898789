//! Scene Graph
//!
//! The minimal scene representation the playback core needs:
//! - [`Node`] / [`Transform`]: hierarchy and local TRS
//! - [`Skeleton`]: ordered bone list for skinned meshes
//! - [`SceneGraph`]: node, mesh and skeleton pools plus the original-material
//!   side-table
//! - [`ModelAsset`]: a loaded model with its clips
//! - [`SceneInstanceCloner`]: independent, animatable copies of a model

pub mod cloner;
pub mod graph;
pub mod material;
pub mod model;
pub mod node;
pub mod skeleton;
pub mod transform;

pub use cloner::{SceneInstance, SceneInstanceCloner};
pub use graph::{Mesh, SceneGraph};
pub use material::{Material, MaterialPreset};
pub use model::ModelAsset;
pub use node::Node;
pub use skeleton::Skeleton;
pub use transform::Transform;

use slotmap::new_key_type;

new_key_type! {
    pub struct NodeHandle;
    pub struct MeshKey;
    pub struct SkeletonKey;
}
