//! Side-by-side comparison of two characters or clips.
//!
//! - [`ComparisonCoordinator`]: owns both views and the sync policy
//! - [`CameraSyncBridge`]: mirrors viewport cameras without feedback loops
//! - [`ComparisonView`]: transport, character and instance of one slot

pub mod camera_sync;
pub mod coordinator;
pub mod view;

pub use camera_sync::{CameraSyncBridge, CameraSyncOutcome};
pub use coordinator::{ComparisonCoordinator, ComparisonFrame, DRIFT_TOLERANCE};
pub use view::{ComparisonLayout, ComparisonView, ViewId};
