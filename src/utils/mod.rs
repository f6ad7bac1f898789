//! Utility Module
//!
//! - [`OrbitControls`]: orbit camera controls, one per viewport
//! - [`FrameTimer`]: wall-clock frame delta for the render loop

pub mod orbit_control;
pub mod time;

pub use orbit_control::OrbitControls;
pub use time::FrameTimer;
