//! Error Types
//!
//! Playback and synchronization never fail with an `Err`: invalid clips,
//! out-of-range seeks, rejected speeds, missing clone sources and reentrant
//! camera events are absorbed where they happen and reported through return
//! values and log records.
//!
//! [`RigviewError`] covers the fallible boundaries of the crate:
//! - Persistent asset storage
//! - Settings (de)serialization
//!
//! ```rust,ignore
//! use rigview::errors::Result;
//!
//! fn load(store: &dyn AssetStore) -> Result<ViewerSettings> {
//!     ViewerSettings::load(store)
//! }
//! ```

use thiserror::Error;

/// The main error type for the viewer core.
#[derive(Error, Debug)]
pub enum RigviewError {
    // ========================================================================
    // Storage Errors
    // ========================================================================
    /// The backing store rejected an operation.
    #[error("Storage error: {0}")]
    Storage(String),

    /// The requested asset was not found in the store.
    #[error("Asset not found: {0}")]
    AssetNotFound(String),

    // ========================================================================
    // Format & Parsing Errors
    // ========================================================================
    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Alias for `Result<T, RigviewError>`.
pub type Result<T> = std::result::Result<T, RigviewError>;
