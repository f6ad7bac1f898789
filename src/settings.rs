//! Viewer Settings
//!
//! Persisted viewer preferences. Every field falls back to its default when
//! its key is missing from the stored JSON, so settings written by an older
//! build always load.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use rigview::{MemoryStore, ViewerSession, ViewerSettings};
//!
//! let store = MemoryStore::new();
//! let settings = ViewerSettings::load(&store)?;
//! let mut session = ViewerSession::from_settings(&settings);
//!
//! // ... user changes things ...
//! session.settings().save(&store)?;
//! ```

use serde::{Deserialize, Serialize};

use crate::animation::controller::DEFAULT_SPEED;
use crate::comparison::ComparisonLayout;
use crate::errors::{Result, RigviewError};
use crate::scene::MaterialPreset;
use crate::storage::AssetStore;

/// Store key the settings blob lives under.
pub const SETTINGS_KEY: &str = "viewer-settings";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerSettings {
    pub playback_speed: f32,
    pub loop_enabled: bool,
    pub sync_playback: bool,
    pub sync_camera: bool,
    pub layout: ComparisonLayout,
    pub material_preset: MaterialPreset,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            playback_speed: DEFAULT_SPEED,
            loop_enabled: true,
            sync_playback: true,
            sync_camera: false,
            layout: ComparisonLayout::Vertical,
            material_preset: MaterialPreset::Textured,
        }
    }
}

impl ViewerSettings {
    /// Parses settings JSON. A non-positive or non-finite speed is replaced
    /// by the default speed.
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        let mut settings: Self = serde_json::from_slice(bytes)?;
        if !(settings.playback_speed.is_finite() && settings.playback_speed > 0.0) {
            log::warn!(
                "Stored playback speed {} is invalid; using {DEFAULT_SPEED}",
                settings.playback_speed
            );
            settings.playback_speed = DEFAULT_SPEED;
        }
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Loads from `store`; a store without settings yields the defaults.
    pub fn load(store: &dyn AssetStore) -> Result<Self> {
        match store.get(SETTINGS_KEY) {
            Ok(bytes) => Self::from_json(&bytes),
            Err(RigviewError::AssetNotFound(_)) => {
                log::debug!("No stored viewer settings; using defaults");
                Ok(Self::default())
            }
            Err(err) => Err(err),
        }
    }

    pub fn save(&self, store: &dyn AssetStore) -> Result<()> {
        store.put(SETTINGS_KEY, self.to_json()?)
    }
}
