//! One half of the comparison screen and its layout options.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::animation::PlaybackController;
use crate::scene::{MaterialPreset, ModelAsset, SceneInstance, SceneInstanceCloner};

/// One of the two comparison slots. View A leads when playback is synced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewId {
    A,
    B,
}

impl ViewId {
    pub const BOTH: [ViewId; 2] = [ViewId::A, ViewId::B];

    #[inline]
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            ViewId::A => 0,
            ViewId::B => 1,
        }
    }

    #[inline]
    #[must_use]
    pub fn other(self) -> ViewId {
        match self {
            ViewId::A => ViewId::B,
            ViewId::B => ViewId::A,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComparisonLayout {
    /// Side by side.
    #[default]
    Vertical,
    /// Stacked.
    Horizontal,
    Overlay,
}

impl ComparisonLayout {
    /// Flips between side-by-side and stacked; overlay goes to side-by-side.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            ComparisonLayout::Vertical => ComparisonLayout::Horizontal,
            ComparisonLayout::Horizontal | ComparisonLayout::Overlay => ComparisonLayout::Vertical,
        }
    }
}

/// Transport, character and scene instance of one comparison slot.
#[derive(Debug, Default)]
pub struct ComparisonView {
    pub(crate) controller: PlaybackController,
    character: Option<Arc<ModelAsset>>,
    instance: Option<SceneInstance>,
}

impl ComparisonView {
    #[must_use]
    pub fn with_controller(controller: PlaybackController) -> Self {
        Self {
            controller,
            character: None,
            instance: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn controller(&self) -> &PlaybackController {
        &self.controller
    }

    #[inline]
    #[must_use]
    pub fn character(&self) -> Option<&Arc<ModelAsset>> {
        self.character.as_ref()
    }

    #[inline]
    #[must_use]
    pub fn instance(&self) -> Option<&SceneInstance> {
        self.instance.as_ref()
    }

    pub(crate) fn set_character(&mut self, character: Option<Arc<ModelAsset>>) {
        self.release_instance();
        self.character = character;
    }

    /// Stops and drops the current instance, if any.
    pub(crate) fn release_instance(&mut self) {
        if let Some(mut instance) = self.instance.take() {
            instance.release();
        }
    }

    /// Replaces the instance with a fresh clone of the character and binds
    /// the current clip to it. Without a character the slot stays empty.
    pub(crate) fn rebuild_instance(&mut self, preset: MaterialPreset) {
        self.release_instance();
        self.instance = SceneInstanceCloner::clone_instance(self.character.as_deref(), preset);
        self.rebind_clip();
    }

    /// Re-resolves the controller's clip on the instance.
    pub(crate) fn rebind_clip(&mut self) {
        if let Some(instance) = &mut self.instance {
            instance.bind_clip(self.controller.clip());
            instance.pose(self.controller.current_time());
        }
    }

    pub(crate) fn apply_preset(&mut self, preset: MaterialPreset) {
        if let Some(instance) = &mut self.instance {
            instance.apply_preset(preset);
        }
    }

    /// Poses the instance at the controller's current time.
    pub(crate) fn pose(&mut self) {
        if let Some(instance) = &mut self.instance {
            instance.pose(self.controller.current_time());
        }
    }
}
