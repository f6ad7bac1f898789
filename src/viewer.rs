//! Viewer Session
//!
//! [`ViewerSession`] is the command surface the UI talks to. It owns the
//! single-view transport, the comparison coordinator and the camera of the
//! main viewport, and decides once per frame which of them is ticked.

use std::sync::Arc;

use crate::animation::compat::is_selectable;
use crate::animation::{AnimationClip, PlaybackController, TimeUpdate};
use crate::comparison::{ComparisonCoordinator, ComparisonFrame, ComparisonView, ViewId};
use crate::scene::{MaterialPreset, ModelAsset};
use crate::settings::ViewerSettings;
use crate::utils::{FrameTimer, OrbitControls};

/// What one [`ViewerSession::tick`] advanced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionFrame {
    Single(Option<TimeUpdate>),
    Comparison(ComparisonFrame),
}

#[derive(Debug)]
pub struct ViewerSession {
    main: ComparisonView,
    camera: OrbitControls,
    coordinator: ComparisonCoordinator,
    material_preset: MaterialPreset,
}

impl Default for ViewerSession {
    fn default() -> Self {
        Self::from_settings(&ViewerSettings::default())
    }
}

impl ViewerSession {
    #[must_use]
    pub fn from_settings(settings: &ViewerSettings) -> Self {
        let controller =
            PlaybackController::with_preferences(settings.playback_speed, settings.loop_enabled);

        let mut coordinator =
            ComparisonCoordinator::with_preferences(settings.playback_speed, settings.loop_enabled);
        coordinator.set_sync_playback(settings.sync_playback);
        coordinator.set_sync_camera(settings.sync_camera);
        coordinator.set_layout(settings.layout);
        coordinator.set_material_preset(settings.material_preset);

        Self {
            main: ComparisonView::with_controller(controller),
            camera: OrbitControls::default(),
            coordinator,
            material_preset: settings.material_preset,
        }
    }

    /// Snapshot of the preferences worth persisting.
    #[must_use]
    pub fn settings(&self) -> ViewerSettings {
        ViewerSettings {
            playback_speed: self.main.controller().speed(),
            loop_enabled: self.main.controller().loop_enabled(),
            sync_playback: self.coordinator.sync_playback(),
            sync_camera: self.coordinator.sync_camera(),
            layout: self.coordinator.layout(),
            material_preset: self.material_preset,
        }
    }

    #[inline]
    #[must_use]
    pub fn controller(&self) -> &PlaybackController {
        self.main.controller()
    }

    #[inline]
    #[must_use]
    pub fn main_view(&self) -> &ComparisonView {
        &self.main
    }

    #[inline]
    #[must_use]
    pub fn coordinator(&self) -> &ComparisonCoordinator {
        &self.coordinator
    }

    #[inline]
    pub fn coordinator_mut(&mut self) -> &mut ComparisonCoordinator {
        &mut self.coordinator
    }

    #[inline]
    pub fn camera_mut(&mut self) -> &mut OrbitControls {
        &mut self.camera
    }

    #[inline]
    #[must_use]
    pub fn material_preset(&self) -> MaterialPreset {
        self.material_preset
    }

    #[inline]
    #[must_use]
    pub fn is_comparing(&self) -> bool {
        self.coordinator.is_enabled()
    }

    // ========================================================================
    // Content
    // ========================================================================

    /// Shows `model` in the main view and selects its first playable clip.
    pub fn load_character(&mut self, model: Arc<ModelAsset>) {
        let clip = model.first_playable_clip().cloned();
        log::debug!(
            "Loaded character '{}' ({} clips, {} bones)",
            model.name,
            model.animations.len(),
            model.bone_names.len()
        );
        self.main.set_character(Some(model));
        self.main.rebuild_instance(self.material_preset);
        self.select_animation(clip);
    }

    pub fn unload_character(&mut self) {
        self.main.set_character(None);
        self.main.controller.clear();
    }

    pub fn select_animation(&mut self, clip: Option<Arc<AnimationClip>>) {
        self.main.controller.set_clip(clip);
        self.main.rebind_clip();
    }

    /// Clips from `library` that may be played on the main character.
    #[must_use]
    pub fn selectable_animations<'a>(
        &self,
        library: &'a [Arc<ModelAsset>],
    ) -> Vec<&'a Arc<AnimationClip>> {
        let Some(character) = self.main.character() else {
            return Vec::new();
        };
        // Clips are matched on the nodes they drive, since animation-only
        // assets usually carry no skeleton of their own.
        library
            .iter()
            .flat_map(|asset| asset.animations.iter().map(move |clip| (asset.id, clip)))
            .filter(|(asset_id, clip)| {
                clip.is_playable()
                    && is_selectable(
                        Some(*asset_id),
                        character.id,
                        &character.bone_names,
                        &clip.target_names(),
                    )
            })
            .map(|(_, clip)| clip)
            .collect()
    }

    // ========================================================================
    // Single-view transport
    // ========================================================================

    pub fn play(&mut self) -> bool {
        self.main.controller.play()
    }

    pub fn pause(&mut self) {
        self.main.controller.pause();
    }

    pub fn toggle(&mut self) -> bool {
        self.main.controller.toggle()
    }

    pub fn set_speed(&mut self, speed: f32) -> bool {
        self.main.controller.set_speed(speed)
    }

    pub fn set_loop(&mut self, loop_enabled: bool) {
        self.main.controller.set_loop(loop_enabled);
    }

    pub fn seek(&mut self, time: f32) -> Option<TimeUpdate> {
        let update = self.main.controller.seek(time);
        self.main.pose();
        update
    }

    pub fn step(&mut self, offset: f32) -> Option<TimeUpdate> {
        let update = self.main.controller.step(offset);
        self.main.pose();
        update
    }

    pub fn set_material_preset(&mut self, preset: MaterialPreset) {
        self.material_preset = preset;
        self.main.apply_preset(preset);
        self.coordinator.set_material_preset(preset);
    }

    // ========================================================================
    // Comparison mode
    // ========================================================================

    /// Enters or leaves comparison mode.
    ///
    /// Entering pauses the main view and, if view A is still empty, seeds it
    /// with the main character and clip.
    pub fn toggle_comparison(&mut self) -> bool {
        let entering = !self.coordinator.is_enabled();
        if entering {
            self.main.controller.pause();
            if self.coordinator.view(ViewId::A).character().is_none() {
                let character = self.main.character().cloned();
                let clip = self.main.controller().clip().cloned();
                self.coordinator.assign_character(ViewId::A, character);
                self.coordinator.assign_animation(ViewId::A, clip);
            }
        }
        self.coordinator.set_enabled(entering);
        entering
    }

    // ========================================================================
    // Frame
    // ========================================================================

    /// Advances whichever mode is active by `delta_seconds`.
    pub fn tick(&mut self, delta_seconds: f32) -> SessionFrame {
        if self.coordinator.is_enabled() {
            SessionFrame::Comparison(self.coordinator.tick(delta_seconds))
        } else {
            let update = self.main.controller.tick(delta_seconds);
            self.main.pose();
            SessionFrame::Single(update)
        }
    }

    /// Samples `timer` for the wall-clock delta and ticks.
    pub fn frame(&mut self, timer: &mut FrameTimer) -> SessionFrame {
        let delta = timer.tick();
        self.tick(delta)
    }
}
