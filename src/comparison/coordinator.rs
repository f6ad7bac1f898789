//! Side-by-side comparison session.
//!
//! [`ComparisonCoordinator`] owns both views and applies the playback sync
//! policy: transport commands fan out to both controllers when sync is on,
//! and a per-tick reconcile pass snaps view B back to view A on drift.

use std::sync::Arc;

use glam::Vec2;
use smallvec::{SmallVec, smallvec};

use crate::animation::{AnimationClip, PlaybackController, PlaybackState, TimeUpdate};
use crate::comparison::camera_sync::{CameraSyncBridge, CameraSyncOutcome};
use crate::comparison::view::{ComparisonLayout, ComparisonView, ViewId};
use crate::scene::{MaterialPreset, ModelAsset};
use crate::utils::OrbitControls;

/// Largest time gap, in seconds, tolerated between synced views playing
/// clips of equal duration before view B is snapped to view A.
pub const DRIFT_TOLERANCE: f32 = 0.1;

/// Time reports produced by one coordinator tick, indexed by [`ViewId::index`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ComparisonFrame {
    pub updates: [Option<TimeUpdate>; 2],
    /// View B was snapped back to view A this frame.
    pub resynced: bool,
}

impl ComparisonFrame {
    #[must_use]
    pub fn update(&self, view: ViewId) -> Option<TimeUpdate> {
        self.updates[view.index()]
    }
}

/// Owns both comparison views and the only copy of the sync policy.
///
/// Controllers never know whether they are synced. With playback sync on,
/// every transport command is fanned out here to both views within the
/// same call; with it off, a command reaches only the view it names.
#[derive(Debug)]
pub struct ComparisonCoordinator {
    enabled: bool,
    layout: ComparisonLayout,
    sync_playback: bool,
    sync_camera: bool,
    material_preset: MaterialPreset,

    views: [ComparisonView; 2],
    cameras: [OrbitControls; 2],
    camera_bridge: CameraSyncBridge,
}

impl Default for ComparisonCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl ComparisonCoordinator {
    /// Comparison off, both views empty, playback sync on, camera sync off.
    #[must_use]
    pub fn new() -> Self {
        Self {
            enabled: false,
            layout: ComparisonLayout::Vertical,
            sync_playback: true,
            sync_camera: false,
            material_preset: MaterialPreset::Textured,
            views: [ComparisonView::default(), ComparisonView::default()],
            cameras: [OrbitControls::default(), OrbitControls::default()],
            camera_bridge: CameraSyncBridge::new(),
        }
    }

    /// Both views start from the same persisted transport preferences.
    #[must_use]
    pub fn with_preferences(speed: f32, loop_enabled: bool) -> Self {
        let mut coordinator = Self::new();
        for view in &mut coordinator.views {
            *view = ComparisonView::with_controller(PlaybackController::with_preferences(
                speed,
                loop_enabled,
            ));
        }
        coordinator
    }

    // ========================================================================
    // Read surface
    // ========================================================================

    #[inline]
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    #[inline]
    #[must_use]
    pub fn layout(&self) -> ComparisonLayout {
        self.layout
    }

    #[inline]
    #[must_use]
    pub fn sync_playback(&self) -> bool {
        self.sync_playback
    }

    #[inline]
    #[must_use]
    pub fn sync_camera(&self) -> bool {
        self.sync_camera
    }

    #[inline]
    #[must_use]
    pub fn material_preset(&self) -> MaterialPreset {
        self.material_preset
    }

    #[inline]
    #[must_use]
    pub fn view(&self, view: ViewId) -> &ComparisonView {
        &self.views[view.index()]
    }

    #[inline]
    #[must_use]
    pub fn controller(&self, view: ViewId) -> &PlaybackController {
        &self.views[view.index()].controller
    }

    #[inline]
    #[must_use]
    pub fn camera(&self, view: ViewId) -> &OrbitControls {
        &self.cameras[view.index()]
    }

    #[inline]
    #[must_use]
    pub fn camera_bridge(&self) -> &CameraSyncBridge {
        &self.camera_bridge
    }

    /// State of the shared play button. Synced: either view playing.
    /// Unsynced: view A alone, since it owns the shared controls.
    #[must_use]
    pub fn is_any_playing(&self) -> bool {
        let a = self.controller(ViewId::A).is_playing();
        if self.sync_playback {
            a || self.controller(ViewId::B).is_playing()
        } else {
            a
        }
    }

    /// Whether any view has something to play; the shared transport bar is
    /// hidden otherwise.
    #[must_use]
    pub fn has_animation(&self) -> bool {
        self.views.iter().any(|v| v.controller.has_playable_clip())
    }

    /// Longest bound duration, the extent of the synced timeline.
    #[must_use]
    pub fn max_duration(&self) -> f32 {
        self.views
            .iter()
            .map(|v| v.controller.duration())
            .fold(0.0, f32::max)
    }

    // ========================================================================
    // Session settings
    // ========================================================================

    /// Entering comparison clones an instance for every assigned character;
    /// leaving releases them. Characters and clips stay assigned either way.
    pub fn set_enabled(&mut self, enabled: bool) {
        if enabled == self.enabled {
            return;
        }
        self.enabled = enabled;
        for view in &mut self.views {
            if enabled {
                view.rebuild_instance(self.material_preset);
            } else {
                view.release_instance();
            }
        }
        log::debug!("Comparison mode {}", if enabled { "entered" } else { "exited" });
    }

    pub fn toggle_enabled(&mut self) {
        self.set_enabled(!self.enabled);
    }

    pub fn set_layout(&mut self, layout: ComparisonLayout) {
        self.layout = layout;
    }

    /// Turning sync on makes view B adopt view A's play state, loop flag
    /// and speed immediately. An ended view B is restarted to follow a
    /// playing view A.
    pub fn set_sync_playback(&mut self, sync: bool) {
        if sync && !self.sync_playback {
            let leader = self.views[ViewId::A.index()].controller.clone();
            let follower = &mut self.views[ViewId::B.index()].controller;
            follower.set_speed(leader.speed());
            follower.set_loop(leader.loop_enabled());
            if leader.is_playing() {
                resume(follower, leader.current_time());
            } else {
                follower.pause();
            }
        }
        self.sync_playback = sync;
        log::debug!("Playback sync {}", if sync { "on" } else { "off" });
    }

    pub fn set_sync_camera(&mut self, sync: bool) {
        self.sync_camera = sync;
        if sync {
            self.camera_bridge.attach();
        } else {
            self.camera_bridge.detach();
        }
    }

    /// Applies `preset` to each instance independently.
    pub fn set_material_preset(&mut self, preset: MaterialPreset) {
        self.material_preset = preset;
        for view in &mut self.views {
            view.apply_preset(preset);
        }
    }

    // ========================================================================
    // Content
    // ========================================================================

    /// Replaces the character of `view`. The previous instance is released
    /// before it is discarded; a new one is cloned while comparison is on.
    pub fn assign_character(&mut self, view: ViewId, character: Option<Arc<ModelAsset>>) {
        let enabled = self.enabled;
        let preset = self.material_preset;
        let slot = &mut self.views[view.index()];
        slot.set_character(character);
        if enabled {
            slot.rebuild_instance(preset);
        }
    }

    /// Binds `clip` to `view`.
    ///
    /// Synced, the new clip starts at the partner's current time and takes
    /// over the partner's play state, so both timelines stay aligned even
    /// when the durations differ. Unsynced, it starts at 0.
    pub fn assign_animation(&mut self, view: ViewId, clip: Option<Arc<AnimationClip>>) {
        let partner = self.controller(view.other()).clone();
        let sync = self.sync_playback;
        let slot = &mut self.views[view.index()];

        if sync {
            slot.controller.set_clip_at(clip, partner.current_time());
            if partner.is_playing() {
                slot.controller.play();
            } else {
                slot.controller.pause();
            }
        } else {
            slot.controller.set_clip(clip);
        }
        slot.rebind_clip();
    }

    // ========================================================================
    // Transport commands
    // ========================================================================

    /// Views a command issued to `view` applies to.
    fn targets(&self, view: ViewId) -> SmallVec<[ViewId; 2]> {
        if self.sync_playback {
            smallvec![view, view.other()]
        } else {
            smallvec![view]
        }
    }

    fn controller_mut(&mut self, view: ViewId) -> &mut PlaybackController {
        &mut self.views[view.index()].controller
    }

    /// Unsynced, returns whether `view` is playing afterwards.
    ///
    /// Synced, both views start and the shared play state is returned. A
    /// view that ended with looping off is restarted at the time of a view
    /// that can still play, or at 0 when that time lies past its own end.
    pub fn play(&mut self, view: ViewId) -> bool {
        if !self.sync_playback {
            return self.controller_mut(view).play();
        }

        let reference = self
            .targets(view)
            .into_iter()
            .map(|id| self.controller(id))
            .find(|c| c.has_playable_clip() && c.state() != PlaybackState::Ended)
            .map_or(0.0, PlaybackController::current_time);

        for id in self.targets(view) {
            resume(self.controller_mut(id), reference);
        }
        self.is_any_playing()
    }

    pub fn pause(&mut self, view: ViewId) {
        for id in self.targets(view) {
            self.controller_mut(id).pause();
        }
    }

    /// Synced, the shared play state decides the direction: anything
    /// playing pauses both views, otherwise both start. A view that cannot
    /// play therefore never blocks pausing its partner.
    pub fn toggle(&mut self, view: ViewId) -> bool {
        if !self.sync_playback {
            return self.controller_mut(view).toggle();
        }
        if self.is_any_playing() {
            self.pause(view);
            false
        } else {
            self.play(view)
        }
    }

    /// Invalid speeds are rejected for every target and change nothing.
    pub fn set_speed(&mut self, view: ViewId, speed: f32) -> bool {
        if !(speed.is_finite() && speed > 0.0) {
            log::warn!("Ignoring invalid playback speed {speed}");
            return false;
        }
        for id in self.targets(view) {
            self.controller_mut(id).set_speed(speed);
        }
        true
    }

    pub fn set_loop(&mut self, view: ViewId, loop_enabled: bool) {
        for id in self.targets(view) {
            self.controller_mut(id).set_loop(loop_enabled);
        }
    }

    /// Scrubs `view` (and its partner when synced) to the same target time.
    pub fn seek(&mut self, view: ViewId, time: f32) -> [Option<TimeUpdate>; 2] {
        let mut updates = [None, None];
        for id in self.targets(view) {
            updates[id.index()] = self.controller_mut(id).seek(time);
        }
        updates
    }

    /// Relative scrub from `view`'s current time.
    pub fn step(&mut self, view: ViewId, offset: f32) -> [Option<TimeUpdate>; 2] {
        let time = self.controller(view).current_time() + offset;
        self.seek(view, time)
    }

    /// Rewinds both views to the start, synced or not.
    pub fn reset(&mut self) -> [Option<TimeUpdate>; 2] {
        [
            self.controller_mut(ViewId::A).seek(0.0),
            self.controller_mut(ViewId::B).seek(0.0),
        ]
    }

    // ========================================================================
    // Frame
    // ========================================================================

    /// Advances both views by `delta_seconds`, reconciles them, then poses
    /// their instances. Both clocks advance whether synced or not.
    pub fn tick(&mut self, delta_seconds: f32) -> ComparisonFrame {
        let mut updates = [
            self.views[0].controller.tick(delta_seconds),
            self.views[1].controller.tick(delta_seconds),
        ];

        // Reads post-tick state of both views.
        let snap = self.reconcile();
        let resynced = snap.is_some();
        if snap.is_some() {
            updates[ViewId::B.index()] = snap;
        }

        for view in &mut self.views {
            view.pose();
        }

        ComparisonFrame { updates, resynced }
    }

    /// Snaps a drifted view B back to view A. Returns B's seek report.
    fn reconcile(&mut self) -> Option<TimeUpdate> {
        if !self.sync_playback {
            return None;
        }
        let a = &self.views[0].controller;
        let b = &self.views[1].controller;
        if !(a.is_playing() && b.is_playing()) {
            return None;
        }

        let duration = a.duration();
        if (duration - b.duration()).abs() > 1e-4 {
            return None;
        }

        let gap = (a.current_time() - b.current_time()).abs();
        let gap = if a.loop_enabled() { gap.min(duration - gap) } else { gap };
        if gap <= DRIFT_TOLERANCE {
            return None;
        }

        let time = a.current_time();
        log::debug!("Synced views drifted by {gap:.3}s; snapping view B to {time:.3}s");
        self.views[1].controller.seek(time)
    }

    // ========================================================================
    // Cameras
    // ========================================================================

    pub fn camera_mut(&mut self, view: ViewId) -> &mut OrbitControls {
        &mut self.cameras[view.index()]
    }

    /// Change event of `view`'s viewport; mirrors it when camera sync is on.
    pub fn notify_camera_changed(&mut self, view: ViewId) -> CameraSyncOutcome {
        if !self.enabled {
            return CameraSyncOutcome::Detached;
        }
        self.camera_bridge.on_camera_change(view, &mut self.cameras)
    }

    /// A user orbit drag on `view`. Returns the sync outcome when the camera
    /// moved.
    pub fn orbit(&mut self, view: ViewId, delta: Vec2) -> Option<CameraSyncOutcome> {
        let camera = self.camera_mut(view);
        camera.rotate(delta);
        if camera.update() {
            Some(self.notify_camera_changed(view))
        } else {
            None
        }
    }
}

/// Starts `controller`, first rewinding it if it ended: to `reference` when
/// that lies inside its clip, otherwise to 0.
fn resume(controller: &mut PlaybackController, reference: f32) -> bool {
    if controller.state() == PlaybackState::Ended {
        let start = if reference < controller.duration() {
            reference
        } else {
            0.0
        };
        controller.seek(start);
    }
    controller.play()
}
