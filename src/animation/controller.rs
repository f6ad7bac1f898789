//! Playback Transport
//!
//! [`PlaybackController`] is the per-view transport: a small state machine
//! over a [`ClipBinding`] driven once per render frame.
//!
//! ```text
//!  NoClip ──set_clip(playable)──▶ Paused ◀──pause/toggle── Playing
//!                                   │  ──play/toggle──────▶  │ ▲
//!                                   ▲                        │ └─ wrap (loop on)
//!                 seek(< duration)  │                        ▼
//!                                 Ended ◀── end reached (loop off)
//! ```
//!
//! Clearing the clip returns to `NoClip` from any state.

use std::sync::Arc;

use crate::animation::binding::{ClipBinding, LoopEvent};
use crate::animation::clip::AnimationClip;

/// Minimum movement of the cursor, in clip seconds, before a progress
/// update is reported. Wraps, clamps and seeks bypass it.
pub const REPORT_THRESHOLD: f32 = 0.033;

/// Speed choices offered by the UI.
pub const SPEED_PRESETS: [f32; 8] = [0.25, 0.5, 0.75, 1.0, 1.25, 1.5, 1.75, 2.0];
pub const MIN_PRESET_SPEED: f32 = 0.25;
pub const MAX_PRESET_SPEED: f32 = 2.0;
pub const DEFAULT_SPEED: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaybackState {
    /// No clip, or a clip that cannot play (zero duration or no tracks).
    NoClip,
    Paused,
    Playing,
    /// Reached the end with looping off; held at `duration`.
    Ended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUpdateKind {
    Progress,
    Wrapped,
    Clamped,
    Seek,
}

/// A time change reported to the view's observer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeUpdate {
    pub time: f32,
    pub kind: TimeUpdateKind,
}

#[derive(Debug, Clone)]
pub struct PlaybackController {
    binding: ClipBinding,
    state: PlaybackState,
    speed: f32,
    loop_enabled: bool,
    last_reported: f32,
}

impl Default for PlaybackController {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaybackController {
    #[must_use]
    pub fn new() -> Self {
        Self {
            binding: ClipBinding::new(),
            state: PlaybackState::NoClip,
            speed: DEFAULT_SPEED,
            loop_enabled: true,
            last_reported: 0.0,
        }
    }

    /// A controller with persisted transport preferences. An invalid speed
    /// falls back to the default.
    #[must_use]
    pub fn with_preferences(speed: f32, loop_enabled: bool) -> Self {
        let mut controller = Self::new();
        controller.set_speed(speed);
        controller.loop_enabled = loop_enabled;
        controller
    }

    // ========================================================================
    // Read surface
    // ========================================================================

    #[inline]
    #[must_use]
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    #[inline]
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    #[inline]
    #[must_use]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    #[inline]
    #[must_use]
    pub fn loop_enabled(&self) -> bool {
        self.loop_enabled
    }

    #[inline]
    #[must_use]
    pub fn current_time(&self) -> f32 {
        if self.state == PlaybackState::NoClip {
            0.0
        } else {
            self.binding.time()
        }
    }

    /// Duration of the bound clip; 0 without a playable clip.
    #[inline]
    #[must_use]
    pub fn duration(&self) -> f32 {
        if self.state == PlaybackState::NoClip {
            0.0
        } else {
            self.binding.duration()
        }
    }

    #[must_use]
    pub fn bound_clip_name(&self) -> Option<&str> {
        self.binding.clip().map(|c| c.name.as_str())
    }

    #[must_use]
    pub fn clip(&self) -> Option<&Arc<AnimationClip>> {
        self.binding.clip()
    }

    /// Whether the UI should show transport controls for this view.
    #[inline]
    #[must_use]
    pub fn has_playable_clip(&self) -> bool {
        self.state != PlaybackState::NoClip
    }

    /// Time carried by the most recent [`TimeUpdate`].
    #[inline]
    #[must_use]
    pub fn last_reported_time(&self) -> f32 {
        self.last_reported
    }

    // ========================================================================
    // Commands
    // ========================================================================

    /// Binds `clip` at time 0. A view that was playing keeps playing the
    /// new clip; otherwise the controller comes up paused. Unplayable clips
    /// stay bound (for display) but leave the controller in `NoClip`.
    pub fn set_clip(&mut self, clip: Option<Arc<AnimationClip>>) {
        let was_playing = self.is_playing();
        self.binding.bind(clip);
        self.last_reported = 0.0;

        let playable = self.binding.clip().map(|c| c.is_playable());
        self.state = match playable {
            None => PlaybackState::NoClip,
            Some(false) => {
                if let Some(clip) = self.binding.clip() {
                    log::debug!(
                        "Clip '{}' is not playable (duration {}, {} tracks)",
                        clip.name,
                        clip.duration,
                        clip.track_count()
                    );
                }
                PlaybackState::NoClip
            }
            Some(true) if was_playing => {
                self.binding.set_paused(false);
                PlaybackState::Playing
            }
            Some(true) => PlaybackState::Paused,
        };
    }

    /// Binds `clip` and places its cursor at `start_time` (clamped).
    pub fn set_clip_at(&mut self, clip: Option<Arc<AnimationClip>>, start_time: f32) {
        self.set_clip(clip);
        if self.has_playable_clip() {
            let time = self.binding.seek(start_time);
            self.last_reported = time;
        }
    }

    /// Drops the clip. Safe at any point, including between ticks.
    pub fn clear(&mut self) {
        self.set_clip(None);
    }

    /// Returns whether the controller is playing afterwards.
    pub fn play(&mut self) -> bool {
        match self.state {
            PlaybackState::NoClip => return false,
            PlaybackState::Playing => return true,
            PlaybackState::Paused => {}
            PlaybackState::Ended => {
                if !self.loop_enabled {
                    log::debug!("play() ignored: clip ended and looping is off");
                    return false;
                }
            }
        }
        self.binding.set_paused(false);
        self.state = PlaybackState::Playing;
        true
    }

    pub fn pause(&mut self) {
        if self.state == PlaybackState::Playing {
            self.binding.set_paused(true);
            self.state = PlaybackState::Paused;
        }
    }

    /// Returns whether the controller is playing afterwards.
    pub fn toggle(&mut self) -> bool {
        if self.is_playing() {
            self.pause();
            false
        } else {
            self.play()
        }
    }

    /// Accepts any finite positive speed; anything else is ignored.
    pub fn set_speed(&mut self, speed: f32) -> bool {
        if !(speed.is_finite() && speed > 0.0) {
            log::warn!("Ignoring invalid playback speed {speed}; keeping {}", self.speed);
            return false;
        }
        self.speed = speed;
        true
    }

    pub fn set_loop(&mut self, loop_enabled: bool) {
        self.loop_enabled = loop_enabled;
    }

    /// Moves the cursor to `time`, clamped into `[0, duration]`, and
    /// reports it immediately. Play/pause is untouched, except that
    /// leaving the end releases the `Ended` hold.
    pub fn seek(&mut self, time: f32) -> Option<TimeUpdate> {
        if self.state == PlaybackState::NoClip {
            return None;
        }
        let time = self.binding.seek(time);
        if self.state == PlaybackState::Ended && time < self.binding.duration() {
            self.state = PlaybackState::Paused;
        }
        Some(self.report(time, TimeUpdateKind::Seek))
    }

    /// Relative scrub by `offset` seconds.
    pub fn step(&mut self, offset: f32) -> Option<TimeUpdate> {
        self.seek(self.current_time() + offset)
    }

    /// Advances playback by `delta_seconds` of wall-clock time.
    pub fn tick(&mut self, delta_seconds: f32) -> Option<TimeUpdate> {
        if self.state != PlaybackState::Playing {
            return None;
        }

        let delta = if delta_seconds.is_finite() {
            delta_seconds.max(0.0)
        } else {
            0.0
        };
        self.binding.advance(delta, self.speed);

        match self.binding.apply_loop_policy(self.loop_enabled) {
            LoopEvent::Wrapped => Some(self.report(self.binding.time(), TimeUpdateKind::Wrapped)),
            LoopEvent::Clamped => {
                self.state = PlaybackState::Ended;
                log::debug!("Playback reached end at {:.3}s", self.binding.time());
                Some(self.report(self.binding.time(), TimeUpdateKind::Clamped))
            }
            LoopEvent::None => {
                let time = self.binding.time();
                if (time - self.last_reported).abs() > REPORT_THRESHOLD {
                    Some(self.report(time, TimeUpdateKind::Progress))
                } else {
                    None
                }
            }
        }
    }

    fn report(&mut self, time: f32, kind: TimeUpdateKind) -> TimeUpdate {
        self.last_reported = time;
        TimeUpdate { time, kind }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::binder::TargetPath;
    use crate::animation::clip::{Track, TrackData, TrackMeta};
    use crate::animation::tracks::{InterpolationMode, KeyframeTrack};
    use glam::Vec3;

    fn clip(duration: f32) -> Arc<AnimationClip> {
        Arc::new(AnimationClip::with_duration(
            "walk",
            duration,
            vec![Track {
                meta: TrackMeta {
                    node_name: "Hips".to_string(),
                    target: TargetPath::Translation,
                },
                data: TrackData::Vector3(KeyframeTrack::new(
                    vec![0.0, duration],
                    vec![Vec3::ZERO, Vec3::X],
                    InterpolationMode::Linear,
                )),
            }],
        ))
    }

    #[test]
    fn small_steps_are_rate_limited() {
        let mut c = PlaybackController::new();
        c.set_clip(Some(clip(2.0)));
        c.play();
        assert!(c.tick(0.01).is_none());
        assert!(c.tick(0.01).is_none());
        assert!(c.tick(0.01).is_none());
        let update = c.tick(0.01).expect("0.04s exceeds the threshold");
        assert_eq!(update.kind, TimeUpdateKind::Progress);
        assert!((c.last_reported_time() - 0.04).abs() < 1e-5);
    }

    #[test]
    fn replacing_clip_while_playing_keeps_playing() {
        let mut c = PlaybackController::new();
        c.set_clip(Some(clip(2.0)));
        c.play();
        c.tick(0.5);
        c.set_clip(Some(clip(3.0)));
        assert!(c.is_playing());
        assert_eq!(c.current_time(), 0.0);
    }
}
