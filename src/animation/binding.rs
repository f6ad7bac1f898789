use std::sync::Arc;

use crate::animation::clip::AnimationClip;

/// What [`ClipBinding::apply_loop_policy`] did to the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopEvent {
    /// Cursor is still inside the clip.
    None,
    /// Cursor crossed the end and wrapped back into `[0, duration)`.
    Wrapped,
    /// Cursor crossed the end without looping: held at `duration`, paused.
    Clamped,
}

/// One clip and its time cursor.
///
/// Unbound, every operation is inert and the cursor stays at 0.
#[derive(Debug, Clone)]
pub struct ClipBinding {
    clip: Option<Arc<AnimationClip>>,
    cursor: f32,
    paused: bool,
}

impl Default for ClipBinding {
    fn default() -> Self {
        Self::new()
    }
}

impl ClipBinding {
    #[must_use]
    pub fn new() -> Self {
        Self {
            clip: None,
            cursor: 0.0,
            paused: true,
        }
    }

    /// Detaches the previous clip and binds `clip` at time 0, paused.
    pub fn bind(&mut self, clip: Option<Arc<AnimationClip>>) {
        self.clip = clip;
        self.cursor = 0.0;
        self.paused = true;
    }

    #[inline]
    #[must_use]
    pub fn clip(&self) -> Option<&Arc<AnimationClip>> {
        self.clip.as_ref()
    }

    #[inline]
    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.clip.is_some()
    }

    /// Duration of the bound clip, 0 when unbound.
    #[inline]
    #[must_use]
    pub fn duration(&self) -> f32 {
        self.clip.as_ref().map_or(0.0, |c| c.duration)
    }

    #[inline]
    #[must_use]
    pub fn time(&self) -> f32 {
        self.cursor
    }

    #[inline]
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Moves the cursor by `delta_seconds * speed`. Returns whether it moved.
    pub fn advance(&mut self, delta_seconds: f32, speed: f32) -> bool {
        if self.clip.is_none() || self.paused {
            return false;
        }
        self.cursor += delta_seconds * speed;
        true
    }

    /// Enforces the end-of-clip contract: wrap when looping, otherwise hold
    /// at exactly `duration` and pause.
    pub fn apply_loop_policy(&mut self, loop_enabled: bool) -> LoopEvent {
        let duration = self.duration();
        if duration <= 0.0 || self.cursor < duration {
            return LoopEvent::None;
        }

        if loop_enabled {
            self.cursor %= duration;
            // `%` can land on `duration` itself through rounding.
            if self.cursor >= duration || self.cursor < 0.0 {
                self.cursor = 0.0;
            }
            LoopEvent::Wrapped
        } else {
            self.cursor = duration;
            self.paused = true;
            LoopEvent::Clamped
        }
    }

    /// Places the cursor at `time` clamped into `[0, duration]`.
    /// The paused flag is left as it is.
    pub fn seek(&mut self, time: f32) -> f32 {
        let duration = self.duration();
        self.cursor = if time.is_nan() {
            0.0
        } else {
            time.clamp(0.0, duration)
        };
        self.cursor
    }
}
