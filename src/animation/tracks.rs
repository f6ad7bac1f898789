use crate::animation::values::Interpolatable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterpolationMode {
    Linear,
    Step,
    /// Values are stored as `[in_tangent, value, out_tangent]` per keyframe.
    CubicSpline,
}

/// How many neighbouring intervals the cursor probes before falling back
/// to a binary search.
const CURSOR_PROBE: usize = 3;

/// Per-binding memo of the last keyframe interval, so sequential playback
/// samples in O(1).
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyframeCursor {
    pub last_index: usize,
}

#[derive(Debug, Clone)]
pub struct KeyframeTrack<T: Interpolatable> {
    pub times: Vec<f32>,
    pub values: Vec<T>,
    pub interpolation: InterpolationMode,
}

impl<T: Interpolatable> KeyframeTrack<T> {
    #[must_use]
    pub fn new(times: Vec<f32>, values: Vec<T>, interpolation: InterpolationMode) -> Self {
        Self {
            times,
            values,
            interpolation,
        }
    }

    /// Time of the last keyframe, or 0 for an empty track.
    #[must_use]
    pub fn end_time(&self) -> f32 {
        self.times.last().copied().unwrap_or(0.0)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Stateless sampling. Returns `None` for an empty track.
    #[must_use]
    pub fn sample(&self, time: f32) -> Option<T> {
        if self.times.is_empty() {
            return None;
        }
        Some(self.sample_interval(self.search(time), time))
    }

    /// Sampling that reuses and updates `cursor`.
    pub fn sample_with_cursor(&self, time: f32, cursor: &mut KeyframeCursor) -> Option<T> {
        if self.times.is_empty() {
            return None;
        }
        let index = self.probe(time, cursor.last_index).unwrap_or_else(|| self.search(time));
        cursor.last_index = index;
        Some(self.sample_interval(index, time))
    }

    /// Index of the interval `[times[i], times[i + 1])` containing `time`,
    /// clamped to the first/last keyframe.
    fn search(&self, time: f32) -> usize {
        self.times.partition_point(|&t| t <= time).saturating_sub(1)
    }

    /// Scans a few intervals around `hint` in the direction of `time`.
    fn probe(&self, time: f32, hint: usize) -> Option<usize> {
        let last = self.times.len() - 1;
        let hint = hint.min(last);

        if time >= self.times[hint] {
            for idx in hint..=(hint + CURSOR_PROBE).min(last) {
                if idx == last || time < self.times[idx + 1] {
                    return Some(idx);
                }
            }
        } else {
            for idx in (hint.saturating_sub(CURSOR_PROBE)..hint).rev() {
                if time >= self.times[idx] {
                    return Some(idx);
                }
            }
            if hint <= CURSOR_PROBE {
                // Before the first keyframe.
                return Some(0);
            }
        }
        None
    }

    fn value_at(&self, index: usize) -> &T {
        match self.interpolation {
            InterpolationMode::CubicSpline => &self.values[index * 3 + 1],
            InterpolationMode::Linear | InterpolationMode::Step => &self.values[index],
        }
    }

    fn sample_interval(&self, index: usize, time: f32) -> T {
        let last = self.times.len() - 1;
        if index >= last {
            return self.value_at(last).clone();
        }

        let t0 = self.times[index];
        let dt = self.times[index + 1] - t0;
        let t = if dt > 1e-6 {
            ((time - t0) / dt).clamp(0.0, 1.0)
        } else {
            0.0
        };

        match self.interpolation {
            InterpolationMode::Step => self.value_at(index).clone(),
            InterpolationMode::Linear => {
                T::interpolate_linear(self.value_at(index), self.value_at(index + 1), t)
            }
            InterpolationMode::CubicSpline => {
                let a = index * 3;
                let b = (index + 1) * 3;
                T::interpolate_cubic(
                    &self.values[a + 1],
                    &self.values[a + 2],
                    &self.values[b],
                    &self.values[b + 1],
                    t,
                    dt,
                )
            }
        }
    }
}
