//! Mirrors orbit camera changes between the two comparison views.

use crate::comparison::view::ViewId;
use crate::utils::OrbitControls;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraSyncOutcome {
    /// The partner camera was moved to match the source.
    Mirrored,
    /// The partner already matched; nothing propagated.
    Unchanged,
    /// Raised while a mirror was in progress; dropped, not queued.
    Reentrant,
    /// Camera sync is off.
    Detached,
}

/// Mirrors camera moves between the two comparison viewports.
///
/// Both viewports use identical controls, so the source of an event cannot
/// tell a user drag from a mirrored update. A guard flag, held only for the
/// duration of one mirror, drops the echo the partner raises.
#[derive(Debug, Default)]
pub struct CameraSyncBridge {
    attached: bool,
    syncing: bool,
    mirrored: [u32; 2],
    dropped: u32,
}

impl CameraSyncBridge {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts listening to both viewports.
    pub fn attach(&mut self) {
        self.attached = true;
    }

    /// Stops listening; later change events propagate nothing.
    pub fn detach(&mut self) {
        self.attached = false;
        self.syncing = false;
    }

    #[inline]
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Whether a mirror is in progress. Never true between frames.
    #[inline]
    #[must_use]
    pub fn is_syncing(&self) -> bool {
        self.syncing
    }

    /// Mirrored updates written into `view`'s camera so far.
    #[must_use]
    pub fn mirrored_into(&self, view: ViewId) -> u32 {
        self.mirrored[view.index()]
    }

    /// Reentrant events dropped so far.
    #[must_use]
    pub fn dropped_events(&self) -> u32 {
        self.dropped
    }

    /// Change handler for `source`'s viewport.
    ///
    /// Copies the source camera's position and target onto the partner and
    /// runs the partner's update. If that update moves the partner, its own
    /// change event is raised synchronously and hits the guard.
    pub fn on_camera_change(
        &mut self,
        source: ViewId,
        controls: &mut [OrbitControls; 2],
    ) -> CameraSyncOutcome {
        if !self.attached {
            return CameraSyncOutcome::Detached;
        }
        if self.syncing {
            self.dropped += 1;
            log::trace!("Dropped reentrant camera event from view {source:?}");
            return CameraSyncOutcome::Reentrant;
        }

        self.syncing = true;

        let partner = source.other();
        let moved = {
            let (from, to) = split_pair(controls, source);
            to.position = from.position;
            to.target = from.target;
            to.update()
        };

        if moved {
            self.mirrored[partner.index()] += 1;
            let echo = self.on_camera_change(partner, controls);
            debug_assert_eq!(echo, CameraSyncOutcome::Reentrant);
        }

        self.syncing = false;

        if moved {
            CameraSyncOutcome::Mirrored
        } else {
            CameraSyncOutcome::Unchanged
        }
    }
}

/// `(source, partner)` borrows out of the viewport pair.
fn split_pair(controls: &mut [OrbitControls; 2], source: ViewId) -> (&OrbitControls, &mut OrbitControls) {
    let [a, b] = controls;
    match source {
        ViewId::A => (&*a, b),
        ViewId::B => (&*b, a),
    }
}
