use glam::{Vec2, Vec3};

const EPS: f32 = 0.0001;

/// Orbit camera controls for one viewport.
///
/// `position` and `target` are the camera state other code may copy or
/// overwrite directly; [`update`](Self::update) folds pending user input in,
/// enforces the distance and polar limits and reports whether the camera
/// actually moved, which is the viewport's "change" event.
#[derive(Debug, Clone)]
pub struct OrbitControls {
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub max_polar_angle: f32,

    pub position: Vec3,
    pub target: Vec3,

    rotate_delta: Vec2,
    zoom_steps: f32,
    pan_offset: Vec3,

    last_position: Vec3,
    last_target: Vec3,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self::new(Vec3::new(5.0, 3.0, 8.0), Vec3::ZERO)
    }
}

impl OrbitControls {
    #[must_use]
    pub fn new(position: Vec3, target: Vec3) -> Self {
        Self {
            rotate_speed: 1.0,
            zoom_speed: 0.05,
            min_distance: 2.0,
            max_distance: 20.0,
            max_polar_angle: std::f32::consts::FRAC_PI_2,

            position,
            target,

            rotate_delta: Vec2::ZERO,
            zoom_steps: 0.0,
            pan_offset: Vec3::ZERO,

            last_position: position,
            last_target: target,
        }
    }

    /// Queues an orbit by `delta` radians (x: azimuth, y: polar).
    pub fn rotate(&mut self, delta: Vec2) {
        self.rotate_delta += delta * self.rotate_speed;
    }

    /// Queues a dolly; positive steps move closer.
    pub fn zoom(&mut self, steps: f32) {
        self.zoom_steps += steps;
    }

    /// Queues a translation of both camera and target.
    pub fn pan(&mut self, offset: Vec3) {
        self.pan_offset += offset;
    }

    #[must_use]
    pub fn distance(&self) -> f32 {
        (self.position - self.target).length()
    }

    /// Applies queued input and limits. Returns `true` when the camera
    /// position or target changed since the previous update.
    pub fn update(&mut self) -> bool {
        let offset = self.position - self.target;
        let mut radius = offset.length().max(EPS);
        let mut theta = offset.x.atan2(offset.z);
        let mut phi = (offset.y / radius).clamp(-1.0, 1.0).acos();

        theta += self.rotate_delta.x;
        phi += self.rotate_delta.y;
        phi = phi.clamp(EPS, self.max_polar_angle.max(EPS) - EPS);

        if self.zoom_steps != 0.0 {
            let scale = (1.0 - self.zoom_speed).powf(self.zoom_steps.abs());
            if self.zoom_steps > 0.0 {
                radius *= scale;
            } else {
                radius /= scale;
            }
        }
        radius = radius.clamp(self.min_distance, self.max_distance);

        self.target += self.pan_offset;

        let (sin_phi, cos_phi) = phi.sin_cos();
        let (sin_theta, cos_theta) = theta.sin_cos();
        self.position = self.target
            + Vec3::new(
                radius * sin_phi * sin_theta,
                radius * cos_phi,
                radius * sin_phi * cos_theta,
            );

        self.rotate_delta = Vec2::ZERO;
        self.zoom_steps = 0.0;
        self.pan_offset = Vec3::ZERO;

        let changed = self.position.distance_squared(self.last_position) > EPS * EPS
            || self.target.distance_squared(self.last_target) > EPS * EPS;
        self.last_position = self.position;
        self.last_target = self.target;
        changed
    }
}
