use std::f32::consts::PI;

use cgmath::{Basis3, InnerSpace, Point3, Rad, Rotation, Rotation3, Vector3, Zero};

use crate::input::InputSnapshot;
use crate::section::Bounds;

/// Wrap into (-π, π].
pub fn wrap_angle(a: f32) -> f32 {
    let mut a = a % (2.0 * PI);
    if a > PI {
        a -= 2.0 * PI;
    } else if a <= -PI {
        a += 2.0 * PI;
    }
    a
}

/// Camera-relative unit direction from the held keys, or zero.
///
/// Forward is -Z and right is +X in camera space. Opposing keys cancel
/// before normalisation, so diagonals are no faster than straight lines.
pub fn local_direction(snapshot: &InputSnapshot) -> Vector3<f32> {
    let front = (snapshot.back as i32 - snapshot.forward as i32) as f32;
    let side = (snapshot.left as i32 - snapshot.right as i32) as f32;
    let dir = Vector3::new(-side, 0.0, front);
    if dir.magnitude2() == 0.0 {
        Vector3::zero()
    } else {
        dir.normalize()
    }
}

/// World-space step for one frame. Always horizontal.
pub fn displacement(snapshot: &InputSnapshot, yaw: f32, dt: f32, speed: f32) -> Vector3<f32> {
    let dt = if dt.is_finite() && dt > 0.0 { dt } else { 0.0 };
    let local = local_direction(snapshot) * (speed * dt);
    let mut world = Basis3::from_angle_y(Rad(yaw)).rotate_vector(local);
    world.y = 0.0;
    world
}

/// Advance `position` by one frame of input and clamp it into `bounds`.
///
/// With no direction held the position is returned untouched, whatever the
/// yaw or frame time.
pub fn integrate(
    snapshot: &InputSnapshot,
    yaw: f32,
    dt: f32,
    position: Point3<f32>,
    bounds: &Bounds,
    speed: f32,
) -> Point3<f32> {
    if !snapshot.any_direction() {
        return position;
    }
    let candidate = position + displacement(snapshot, yaw, dt, speed);
    bounds.clamp(candidate, position)
}

/// The one authoritative player (and camera) transform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerState {
    pub position: Point3<f32>,
    pub facing_yaw: f32,
}

impl PlayerState {
    pub fn new(spawn: Point3<f32>, facing_yaw: f32) -> Self {
        PlayerState {
            position: spawn,
            facing_yaw: wrap_angle(facing_yaw),
        }
    }

    /// Mouse right turns right (yaw decreases).
    pub fn apply_look(&mut self, dx: f32, sensitivity: f32) {
        if !dx.is_finite() {
            return;
        }
        self.facing_yaw = wrap_angle(self.facing_yaw - dx * sensitivity);
    }

    pub fn step(&mut self, snapshot: &InputSnapshot, dt: f32, bounds: &Bounds, speed: f32) {
        self.position = integrate(snapshot, self.facing_yaw, dt, self.position, bounds, speed);
    }

    /// Hard reset to `spawn`; no interpolation from the old position.
    pub fn relocate(&mut self, spawn: Point3<f32>) {
        self.position = spawn;
    }
}
