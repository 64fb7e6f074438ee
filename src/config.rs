use cgmath::Vector3;

use crate::section::SectionId;

pub const MOVE_SPEED: f32 = 5.0;
pub const MOUSE_SENSITIVITY: f32 = 0.002;
pub const EYE_HEIGHT: f32 = 1.7;

/// Tunables for the walkable gallery. Everything here is fixed for the
/// session; nothing is read from the environment or persisted.
#[derive(Clone, Debug, PartialEq)]
pub struct GalleryConfig {
    /// Walking speed in world units per second.
    pub move_speed: f32,
    /// Yaw radians per pixel of horizontal mouse motion.
    pub mouse_sensitivity: f32,
    pub eye_height: f32,
    /// Corridor half width around the section origin.
    pub half_extent_x: f32,
    /// How far the player may walk down the corridor (toward -Z).
    pub extent_z_back: f32,
    /// How far the player may back up behind the spawn point (toward +Z).
    pub extent_z_front: f32,
    /// Distance between consecutive section origins along -Z.
    pub section_spacing: f32,
    pub initial_yaw: f32,
    pub default_section: SectionId,
    /// Portal centre relative to the section floor origin.
    pub portal_offset: Vector3<f32>,
    pub portal_radius: f32,
    pub fovy_degrees: f32,
    /// Longest frame the loop will integrate; stalls beyond this are dropped.
    pub max_frame_dt: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            move_speed: MOVE_SPEED,
            mouse_sensitivity: MOUSE_SENSITIVITY,
            eye_height: EYE_HEIGHT,
            half_extent_x: 4.5,
            extent_z_back: 17.0,
            extent_z_front: 2.0,
            section_spacing: 100.0,
            initial_yaw: std::f32::consts::PI,
            default_section: SectionId::Pompeii,
            portal_offset: Vector3::new(0.0, 1.0, -15.0),
            portal_radius: 1.3,
            fovy_degrees: 75.0,
            max_frame_dt: 0.25,
            znear: 0.1,
            zfar: 300.0,
        }
    }
}
