use cgmath::{InnerSpace, Point3, Vector3};

use crate::config::GalleryConfig;
use crate::section::{Section, SectionId};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TeleportRequest {
    pub target: SectionId,
}

/// Portal at the far end of a section's corridor. A flat disc facing +Z,
/// always leading to the owning section's `next`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TeleportTrigger {
    pub section: SectionId,
    pub target: SectionId,
    pub center: Point3<f32>,
    pub radius: f32,
}

impl TeleportTrigger {
    pub fn for_section(section: &Section, config: &GalleryConfig) -> Self {
        TeleportTrigger {
            section: section.id,
            target: section.next,
            center: section.to_world(config.portal_offset),
            radius: config.portal_radius,
        }
    }

    /// Activation is unconditional: no cooldown, no confirmation.
    pub fn activate(&self) -> TeleportRequest {
        TeleportRequest {
            target: self.target,
        }
    }

    /// Distance along the ray to the portal disc, if the ray hits it.
    pub fn intersect_ray(&self, origin: Point3<f32>, dir: Vector3<f32>) -> Option<f32> {
        if dir.z.abs() < 1e-6 {
            return None;
        }
        let t = (self.center.z - origin.z) / dir.z;
        if !(t >= 0.0) {
            return None;
        }
        let hit = origin + dir * t;
        let offset = hit - self.center;
        (offset.magnitude2() <= self.radius * self.radius).then_some(t)
    }
}
