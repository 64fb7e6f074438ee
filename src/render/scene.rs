//! Box instances for the active section only. Other sections have no
//! instances at all; switching sections rebuilds the list from scratch.

use bytemuck::{Pod, Zeroable};
use cgmath::{EuclideanSpace, Matrix4, Point3, Rad, Vector3};

use crate::content::{artworks_for, Artwork};
use crate::section::Section;
use crate::teleport::TeleportTrigger;

const CORRIDOR_WIDTH: f32 = 10.0;
const CORRIDOR_LENGTH: f32 = 20.0;
const CORRIDOR_CENTER_Z: f32 = -7.5;
const CORRIDOR_HEIGHT: f32 = 4.0;
const SLAB: f32 = 0.1;

const WALL: [f32; 4] = [0.2, 0.2, 0.2, 1.0];
const FLOOR: [f32; 4] = [0.16, 0.16, 0.16, 1.0];
const CEILING: [f32; 4] = [0.13, 0.13, 0.13, 1.0];
const FRAME: [f32; 4] = [0.1, 0.1, 0.1, 1.0];
const FRAME_HOVERED: [f32; 4] = [0.33, 0.3, 0.22, 1.0];
const SIGN: [f32; 4] = [0.05, 0.05, 0.05, 1.0];
const PORTAL_RING: [f32; 4] = [0.29, 0.0, 0.88, 1.0];
const PORTAL_SURFACE: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct InstanceRaw {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
}

impl InstanceRaw {
    const ATTRIBUTES: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
        2 => Float32x4,
        3 => Float32x4,
        4 => Float32x4,
        5 => Float32x4,
        6 => Float32x4,
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<InstanceRaw>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBUTES,
        }
    }

    pub fn translation(&self) -> Vector3<f32> {
        Vector3::new(self.model[3][0], self.model[3][1], self.model[3][2])
    }
}

fn boxed(model: Matrix4<f32>, color: [f32; 4]) -> InstanceRaw {
    InstanceRaw {
        model: model.into(),
        color,
    }
}

fn slab(center: Point3<f32>, size: Vector3<f32>, color: [f32; 4]) -> InstanceRaw {
    boxed(
        Matrix4::from_translation(center.to_vec())
            * Matrix4::from_nonuniform_scale(size.x, size.y, size.z),
        color,
    )
}

/// Stable placeholder tint per image until textures are streamed in.
fn placeholder_color(image: &str) -> [f32; 4] {
    let hash = image
        .bytes()
        .fold(0x811c_9dc5u32, |h, b| (h ^ b as u32).wrapping_mul(0x0100_0193));
    let channel = |shift: u32| 0.25 + ((hash >> shift) & 0xff) as f32 / 255.0 * 0.6;
    [channel(0), channel(8), channel(16), 1.0]
}

pub struct SceneInstances {
    pub instances: Vec<InstanceRaw>,
}

impl SceneInstances {
    /// `hovered` names the artwork under the pointer; its frame is lit up.
    pub fn build(section: &Section, portal: &TeleportTrigger, hovered: Option<&str>) -> Self {
        let mut instances = Vec::new();
        Self::corridor(section, &mut instances);
        for artwork in artworks_for(section.id) {
            let lit = hovered == Some(artwork.id);
            Self::artwork(section, artwork, lit, &mut instances);
        }
        Self::portal(portal, &mut instances);
        SceneInstances { instances }
    }

    fn corridor(section: &Section, out: &mut Vec<InstanceRaw>) {
        let half_w = CORRIDOR_WIDTH * 0.5;
        let mid_y = CORRIDOR_HEIGHT * 0.5;
        let end_z = CORRIDOR_CENTER_Z - CORRIDOR_LENGTH * 0.5;
        let entrance_z = CORRIDOR_CENTER_Z + CORRIDOR_LENGTH * 0.5;
        let at = |x, y, z| section.to_world(Vector3::new(x, y, z));

        out.push(slab(
            at(0.0, -SLAB * 0.5, CORRIDOR_CENTER_Z),
            Vector3::new(CORRIDOR_WIDTH, SLAB, CORRIDOR_LENGTH),
            FLOOR,
        ));
        out.push(slab(
            at(0.0, CORRIDOR_HEIGHT + SLAB * 0.5, CORRIDOR_CENTER_Z),
            Vector3::new(CORRIDOR_WIDTH, SLAB, CORRIDOR_LENGTH),
            CEILING,
        ));
        for side in [-1.0, 1.0] {
            out.push(slab(
                at(side * (half_w + SLAB * 0.5), mid_y, CORRIDOR_CENTER_Z),
                Vector3::new(SLAB, CORRIDOR_HEIGHT, CORRIDOR_LENGTH),
                WALL,
            ));
        }
        for z in [end_z - SLAB * 0.5, entrance_z + SLAB * 0.5] {
            out.push(slab(
                at(0.0, mid_y, z),
                Vector3::new(CORRIDOR_WIDTH, CORRIDOR_HEIGHT, SLAB),
                WALL,
            ));
        }
        // Title board near the entrance, facing down the corridor.
        out.push(slab(at(0.0, 2.5, 1.0), Vector3::new(3.2, 1.2, 0.05), SIGN));
    }

    fn artwork(section: &Section, artwork: &Artwork, lit: bool, out: &mut Vec<InstanceRaw>) {
        let [w, h] = artwork.size();
        let anchor = section.to_world(artwork.position());
        let placement =
            Matrix4::from_translation(anchor.to_vec()) * Matrix4::from_angle_y(Rad(artwork.yaw()));
        let layer = |depth: f32, sx: f32, sy: f32, sz: f32, color| {
            boxed(
                placement
                    * Matrix4::from_translation(Vector3::new(0.0, 0.0, depth))
                    * Matrix4::from_nonuniform_scale(sx, sy, sz),
                color,
            )
        };
        let frame = if lit { FRAME_HOVERED } else { FRAME };
        out.push(layer(-0.1, w + 0.2, h + 0.2, 0.1, frame));
        out.push(layer(0.0, w, h, 0.02, placeholder_color(artwork.image)));
    }

    fn portal(portal: &TeleportTrigger, out: &mut Vec<InstanceRaw>) {
        let ring = portal.radius * 2.0;
        let surface = (portal.radius - 0.3) * 2.0;
        out.push(slab(
            portal.center + Vector3::new(0.0, 0.0, -0.1),
            Vector3::new(ring, ring, 0.05),
            PORTAL_RING,
        ));
        out.push(slab(
            portal.center,
            Vector3::new(surface, surface, 0.06),
            PORTAL_SURFACE,
        ));
    }
}
