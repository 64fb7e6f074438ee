use bytemuck::{Pod, Zeroable};

#[repr(C)]
#[derive(Default, Copy, Clone, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl Vertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

const fn v(position: [f32; 3], normal: [f32; 3]) -> Vertex {
    Vertex { position, normal }
}

const V_NNN: [f32; 3] = [-0.5, -0.5, -0.5];
const V_PNN: [f32; 3] = [0.5, -0.5, -0.5];
const V_PPN: [f32; 3] = [0.5, 0.5, -0.5];
const V_NPN: [f32; 3] = [-0.5, 0.5, -0.5];
const V_NNP: [f32; 3] = [-0.5, -0.5, 0.5];
const V_PNP: [f32; 3] = [0.5, -0.5, 0.5];
const V_PPP: [f32; 3] = [0.5, 0.5, 0.5];
const V_NPP: [f32; 3] = [-0.5, 0.5, 0.5];

const N_PX: [f32; 3] = [1.0, 0.0, 0.0];
const N_NX: [f32; 3] = [-1.0, 0.0, 0.0];
const N_PY: [f32; 3] = [0.0, 1.0, 0.0];
const N_NY: [f32; 3] = [0.0, -1.0, 0.0];
const N_PZ: [f32; 3] = [0.0, 0.0, 1.0];
const N_NZ: [f32; 3] = [0.0, 0.0, -1.0];

/// Unit cube centred on the origin, counter-clockwise winding seen from outside.
pub const CUBE_VERTICES: &[Vertex] = &[
    // +X
    v(V_PNN, N_PX), v(V_PPN, N_PX), v(V_PPP, N_PX),
    v(V_PNN, N_PX), v(V_PPP, N_PX), v(V_PNP, N_PX),
    // -X
    v(V_NNP, N_NX), v(V_NPP, N_NX), v(V_NPN, N_NX),
    v(V_NNP, N_NX), v(V_NPN, N_NX), v(V_NNN, N_NX),
    // +Y
    v(V_NPP, N_PY), v(V_PPP, N_PY), v(V_PPN, N_PY),
    v(V_NPP, N_PY), v(V_PPN, N_PY), v(V_NPN, N_PY),
    // -Y
    v(V_NNN, N_NY), v(V_PNN, N_NY), v(V_PNP, N_NY),
    v(V_NNN, N_NY), v(V_PNP, N_NY), v(V_NNP, N_NY),
    // +Z
    v(V_NNP, N_PZ), v(V_PNP, N_PZ), v(V_PPP, N_PZ),
    v(V_NNP, N_PZ), v(V_PPP, N_PZ), v(V_NPP, N_PZ),
    // -Z
    v(V_PNN, N_NZ), v(V_NNN, N_NZ), v(V_NPN, N_NZ),
    v(V_PNN, N_NZ), v(V_NPN, N_NZ), v(V_PPN, N_NZ),
];
