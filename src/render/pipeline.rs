use bytemuck::{Pod, Zeroable};
use cgmath::Matrix4;

use crate::camera::Camera;
use crate::render::cube::Vertex;
use crate::render::scene::InstanceRaw;

pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

#[repr(C)]
#[derive(Default, Copy, Clone, Debug, Pod, Zeroable)]
pub struct CameraUniform {
    view_proj: [[f32; 4]; 4],
    eye: [f32; 4],
}

impl CameraUniform {
    pub fn from_camera(camera: &Camera) -> Self {
        let view_proj: Matrix4<f32> = camera.view_projection();
        CameraUniform {
            view_proj: view_proj.into(),
            eye: [camera.eye.x, camera.eye.y, camera.eye.z, 1.0],
        }
    }
}

pub struct GalleryPipeline {
    pipeline: wgpu::RenderPipeline,
}

impl GalleryPipeline {
    pub fn new(device: &wgpu::Device, format: wgpu::TextureFormat) -> Self {
        let camera_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Gallery: Camera Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Gallery Pipeline Layout"),
            bind_group_layouts: &[&camera_bind_group_layout],
            push_constant_ranges: &[],
        });
        let shader = device.create_shader_module(wgpu::include_wgsl!("gallery.wgsl"));
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Gallery Pipeline"),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[Vertex::layout(), InstanceRaw::layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(format.into())],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                // Corridor walls are seen from inside, so both faces are drawn.
                cull_mode: None,
                unclipped_depth: false,
                polygon_mode: Default::default(),
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: Default::default(),
                bias: Default::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        Self { pipeline }
    }
}

pub struct GalleryBindings {
    camera_uniform: wgpu::BindGroup,
}

impl GalleryBindings {
    pub fn new(
        device: &wgpu::Device,
        GalleryPipeline { pipeline }: &GalleryPipeline,
        camera_uniform: &wgpu::Buffer,
    ) -> Self {
        let camera_uniform = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Gallery: Camera Uniform Bind Group"),
            layout: &pipeline.get_bind_group_layout(0),
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_uniform.as_entire_binding(),
            }],
        });
        Self { camera_uniform }
    }
}

impl<'a> GalleryPipeline {
    pub fn record<'pass>(
        &'a self,
        rpass: &mut wgpu::RenderPass<'pass>,
        bindings: &'a GalleryBindings,
        vertices: &'a wgpu::Buffer,
        instances: &'a wgpu::Buffer,
        instance_count: u32,
    ) where
        'a: 'pass,
    {
        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &bindings.camera_uniform, &[]);
        rpass.set_vertex_buffer(0, vertices.slice(..));
        rpass.set_vertex_buffer(1, instances.slice(..));
        rpass.draw(0..super::cube::CUBE_VERTICES.len() as u32, 0..instance_count);
    }
}
