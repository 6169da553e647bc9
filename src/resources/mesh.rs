use wgpu::util::DeviceExt;

use crate::data_structures::{camera::PerspectiveCamera, mesh::Mesh};

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PositionVertex {
    pub position: [f32; 3],
}

impl PositionVertex {
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<PositionVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x3,
            }],
        }
    }
}

/// Per-mesh uniform: the full transform and the flat colour.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshUniform {
    model_view_proj: [[f32; 4]; 4],
    colour: [f32; 4],
}

impl MeshUniform {
    pub fn new(mesh: &Mesh, camera: &PerspectiveCamera) -> Self {
        Self {
            model_view_proj: (camera.view_projection() * mesh.model_matrix()).into(),
            colour: mesh.material.rgba(),
        }
    }
}

pub fn mesh_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
        label: Some("mesh_bind_group_layout"),
    })
}

/// GPU copy of a [`Mesh`]: vertex and line index buffers plus its own uniform.
///
/// Meshes are always drawn as their wireframe; there is no filled path.
///
/// The geometry never changes after upload, so only the uniform is rewritten
/// per frame.
#[derive(Debug)]
pub struct GpuMesh {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub num_elements: u32,
    pub uniform_buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
}

impl GpuMesh {
    pub fn upload(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        mesh: &Mesh,
        camera: &PerspectiveCamera,
    ) -> Self {
        let vertices: Vec<PositionVertex> = mesh
            .geometry
            .positions()
            .iter()
            .map(|&position| PositionVertex { position })
            .collect();
        let indices = mesh.geometry.wireframe_indices();

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Mesh Vertex Buffer"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Mesh Index Buffer"),
            contents: bytemuck::cast_slice(&indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Mesh Uniform Buffer"),
            contents: bytemuck::cast_slice(&[MeshUniform::new(mesh, camera)]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
            label: Some("mesh_bind_group"),
        });

        Self {
            vertex_buffer,
            index_buffer,
            num_elements: indices.len() as u32,
            uniform_buffer,
            bind_group,
        }
    }

    pub fn write_uniform(&self, queue: &wgpu::Queue, mesh: &Mesh, camera: &PerspectiveCamera) {
        queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::cast_slice(&[MeshUniform::new(mesh, camera)]),
        );
    }
}
