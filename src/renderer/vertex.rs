//! Vertex types and quad geometry

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

/// Quad corner with position and texture coordinate
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct QuadVertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

impl QuadVertex {
    pub const fn new(x: f32, y: f32, u: f32, v: f32) -> Self {
        Self {
            position: [x, y, 0.0],
            uv: [u, v],
        }
    }

    /// Layout with both position and uv
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x2,
                },
            ],
        }
    }

    /// Layout exposing only the position, for shaders that ignore uv
    pub fn position_desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x3,
            }],
        }
    }
}

/// Quad corner for the playground shader: position, uv and color
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct PlayVertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
    pub color: [f32; 4],
}

impl PlayVertex {
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<PlayVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 5]>() as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Unit quad with corners at ±1 and uvs 0..1, counter-clockwise from bottom-left
pub const UNIT_QUAD: [QuadVertex; 4] = [
    QuadVertex::new(-1.0, -1.0, 0.0, 0.0),
    QuadVertex::new(1.0, -1.0, 1.0, 0.0),
    QuadVertex::new(1.0, 1.0, 1.0, 1.0),
    QuadVertex::new(-1.0, 1.0, 0.0, 1.0),
];

/// Two triangles covering a four-corner fan
pub const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

/// Playground quad: uvs run -4..4 so repeat-addressed textures tile,
/// corners are red, green, blue and magenta
pub fn play_quad(half_size: f32) -> [PlayVertex; 4] {
    let h = half_size;
    [
        PlayVertex {
            position: [-h, -h, 0.0],
            uv: [-4.0, -4.0],
            color: [1.0, 0.0, 0.0, 1.0],
        },
        PlayVertex {
            position: [h, -h, 0.0],
            uv: [4.0, -4.0],
            color: [0.0, 1.0, 0.0, 1.0],
        },
        PlayVertex {
            position: [h, h, 0.0],
            uv: [4.0, 4.0],
            color: [0.0, 0.0, 1.0, 1.0],
        },
        PlayVertex {
            position: [-h, h, 0.0],
            uv: [-4.0, 4.0],
            color: [1.0, 0.0, 1.0, 1.0],
        },
    ]
}

/// Indexed quad geometry living on the GPU
pub struct QuadMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
}

impl QuadMesh {
    pub fn new<V: Pod>(device: &wgpu::Device, label: &str, vertices: &[V; 4]) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            vertex_buffer,
            index_buffer,
        }
    }

    /// Bind the buffers and draw both triangles
    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
        pass.draw_indexed(0..QUAD_INDICES.len() as u32, 0, 0..1);
    }
}
