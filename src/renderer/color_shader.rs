//! Solid color shader

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec4};

use super::pipeline::{PipelineDesc, UniformRing, build_pipeline};
use super::vertex::{QuadMesh, QuadVertex, UNIT_QUAD};
use super::MAX_DRAWS_PER_FRAME;

// GPU layout, must match color.wgsl
#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct ColorUniforms {
    model_to_projection: [[f32; 4]; 4], // offset 0
    color: [f32; 4],                    // offset 64
}

/// Draws unit quads in a single color
pub struct ColorShader {
    pipeline: wgpu::RenderPipeline,
    uniforms: UniformRing<ColorUniforms>,
    quad: QuadMesh,
}

impl ColorShader {
    pub fn new(device: &wgpu::Device, format: wgpu::TextureFormat) -> Self {
        let uniforms = UniformRing::new(
            device,
            "color_uniforms",
            wgpu::ShaderStages::VERTEX_FRAGMENT,
            MAX_DRAWS_PER_FRAME,
        );
        let pipeline = build_pipeline(
            device,
            PipelineDesc {
                label: "color_shader",
                source: include_str!("shaders/color.wgsl"),
                bind_group_layouts: &[uniforms.layout()],
                vertex_layout: QuadVertex::position_desc(),
                format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
            },
        );
        Self {
            pipeline,
            uniforms,
            quad: QuadMesh::new(device, "color_quad", &UNIT_QUAD),
        }
    }

    pub fn begin_frame(&mut self) {
        self.uniforms.begin_frame();
    }

    /// Draw the unit quad transformed by `model_to_projection`
    pub fn render(
        &mut self,
        pass: &mut wgpu::RenderPass<'_>,
        queue: &wgpu::Queue,
        model_to_projection: Mat4,
        color: Vec4,
    ) {
        pass.set_pipeline(&self.pipeline);
        let uniforms = ColorUniforms {
            model_to_projection: model_to_projection.to_cols_array_2d(),
            color: color.to_array(),
        };
        if self.uniforms.push(pass, queue, 0, &uniforms) {
            self.quad.draw(pass);
        }
    }
}
