//! Single texture shader with no lighting

use bytemuck::{Pod, Zeroable};
use glam::Mat4;

use super::pipeline::{PipelineDesc, UniformRing, build_pipeline};
use super::vertex::{QuadMesh, QuadVertex, UNIT_QUAD};
use super::MAX_DRAWS_PER_FRAME;

// GPU layout, must match texture.wgsl
#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct TextureUniforms {
    model_to_projection: [[f32; 4]; 4],
}

/// Draws unit quads sampling one texture with uvs 0..1
pub struct TextureShader {
    pipeline: wgpu::RenderPipeline,
    uniforms: UniformRing<TextureUniforms>,
    quad: QuadMesh,
}

impl TextureShader {
    /// `texture_layout` is the group-1 layout from `TextureCache::layout`
    pub fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        texture_layout: &wgpu::BindGroupLayout,
    ) -> Self {
        let uniforms = UniformRing::new(
            device,
            "texture_uniforms",
            wgpu::ShaderStages::VERTEX,
            MAX_DRAWS_PER_FRAME,
        );
        let pipeline = build_pipeline(
            device,
            PipelineDesc {
                label: "texture_shader",
                source: include_str!("shaders/texture.wgsl"),
                bind_group_layouts: &[uniforms.layout(), texture_layout],
                vertex_layout: QuadVertex::desc(),
                format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
            },
        );
        Self {
            pipeline,
            uniforms,
            quad: QuadMesh::new(device, "texture_quad", &UNIT_QUAD),
        }
    }

    pub fn begin_frame(&mut self) {
        self.uniforms.begin_frame();
    }

    /// Draw the unit quad with `texture` bound as the sampled image
    pub fn render(
        &mut self,
        pass: &mut wgpu::RenderPass<'_>,
        queue: &wgpu::Queue,
        model_to_projection: Mat4,
        texture: &wgpu::BindGroup,
    ) {
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(1, texture, &[]);
        let uniforms = TextureUniforms {
            model_to_projection: model_to_projection.to_cols_array_2d(),
        };
        if self.uniforms.push(pass, queue, 0, &uniforms) {
            self.quad.draw(pass);
        }
    }
}
