//! Playground shader: vertex colors cut to a disc, with an animated shade

use bytemuck::{Pod, Zeroable};
use glam::Mat4;

use super::pipeline::{PipelineDesc, UniformRing, build_pipeline};
use super::vertex::{PlayVertex, QuadMesh, play_quad};

/// The playground draws one quad per frame
const PLAY_DRAWS_PER_FRAME: u32 = 4;

// GPU layout, must match play.wgsl
#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct PlayUniforms {
    model_to_projection: [[f32; 4]; 4], // offset 0
    resolution: [i32; 2],               // offset 64
    sin_multiplier: f32,                // offset 72
    _pad: f32,                          // offset 76, struct is 80 bytes
}

pub struct PlayShader {
    pipeline: wgpu::RenderPipeline,
    uniforms: UniformRing<PlayUniforms>,
    quad: QuadMesh,
}

impl PlayShader {
    pub fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        texture_layout: &wgpu::BindGroupLayout,
    ) -> Self {
        let uniforms = UniformRing::new(
            device,
            "play_uniforms",
            wgpu::ShaderStages::VERTEX_FRAGMENT,
            PLAY_DRAWS_PER_FRAME,
        );
        let pipeline = build_pipeline(
            device,
            PipelineDesc {
                label: "play_shader",
                source: include_str!("shaders/play.wgsl"),
                bind_group_layouts: &[uniforms.layout(), texture_layout],
                vertex_layout: PlayVertex::desc(),
                format,
                blend: None,
            },
        );
        Self {
            pipeline,
            uniforms,
            quad: QuadMesh::new(device, "play_quad", &play_quad(1.0)),
        }
    }

    pub fn begin_frame(&mut self) {
        self.uniforms.begin_frame();
    }

    /// Draw the playground quad.
    ///
    /// `res_x`/`res_y` are the viewport size in pixels; the disc mask is
    /// computed against them.
    #[allow(clippy::too_many_arguments)]
    pub fn render(
        &mut self,
        pass: &mut wgpu::RenderPass<'_>,
        queue: &wgpu::Queue,
        model_to_projection: Mat4,
        texture: &wgpu::BindGroup,
        res_x: i32,
        res_y: i32,
        sin_multiplier: f32,
    ) {
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(1, texture, &[]);
        let uniforms = PlayUniforms {
            model_to_projection: model_to_projection.to_cols_array_2d(),
            resolution: [res_x, res_y],
            sin_multiplier,
            _pad: 0.0,
        };
        if self.uniforms.push(pass, queue, 0, &uniforms) {
            self.quad.draw(pass);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_layout_matches_wgsl() {
        assert_eq!(std::mem::size_of::<PlayUniforms>(), 80);
        assert_eq!(std::mem::offset_of!(PlayUniforms, resolution), 64);
        assert_eq!(std::mem::offset_of!(PlayUniforms, sin_multiplier), 72);
    }
}
