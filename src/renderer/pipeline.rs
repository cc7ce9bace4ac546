//! Pipeline construction shared by the shader wrappers

use std::marker::PhantomData;
use std::num::NonZeroU64;

use bytemuck::Pod;

/// Everything that differs between the wrappers' render pipelines
pub struct PipelineDesc<'a> {
    pub label: &'a str,
    pub source: &'a str,
    pub bind_group_layouts: &'a [&'a wgpu::BindGroupLayout],
    pub vertex_layout: wgpu::VertexBufferLayout<'a>,
    pub format: wgpu::TextureFormat,
    pub blend: Option<wgpu::BlendState>,
}

/// Compile a WGSL module and link it into a triangle-list pipeline
pub fn build_pipeline(device: &wgpu::Device, desc: PipelineDesc<'_>) -> wgpu::RenderPipeline {
    log::debug!("Compiling shader {}", desc.label);
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(desc.label),
        source: wgpu::ShaderSource::Wgsl(desc.source.into()),
    });

    let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some(desc.label),
        bind_group_layouts: desc.bind_group_layouts,
        immediate_size: 0,
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(desc.label),
        layout: Some(&pipeline_layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[desc.vertex_layout],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: desc.format,
                blend: desc.blend,
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    })
}

/// Begin a render pass that clears the target to `clear`
pub fn begin_clear_pass<'e>(
    encoder: &'e mut wgpu::CommandEncoder,
    view: &wgpu::TextureView,
    clear: wgpu::Color,
) -> wgpu::RenderPass<'e> {
    encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some("clear_pass"),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(clear),
                store: wgpu::StoreOp::Store,
            },
            depth_slice: None,
        })],
        depth_stencil_attachment: None,
        timestamp_writes: None,
        occlusion_query_set: None,
        multiview_mask: None,
    })
}

/// Per-draw uniform blocks packed into one buffer and bound with dynamic offsets.
///
/// `queue.write_buffer` lands before the frame's commands execute, so each
/// draw in a frame needs its own slot; `begin_frame` rewinds to slot 0.
pub struct UniformRing<T: Pod> {
    buffer: wgpu::Buffer,
    layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
    stride: u64,
    capacity: u32,
    next: u32,
    _marker: PhantomData<T>,
}

impl<T: Pod> UniformRing<T> {
    pub fn new(
        device: &wgpu::Device,
        label: &str,
        visibility: wgpu::ShaderStages,
        capacity: u32,
    ) -> Self {
        let size = std::mem::size_of::<T>() as u64;
        let align = device.limits().min_uniform_buffer_offset_alignment as u64;
        let stride = aligned_stride(size, align);

        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: stride * capacity as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some(label),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: true,
                    min_binding_size: NonZeroU64::new(size),
                },
                count: None,
            }],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout: &layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &buffer,
                    offset: 0,
                    size: NonZeroU64::new(size),
                }),
            }],
        });

        Self {
            buffer,
            layout,
            bind_group,
            stride,
            capacity,
            next: 0,
            _marker: PhantomData,
        }
    }

    pub fn layout(&self) -> &wgpu::BindGroupLayout {
        &self.layout
    }

    /// Rewind to the first slot
    pub fn begin_frame(&mut self) {
        self.next = 0;
    }

    /// Write `value` into the next slot and bind it at `group`.
    ///
    /// Returns false, and binds nothing, once every slot is used this frame.
    pub fn push(
        &mut self,
        pass: &mut wgpu::RenderPass<'_>,
        queue: &wgpu::Queue,
        group: u32,
        value: &T,
    ) -> bool {
        if self.next >= self.capacity {
            log::warn!("uniform ring full ({} draws), skipping draw", self.capacity);
            return false;
        }
        let offset = self.stride * self.next as u64;
        self.next += 1;
        queue.write_buffer(&self.buffer, offset, bytemuck::bytes_of(value));
        pass.set_bind_group(group, &self.bind_group, &[offset as u32]);
        true
    }
}

/// Round `size` up to a multiple of `align`
pub fn aligned_stride(size: u64, align: u64) -> u64 {
    let align = align.max(1);
    size.div_ceil(align) * align
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aligned_stride() {
        assert_eq!(aligned_stride(80, 256), 256);
        assert_eq!(aligned_stride(256, 256), 256);
        assert_eq!(aligned_stride(257, 256), 512);
        assert_eq!(aligned_stride(64, 0), 64);
    }
}
