//! Procedural textures keyed by name
//!
//! No image files: every texture is generated on first request and cached,
//! so asking for the same name twice returns the same handle.

use std::collections::HashMap;

use thiserror::Error;
use wgpu::util::DeviceExt;

use crate::sim::TextureId;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("unknown texture '{0}'")]
    UnknownTexture(String),
}

/// RGBA8 pixels, rows top to bottom
#[derive(Debug, Clone, PartialEq)]
pub struct TextureImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl TextureImage {
    fn from_fn(width: u32, height: u32, f: impl Fn(u32, u32) -> [u8; 4]) -> Self {
        let mut rgba = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                rgba.extend_from_slice(&f(x, y));
            }
        }
        Self {
            width,
            height,
            rgba,
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = ((y * self.width + x) * 4) as usize;
        [self.rgba[i], self.rgba[i + 1], self.rgba[i + 2], self.rgba[i + 3]]
    }
}

/// Generate the image for a known texture name
pub fn generate(name: &str) -> Option<TextureImage> {
    match name {
        "ball" => Some(ball()),
        "brick" => Some(brick()),
        "!bricks" => Some(tiled_bricks()),
        _ => None,
    }
}

/// White disc with a soft edge on a transparent background
fn ball() -> TextureImage {
    const SIZE: u32 = 32;
    let r = SIZE as f32 * 0.5;
    TextureImage::from_fn(SIZE, SIZE, |x, y| {
        let dx = x as f32 + 0.5 - r;
        let dy = y as f32 + 0.5 - r;
        let d = (dx * dx + dy * dy).sqrt();
        let alpha = ((r - d) / 1.5).clamp(0.0, 1.0);
        [255, 255, 255, (alpha * 255.0) as u8]
    })
}

/// Single red brick with a light mortar border
fn brick() -> TextureImage {
    const W: u32 = 64;
    const H: u32 = 32;
    TextureImage::from_fn(W, H, |x, y| {
        if x < 2 || y < 2 || x >= W - 2 || y >= H - 2 {
            [200, 200, 190, 255]
        } else {
            [170, 40, 30, 255]
        }
    })
}

/// Running-bond brick wall; tiles seamlessly with repeat addressing
fn tiled_bricks() -> TextureImage {
    const SIZE: u32 = 64;
    const COURSE: u32 = 16;
    const BRICK: u32 = 32;
    TextureImage::from_fn(SIZE, SIZE, |x, y| {
        let course = y / COURSE;
        let shift = if course % 2 == 1 { BRICK / 2 } else { 0 };
        let bx = (x + shift) % BRICK;
        let by = y % COURSE;
        if bx < 2 || by < 2 {
            [90, 90, 90, 255]
        } else {
            [150, 60, 40, 255]
        }
    })
}

struct GpuTexture {
    bind_group: wgpu::BindGroup,
    _texture: wgpu::Texture,
}

/// Texture registry; handles start at 1, 0 means "no texture"
pub struct TextureCache {
    layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    textures: Vec<GpuTexture>,
    names: HashMap<String, TextureId>,
}

impl TextureCache {
    pub fn new(device: &wgpu::Device) -> Self {
        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("texture_bind_group_layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("repeat_sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        Self {
            layout,
            sampler,
            textures: Vec::new(),
            names: HashMap::new(),
        }
    }

    /// Layout of the group every texture is bound with
    pub fn layout(&self) -> &wgpu::BindGroupLayout {
        &self.layout
    }

    /// Handle for `name`, generating and uploading the texture on first use
    pub fn get_texture_handle(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        name: &str,
    ) -> Result<TextureId, RenderError> {
        if let Some(id) = self.names.get(name) {
            return Ok(*id);
        }
        let image = generate(name).ok_or_else(|| RenderError::UnknownTexture(name.to_string()))?;
        let id = self.upload(device, queue, name, &image);
        self.names.insert(name.to_string(), id);
        log::info!(
            "Created texture '{}' ({}x{}) as handle {}",
            name,
            image.width,
            image.height,
            id.0
        );
        Ok(id)
    }

    fn upload(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        name: &str,
        image: &TextureImage,
    ) -> TextureId {
        let texture = device.create_texture_with_data(
            queue,
            &wgpu::TextureDescriptor {
                label: Some(name),
                size: wgpu::Extent3d {
                    width: image.width,
                    height: image.height,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: wgpu::TextureFormat::Rgba8UnormSrgb,
                usage: wgpu::TextureUsages::TEXTURE_BINDING,
                view_formats: &[],
            },
            wgpu::util::TextureDataOrder::LayerMajor,
            &image.rgba,
        );
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(name),
            layout: &self.layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        });
        self.textures.push(GpuTexture {
            bind_group,
            _texture: texture,
        });
        TextureId(self.textures.len() as u32)
    }

    /// Bind group for a handle; `None` for handle 0 or an unknown handle
    pub fn bind_group(&self, id: TextureId) -> Option<&wgpu::BindGroup> {
        if id.is_none() {
            return None;
        }
        self.textures.get(id.0 as usize - 1).map(|t| &t.bind_group)
    }
}
