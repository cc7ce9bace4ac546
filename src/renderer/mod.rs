//! wgpu rendering
//!
//! One wrapper per shader program. Each compiles its WGSL once at creation
//! and exposes a `render` call that uploads that draw's uniforms and issues it.

pub mod camera;
pub mod color_shader;
pub mod pipeline;
pub mod play_shader;
pub mod texture_shader;
pub mod textures;
pub mod vertex;

pub use camera::{Camera, build_projection_matrix};
pub use color_shader::ColorShader;
pub use pipeline::begin_clear_pass;
pub use play_shader::PlayShader;
pub use texture_shader::TextureShader;
pub use textures::{RenderError, TextureCache};

/// Uniform slots per wrapper per frame
pub const MAX_DRAWS_PER_FRAME: u32 = 64;
