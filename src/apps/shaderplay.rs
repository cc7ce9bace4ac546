//! Shaderplay: one quad through the playground shader

use anyhow::Result;
use glam::Mat4;

use crate::host::{App, FrameCtx, Gfx, Viewport};
use crate::play::Pulse;
use crate::renderer::{Camera, PlayShader, TextureCache, begin_clear_pass};
use crate::sim::TextureId;

/// Camera distance; at 90° field of view the ±1 quad exactly fills the view
const CAMERA_Z: f32 = 1.0;

struct Scene {
    shader: PlayShader,
    textures: TextureCache,
    texture: TextureId,
}

pub struct ShaderplayApp {
    model_to_world: Mat4,
    camera: Camera,
    pulse: Pulse,
    scene: Option<Scene>,
}

impl Default for ShaderplayApp {
    fn default() -> Self {
        Self::new()
    }
}

impl ShaderplayApp {
    pub fn new() -> Self {
        Self {
            model_to_world: Mat4::IDENTITY,
            camera: Camera::at_distance(CAMERA_Z, 1.0),
            pulse: Pulse::new(),
            scene: None,
        }
    }
}

impl App for ShaderplayApp {
    fn title(&self) -> &str {
        "shaderplay"
    }

    fn app_init(&mut self, gfx: Gfx<'_>) -> Result<()> {
        let mut textures = TextureCache::new(gfx.device);
        let texture = textures.get_texture_handle(gfx.device, gfx.queue, "!bricks")?;
        let shader = PlayShader::new(gfx.device, gfx.format, textures.layout());
        self.scene = Some(Scene {
            shader,
            textures,
            texture,
        });
        Ok(())
    }

    fn draw_world(&mut self, frame: &mut FrameCtx<'_>, viewport: Viewport) {
        let sin_multiplier = self.pulse.advance();
        let Some(scene) = self.scene.as_mut() else {
            return;
        };
        let Some(texture) = scene.textures.bind_group(scene.texture) else {
            return;
        };

        // Square projection on purpose: the quad stretches to fill the window
        let model_to_projection = self.camera.project(self.model_to_world);

        scene.shader.begin_frame();
        let mut pass = begin_clear_pass(frame.encoder, frame.view, wgpu::Color::BLACK);
        viewport.apply(&mut pass);
        scene.shader.render(
            &mut pass,
            frame.gfx.queue,
            model_to_projection,
            texture,
            viewport.w as i32,
            viewport.h as i32,
            sin_multiplier,
        );
    }

    fn app_exit(&mut self) {
        self.scene = None;
    }
}
