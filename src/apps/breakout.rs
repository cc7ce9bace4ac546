//! Breakout: bat, ball, court walls and a grid of blocks

use anyhow::Result;

use crate::audio::AudioManager;
use crate::host::{App, FrameCtx, Gfx, Key, Viewport};
use crate::renderer::{Camera, ColorShader, TextureCache, TextureShader, begin_clear_pass};
use crate::sim::{Brick, GameEvent, GameState, Skin, Sprites, TickInput, tick};

/// Camera distance from the court
const CAMERA_Z: f32 = 5.0;

/// GPU resources and game state, created in `app_init`
struct Scene {
    state: GameState,
    color_shader: ColorShader,
    texture_shader: TextureShader,
    textures: TextureCache,
}

pub struct BreakoutApp {
    seed: u64,
    audio: AudioManager,
    camera: Camera,
    scene: Option<Scene>,
}

impl BreakoutApp {
    pub fn new(seed: u64, audio: AudioManager) -> Self {
        Self {
            seed,
            audio,
            camera: Camera::at_distance(CAMERA_Z, 1.0),
            scene: None,
        }
    }

    /// Current game state, once initialized
    pub fn state(&self) -> Option<&GameState> {
        self.scene.as_ref().map(|s| &s.state)
    }
}

/// Poll the keys breakout uses
pub fn read_input(frame: &FrameCtx<'_>) -> TickInput {
    TickInput {
        left: frame.is_key_down(Key::A) || frame.is_key_down(Key::Left),
        right: frame.is_key_down(Key::D) || frame.is_key_down(Key::Right),
        serve: frame.is_key_down(Key::Space),
        test_sound: frame.is_key_down(Key::M),
    }
}

/// Route tick events to audio and the log
fn dispatch_events(audio: &mut AudioManager, events: Vec<GameEvent>) {
    for event in events {
        match event {
            GameEvent::Sound(effect) => audio.play(effect),
            GameEvent::Served { direction } => log::debug!("serve, direction {direction}"),
            GameEvent::BlockBroken { index } => log::debug!("block {index} broken"),
            GameEvent::BallLost => log::info!("Ball lost"),
            GameEvent::GameComplete => log::info!("Game complete, all blocks cleared"),
        }
    }
}

impl Scene {
    fn render_brick(
        &mut self,
        pass: &mut wgpu::RenderPass<'_>,
        queue: &wgpu::Queue,
        camera: &Camera,
        brick: &Brick,
    ) {
        if !brick.is_drawable() {
            return;
        }
        let model_to_projection = camera.project(brick.quad_transform());
        match brick.skin {
            Skin::Color(color) => {
                self.color_shader.render(pass, queue, model_to_projection, color);
            }
            Skin::Texture(id) => {
                let Some(texture) = self.textures.bind_group(id) else {
                    log::warn!("no texture for handle {}", id.0);
                    return;
                };
                self.texture_shader
                    .render(pass, queue, model_to_projection, texture);
            }
        }
    }
}

impl App for BreakoutApp {
    fn title(&self) -> &str {
        "breakout"
    }

    fn app_init(&mut self, gfx: Gfx<'_>) -> Result<()> {
        let mut textures = TextureCache::new(gfx.device);
        let sprites = Sprites {
            ball: textures.get_texture_handle(gfx.device, gfx.queue, "ball")?,
            block: textures.get_texture_handle(gfx.device, gfx.queue, "brick")?,
        };
        let texture_shader = TextureShader::new(gfx.device, gfx.format, textures.layout());

        self.scene = Some(Scene {
            state: GameState::new(self.seed, sprites),
            color_shader: ColorShader::new(gfx.device, gfx.format),
            texture_shader,
            textures,
        });
        log::info!("Breakout ready (seed {})", self.seed);
        Ok(())
    }

    fn draw_world(&mut self, frame: &mut FrameCtx<'_>, viewport: Viewport) {
        let input = read_input(frame);
        let Some(scene) = self.scene.as_mut() else {
            return;
        };

        tick(&mut scene.state, &input);
        dispatch_events(&mut self.audio, scene.state.drain_events());

        let camera = self.camera.with_aspect(viewport.aspect());
        let queue = frame.gfx.queue;
        scene.color_shader.begin_frame();
        scene.texture_shader.begin_frame();

        let mut pass = begin_clear_pass(frame.encoder, frame.view, wgpu::Color::BLACK);
        viewport.apply(&mut pass);

        // Back to front: later draws land on top
        let court = scene.state.court;
        for wall in &court {
            scene.render_brick(&mut pass, queue, &camera, wall);
        }
        let bat = scene.state.bat;
        scene.render_brick(&mut pass, queue, &camera, &bat);

        for index in 0..scene.state.blocks.len() {
            if let Some(block) = scene.state.blocks.by_index(index).copied() {
                scene.render_brick(&mut pass, queue, &camera, &block);
            }
        }
        let ball = scene.state.ball;
        scene.render_brick(&mut pass, queue, &camera, &ball);
    }

    fn app_exit(&mut self) {
        if let Some(scene) = &self.scene {
            log::info!(
                "Breakout finished: score {}/{} after {} frames",
                scene.state.score,
                scene.state.max_score,
                scene.state.frame
            );
        }
        self.scene = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{SoundEffect, SourceId};

    #[test]
    fn test_sound_events_use_pool_sources() {
        let mut audio = AudioManager::default();
        dispatch_events(
            &mut audio,
            vec![
                GameEvent::Sound(SoundEffect::Bounce),
                GameEvent::BallLost,
                GameEvent::Sound(SoundEffect::Fail),
            ],
        );
        // Two sounds played, so the third source is next
        assert_eq!(audio.next_source(), SourceId(2));
    }

    #[test]
    fn test_lifecycle_events_are_logged_not_played() {
        let mut audio = AudioManager::default();
        dispatch_events(
            &mut audio,
            vec![
                GameEvent::Served { direction: -1.0 },
                GameEvent::BlockBroken { index: 3 },
                GameEvent::GameComplete,
            ],
        );
        assert_eq!(audio.next_source(), SourceId(0));
    }

    #[test]
    fn test_muted_audio_consumes_no_sources() {
        let mut audio = AudioManager::default();
        audio.set_muted(true);
        dispatch_events(&mut audio, vec![GameEvent::Sound(SoundEffect::BlockBreak)]);
        assert_eq!(audio.next_source(), SourceId(0));
    }

    #[test]
    fn test_state_unavailable_before_init() {
        let app = BreakoutApp::new(7, AudioManager::default());
        assert!(app.state().is_none());
        assert_eq!(app.title(), "breakout");
    }
}
