use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use super::gpu::{Gpu, GpuInit, SurfaceErrorAction};
use super::input::{Key, Keyboard};
use super::{App, FrameCtx, Gfx, Viewport};

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    pub gpu: GpuInit,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "brickplay".to_string(),
            initial_size: LogicalSize::new(1024.0, 768.0),
            gpu: GpuInit::default(),
        }
    }
}

/// Open a window and drive `app` until it is closed or Escape is pressed.
pub fn run<A: App + 'static>(config: RuntimeConfig, app: A) -> Result<()> {
    let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
    let mut state = HostState::new(config, app);

    event_loop
        .run_app(&mut state)
        .context("winit event loop terminated with error")?;

    match state.failure.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

struct HostState<A: App> {
    config: RuntimeConfig,
    app: A,
    window: Option<Arc<Window>>,
    gpu: Option<Gpu>,
    keys: Keyboard,
    failure: Option<anyhow::Error>,
}

impl<A: App> HostState<A> {
    fn new(config: RuntimeConfig, app: A) -> Self {
        Self {
            config,
            app,
            window: None,
            gpu: None,
            keys: Keyboard::default(),
            failure: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        self.failure = Some(err);
        event_loop.exit();
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(format!("{} - {}", self.config.title, self.app.title()))
            .with_inner_size(self.config.initial_size);
        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .context("failed to create window")?,
        );

        let gpu = pollster::block_on(Gpu::new(window.clone(), self.config.gpu.clone()))
            .context("GPU initialization failed")?;

        self.app
            .app_init(Gfx {
                device: gpu.device(),
                queue: gpu.queue(),
                format: gpu.surface_format(),
            })
            .with_context(|| format!("{} failed to initialize", self.app.title()))?;
        log::info!("{} initialized", self.app.title());

        window.request_redraw();
        self.window = Some(window);
        self.gpu = Some(gpu);
        Ok(())
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(gpu) = self.gpu.as_mut() else {
            return;
        };
        let size = gpu.size();
        if size.width == 0 || size.height == 0 {
            return;
        }

        let mut frame = match gpu.begin_frame() {
            Ok(frame) => frame,
            Err(err) => {
                let description = err.to_string();
                match gpu.handle_surface_error(err) {
                    SurfaceErrorAction::Fatal => {
                        self.fail(event_loop, anyhow!("surface error: {description}"));
                    }
                    action => log::warn!("surface error ({description}): {action:?}"),
                }
                return;
            }
        };

        {
            let mut ctx = FrameCtx {
                gfx: Gfx {
                    device: gpu.device(),
                    queue: gpu.queue(),
                    format: gpu.surface_format(),
                },
                encoder: &mut frame.encoder,
                view: &frame.view,
                keys: &self.keys,
            };
            let viewport = Viewport {
                x: 0,
                y: 0,
                w: size.width,
                h: size.height,
            };
            self.app.draw_world(&mut ctx, viewport);
        }

        gpu.submit(frame);
    }
}

impl<A: App> ApplicationHandler for HostState<A> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(err) = self.init(event_loop) {
            self.fail(event_loop, err);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        // One simulation step per frame: keep redrawing continuously
        event_loop.set_control_flow(ControlFlow::Poll);
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested");
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let Some(gpu) = self.gpu.as_mut() {
                    gpu.resize(new_size);
                }
            }
            WindowEvent::Focused(false) => self.keys.clear(),
            WindowEvent::KeyboardInput { event, .. } => {
                if let Some(key) = Key::from_physical(event.physical_key) {
                    self.keys.set(key, event.state);
                    if key == Key::Escape {
                        event_loop.exit();
                    }
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.app.app_exit();
        // Release GPU objects before the window
        self.gpu = None;
        self.window = None;
        log::info!("{} exited", self.app.title());
    }
}
