//! Frame host: window, GPU device, keyboard polling and the app lifecycle
//!
//! An `App` is initialized once the GPU exists (`app_init`), asked to draw
//! one frame per redraw (`draw_world`) and told when the loop ends
//! (`app_exit`). Everything it creates in `app_init` is dropped with it.

pub mod gpu;
pub mod input;
pub mod logging;
pub mod runtime;

pub use gpu::{Gpu, GpuInit};
pub use input::{Key, Keyboard};
pub use logging::init_logging;
pub use runtime::{RuntimeConfig, run};

/// Device handles available to an app
#[derive(Clone, Copy)]
pub struct Gfx<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    /// Color format of the window surface
    pub format: wgpu::TextureFormat,
}

/// Everything an app needs to draw one frame
pub struct FrameCtx<'a> {
    pub gfx: Gfx<'a>,
    pub encoder: &'a mut wgpu::CommandEncoder,
    pub view: &'a wgpu::TextureView,
    pub keys: &'a Keyboard,
}

impl FrameCtx<'_> {
    pub fn is_key_down(&self, key: Key) -> bool {
        self.keys.is_key_down(key)
    }
}

/// Viewport rectangle in physical pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl Viewport {
    pub fn aspect(&self) -> f32 {
        self.w.max(1) as f32 / self.h.max(1) as f32
    }

    /// Apply to a render pass (depth range 0..1)
    pub fn apply(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_viewport(
            self.x as f32,
            self.y as f32,
            self.w as f32,
            self.h as f32,
            0.0,
            1.0,
        );
    }
}

/// A demo application driven by the host
pub trait App {
    fn title(&self) -> &str;

    /// Create GPU resources; called once, after the window and device exist
    fn app_init(&mut self, gfx: Gfx<'_>) -> anyhow::Result<()>;

    /// Simulate and render one frame into `viewport`
    fn draw_world(&mut self, frame: &mut FrameCtx<'_>, viewport: Viewport);

    /// Called once when the event loop is shutting down
    fn app_exit(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_aspect() {
        let vp = Viewport {
            x: 0,
            y: 0,
            w: 1024,
            h: 768,
        };
        assert!((vp.aspect() - 4.0 / 3.0).abs() < 1e-6);

        let degenerate = Viewport { h: 0, ..vp };
        assert_eq!(degenerate.aspect(), 1024.0);
    }
}
