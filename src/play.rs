//! Shaderplay animation state
//!
//! The playground shader takes a single animated parameter, the sine
//! multiplier, which ramps up in fixed steps and wraps back to zero.

use glam::{IVec2, Vec2};

/// Frames to wait between increments
pub const LOOP_DELAY: u32 = 1;
/// Multiplier increment per step
pub const INC_VALUE: f32 = 0.5;
/// Multiplier wraps to 0 once it exceeds this
pub const MAX_MULTIPLIER: f32 = 10.0;
/// Radius of the visible disc, in viewport-normalized coordinates
pub const DISC_RADIUS: f32 = 0.5;

/// Sawtooth ramp for the sine multiplier
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Pulse {
    multiplier: f32,
    loop_count: u32,
}

impl Pulse {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn multiplier(&self) -> f32 {
        self.multiplier
    }

    /// Advance one frame and return the multiplier to draw with
    pub fn advance(&mut self) -> f32 {
        if self.loop_count >= LOOP_DELAY {
            self.loop_count = 0;
            self.multiplier += INC_VALUE;
            if self.multiplier > MAX_MULTIPLIER {
                self.multiplier = 0.0;
            }
        } else {
            self.loop_count += 1;
        }
        self.multiplier
    }
}

/// CPU version of the fragment shader's disc mask.
///
/// `frag` is a pixel position in framebuffer coordinates. The test is done in
/// normalized coordinates, so on a non-square viewport the disc is an ellipse.
pub fn disc_contains(frag: Vec2, resolution: IVec2, radius: f32) -> bool {
    let res = resolution.as_vec2().max(Vec2::ONE);
    let p = frag / res;
    p.distance(Vec2::splat(0.5)) <= radius
}
