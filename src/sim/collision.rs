//! Collision response for axis-aligned bricks
//!
//! Overlap itself is `Brick::collides_with`; this module decides which
//! velocity component to flip once an overlap has been found.

use glam::Vec2;

use super::brick::Brick;

/// Which velocity component a bounce flips
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BounceAxis {
    /// Flip the x component (side hit)
    Horizontal,
    /// Flip the y component (top or bottom hit)
    Vertical,
}

/// Reflect a velocity about one axis.
///
/// The flipped component keeps its magnitude; the other one is untouched.
#[inline]
pub fn reflect(vel: Vec2, axis: BounceAxis) -> Vec2 {
    match axis {
        BounceAxis::Horizontal => Vec2::new(-vel.x, vel.y),
        BounceAxis::Vertical => Vec2::new(vel.x, -vel.y),
    }
}

/// Pick the bounce axis for a ball hitting a block.
///
/// A block whose centre is more than `threshold` above or below the ball's
/// centre was hit on its top or bottom face; anything closer counts as a side
/// hit. Exactly `threshold` is a side hit.
pub fn block_bounce_axis(ball: &Brick, block: &Brick, threshold: f32) -> BounceAxis {
    let dy = block.pos.y - ball.pos.y;
    if dy.abs() > threshold {
        BounceAxis::Vertical
    } else {
        BounceAxis::Horizontal
    }
}
