//! Axis-aligned rectangle entities
//!
//! Every game object in breakout is a `Brick`: court walls and the bat carry a
//! solid color, the ball and the blocks carry a texture.

use glam::{Mat4, Vec2, Vec3, Vec4};
use serde::{Deserialize, Serialize};

/// Handle into the renderer's texture cache
///
/// Handle 0 means "no texture": the brick still takes part in gameplay but is
/// never drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TextureId(pub u32);

impl TextureId {
    pub const NONE: TextureId = TextureId(0);

    pub fn is_none(self) -> bool {
        self.0 == 0
    }
}

/// What a brick looks like when drawn
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Skin {
    /// Solid RGBA color
    Color(Vec4),
    /// Textured sprite
    Texture(TextureId),
}

/// A rectangle with a centre position, fixed half-extents and an enabled flag
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Brick {
    /// Centre in world units
    pub pos: Vec2,
    half_width: f32,
    half_height: f32,
    enabled: bool,
    pub skin: Skin,
}

impl Brick {
    /// Create an enabled brick centred at `(x, y)` with full size `w` x `h`.
    ///
    /// Both sizes must be positive: overlap is strict, so a zero-size brick
    /// would not even overlap itself.
    pub fn init(skin: Skin, x: f32, y: f32, w: f32, h: f32) -> Self {
        debug_assert!(w > 0.0 && h > 0.0, "brick size must be positive, got {w}x{h}");
        Self {
            pos: Vec2::new(x, y),
            half_width: w * 0.5,
            half_height: h * 0.5,
            enabled: true,
            skin,
        }
    }

    #[inline]
    pub fn half_width(&self) -> f32 {
        self.half_width
    }

    #[inline]
    pub fn half_height(&self) -> f32 {
        self.half_height
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Move the brick by `(dx, dy)`
    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.pos += Vec2::new(dx, dy);
    }

    pub fn set_x(&mut self, x: f32) {
        self.pos.x = x;
    }

    /// Place this brick at `other`'s position plus an offset
    pub fn set_relative(&mut self, other: &Brick, dx: f32, dy: f32) {
        self.pos = other.pos + Vec2::new(dx, dy);
    }

    /// Overlap test against another brick.
    ///
    /// Disabled bricks never collide. Touching edges do not count as overlap.
    pub fn collides_with(&self, other: &Brick) -> bool {
        if !self.enabled || !other.enabled {
            return false;
        }
        let d = other.pos - self.pos;
        d.x.abs() < self.half_width + other.half_width
            && d.y.abs() < self.half_height + other.half_height
    }

    /// True when `other`'s centre lies horizontally within this brick, widened by `margin`
    pub fn is_above(&self, other: &Brick, margin: f32) -> bool {
        let dx = other.pos.x - self.pos.x;
        dx.abs() < self.half_width + margin
    }

    /// Whether a draw call should be issued for this brick
    pub fn is_drawable(&self) -> bool {
        match self.skin {
            Skin::Color(_) => self.enabled,
            Skin::Texture(id) => self.enabled && !id.is_none(),
        }
    }

    /// Model-to-world transform (translation only)
    pub fn model_to_world(&self) -> Mat4 {
        Mat4::from_translation(self.pos.extend(0.0))
    }

    /// Model-to-world transform for a unit quad with corners at ±1
    pub fn quad_transform(&self) -> Mat4 {
        self.model_to_world() * Mat4::from_scale(Vec3::new(self.half_width, self.half_height, 1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn white() -> Skin {
        Skin::Color(Vec4::ONE)
    }

    #[test]
    fn test_init_halves_extents() {
        let b = Brick::init(white(), 1.0, 2.0, 10.0, 0.1);
        assert_eq!(b.pos, Vec2::new(1.0, 2.0));
        assert!((b.half_width() - 5.0).abs() < 1e-6);
        assert!((b.half_height() - 0.05).abs() < 1e-6);
        assert!(b.is_enabled());
    }

    #[test]
    fn test_overlap_and_separation() {
        let a = Brick::init(white(), 0.0, 0.0, 1.0, 1.0);
        let b = Brick::init(white(), 0.9, 0.0, 1.0, 1.0);
        let c = Brick::init(white(), 1.0, 0.0, 1.0, 1.0);
        assert!(a.collides_with(&b));
        // Edges touching exactly is not an overlap
        assert!(!a.collides_with(&c));
    }

    #[test]
    fn test_set_relative_follows_other() {
        let bat = Brick::init(white(), -2.0, -3.7, 1.0, 0.2);
        let mut ball = Brick::init(Skin::Texture(TextureId(1)), 0.0, 0.0, 0.25, 0.25);
        ball.set_relative(&bat, 0.0, 0.3);
        assert!((ball.pos.x + 2.0).abs() < 1e-6);
        assert!((ball.pos.y + 3.4).abs() < 1e-5);
    }

    #[test]
    fn test_untextured_sprite_is_not_drawn() {
        let mut sprite = Brick::init(Skin::Texture(TextureId::NONE), 0.0, 0.0, 1.0, 1.0);
        assert!(!sprite.is_drawable());
        sprite.skin = Skin::Texture(TextureId(3));
        assert!(sprite.is_drawable());
        sprite.set_enabled(false);
        assert!(!sprite.is_drawable());
    }

    #[test]
    fn test_is_above() {
        let bat = Brick::init(white(), 0.0, -3.7, 1.0, 0.2);
        let ball = Brick::init(white(), 0.6, 0.0, 0.25, 0.25);
        assert!(!bat.is_above(&ball, 0.0));
        assert!(bat.is_above(&ball, 0.2));
    }

    #[test]
    fn test_quad_transform_maps_corner() {
        let b = Brick::init(white(), 1.0, -1.0, 2.0, 0.5);
        let corner = b.quad_transform().transform_point3(Vec3::new(1.0, 1.0, 0.0));
        assert!((corner.x - 2.0).abs() < 1e-6);
        assert!((corner.y + 0.75).abs() < 1e-6);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "brick size must be positive")]
    fn test_zero_size_brick_is_rejected() {
        Brick::init(white(), 0.0, 0.0, 0.0, 0.0);
    }

    #[test]
    fn test_smallest_brick_overlaps_itself() {
        let tiny = Brick::init(white(), 3.0, -2.0, f32::MIN_POSITIVE, f32::MIN_POSITIVE);
        assert!(tiny.collides_with(&tiny));
    }

    fn arb_brick() -> impl Strategy<Value = Brick> {
        let size = f32::MIN_POSITIVE..4.0f32;
        (-5.0f32..5.0, -5.0f32..5.0, size.clone(), size)
            .prop_map(|(x, y, w, h)| Brick::init(Skin::Color(Vec4::ONE), x, y, w, h))
    }

    proptest! {
        #[test]
        fn prop_collision_is_symmetric(a in arb_brick(), b in arb_brick()) {
            prop_assert_eq!(a.collides_with(&b), b.collides_with(&a));
        }

        #[test]
        fn prop_enabled_brick_collides_with_itself(a in arb_brick()) {
            prop_assert!(a.collides_with(&a));
        }

        #[test]
        fn prop_disabled_never_collides(a in arb_brick(), b in arb_brick(), which in any::<bool>()) {
            let (mut a, mut b) = (a, b);
            // Force them onto the same spot so only the flag decides
            b.pos = a.pos;
            if which { a.set_enabled(false) } else { b.set_enabled(false) }
            prop_assert!(!a.collides_with(&b));
            prop_assert!(!b.collides_with(&a));
        }
    }
}
