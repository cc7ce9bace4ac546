//! Deterministic breakout simulation
//!
//! All gameplay logic lives here. This module must stay pure:
//! - One tick per frame, velocities in units per frame
//! - Seeded RNG only
//! - Stable iteration order (block grid index)
//! - No rendering or platform dependencies

pub mod brick;
pub mod collision;
pub mod state;
pub mod tick;

pub use brick::{Brick, Skin, TextureId};
pub use collision::{BounceAxis, block_bounce_axis, reflect};
pub use state::{BlockGrid, GameEvent, GamePhase, GameState, Sprites, wall};
pub use tick::{TickInput, tick};
