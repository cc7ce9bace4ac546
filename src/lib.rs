//! Brickplay - a Breakout clone and a shader playground
//!
//! Core modules:
//! - `sim`: Deterministic breakout simulation (entities, collisions, game state)
//! - `play`: Shaderplay animation state
//! - `renderer`: wgpu shader wrappers and procedural textures
//! - `host`: Window, GPU device, input polling and the app lifecycle
//! - `apps`: The two demo apps wired onto the host

pub mod apps;
pub mod audio;
pub mod host;
pub mod play;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{Settings, SettingsError, SettingsOrigin};

/// Game configuration constants
pub mod consts {
    /// Bat movement per frame while a direction key is held
    pub const BAT_STEP: f32 = 0.1;
    /// Bat centre is clamped to `[-BAT_LIMIT, BAT_LIMIT]`
    pub const BAT_LIMIT: f32 = 4.3;
    pub const BAT_Y: f32 = -3.7;
    pub const BAT_WIDTH: f32 = 1.0;
    pub const BAT_HEIGHT: f32 = 0.2;

    /// Ball sits this far above the bat while serving
    pub const SERVE_OFFSET: f32 = 0.3;
    pub const BALL_SIZE: f32 = 0.25;
    /// Per-axis ball speed at serve (world units per frame)
    pub const BALL_SPEED: f32 = 0.1;

    /// Court walls: bottom/top span the width, left/right span the height
    pub const COURT_HALF_WIDTH: f32 = 5.0;
    pub const COURT_HALF_HEIGHT: f32 = 4.0;
    /// Thickness of the bottom and top walls
    pub const FLOOR_THICKNESS: f32 = 0.1;
    /// Thickness of the left and right walls
    pub const SIDE_THICKNESS: f32 = 0.2;

    /// Block grid: columns run left to right, rows run top to bottom
    pub const BLOCK_COLUMNS: usize = 6;
    pub const BLOCK_ROWS: usize = 3;
    /// Centre of the top-left block; the grid is mirrored about x = 0
    pub const BLOCK_ORIGIN_X: f32 = -4.0;
    pub const BLOCK_ORIGIN_Y: f32 = 3.2;
    pub const BLOCK_COLUMN_STEP_X: f32 =
        (-BLOCK_ORIGIN_X * 2.0) / (BLOCK_COLUMNS as f32 - 1.0);
    pub const BLOCK_ROW_STEP_Y: f32 = 0.7;
    pub const BLOCK_WIDTH: f32 = 1.0;
    pub const BLOCK_HEIGHT: f32 = 0.5;

    /// Vertical centre offset above which a block hit reflects vertically
    pub const BLOCK_BOUNCE_THRESHOLD: f32 = 0.2;

    /// Number of sound sources handed out round-robin
    pub const NUM_SOUND_SOURCES: usize = 8;
}
