//! Game state and core simulation types
//!
//! Every entity is created once in `GameState::new`; nothing is added or
//! removed afterwards. Broken blocks are disabled in place.

use glam::{Vec2, Vec4};
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::brick::{Brick, Skin, TextureId};
use crate::audio::SoundEffect;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ball glued to the bat, waiting for the serve key
    Serving,
    /// Ball in flight
    Playing,
    /// Declared but never entered: clearing the grid and losing the ball both
    /// return to `Serving`.
    GameOver,
}

/// Things that happened during a tick, drained by the app
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Sound(SoundEffect),
    /// Ball launched; `direction` is the sign of the horizontal velocity
    Served { direction: f32 },
    /// Block at this grid index was hit and disabled
    BlockBroken { index: usize },
    /// Ball went past the bat into the bottom wall
    BallLost,
    /// Score reached the number of blocks
    GameComplete,
}

/// Index of each wall in `GameState::court`
pub mod wall {
    pub const BOTTOM: usize = 0;
    pub const TOP: usize = 1;
    pub const LEFT: usize = 2;
    pub const RIGHT: usize = 3;
}

/// Fixed grid of blocks addressed by `(row, column)` or flat index
#[derive(Debug, Clone)]
pub struct BlockGrid {
    rows: usize,
    columns: usize,
    blocks: Vec<Brick>,
}

impl BlockGrid {
    /// Lay out `rows` x `columns` blocks starting from the top-left centre
    pub fn new(texture: TextureId, rows: usize, columns: usize) -> Self {
        let mut blocks = Vec::with_capacity(rows * columns);
        for row in 0..rows {
            for col in 0..columns {
                blocks.push(Brick::init(
                    Skin::Texture(texture),
                    BLOCK_ORIGIN_X + BLOCK_COLUMN_STEP_X * col as f32,
                    BLOCK_ORIGIN_Y - BLOCK_ROW_STEP_Y * row as f32,
                    BLOCK_WIDTH,
                    BLOCK_HEIGHT,
                ));
            }
        }
        Self {
            rows,
            columns,
            blocks,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Total number of slots, live or not
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&Brick> {
        if row >= self.rows || col >= self.columns {
            return None;
        }
        self.blocks.get(row * self.columns + col)
    }

    pub fn by_index(&self, index: usize) -> Option<&Brick> {
        self.blocks.get(index)
    }

    pub fn by_index_mut(&mut self, index: usize) -> Option<&mut Brick> {
        self.blocks.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Brick> {
        self.blocks.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Brick> {
        self.blocks.iter_mut()
    }

    /// Number of blocks still enabled
    pub fn live_count(&self) -> usize {
        self.blocks.iter().filter(|b| b.is_enabled()).count()
    }
}

/// Textures the breakout entities are drawn with
#[derive(Debug, Clone, Copy, Default)]
pub struct Sprites {
    pub ball: TextureId,
    pub block: TextureId,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    /// Blocks broken so far
    pub score: u32,
    /// Score at which the grid is cleared
    pub max_score: u32,
    /// Simulation tick counter
    pub frame: u64,
    /// Bottom, top, left, right (see `wall`)
    pub court: [Brick; 4],
    pub bat: Brick,
    pub blocks: BlockGrid,
    pub ball: Brick,
    /// World units per tick
    pub ball_vel: Vec2,
    /// Events produced since the last drain
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Build the court, bat, block grid and ball in their starting positions
    pub fn new(seed: u64, sprites: Sprites) -> Self {
        let white = Skin::Color(Vec4::ONE);
        let court = [
            Brick::init(white, 0.0, -COURT_HALF_HEIGHT, COURT_HALF_WIDTH * 2.0, FLOOR_THICKNESS),
            Brick::init(white, 0.0, COURT_HALF_HEIGHT, COURT_HALF_WIDTH * 2.0, FLOOR_THICKNESS),
            Brick::init(white, -COURT_HALF_WIDTH, 0.0, SIDE_THICKNESS, COURT_HALF_HEIGHT * 2.0),
            Brick::init(white, COURT_HALF_WIDTH, 0.0, SIDE_THICKNESS, COURT_HALF_HEIGHT * 2.0),
        ];
        let bat = Brick::init(
            Skin::Color(Vec4::new(0.0, 0.0, 1.0, 1.0)),
            0.0,
            BAT_Y,
            BAT_WIDTH,
            BAT_HEIGHT,
        );
        let ball = Brick::init(Skin::Texture(sprites.ball), 0.0, 0.0, BALL_SIZE, BALL_SIZE);
        let blocks = BlockGrid::new(sprites.block, BLOCK_ROWS, BLOCK_COLUMNS);

        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Serving,
            score: 0,
            max_score: (BLOCK_ROWS * BLOCK_COLUMNS) as u32,
            frame: 0,
            court,
            bat,
            blocks,
            ball,
            ball_vel: Vec2::ZERO,
            events: Vec::new(),
        }
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }
}
