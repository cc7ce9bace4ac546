//! Per-frame breakout update
//!
//! One call to `tick` is one frame: velocities are in world units per frame,
//! so there is no timestep parameter.

use glam::Vec2;
use rand::Rng;

use super::collision::{BounceAxis, block_bounce_axis, reflect};
use super::state::{GameEvent, GamePhase, GameState, wall};
use crate::audio::SoundEffect;
use crate::consts::*;

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Move the bat left (A / left arrow)
    pub left: bool,
    /// Move the bat right (D / right arrow)
    pub right: bool,
    /// Launch the ball while serving (space)
    pub serve: bool,
    /// Play the bounce sound (M)
    pub test_sound: bool,
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.frame += 1;

    if input.test_sound {
        state.emit(GameEvent::Sound(SoundEffect::Bounce));
    }

    move_bat(state, input);

    match state.phase {
        GamePhase::Serving => serve(state, input),
        GamePhase::Playing => play(state),
        GamePhase::GameOver => {}
    }
}

/// Move the bat from input, then clamp it inside the court
fn move_bat(state: &mut GameState, input: &TickInput) {
    if input.left {
        state.bat.translate(-BAT_STEP, 0.0);
    } else if input.right {
        state.bat.translate(BAT_STEP, 0.0);
    }
    clamp_bat(state);
}

pub(crate) fn clamp_bat(state: &mut GameState) {
    let x = state.bat.pos.x.clamp(-BAT_LIMIT, BAT_LIMIT);
    state.bat.set_x(x);
}

fn serve(state: &mut GameState, input: &TickInput) {
    let bat = state.bat;
    state.ball.set_relative(&bat, 0.0, SERVE_OFFSET);

    if input.serve {
        state.phase = GamePhase::Playing;
        let direction = if state.rng.random_bool(0.5) { 1.0 } else { -1.0 };
        state.ball_vel = Vec2::new(BALL_SPEED * direction, BALL_SPEED);
        state.emit(GameEvent::Served { direction });
    }
}

fn play(state: &mut GameState) {
    let vel = state.ball_vel;
    state.ball.translate(vel.x, vel.y);

    // Only a falling ball can be returned by the bat
    if state.ball_vel.y < 0.0 && state.ball.collides_with(&state.bat) {
        state.ball_vel = reflect(state.ball_vel, BounceAxis::Vertical);
    }

    if state.ball_vel.y > 0.0 && state.ball.collides_with(&state.court[wall::TOP]) {
        state.ball_vel = reflect(state.ball_vel, BounceAxis::Vertical);
        state.emit(GameEvent::Sound(SoundEffect::Bounce));
    } else if state.ball_vel.y < 0.0 && state.ball.collides_with(&state.court[wall::BOTTOM]) {
        state.phase = GamePhase::Serving;
        state.emit(GameEvent::Sound(SoundEffect::Fail));
        state.emit(GameEvent::BallLost);
    }

    break_blocks(state);

    if state.ball.collides_with(&state.court[wall::LEFT])
        || state.ball.collides_with(&state.court[wall::RIGHT])
    {
        state.ball_vel = reflect(state.ball_vel, BounceAxis::Horizontal);
        state.emit(GameEvent::Sound(SoundEffect::Bounce));
    }
}

/// Bounce off and disable every live block the ball overlaps, in index order
pub(crate) fn break_blocks(state: &mut GameState) {
    for index in 0..state.blocks.len() {
        let Some(block) = state.blocks.by_index(index).copied() else {
            continue;
        };
        if !state.ball.collides_with(&block) {
            continue;
        }

        let axis = block_bounce_axis(&state.ball, &block, BLOCK_BOUNCE_THRESHOLD);
        state.ball_vel = reflect(state.ball_vel, axis);

        if let Some(block) = state.blocks.by_index_mut(index) {
            block.set_enabled(false);
        }
        state.score += 1;
        state.emit(GameEvent::Sound(SoundEffect::BlockBreak));
        state.emit(GameEvent::BlockBroken { index });

        if state.score == state.max_score {
            // Clearing the grid returns to serving, not game over
            state.phase = GamePhase::Serving;
            state.emit(GameEvent::GameComplete);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::brick::TextureId;
    use crate::sim::state::Sprites;

    fn new_state(seed: u64) -> GameState {
        GameState::new(
            seed,
            Sprites {
                ball: TextureId(1),
                block: TextureId(2),
            },
        )
    }

    fn disable_all_blocks(state: &mut GameState) {
        for b in state.blocks.iter_mut() {
            b.set_enabled(false);
        }
    }

    #[test]
    fn test_serving_glues_ball_to_bat() {
        let mut state = new_state(1);
        let input = TickInput {
            right: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.phase, GamePhase::Serving);
        assert!((state.ball.pos.x - state.bat.pos.x).abs() < 1e-6);
        assert!((state.ball.pos.y - (state.bat.pos.y + SERVE_OFFSET)).abs() < 1e-6);
    }

    #[test]
    fn test_serve_to_playing() {
        let mut state = new_state(12345);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::Serving);

        let input = TickInput {
            serve: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!((state.ball_vel.x.abs() - BALL_SPEED).abs() < 1e-6);
        assert!((state.ball_vel.y - BALL_SPEED).abs() < 1e-6);
        let serves = state
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::Served { .. }))
            .count();
        assert_eq!(serves, 1);
    }

    #[test]
    fn test_serve_direction_varies_with_seed() {
        let serve = TickInput {
            serve: true,
            ..Default::default()
        };
        let mut directions = std::collections::HashSet::new();
        for seed in 0..32 {
            let mut state = new_state(seed);
            tick(&mut state, &serve);
            directions.insert(state.ball_vel.x > 0.0);
        }
        assert_eq!(directions.len(), 2);
    }

    #[test]
    fn test_bat_clamps_right() {
        let mut state = new_state(1);
        state.bat.set_x(4.4);
        let input = TickInput {
            right: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert!((state.bat.pos.x - BAT_LIMIT).abs() < 1e-6);
    }

    #[test]
    fn test_bat_clamps_left() {
        let mut state = new_state(1);
        state.bat.set_x(-4.3);
        let input = TickInput {
            left: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert!((state.bat.pos.x + BAT_LIMIT).abs() < 1e-6);
    }

    #[test]
    fn test_left_wins_over_right() {
        let mut state = new_state(1);
        let input = TickInput {
            left: true,
            right: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert!((state.bat.pos.x + BAT_STEP).abs() < 1e-6);
    }

    #[test]
    fn test_bat_returns_falling_ball() {
        let mut state = new_state(1);
        disable_all_blocks(&mut state);
        state.phase = GamePhase::Playing;
        state.ball.pos = Vec2::new(0.0, BAT_Y + 0.2);
        state.ball_vel = Vec2::new(0.1, -0.1);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.ball_vel, Vec2::new(0.1, 0.1));
    }

    #[test]
    fn test_rising_ball_passes_bat() {
        let mut state = new_state(1);
        disable_all_blocks(&mut state);
        state.phase = GamePhase::Playing;
        state.ball.pos = Vec2::new(0.0, BAT_Y);
        state.ball_vel = Vec2::new(0.1, 0.1);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.ball_vel, Vec2::new(0.1, 0.1));
    }

    #[test]
    fn test_top_wall_reflects() {
        let mut state = new_state(1);
        disable_all_blocks(&mut state);
        state.phase = GamePhase::Playing;
        state.ball.pos = Vec2::new(0.0, COURT_HALF_HEIGHT - 0.15);
        state.ball_vel = Vec2::new(-0.1, 0.1);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.ball_vel, Vec2::new(-0.1, -0.1));
        assert!(
            state
                .events
                .contains(&GameEvent::Sound(SoundEffect::Bounce))
        );
    }

    #[test]
    fn test_side_wall_reflects() {
        let mut state = new_state(1);
        disable_all_blocks(&mut state);
        state.phase = GamePhase::Playing;
        state.ball.pos = Vec2::new(COURT_HALF_WIDTH - 0.25, 0.0);
        state.ball_vel = Vec2::new(0.1, -0.1);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.ball_vel, Vec2::new(-0.1, -0.1));
    }

    #[test]
    fn test_left_wall_reflects() {
        let mut state = new_state(1);
        disable_all_blocks(&mut state);
        state.phase = GamePhase::Playing;
        state.ball.pos = Vec2::new(-COURT_HALF_WIDTH + 0.25, 0.0);
        state.ball_vel = Vec2::new(-0.1, -0.1);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.ball_vel, Vec2::new(0.1, -0.1));
        assert!(
            state
                .drain_events()
                .contains(&GameEvent::Sound(SoundEffect::Bounce))
        );
    }

    #[test]
    fn test_bottom_wall_loses_ball() {
        let mut state = new_state(1);
        disable_all_blocks(&mut state);
        state.phase = GamePhase::Playing;
        state.bat.set_x(-3.0);
        state.ball.pos = Vec2::new(2.0, -COURT_HALF_HEIGHT + 0.15);
        state.ball_vel = Vec2::new(0.1, -0.1);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::Serving);
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::Sound(SoundEffect::Fail)));
        assert!(events.contains(&GameEvent::BallLost));

        // Next frame puts the ball back on the bat
        tick(&mut state, &TickInput::default());
        assert!((state.ball.pos.x - state.bat.pos.x).abs() < 1e-6);
    }

    #[test]
    fn test_block_directly_above_flips_vertical() {
        let mut state = new_state(1);
        state.phase = GamePhase::Playing;
        let block = *state.blocks.by_index(0).unwrap();
        state.ball.pos = block.pos - Vec2::new(0.0, 0.3);
        state.ball_vel = Vec2::new(0.1, 0.1);

        break_blocks(&mut state);

        assert_eq!(state.ball_vel, Vec2::new(0.1, -0.1));
        assert!(!state.blocks.by_index(0).unwrap().is_enabled());
        assert_eq!(state.score, 1);
        assert!(state.events.contains(&GameEvent::BlockBroken { index: 0 }));
    }

    #[test]
    fn test_block_side_hit_flips_horizontal() {
        let mut state = new_state(1);
        state.phase = GamePhase::Playing;
        let block = *state.blocks.by_index(0).unwrap();
        state.ball.pos = block.pos - Vec2::new(0.6, 0.1);
        state.ball_vel = Vec2::new(0.1, 0.1);

        break_blocks(&mut state);

        assert_eq!(state.ball_vel, Vec2::new(-0.1, 0.1));
        assert!(!state.blocks.by_index(0).unwrap().is_enabled());
    }

    #[test]
    fn test_disabled_block_is_ignored() {
        let mut state = new_state(1);
        state.phase = GamePhase::Playing;
        let block = *state.blocks.by_index(0).unwrap();
        state.blocks.by_index_mut(0).unwrap().set_enabled(false);
        state.ball.pos = block.pos;
        state.ball_vel = Vec2::new(0.1, 0.1);

        break_blocks(&mut state);

        assert_eq!(state.ball_vel, Vec2::new(0.1, 0.1));
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_last_block_returns_to_serving() {
        let mut state = new_state(1);
        state.phase = GamePhase::Playing;
        state.score = state.max_score - 1;
        let last = state.blocks.len() - 1;
        for (i, b) in state.blocks.iter_mut().enumerate() {
            b.set_enabled(i == last);
        }
        let block = *state.blocks.by_index(last).unwrap();
        state.ball.pos = block.pos - Vec2::new(0.0, 0.3);
        state.ball_vel = Vec2::new(0.1, 0.1);

        break_blocks(&mut state);

        assert_eq!(state.score, 18);
        assert_eq!(state.phase, GamePhase::Serving);
        let completions = state
            .events
            .iter()
            .filter(|e| **e == GameEvent::GameComplete)
            .count();
        assert_eq!(completions, 1);
        assert_eq!(state.blocks.live_count(), 0);
    }

    #[test]
    fn test_test_sound_plays_bounce() {
        let mut state = new_state(1);
        let input = TickInput {
            test_sound: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::Sound(SoundEffect::Bounce)]
        );
    }

    #[test]
    fn test_game_over_is_inert() {
        let mut state = new_state(1);
        state.phase = GamePhase::GameOver;
        let ball = state.ball.pos;
        tick(&mut state, &TickInput {
            serve: true,
            ..Default::default()
        });
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.ball.pos, ball);
    }

    #[test]
    fn test_determinism() {
        let mut state1 = new_state(99999);
        let mut state2 = new_state(99999);

        let inputs = [
            TickInput {
                right: true,
                ..Default::default()
            },
            TickInput {
                serve: true,
                ..Default::default()
            },
            TickInput {
                left: true,
                ..Default::default()
            },
            TickInput::default(),
        ];

        for _ in 0..50 {
            for input in &inputs {
                tick(&mut state1, input);
                tick(&mut state2, input);
            }
        }

        assert_eq!(state1.frame, state2.frame);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.ball.pos, state2.ball.pos);
        assert_eq!(state1.ball_vel, state2.ball_vel);
    }
}
