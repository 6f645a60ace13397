//! Per-frame simulation step
//!
//! Advances a running heist by one display frame: boosts, player movement,
//! guard patrols, then collision resolution.

use glam::Vec2;

use super::resolve::resolve_collisions;
use super::state::{GamePhase, GameState, Outcome};

/// Held movement directions for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

/// Advance the game state by one frame
///
/// Does nothing unless the run is active. Returns the outcome if this frame
/// ended the run.
pub fn tick(state: &mut GameState, input: &TickInput, now_ms: f64) -> Option<Outcome> {
    if state.phase != GamePhase::Running {
        return None;
    }

    state.expire_boosts(now_ms);

    move_player(state, input);

    let arena = state.arena;
    for guard in &mut state.guards {
        guard.patrol(arena);
    }

    state.elapsed_secs = state.elapsed_at(now_ms);

    let outcome = resolve_collisions(state, now_ms)?;
    log::info!("Run ended: {:?} (score {})", outcome, state.score);
    state.end_run(outcome);
    Some(outcome)
}

/// Move the player by its speed along each held axis, kept inside the arena
fn move_player(state: &mut GameState, input: &TickInput) {
    let arena = state.arena;
    let player = &mut state.player;
    let speed = player.speed;
    let max = arena - player.size;

    if input.up {
        player.pos.y -= speed;
    }
    if input.down {
        player.pos.y += speed;
    }
    if input.left {
        player.pos.x -= speed;
    }
    if input.right {
        player.pos.x += speed;
    }

    player.pos = player.pos.clamp(Vec2::ZERO, max.max(Vec2::ZERO));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SoundEffect;
    use crate::consts::*;
    use crate::settings::Difficulty;
    use crate::sim::state::GameEvent;

    fn new_state(difficulty: Difficulty) -> GameState {
        GameState::new(difficulty, Vec2::new(CANVAS_WIDTH, CANVAS_HEIGHT))
    }

    #[test]
    fn test_tick_ignored_while_idle() {
        let mut state = new_state(Difficulty::Medium);
        let before = state.clone();
        let input = TickInput {
            right: true,
            ..Default::default()
        };

        assert_eq!(tick(&mut state, &input, 1000.0), None);
        assert_eq!(state, before);
    }

    #[test]
    fn test_player_moves_by_speed() {
        let mut state = new_state(Difficulty::Medium);
        state.start(0.0);
        let input = TickInput {
            down: true,
            right: true,
            ..Default::default()
        };

        tick(&mut state, &input, 16.0);
        assert_eq!(state.player.pos, Vec2::new(53.0, 53.0));
    }

    #[test]
    fn test_player_clamped_to_arena() {
        let mut state = new_state(Difficulty::Medium);
        state.start(0.0);
        state.player.pos = Vec2::new(1.0, 2.0);
        let input = TickInput {
            up: true,
            left: true,
            ..Default::default()
        };
        tick(&mut state, &input, 16.0);
        assert_eq!(state.player.pos, Vec2::ZERO);

        state.player.pos = Vec2::new(759.0, 558.0);
        let input = TickInput {
            down: true,
            right: true,
            ..Default::default()
        };
        tick(&mut state, &input, 32.0);
        assert_eq!(state.player.pos, Vec2::new(760.0, 560.0));
    }

    #[test]
    fn test_guards_patrol_each_tick() {
        let mut state = new_state(Difficulty::Easy);
        state.start(0.0);
        tick(&mut state, &TickInput::default(), 16.0);
        assert_eq!(state.guards[0].pos, Vec2::new(102.0, 100.0));
    }

    #[test]
    fn test_trap_ends_run() {
        let mut state = new_state(Difficulty::Medium);
        state.start(0.0);
        state.player.pos = state.traps[0].pos;

        assert_eq!(
            tick(&mut state, &TickInput::default(), 1000.0),
            Some(Outcome::Trapped)
        );
        assert_eq!(state.phase, GamePhase::Ended);
        assert_eq!(state.outcome, Some(Outcome::Trapped));
        assert!(state.reset_available);
        assert_eq!(state.score, 0);
        assert_eq!(
            state.drain_events(),
            vec![
                GameEvent::Sound(SoundEffect::Fail),
                GameEvent::RunEnded(Outcome::Trapped)
            ]
        );

        // Frozen until reset
        let frozen = state.clone();
        tick(&mut state, &TickInput::default(), 2000.0);
        assert_eq!(state, frozen);
    }

    #[test]
    fn test_collecting_every_vault_wins() {
        let mut state = new_state(Difficulty::Easy);
        state.start(0.0);
        state.player.pos = state.vaults[0].pos;
        assert_eq!(tick(&mut state, &TickInput::default(), 1000.0), None);
        assert_eq!(state.score, 99);

        state.player.pos = state.vaults[1].pos;
        assert_eq!(
            tick(&mut state, &TickInput::default(), 2000.0),
            Some(Outcome::Victory)
        );
        assert_eq!(state.phase, GamePhase::Ended);
        assert_eq!(state.score, 197);
    }

    #[test]
    fn test_powerup_wears_off_after_five_seconds() {
        let mut state = new_state(Difficulty::Medium);
        state.start(0.0);
        state.player.pos = state.powerups[0].pos;

        tick(&mut state, &TickInput::default(), 1000.0);
        assert_eq!(state.player.speed, 5.0);

        // Step off the pickup and wait it out
        state.player.pos = Vec2::new(50.0, 300.0);
        tick(&mut state, &TickInput::default(), 5999.0);
        assert_eq!(state.player.speed, 5.0);
        tick(&mut state, &TickInput::default(), 6000.0);
        assert_eq!(state.player.speed, 3.0);
        assert!(state.boosts.is_empty());
    }

    #[test]
    fn test_reset_cancels_pending_boost() {
        let mut state = new_state(Difficulty::Medium);
        state.start(0.0);
        state.player.pos = state.powerups[0].pos;
        tick(&mut state, &TickInput::default(), 1000.0);
        assert_eq!(state.boosts.len(), 1);

        state.reset();
        state.start(2000.0);
        tick(&mut state, &TickInput::default(), 7000.0);
        assert_eq!(state.player.speed, 3.0);
    }

    #[test]
    fn test_run_end_restores_base_speed() {
        let mut state = new_state(Difficulty::Medium);
        state.start(0.0);
        state.player.pos = state.powerups[0].pos;
        tick(&mut state, &TickInput::default(), 1000.0);

        state.player.pos = state.traps[0].pos;
        tick(&mut state, &TickInput::default(), 1100.0);
        assert_eq!(state.phase, GamePhase::Ended);
        assert_eq!(state.player.speed, state.player.base_speed);
        assert!(state.boosts.is_empty());
    }
}
