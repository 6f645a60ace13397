//! Per-frame collision resolution
//!
//! Checks run in a fixed priority order and the first hit wins the frame:
//! traps, guards, vaults, then power-ups. Hazards always beat a vault grab
//! that happens on the same frame.

use super::collision::overlaps;
use super::state::{GameEvent, GameState, Outcome};
use crate::audio::SoundEffect;
use crate::consts::*;

/// Points awarded for a vault stolen after `elapsed_secs` seconds
#[inline]
pub fn vault_points(elapsed_secs: u32) -> u32 {
    VAULT_BASE_POINTS
        .saturating_sub(elapsed_secs)
        .max(VAULT_MIN_POINTS)
}

/// Resolve the player's contacts for this frame
///
/// Mutates the state (stolen flags, score, speed) and queues events.
/// Returns the terminal outcome, if the frame produced one; the caller is
/// responsible for ending the run.
pub fn resolve_collisions(state: &mut GameState, now_ms: f64) -> Option<Outcome> {
    let player = state.player.bounds();

    if state.traps.iter().any(|t| overlaps(&player, &t.bounds())) {
        state.events.push(GameEvent::Sound(SoundEffect::Fail));
        return Some(Outcome::Trapped);
    }

    if state.guards.iter().any(|g| overlaps(&player, &g.bounds())) {
        state.events.push(GameEvent::Sound(SoundEffect::Fail));
        return Some(Outcome::Caught);
    }

    let hit_vault = state
        .vaults
        .iter()
        .position(|v| !v.stolen && overlaps(&player, &v.bounds()));
    if let Some(index) = hit_vault {
        state.vaults[index].stolen = true;
        state.events.push(GameEvent::Sound(SoundEffect::Steal));

        let elapsed_secs = state.elapsed_at(now_ms);
        state.elapsed_secs = elapsed_secs;
        state.score += vault_points(elapsed_secs);
        state.events.push(GameEvent::VaultStolen {
            elapsed_secs,
            score: state.score,
        });
        log::info!(
            "Vault {} stolen at {}s, score {}",
            index,
            elapsed_secs,
            state.score
        );

        if state.remaining_vaults() == 0 {
            return Some(Outcome::Victory);
        }
        return None;
    }

    let mut boosts = 0;
    for powerup in state.powerups.iter_mut() {
        if powerup.active && overlaps(&player, &powerup.bounds()) {
            powerup.active = false;
            boosts += 1;
        }
    }
    for _ in 0..boosts {
        state.events.push(GameEvent::Sound(SoundEffect::PowerUp));
        state.apply_boost(POWERUP_BOOST, now_ms, POWERUP_DURATION_MS);
        log::debug!("Power-up collected, speed now {}", state.player.speed);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Difficulty;
    use crate::sim::state::GamePhase;
    use glam::Vec2;

    fn running_state(difficulty: Difficulty) -> GameState {
        let mut state = GameState::new(difficulty, Vec2::new(CANVAS_WIDTH, CANVAS_HEIGHT));
        state.start(0.0);
        state
    }

    #[test]
    fn test_vault_points() {
        assert_eq!(vault_points(0), 100);
        assert_eq!(vault_points(30), 70);
        assert_eq!(vault_points(90), 10);
        assert_eq!(vault_points(95), 10);
        assert_eq!(vault_points(200), 10);
    }

    #[test]
    fn test_no_contact_is_quiet() {
        let mut state = running_state(Difficulty::Medium);
        assert_eq!(resolve_collisions(&mut state, 1000.0), None);
        assert!(state.events.is_empty());
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn test_trap_contact() {
        let mut state = running_state(Difficulty::Medium);
        state.player.pos = state.traps[0].pos;

        assert_eq!(resolve_collisions(&mut state, 1000.0), Some(Outcome::Trapped));
        assert_eq!(state.events, vec![GameEvent::Sound(SoundEffect::Fail)]);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_guard_contact() {
        let mut state = running_state(Difficulty::Medium);
        state.player.pos = state.guards[1].pos + Vec2::new(5.0, 5.0);

        assert_eq!(resolve_collisions(&mut state, 1000.0), Some(Outcome::Caught));
        assert_eq!(state.events, vec![GameEvent::Sound(SoundEffect::Fail)]);
    }

    #[test]
    fn test_trap_beats_vault_on_same_frame() {
        let mut state = running_state(Difficulty::Easy);
        // Drop a trap right on top of the vault
        state.traps[0].pos = state.vaults[0].pos;
        state.player.pos = state.vaults[0].pos;

        assert_eq!(resolve_collisions(&mut state, 1000.0), Some(Outcome::Trapped));
        assert!(!state.vaults[0].stolen);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_guard_beats_last_vault_on_same_frame() {
        let mut state = running_state(Difficulty::Easy);
        state.vaults[0].stolen = true;
        // Park a guard on the only vault left
        state.guards[0].pos = state.vaults[1].pos;
        state.player.pos = state.vaults[1].pos;

        assert_eq!(resolve_collisions(&mut state, 1000.0), Some(Outcome::Caught));
        assert!(!state.vaults[1].stolen);
        assert_eq!(state.remaining_vaults(), 1);
        assert_eq!(state.score, 0);
        assert_eq!(state.events, vec![GameEvent::Sound(SoundEffect::Fail)]);
    }

    #[test]
    fn test_vault_scoring_at_thirty_seconds() {
        let mut state = running_state(Difficulty::Medium);
        state.player.pos = state.vaults[0].pos;

        assert_eq!(resolve_collisions(&mut state, 30_400.0), None);
        assert!(state.vaults[0].stolen);
        assert_eq!(state.score, 70);
        assert_eq!(
            state.events,
            vec![
                GameEvent::Sound(SoundEffect::Steal),
                GameEvent::VaultStolen {
                    elapsed_secs: 30,
                    score: 70
                },
            ]
        );
    }

    #[test]
    fn test_vault_scoring_floor() {
        let mut state = running_state(Difficulty::Medium);
        state.player.pos = state.vaults[0].pos;

        resolve_collisions(&mut state, 200_000.0);
        assert_eq!(state.score, 10);
    }

    #[test]
    fn test_stolen_vault_never_rescores() {
        let mut state = running_state(Difficulty::Medium);
        state.player.pos = state.vaults[0].pos;

        resolve_collisions(&mut state, 0.0);
        assert_eq!(state.score, 100);
        state.events.clear();

        assert_eq!(resolve_collisions(&mut state, 1000.0), None);
        assert_eq!(state.score, 100);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_one_vault_per_frame() {
        let mut state = running_state(Difficulty::Medium);
        // Stack two vaults under the player
        state.vaults[1].pos = state.vaults[0].pos;
        state.player.pos = state.vaults[0].pos;

        resolve_collisions(&mut state, 0.0);
        assert_eq!(state.remaining_vaults(), 2);
        assert!(state.vaults[0].stolen);
    }

    #[test]
    fn test_last_vault_is_victory() {
        let mut state = running_state(Difficulty::Easy);
        state.vaults[0].stolen = true;
        state.player.pos = state.vaults[1].pos;

        assert_eq!(resolve_collisions(&mut state, 5000.0), Some(Outcome::Victory));
        assert_eq!(state.score, 95);
    }

    #[test]
    fn test_powerup_boost() {
        let mut state = running_state(Difficulty::Medium);
        state.player.pos = state.powerups[0].pos;

        assert_eq!(resolve_collisions(&mut state, 2000.0), None);
        assert!(!state.powerups[0].active);
        assert_eq!(state.player.speed, 5.0);
        assert_eq!(state.boosts.len(), 1);
        assert_eq!(state.boosts[0].expires_at_ms, 7000.0);
        assert_eq!(state.events, vec![GameEvent::Sound(SoundEffect::PowerUp)]);

        // Consumed power-up does nothing on later frames
        state.events.clear();
        resolve_collisions(&mut state, 2100.0);
        assert_eq!(state.player.speed, 5.0);
        assert!(state.events.is_empty());
    }
}
