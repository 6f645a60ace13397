//! Frame building
//!
//! Paint order matches the board's layering: vaults, player, traps, guards,
//! power-ups, then the HUD text.

use glam::Vec2;

use super::{DrawCommand, Frame, SpriteId, TextCommand};
use crate::sim::GameState;

/// HUD text anchor and line height
const HUD_X: f32 = 20.0;
const HUD_TOP: f32 = 30.0;
const HUD_LINE: f32 = 20.0;

fn sprite(sprite: SpriteId, pos: Vec2, size: Vec2) -> DrawCommand {
    DrawCommand { sprite, pos, size }
}

/// Build the draw list for the current state
pub fn build_frame(state: &GameState, high_score: u32) -> Frame {
    let mut sprites = Vec::with_capacity(
        1 + state.vaults.len() + state.traps.len() + state.guards.len() + state.powerups.len(),
    );

    sprites.extend(
        state
            .vaults
            .iter()
            .filter(|v| !v.stolen)
            .map(|v| sprite(SpriteId::Vault, v.pos, v.size)),
    );
    sprites.push(sprite(SpriteId::Player, state.player.pos, state.player.size));
    sprites.extend(
        state
            .traps
            .iter()
            .map(|t| sprite(SpriteId::Trap, t.pos, t.size)),
    );
    sprites.extend(
        state
            .guards
            .iter()
            .map(|g| sprite(SpriteId::Guard, g.pos, g.size)),
    );
    sprites.extend(
        state
            .powerups
            .iter()
            .filter(|p| p.active)
            .map(|p| sprite(SpriteId::PowerUp, p.pos, p.size)),
    );

    let labels = [
        format!("Score: {}", state.score),
        format!("Time: {}s", state.elapsed_secs),
        format!("High Score: {}", high_score),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, text)| TextCommand {
        text,
        pos: Vec2::new(HUD_X, HUD_TOP + i as f32 * HUD_LINE),
    })
    .collect();

    Frame { sprites, labels }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::settings::Difficulty;

    fn state() -> GameState {
        GameState::new(Difficulty::Hard, Vec2::new(CANVAS_WIDTH, CANVAS_HEIGHT))
    }

    #[test]
    fn test_fresh_board_draws_everything() {
        let frame = build_frame(&state(), 0);
        assert_eq!(frame.count(SpriteId::Vault), 4);
        assert_eq!(frame.count(SpriteId::Player), 1);
        assert_eq!(frame.count(SpriteId::Trap), 3);
        assert_eq!(frame.count(SpriteId::Guard), 3);
        assert_eq!(frame.count(SpriteId::PowerUp), 1);
        assert_eq!(frame.sprites[0].sprite, SpriteId::Vault);
    }

    #[test]
    fn test_collected_items_are_hidden() {
        let mut state = state();
        state.vaults[0].stolen = true;
        state.powerups[0].active = false;

        let frame = build_frame(&state, 0);
        assert_eq!(frame.count(SpriteId::Vault), 3);
        assert_eq!(frame.count(SpriteId::PowerUp), 0);
    }

    #[test]
    fn test_hud_labels() {
        let mut state = state();
        state.score = 170;
        state.elapsed_secs = 12;

        let frame = build_frame(&state, 320);
        let texts: Vec<_> = frame.labels.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["Score: 170", "Time: 12s", "High Score: 320"]);
        assert_eq!(frame.labels[0].pos, Vec2::new(20.0, 30.0));
        assert_eq!(frame.labels[2].pos, Vec2::new(20.0, 70.0));
    }
}
