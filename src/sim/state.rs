//! Game state and core simulation types
//!
//! Everything a run needs lives in `GameState`; the driver owns exactly one
//! and hands it to `tick` by reference.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::audio::SoundEffect;
use crate::consts::*;
use crate::settings::Difficulty;

/// Lifecycle phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Board is laid out, waiting for Play
    Idle,
    /// Active gameplay
    Running,
    /// Run finished, waiting for Reset
    Ended,
}

/// How a run finished
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Player stepped on a trap
    Trapped,
    /// Player touched a guard
    Caught,
    /// Every vault was stolen
    Victory,
}

impl Outcome {
    /// Player-facing message for this outcome
    pub fn message(&self) -> &'static str {
        match self {
            Outcome::Trapped => "You fell into a trap!",
            Outcome::Caught => "Caught by a guard!",
            Outcome::Victory => "Congratulations! You stole all vaults! You can now reset the game.",
        }
    }
}

/// Things that happened during a tick, consumed by the driver
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Play a sound effect
    Sound(SoundEffect),
    /// A vault was stolen
    VaultStolen { elapsed_secs: u32, score: u32 },
    /// Run reached a terminal outcome
    RunEnded(Outcome),
}

/// The thief
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub size: Vec2,
    /// Current speed in pixels per frame (includes active boosts)
    pub speed: f32,
    /// Speed without boosts, from the difficulty preset
    pub base_speed: f32,
}

impl Player {
    pub fn new(base_speed: f32) -> Self {
        Self {
            pos: Vec2::new(PLAYER_START_X, PLAYER_START_Y),
            size: Vec2::splat(PLAYER_SIZE),
            speed: base_speed,
            base_speed,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect { pos: self.pos, size: self.size }
    }
}

/// A vault to steal from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vault {
    pub pos: Vec2,
    pub size: Vec2,
    /// Set once, never cleared within a run
    pub stolen: bool,
}

impl Vault {
    pub fn bounds(&self) -> Rect {
        Rect { pos: self.pos, size: self.size }
    }
}

/// Static floor trap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trap {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Trap {
    pub fn bounds(&self) -> Rect {
        Rect { pos: self.pos, size: self.size }
    }
}

/// Patrolling guard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Guard {
    pub pos: Vec2,
    pub size: Vec2,
    /// Velocity in pixels per frame
    pub vel: Vec2,
}

impl Guard {
    pub fn bounds(&self) -> Rect {
        Rect { pos: self.pos, size: self.size }
    }

    /// Advance one frame and bounce off the arena edges
    pub fn patrol(&mut self, arena: Vec2) {
        self.pos += self.vel;

        if self.pos.x <= 0.0 || self.pos.x + self.size.x >= arena.x {
            self.vel.x = -self.vel.x;
        }
        if self.pos.y <= 0.0 || self.pos.y + self.size.y >= arena.y {
            self.vel.y = -self.vel.y;
        }
    }
}

/// Speed pickup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerUp {
    pub pos: Vec2,
    pub size: Vec2,
    /// Cleared on pickup, restored only by reset
    pub active: bool,
}

impl PowerUp {
    pub fn bounds(&self) -> Rect {
        Rect { pos: self.pos, size: self.size }
    }
}

/// Pending removal of a power-up boost
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedBoost {
    pub amount: f32,
    /// Wall-clock expiry (ms since epoch)
    pub expires_at_ms: f64,
}

/// Complete game state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Difficulty used by the next reset
    pub difficulty: Difficulty,
    /// Playfield size (pixels)
    pub arena: Vec2,
    /// Current phase
    pub phase: GamePhase,
    /// How the last run ended (set only while Ended)
    pub outcome: Option<Outcome>,
    /// Score for the current run
    pub score: u32,
    /// Whole seconds since Play
    pub elapsed_secs: u32,
    /// Wall-clock time of Play (ms since epoch)
    pub start_ms: Option<f64>,
    /// Whether a Reset request is honoured
    pub reset_available: bool,
    pub player: Player,
    pub vaults: Vec<Vault>,
    pub traps: Vec<Trap>,
    pub guards: Vec<Guard>,
    pub powerups: Vec<PowerUp>,
    /// Boost removals waiting for their deadline
    pub boosts: Vec<SpeedBoost>,
    /// Events produced since the driver last drained them
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a state laid out for `difficulty`, sized to the given arena
    pub fn new(difficulty: Difficulty, arena: Vec2) -> Self {
        let base_speed = difficulty.preset().speed as f32;
        let mut state = Self {
            difficulty,
            arena,
            phase: GamePhase::Idle,
            outcome: None,
            score: 0,
            elapsed_secs: 0,
            start_ms: None,
            reset_available: false,
            player: Player::new(base_speed),
            vaults: Vec::new(),
            traps: Vec::new(),
            guards: Vec::new(),
            powerups: Vec::new(),
            boosts: Vec::new(),
            events: Vec::new(),
        };
        state.reset();
        state
    }

    /// Rebuild every entity from the selected difficulty and return to Idle
    ///
    /// Does not start the run; Play is a separate action.
    pub fn reset(&mut self) {
        let preset = self.difficulty.preset();
        let speed = preset.speed as f32;

        self.player = Player::new(speed);
        self.score = 0;
        self.elapsed_secs = 0;
        self.start_ms = None;
        self.outcome = None;
        self.boosts.clear();
        self.events.clear();

        self.vaults = (0..preset.vaults)
            .map(|i| {
                let step = i as f32 * VAULT_STEP;
                Vault {
                    pos: Vec2::new(VAULT_ORIGIN_X - step, VAULT_ORIGIN_Y - step),
                    size: Vec2::splat(VAULT_SIZE),
                    stolen: false,
                }
            })
            .collect();

        self.traps = (0..preset.traps)
            .map(|i| {
                let i = i as f32;
                Trap {
                    pos: Vec2::new(TRAP_ORIGIN_X + i * TRAP_STEP_X, TRAP_ORIGIN_Y + i * TRAP_STEP_Y),
                    size: Vec2::splat(TRAP_SIZE),
                }
            })
            .collect();

        self.guards = (0..preset.guards)
            .map(|i| {
                let i = i as f32;
                Guard {
                    pos: Vec2::new(
                        GUARD_ORIGIN_X + i * GUARD_STEP_X,
                        GUARD_ORIGIN_Y + i * GUARD_STEP_Y,
                    ),
                    size: Vec2::splat(GUARD_SIZE),
                    vel: Vec2::new(speed, 0.0),
                }
            })
            .collect();

        self.powerups = vec![PowerUp {
            pos: Vec2::new(POWERUP_X, POWERUP_Y),
            size: Vec2::splat(POWERUP_SIZE),
            active: true,
        }];

        self.phase = GamePhase::Idle;
        self.reset_available = false;
    }

    /// Begin the run. Only Idle can start; returns whether the phase changed.
    pub fn start(&mut self, now_ms: f64) -> bool {
        if self.phase != GamePhase::Idle {
            return false;
        }
        self.phase = GamePhase::Running;
        self.start_ms = Some(now_ms);
        self.elapsed_secs = 0;
        true
    }

    /// Choose the difficulty for the next reset (current run is untouched)
    pub fn select_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Whole seconds since the run started
    pub fn elapsed_at(&self, now_ms: f64) -> u32 {
        match self.start_ms {
            Some(start) => ((now_ms - start).max(0.0) / 1000.0).floor() as u32,
            None => 0,
        }
    }

    /// Vaults still waiting to be stolen
    pub fn remaining_vaults(&self) -> usize {
        self.vaults.iter().filter(|v| !v.stolen).count()
    }

    /// Apply a speed boost now and schedule its removal
    pub fn apply_boost(&mut self, amount: f32, now_ms: f64, duration_ms: f64) {
        self.player.speed += amount;
        self.boosts.push(SpeedBoost {
            amount,
            expires_at_ms: now_ms + duration_ms,
        });
    }

    /// Remove boosts whose deadline has passed
    ///
    /// Never drops the player below `base_speed`.
    pub fn expire_boosts(&mut self, now_ms: f64) {
        let player = &mut self.player;
        self.boosts.retain(|boost| {
            if now_ms >= boost.expires_at_ms {
                player.speed = (player.speed - boost.amount).max(player.base_speed);
                false
            } else {
                true
            }
        });
    }

    /// Drop pending boosts and restore baseline speed
    pub fn cancel_boosts(&mut self) {
        self.boosts.clear();
        self.player.speed = self.player.base_speed;
    }

    /// Move to Ended with the given outcome
    pub fn end_run(&mut self, outcome: Outcome) {
        self.phase = GamePhase::Ended;
        self.outcome = Some(outcome);
        self.reset_available = true;
        self.cancel_boosts();
        self.events.push(GameEvent::RunEnded(outcome));
    }

    /// Take all events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
