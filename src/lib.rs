//! Vault Heist - A top-down arcade heist game
//!
//! Core modules:
//! - `sim`: Simulation (entities, collisions, run lifecycle)
//! - `game`: Frame driver and command handling around the simulation
//! - `renderer`: Draw lists and the Canvas 2D painter
//! - `audio`: Sound effects and the ambient track
//! - `platform`: Browser/native platform abstraction (input, clock)
//! - `persistence`: High score storage
//! - `settings`: Difficulty presets and player preferences

pub mod audio;
pub mod error;
pub mod game;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::ConfigError;
pub use game::{Command, Game, Notification};
pub use highscores::HighScore;
pub use settings::{Difficulty, DifficultyPreset, Settings};

/// Game configuration constants
pub mod consts {
    /// Default canvas dimensions (pixels)
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;

    /// Player spawn point and sprite size
    pub const PLAYER_START_X: f32 = 50.0;
    pub const PLAYER_START_Y: f32 = 50.0;
    pub const PLAYER_SIZE: f32 = 40.0;

    /// Vault layout: vault i sits at (VAULT_ORIGIN - i * VAULT_STEP)
    pub const VAULT_ORIGIN_X: f32 = 650.0;
    pub const VAULT_ORIGIN_Y: f32 = 450.0;
    pub const VAULT_STEP: f32 = 120.0;
    pub const VAULT_SIZE: f32 = 50.0;

    /// Trap layout: trap i sits at (TRAP_ORIGIN + i * TRAP_STEP)
    pub const TRAP_ORIGIN_X: f32 = 300.0;
    pub const TRAP_ORIGIN_Y: f32 = 200.0;
    pub const TRAP_STEP_X: f32 = 150.0;
    pub const TRAP_STEP_Y: f32 = 100.0;
    pub const TRAP_SIZE: f32 = 40.0;

    /// Guard layout: guard i starts at (GUARD_ORIGIN + i * GUARD_STEP)
    pub const GUARD_ORIGIN_X: f32 = 100.0;
    pub const GUARD_ORIGIN_Y: f32 = 100.0;
    pub const GUARD_STEP_X: f32 = 200.0;
    pub const GUARD_STEP_Y: f32 = 150.0;
    pub const GUARD_SIZE: f32 = 40.0;

    /// The single power-up of each run
    pub const POWERUP_X: f32 = 200.0;
    pub const POWERUP_Y: f32 = 100.0;
    pub const POWERUP_SIZE: f32 = 30.0;
    /// Speed added on pickup
    pub const POWERUP_BOOST: f32 = 2.0;
    /// Boost lifetime (wall clock, milliseconds)
    pub const POWERUP_DURATION_MS: f64 = 5000.0;

    /// Points for a vault before the time penalty
    pub const VAULT_BASE_POINTS: u32 = 100;
    /// Minimum points a vault is ever worth
    pub const VAULT_MIN_POINTS: u32 = 10;
}
