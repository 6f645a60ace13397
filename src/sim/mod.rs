//! Simulation module
//!
//! All gameplay logic lives here. This module stays free of rendering and
//! platform dependencies:
//! - Time comes in as an explicit wall-clock value
//! - Outcomes are reported as events, never presented
//! - Stable iteration order (entities are stored in layout order)

pub mod collision;
pub mod resolve;
pub mod state;
pub mod tick;

pub use collision::{Rect, overlaps};
pub use resolve::{resolve_collisions, vault_points};
pub use state::{
    GameEvent, GamePhase, GameState, Guard, Outcome, Player, PowerUp, SpeedBoost, Trap, Vault,
};
pub use tick::{TickInput, tick};
