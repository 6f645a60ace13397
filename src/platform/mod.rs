//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input (held movement keys)
//! - Time (wall clock in milliseconds)

pub mod input;
pub mod time;

pub use input::{InputSource, KeyState};
pub use time::{Clock, FixedClock, SystemClock};
