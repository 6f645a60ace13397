//! Wall clock
//!
//! Run timing and power-up expiry use real time, not frame counts.

/// Milliseconds since the Unix epoch
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// The platform's real clock
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

#[cfg(target_arch = "wasm32")]
impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        js_sys::Date::now()
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs_f64() * 1000.0)
            .unwrap_or(0.0)
    }
}

/// Manually advanced clock (headless runs and tests)
#[derive(Debug, Default, Clone, Copy)]
pub struct FixedClock {
    pub now: f64,
}

impl FixedClock {
    pub fn new(now: f64) -> Self {
        Self { now }
    }

    pub fn advance(&mut self, ms: f64) {
        self.now += ms;
    }
}

impl Clock for FixedClock {
    fn now_ms(&self) -> f64 {
        self.now
    }
}
