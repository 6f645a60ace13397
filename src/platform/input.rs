//! Keyboard input
//!
//! Key events arrive asynchronously and only flip flags here; the frame
//! driver samples the flags once per frame.

use crate::sim::TickInput;

/// Anything the frame driver can sample for held directions
pub trait InputSource {
    fn sample(&self) -> TickInput;
}

/// Currently held movement keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyState {
    held: TickInput,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a `keydown`. Returns true if the key is a movement key.
    pub fn press(&mut self, key: &str) -> bool {
        self.set(key, true)
    }

    /// Record a `keyup`. Returns true if the key is a movement key.
    pub fn release(&mut self, key: &str) -> bool {
        self.set(key, false)
    }

    /// Forget every held key (window lost focus)
    pub fn clear(&mut self) {
        self.held = TickInput::default();
    }

    fn set(&mut self, key: &str, down: bool) -> bool {
        let flag = match key {
            "ArrowUp" | "w" | "W" => &mut self.held.up,
            "ArrowDown" | "s" | "S" => &mut self.held.down,
            "ArrowLeft" | "a" | "A" => &mut self.held.left,
            "ArrowRight" | "d" | "D" => &mut self.held.right,
            _ => return false,
        };
        *flag = down;
        true
    }
}

impl InputSource for KeyState {
    fn sample(&self) -> TickInput {
        self.held
    }
}

impl InputSource for TickInput {
    fn sample(&self) -> TickInput {
        *self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_and_release() {
        let mut keys = KeyState::new();
        assert!(keys.press("ArrowUp"));
        assert!(keys.press("d"));
        assert_eq!(
            keys.sample(),
            TickInput {
                up: true,
                right: true,
                ..Default::default()
            }
        );

        assert!(keys.release("ArrowUp"));
        assert!(!keys.sample().up);
        assert!(keys.sample().right);
    }

    #[test]
    fn test_other_keys_ignored() {
        let mut keys = KeyState::new();
        assert!(!keys.press("Enter"));
        assert!(!keys.press(" "));
        assert_eq!(keys.sample(), TickInput::default());
    }

    #[test]
    fn test_clear() {
        let mut keys = KeyState::new();
        keys.press("ArrowLeft");
        keys.press("ArrowDown");
        keys.clear();
        assert_eq!(keys.sample(), TickInput::default());
    }
}
