//! High score persistence
//!
//! The only thing the game ever persists is one integer: the best score.
//! It is stored as a JSON number under the `highScore` key.

/// Storage key for the best score
pub const HIGH_SCORE_KEY: &str = "highScore";

/// Scalar high score storage
pub trait ScoreStore {
    /// Stored best score, 0 if absent or unreadable
    fn read_high_score(&self) -> u32;
    /// Overwrite the stored best score
    fn write_high_score(&mut self, score: u32);
}

/// Decode a stored value, tolerating junk
pub fn decode_score(raw: &str) -> Option<u32> {
    match serde_json::from_str::<f64>(raw.trim()) {
        Ok(value) if value.is_finite() && value >= 0.0 => Some(value.floor().min(u32::MAX as f64) as u32),
        Ok(_) => None,
        Err(err) => {
            log::warn!("Ignoring unreadable high score {:?}: {}", raw, err);
            None
        }
    }
}

/// Encode a score for storage
pub fn encode_score(score: u32) -> String {
    // A bare u32 cannot fail to serialize
    serde_json::to_string(&score).unwrap_or_else(|_| score.to_string())
}

/// In-memory store (native builds and tests)
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    raw: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with an already stored raw value
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            raw: Some(raw.into()),
        }
    }

    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }
}

impl ScoreStore for MemoryStore {
    fn read_high_score(&self) -> u32 {
        self.raw.as_deref().and_then(decode_score).unwrap_or(0)
    }

    fn write_high_score(&mut self, score: u32) {
        self.raw = Some(encode_score(score));
    }
}

/// Browser LocalStorage store
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStorageStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl ScoreStore for LocalStorageStore {
    fn read_high_score(&self) -> u32 {
        let Some(storage) = Self::storage() else {
            log::warn!("LocalStorage unavailable, high score starts at 0");
            return 0;
        };
        match storage.get_item(HIGH_SCORE_KEY) {
            Ok(Some(raw)) => {
                let score = decode_score(&raw).unwrap_or(0);
                log::info!("Loaded high score {}", score);
                score
            }
            _ => {
                log::info!("No high score found, starting fresh");
                0
            }
        }
    }

    fn write_high_score(&mut self, score: u32) {
        if let Some(storage) = Self::storage() {
            if storage.set_item(HIGH_SCORE_KEY, &encode_score(score)).is_ok() {
                log::info!("High score saved ({})", score);
            } else {
                log::warn!("Failed to save high score");
            }
        }
    }
}
