//! Best-run score, persisted across sessions
//!
//! A single integer in LocalStorage. Read once at startup; written only
//! when a finished run beats the stored value.

/// The persisted best score
#[derive(Debug, Clone, Copy, Default)]
pub struct HighScore {
    best: u32,
}

impl HighScore {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "beacon_guardian_highscore";

    pub fn new() -> Self {
        Self { best: 0 }
    }

    /// Current best score
    pub fn best(&self) -> u32 {
        self.best
    }

    /// Offer a finished run's score; returns true when it set a new best
    pub fn record(&mut self, score: u32) -> bool {
        if score > self.best {
            self.best = score;
            return true;
        }
        false
    }

    /// Load the stored best score (WASM only); anything unreadable is zero
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(raw)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(best) = raw.parse::<u32>() {
                    log::info!("Loaded high score: {}", best);
                    return Self { best };
                }
                log::warn!("Stored high score unreadable, starting at 0");
            }
        }

        Self::new()
    }

    /// Save the best score to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            let _ = storage.set_item(Self::STORAGE_KEY, &self.best.to_string());
            log::info!("High score saved: {}", self.best);
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::new()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
