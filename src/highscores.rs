//! High score tracking
//!
//! The best score lives in an external store under one fixed key. It is read
//! on the first score report and written only when beaten. Store failures are
//! logged and treated as a zero high score.

use crate::consts::HIGH_SCORE_KEY;
use crate::persistence::ScoreStore;

/// Lazily loaded high score backed by a `ScoreStore`
#[derive(Debug)]
pub struct HighScore<S: ScoreStore> {
    store: S,
    best: Option<u64>,
}

impl<S: ScoreStore> HighScore<S> {
    pub fn new(store: S) -> Self {
        Self { store, best: None }
    }

    /// Best score seen so far, if the store has been read
    pub fn best(&self) -> Option<u64> {
        self.best
    }

    /// Report the current score. Loads the stored value on first call and
    /// persists `score` when it beats it. Returns the resulting high score.
    pub fn record(&mut self, score: u64) -> u64 {
        let best = match self.best {
            Some(best) => best,
            None => {
                let loaded = self.load();
                self.best = Some(loaded);
                loaded
            }
        };

        if score > best {
            self.best = Some(score);
            if let Err(e) = self.store.set(HIGH_SCORE_KEY, score) {
                log::warn!("Failed to save high score {}: {}", score, e);
            }
            return score;
        }
        best
    }

    fn load(&self) -> u64 {
        match self.store.get(HIGH_SCORE_KEY) {
            Ok(Some(value)) => {
                log::info!("Loaded high score {}", value);
                value
            }
            Ok(None) => {
                log::info!("No high score found, starting fresh");
                0
            }
            Err(e) => {
                log::warn!("Failed to load high score, using 0: {}", e);
                0
            }
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
