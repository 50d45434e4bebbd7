//! Snake Core - A deterministic snake simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (grid, movement, collisions, food, particles)
//! - `game`: Tick scheduler bridging render signals to fixed simulation steps
//! - `persistence`: Key-value store for the high score
//! - `highscores`: Lazy high score tracking
//! - `settings`: Speed, grid and quality preferences

pub mod game;
pub mod highscores;
pub mod persistence;
pub mod settings;
pub mod sim;

pub use game::{Command, Game, Render, Snapshot};
pub use highscores::HighScore;
pub use persistence::{JsonFileStore, MemoryStore, ScoreStore, StoreError};
pub use settings::{QualityPreset, Settings};

/// Game configuration constants
pub mod consts {
    /// Default grid dimensions
    pub const GRID_COLUMNS: i32 = 24;
    pub const GRID_ROWS: i32 = 24;

    /// Snake speed bounds (cells per second)
    pub const MIN_SPEED: u32 = 3;
    pub const MAX_SPEED: u32 = 24;
    pub const DEFAULT_SPEED: u32 = 10;

    /// Upper bound on elapsed time per render signal (seconds)
    pub const MAX_FRAME_DT: f32 = 0.05;
    /// Nominal render rate, used for the first frame and drag normalization
    pub const REFERENCE_FPS: f32 = 60.0;

    /// Snake length at session start
    pub const INITIAL_SNAKE_LEN: usize = 3;

    /// Food moves once every this many snake ticks
    pub const FOOD_MOVE_INTERVAL: u32 = 3;

    /// Particles per consumption burst
    pub const BURST_SIZE: usize = 60;
    /// Per-frame velocity retention at the reference frame rate
    pub const PARTICLE_DRAG: f32 = 0.9;
    /// Particle speed range (cells/s)
    pub const PARTICLE_MIN_SPEED: f32 = 6.0;
    pub const PARTICLE_MAX_SPEED: f32 = 15.0;
    /// Particle lifetime range (seconds)
    pub const PARTICLE_MIN_LIFE: f32 = 0.7;
    pub const PARTICLE_MAX_LIFE: f32 = 1.2;
    /// Particle base size range (cells)
    pub const PARTICLE_MIN_SIZE: f32 = 0.9;
    pub const PARTICLE_MAX_SIZE: f32 = 1.5;
    /// Maximum spin rate (rad/s, either direction)
    pub const PARTICLE_MAX_SPIN: f32 = 7.0;

    /// Store key for the high score
    pub const HIGH_SCORE_KEY: &str = "snake.highScore";
}

/// Clamp a speed setting (cells per second) to the supported range
#[inline]
pub fn clamp_speed(cells_per_second: u32) -> u32 {
    cells_per_second.clamp(consts::MIN_SPEED, consts::MAX_SPEED)
}

/// Milliseconds per simulation tick for a speed setting
#[inline]
pub fn tick_interval_ms(cells_per_second: u32) -> f32 {
    1000.0 / clamp_speed(cells_per_second) as f32
}
