//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Ticks driven from outside, never by a clock
//! - No rendering or platform dependencies

pub mod food;
pub mod grid;
pub mod input;
pub mod particles;
pub mod state;
pub mod tick;

pub use food::Food;
pub use grid::{Direction, Grid};
pub use input::CommandQueue;
pub use particles::{Fruit, Particle, ParticleSystem, Spin};
pub use state::{Collision, GameState, Phase, initial_snake, is_playable};
pub use tick::{TickOutcome, tick};
