//! Game state and core simulation types
//!
//! One `GameState` is one session: it is rebuilt wholesale on reset/restart.

use std::collections::VecDeque;

use glam::IVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::food::Food;
use super::grid::{Direction, Grid};
use super::input::CommandQueue;
use super::particles::ParticleSystem;
use crate::consts::*;

/// Current run state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Fresh session, waiting for start
    Idle,
    /// Snake is moving
    Running,
    /// Suspended by the player
    Paused,
    /// Run ended by a collision
    GameOver,
}

/// What the new head ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Collision {
    Wall,
    SelfCollision,
}

/// Complete session state (deterministic for a given seed and input)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    pub grid: Grid,
    /// Segments, head first
    pub snake: VecDeque<IVec2>,
    /// Current heading
    pub direction: Direction,
    /// Pending turns
    pub queue: CommandQueue,
    pub food: Food,
    pub score: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub phase: Phase,
    /// Visual particles (not gameplay-affecting)
    pub particles: ParticleSystem,
    /// Particles per consumption burst
    pub burst_size: usize,
    pub(crate) rng: Pcg32,
}

/// Starting body: head a third of the way across, tail trailing left.
/// Segments that do not fit on a narrow grid are dropped.
pub fn initial_snake(grid: &Grid) -> VecDeque<IVec2> {
    let len = INITIAL_SNAKE_LEN as i32;
    let column = (grid.columns / 3).max(len - 1).min(grid.columns - 1);
    let head = IVec2::new(column, grid.rows / 2);
    (0..len)
        .map(|i| head - IVec2::new(i, 0))
        .filter(|&cell| grid.in_bounds(cell))
        .collect()
}

/// Whether a grid holds the starting snake plus at least one free cell for food
pub fn is_playable(grid: &Grid) -> bool {
    grid.columns >= INITIAL_SNAKE_LEN as i32 && grid.cell_count() > INITIAL_SNAKE_LEN
}

impl GameState {
    /// Create a new idle session with the given seed
    pub fn new(seed: u64, grid: Grid) -> Self {
        Self::with_particles(seed, grid, ParticleSystem::default())
    }

    /// Create a new idle session with a preconfigured particle system.
    /// Grids too small to play start out in GameOver.
    pub fn with_particles(seed: u64, grid: Grid, particles: ParticleSystem) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let snake = initial_snake(&grid);
        let food = Food::spawn(&grid, &snake, snake[0], &mut rng);
        let phase = if is_playable(&grid) {
            Phase::Idle
        } else {
            log::warn!(
                "Grid {}x{} cannot hold the starting snake",
                grid.columns,
                grid.rows
            );
            Phase::GameOver
        };

        Self {
            seed,
            grid,
            snake,
            direction: Direction::Right,
            queue: CommandQueue::new(),
            food,
            score: 0,
            time_ticks: 0,
            phase,
            particles,
            burst_size: BURST_SIZE,
            rng,
        }
    }

    /// Head segment
    pub fn head(&self) -> IVec2 {
        self.snake[0]
    }

    /// Queue a turn against the current heading. Filtered turns return false.
    pub fn enqueue(&mut self, direction: Direction) -> bool {
        self.queue.enqueue(direction, self.direction)
    }

    pub fn is_occupied(&self, cell: IVec2) -> bool {
        self.snake.iter().any(|&seg| seg == cell)
    }

    /// Replace the food with a fresh placement (new cell, heading and cadence)
    pub fn respawn_food(&mut self) {
        let fallback = self.food.cell;
        self.food = Food::spawn(&self.grid, &self.snake, fallback, &mut self.rng);
    }

    /// Enter Running from Idle or Paused. Returns true if the phase changed.
    pub fn start(&mut self) -> bool {
        match self.phase {
            Phase::Idle | Phase::Paused => {
                self.phase = Phase::Running;
                true
            }
            Phase::Running | Phase::GameOver => false,
        }
    }

    /// Suspend a running session. Returns true if the phase changed.
    pub fn pause(&mut self) -> bool {
        if self.phase == Phase::Running {
            self.phase = Phase::Paused;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session() {
        let state = GameState::new(12345, Grid::default());
        assert_eq!(state.phase, Phase::Idle);
        assert_eq!(state.score, 0);
        assert_eq!(state.direction, Direction::Right);
        assert!(state.queue.is_empty());
        assert_eq!(
            Vec::from(state.snake.clone()),
            vec![IVec2::new(8, 12), IVec2::new(7, 12), IVec2::new(6, 12)]
        );
        assert!(!state.is_occupied(state.food.cell));
        assert!(state.grid.in_bounds(state.food.cell));
    }

    #[test]
    fn test_initial_snake_small_grid() {
        let snake = initial_snake(&Grid::new(6, 4));
        assert_eq!(
            Vec::from(snake),
            vec![IVec2::new(2, 2), IVec2::new(1, 2), IVec2::new(0, 2)]
        );
    }

    #[test]
    fn test_smallest_playable_grid() {
        let mut state = GameState::new(1, Grid::new(4, 1));
        assert_eq!(state.phase, Phase::Idle);
        assert_eq!(
            Vec::from(state.snake.clone()),
            vec![IVec2::new(2, 0), IVec2::new(1, 0), IVec2::new(0, 0)]
        );
        assert_eq!(state.food.cell, IVec2::new(3, 0));
        assert!(state.start());
    }

    #[test]
    fn test_unplayable_grids_start_over() {
        for (columns, rows) in [(1, 1), (2, 2), (2, 10), (3, 1)] {
            let grid = Grid::new(columns, rows);
            let mut state = GameState::new(1, grid);
            assert!(!is_playable(&grid));
            assert_eq!(state.phase, Phase::GameOver, "{}x{}", columns, rows);
            assert!(state.snake.iter().all(|&cell| grid.in_bounds(cell)));
            assert!(grid.in_bounds(state.food.cell));
            assert!(!state.start());
        }
    }

    #[test]
    fn test_phase_transitions() {
        let mut state = GameState::new(1, Grid::default());
        assert!(!state.pause());
        assert!(state.start());
        assert_eq!(state.phase, Phase::Running);
        assert!(!state.start());
        assert!(state.pause());
        assert_eq!(state.phase, Phase::Paused);
        assert!(state.start());
        assert_eq!(state.phase, Phase::Running);

        state.phase = Phase::GameOver;
        assert!(!state.start());
        assert!(!state.pause());
        assert_eq!(state.phase, Phase::GameOver);
    }

    #[test]
    fn test_same_seed_same_food() {
        let a = GameState::new(42, Grid::default());
        let b = GameState::new(42, Grid::default());
        assert_eq!(a.food, b.food);
    }
}
