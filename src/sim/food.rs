//! Wandering food
//!
//! The food keeps a heading of its own and moves on a slower cadence than the
//! snake. When its path is blocked it picks a random free neighbor, and when
//! boxed in completely it waits.

use std::collections::VecDeque;

use glam::IVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::grid::{Direction, Grid};
use crate::consts::FOOD_MOVE_INTERVAL;

/// The single food entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Food {
    pub cell: IVec2,
    pub heading: Direction,
    /// Snake ticks since the food last moved (or was placed)
    pub ticks: u32,
}

fn occupied(snake: &VecDeque<IVec2>, cell: IVec2) -> bool {
    snake.iter().any(|&seg| seg == cell)
}

fn random_heading<R: Rng>(rng: &mut R) -> Direction {
    Direction::ALL[rng.random_range(0..Direction::ALL.len())]
}

/// Pick a uniformly random cell not covered by the snake.
///
/// Rejection sampling first; after `4 × cell_count` misses the free cells are
/// enumerated instead. Returns `None` when the snake fills the grid.
pub fn random_free_cell<R: Rng>(grid: &Grid, snake: &VecDeque<IVec2>, rng: &mut R) -> Option<IVec2> {
    let attempts = grid.cell_count().saturating_mul(4);
    for _ in 0..attempts {
        let cell = IVec2::new(
            rng.random_range(0..grid.columns),
            rng.random_range(0..grid.rows),
        );
        if !occupied(snake, cell) {
            return Some(cell);
        }
    }

    let free: Vec<IVec2> = grid.cells().filter(|&c| !occupied(snake, c)).collect();
    if free.is_empty() {
        None
    } else {
        Some(free[rng.random_range(0..free.len())])
    }
}

impl Food {
    /// Place new food on a free cell with a fresh heading.
    /// `fallback` is kept when no cell is free.
    pub fn spawn<R: Rng>(grid: &Grid, snake: &VecDeque<IVec2>, fallback: IVec2, rng: &mut R) -> Self {
        let cell = random_free_cell(grid, snake, rng).unwrap_or_else(|| {
            log::warn!("No free cell for food, grid is full");
            fallback
        });
        Self {
            cell,
            heading: random_heading(rng),
            ticks: 0,
        }
    }

    /// Count one snake tick; moves the food every `FOOD_MOVE_INTERVAL` ticks.
    /// Returns true if the food changed cell.
    pub fn on_tick<R: Rng>(&mut self, grid: &Grid, snake: &VecDeque<IVec2>, rng: &mut R) -> bool {
        self.ticks += 1;
        if self.ticks < FOOD_MOVE_INTERVAL {
            return false;
        }
        self.ticks = 0;
        self.wander(grid, snake, rng)
    }

    /// One movement attempt, ignoring cadence
    pub fn wander<R: Rng>(&mut self, grid: &Grid, snake: &VecDeque<IVec2>, rng: &mut R) -> bool {
        let free = |cell: IVec2| grid.in_bounds(cell) && !occupied(snake, cell);

        let ahead = self.cell + self.heading.offset();
        if free(ahead) {
            self.cell = ahead;
            return true;
        }

        let options: Vec<IVec2> = Grid::neighbors(self.cell)
            .into_iter()
            .filter(|&cell| free(cell))
            .collect();
        if options.is_empty() {
            // Trapped: stay put until something opens up
            return false;
        }

        let next = options[rng.random_range(0..options.len())];
        if let Some(dir) = Direction::from_offset(next - self.cell) {
            self.heading = dir;
        }
        self.cell = next;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn snake(cells: &[(i32, i32)]) -> VecDeque<IVec2> {
        cells.iter().map(|&(x, y)| IVec2::new(x, y)).collect()
    }

    #[test]
    fn test_moves_only_on_cadence() {
        let mut rng = Pcg32::seed_from_u64(3);
        let grid = Grid::new(10, 10);
        let body = snake(&[(0, 0)]);
        let mut food = Food {
            cell: IVec2::new(5, 5),
            heading: Direction::Right,
            ticks: 0,
        };

        for _ in 0..FOOD_MOVE_INTERVAL - 1 {
            assert!(!food.on_tick(&grid, &body, &mut rng));
            assert_eq!(food.cell, IVec2::new(5, 5));
        }
        assert!(food.on_tick(&grid, &body, &mut rng));
        assert_eq!(food.cell, IVec2::new(6, 5));
        assert_eq!(food.ticks, 0);
    }

    #[test]
    fn test_keeps_heading_when_clear() {
        let mut rng = Pcg32::seed_from_u64(3);
        let grid = Grid::new(10, 10);
        let body = snake(&[(0, 0)]);
        let mut food = Food {
            cell: IVec2::new(5, 5),
            heading: Direction::Up,
            ticks: 0,
        };

        assert!(food.wander(&grid, &body, &mut rng));
        assert_eq!(food.cell, IVec2::new(5, 4));
        assert_eq!(food.heading, Direction::Up);
    }

    #[test]
    fn test_turns_at_wall() {
        let grid = Grid::new(10, 10);
        let body = snake(&[(0, 0)]);

        for seed in 0..20 {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut food = Food {
                cell: IVec2::new(9, 5),
                heading: Direction::Right,
                ticks: 0,
            };
            assert!(food.wander(&grid, &body, &mut rng));
            assert!(grid.in_bounds(food.cell));
            assert_ne!(food.heading, Direction::Right);
            assert_eq!(food.cell, IVec2::new(9, 5) + food.heading.offset());
        }
    }

    #[test]
    fn test_avoids_snake() {
        let grid = Grid::new(10, 10);
        // Snake blocks right and up; only left and down remain
        let body = snake(&[(6, 5), (6, 4), (5, 4)]);

        for seed in 0..20 {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut food = Food {
                cell: IVec2::new(5, 5),
                heading: Direction::Right,
                ticks: 0,
            };
            assert!(food.wander(&grid, &body, &mut rng));
            assert!(matches!(food.heading, Direction::Left | Direction::Down));
            assert!(!body.contains(&food.cell));
        }
    }

    #[test]
    fn test_trapped_stays_put() {
        let mut rng = Pcg32::seed_from_u64(9);
        let grid = Grid::new(10, 10);
        // Corner cell boxed in by the snake
        let body = snake(&[(1, 0), (1, 1), (0, 1)]);
        let mut food = Food {
            cell: IVec2::new(0, 0),
            heading: Direction::Left,
            ticks: 0,
        };

        assert!(!food.wander(&grid, &body, &mut rng));
        assert_eq!(food.cell, IVec2::new(0, 0));
        assert_eq!(food.heading, Direction::Left);
    }

    #[test]
    fn test_spawn_avoids_snake() {
        let mut rng = Pcg32::seed_from_u64(11);
        let grid = Grid::new(3, 3);
        let body = snake(&[(0, 0), (1, 0), (2, 0), (2, 1), (1, 1), (0, 1), (0, 2), (1, 2)]);

        let food = Food::spawn(&grid, &body, IVec2::ZERO, &mut rng);
        assert_eq!(food.cell, IVec2::new(2, 2));
        assert_eq!(food.ticks, 0);
    }

    #[test]
    fn test_full_grid_has_no_free_cell() {
        let mut rng = Pcg32::seed_from_u64(11);
        let grid = Grid::new(2, 1);
        let body = snake(&[(0, 0), (1, 0)]);

        assert_eq!(random_free_cell(&grid, &body, &mut rng), None);
        let food = Food::spawn(&grid, &body, IVec2::new(1, 0), &mut rng);
        assert_eq!(food.cell, IVec2::new(1, 0));
    }
}
