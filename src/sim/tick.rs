//! Fixed-interval simulation tick
//!
//! Advances the snake one cell, resolves collisions and consumption, then lets
//! the food take its own turn.

use glam::IVec2;

use super::grid::Grid;
use super::state::{Collision, GameState, Phase};

/// What happened during a tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// Cell where food was eaten
    pub ate: Option<IVec2>,
    /// Collision that ended the run
    pub collision: Option<Collision>,
    /// Food wandered to a new cell
    pub food_moved: bool,
}

/// Advance the session by one snake step. No-op unless running.
pub fn tick(state: &mut GameState) -> TickOutcome {
    let mut outcome = TickOutcome::default();
    if state.phase != Phase::Running {
        return outcome;
    }

    state.time_ticks += 1;

    if let Some(dir) = state.queue.drain() {
        state.direction = dir;
    }

    let new_head = state.head() + state.direction.offset();

    // The tail still counts as occupied: it has not moved yet
    let collision = if !state.grid.in_bounds(new_head) {
        Some(Collision::Wall)
    } else if state.is_occupied(new_head) {
        Some(Collision::SelfCollision)
    } else {
        None
    };
    if let Some(kind) = collision {
        state.phase = Phase::GameOver;
        outcome.collision = Some(kind);
        log::info!(
            "Game over ({:?}) at {:?}, score {}",
            kind,
            new_head,
            state.score
        );
        return outcome;
    }

    state.snake.push_front(new_head);

    if Grid::equals(new_head, state.food.cell) {
        state.score += 1;
        let origin = Grid::cell_center(state.food.cell);
        let spawned = state
            .particles
            .spawn_burst(origin, state.burst_size, &mut state.rng);
        log::debug!(
            "Ate food at {:?}, score {}, {} particles",
            new_head,
            state.score,
            spawned
        );
        state.respawn_food();
        outcome.ate = Some(new_head);
    } else {
        state.snake.pop_back();
    }

    outcome.food_moved = state
        .food
        .on_tick(&state.grid, &state.snake, &mut state.rng);

    outcome
}
