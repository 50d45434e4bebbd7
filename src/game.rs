//! Tick scheduler
//!
//! Bridges variable-rate render signals to fixed-interval simulation steps.
//! The host calls `advance` (or `frame`) once per rendered frame; particles
//! animate every signal while the snake steps at most once per signal.

use std::collections::VecDeque;

use glam::IVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::consts::*;
use crate::highscores::HighScore;
use crate::persistence::ScoreStore;
use crate::settings::Settings;
use crate::sim::{Direction, GameState, Particle, ParticleSystem, Phase, TickOutcome, tick};

/// Commands accepted from the input layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Turn(Direction),
    Start,
    Pause,
    TogglePause,
    Restart,
}

/// Read-only view of the session handed to the renderer each signal
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Snapshot<'a> {
    /// Segments, head first
    pub snake: &'a VecDeque<IVec2>,
    pub direction: Direction,
    pub food: IVec2,
    pub particles: &'a [Particle],
    pub score: u64,
    pub high_score: u64,
    pub phase: Phase,
    pub ticks: u64,
}

/// Rendering collaborator
pub trait Render {
    fn render(&mut self, snapshot: &Snapshot<'_>);
}

/// Game instance holding the live session
pub struct Game<S: ScoreStore> {
    state: GameState,
    settings: Settings,
    high_score: HighScore<S>,
    /// Last value reported by the high score tracker
    high: u64,
    accumulator_ms: f32,
    tick_interval_ms: f32,
    /// Host timestamp of the previous `frame` call (ms)
    last_time: Option<f64>,
    /// Source of per-session seeds
    seeds: Pcg32,
}

impl<S: ScoreStore> Game<S> {
    /// Create a game with an idle session
    pub fn new(settings: Settings, store: S) -> Self {
        let base_seed = settings.seed.unwrap_or_else(rand::random);
        log::info!("Game created with seed: {}", base_seed);

        let mut seeds = Pcg32::seed_from_u64(base_seed);
        let state = Self::new_session(&settings, &mut seeds);
        let tick_interval_ms = settings.tick_interval_ms();

        let mut game = Self {
            state,
            settings,
            high_score: HighScore::new(store),
            high: 0,
            accumulator_ms: 0.0,
            tick_interval_ms,
            last_time: None,
            seeds,
        };
        game.high = game.high_score.record(0);
        game
    }

    fn new_session(settings: &Settings, seeds: &mut Pcg32) -> GameState {
        let seed = seeds.random::<u64>();
        let particles = ParticleSystem::with_capacity(settings.max_particles());
        GameState::with_particles(seed, settings.grid(), particles)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn high_score(&self) -> u64 {
        self.high
    }

    pub fn tick_interval_ms(&self) -> f32 {
        self.tick_interval_ms
    }

    /// Change snake speed (cells/s, clamped); applies from the next signal
    pub fn set_speed(&mut self, cells_per_second: u32) {
        self.settings.speed = crate::clamp_speed(cells_per_second);
        self.tick_interval_ms = self.settings.tick_interval_ms();
        log::info!(
            "Speed set to {} cells/s ({:.1} ms/tick)",
            self.settings.speed,
            self.tick_interval_ms
        );
    }

    /// Apply one input command
    pub fn handle(&mut self, command: Command) {
        match command {
            Command::Turn(direction) => {
                if !self.state.enqueue(direction) {
                    log::trace!("Ignored turn {:?}", direction);
                }
            }
            Command::Start => self.start(),
            Command::Pause => {
                if self.state.pause() {
                    log::info!("Paused at tick {}", self.state.time_ticks);
                }
            }
            Command::TogglePause => match self.state.phase {
                Phase::Running => self.handle(Command::Pause),
                Phase::Idle | Phase::Paused => self.start(),
                Phase::GameOver => {}
            },
            Command::Restart => self.restart(),
        }
    }

    fn start(&mut self) {
        if self.state.start() {
            // Time spent idle or paused never counts toward a step
            self.accumulator_ms = 0.0;
            log::info!("Running (seed {})", self.state.seed);
        }
    }

    /// Replace the session with a fresh idle one
    pub fn reset(&mut self) {
        self.state = Self::new_session(&self.settings, &mut self.seeds);
        self.accumulator_ms = 0.0;
        self.high = self.high_score.record(self.state.score);
        log::info!("Session reset with seed: {}", self.state.seed);
    }

    /// Fresh session, immediately running
    pub fn restart(&mut self) {
        self.reset();
        self.start();
    }

    /// Advance by `elapsed` seconds of real time and return the frame snapshot
    pub fn advance(&mut self, elapsed: f32) -> Snapshot<'_> {
        let dt = if elapsed.is_finite() {
            elapsed.clamp(0.0, MAX_FRAME_DT)
        } else {
            0.0
        };

        self.state.particles.update(dt);

        if self.state.phase == Phase::Running {
            self.accumulator_ms += dt * 1000.0;
            if self.accumulator_ms >= self.tick_interval_ms {
                self.accumulator_ms -= self.tick_interval_ms;
                // One step per signal at most; drop any backlog
                if self.accumulator_ms >= self.tick_interval_ms {
                    self.accumulator_ms = 0.0;
                }
                self.step();
            }
        }

        self.snapshot()
    }

    /// Advance using a host timestamp in milliseconds
    pub fn frame(&mut self, now_ms: f64) -> Snapshot<'_> {
        let elapsed = match self.last_time {
            Some(last) => ((now_ms - last) / 1000.0) as f32,
            None => 1.0 / REFERENCE_FPS,
        };
        self.last_time = Some(now_ms);
        self.advance(elapsed)
    }

    /// Advance and hand the snapshot to a renderer
    pub fn signal<R: Render + ?Sized>(&mut self, elapsed: f32, renderer: &mut R) {
        let snapshot = self.advance(elapsed);
        renderer.render(&snapshot);
    }

    fn step(&mut self) -> TickOutcome {
        let outcome = tick(&mut self.state);
        if outcome.food_moved {
            log::trace!("Food wandered to {:?}", self.state.food.cell);
        }
        if outcome.ate.is_some() {
            self.high = self.high_score.record(self.state.score);
        }
        if outcome.collision.is_some() {
            log::info!(
                "Final score {} (high {}) after {} ticks",
                self.state.score,
                self.high,
                self.state.time_ticks
            );
        }
        outcome
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            snake: &self.state.snake,
            direction: self.state.direction,
            food: self.state.food.cell,
            particles: self.state.particles.as_slice(),
            score: self.state.score,
            high_score: self.high,
            phase: self.state.phase,
            ticks: self.state.time_ticks,
        }
    }
}
