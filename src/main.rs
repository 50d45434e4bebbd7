//! Snake Core headless driver
//!
//! Runs the scheduler at a fixed 60 Hz signal rate with a scripted route and
//! logs what a renderer would see. Usage: `snake-core [settings.json] [seconds]`

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::PathBuf;

    use snake_core::consts::REFERENCE_FPS;
    use snake_core::sim::{Direction, Phase};
    use snake_core::{Command, Game, JsonFileStore, Render, Settings, Snapshot};

    /// Logs a one-line summary whenever something visible changes
    struct LogRenderer {
        last_score: u64,
        last_phase: Option<Phase>,
        peak_particles: usize,
    }

    impl Render for LogRenderer {
        fn render(&mut self, snapshot: &Snapshot<'_>) {
            self.peak_particles = self.peak_particles.max(snapshot.particles.len());
            if snapshot.score != self.last_score || self.last_phase != Some(snapshot.phase) {
                log::info!(
                    "tick {:>5} | {:?} | score {} (high {}) | head {:?} | food {:?} | {} particles",
                    snapshot.ticks,
                    snapshot.phase,
                    snapshot.score,
                    snapshot.high_score,
                    snapshot.snake.front(),
                    snapshot.food,
                    snapshot.particles.len()
                );
                self.last_score = snapshot.score;
                self.last_phase = Some(snapshot.phase);
            }
        }
    }

    /// Clockwise loop: turn every `side` ticks
    fn route(side: u64) -> impl Fn(u64) -> Option<Direction> {
        move |tick| {
            if tick == 0 || tick % side != 0 {
                return None;
            }
            Some(match (tick / side) % 4 {
                1 => Direction::Down,
                2 => Direction::Left,
                3 => Direction::Up,
                _ => Direction::Right,
            })
        }
    }

    pub fn run() {
        let mut args = std::env::args().skip(1);
        let settings = match args.next() {
            Some(path) => Settings::load_from(&PathBuf::from(path)),
            None => Settings::default(),
        };
        let seconds: f32 = args.next().and_then(|s| s.parse().ok()).unwrap_or(30.0);

        let store = JsonFileStore::new("snake_scores.json");
        let mut game = Game::new(settings, store);
        let mut renderer = LogRenderer {
            last_score: 0,
            last_phase: None,
            peak_particles: 0,
        };

        let side = (game.state().grid.columns / 3).max(2) as u64;
        let turn_at = route(side);
        let dt = 1.0 / REFERENCE_FPS;
        let frames = (seconds * REFERENCE_FPS) as u64;
        let mut last_tick = 0;

        game.handle(Command::Start);
        for _ in 0..frames {
            let ticks = game.state().time_ticks;
            if ticks != last_tick {
                last_tick = ticks;
                if let Some(dir) = turn_at(ticks) {
                    game.handle(Command::Turn(dir));
                }
            }
            game.signal(dt, &mut renderer);
            if game.phase() == Phase::GameOver {
                break;
            }
        }

        let snapshot = game.snapshot();
        log::info!(
            "Finished: {:?}, score {}, high {}, {} ticks, peak {} particles",
            snapshot.phase,
            snapshot.score,
            snapshot.high_score,
            snapshot.ticks,
            renderer.peak_particles
        );
        match serde_json::to_string(&snapshot) {
            Ok(json) => println!("{}", json),
            Err(e) => log::error!("Failed to serialize snapshot: {}", e),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Snake Core (headless) starting...");
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The web host drives `Game` through the library; nothing to run here
}
