#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic spawning system responsible for emitting obstacle and booster spawn commands.
//!
//! Spawn cadence compresses as the world speeds up: every speed step
//! recomputes the delays as `max(floor, base_delay * initial_speed / world_speed)`.
//! Timers reset with a small random offset so arrivals never look periodic.

use std::time::Duration;

use rand::{seq::SliceRandom, Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use risk_rush_core::{Command, Event, GameConfig, GameState, PolicyKind, RiskKind, SpawnTuning};

/// Salt mixed into the session seed so spawning draws from its own stream.
pub const STREAM_SALT: u64 = 0x5a17_0b57_ac1e_0001;

const BOOSTER_DELAY_RATIO: f32 = 2.0;

/// Configuration parameters required to construct the spawning system.
#[derive(Clone, Debug)]
pub struct Config {
    tuning: SpawnTuning,
    initial_speed: f32,
    lane_count: usize,
    spawn_edge: f32,
    rng_seed: u64,
}

impl Config {
    /// Derives the spawning configuration from the session tuning and seed.
    #[must_use]
    pub fn new(config: &GameConfig, rng_seed: u64) -> Self {
        let config = config.normalized();
        Self {
            tuning: config.spawn,
            initial_speed: config.session.initial_speed,
            lane_count: config.track.lane_fractions.len(),
            spawn_edge: config.screen.width,
            rng_seed,
        }
    }
}

/// Pure system that deterministically emits spawn commands while a session is playing.
#[derive(Debug)]
pub struct Spawning {
    tuning: SpawnTuning,
    initial_speed: f32,
    lane_count: usize,
    spawn_edge: f32,
    obstacle_delay: f32,
    booster_delay: f32,
    obstacle_timer: f32,
    booster_timer: f32,
    rng: ChaCha8Rng,
}

impl Spawning {
    /// Creates a new spawning system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        let tuning = config.tuning;
        Self {
            obstacle_delay: tuning.obstacle_base_delay,
            booster_delay: tuning.booster_base_delay,
            obstacle_timer: tuning.obstacle_base_delay * tuning.obstacle_initial_fraction,
            booster_timer: tuning.booster_base_delay * tuning.booster_initial_fraction,
            initial_speed: config.initial_speed,
            lane_count: config.lane_count,
            spawn_edge: config.spawn_edge,
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed ^ STREAM_SALT),
            tuning,
        }
    }

    /// Current delay between obstacle spawns.
    #[must_use]
    pub fn obstacle_delay(&self) -> Duration {
        Duration::from_secs_f32(self.obstacle_delay)
    }

    /// Current delay between booster spawns.
    #[must_use]
    pub fn booster_delay(&self) -> Duration {
        Duration::from_secs_f32(self.booster_delay)
    }

    /// Consumes world events and emits spawn commands for the elapsed time.
    pub fn handle(&mut self, events: &[Event], game_state: GameState, out: &mut Vec<Command>) {
        if game_state != GameState::Playing || self.lane_count == 0 {
            return;
        }

        for event in events {
            if let Event::SpeedIncreased { world_speed } = event {
                self.retune(*world_speed);
            }
        }

        for event in events {
            let Event::TimeAdvanced { dt } = event else {
                continue;
            };
            let seconds = dt.as_secs_f32();

            self.obstacle_timer += seconds;
            if self.obstacle_timer >= self.obstacle_delay {
                out.push(self.next_obstacle());
                self.obstacle_timer = self.jitter(self.tuning.obstacle_jitter);
            }

            self.booster_timer += seconds;
            if self.booster_timer >= self.booster_delay {
                out.push(self.next_booster());
                self.booster_timer = self.jitter(self.tuning.booster_jitter);
            }
        }
    }

    fn retune(&mut self, world_speed: f32) {
        if !(world_speed.is_finite() && world_speed > 0.0) {
            return;
        }
        let scaled = self.tuning.obstacle_base_delay * self.initial_speed / world_speed;
        self.obstacle_delay = scaled.max(self.tuning.obstacle_floor);
        self.booster_delay = (self.obstacle_delay * BOOSTER_DELAY_RATIO).max(self.tuning.booster_floor);
        log::debug!(
            "spawn delays retuned to {:.2}s / {:.2}s at speed {:.2}",
            self.obstacle_delay,
            self.booster_delay,
            world_speed
        );
    }

    fn next_obstacle(&mut self) -> Command {
        let risk = RiskKind::ALL
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(RiskKind::Tree);
        let lane = self.rng.gen_range(0..self.lane_count);
        let x = self.spawn_x();
        Command::SpawnObstacle { risk, lane, x }
    }

    fn next_booster(&mut self) -> Command {
        let policy = PolicyKind::ALL
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(PolicyKind::Travel);
        let lane = self.rng.gen_range(0..self.lane_count);
        let x = self.spawn_x();
        Command::SpawnBooster { policy, lane, x }
    }

    fn spawn_x(&mut self) -> f32 {
        let offset = self
            .rng
            .gen_range(self.tuning.edge_jitter_min..=self.tuning.edge_jitter_max);
        self.spawn_edge + offset
    }

    fn jitter(&mut self, half_width: f32) -> f32 {
        self.rng.gen_range(-half_width..=half_width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spawning() -> Spawning {
        Spawning::new(Config::new(&GameConfig::default(), 7))
    }

    #[test]
    fn initial_delays_follow_base_tuning() {
        let spawning = spawning();
        assert!((spawning.obstacle_delay - 1.8).abs() < 1e-6);
        assert!((spawning.booster_delay - 3.96).abs() < 1e-5);
        assert!((spawning.obstacle_timer - 1.44).abs() < 1e-5);
        assert!((spawning.booster_timer - 1.98).abs() < 1e-5);
    }

    #[test]
    fn speed_step_compresses_delays() {
        let mut spawning = spawning();
        spawning.retune(9.0);
        assert!((spawning.obstacle_delay - 0.9).abs() < 1e-6);
        assert!((spawning.booster_delay - 1.8).abs() < 1e-6);
    }

    #[test]
    fn delays_respect_floors_at_extreme_speed() {
        let mut spawning = spawning();
        spawning.retune(1_000.0);
        assert_eq!(spawning.obstacle_delay, 0.5);
        assert_eq!(spawning.booster_delay, 1.0);
    }

    #[test]
    fn non_positive_speed_is_ignored() {
        let mut spawning = spawning();
        spawning.retune(0.0);
        spawning.retune(f32::NAN);
        assert!((spawning.obstacle_delay - 1.8).abs() < 1e-6);
    }

    #[test]
    fn jitter_stays_within_half_width() {
        let mut spawning = spawning();
        for _ in 0..256 {
            let value = spawning.jitter(0.1);
            assert!((-0.1..=0.1).contains(&value));
        }
    }
}
