use serde::Deserialize;

/// Longest span, in seconds, any timed setting may describe.
pub const MAX_SECONDS: f32 = 1.0e6;

/// Aggregated tuning knobs controlling every adjustable aspect of a session.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Window geometry and frame rate targets.
    pub screen: ScreenConfig,
    /// Lane baselines and the player's horizontal anchor.
    pub track: TrackConfig,
    /// Session clock, health and speed ramp.
    pub session: SessionTuning,
    /// Obstacle and booster spawn cadence.
    pub spawn: SpawnTuning,
    /// Jump physics and cosmetic animation of the player.
    pub player: PlayerTuning,
    /// Weather transition and snow accumulation rates.
    pub weather: WeatherTuning,
}

impl GameConfig {
    /// Returns a copy whose values are clamped into ranges the simulation can honour.
    ///
    /// Loaded files may carry arbitrary numbers; every consumer works on the
    /// normalized copy so invariants such as a non-empty lane set or a positive
    /// spawn floor always hold.
    #[must_use]
    pub fn normalized(&self) -> Self {
        let mut config = self.clone();
        let screen = &mut config.screen;
        screen.width = finite_or(screen.width, 800.0).max(1.0);
        screen.height = finite_or(screen.height, 600.0).max(1.0);
        screen.target_fps = screen.target_fps.max(1);
        screen.max_frame_dt = finite_or(screen.max_frame_dt, 0.05).clamp(0.001, 0.25);

        let track = &mut config.track;
        track.lane_fractions.retain(|fraction| fraction.is_finite());
        if track.lane_fractions.is_empty() {
            track.lane_fractions = TrackConfig::default().lane_fractions;
        }
        track.start_lane = track.start_lane.min(track.lane_fractions.len() - 1);
        track.player_x = finite_or(track.player_x, 150.0);
        track.player_width = finite_or(track.player_width, 35.0).max(1.0);
        track.player_height = finite_or(track.player_height, 55.0).max(1.0);

        let session = &mut config.session;
        session.duration = finite_or(session.duration, 90.0).clamp(0.0, MAX_SECONDS);
        session.max_health = session.max_health.max(1);
        session.initial_speed = finite_or(session.initial_speed, 4.5).max(0.1);
        session.speed_increment = finite_or(session.speed_increment, 0.2).max(0.0);
        session.speed_interval =
            finite_or(session.speed_interval, 10.0).clamp(0.1, MAX_SECONDS);

        let spawn = &mut config.spawn;
        spawn.obstacle_floor = finite_or(spawn.obstacle_floor, 0.5).clamp(0.05, MAX_SECONDS);
        spawn.obstacle_base_delay =
            finite_or(spawn.obstacle_base_delay, 1.8).clamp(spawn.obstacle_floor, MAX_SECONDS);
        spawn.booster_floor = finite_or(spawn.booster_floor, 1.0).clamp(0.05, MAX_SECONDS);
        spawn.booster_base_delay =
            finite_or(spawn.booster_base_delay, 3.96).clamp(spawn.booster_floor, MAX_SECONDS);
        spawn.obstacle_jitter = finite_or(spawn.obstacle_jitter, 0.1).abs();
        spawn.booster_jitter = finite_or(spawn.booster_jitter, 0.2).abs();
        spawn.obstacle_initial_fraction =
            finite_or(spawn.obstacle_initial_fraction, 0.8).clamp(0.0, 1.0);
        spawn.booster_initial_fraction =
            finite_or(spawn.booster_initial_fraction, 0.5).clamp(0.0, 1.0);
        spawn.edge_jitter_min = finite_or(spawn.edge_jitter_min, 50.0).max(0.0);
        spawn.edge_jitter_max =
            finite_or(spawn.edge_jitter_max, 200.0).max(spawn.edge_jitter_min);

        let player = &mut config.player;
        player.jump_power = -finite_or(player.jump_power, -30.0).abs();
        player.gravity = finite_or(player.gravity, 0.4).max(0.01);
        player.max_jump_height = finite_or(player.max_jump_height, 180.0).max(1.0);
        player.thrust_interval = finite_or(player.thrust_interval, 0.02).max(0.001);
        player.tilt_rate = finite_or(player.tilt_rate, 10.0).max(0.0);

        let weather = &mut config.weather;
        weather.transition_rate = finite_or(weather.transition_rate, 0.5).max(0.01);
        weather.snow_dwell = finite_or(weather.snow_dwell, 2.0).max(0.0);

        config
    }

    /// Baseline y coordinates of every lane, top to bottom.
    #[must_use]
    pub fn lane_baselines(&self) -> Vec<f32> {
        self.track
            .lane_fractions
            .iter()
            .map(|fraction| (self.screen.height * fraction).round())
            .collect()
    }
}

fn finite_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}

/// Window geometry and frame pacing targets.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    /// Logical screen width in pixels.
    pub width: f32,
    /// Logical screen height in pixels.
    pub height: f32,
    /// Frame rate the presentation loop paces itself to.
    pub target_fps: u32,
    /// Upper bound applied to each frame's delta time, in seconds.
    pub max_frame_dt: f32,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            target_fps: 60,
            max_frame_dt: 0.05,
        }
    }
}

/// Lane layout and the player's footprint.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct TrackConfig {
    /// Lane baselines expressed as fractions of the screen height.
    pub lane_fractions: Vec<f32>,
    /// Lane the player occupies when a session starts.
    pub start_lane: usize,
    /// Horizontal centre of the player.
    pub player_x: f32,
    /// Width of the player's hitbox.
    pub player_width: f32,
    /// Height of the player's hitbox.
    pub player_height: f32,
}

impl Default for TrackConfig {
    fn default() -> Self {
        Self {
            lane_fractions: vec![0.58, 0.73, 0.88],
            start_lane: 1,
            player_x: 150.0,
            player_width: 35.0,
            player_height: 55.0,
        }
    }
}

/// Session clock, health budget and speed ramp.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct SessionTuning {
    /// Length of a session in seconds; reaching it with health left wins.
    pub duration: f32,
    /// Health the player starts with.
    pub max_health: u32,
    /// World speed at the start of a session, in pixels per frame.
    pub initial_speed: f32,
    /// Amount added to the world speed on every ramp step.
    pub speed_increment: f32,
    /// Seconds between ramp steps.
    pub speed_interval: f32,
}

impl Default for SessionTuning {
    fn default() -> Self {
        Self {
            duration: 90.0,
            max_health: 3,
            initial_speed: 4.5,
            speed_increment: 0.2,
            speed_interval: 10.0,
        }
    }
}

/// Spawn cadence of obstacles and boosters.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct SpawnTuning {
    /// Obstacle delay at the initial world speed, in seconds.
    pub obstacle_base_delay: f32,
    /// Obstacle delay never drops below this value.
    pub obstacle_floor: f32,
    /// Fraction of the obstacle delay already elapsed when a session starts.
    pub obstacle_initial_fraction: f32,
    /// Half-width of the random offset applied when the obstacle timer resets.
    pub obstacle_jitter: f32,
    /// Booster delay at the initial world speed, in seconds.
    pub booster_base_delay: f32,
    /// Booster delay never drops below this value.
    pub booster_floor: f32,
    /// Fraction of the booster delay already elapsed when a session starts.
    pub booster_initial_fraction: f32,
    /// Half-width of the random offset applied when the booster timer resets.
    pub booster_jitter: f32,
    /// Smallest distance beyond the right edge at which entities appear.
    pub edge_jitter_min: f32,
    /// Largest distance beyond the right edge at which entities appear.
    pub edge_jitter_max: f32,
}

impl Default for SpawnTuning {
    fn default() -> Self {
        Self {
            obstacle_base_delay: 1.8,
            obstacle_floor: 0.5,
            obstacle_initial_fraction: 0.8,
            obstacle_jitter: 0.1,
            booster_base_delay: 1.8 * 2.2,
            booster_floor: 1.0,
            booster_initial_fraction: 0.5,
            booster_jitter: 0.2,
            edge_jitter_min: 50.0,
            edge_jitter_max: 200.0,
        }
    }
}

/// Jump physics and cosmetic animation of the player.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    /// Initial vertical velocity of a jump in pixels per frame; negative is up.
    pub jump_power: f32,
    /// Vertical acceleration added every frame while airborne.
    pub gravity: f32,
    /// Largest height above the lane baseline the player may reach.
    pub max_jump_height: f32,
    /// Seconds between jetpack exhaust emissions.
    pub thrust_interval: f32,
    /// Rate at which the tilt follows its target, per second.
    pub tilt_rate: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            jump_power: -30.0,
            gravity: 0.4,
            max_jump_height: 180.0,
            thrust_interval: 0.02,
            tilt_rate: 10.0,
        }
    }
}

/// Weather transition and snow accumulation rates.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct WeatherTuning {
    /// Transition progress gained per second while blending between weathers.
    pub transition_rate: f32,
    /// Seconds of sustained snowy or sunrise weather before the snow level moves.
    pub snow_dwell: f32,
}

impl Default for WeatherTuning {
    fn default() -> Self {
        Self {
            transition_rate: 0.5,
            snow_dwell: 2.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oversized_spans_are_clamped_to_representable_durations() {
        let mut config = GameConfig::default();
        config.session.duration = 1.0e30;
        config.session.speed_interval = f32::MAX;
        config.spawn.obstacle_base_delay = 1.0e20;
        config.spawn.booster_floor = 1.0e25;

        let config = config.normalized();
        assert_eq!(config.session.duration, MAX_SECONDS);
        assert_eq!(config.session.speed_interval, MAX_SECONDS);
        assert_eq!(config.spawn.obstacle_base_delay, MAX_SECONDS);
        assert_eq!(config.spawn.booster_floor, MAX_SECONDS);
        assert_eq!(config.spawn.booster_base_delay, MAX_SECONDS);
        assert_eq!(
            std::time::Duration::from_secs_f32(config.session.duration).as_secs(),
            1_000_000
        );
    }

    #[test]
    fn defaults_place_lanes_on_standard_baselines() {
        let config = GameConfig::default();
        assert_eq!(config.lane_baselines(), vec![348.0, 438.0, 528.0]);
        assert_eq!(config.track.start_lane, 1);
        assert!((config.spawn.booster_base_delay - 3.96).abs() < 1e-5);
    }

    #[test]
    fn partial_toml_overrides_only_named_fields() {
        let config: GameConfig = toml::from_str(
            r#"
            [session]
            duration = 30.0
            max_health = 5
            "#,
        )
        .expect("valid toml");

        assert_eq!(config.session.duration, 30.0);
        assert_eq!(config.session.max_health, 5);
        assert_eq!(config.session.initial_speed, 4.5);
        assert_eq!(config.screen, ScreenConfig::default());
    }

    #[test]
    fn normalization_repairs_degenerate_values() {
        let mut config = GameConfig::default();
        config.track.lane_fractions.clear();
        config.track.start_lane = 9;
        config.session.max_health = 0;
        config.spawn.obstacle_floor = f32::NAN;
        config.spawn.obstacle_base_delay = 0.0;
        config.player.jump_power = 12.0;

        let normalized = config.normalized();
        assert_eq!(normalized.track.lane_fractions.len(), 3);
        assert_eq!(normalized.track.start_lane, 2);
        assert_eq!(normalized.session.max_health, 1);
        assert_eq!(normalized.spawn.obstacle_floor, 0.5);
        assert_eq!(normalized.spawn.obstacle_base_delay, 0.5);
        assert_eq!(normalized.player.jump_power, -12.0);
    }
}
