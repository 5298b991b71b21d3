#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Day-night and weather cycle that modulates sky, sun, stars and precipitation.
//!
//! The cycle is driven purely by elapsed time. Each weather dwells for a
//! duration drawn from its profile, then blends into its successor at a fixed
//! rate. Snow accumulation is a separate hysteretic state machine that only
//! looks at the current weather.

mod precipitation;
mod profile;
mod snow;

use std::f32::consts::PI;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use risk_rush_core::{GameConfig, Rgb};

pub use precipitation::{
    Droplet, PrecipitationKind, PrecipitationPool, RAIN_CAPACITY, SNOW_CAPACITY,
};
pub use profile::{WeatherKind, WeatherProfile};
pub use snow::{SnowCaps, MAX_SNOW_LEVEL};

use snow::{SnowAccumulation, SnowCapCache};

/// Salt mixed into the session seed so the weather draws from its own stream.
pub const STREAM_SALT: u64 = 0x3ea7_4e55_0000_0003;

const ARC_EDGE: f32 = 0.45;
const SUN_RADIUS: f32 = 30.0;
const SETTING_SUN_RADIUS: f32 = 40.0;

/// Sun disc to draw this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sun {
    /// Centre in screen coordinates.
    pub center: Vec2,
    /// Disc radius.
    pub radius: f32,
    /// Opacity in `0..=1`.
    pub alpha: f32,
}

/// Weather state machine owned by the session loop.
#[derive(Debug)]
pub struct Weather {
    transition_rate: f32,
    area: Vec2,
    horizon: f32,
    current: WeatherKind,
    next: Option<WeatherKind>,
    progress: f32,
    timer: f32,
    duration: f32,
    snow: SnowAccumulation,
    caps: SnowCapCache,
    rain: PrecipitationPool,
    snowfall: PrecipitationPool,
    rng: ChaCha8Rng,
}

impl Weather {
    /// Starts a clear-sky cycle for the session.
    #[must_use]
    pub fn new(config: &GameConfig, seed: u64) -> Self {
        let config = config.normalized();
        let horizon = config.lane_baselines().first().copied().unwrap_or(0.0);
        let mut rng = ChaCha8Rng::seed_from_u64(seed ^ STREAM_SALT);
        let duration = draw_dwell(&mut rng, WeatherKind::Clear);
        Self {
            transition_rate: config.weather.transition_rate,
            area: Vec2::new(config.screen.width, config.screen.height),
            horizon,
            current: WeatherKind::Clear,
            next: None,
            progress: 0.0,
            timer: 0.0,
            duration,
            snow: SnowAccumulation::new(config.weather.snow_dwell),
            caps: SnowCapCache::default(),
            rain: PrecipitationPool::new(PrecipitationKind::Rain),
            snowfall: PrecipitationPool::new(PrecipitationKind::Snow),
            rng,
        }
    }

    /// Advances the cycle, the snow level and both precipitation pools by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        match self.next {
            Some(next) => {
                self.progress += self.transition_rate * dt;
                if self.progress >= 1.0 {
                    log::debug!("weather settled on {}", next.label());
                    self.current = next;
                    self.next = None;
                    self.progress = 0.0;
                    self.timer = 0.0;
                    self.duration = draw_dwell(&mut self.rng, next);
                }
            }
            None => {
                self.timer += dt;
                if self.timer >= self.duration {
                    let next = self.current.successor();
                    log::debug!(
                        "weather turning from {} to {}",
                        self.current.label(),
                        next.label()
                    );
                    self.next = Some(next);
                    self.progress = 0.0;
                }
            }
        }

        if self.snow.update(self.current, dt) {
            log::debug!("snow level now {}", self.snow.level());
        }
        self.caps.refresh(&mut self.rng, self.snow.level());

        let profile = self.current.profile();
        self.rain
            .update(&mut self.rng, profile.rain_chance, self.area, dt);
        self.snowfall
            .update(&mut self.rng, profile.snow_chance, self.area, dt);
    }

    /// Weather currently shown.
    #[must_use]
    pub fn current(&self) -> WeatherKind {
        self.current
    }

    /// Weather being blended in, if a transition is running.
    #[must_use]
    pub fn next(&self) -> Option<WeatherKind> {
        self.next
    }

    /// Blend factor of the running transition in `0..=1`.
    #[must_use]
    pub fn transition_progress(&self) -> f32 {
        self.progress.clamp(0.0, 1.0)
    }

    /// Current snow accumulation level.
    #[must_use]
    pub fn snow_level(&self) -> u8 {
        self.snow.level()
    }

    /// Cached snow cap profile; `None` while no snow lies.
    #[must_use]
    pub fn snow_caps(&self) -> Option<&SnowCaps> {
        self.caps.caps()
    }

    /// Number of times the snow cap profile has been regenerated.
    #[must_use]
    pub fn snow_cap_generations(&self) -> u32 {
        self.caps.generations()
    }

    /// Top and bottom sky colours, blended during transitions.
    #[must_use]
    pub fn sky_colors(&self) -> (Rgb, Rgb) {
        let current = self.current.profile();
        match self.next {
            Some(next) => {
                let next = next.profile();
                let t = self.transition_progress();
                (
                    current.sky_top.lerp(next.sky_top, t),
                    current.sky_bottom.lerp(next.sky_bottom, t),
                )
            }
            None => (current.sky_top, current.sky_bottom),
        }
    }

    /// Star opacity in `0..=1`, blending current and next visibility.
    #[must_use]
    pub fn star_alpha(&self) -> f32 {
        let visibility = |kind: WeatherKind| {
            if kind.profile().stars_visible {
                1.0
            } else {
                0.0
            }
        };
        let current = visibility(self.current);
        match self.next {
            Some(next) => current + (visibility(next) - current) * self.transition_progress(),
            None => current,
        }
    }

    /// Sun disc for this frame; hidden during transitions and sunless weather.
    #[must_use]
    pub fn sun(&self) -> Option<Sun> {
        if self.next.is_some() {
            return None;
        }
        let profile = self.current.profile();
        if !profile.sun_visible {
            return None;
        }

        let t = if self.duration > 0.0 {
            (self.timer / self.duration).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let width = self.area.x;
        let (x, height_fraction, radius, alpha) = match self.current {
            WeatherKind::Clear => (
                width * (0.1 + 0.8 * t),
                ARC_EDGE - (ARC_EDGE - profile.sun_height) * (PI * t).sin(),
                SUN_RADIUS,
                1.0,
            ),
            WeatherKind::Sunset => {
                let alpha = if t < 0.5 { 1.0 } else { 1.0 - (t - 0.5) * 2.0 };
                (
                    width * 0.85,
                    profile.sun_height,
                    SETTING_SUN_RADIUS,
                    alpha,
                )
            }
            WeatherKind::Sunrise => (
                width * (0.05 + 0.25 * t),
                1.0 - (1.0 - profile.sun_height) * (PI * 0.5 * t).sin(),
                SUN_RADIUS,
                1.0,
            ),
            WeatherKind::Night | WeatherKind::Snowy => return None,
        };

        if alpha <= 0.0 {
            return None;
        }
        Some(Sun {
            center: Vec2::new(x, self.horizon * height_fraction),
            radius,
            alpha,
        })
    }

    /// Live rain drops.
    #[must_use]
    pub fn rain(&self) -> &PrecipitationPool {
        &self.rain
    }

    /// Live snowflakes.
    #[must_use]
    pub fn snowfall(&self) -> &PrecipitationPool {
        &self.snowfall
    }
}

fn draw_dwell<R: Rng>(rng: &mut R, kind: WeatherKind) -> f32 {
    let (min, max) = kind.profile().dwell;
    rng.gen_range(min..=max)
}
