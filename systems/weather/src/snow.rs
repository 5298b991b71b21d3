use rand::Rng;

use crate::WeatherKind;

/// Highest snow accumulation level.
pub const MAX_SNOW_LEVEL: u8 = 2;

const CAP_SAMPLES: usize = 24;
const CAP_DEPTH_PER_LEVEL: f32 = 4.0;
const CAP_BUMP_PER_LEVEL: f32 = 3.0;

/// Hysteretic snow level that moves by one step per sustained dwell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct SnowAccumulation {
    level: u8,
    dwell: f32,
    timer: f32,
}

impl SnowAccumulation {
    pub(crate) fn new(dwell: f32) -> Self {
        Self {
            level: 0,
            dwell,
            timer: 0.0,
        }
    }

    pub(crate) fn level(&self) -> u8 {
        self.level
    }

    /// Advances the dwell timer; returns `true` when the level changed.
    pub(crate) fn update(&mut self, weather: WeatherKind, dt: f32) -> bool {
        let step: i8 = match weather {
            WeatherKind::Snowy if self.level < MAX_SNOW_LEVEL => 1,
            WeatherKind::Sunrise if self.level > 0 => -1,
            _ => {
                self.timer = 0.0;
                return false;
            }
        };

        self.timer += dt;
        if self.timer < self.dwell {
            return false;
        }
        self.timer = 0.0;
        self.level = self.level.saturating_add_signed(step).min(MAX_SNOW_LEVEL);
        true
    }
}

/// Procedural drift profile drawn along building tops and the ground edge.
#[derive(Clone, Debug, PartialEq)]
pub struct SnowCaps {
    level: u8,
    depths: Vec<f32>,
}

impl SnowCaps {
    /// Snow level the profile was generated for.
    #[must_use]
    pub fn level(&self) -> u8 {
        self.level
    }

    /// Cap depth at evenly spaced samples across a unit width.
    #[must_use]
    pub fn depths(&self) -> &[f32] {
        &self.depths
    }

    /// Cap depth at `t` in `0..=1`, linearly interpolated between samples.
    #[cfg(test)]
    fn depth_at(&self, t: f32) -> f32 {
        let Some(last) = self.depths.len().checked_sub(1) else {
            return 0.0;
        };
        let scaled = t.clamp(0.0, 1.0) * last as f32;
        let index = (scaled.floor() as usize).min(last);
        let next = (index + 1).min(last);
        let blend = scaled - index as f32;
        self.depths[index] + (self.depths[next] - self.depths[index]) * blend
    }
}

/// Cache of the snow cap profile keyed by snow level.
#[derive(Clone, Debug, Default)]
pub(crate) struct SnowCapCache {
    caps: Option<SnowCaps>,
    generations: u32,
}

impl SnowCapCache {
    /// Regenerates the profile only when `level` differs from the cached level.
    pub(crate) fn refresh<R: Rng>(&mut self, rng: &mut R, level: u8) {
        if self.caps.as_ref().map(SnowCaps::level) == Some(level) {
            return;
        }
        self.generations = self.generations.wrapping_add(1);
        let depths = if level == 0 {
            Vec::new()
        } else {
            let base = f32::from(level) * CAP_DEPTH_PER_LEVEL;
            let bump = f32::from(level) * CAP_BUMP_PER_LEVEL;
            (0..CAP_SAMPLES)
                .map(|_| base + rng.gen_range(0.0..=bump))
                .collect()
        };
        self.caps = Some(SnowCaps { level, depths });
    }

    pub(crate) fn caps(&self) -> Option<&SnowCaps> {
        self.caps.as_ref().filter(|caps| caps.level > 0)
    }

    pub(crate) fn generations(&self) -> u32 {
        self.generations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn level_rises_one_step_per_dwell() {
        let mut snow = SnowAccumulation::new(2.0);
        assert!(!snow.update(WeatherKind::Snowy, 1.5));
        assert!(snow.update(WeatherKind::Snowy, 0.5));
        assert_eq!(snow.level(), 1);
        assert!(!snow.update(WeatherKind::Snowy, 1.0));
        assert!(snow.update(WeatherKind::Snowy, 1.0));
        assert_eq!(snow.level(), 2);
        assert!(!snow.update(WeatherKind::Snowy, 10.0));
        assert_eq!(snow.level(), 2);
    }

    #[test]
    fn interrupted_dwell_restarts() {
        let mut snow = SnowAccumulation::new(2.0);
        assert!(!snow.update(WeatherKind::Snowy, 1.5));
        assert!(!snow.update(WeatherKind::Night, 0.1));
        assert!(!snow.update(WeatherKind::Snowy, 1.5));
        assert_eq!(snow.level(), 0);
    }

    #[test]
    fn sunrise_melts_one_step_at_a_time() {
        let mut snow = SnowAccumulation::new(2.0);
        let _ = snow.update(WeatherKind::Snowy, 2.0);
        let _ = snow.update(WeatherKind::Snowy, 2.0);
        assert!(snow.update(WeatherKind::Sunrise, 5.0));
        assert_eq!(snow.level(), 1);
        assert!(snow.update(WeatherKind::Sunrise, 2.0));
        assert_eq!(snow.level(), 0);
        assert!(!snow.update(WeatherKind::Sunrise, 2.0));
    }

    #[test]
    fn depth_interpolates_between_samples() {
        let caps = SnowCaps {
            level: 1,
            depths: vec![0.0, 4.0, 8.0],
        };
        assert_eq!(caps.depth_at(0.25), 2.0);
        assert_eq!(caps.depth_at(1.0), 8.0);
        assert_eq!(caps.depth_at(-3.0), 0.0);
        assert_eq!(
            SnowCaps {
                level: 0,
                depths: Vec::new()
            }
            .depth_at(0.5),
            0.0
        );
    }

    #[test]
    fn cache_regenerates_only_on_level_change() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut cache = SnowCapCache::default();
        cache.refresh(&mut rng, 0);
        assert!(cache.caps().is_none());
        assert_eq!(cache.generations(), 1);

        cache.refresh(&mut rng, 1);
        let first = cache.caps().cloned().expect("caps at level 1");
        cache.refresh(&mut rng, 1);
        assert_eq!(cache.generations(), 2);
        assert_eq!(cache.caps(), Some(&first));

        cache.refresh(&mut rng, 2);
        assert_eq!(cache.generations(), 3);
        assert!(cache.caps().is_some_and(|caps| caps.depth_at(0.5) >= 8.0));
    }
}
