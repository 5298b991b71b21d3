//! Screen shake with a linearly decaying amplitude.

use glam::Vec2;
use rand::Rng;

/// Camera offset applied to every drawn element while active.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScreenShake {
    remaining: f32,
    duration: f32,
    intensity: f32,
    offset: Vec2,
}

impl ScreenShake {
    /// Restarts the shake, replacing any shake in progress.
    pub fn trigger(&mut self, duration: f32, intensity: f32) {
        if !(duration.is_finite() && duration > 0.0) {
            return;
        }
        self.remaining = duration;
        self.duration = duration;
        self.intensity = intensity.abs();
    }

    /// Returns `true` while the shake timer is running.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.remaining > 0.0
    }

    /// Current amplitude, shrinking linearly to zero over the shake duration.
    #[must_use]
    pub fn amplitude(&self) -> f32 {
        if self.is_active() {
            self.intensity * self.remaining / self.duration
        } else {
            0.0
        }
    }

    /// Offset chosen on the last update.
    #[must_use]
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Advances the timer and draws a fresh offset inside the current amplitude.
    pub fn update<R: Rng>(&mut self, rng: &mut R, dt: f32) {
        if !self.is_active() {
            self.offset = Vec2::ZERO;
            return;
        }
        self.remaining = (self.remaining - dt).max(0.0);
        let amplitude = self.amplitude();
        self.offset = if amplitude > 0.0 {
            Vec2::new(
                rng.gen_range(-amplitude..=amplitude),
                rng.gen_range(-amplitude..=amplitude),
            )
        } else {
            Vec2::ZERO
        };
    }
}
