#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Cosmetic effects driven by world events: particles, screen shake and toasts.
//!
//! The [`Effects`] aggregate is owned by the session loop. It never mutates
//! the world; it only reacts to the events the world broadcasts.

mod particles;
mod shake;
mod toast;

use glam::Vec2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use risk_rush_core::{Event, Rgb};

pub use particles::{Explosion, Particle, ParticlePool, PARTICLE_CAPACITY};
pub use shake::ScreenShake;
pub use toast::{
    activation_text, saved_text, tip_text, ToastFeed, ToastView, ACTIVATION_SECONDS, FADE_RATE,
    LOSS_SECONDS, LOSS_TEXT, SAVED_SECONDS, TIP_SECONDS,
};

/// Salt mixed into the session seed so effects draw from their own stream.
pub const STREAM_SALT: u64 = 0xeffe_c750_0000_0002;

const COVERED_EXPLOSION: Explosion = Explosion {
    color: Rgb::from_rgb(0, 255, 0),
    count: 25,
    base_speed: 100.0,
    lifetime: 0.7,
    gravity: 300.0,
};
const STRUCK_EXPLOSION: Explosion = Explosion {
    color: Rgb::from_rgb(255, 0, 0),
    count: 40,
    base_speed: 150.0,
    lifetime: 0.8,
    gravity: 200.0,
};
const PICKUP_COUNT: usize = 30;
const PICKUP_SPEED: f32 = 120.0;
const PICKUP_LIFETIME: f32 = 0.6;
const PICKUP_GRAVITY: f32 = 300.0;

const SHAKE_SECONDS: f32 = 0.3;
const SHAKE_INTENSITY: f32 = 8.0;

/// Effects aggregate owned by the session loop.
#[derive(Debug)]
pub struct Effects {
    particles: ParticlePool,
    shake: ScreenShake,
    toasts: ToastFeed,
    rng: ChaCha8Rng,
}

impl Effects {
    /// Creates an empty effects layer drawing randomness from `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            particles: ParticlePool::default(),
            shake: ScreenShake::default(),
            toasts: ToastFeed::default(),
            rng: ChaCha8Rng::seed_from_u64(seed ^ STREAM_SALT),
        }
    }

    /// Turns world events into particles, shakes and toasts.
    pub fn handle(&mut self, events: &[Event]) {
        for event in events {
            match event {
                Event::ParticlesRequested { burst } => {
                    self.particles.emit(&mut self.rng, *burst);
                }
                Event::PolicyActivated {
                    policy, position, ..
                } => {
                    self.toasts
                        .show(activation_text(*policy), ACTIVATION_SECONDS);
                    self.particles.explode(
                        &mut self.rng,
                        *position,
                        Explosion {
                            color: policy.color(),
                            count: PICKUP_COUNT,
                            base_speed: PICKUP_SPEED,
                            lifetime: PICKUP_LIFETIME,
                            gravity: PICKUP_GRAVITY,
                        },
                    );
                }
                Event::RiskCovered {
                    policy,
                    cost,
                    position,
                    ..
                } => {
                    self.toasts.show(saved_text(*policy, *cost), SAVED_SECONDS);
                    self.particles
                        .explode(&mut self.rng, *position, COVERED_EXPLOSION);
                }
                Event::RiskStruck {
                    risk,
                    first_occurrence,
                    player_center,
                    ..
                } => {
                    self.shake.trigger(SHAKE_SECONDS, SHAKE_INTENSITY);
                    self.particles
                        .explode(&mut self.rng, *player_center, STRUCK_EXPLOSION);
                    if *first_occurrence {
                        self.toasts.show(tip_text(*risk), TIP_SECONDS);
                    } else {
                        self.toasts.show(LOSS_TEXT.to_owned(), LOSS_SECONDS);
                    }
                }
                _ => {}
            }
        }
    }

    /// Advances particles, shake and toast timers by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        self.particles.update(dt);
        self.shake.update(&mut self.rng, dt);
        self.toasts.update(dt);
    }

    /// Live particles.
    #[must_use]
    pub fn particles(&self) -> &ParticlePool {
        &self.particles
    }

    /// Offset to apply to every drawn element this frame.
    #[must_use]
    pub fn shake_offset(&self) -> Vec2 {
        self.shake.offset()
    }

    /// Visible toast, if any.
    #[must_use]
    pub fn toast(&self) -> Option<ToastView<'_>> {
        self.toasts.current()
    }
}
