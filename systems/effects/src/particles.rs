//! Ephemeral point-sprite particles.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::{seq::SliceRandom, Rng};
use risk_rush_core::{ParticleBurst, Rgb};

/// Upper bound on live particles; emissions beyond it are dropped.
pub const PARTICLE_CAPACITY: usize = 1024;

const SHRINK_RATE: f32 = 2.0;
const MIN_SIZE: f32 = 1.0;

const LAUNCH_COLORS: [Rgb; 3] = [
    Rgb::from_rgb(255, 220, 120),
    Rgb::from_rgb(255, 250, 180),
    Rgb::from_rgb(255, 255, 0),
];
const THRUST_COLORS: [Rgb; 3] = [
    Rgb::from_rgb(255, 100, 0),
    Rgb::from_rgb(255, 150, 30),
    Rgb::from_rgb(255, 200, 80),
];
const DUST_COLOR: Rgb = Rgb::from_rgb(160, 160, 160);

/// Radial burst parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Explosion {
    /// Base colour; each particle deviates by up to 20 per channel.
    pub color: Rgb,
    /// Number of particles emitted.
    pub count: usize,
    /// Mean initial speed in pixels per second.
    pub base_speed: f32,
    /// Seconds each particle lives.
    pub lifetime: f32,
    /// Downward acceleration in pixels per second squared.
    pub gravity: f32,
}

/// Single particle with ballistic motion.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    position: Vec2,
    velocity: Vec2,
    gravity: f32,
    size: f32,
    age: f32,
    lifetime: f32,
    color: Rgb,
}

impl Particle {
    /// Current position in screen coordinates.
    #[must_use]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Current radius.
    #[must_use]
    pub fn size(&self) -> f32 {
        self.size
    }

    /// Fill colour.
    #[must_use]
    pub fn color(&self) -> Rgb {
        self.color
    }

    fn advance(&mut self, dt: f32) -> bool {
        self.age += dt;
        if self.age >= self.lifetime {
            return false;
        }
        self.velocity.y += self.gravity * dt;
        self.position += self.velocity * dt;
        self.size -= SHRINK_RATE * dt;
        self.size >= MIN_SIZE
    }
}

/// Owned collection of live particles.
#[derive(Clone, Debug, Default)]
pub struct ParticlePool {
    particles: Vec<Particle>,
}

impl ParticlePool {
    /// Iterator over live particles in emission order.
    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    /// Number of live particles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Returns `true` when no particle is alive.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Ages every particle and drops the expired or vanished ones.
    pub fn update(&mut self, dt: f32) {
        self.particles.retain_mut(|particle| particle.advance(dt));
    }

    fn push(&mut self, particle: Particle) {
        if self.particles.len() < PARTICLE_CAPACITY {
            self.particles.push(particle);
        }
    }

    /// Emits a radial burst centred on `origin`.
    pub fn explode<R: Rng>(&mut self, rng: &mut R, origin: Vec2, explosion: Explosion) {
        for _ in 0..explosion.count {
            let angle = rng.gen_range(0.0..TAU);
            let speed = rng.gen_range(explosion.base_speed * 0.5..=explosion.base_speed * 1.5);
            let color = jitter_color(rng, explosion.color);
            self.push(Particle {
                position: origin,
                velocity: Vec2::from_angle(angle) * speed,
                gravity: explosion.gravity,
                size: rng.gen_range(3.0..=7.0),
                age: 0.0,
                lifetime: explosion.lifetime,
                color,
            });
        }
    }

    /// Emits the particles described by a player burst request.
    pub fn emit<R: Rng>(&mut self, rng: &mut R, burst: ParticleBurst) {
        match burst {
            ParticleBurst::Launch { origin } => {
                for _ in 0..20 {
                    let color = *LAUNCH_COLORS.choose(rng).unwrap_or(&LAUNCH_COLORS[0]);
                    self.push(Particle {
                        position: origin + Vec2::new(rng.gen_range(-10.0..=10.0), 0.0),
                        velocity: Vec2::new(
                            rng.gen_range(-40.0..=40.0),
                            rng.gen_range(70.0..=120.0),
                        ),
                        gravity: -120.0,
                        size: rng.gen_range(4.0..=8.0),
                        age: 0.0,
                        lifetime: 0.6,
                        color,
                    });
                }
            }
            ParticleBurst::LandingDust { origin, spread } => {
                let spread = spread.abs();
                for _ in 0..10 {
                    self.push(Particle {
                        position: origin + Vec2::new(rng.gen_range(-spread..=spread), 0.0),
                        velocity: Vec2::new(
                            rng.gen_range(-50.0..=50.0),
                            rng.gen_range(-60.0..=-25.0),
                        ),
                        gravity: 280.0,
                        size: rng.gen_range(2.5..=5.0),
                        age: 0.0,
                        lifetime: 0.45,
                        color: DUST_COLOR,
                    });
                }
            }
            ParticleBurst::Thrust {
                nozzles,
                tilt_degrees,
            } => {
                let direction = Vec2::from_angle((tilt_degrees + 90.0).to_radians());
                for nozzle in nozzles {
                    let color = *THRUST_COLORS.choose(rng).unwrap_or(&THRUST_COLORS[0]);
                    let speed: f32 = rng.gen_range(70.0..=100.0);
                    let scatter = Vec2::new(rng.gen_range(-15.0..=15.0), rng.gen_range(-10.0..=10.0));
                    self.push(Particle {
                        position: nozzle,
                        velocity: direction * speed + scatter,
                        gravity: -50.0,
                        size: rng.gen_range(4.0..=7.0),
                        age: 0.0,
                        lifetime: 0.3,
                        color,
                    });
                }
            }
        }
    }
}

fn jitter_color<R: Rng>(rng: &mut R, color: Rgb) -> Rgb {
    let mut shift = |channel: u8| -> u8 {
        (i16::from(channel) + rng.gen_range(-20..=20)).clamp(0, 255) as u8
    };
    let red = shift(color.red());
    let green = shift(color.green());
    let blue = shift(color.blue());
    Rgb::from_rgb(red, green, blue)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const SPARK: Explosion = Explosion {
        color: Rgb::from_rgb(0, 255, 0),
        count: 25,
        base_speed: 100.0,
        lifetime: 0.75,
        gravity: 300.0,
    };

    #[test]
    fn particles_expire_within_lifetime() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut pool = ParticlePool::default();
        pool.explode(&mut rng, Vec2::new(100.0, 100.0), SPARK);
        assert_eq!(pool.len(), 25);

        let mut elapsed = 0.0;
        while !pool.is_empty() {
            pool.update(0.125);
            elapsed += 0.125;
            assert!(elapsed <= 0.75, "particle outlived its lifetime");
        }
    }

    #[test]
    fn shrinking_below_one_removes_particle_early() {
        let mut pool = ParticlePool::default();
        pool.push(Particle {
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            gravity: 0.0,
            size: 1.2,
            age: 0.0,
            lifetime: 10.0,
            color: DUST_COLOR,
        });
        pool.update(0.05);
        assert_eq!(pool.len(), 1);
        pool.update(0.1);
        assert!(pool.is_empty());
    }

    #[test]
    fn pool_truncates_at_capacity() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut pool = ParticlePool::default();
        for _ in 0..60 {
            pool.explode(&mut rng, Vec2::ZERO, SPARK);
        }
        assert_eq!(pool.len(), PARTICLE_CAPACITY);
    }

    #[test]
    fn untilted_thrust_points_down() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let mut pool = ParticlePool::default();
        pool.emit(
            &mut rng,
            ParticleBurst::Thrust {
                nozzles: [Vec2::new(140.0, 400.0), Vec2::new(160.0, 400.0)],
                tilt_degrees: 0.0,
            },
        );
        assert_eq!(pool.len(), 2);
        assert!(pool.iter().all(|particle| particle.velocity.y > 50.0));
    }

    #[test]
    fn explosion_colors_stay_near_base() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut pool = ParticlePool::default();
        pool.explode(&mut rng, Vec2::ZERO, SPARK);
        for particle in pool.iter() {
            assert!(particle.color().red() <= 20);
            assert!(particle.color().green() >= 235);
        }
    }
}
