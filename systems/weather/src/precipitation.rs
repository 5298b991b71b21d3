use glam::Vec2;
use rand::Rng;

/// Most rain drops alive at once.
pub const RAIN_CAPACITY: usize = 200;
/// Most snowflakes alive at once.
pub const SNOW_CAPACITY: usize = 150;

const REFILL_PER_FRAME: usize = 2;
const RAIN_DRAIN_PER_FRAME: usize = 10;
const SNOW_DRAIN_PER_FRAME: usize = 12;
const SNOW_SWAY_RATE: f32 = 2.0;
const SNOW_SWAY_SPEED: f32 = 20.0;

/// Kind of precipitation held by a pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PrecipitationKind {
    /// Fast slanted streaks.
    Rain,
    /// Slow swaying flakes.
    Snow,
}

/// Single rain drop or snowflake.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Droplet {
    /// Current position in screen coordinates.
    pub position: Vec2,
    /// Velocity in pixels per second.
    pub velocity: Vec2,
    /// Streak length for rain, radius for snow.
    pub size: f32,
    phase: f32,
}

/// Size-bounded pool refilled and drained gradually toward a target population.
#[derive(Clone, Debug)]
pub struct PrecipitationPool {
    kind: PrecipitationKind,
    capacity: usize,
    drain_per_frame: usize,
    drops: Vec<Droplet>,
}

impl PrecipitationPool {
    pub(crate) fn new(kind: PrecipitationKind) -> Self {
        let (capacity, drain_per_frame) = match kind {
            PrecipitationKind::Rain => (RAIN_CAPACITY, RAIN_DRAIN_PER_FRAME),
            PrecipitationKind::Snow => (SNOW_CAPACITY, SNOW_DRAIN_PER_FRAME),
        };
        Self {
            kind,
            capacity,
            drain_per_frame,
            drops: Vec::with_capacity(capacity),
        }
    }

    /// Kind of precipitation in the pool.
    #[must_use]
    pub fn kind(&self) -> PrecipitationKind {
        self.kind
    }

    /// Live drops.
    #[must_use]
    pub fn drops(&self) -> &[Droplet] {
        &self.drops
    }

    /// Population the pool converges to for the given chance.
    #[must_use]
    pub fn target(&self, chance: f32) -> usize {
        let chance = if chance.is_finite() {
            chance.clamp(0.0, 1.0)
        } else {
            0.0
        };
        (chance * self.capacity as f32).round() as usize
    }

    /// Moves the population one frame toward `chance` and integrates every drop.
    pub(crate) fn update<R: Rng>(&mut self, rng: &mut R, chance: f32, area: Vec2, dt: f32) {
        let target = self.target(chance);
        let count = self.drops.len();
        if count < target {
            for _ in 0..REFILL_PER_FRAME.min(target - count) {
                let drop = self.spawn(rng, area, true);
                self.drops.push(drop);
            }
        } else if count > target {
            self.drops
                .truncate(count - self.drain_per_frame.min(count - target));
        }

        for index in 0..self.drops.len() {
            let mut drop = self.drops[index];
            drop.phase += dt * SNOW_SWAY_RATE;
            drop.position += drop.velocity * dt;
            if self.kind == PrecipitationKind::Snow {
                drop.position.x += drop.phase.sin() * SNOW_SWAY_SPEED * dt;
            }
            if drop.position.y > area.y {
                drop = self.spawn(rng, area, false);
            }
            self.drops[index] = drop;
        }
    }

    fn spawn<R: Rng>(&self, rng: &mut R, area: Vec2, scatter: bool) -> Droplet {
        let top = if scatter {
            rng.gen_range(-area.y..=0.0)
        } else {
            rng.gen_range(-20.0..=0.0)
        };
        let position = Vec2::new(rng.gen_range(0.0..=area.x), top);
        match self.kind {
            PrecipitationKind::Rain => Droplet {
                position,
                velocity: Vec2::new(rng.gen_range(-60.0..=-40.0), rng.gen_range(400.0..=600.0)),
                size: rng.gen_range(10.0..=20.0),
                phase: 0.0,
            },
            PrecipitationKind::Snow => Droplet {
                position,
                velocity: Vec2::new(rng.gen_range(-20.0..=20.0), rng.gen_range(40.0..=90.0)),
                size: rng.gen_range(2.0..=4.0),
                phase: rng.gen_range(0.0..=std::f32::consts::TAU),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const AREA: Vec2 = Vec2::new(800.0, 600.0);

    #[test]
    fn refill_is_rate_limited_and_capped() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut pool = PrecipitationPool::new(PrecipitationKind::Snow);

        pool.update(&mut rng, 1.0, AREA, 0.016);
        assert_eq!(pool.drops().len(), 2);

        for _ in 0..500 {
            let before = pool.drops().len();
            pool.update(&mut rng, 1.0, AREA, 0.016);
            assert!(pool.drops().len() - before <= 2);
        }
        assert_eq!(pool.drops().len(), SNOW_CAPACITY);
    }

    #[test]
    fn drain_is_rate_limited() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut pool = PrecipitationPool::new(PrecipitationKind::Rain);
        for _ in 0..200 {
            pool.update(&mut rng, 0.3, AREA, 0.016);
        }
        assert_eq!(pool.drops().len(), 60);

        pool.update(&mut rng, 0.0, AREA, 0.016);
        assert_eq!(pool.drops().len(), 50);
        for _ in 0..5 {
            pool.update(&mut rng, 0.0, AREA, 0.016);
        }
        assert!(pool.drops().is_empty());
    }

    #[test]
    fn drops_recycle_inside_the_area() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut pool = PrecipitationPool::new(PrecipitationKind::Rain);
        for _ in 0..400 {
            pool.update(&mut rng, 1.0, AREA, 0.05);
            assert!(pool.drops().iter().all(|drop| drop.position.y <= AREA.y));
        }
    }
}
