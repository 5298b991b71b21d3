use glam::Vec2;
use rand::Rng;

/// Number of stars in the field.
pub const STAR_COUNT: usize = 100;

const CEILING_FRACTION: f32 = 0.8;

/// Single background star.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Star {
    /// Centre in screen coordinates.
    pub position: Vec2,
    /// Radius in pixels.
    pub size: f32,
    speed_factor: f32,
}

impl Star {
    pub(crate) fn new<R: Rng>(rng: &mut R, screen_width: f32, ceiling: f32) -> Self {
        Self {
            position: Vec2::new(
                rng.gen_range(0.0..=screen_width.max(0.0)),
                random_height(rng, ceiling),
            ),
            size: rng.gen_range(0.5..=1.5),
            speed_factor: rng.gen_range(0.05..=0.15),
        }
    }

    /// Drifts left; past the left edge the star wraps to the right with a fresh height.
    pub(crate) fn drift<R: Rng>(
        &mut self,
        rng: &mut R,
        world_speed: f32,
        screen_width: f32,
        ceiling: f32,
    ) {
        self.position.x -= world_speed * self.speed_factor;
        if self.position.x < 0.0 {
            self.position = Vec2::new(screen_width, random_height(rng, ceiling));
        }
    }
}

/// Lowest point stars may occupy given the top lane baseline.
pub(crate) fn star_ceiling(horizon: f32) -> f32 {
    (horizon * CEILING_FRACTION).floor().max(0.0)
}

fn random_height<R: Rng>(rng: &mut R, ceiling: f32) -> f32 {
    rng.gen_range(0.0..=ceiling)
}
