#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Parallax building layers and starfield scrolling behind the road.
//!
//! The scroller depends on the world speed scalar only. Elements that leave
//! the screen on the left re-enter on the right with freshly drawn shapes.

mod buildings;
mod stars;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use risk_rush_core::GameConfig;

pub use buildings::{Building, Layer};
pub use stars::{Star, STAR_COUNT};

/// Salt mixed into the session seed so the scroller draws from its own stream.
pub const STREAM_SALT: u64 = 0x3ea7_4e55_0000_0004;

/// Background scroller owned by the session loop.
#[derive(Debug)]
pub struct Background {
    screen_width: f32,
    star_ceiling: f32,
    buildings: Vec<Building>,
    stars: Vec<Star>,
    rng: ChaCha8Rng,
}

impl Background {
    /// Populates every layer and the starfield for a fresh session.
    #[must_use]
    pub fn new(config: &GameConfig, seed: u64) -> Self {
        let config = config.normalized();
        let screen_width = config.screen.width;
        let horizon = config.lane_baselines().first().copied().unwrap_or(0.0);
        let star_ceiling = stars::star_ceiling(horizon);
        let mut rng = ChaCha8Rng::seed_from_u64(seed ^ STREAM_SALT);

        let buildings = Layer::ALL
            .into_iter()
            .flat_map(|layer| std::iter::repeat(layer).take(layer.count()))
            .map(|layer| Building::new(&mut rng, layer, horizon, screen_width))
            .collect();
        let stars = (0..STAR_COUNT)
            .map(|_| Star::new(&mut rng, screen_width, star_ceiling))
            .collect();

        Self {
            screen_width,
            star_ceiling,
            buildings,
            stars,
            rng,
        }
    }

    /// Scrolls every element by one frame at the provided world speed.
    pub fn update(&mut self, world_speed: f32) {
        for building in &mut self.buildings {
            building.scroll(&mut self.rng, world_speed, self.screen_width);
        }
        for star in &mut self.stars {
            star.drift(
                &mut self.rng,
                world_speed,
                self.screen_width,
                self.star_ceiling,
            );
        }
    }

    /// Buildings in back-to-front draw order.
    #[must_use]
    pub fn buildings(&self) -> &[Building] {
        &self.buildings
    }

    /// Stars in the field.
    #[must_use]
    pub fn stars(&self) -> &[Star] {
        &self.stars
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layers_are_populated_back_to_front() {
        let background = Background::new(&GameConfig::default(), 1);
        let layers: Vec<_> = background.buildings().iter().map(Building::layer).collect();
        assert_eq!(layers.len(), 24);
        assert!(layers.windows(2).all(|pair| pair[0] <= pair[1]));
        assert_eq!(background.stars().len(), STAR_COUNT);
    }
}
