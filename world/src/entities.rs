//! Obstacles and boosters scrolling toward the player.

use risk_rush_core::{Aabb, EntityId, PolicyKind, RiskKind, BOOSTER_SIZE};

const BOOSTER_PULSE_RATE: f32 = 4.0;

#[derive(Clone, Debug)]
pub(crate) struct Obstacle {
    pub(crate) id: EntityId,
    pub(crate) risk: RiskKind,
    pub(crate) lane: usize,
    pub(crate) x: f32,
    pub(crate) bottom: f32,
}

impl Obstacle {
    pub(crate) fn bounds(&self) -> Aabb {
        let (width, height) = self.risk.size();
        Aabb::from_bottom_left(self.x, self.bottom, width, height)
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Booster {
    pub(crate) id: EntityId,
    pub(crate) policy: PolicyKind,
    pub(crate) lane: usize,
    pub(crate) x: f32,
    pub(crate) bottom: f32,
    pub(crate) pulse_phase: f32,
}

impl Booster {
    pub(crate) fn bounds(&self) -> Aabb {
        Aabb::from_bottom_left(self.x, self.bottom, BOOSTER_SIZE, BOOSTER_SIZE)
    }
}

/// Capability shared by everything that scrolls with the world.
pub(crate) trait Scrolling {
    fn id(&self) -> EntityId;

    fn bounds(&self) -> Aabb;

    /// Moves the entity left by one frame step; `dt` only drives cosmetic timers.
    fn scroll(&mut self, world_speed: f32, dt: f32);

    fn is_off_screen(&self) -> bool {
        self.bounds().max().x < 0.0
    }
}

impl Scrolling for Obstacle {
    fn id(&self) -> EntityId {
        self.id
    }

    fn bounds(&self) -> Aabb {
        Obstacle::bounds(self)
    }

    fn scroll(&mut self, world_speed: f32, _dt: f32) {
        self.x -= world_speed;
    }
}

impl Scrolling for Booster {
    fn id(&self) -> EntityId {
        self.id
    }

    fn bounds(&self) -> Aabb {
        Booster::bounds(self)
    }

    fn scroll(&mut self, world_speed: f32, dt: f32) {
        self.x -= world_speed;
        self.pulse_phase += dt * BOOSTER_PULSE_RATE;
    }
}

/// Scrolls every entity and removes those that left the screen, returning their ids.
pub(crate) fn scroll_all<T: Scrolling>(
    entities: &mut Vec<T>,
    world_speed: f32,
    dt: f32,
) -> Vec<EntityId> {
    let mut removed = Vec::new();
    entities.retain_mut(|entity| {
        entity.scroll(world_speed, dt);
        if entity.is_off_screen() {
            removed.push(entity.id());
            false
        } else {
            true
        }
    });
    removed
}
