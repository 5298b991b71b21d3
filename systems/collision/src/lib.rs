#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Overlap detection between the player and scrolling entities.
//!
//! Boosters are resolved before obstacles so a policy picked up on the same
//! frame as its matching risk protects against it. Within each group entities
//! are visited in ascending spawn id order, which makes the truncation after a
//! fatal hit deterministic.

use risk_rush_core::{Aabb, Command, EntityId, GameState};
use risk_rush_world::query::{BoosterSnapshot, ObstacleSnapshot, PlayerSnapshot};

/// Pure system that turns overlaps into resolution commands.
#[derive(Debug, Default)]
pub struct Collision {
    overlaps: Vec<EntityId>,
}

impl Collision {
    /// Creates a new collision system.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Emits `CollectBooster` and `ResolveRisk` commands for every overlap this frame.
    pub fn handle(
        &mut self,
        game_state: GameState,
        player: &PlayerSnapshot,
        boosters: &[BoosterSnapshot],
        obstacles: &[ObstacleSnapshot],
        out: &mut Vec<Command>,
    ) {
        if game_state != GameState::Playing {
            return;
        }
        let Some(hitbox) = player.hitbox else {
            return;
        };

        self.collect_overlaps(&hitbox, boosters.iter().map(|b| (b.id, b.bounds)));
        out.extend(
            self.overlaps
                .drain(..)
                .map(|booster| Command::CollectBooster { booster }),
        );

        self.collect_overlaps(&hitbox, obstacles.iter().map(|o| (o.id, o.bounds)));
        out.extend(
            self.overlaps
                .drain(..)
                .map(|obstacle| Command::ResolveRisk { obstacle }),
        );
    }

    fn collect_overlaps(&mut self, hitbox: &Aabb, entities: impl Iterator<Item = (EntityId, Aabb)>) {
        self.overlaps.clear();
        self.overlaps.extend(
            entities
                .filter(|(_, bounds)| bounds.intersects(hitbox))
                .map(|(id, _)| id),
        );
        self.overlaps.sort_unstable();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use risk_rush_core::{PolicyKind, RiskKind};

    fn player() -> PlayerSnapshot {
        PlayerSnapshot {
            lane: 1,
            airborne: false,
            hitbox: Some(Aabb::from_mid_bottom(150.0, 438.0, 35.0, 55.0)),
            bounds: Aabb::from_mid_bottom(150.0, 438.0, 35.0, 55.0),
            tilt_degrees: 0.0,
            anim_phase: 0.0,
        }
    }

    fn obstacle(id: u32, x: f32) -> ObstacleSnapshot {
        ObstacleSnapshot {
            id: EntityId::new(id),
            risk: RiskKind::Bill,
            lane: 1,
            bounds: Aabb::from_bottom_left(x, 438.0, 40.0, 35.0),
        }
    }

    #[test]
    fn overlapping_obstacles_resolve_in_spawn_order() {
        let mut collision = Collision::new();
        let mut out = Vec::new();
        collision.handle(
            GameState::Playing,
            &player(),
            &[],
            &[obstacle(9, 140.0), obstacle(2, 150.0), obstacle(5, 600.0)],
            &mut out,
        );
        assert_eq!(
            out,
            vec![
                Command::ResolveRisk {
                    obstacle: EntityId::new(2)
                },
                Command::ResolveRisk {
                    obstacle: EntityId::new(9)
                },
            ]
        );
    }

    #[test]
    fn boosters_resolve_before_obstacles() {
        let mut collision = Collision::new();
        let mut out = Vec::new();
        let booster = BoosterSnapshot {
            id: EntityId::new(7),
            policy: PolicyKind::Dms,
            lane: 1,
            bounds: Aabb::from_bottom_left(140.0, 438.0, 40.0, 40.0),
            pulse_phase: 0.0,
        };
        collision.handle(
            GameState::Playing,
            &player(),
            &[booster],
            &[obstacle(1, 140.0)],
            &mut out,
        );
        assert_eq!(
            out,
            vec![
                Command::CollectBooster {
                    booster: EntityId::new(7)
                },
                Command::ResolveRisk {
                    obstacle: EntityId::new(1)
                },
            ]
        );
    }

    #[test]
    fn airborne_player_collides_with_nothing() {
        let mut collision = Collision::new();
        let mut out = Vec::new();
        let mut airborne = player();
        airborne.airborne = true;
        airborne.hitbox = None;
        airborne.bounds = airborne.bounds.translated(Vec2::new(0.0, -100.0));
        collision.handle(
            GameState::Playing,
            &airborne,
            &[],
            &[obstacle(1, 140.0)],
            &mut out,
        );
        assert!(out.is_empty());
    }

    #[test]
    fn terminal_session_emits_nothing() {
        let mut collision = Collision::new();
        let mut out = Vec::new();
        collision.handle(
            GameState::GameOver,
            &player(),
            &[],
            &[obstacle(1, 140.0)],
            &mut out,
        );
        assert!(out.is_empty());
    }
}
