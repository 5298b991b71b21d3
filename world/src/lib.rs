#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative session state for Risk Rush.
//!
//! The world owns the session clock, the player, and every scrolling entity.
//! It is mutated only through [`apply`] and read through [`query`]; all random
//! choices arrive inside commands, so replaying the same command stream always
//! produces the same event stream.

mod entities;
mod player;

use std::{collections::BTreeSet, time::Duration};

use risk_rush_core::{Command, EntityId, Event, GameConfig, GameState, PolicySet, RiskKind};

use entities::{scroll_all, Booster, Obstacle};
use player::{Motion, Player};

/// Represents the authoritative Risk Rush session state.
#[derive(Debug)]
pub struct World {
    lanes: Vec<f32>,
    screen_width: f32,
    state: GameState,
    elapsed: Duration,
    duration: Duration,
    ramp_interval: Duration,
    ramp_accumulator: Duration,
    speed_increment: f32,
    world_speed: f32,
    score: u64,
    health: u32,
    max_health: u32,
    policies: PolicySet,
    seen_risks: BTreeSet<RiskKind>,
    player: Player,
    obstacles: Vec<Obstacle>,
    boosters: Vec<Booster>,
    next_entity_id: u32,
}

impl World {
    /// Creates a fresh session in the `playing` state.
    #[must_use]
    pub fn new(config: &GameConfig) -> Self {
        let config = config.normalized();
        let lanes = config.lane_baselines();
        let player = Player::new(
            config.player.clone(),
            lanes.clone(),
            config.track.start_lane,
            config.track.player_x,
            (config.track.player_width, config.track.player_height),
        );
        Self {
            lanes,
            screen_width: config.screen.width,
            state: GameState::Playing,
            elapsed: Duration::ZERO,
            duration: Duration::from_secs_f32(config.session.duration),
            ramp_interval: Duration::from_secs_f32(config.session.speed_interval),
            ramp_accumulator: Duration::ZERO,
            speed_increment: config.session.speed_increment,
            world_speed: config.session.initial_speed,
            score: 0,
            health: config.session.max_health,
            max_health: config.session.max_health,
            policies: PolicySet::new(),
            seen_risks: BTreeSet::new(),
            player,
            obstacles: Vec::new(),
            boosters: Vec::new(),
            next_entity_id: 0,
        }
    }

    fn allocate_id(&mut self) -> EntityId {
        let id = EntityId::new(self.next_entity_id);
        self.next_entity_id = self.next_entity_id.saturating_add(1);
        id
    }

    fn lane_baseline(&self, lane: usize) -> Option<f32> {
        self.lanes.get(lane).copied()
    }

    fn conclude(&mut self, outcome: GameState, out_events: &mut Vec<Event>) {
        self.state = outcome;
        log::info!(
            "session concluded: {:?} with score {} after {:.1}s",
            outcome,
            self.score,
            self.elapsed.as_secs_f32()
        );
        out_events.push(Event::SessionConcluded {
            outcome,
            score: self.score,
        });
    }

    fn tick(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        if self.elapsed >= self.duration {
            self.conclude(GameState::Win, out_events);
            return;
        }

        self.elapsed = self.elapsed.saturating_add(dt);
        out_events.push(Event::TimeAdvanced { dt });

        self.ramp_accumulator = self.ramp_accumulator.saturating_add(dt);
        while self.ramp_accumulator >= self.ramp_interval {
            self.ramp_accumulator -= self.ramp_interval;
            self.world_speed += self.speed_increment;
            log::debug!("world speed stepped to {:.2}", self.world_speed);
            out_events.push(Event::SpeedIncreased {
                world_speed: self.world_speed,
            });
        }
    }

    fn advance_actors(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        let seconds = dt.as_secs_f32();
        match self.player.update(seconds) {
            Motion::Steady => {}
            Motion::Thrust(burst) => out_events.push(Event::ParticlesRequested { burst }),
            Motion::Landed(burst) => {
                out_events.push(Event::Landed);
                out_events.push(Event::ParticlesRequested { burst });
            }
        }

        let mut removed = scroll_all(&mut self.obstacles, self.world_speed, seconds);
        removed.extend(scroll_all(&mut self.boosters, self.world_speed, seconds));
        removed.sort();
        for id in removed {
            out_events.push(Event::EntityDespawned { id });
        }
    }

    fn collect_booster(&mut self, booster: EntityId, out_events: &mut Vec<Event>) {
        let Some(hitbox) = self.player.hitbox() else {
            return;
        };
        let Some(index) = self
            .boosters
            .iter()
            .position(|candidate| candidate.id == booster)
        else {
            return;
        };
        if !self.boosters[index].bounds().intersects(&hitbox) {
            return;
        }

        let booster = self.boosters.remove(index);
        let newly_added = self.policies.insert(booster.policy);
        log::debug!(
            "collected {} booster (new: {newly_added})",
            booster.policy.label()
        );
        out_events.push(Event::PolicyActivated {
            policy: booster.policy,
            newly_added,
            position: booster.bounds().center(),
        });
    }

    fn resolve_risk(&mut self, obstacle: EntityId, out_events: &mut Vec<Event>) {
        let Some(hitbox) = self.player.hitbox() else {
            return;
        };
        let Some(index) = self
            .obstacles
            .iter()
            .position(|candidate| candidate.id == obstacle)
        else {
            return;
        };
        if !self.obstacles[index].bounds().intersects(&hitbox) {
            return;
        }

        let obstacle = self.obstacles.remove(index);
        let risk = obstacle.risk;
        let protection = risk.required_protection();

        if self.policies.remove(protection) {
            self.score = self.score.saturating_add(risk.cost());
            log::debug!(
                "{} covered {} for {}",
                protection.label(),
                risk.label(),
                risk.cost()
            );
            out_events.push(Event::RiskCovered {
                risk,
                policy: protection,
                cost: risk.cost(),
                position: obstacle.bounds().center(),
            });
            return;
        }

        self.health = self.health.saturating_sub(1);
        let first_occurrence = self.seen_risks.insert(risk);
        log::debug!(
            "unprotected {} hit, health now {}",
            risk.label(),
            self.health
        );
        out_events.push(Event::RiskStruck {
            risk,
            first_occurrence,
            health: self.health,
            player_center: hitbox.center(),
        });

        if self.health == 0 {
            self.conclude(GameState::GameOver, out_events);
        }
    }
}

/// Applies the provided command to the world, mutating state deterministically.
///
/// Every command is ignored once the session has reached a terminal state.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    if world.state.is_terminal() {
        return;
    }

    match command {
        Command::Tick { dt } => world.tick(dt, out_events),
        Command::ShiftLane { shift } => {
            if world.player.change_lane(shift) {
                out_events.push(Event::LaneChanged {
                    lane: world.player.lane(),
                });
            }
        }
        Command::Jump => {
            if let Some(burst) = world.player.jump() {
                out_events.push(Event::Jumped);
                out_events.push(Event::ParticlesRequested { burst });
            }
        }
        Command::SpawnObstacle { risk, lane, x } => {
            let Some(bottom) = world.lane_baseline(lane) else {
                return;
            };
            if !x.is_finite() {
                return;
            }
            let id = world.allocate_id();
            world.obstacles.push(Obstacle {
                id,
                risk,
                lane,
                x,
                bottom,
            });
            out_events.push(Event::ObstacleSpawned { id, risk, lane });
        }
        Command::SpawnBooster { policy, lane, x } => {
            let Some(bottom) = world.lane_baseline(lane) else {
                return;
            };
            if !x.is_finite() {
                return;
            }
            let id = world.allocate_id();
            world.boosters.push(Booster {
                id,
                policy,
                lane,
                x,
                bottom,
                pulse_phase: 0.0,
            });
            out_events.push(Event::BoosterSpawned { id, policy, lane });
        }
        Command::AdvanceActors { dt } => world.advance_actors(dt, out_events),
        Command::CollectBooster { booster } => world.collect_booster(booster, out_events),
        Command::ResolveRisk { obstacle } => world.resolve_risk(obstacle, out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::time::Duration;

    use super::World;
    use risk_rush_core::{Aabb, EntityId, GameState, PolicyKind, PolicySet, RiskKind};

    /// Current lifecycle state of the session.
    #[must_use]
    pub fn game_state(world: &World) -> GameState {
        world.state
    }

    /// Session time accumulated so far.
    #[must_use]
    pub fn elapsed(world: &World) -> Duration {
        world.elapsed
    }

    /// Session time left before the clock runs out.
    #[must_use]
    pub fn time_left(world: &World) -> Duration {
        world.duration.saturating_sub(world.elapsed)
    }

    /// Current horizontal scroll step in pixels per frame.
    #[must_use]
    pub fn world_speed(world: &World) -> f32 {
        world.world_speed
    }

    /// Damage costs saved so far.
    #[must_use]
    pub fn score(world: &World) -> u64 {
        world.score
    }

    /// Remaining health.
    #[must_use]
    pub fn health(world: &World) -> u32 {
        world.health
    }

    /// Health the session started with.
    #[must_use]
    pub fn max_health(world: &World) -> u32 {
        world.max_health
    }

    /// Policies currently held by the player.
    #[must_use]
    pub fn active_policies(world: &World) -> PolicySet {
        world.policies
    }

    /// Risk categories whose educational tip has already been shown.
    pub fn seen_risks(world: &World) -> impl Iterator<Item = RiskKind> + '_ {
        world.seen_risks.iter().copied()
    }

    /// Baselines of every lane, top to bottom.
    #[must_use]
    pub fn lane_baselines(world: &World) -> &[f32] {
        &world.lanes
    }

    /// Logical width of the play field.
    #[must_use]
    pub fn screen_width(world: &World) -> f32 {
        world.screen_width
    }

    /// Captures a read-only view of the player.
    #[must_use]
    pub fn player(world: &World) -> PlayerSnapshot {
        let player = &world.player;
        PlayerSnapshot {
            lane: player.lane(),
            airborne: player.is_airborne(),
            hitbox: player.hitbox(),
            bounds: player.visual_bounds(),
            tilt_degrees: player.tilt(),
            anim_phase: player.anim_phase(),
        }
    }

    /// Captures every obstacle in ascending id order.
    #[must_use]
    pub fn obstacles(world: &World) -> Vec<ObstacleSnapshot> {
        let mut snapshots: Vec<ObstacleSnapshot> = world
            .obstacles
            .iter()
            .map(|obstacle| ObstacleSnapshot {
                id: obstacle.id,
                risk: obstacle.risk,
                lane: obstacle.lane,
                bounds: obstacle.bounds(),
            })
            .collect();
        snapshots.sort_by_key(|snapshot| snapshot.id);
        snapshots
    }

    /// Captures every booster in ascending id order.
    #[must_use]
    pub fn boosters(world: &World) -> Vec<BoosterSnapshot> {
        let mut snapshots: Vec<BoosterSnapshot> = world
            .boosters
            .iter()
            .map(|booster| BoosterSnapshot {
                id: booster.id,
                policy: booster.policy,
                lane: booster.lane,
                bounds: booster.bounds(),
                pulse_phase: booster.pulse_phase,
            })
            .collect();
        snapshots.sort_by_key(|snapshot| snapshot.id);
        snapshots
    }

    /// Read-only snapshot of the player.
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub struct PlayerSnapshot {
        /// Lane the player occupies.
        pub lane: usize,
        /// Whether the player is mid-jump.
        pub airborne: bool,
        /// Collision rectangle; `None` while airborne.
        pub hitbox: Option<Aabb>,
        /// Drawn rectangle including jump and idle offsets.
        pub bounds: Aabb,
        /// Cosmetic tilt in degrees; positive leans forward.
        pub tilt_degrees: f32,
        /// Phase of the idle animation in radians.
        pub anim_phase: f32,
    }

    /// Read-only snapshot of an obstacle.
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub struct ObstacleSnapshot {
        /// Identifier allocated at spawn.
        pub id: EntityId,
        /// Risk category carried by the obstacle.
        pub risk: RiskKind,
        /// Lane the obstacle occupies.
        pub lane: usize,
        /// Current bounds of the obstacle.
        pub bounds: Aabb,
    }

    /// Read-only snapshot of a booster.
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub struct BoosterSnapshot {
        /// Identifier allocated at spawn.
        pub id: EntityId,
        /// Policy category granted by the booster.
        pub policy: PolicyKind,
        /// Lane the booster occupies.
        pub lane: usize,
        /// Current bounds of the booster.
        pub bounds: Aabb,
        /// Phase of the pulsing glow animation in radians.
        pub pulse_phase: f32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use risk_rush_core::{LaneShift, PolicyKind};

    fn tick(world: &mut World, seconds: f32, events: &mut Vec<Event>) {
        apply(
            world,
            Command::Tick {
                dt: Duration::from_secs_f32(seconds),
            },
            events,
        );
    }

    #[test]
    fn new_world_starts_playing_with_full_health() {
        let world = World::new(&GameConfig::default());
        assert_eq!(query::game_state(&world), GameState::Playing);
        assert_eq!(query::health(&world), 3);
        assert_eq!(query::score(&world), 0);
        assert_eq!(query::world_speed(&world), 4.5);
        assert_eq!(query::player(&world).lane, 1);
        assert!(query::active_policies(&world).is_empty());
    }

    #[test]
    fn oversized_session_spans_start_without_overflow() {
        let mut config = GameConfig::default();
        config.session.duration = 1.0e30;
        config.session.speed_interval = 1.0e30;
        let world = World::new(&config);

        assert_eq!(query::time_left(&world), Duration::from_secs(1_000_000));
        assert_eq!(query::game_state(&world), GameState::Playing);
    }

    #[test]
    fn speed_ramps_once_per_interval() {
        let mut world = World::new(&GameConfig::default());
        let mut events = Vec::new();

        for _ in 0..199 {
            tick(&mut world, 0.05, &mut events);
        }
        assert_eq!(query::world_speed(&world), 4.5);

        tick(&mut world, 0.05, &mut events);
        let steps = events
            .iter()
            .filter(|event| matches!(event, Event::SpeedIncreased { .. }))
            .count();
        assert_eq!(steps, 1);
        assert!((query::world_speed(&world) - 4.7).abs() < 1e-5);
    }

    #[test]
    fn win_is_declared_on_the_tick_after_the_clock_runs_out() {
        let mut config = GameConfig::default();
        config.session.duration = 1.0;
        let mut world = World::new(&config);
        let mut events = Vec::new();

        tick(&mut world, 0.5, &mut events);
        tick(&mut world, 0.5, &mut events);
        assert_eq!(query::game_state(&world), GameState::Playing);
        assert_eq!(query::time_left(&world), Duration::ZERO);

        tick(&mut world, 0.016, &mut events);
        assert_eq!(query::game_state(&world), GameState::Win);
        assert_eq!(
            events.last(),
            Some(&Event::SessionConcluded {
                outcome: GameState::Win,
                score: 0
            })
        );
    }

    #[test]
    fn spawn_into_unknown_lane_is_ignored() {
        let mut world = World::new(&GameConfig::default());
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::SpawnObstacle {
                risk: RiskKind::Bill,
                lane: 7,
                x: 900.0,
            },
            &mut events,
        );
        assert!(events.is_empty());
        assert!(query::obstacles(&world).is_empty());
    }

    #[test]
    fn booster_out_of_reach_is_not_collected() {
        let mut world = World::new(&GameConfig::default());
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::SpawnBooster {
                policy: PolicyKind::Kasko,
                lane: 1,
                x: 900.0,
            },
            &mut events,
        );
        let id = query::boosters(&world)[0].id;
        apply(
            &mut world,
            Command::CollectBooster { booster: id },
            &mut events,
        );
        assert!(query::active_policies(&world).is_empty());
        assert_eq!(query::boosters(&world).len(), 1);
    }

    #[test]
    fn lane_change_reports_new_lane() {
        let mut world = World::new(&GameConfig::default());
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::ShiftLane {
                shift: LaneShift::Up,
            },
            &mut events,
        );
        assert_eq!(events, vec![Event::LaneChanged { lane: 0 }]);
    }
}
