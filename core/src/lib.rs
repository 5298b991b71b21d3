#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Risk Rush engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams, query immutable
//! snapshots, and respond exclusively with new command batches.

mod config;

use std::time::Duration;

use glam::Vec2;

pub use config::{
    GameConfig, PlayerTuning, ScreenConfig, SessionTuning, SpawnTuning, TrackConfig,
    WeatherTuning, MAX_SECONDS,
};

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Advances the session clock and the speed ramp by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Requests that the player move one lane up or down.
    ShiftLane {
        /// Direction of the requested lane change.
        shift: LaneShift,
    },
    /// Requests that the player start a jump.
    Jump,
    /// Requests that an obstacle enter the road at the right edge.
    SpawnObstacle {
        /// Risk category carried by the obstacle.
        risk: RiskKind,
        /// Lane whose baseline the obstacle rests on.
        lane: usize,
        /// Horizontal position of the obstacle's left edge.
        x: f32,
    },
    /// Requests that a booster enter the road at the right edge.
    SpawnBooster {
        /// Policy category granted by the booster.
        policy: PolicyKind,
        /// Lane whose baseline the booster rests on.
        lane: usize,
        /// Horizontal position of the booster's left edge.
        x: f32,
    },
    /// Integrates the player and scrolls every moving entity for one frame.
    AdvanceActors {
        /// Duration of simulated time used for timers within the frame.
        dt: Duration,
    },
    /// Requests that the player collect the identified booster.
    CollectBooster {
        /// Identifier of the booster overlapping the player.
        booster: EntityId,
    },
    /// Requests that the identified obstacle be resolved against the active policies.
    ResolveRisk {
        /// Identifier of the obstacle overlapping the player.
        obstacle: EntityId,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the session clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Announces that the speed ramp stepped the world speed up.
    SpeedIncreased {
        /// World speed after the increment.
        world_speed: f32,
    },
    /// Confirms that the player switched lanes.
    LaneChanged {
        /// Lane occupied after the change.
        lane: usize,
    },
    /// Confirms that the player left the ground.
    Jumped,
    /// Confirms that the player touched down after a jump.
    Landed,
    /// Requests that the effects layer emit a particle burst.
    ParticlesRequested {
        /// Description of the burst to emit.
        burst: ParticleBurst,
    },
    /// Confirms that an obstacle entered the road.
    ObstacleSpawned {
        /// Identifier allocated to the obstacle.
        id: EntityId,
        /// Risk category carried by the obstacle.
        risk: RiskKind,
        /// Lane the obstacle occupies.
        lane: usize,
    },
    /// Confirms that a booster entered the road.
    BoosterSpawned {
        /// Identifier allocated to the booster.
        id: EntityId,
        /// Policy category granted by the booster.
        policy: PolicyKind,
        /// Lane the booster occupies.
        lane: usize,
    },
    /// Reports that an entity scrolled fully past the left edge and was removed.
    EntityDespawned {
        /// Identifier of the removed entity.
        id: EntityId,
    },
    /// Reports that the player picked up a booster.
    PolicyActivated {
        /// Policy granted by the booster.
        policy: PolicyKind,
        /// Whether the policy was absent from the active set before pickup.
        newly_added: bool,
        /// Centre of the consumed booster.
        position: Vec2,
    },
    /// Reports that an active policy absorbed a risk.
    RiskCovered {
        /// Risk category that was absorbed.
        risk: RiskKind,
        /// Policy consumed by the risk.
        policy: PolicyKind,
        /// Amount added to the score.
        cost: u64,
        /// Centre of the consumed obstacle.
        position: Vec2,
    },
    /// Reports that the player took an unprotected hit.
    RiskStruck {
        /// Risk category that struck the player.
        risk: RiskKind,
        /// Whether this is the first hit by this category in the session.
        first_occurrence: bool,
        /// Health remaining after the hit.
        health: u32,
        /// Centre of the player's hitbox at the moment of impact.
        player_center: Vec2,
    },
    /// Announces that the session reached a terminal state.
    SessionConcluded {
        /// Terminal state that was entered.
        outcome: GameState,
        /// Final score of the session.
        score: u64,
    },
}

/// Lifecycle of a single game session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GameState {
    /// Gameplay is running; the only state from which transitions occur.
    Playing,
    /// The session clock ran out with health remaining.
    Win,
    /// Health reached zero.
    GameOver,
}

impl GameState {
    /// Returns `true` when the session has ended.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Playing)
    }
}

/// Direction of a lane change request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LaneShift {
    /// Toward the lane with the smaller index (higher on screen).
    Up,
    /// Toward the lane with the larger index (lower on screen).
    Down,
}

impl LaneShift {
    /// Signed lane delta applied by the shift.
    #[must_use]
    pub const fn delta(self) -> i32 {
        match self {
            Self::Up => -1,
            Self::Down => 1,
        }
    }
}

/// Unique identifier assigned to a moving entity, allocated in spawn order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(u32);

impl EntityId {
    /// Creates a new entity identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Opaque byte RGB colour shared between simulation and presentation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb {
    red: u8,
    green: u8,
    blue: u8,
}

impl Rgb {
    /// Creates a new colour from byte RGB components.
    #[must_use]
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Red component of the colour.
    #[must_use]
    pub const fn red(&self) -> u8 {
        self.red
    }

    /// Green component of the colour.
    #[must_use]
    pub const fn green(&self) -> u8 {
        self.green
    }

    /// Blue component of the colour.
    #[must_use]
    pub const fn blue(&self) -> u8 {
        self.blue
    }

    /// Component-wise linear interpolation toward `other`; `t` is clamped to `0..=1`.
    #[must_use]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        let mix = |a: u8, b: u8| -> u8 {
            let value = f32::from(a) + (f32::from(b) - f32::from(a)) * t;
            value.round().clamp(0.0, 255.0) as u8
        };
        Self {
            red: mix(self.red, other.red),
            green: mix(self.green, other.green),
            blue: mix(self.blue, other.blue),
        }
    }
}

/// Hazard categories carried by obstacles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RiskKind {
    /// A falling tree damaging property.
    Tree,
    /// A broken phone.
    Phone,
    /// A road accident.
    Accident,
    /// An unexpected medical bill.
    Bill,
}

impl RiskKind {
    /// Every risk category in canonical order.
    pub const ALL: [RiskKind; 4] = [Self::Tree, Self::Phone, Self::Accident, Self::Bill];

    /// Damage cost added to the score when an active policy absorbs the risk.
    #[must_use]
    pub const fn cost(self) -> u64 {
        match self {
            Self::Tree => 30_000,
            Self::Phone => 15_000,
            Self::Accident => 50_000,
            Self::Bill => 25_000,
        }
    }

    /// Policy category that protects against the risk.
    #[must_use]
    pub const fn required_protection(self) -> PolicyKind {
        match self {
            Self::Tree | Self::Phone => PolicyKind::Property,
            Self::Accident => PolicyKind::Kasko,
            Self::Bill => PolicyKind::Dms,
        }
    }

    /// Signature colour used when drawing the obstacle.
    #[must_use]
    pub const fn color(self) -> Rgb {
        match self {
            Self::Tree => Rgb::from_rgb(100, 60, 20),
            Self::Phone => Rgb::from_rgb(100, 100, 110),
            Self::Accident => Rgb::from_rgb(255, 0, 0),
            Self::Bill => Rgb::from_rgb(255, 165, 0),
        }
    }

    /// Footprint of the obstacle as `(width, height)` in screen units.
    #[must_use]
    pub const fn size(self) -> (f32, f32) {
        match self {
            Self::Tree => (50.0, 70.0),
            Self::Phone => (30.0, 30.0),
            Self::Accident => (75.0, 40.0),
            Self::Bill => (40.0, 35.0),
        }
    }

    /// Lower-case identifier of the risk.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Tree => "tree",
            Self::Phone => "phone",
            Self::Accident => "accident",
            Self::Bill => "bill",
        }
    }
}

/// Side length of the square booster footprint.
pub const BOOSTER_SIZE: f32 = 40.0;

/// Protection categories carried by boosters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PolicyKind {
    /// Comprehensive vehicle cover.
    Kasko,
    /// Voluntary medical insurance.
    Dms,
    /// Property insurance.
    Property,
    /// Travel insurance.
    Travel,
}

impl PolicyKind {
    /// Every policy category in canonical order.
    pub const ALL: [PolicyKind; 4] = [Self::Kasko, Self::Dms, Self::Property, Self::Travel];

    /// Signature colour of the policy.
    #[must_use]
    pub const fn color(self) -> Rgb {
        match self {
            Self::Kasko => Rgb::from_rgb(0, 255, 0),
            Self::Dms => Rgb::from_rgb(0, 255, 255),
            Self::Property => Rgb::from_rgb(255, 255, 0),
            Self::Travel => Rgb::from_rgb(255, 0, 255),
        }
    }

    /// Upper-case name shown on badges and toasts.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Kasko => "KASKO",
            Self::Dms => "DMS",
            Self::Property => "PROPERTY",
            Self::Travel => "TRAVEL",
        }
    }

    const fn bit(self) -> u8 {
        match self {
            Self::Kasko => 1,
            Self::Dms => 1 << 1,
            Self::Property => 1 << 2,
            Self::Travel => 1 << 3,
        }
    }
}

/// Set of policies currently held by the player.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PolicySet {
    bits: u8,
}

impl PolicySet {
    /// Creates an empty policy set.
    #[must_use]
    pub const fn new() -> Self {
        Self { bits: 0 }
    }

    /// Adds the policy, returning `true` when it was not already present.
    pub fn insert(&mut self, policy: PolicyKind) -> bool {
        let absent = !self.contains(policy);
        self.bits |= policy.bit();
        absent
    }

    /// Removes the policy, returning `true` when it was present.
    pub fn remove(&mut self, policy: PolicyKind) -> bool {
        let present = self.contains(policy);
        self.bits &= !policy.bit();
        present
    }

    /// Reports whether the policy is held.
    #[must_use]
    pub const fn contains(&self, policy: PolicyKind) -> bool {
        self.bits & policy.bit() != 0
    }

    /// Number of policies held.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Returns `true` when no policy is held.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Iterator over held policies in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = PolicyKind> + '_ {
        PolicyKind::ALL
            .into_iter()
            .filter(move |policy| self.contains(*policy))
    }
}

/// Axis-aligned rectangle in screen coordinates (y grows downward).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    min: Vec2,
    max: Vec2,
}

impl Aabb {
    /// Creates a rectangle from its left edge, bottom edge and size.
    #[must_use]
    pub fn from_bottom_left(left: f32, bottom: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(left, bottom - height),
            max: Vec2::new(left + width, bottom),
        }
    }

    /// Creates a rectangle whose bottom edge is centred on `center_x`.
    #[must_use]
    pub fn from_mid_bottom(center_x: f32, bottom: f32, width: f32, height: f32) -> Self {
        Self::from_bottom_left(center_x - width * 0.5, bottom, width, height)
    }

    /// Upper-left corner.
    #[must_use]
    pub const fn min(&self) -> Vec2 {
        self.min
    }

    /// Lower-right corner.
    #[must_use]
    pub const fn max(&self) -> Vec2 {
        self.max
    }

    /// Horizontal extent.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    /// Vertical extent.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Geometric centre.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Returns the rectangle moved by the provided offset.
    #[must_use]
    pub fn translated(&self, offset: Vec2) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    /// Returns `true` when the interiors of both rectangles overlap.
    #[must_use]
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }
}

/// Particle emission requested by the simulation for the effects layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ParticleBurst {
    /// Sparks thrown downward when the player takes off.
    Launch {
        /// Point under the player's feet.
        origin: Vec2,
    },
    /// Dust kicked up on touchdown.
    LandingDust {
        /// Point under the player's feet.
        origin: Vec2,
        /// Half-width of the strip the dust is scattered across.
        spread: f32,
    },
    /// Jetpack exhaust from both nozzles.
    Thrust {
        /// Positions of the left and right nozzles.
        nozzles: [Vec2; 2],
        /// Player tilt in degrees; exhaust leaves perpendicular to the tilted base.
        tilt_degrees: f32,
    },
}

/// Formats an amount with comma thousands separators.
#[must_use]
pub fn format_amount(amount: u64) -> String {
    let digits = amount.to_string();
    let mut formatted = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            formatted.push(',');
        }
        formatted.push(digit);
    }
    formatted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn risk_table_matches_economy() {
        assert_eq!(RiskKind::Tree.cost(), 30_000);
        assert_eq!(RiskKind::Phone.cost(), 15_000);
        assert_eq!(RiskKind::Accident.cost(), 50_000);
        assert_eq!(RiskKind::Bill.cost(), 25_000);

        assert_eq!(RiskKind::Tree.required_protection(), PolicyKind::Property);
        assert_eq!(RiskKind::Phone.required_protection(), PolicyKind::Property);
        assert_eq!(RiskKind::Accident.required_protection(), PolicyKind::Kasko);
        assert_eq!(RiskKind::Bill.required_protection(), PolicyKind::Dms);
    }

    #[test]
    fn travel_protects_nothing() {
        assert!(RiskKind::ALL
            .iter()
            .all(|risk| risk.required_protection() != PolicyKind::Travel));
    }

    #[test]
    fn policy_set_insert_is_idempotent() {
        let mut set = PolicySet::new();
        assert!(set.insert(PolicyKind::Dms));
        assert!(!set.insert(PolicyKind::Dms));
        assert_eq!(set.len(), 1);
        assert!(set.contains(PolicyKind::Dms));
    }

    #[test]
    fn policy_set_holds_several_policies() {
        let mut set = PolicySet::new();
        let _ = set.insert(PolicyKind::Travel);
        let _ = set.insert(PolicyKind::Kasko);
        let _ = set.insert(PolicyKind::Property);

        assert_eq!(
            set.iter().collect::<Vec<_>>(),
            vec![PolicyKind::Kasko, PolicyKind::Property, PolicyKind::Travel]
        );
        assert!(set.remove(PolicyKind::Kasko));
        assert!(!set.remove(PolicyKind::Kasko));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn aabb_overlap_excludes_touching_edges() {
        let a = Aabb::from_bottom_left(0.0, 10.0, 10.0, 10.0);
        let touching = Aabb::from_bottom_left(10.0, 10.0, 5.0, 5.0);
        let overlapping = Aabb::from_bottom_left(9.0, 10.0, 5.0, 5.0);

        assert!(!a.intersects(&touching));
        assert!(a.intersects(&overlapping));
        assert!(overlapping.intersects(&a));
    }

    #[test]
    fn aabb_mid_bottom_is_centred() {
        let rect = Aabb::from_mid_bottom(150.0, 438.0, 35.0, 55.0);
        assert_eq!(rect.min(), Vec2::new(132.5, 383.0));
        assert_eq!(rect.max(), Vec2::new(167.5, 438.0));
        assert_eq!(rect.center(), Vec2::new(150.0, 410.5));
    }

    #[test]
    fn rgb_lerp_clamps_factor() {
        let from = Rgb::from_rgb(0, 100, 200);
        let to = Rgb::from_rgb(100, 200, 0);
        assert_eq!(from.lerp(to, 0.5), Rgb::from_rgb(50, 150, 100));
        assert_eq!(from.lerp(to, 3.0), to);
        assert_eq!(from.lerp(to, f32::NAN), from);
    }

    #[test]
    fn amounts_use_thousands_separators() {
        assert_eq!(format_amount(0), "0");
        assert_eq!(format_amount(999), "999");
        assert_eq!(format_amount(30_000), "30,000");
        assert_eq!(format_amount(1_234_567), "1,234,567");
    }
}
