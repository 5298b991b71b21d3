//! Lane-bound player controller with per-frame jump physics.

use glam::Vec2;
use risk_rush_core::{Aabb, LaneShift, ParticleBurst, PlayerTuning};

const AIRBORNE_RISING_TILT: f32 = -20.0;
const AIRBORNE_FALLING_TILT: f32 = 15.0;
const LANE_KICK_TILT: f32 = 18.0;
const LANE_KICK_DECAY: f32 = 6.0;
const IDLE_PHASE_RATE: f32 = 3.5;
const IDLE_BOB_AMPLITUDE: f32 = 2.5;
const IDLE_TILT_AMPLITUDE: f32 = 4.0;
const IDLE_TILT_FREQUENCY: f32 = 0.8;
const NOZZLE_INSET: f32 = 5.0;
const NOZZLE_SPREAD: f32 = 0.2;
const LANDING_SPREAD: f32 = 2.5;

/// Outcome of a single frame of player integration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Motion {
    /// Nothing observable happened.
    Steady,
    /// The jetpack fired while airborne.
    Thrust(ParticleBurst),
    /// The player touched down this frame.
    Landed(ParticleBurst),
}

#[derive(Clone, Debug)]
pub(crate) struct Player {
    tuning: PlayerTuning,
    lanes: Vec<f32>,
    lane: usize,
    x: f32,
    width: f32,
    height: f32,
    airborne: bool,
    jump_offset: f32,
    velocity: f32,
    thrust_timer: f32,
    anim_phase: f32,
    bob_offset: f32,
    tilt: f32,
    lane_kick: f32,
}

impl Player {
    pub(crate) fn new(
        tuning: PlayerTuning,
        lanes: Vec<f32>,
        lane: usize,
        x: f32,
        size: (f32, f32),
    ) -> Self {
        let lane = lane.min(lanes.len().saturating_sub(1));
        Self {
            tuning,
            lanes,
            lane,
            x,
            width: size.0,
            height: size.1,
            airborne: false,
            jump_offset: 0.0,
            velocity: 0.0,
            thrust_timer: 0.0,
            anim_phase: 0.0,
            bob_offset: 0.0,
            tilt: 0.0,
            lane_kick: 0.0,
        }
    }

    pub(crate) fn lane(&self) -> usize {
        self.lane
    }

    pub(crate) fn is_airborne(&self) -> bool {
        self.airborne
    }

    pub(crate) fn tilt(&self) -> f32 {
        self.tilt
    }

    pub(crate) fn anim_phase(&self) -> f32 {
        self.anim_phase
    }

    fn baseline(&self) -> f32 {
        self.lanes.get(self.lane).copied().unwrap_or_default()
    }

    /// Moves one lane in the requested direction, returning `true` when the lane changed.
    pub(crate) fn change_lane(&mut self, shift: LaneShift) -> bool {
        if self.airborne {
            return false;
        }
        let last = self.lanes.len().saturating_sub(1) as i64;
        let target = (self.lane as i64 + i64::from(shift.delta())).clamp(0, last) as usize;
        if target == self.lane {
            return false;
        }
        self.lane = target;
        self.lane_kick = shift.delta() as f32 * LANE_KICK_TILT;
        true
    }

    /// Starts a jump, returning the launch burst when the player was grounded.
    pub(crate) fn jump(&mut self) -> Option<ParticleBurst> {
        if self.airborne {
            return None;
        }
        let origin = Vec2::new(self.x, self.visual_bottom() - NOZZLE_INSET);
        self.airborne = true;
        self.velocity = self.tuning.jump_power;
        self.jump_offset = 0.0;
        self.thrust_timer = self.tuning.thrust_interval;
        self.lane_kick = 0.0;
        Some(ParticleBurst::Launch { origin })
    }

    /// Integrates one frame; physics steps per frame, timers by `dt` seconds.
    pub(crate) fn update(&mut self, dt: f32) -> Motion {
        self.anim_phase += dt * IDLE_PHASE_RATE;
        let mut motion = Motion::Steady;

        let target_tilt = if self.airborne {
            self.velocity += self.tuning.gravity;
            self.jump_offset += self.velocity;

            let ceiling = -self.tuning.max_jump_height;
            if self.jump_offset < ceiling {
                self.jump_offset = ceiling;
                self.velocity = 0.0;
            }

            if self.jump_offset >= 0.0 {
                self.land();
                motion = Motion::Landed(ParticleBurst::LandingDust {
                    origin: Vec2::new(self.x, self.baseline()),
                    spread: self.width / LANDING_SPREAD,
                });
                0.0
            } else {
                self.thrust_timer -= dt;
                if self.thrust_timer <= 0.0 {
                    self.thrust_timer = self.tuning.thrust_interval;
                    motion = Motion::Thrust(ParticleBurst::Thrust {
                        nozzles: self.nozzles(),
                        tilt_degrees: self.tilt,
                    });
                }
                if self.velocity < 0.0 {
                    AIRBORNE_RISING_TILT
                } else {
                    AIRBORNE_FALLING_TILT
                }
            }
        } else {
            self.bob_offset = self.anim_phase.sin() * IDLE_BOB_AMPLITUDE;
            self.lane_kick *= 1.0 - (dt * LANE_KICK_DECAY).clamp(0.0, 1.0);
            (self.anim_phase * IDLE_TILT_FREQUENCY).sin() * IDLE_TILT_AMPLITUDE + self.lane_kick
        };

        let follow = (dt * self.tuning.tilt_rate).clamp(0.0, 1.0);
        self.tilt += (target_tilt - self.tilt) * follow;
        motion
    }

    fn land(&mut self) {
        self.airborne = false;
        self.jump_offset = 0.0;
        self.velocity = 0.0;
    }

    fn visual_bottom(&self) -> f32 {
        let offset = if self.airborne {
            self.jump_offset
        } else {
            self.bob_offset
        };
        let bottom = self.baseline() + offset;
        bottom.max(self.height)
    }

    fn nozzles(&self) -> [Vec2; 2] {
        let anchor = Vec2::new(self.x, self.visual_bottom() - NOZZLE_INSET);
        let rotation = Vec2::from_angle(-self.tilt.to_radians());
        let spread = self.width * NOZZLE_SPREAD;
        [
            anchor + rotation.rotate(Vec2::new(-spread, 0.0)),
            anchor + rotation.rotate(Vec2::new(spread, 0.0)),
        ]
    }

    /// Collision rectangle anchored to the lane baseline; absent while airborne.
    pub(crate) fn hitbox(&self) -> Option<Aabb> {
        if self.airborne {
            return None;
        }
        Some(Aabb::from_mid_bottom(
            self.x,
            self.baseline(),
            self.width,
            self.height,
        ))
    }

    /// Drawn rectangle including the jump offset and the idle bob.
    pub(crate) fn visual_bounds(&self) -> Aabb {
        Aabb::from_mid_bottom(self.x, self.visual_bottom(), self.width, self.height)
    }
}
