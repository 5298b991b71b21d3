//! Translates session state into the backend-agnostic [`Scene`].

use risk_rush_core::{format_amount, GameState, PolicyKind};
use risk_rush_rendering::{
    format_clock, health_color, mock_leaderboard, BoosterPresentation, BuildingPresentation,
    Color, DropletPresentation, ObstaclePresentation, OverlayPresentation, ParticlePresentation,
    PlayerPresentation, PolicyBadge, Scene, SkyPresentation, StarPresentation, SunPresentation,
    ToastPresentation,
};
use risk_rush_system_weather::PrecipitationKind;
use risk_rush_world::query;

use crate::session::Session;

const SUN_COLOR: Color = Color::from_rgb_u8(255, 230, 120);
const GROUND_OFFSET: f32 = 150.0;
const ROAD_TOP_FACTOR: f32 = 0.8;
const ROAD_BOTTOM_FACTOR: f32 = 0.2;
const DASH_LENGTH: f32 = 60.0;
const DASH_GAP: f32 = 40.0;
const DASH_THICKNESS: f32 = 5.0;
const DASH_SCROLL_FACTOR: f32 = 10.0;
const CURB_THICKNESS: f32 = 5.0;
const VICTORY_TITLE: &str = "VICTORY!";
const DEFEAT_TITLE: &str = "BUDGET EXHAUSTED";
const VICTORY_BLURB: &str = "Great job! Learn more about insurance policies!";
const PROMPT: &str = "Press [R] to restart or [Q] to quit";

/// Rewrites `scene` to show the current frame of `session`.
pub fn populate(scene: &mut Scene, session: &Session) {
    scene.clear_dynamic();
    let config = session.config();
    scene.width = config.screen.width;
    scene.height = config.screen.height;

    let world = session.world();
    let effects = session.effects();
    let weather = session.weather();
    let background = session.background();
    let lanes = query::lane_baselines(world);
    let horizon = lanes.first().copied().unwrap_or(scene.height);

    scene.shake_offset = effects.shake_offset();

    let (top, bottom) = weather.sky_colors();
    scene.sky = SkyPresentation {
        top: top.into(),
        bottom: bottom.into(),
        horizon,
    };
    scene.sun = weather.sun().map(|sun| SunPresentation {
        center: sun.center,
        radius: sun.radius,
        color: SUN_COLOR.faded(sun.alpha),
    });
    scene.star_alpha = weather.star_alpha();
    scene.stars.extend(background.stars().iter().map(|star| StarPresentation {
        position: star.position,
        size: star.size,
    }));
    scene.ground_top = horizon - GROUND_OFFSET;
    scene
        .buildings
        .extend(background.buildings().iter().map(|building| BuildingPresentation {
            bounds: building.bounds(),
            color: building.color().into(),
            windows: building.lit_windows().collect(),
        }));
    if let Some(caps) = weather.snow_caps() {
        scene.snow_caps.extend_from_slice(caps.depths());
    }

    populate_road(scene, session, lanes);

    scene
        .obstacles
        .extend(query::obstacles(world).iter().map(|obstacle| ObstaclePresentation {
            risk: obstacle.risk,
            bounds: obstacle.bounds,
        }));
    scene
        .boosters
        .extend(query::boosters(world).iter().map(|booster| BoosterPresentation {
            policy: booster.policy,
            bounds: booster.bounds,
            pulse: booster_pulse(booster.pulse_phase),
        }));
    let player = query::player(world);
    scene.player = Some(PlayerPresentation {
        bounds: player.bounds,
        tilt_degrees: player.tilt_degrees,
        anim_phase: player.anim_phase,
        airborne: player.airborne,
    });

    scene
        .particles
        .extend(effects.particles().iter().map(|particle| ParticlePresentation {
            position: particle.position(),
            size: particle.size(),
            color: particle.color().into(),
        }));
    for pool in [weather.rain(), weather.snowfall()] {
        let kind = pool.kind();
        scene
            .precipitation
            .extend(pool.drops().iter().map(|drop| match kind {
                PrecipitationKind::Rain => DropletPresentation::Rain {
                    head: drop.position,
                    tail: drop.position - drop.velocity.normalize_or_zero() * drop.size,
                },
                PrecipitationKind::Snow => DropletPresentation::Snow {
                    center: drop.position,
                    radius: drop.size,
                },
            }));
    }

    populate_hud(scene, session);

    scene.toast = effects.toast().map(|toast| ToastPresentation {
        message: toast.message.to_owned(),
        alpha: f32::from(toast.alpha) / 255.0,
    });
    scene.overlay = overlay(query::game_state(world), query::score(world));
}

fn populate_road(scene: &mut Scene, session: &Session, lanes: &[f32]) {
    let config = session.config();
    let world = session.world();
    let player_height = config.track.player_height;
    let first = lanes.first().copied().unwrap_or(scene.height);
    let last = lanes.last().copied().unwrap_or(scene.height);

    let road = &mut scene.road;
    road.top = first - player_height * ROAD_TOP_FACTOR;
    road.bottom_curb = last + player_height * ROAD_BOTTOM_FACTOR;
    road.separators
        .extend(lanes.windows(2).map(|pair| (pair[0] + pair[1]) * 0.5));
    road.dash_offset = dash_offset(
        query::elapsed(world).as_secs_f32(),
        query::world_speed(world),
    );
    road.dash_length = DASH_LENGTH;
    road.dash_gap = DASH_GAP;
    road.dash_thickness = DASH_THICKNESS;
    road.curb_thickness = CURB_THICKNESS;
}

fn populate_hud(scene: &mut Scene, session: &Session) {
    let world = session.world();
    let health = query::health(world);
    let policies = query::active_policies(world);

    let hud = &mut scene.hud;
    hud.clock = format_clock(query::time_left(world));
    hud.score = format!("Saved: {} RUB", format_amount(query::score(world)));
    hud.hearts
        .extend((0..query::max_health(world)).map(|index| index < health));
    hud.heart_color = health_color(health);
    hud.badges.extend(
        PolicyKind::ALL
            .into_iter()
            .filter(|policy| policies.contains(*policy))
            .map(|policy| PolicyBadge {
                policy,
                color: policy.color().into(),
            }),
    );
}

/// Scroll offset of the first lane dash, in `(-pattern, 0]`.
fn dash_offset(elapsed_seconds: f32, world_speed: f32) -> f32 {
    let pattern = DASH_LENGTH + DASH_GAP;
    let travelled = elapsed_seconds * world_speed * DASH_SCROLL_FACTOR;
    if travelled.is_finite() {
        -travelled.rem_euclid(pattern)
    } else {
        0.0
    }
}

fn booster_pulse(phase: f32) -> f32 {
    0.9 + 0.1 * phase.sin()
}

fn overlay(state: GameState, score: u64) -> Option<OverlayPresentation> {
    let (title, title_color, blurb) = match state {
        GameState::Playing => return None,
        GameState::Win => (
            VICTORY_TITLE,
            Color::from_rgb_u8(0, 255, 0),
            Some(VICTORY_BLURB.to_owned()),
        ),
        GameState::GameOver => (DEFEAT_TITLE, Color::from_rgb_u8(255, 0, 0), None),
    };
    Some(OverlayPresentation {
        title: title.to_owned(),
        title_color,
        score: format!("Total saved: {} RUB", format_amount(score)),
        blurb,
        prompt: PROMPT.to_owned(),
        leaderboard: mock_leaderboard(score),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use risk_rush_core::GameConfig;

    #[test]
    fn dashes_scroll_left_and_wrap() {
        assert_eq!(dash_offset(0.0, 4.5), 0.0);
        assert!((dash_offset(1.0, 4.5) + 45.0).abs() < 1e-4);
        assert!((dash_offset(3.0, 4.5) + 35.0).abs() < 1e-3);
        assert_eq!(dash_offset(f32::INFINITY, 4.5), 0.0);
    }

    #[test]
    fn booster_pulse_stays_in_glow_range() {
        for step in 0..64 {
            let pulse = booster_pulse(step as f32 * 0.25);
            assert!((0.8..=1.0).contains(&pulse));
        }
    }

    #[test]
    fn overlay_appears_only_after_conclusion() {
        assert!(overlay(GameState::Playing, 0).is_none());

        let victory = overlay(GameState::Win, 45_000).expect("win overlay");
        assert_eq!(victory.title, VICTORY_TITLE);
        assert_eq!(victory.score, "Total saved: 45,000 RUB");
        assert!(victory.blurb.is_some());
        assert_eq!(victory.leaderboard.len(), 3);

        let defeat = overlay(GameState::GameOver, 0).expect("defeat overlay");
        assert_eq!(defeat.title, DEFEAT_TITLE);
        assert!(defeat.blurb.is_none());
    }

    #[test]
    fn fresh_session_populates_every_layer() {
        let session = Session::new(&GameConfig::default(), 7);
        let mut scene = Scene::new(1.0, 1.0);
        populate(&mut scene, &session);

        assert_eq!((scene.width, scene.height), (800.0, 600.0));
        assert_eq!(scene.sky.horizon, 348.0);
        assert_eq!(scene.ground_top, 198.0);
        assert_eq!(scene.road.top, 304.0);
        assert_eq!(scene.road.bottom_curb, 539.0);
        assert_eq!(scene.road.separators, vec![393.0, 483.0]);
        assert_eq!(scene.buildings.len(), 24);
        assert_eq!(scene.stars.len(), 100);
        assert!(scene.snow_caps.is_empty());
        assert!(scene.player.is_some());
        assert_eq!(scene.hud.clock, "01:30");
        assert_eq!(scene.hud.score, "Saved: 0 RUB");
        assert_eq!(scene.hud.hearts, vec![true, true, true]);
        assert!(scene.hud.badges.is_empty());
        assert!(scene.overlay.is_none());
    }
}
