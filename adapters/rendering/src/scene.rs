use glam::Vec2;
use risk_rush_core::{Aabb, PolicyKind, RiskKind};

use crate::{layout::LeaderboardRow, Color};

/// Vertical sky gradient drawn above the horizon.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SkyPresentation {
    /// Colour at the top edge of the screen.
    pub top: Color,
    /// Colour at the horizon.
    pub bottom: Color,
    /// Screen-space y where the gradient ends.
    pub horizon: f32,
}

/// Sun disc.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SunPresentation {
    /// Centre in screen coordinates.
    pub center: Vec2,
    /// Radius in pixels.
    pub radius: f32,
    /// Fill colour including opacity.
    pub color: Color,
}

/// Background star.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StarPresentation {
    /// Centre in screen coordinates.
    pub position: Vec2,
    /// Radius in pixels.
    pub size: f32,
}

/// Building silhouette with its lit windows.
#[derive(Clone, Debug, PartialEq)]
pub struct BuildingPresentation {
    /// Facade rectangle.
    pub bounds: Aabb,
    /// Facade colour.
    pub color: Color,
    /// Lit window rectangles.
    pub windows: Vec<Aabb>,
}

/// Road surface, lane separators and curbs.
#[derive(Clone, Debug, PartialEq)]
pub struct RoadPresentation {
    /// Screen-space y of the upper road edge.
    pub top: f32,
    /// Screen-space y of the lower curb.
    pub bottom_curb: f32,
    /// Screen-space y of every dashed separator.
    pub separators: Vec<f32>,
    /// Horizontal offset of the first dash, in `(-pattern, 0]`.
    pub dash_offset: f32,
    /// Length of a painted dash.
    pub dash_length: f32,
    /// Gap between dashes.
    pub dash_gap: f32,
    /// Dash thickness.
    pub dash_thickness: f32,
    /// Curb thickness.
    pub curb_thickness: f32,
}

/// Obstacle drawn in its lane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ObstaclePresentation {
    /// Risk category; selects the silhouette.
    pub risk: RiskKind,
    /// Screen-space rectangle.
    pub bounds: Aabb,
}

/// Pulsing booster pickup.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoosterPresentation {
    /// Policy category; selects colour and letter.
    pub policy: PolicyKind,
    /// Screen-space rectangle.
    pub bounds: Aabb,
    /// Glow scale in `0.8..=1.0`.
    pub pulse: f32,
}

/// Player character.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerPresentation {
    /// Drawn rectangle including jump and idle offsets.
    pub bounds: Aabb,
    /// Tilt in degrees; positive leans forward.
    pub tilt_degrees: f32,
    /// Idle animation phase in radians.
    pub anim_phase: f32,
    /// Whether the player is mid-jump.
    pub airborne: bool,
}

/// Short-lived particle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticlePresentation {
    /// Centre in screen coordinates.
    pub position: Vec2,
    /// Radius in pixels.
    pub size: f32,
    /// Fill colour.
    pub color: Color,
}

/// Rain streak or snowflake.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DropletPresentation {
    /// Slanted rain streak from `head` to `tail`.
    Rain {
        /// Leading end of the streak.
        head: Vec2,
        /// Trailing end of the streak.
        tail: Vec2,
    },
    /// Round snowflake.
    Snow {
        /// Centre in screen coordinates.
        center: Vec2,
        /// Radius in pixels.
        radius: f32,
    },
}

/// Active policy badge shown in the HUD.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PolicyBadge {
    /// Policy represented by the badge.
    pub policy: PolicyKind,
    /// Badge fill colour.
    pub color: Color,
}

/// Heads-up display content.
#[derive(Clone, Debug, PartialEq)]
pub struct HudPresentation {
    /// Remaining session time formatted as `MM:SS`.
    pub clock: String,
    /// Score line.
    pub score: String,
    /// One entry per budget unit; `true` for remaining ones.
    pub hearts: Vec<bool>,
    /// Colour of the heart row.
    pub heart_color: Color,
    /// Active policies in category order.
    pub badges: Vec<PolicyBadge>,
}

/// Current toast notification.
#[derive(Clone, Debug, PartialEq)]
pub struct ToastPresentation {
    /// Full message; backends lay it out with [`crate::ToastLayout`].
    pub message: String,
    /// Opacity in `0..=1`.
    pub alpha: f32,
}

/// Terminal overlay shown once the session concluded.
#[derive(Clone, Debug, PartialEq)]
pub struct OverlayPresentation {
    /// Headline.
    pub title: String,
    /// Headline colour.
    pub title_color: Color,
    /// Final score line.
    pub score: String,
    /// Extra line shown after a victory.
    pub blurb: Option<String>,
    /// Key hint line.
    pub prompt: String,
    /// Mock leaderboard rows in rank order.
    pub leaderboard: Vec<LeaderboardRow>,
}

/// Everything a backend draws for one frame, in back-to-front order.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Logical screen width.
    pub width: f32,
    /// Logical screen height.
    pub height: f32,
    /// Camera offset applied to every world layer.
    pub shake_offset: Vec2,
    /// Sky gradient.
    pub sky: SkyPresentation,
    /// Sun disc, if visible.
    pub sun: Option<SunPresentation>,
    /// Stars; drawn with `star_alpha`.
    pub stars: Vec<StarPresentation>,
    /// Star opacity in `0..=1`.
    pub star_alpha: f32,
    /// Screen-space y where the ground band starts.
    pub ground_top: f32,
    /// Building silhouettes in back-to-front order.
    pub buildings: Vec<BuildingPresentation>,
    /// Snow cap depths across a unit width; empty while no snow lies.
    pub snow_caps: Vec<f32>,
    /// Road surface.
    pub road: RoadPresentation,
    /// Obstacles.
    pub obstacles: Vec<ObstaclePresentation>,
    /// Boosters.
    pub boosters: Vec<BoosterPresentation>,
    /// Player.
    pub player: Option<PlayerPresentation>,
    /// Particles.
    pub particles: Vec<ParticlePresentation>,
    /// Rain and snow.
    pub precipitation: Vec<DropletPresentation>,
    /// HUD content.
    pub hud: HudPresentation,
    /// Toast notification, if any.
    pub toast: Option<ToastPresentation>,
    /// Terminal overlay, if the session concluded.
    pub overlay: Option<OverlayPresentation>,
}

impl Scene {
    /// Creates an empty scene of the given logical size.
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            shake_offset: Vec2::ZERO,
            sky: SkyPresentation {
                top: Color::from_rgb_u8(0, 0, 0),
                bottom: Color::from_rgb_u8(0, 0, 0),
                horizon: height,
            },
            sun: None,
            stars: Vec::new(),
            star_alpha: 0.0,
            ground_top: height,
            buildings: Vec::new(),
            snow_caps: Vec::new(),
            road: RoadPresentation {
                top: height,
                bottom_curb: height,
                separators: Vec::new(),
                dash_offset: 0.0,
                dash_length: 0.0,
                dash_gap: 0.0,
                dash_thickness: 0.0,
                curb_thickness: 0.0,
            },
            obstacles: Vec::new(),
            boosters: Vec::new(),
            player: None,
            particles: Vec::new(),
            precipitation: Vec::new(),
            hud: HudPresentation {
                clock: String::new(),
                score: String::new(),
                hearts: Vec::new(),
                heart_color: Color::from_rgb_u8(255, 255, 255),
                badges: Vec::new(),
            },
            toast: None,
            overlay: None,
        }
    }

    /// Empties every per-frame collection while keeping allocations.
    pub fn clear_dynamic(&mut self) {
        self.stars.clear();
        self.buildings.clear();
        self.snow_caps.clear();
        self.road.separators.clear();
        self.obstacles.clear();
        self.boosters.clear();
        self.particles.clear();
        self.precipitation.clear();
        self.hud.hearts.clear();
        self.hud.badges.clear();
        self.sun = None;
        self.player = None;
        self.toast = None;
        self.overlay = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_dynamic_empties_layers_but_keeps_size() {
        let mut scene = Scene::new(800.0, 600.0);
        scene.stars.push(StarPresentation {
            position: Vec2::new(1.0, 2.0),
            size: 1.0,
        });
        scene.road.separators.push(393.0);
        scene.toast = Some(ToastPresentation {
            message: "KASKO ACTIVATED!".to_owned(),
            alpha: 1.0,
        });

        scene.clear_dynamic();

        assert!(scene.stars.is_empty());
        assert!(scene.road.separators.is_empty());
        assert!(scene.toast.is_none());
        assert_eq!((scene.width, scene.height), (800.0, 600.0));
    }
}
