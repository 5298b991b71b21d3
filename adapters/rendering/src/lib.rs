#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Risk Rush adapters.

mod layout;
mod scene;

use anyhow::Result as AnyResult;
use risk_rush_core::Rgb;
use std::time::Duration;

pub use layout::{
    format_clock, health_color, mock_leaderboard, split_toast_lines, LeaderboardRow, ToastLayout,
    PLAYER_NAME, TOAST_LINE_GAP, TOAST_MARGIN, TOAST_PADDING,
};
pub use scene::{
    BoosterPresentation, BuildingPresentation, DropletPresentation, HudPresentation,
    ObstaclePresentation, OverlayPresentation, ParticlePresentation, PlayerPresentation,
    PolicyBadge, RoadPresentation, Scene, SkyPresentation, StarPresentation, SunPresentation,
    ToastPresentation,
};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Creates a color from byte RGBA values.
    #[must_use]
    pub const fn from_rgba_u8(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: alpha as f32 / 255.0,
        }
    }

    /// Returns the color with its alpha multiplied by `factor`.
    #[must_use]
    pub fn faded(self, factor: f32) -> Self {
        Self {
            alpha: self.alpha * factor.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Component-wise blend toward `other`, including alpha; `t` is clamped to `0..=1`.
    #[must_use]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        let mix = |from: f32, to: f32| from + (to - from) * t;
        Self {
            red: mix(self.red, other.red),
            green: mix(self.green, other.green),
            blue: mix(self.blue, other.blue),
            alpha: mix(self.alpha, other.alpha),
        }
    }

    /// Subtracts `amount` from every colour channel, saturating at black.
    #[must_use]
    pub fn darken(self, amount: f32) -> Self {
        let shade = |channel: f32| (channel - amount).max(0.0);
        Self {
            red: shade(self.red),
            green: shade(self.green),
            blue: shade(self.blue),
            alpha: self.alpha,
        }
    }
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Self::from_rgb_u8(rgb.red(), rgb.green(), rgb.blue())
    }
}

/// Edge-triggered commands gathered by adapters once per frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct FrameInput {
    /// Move one lane towards the top of the screen.
    pub lane_up: bool,
    /// Move one lane towards the bottom of the screen.
    pub lane_down: bool,
    /// Start a jump.
    pub jump: bool,
    /// Start a new session once the current one concluded.
    pub restart: bool,
    /// Leave the game once the current session concluded.
    pub quit: bool,
}

/// Result reported by the scene update closure for a single frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct FrameOutcome {
    /// The backend should close its window and return.
    pub exit_requested: bool,
    /// Time spent advancing the simulation.
    pub simulation: Duration,
    /// Time spent rebuilding the scene from simulation state.
    pub scene_population: Duration,
}

impl FrameOutcome {
    /// Outcome of a frame after which the loop keeps running.
    #[must_use]
    pub const fn proceed(simulation: Duration, scene_population: Duration) -> Self {
        Self {
            exit_requested: false,
            simulation,
            scene_population,
        }
    }

    /// Outcome requesting the backend to stop.
    #[must_use]
    pub const fn exit() -> Self {
        Self {
            exit_requested: true,
            simulation: Duration::ZERO,
            scene_population: Duration::ZERO,
        }
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Scene content that should be displayed first.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            scene,
        }
    }
}

/// Rendering backend capable of presenting Risk Rush scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the measured frame delta
    /// and the input captured by the adapter, and rebuilds the scene before it
    /// is drawn. Returning an outcome with `exit_requested` ends the loop.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) -> FrameOutcome + 'static;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_converts_to_normalised_channels() {
        let color = Color::from(Rgb::from_rgb(255, 0, 51));
        assert_eq!(color, Color::new(1.0, 0.0, 0.2, 1.0));
    }

    #[test]
    fn faded_scales_alpha_only() {
        let color = Color::from_rgba_u8(0, 0, 0, 200).faded(0.5);
        assert!((color.alpha - 100.0 / 255.0).abs() < 1e-6);
        assert_eq!(color.red, 0.0);
    }

    #[test]
    fn lerp_blends_every_channel_and_clamps_the_factor() {
        let from = Color::new(0.0, 0.0, 0.0, 1.0);
        let to = Color::new(1.0, 0.5, 0.0, 0.0);
        assert_eq!(from.lerp(to, 0.5), Color::new(0.5, 0.25, 0.0, 0.5));
        assert_eq!(from.lerp(to, 4.0), to);
        assert_eq!(from.lerp(to, f32::NAN), from);
    }

    #[test]
    fn darken_saturates_at_black_and_keeps_alpha() {
        let shaded = Color::new(0.05, 0.5, 1.0, 0.4).darken(0.1);
        assert_eq!(shaded.red, 0.0);
        assert!((shaded.green - 0.4).abs() < 1e-6);
        assert!((shaded.blue - 0.9).abs() < 1e-6);
        assert_eq!(shaded.alpha, 0.4);
    }

    #[test]
    fn exit_outcome_requests_exit() {
        assert!(FrameOutcome::exit().exit_requested);
        assert!(!FrameOutcome::default().exit_requested);
    }
}
