use risk_rush_core::Rgb;

/// Weather states visited by the environment cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WeatherKind {
    /// Blue sky with the sun arcing overhead.
    Clear,
    /// Orange sky with a low sun that fades out.
    Sunset,
    /// Dark sky with stars and occasional rain.
    Night,
    /// Pale sky with snowfall.
    Snowy,
    /// Warm sky with the sun climbing from the horizon.
    Sunrise,
}

impl WeatherKind {
    /// Every weather state in cycle order starting from `Clear`.
    pub const CYCLE: [WeatherKind; 5] = [
        Self::Clear,
        Self::Sunset,
        Self::Night,
        Self::Snowy,
        Self::Sunrise,
    ];

    /// Deterministic successor in the fixed cycle.
    #[must_use]
    pub const fn successor(self) -> Self {
        match self {
            Self::Clear => Self::Sunset,
            Self::Sunset => Self::Night,
            Self::Night => Self::Snowy,
            Self::Snowy => Self::Sunrise,
            Self::Sunrise => Self::Clear,
        }
    }

    /// Static rendering and precipitation parameters of the weather.
    #[must_use]
    pub const fn profile(self) -> WeatherProfile {
        match self {
            Self::Clear => WeatherProfile {
                sky_top: Rgb::from_rgb(100, 180, 255),
                sky_bottom: Rgb::from_rgb(180, 220, 255),
                dwell: (8.0, 12.0),
                rain_chance: 0.0,
                snow_chance: 0.0,
                stars_visible: false,
                sun_visible: true,
                sun_height: 0.15,
            },
            Self::Sunset => WeatherProfile {
                sky_top: Rgb::from_rgb(255, 150, 50),
                sky_bottom: Rgb::from_rgb(255, 200, 100),
                dwell: (5.0, 10.0),
                rain_chance: 0.0,
                snow_chance: 0.0,
                stars_visible: false,
                sun_visible: true,
                sun_height: 0.8,
            },
            Self::Night => WeatherProfile {
                sky_top: Rgb::from_rgb(20, 20, 40),
                sky_bottom: Rgb::from_rgb(40, 40, 80),
                dwell: (10.0, 15.0),
                rain_chance: 0.3,
                snow_chance: 0.0,
                stars_visible: true,
                sun_visible: false,
                sun_height: 0.0,
            },
            Self::Snowy => WeatherProfile {
                sky_top: Rgb::from_rgb(200, 200, 220),
                sky_bottom: Rgb::from_rgb(220, 220, 240),
                dwell: (8.0, 12.0),
                rain_chance: 0.0,
                snow_chance: 1.0,
                stars_visible: false,
                sun_visible: false,
                sun_height: 0.5,
            },
            Self::Sunrise => WeatherProfile {
                sky_top: Rgb::from_rgb(255, 120, 50),
                sky_bottom: Rgb::from_rgb(255, 180, 120),
                dwell: (5.0, 10.0),
                rain_chance: 0.0,
                snow_chance: 0.0,
                stars_visible: false,
                sun_visible: true,
                sun_height: 0.2,
            },
        }
    }

    /// Lower-case name used in logs.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Clear => "clear",
            Self::Sunset => "sunset",
            Self::Night => "night",
            Self::Snowy => "snowy",
            Self::Sunrise => "sunrise",
        }
    }
}

/// Rendering and precipitation parameters of a weather state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WeatherProfile {
    /// Colour at the top of the sky gradient.
    pub sky_top: Rgb,
    /// Colour where the sky meets the horizon.
    pub sky_bottom: Rgb,
    /// Inclusive range the dwell time is drawn from, in seconds.
    pub dwell: (f32, f32),
    /// Fraction of the rain pool kept populated.
    pub rain_chance: f32,
    /// Fraction of the snow pool kept populated.
    pub snow_chance: f32,
    /// Whether stars are drawn.
    pub stars_visible: bool,
    /// Whether a sun disc is drawn.
    pub sun_visible: bool,
    /// Resting sun height as a fraction of the sky from the top.
    pub sun_height: f32,
}
