#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Risk Rush.
//!
//! The game is silent, so macroquad is built without its `audio` feature.
//! Drawing lives in the local `draw` module; this module owns the window,
//! keyboard polling, frame pacing and the per-second timing report.

mod draw;

use anyhow::Result;
use macroquad::input::{is_key_pressed, KeyCode};
use risk_rush_rendering::{FrameInput, Presentation, RenderingBackend, Scene};
use std::{
    fmt,
    ops::AddAssign,
    time::{Duration, Instant},
};

/// Snapshot of edge-triggered keys observed during a single frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct KeyboardShortcuts {
    /// `Escape` closes the window immediately.
    close_requested: bool,
    /// `Up`, `W`, `Left` or `A`.
    lane_up: bool,
    /// `Down`, `S`, `Right` or `D`.
    lane_down: bool,
    /// `Space`.
    jump: bool,
    /// `R`.
    restart: bool,
    /// `Q`.
    quit: bool,
}

impl KeyboardShortcuts {
    fn poll() -> Self {
        let any = |keys: &[KeyCode]| keys.iter().any(|key| is_key_pressed(*key));
        Self {
            close_requested: is_key_pressed(KeyCode::Escape),
            lane_up: any(&[KeyCode::Up, KeyCode::W, KeyCode::Left, KeyCode::A]),
            lane_down: any(&[KeyCode::Down, KeyCode::S, KeyCode::Right, KeyCode::D]),
            jump: is_key_pressed(KeyCode::Space),
            restart: is_key_pressed(KeyCode::R),
            quit: is_key_pressed(KeyCode::Q),
        }
    }

    fn frame_input(self) -> FrameInput {
        FrameInput {
            lane_up: self.lane_up,
            lane_down: self.lane_down,
            jump: self.jump,
            restart: self.restart,
            quit: self.quit,
        }
    }
}

/// Rendering backend implemented on top of macroquad.
#[derive(Debug, Default)]
pub struct MacroquadBackend {
    vsync: Option<bool>,
    show_fps: bool,
    fps_cap: Option<u32>,
    frame_clamp: Option<Duration>,
}

impl MacroquadBackend {
    /// Returns a backend that keeps the platform's default presentation mode.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Synchronises presentation with the display refresh rate, or disables it.
    #[must_use]
    pub fn with_vsync(mut self, enabled: bool) -> Self {
        self.vsync = Some(enabled);
        self
    }

    /// Logs a timing report once per second.
    #[must_use]
    pub fn with_show_fps(mut self, show: bool) -> Self {
        self.show_fps = show;
        self
    }

    /// Caps the frame rate by sleeping out the remainder of each frame budget.
    #[must_use]
    pub fn with_fps_cap(mut self, fps_cap: Option<u32>) -> Self {
        self.fps_cap = fps_cap;
        self
    }

    /// Frames longer than `max_frame_dt` are counted as clamped in the timing report.
    #[must_use]
    pub fn with_frame_clamp(mut self, max_frame_dt: Duration) -> Self {
        self.frame_clamp = Some(max_frame_dt);
        self
    }
}

/// Sleeps out the remainder of a fixed frame budget.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct FramePacer {
    budget: Option<Duration>,
}

impl FramePacer {
    fn new(fps_cap: Option<u32>) -> Self {
        let budget = fps_cap
            .filter(|fps| *fps > 0)
            .map(|fps| Duration::from_secs(1) / fps);
        Self { budget }
    }

    /// Time left in the frame budget after `spent`, if any.
    fn remaining(&self, spent: Duration) -> Option<Duration> {
        self.budget
            .and_then(|budget| budget.checked_sub(spent))
            .filter(|remaining| !remaining.is_zero())
    }

    fn wait(&self, frame_start: Instant) {
        if let Some(remaining) = self.remaining(frame_start.elapsed()) {
            std::thread::sleep(remaining);
        }
    }
}

const REPORT_WINDOW: Duration = Duration::from_secs(1);

/// Where the time of one frame went.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct FrameBreakdown {
    frame: Duration,
    simulation: Duration,
    scene_population: Duration,
    draw: Duration,
}

impl FrameBreakdown {
    fn averaged_over(self, frames: u32) -> Self {
        let frames = frames.max(1);
        Self {
            frame: self.frame / frames,
            simulation: self.simulation / frames,
            scene_population: self.scene_population / frames,
            draw: self.draw / frames,
        }
    }
}

impl AddAssign for FrameBreakdown {
    fn add_assign(&mut self, other: Self) {
        self.frame += other.frame;
        self.simulation += other.simulation;
        self.scene_population += other.scene_population;
        self.draw += other.draw;
    }
}

/// Accumulates frame breakdowns and closes a report once per window of frame time.
#[derive(Clone, Copy, Debug, Default)]
struct FrameTimings {
    clamp: Option<Duration>,
    frames: u32,
    clamped: u32,
    totals: FrameBreakdown,
}

/// Averages over one closed window.
#[derive(Clone, Copy, Debug, PartialEq)]
struct TimingReport {
    frames_per_second: f32,
    average: FrameBreakdown,
    clamped: u32,
}

impl FrameTimings {
    fn new(clamp: Option<Duration>) -> Self {
        Self {
            clamp,
            ..Self::default()
        }
    }

    fn record(&mut self, sample: FrameBreakdown) -> Option<TimingReport> {
        self.frames = self.frames.saturating_add(1);
        if self.clamp.is_some_and(|clamp| sample.frame > clamp) {
            self.clamped = self.clamped.saturating_add(1);
        }
        self.totals += sample;
        if self.totals.frame < REPORT_WINDOW {
            return None;
        }

        let report = TimingReport {
            frames_per_second: self.frames as f32 / self.totals.frame.as_secs_f32(),
            average: self.totals.averaged_over(self.frames),
            clamped: self.clamped,
        };
        *self = Self::new(self.clamp);
        Some(report)
    }
}

impl fmt::Display for TimingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let millis = |duration: Duration| duration.as_secs_f64() * 1_000.0;
        write!(
            f,
            "{:.1} fps | frame {:.2}ms sim {:.2}ms scene {:.2}ms draw {:.2}ms | {} clamped",
            self.frames_per_second,
            millis(self.average.frame),
            millis(self.average.simulation),
            millis(self.average.scene_population),
            millis(self.average.draw),
            self.clamped,
        )
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) -> risk_rush_rendering::FrameOutcome + 'static,
    {
        let Self {
            vsync,
            show_fps,
            fps_cap,
            frame_clamp,
        } = self;

        let Presentation {
            window_title,
            scene,
        } = presentation;

        let mut config = macroquad::window::Conf {
            window_title,
            window_width: scene.width.round() as i32,
            window_height: scene.height.round() as i32,
            window_resizable: false,
            ..macroquad::window::Conf::default()
        };
        if let Some(vsync) = vsync {
            config.platform.swap_interval = Some(i32::from(vsync));
        }

        let pacer = FramePacer::new(fps_cap);

        macroquad::Window::from_config(config, async move {
            let mut scene = scene;
            let mut timings = FrameTimings::new(frame_clamp);

            loop {
                let frame_start = Instant::now();
                let keyboard = KeyboardShortcuts::poll();
                if keyboard.close_requested {
                    log::info!("window close requested");
                    break;
                }

                let frame_dt = Duration::try_from_secs_f32(macroquad::time::get_frame_time())
                    .unwrap_or(Duration::ZERO);
                let outcome = update_scene(frame_dt, keyboard.frame_input(), &mut scene);
                if outcome.exit_requested {
                    break;
                }

                let draw_start = Instant::now();
                draw::draw_scene(&scene);
                let report = timings.record(FrameBreakdown {
                    frame: frame_dt,
                    simulation: outcome.simulation,
                    scene_population: outcome.scene_population,
                    draw: draw_start.elapsed(),
                });
                if let Some(report) = report.filter(|_| show_fps) {
                    log::info!("{report}");
                }

                pacer.wait(frame_start);
                macroquad::window::next_frame().await;
            }
        });

        Ok(())
    }
}
