use std::time::Duration;

use risk_rush_core::{Command, Event, GameConfig, GameState, LaneShift};
use risk_rush_rendering::FrameInput;
use risk_rush_system_background::Background;
use risk_rush_system_collision::Collision;
use risk_rush_system_effects::Effects;
use risk_rush_system_spawning::{Config as SpawningConfig, Spawning};
use risk_rush_system_weather::Weather;
use risk_rush_world::{self as world, query, World};

/// One game session: the world plus every system the frame loop coordinates.
///
/// The session is the single writer of all of its parts. Systems never touch
/// each other; they exchange commands and events through [`Session::step`].
#[derive(Debug)]
pub struct Session {
    config: GameConfig,
    seed: u64,
    max_frame_dt: Duration,
    world: World,
    spawning: Spawning,
    collision: Collision,
    effects: Effects,
    weather: Weather,
    background: Background,
    commands: Vec<Command>,
    events: Vec<Event>,
}

impl Session {
    /// Builds a fresh session; every random stream is derived from `seed`.
    #[must_use]
    pub fn new(config: &GameConfig, seed: u64) -> Self {
        let config = config.normalized();
        Self {
            max_frame_dt: Duration::from_secs_f32(config.screen.max_frame_dt),
            world: World::new(&config),
            spawning: Spawning::new(SpawningConfig::new(&config, seed)),
            collision: Collision::new(),
            effects: Effects::new(seed),
            weather: Weather::new(&config, seed),
            background: Background::new(&config, seed),
            commands: Vec::new(),
            events: Vec::new(),
            config,
            seed,
        }
    }

    /// Advances the session by one frame and returns the events it produced.
    ///
    /// `dt` is clamped to the configured maximum frame step before use.
    pub fn step(&mut self, dt: Duration, input: FrameInput) -> &[Event] {
        let dt = dt.min(self.max_frame_dt);
        let seconds = dt.as_secs_f32();
        self.events.clear();

        if self.game_state() == GameState::Playing {
            if input.lane_up {
                self.commands.push(Command::ShiftLane {
                    shift: LaneShift::Up,
                });
            }
            if input.lane_down {
                self.commands.push(Command::ShiftLane {
                    shift: LaneShift::Down,
                });
            }
            if input.jump {
                self.commands.push(Command::Jump);
            }
            self.commands.push(Command::Tick { dt });
            self.flush_commands();
        }

        if self.game_state() == GameState::Playing {
            self.spawning
                .handle(&self.events, GameState::Playing, &mut self.commands);
            self.commands.push(Command::AdvanceActors { dt });
            self.flush_commands();

            self.background.update(query::world_speed(&self.world));
            self.weather.update(seconds);

            self.collision.handle(
                query::game_state(&self.world),
                &query::player(&self.world),
                &query::boosters(&self.world),
                &query::obstacles(&self.world),
                &mut self.commands,
            );
            self.flush_commands();
        }

        self.effects.handle(&self.events);
        self.effects.update(seconds);
        &self.events
    }

    fn flush_commands(&mut self) {
        for command in self.commands.drain(..) {
            world::apply(&mut self.world, command, &mut self.events);
        }
    }

    /// Lifecycle state of the world.
    #[must_use]
    pub fn game_state(&self) -> GameState {
        query::game_state(&self.world)
    }

    /// Normalized tuning the session runs with.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Seed every random stream of this session was derived from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Authoritative world state.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Particles, shake and toasts.
    #[must_use]
    pub fn effects(&self) -> &Effects {
        &self.effects
    }

    /// Sky, sun, snow and precipitation.
    #[must_use]
    pub fn weather(&self) -> &Weather {
        &self.weather
    }

    /// Parallax buildings and stars.
    #[must_use]
    pub fn background(&self) -> &Background {
        &self.background
    }
}

/// Decision returned by the supervisor after each frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    /// Keep running the frame loop.
    Continue,
    /// Shut down cleanly.
    Quit,
}

/// Outer loop that rebuilds the session on restart instead of re-entering itself.
#[derive(Debug)]
pub struct Supervisor {
    config: GameConfig,
    base_seed: u64,
    restarts: u64,
    session: Session,
}

impl Supervisor {
    /// Starts the first session with `seed`.
    #[must_use]
    pub fn new(config: GameConfig, seed: u64) -> Self {
        log::info!("starting session with seed {seed}");
        Self {
            session: Session::new(&config, seed),
            config,
            base_seed: seed,
            restarts: 0,
        }
    }

    /// Runs one frame; restart and quit are honoured only once the session concluded.
    pub fn frame(&mut self, dt: Duration, input: FrameInput) -> Control {
        if self.session.game_state().is_terminal() {
            if input.quit {
                log::info!("quit requested after {} restart(s)", self.restarts);
                return Control::Quit;
            }
            if input.restart {
                self.restart();
                return Control::Continue;
            }
        }

        let _ = self.session.step(dt, input);
        Control::Continue
    }

    fn restart(&mut self) {
        self.restarts = self.restarts.saturating_add(1);
        let seed = self.base_seed.wrapping_add(self.restarts);
        log::info!("restarting session #{} with seed {seed}", self.restarts);
        self.session = Session::new(&self.config, seed);
    }

    /// Session currently being played.
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Number of restarts so far.
    #[must_use]
    pub fn restarts(&self) -> u64 {
        self.restarts
    }
}
