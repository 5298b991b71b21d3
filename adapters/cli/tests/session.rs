use std::time::Duration;

use risk_rush_cli::{Control, Session, Supervisor};
use risk_rush_core::{Event, GameConfig, GameState};
use risk_rush_rendering::FrameInput;
use risk_rush_world::query;

const FRAME: Duration = Duration::from_micros(16_667);

fn scripted_input(frame: usize) -> FrameInput {
    FrameInput {
        lane_up: frame % 240 == 60,
        lane_down: frame % 240 == 180,
        jump: frame % 150 == 90,
        ..FrameInput::default()
    }
}

#[derive(Debug, PartialEq)]
struct ReplayOutcome {
    events: Vec<Event>,
    score: u64,
    health: u32,
    obstacle_positions: Vec<(f32, f32)>,
}

fn replay(seed: u64, frames: usize) -> ReplayOutcome {
    let mut session = Session::new(&GameConfig::default(), seed);
    let mut events = Vec::new();
    for frame in 0..frames {
        events.extend_from_slice(session.step(FRAME, scripted_input(frame)));
    }

    let world = session.world();
    ReplayOutcome {
        events,
        score: query::score(world),
        health: query::health(world),
        obstacle_positions: query::obstacles(world)
            .iter()
            .map(|obstacle| (obstacle.bounds.min().x, obstacle.bounds.min().y))
            .collect(),
    }
}

fn short_config(seconds: f32) -> GameConfig {
    let mut config = GameConfig::default();
    config.session.duration = seconds;
    config
}

#[test]
fn same_seed_and_script_replay_identically() {
    let first = replay(42, 1_800);
    let second = replay(42, 1_800);

    assert_eq!(first, second, "replay diverged between runs");
    assert!(first
        .events
        .iter()
        .any(|event| matches!(event, Event::ObstacleSpawned { .. })));
    assert!(first.events.iter().any(|event| matches!(event, Event::Jumped)));
}

#[test]
fn different_seeds_diverge() {
    assert_ne!(replay(1, 900), replay(2, 900));
}

#[test]
fn frame_delta_is_clamped() {
    let mut session = Session::new(&GameConfig::default(), 3);
    let events = session.step(Duration::from_secs(2), FrameInput::default());

    assert!(events.contains(&Event::TimeAdvanced {
        dt: Duration::from_secs_f32(0.05)
    }));
    assert_eq!(
        query::elapsed(session.world()),
        Duration::from_secs_f32(0.05)
    );
}

#[test]
fn session_wins_once_the_clock_runs_out_and_then_freezes() {
    let mut session = Session::new(&short_config(0.5), 9);
    let mut frames = 0;
    while session.game_state() == GameState::Playing && frames < 120 {
        let _ = session.step(FRAME, FrameInput::default());
        frames += 1;
    }
    assert_eq!(session.game_state(), GameState::Win);

    let elapsed = query::elapsed(session.world());
    let lane = query::player(session.world()).lane;
    let events = session.step(
        FRAME,
        FrameInput {
            lane_up: true,
            jump: true,
            ..FrameInput::default()
        },
    );

    assert!(events.is_empty());
    assert_eq!(query::elapsed(session.world()), elapsed);
    assert_eq!(query::player(session.world()).lane, lane);
}

#[test]
fn restart_and_quit_are_ignored_while_playing() {
    let mut supervisor = Supervisor::new(GameConfig::default(), 11);
    let input = FrameInput {
        restart: true,
        quit: true,
        ..FrameInput::default()
    };

    assert_eq!(supervisor.frame(FRAME, input), Control::Continue);
    assert_eq!(supervisor.restarts(), 0);
    assert_eq!(supervisor.session().game_state(), GameState::Playing);
    assert!(query::elapsed(supervisor.session().world()) > Duration::ZERO);
}

#[test]
fn restart_rebuilds_the_session_with_the_next_seed() {
    let mut supervisor = Supervisor::new(short_config(0.2), 100);
    for _ in 0..60 {
        assert_eq!(
            supervisor.frame(FRAME, FrameInput::default()),
            Control::Continue
        );
    }
    assert_eq!(supervisor.session().game_state(), GameState::Win);

    let restart = FrameInput {
        restart: true,
        ..FrameInput::default()
    };
    assert_eq!(supervisor.frame(FRAME, restart), Control::Continue);

    let session = supervisor.session();
    assert_eq!(supervisor.restarts(), 1);
    assert_eq!(session.seed(), 101);
    assert_eq!(session.game_state(), GameState::Playing);
    assert_eq!(query::elapsed(session.world()), Duration::ZERO);
    assert_eq!(query::score(session.world()), 0);
    assert!(session.effects().particles().is_empty());
}

#[test]
fn quit_ends_the_loop_after_conclusion() {
    let mut supervisor = Supervisor::new(short_config(0.1), 5);
    for _ in 0..30 {
        let _ = supervisor.frame(FRAME, FrameInput::default());
    }
    let quit = FrameInput {
        quit: true,
        ..FrameInput::default()
    };

    assert_eq!(supervisor.frame(FRAME, quit), Control::Quit);
}
