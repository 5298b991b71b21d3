use risk_rush_core::{Command, Event, GameConfig, GameState, PolicyKind, RiskKind};
use risk_rush_system_collision::Collision;
use risk_rush_world::{self as world, query, World};

fn spawn(world: &mut World, command: Command) {
    let mut events = Vec::new();
    world::apply(world, command, &mut events);
}

fn resolve_frame(world: &mut World, collision: &mut Collision) -> Vec<Event> {
    let mut commands = Vec::new();
    collision.handle(
        query::game_state(world),
        &query::player(world),
        &query::boosters(world),
        &query::obstacles(world),
        &mut commands,
    );
    let mut events = Vec::new();
    for command in commands {
        world::apply(world, command, &mut events);
    }
    events
}

#[test]
fn same_frame_booster_protects_against_matching_risk() {
    let mut world = World::new(&GameConfig::default());
    spawn(
        &mut world,
        Command::SpawnObstacle {
            risk: RiskKind::Accident,
            lane: 1,
            x: 130.0,
        },
    );
    spawn(
        &mut world,
        Command::SpawnBooster {
            policy: PolicyKind::Kasko,
            lane: 1,
            x: 140.0,
        },
    );

    let events = resolve_frame(&mut world, &mut Collision::new());

    assert!(matches!(
        events.as_slice(),
        [
            Event::PolicyActivated {
                policy: PolicyKind::Kasko,
                newly_added: true,
                ..
            },
            Event::RiskCovered {
                risk: RiskKind::Accident,
                cost: 50_000,
                ..
            },
        ]
    ));
    assert_eq!(query::score(&world), 50_000);
    assert!(query::active_policies(&world).is_empty());
}

#[test]
fn fatal_hit_truncates_the_rest_of_the_frame() {
    let mut world = World::new(&GameConfig::default());
    for risk in [RiskKind::Tree, RiskKind::Phone, RiskKind::Bill, RiskKind::Accident] {
        spawn(&mut world, Command::SpawnObstacle { risk, lane: 1, x: 140.0 });
    }

    let events = resolve_frame(&mut world, &mut Collision::new());

    let struck: Vec<RiskKind> = events
        .iter()
        .filter_map(|event| match event {
            Event::RiskStruck { risk, .. } => Some(*risk),
            _ => None,
        })
        .collect();
    assert_eq!(struck, vec![RiskKind::Tree, RiskKind::Phone, RiskKind::Bill]);
    assert_eq!(query::game_state(&world), GameState::GameOver);
    let remaining: Vec<RiskKind> = query::obstacles(&world).iter().map(|o| o.risk).collect();
    assert_eq!(remaining, vec![RiskKind::Accident]);
}

#[test]
fn entities_in_other_lanes_are_ignored() {
    let mut world = World::new(&GameConfig::default());
    spawn(
        &mut world,
        Command::SpawnObstacle {
            risk: RiskKind::Tree,
            lane: 0,
            x: 140.0,
        },
    );
    spawn(
        &mut world,
        Command::SpawnBooster {
            policy: PolicyKind::Dms,
            lane: 2,
            x: 140.0,
        },
    );

    let events = resolve_frame(&mut world, &mut Collision::new());
    assert!(events.is_empty());
    assert_eq!(query::health(&world), 3);
}
