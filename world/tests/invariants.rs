use std::time::Duration;

use proptest::prelude::*;
use risk_rush_core::{Command, Event, GameConfig, LaneShift, PolicyKind, RiskKind};
use risk_rush_world::{self as world, query, World};

fn risk() -> impl Strategy<Value = RiskKind> {
    prop::sample::select(RiskKind::ALL.to_vec())
}

fn policy() -> impl Strategy<Value = PolicyKind> {
    prop::sample::select(PolicyKind::ALL.to_vec())
}

fn shift() -> impl Strategy<Value = LaneShift> {
    prop_oneof![Just(LaneShift::Up), Just(LaneShift::Down)]
}

#[derive(Clone, Debug)]
enum Step {
    Command(Command),
    CollideAll,
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        (1u64..60).prop_map(|ms| Step::Command(Command::Tick {
            dt: Duration::from_millis(ms)
        })),
        (1u64..60).prop_map(|ms| Step::Command(Command::AdvanceActors {
            dt: Duration::from_millis(ms)
        })),
        shift().prop_map(|shift| Step::Command(Command::ShiftLane { shift })),
        Just(Step::Command(Command::Jump)),
        (risk(), 0usize..4, 100.0f32..900.0)
            .prop_map(|(risk, lane, x)| Step::Command(Command::SpawnObstacle { risk, lane, x })),
        (policy(), 0usize..4, 100.0f32..900.0).prop_map(|(policy, lane, x)| {
            Step::Command(Command::SpawnBooster { policy, lane, x })
        }),
        Just(Step::CollideAll),
    ]
}

fn collide_all(world: &mut World, events: &mut Vec<Event>) {
    for booster in query::boosters(world) {
        world::apply(
            world,
            Command::CollectBooster {
                booster: booster.id,
            },
            events,
        );
    }
    for obstacle in query::obstacles(world) {
        world::apply(
            world,
            Command::ResolveRisk {
                obstacle: obstacle.id,
            },
            events,
        );
    }
}

proptest! {
    #[test]
    fn health_and_lane_stay_in_bounds(steps in prop::collection::vec(step(), 1..200)) {
        let config = GameConfig::default();
        let mut world = World::new(&config);
        let lane_count = query::lane_baselines(&world).len();
        let mut events = Vec::new();

        for step in steps {
            match step {
                Step::Command(command) => world::apply(&mut world, command, &mut events),
                Step::CollideAll => collide_all(&mut world, &mut events),
            }
            prop_assert!(query::health(&world) <= query::max_health(&world));
            prop_assert!(query::player(&world).lane < lane_count);
        }
    }

    #[test]
    fn speed_never_decreases(ticks in prop::collection::vec(1u64..50, 1..400)) {
        let mut world = World::new(&GameConfig::default());
        let mut events = Vec::new();
        let mut previous = query::world_speed(&world);

        for ms in ticks {
            world::apply(&mut world, Command::Tick { dt: Duration::from_millis(ms) }, &mut events);
            let speed = query::world_speed(&world);
            prop_assert!(speed >= previous);
            previous = speed;
        }
    }

    #[test]
    fn repeated_booster_pickup_is_idempotent(policy in policy(), repeats in 1usize..6) {
        let mut world = World::new(&GameConfig::default());
        let mut events = Vec::new();

        for _ in 0..=repeats {
            world::apply(
                &mut world,
                Command::SpawnBooster { policy, lane: 1, x: 140.0 },
                &mut events,
            );
            collide_all(&mut world, &mut events);
        }

        let policies = query::active_policies(&world);
        prop_assert_eq!(policies.len(), 1);
        prop_assert!(policies.contains(policy));
        prop_assert_eq!(query::score(&world), 0);
    }
}
