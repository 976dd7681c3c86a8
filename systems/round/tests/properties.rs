use std::collections::HashSet;

use insect_forage_core::{
    BoardSize, Command, Event, InsectColor, InsectKind, Position,
};
use insect_forage_system_movement::Movement;
use insect_forage_system_round::Round;
use insect_forage_world::{self as world, query, World};
use proptest::prelude::*;

#[derive(Clone, Debug)]
struct Scenario {
    size: u32,
    insects: Vec<(usize, usize, i32, i32)>,
    food: Vec<(u32, i32, i32)>,
}

fn scenario() -> impl Strategy<Value = Scenario> {
    (4u32..=9).prop_flat_map(|size| {
        let coord = 1..=size as i32;
        (
            Just(size),
            prop::collection::vec((0usize..4, 0usize..4, coord.clone(), coord.clone()), 1..8),
            prop::collection::vec((1u32..=25, coord.clone(), coord), 1..16),
        )
            .prop_map(|(size, insects, food)| Scenario {
                size,
                insects,
                food,
            })
    })
}

fn build(scenario: &Scenario) -> World {
    let mut world = World::new();
    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::ConfigureBoard {
            size: BoardSize::new(scenario.size),
        },
        &mut events,
    );
    for &(color, kind, x, y) in &scenario.insects {
        world::apply(
            &mut world,
            Command::PlaceInsect {
                color: InsectColor::ALL[color],
                kind: InsectKind::ALL[kind],
                position: Position::new(x, y),
            },
            &mut events,
        );
    }
    for &(value, x, y) in &scenario.food {
        world::apply(
            &mut world,
            Command::PlaceFood {
                value,
                position: Position::new(x, y),
            },
            &mut events,
        );
    }
    world
}

proptest! {
    #[test]
    fn prop_food_is_counted_at_most_once(scenario in scenario()) {
        let mut world = build(&scenario);
        let available: u64 = query::food(&world)
            .iter()
            .map(|food| u64::from(food.value))
            .sum();

        let mut events = Vec::new();
        let reports = Round::default().play(&mut world, &mut events);

        let mut eaten = HashSet::new();
        let mut consumed_total = 0u64;
        for event in &events {
            if let Event::FoodConsumed { food, value, .. } = event {
                prop_assert!(eaten.insert(*food), "food {} eaten twice", food.get());
                consumed_total += u64::from(*value);
            }
        }

        let reported_total: u64 = reports.iter().map(|report| report.food_eaten).sum();
        prop_assert_eq!(reported_total, consumed_total);
        prop_assert!(reported_total <= available);
        for report in &reports {
            prop_assert!(report.food_eaten <= available);
        }
    }

    #[test]
    fn prop_reports_follow_placement_order(scenario in scenario()) {
        let mut world = build(&scenario);
        let placed: Vec<_> = query::insect_ids(&world)
            .into_iter()
            .filter_map(|insect| query::insect(&world, insect))
            .map(|insect| (insect.color, insect.kind))
            .collect();

        let mut events = Vec::new();
        let reports = Round::default().play(&mut world, &mut events);

        let reported: Vec<_> = reports
            .iter()
            .map(|report| (report.color, report.kind))
            .collect();
        prop_assert_eq!(placed, reported);
        for report in &reports {
            prop_assert!(report.kind.directions().contains(&report.direction));
        }
        for insect in query::insect_ids(&world) {
            let snapshot = query::insect(&world, insect);
            prop_assert!(snapshot.map_or(false, |insect| !insect.alive));
        }
    }

    #[test]
    fn prop_scanning_is_side_effect_free(scenario in scenario()) {
        let world = build(&scenario);
        let food_before = query::food(&world);

        for insect in query::insect_ids(&world) {
            let Some(snapshot) = query::insect(&world, insect) else {
                continue;
            };
            let first = Movement.best_direction(query::board_view(&world), &snapshot);
            let second = Movement.best_direction(query::board_view(&world), &snapshot);
            prop_assert_eq!(first, second);
            prop_assert_eq!(query::insect(&world, insect), Some(snapshot));
        }

        prop_assert_eq!(food_before, query::food(&world));
    }
}
