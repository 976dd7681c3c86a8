use insect_forage_core::{
    BoardSize, Command, DeathCause, Direction, Event, InsectColor, InsectId, InsectKind,
    InsectReport, Position,
};
use insect_forage_system_round::{simulate, Round};
use insect_forage_world::{self as world, query, World};

#[test]
fn grasshopper_eats_then_leaves_board() {
    let mut world = board(5);
    place_insect(&mut world, InsectColor::Red, InsectKind::Grasshopper, 3, 3);
    place_food(&mut world, 10, 1, 3);

    let reports = simulate(&mut world);

    assert_eq!(
        reports,
        vec![report(
            InsectColor::Red,
            InsectKind::Grasshopper,
            Direction::North,
            10
        )]
    );
}

#[test]
fn collision_freezes_food_and_spares_the_obstacle() {
    let mut world = board(4);
    place_insect(&mut world, InsectColor::Red, InsectKind::Butterfly, 4, 1);
    place_insect(&mut world, InsectColor::Green, InsectKind::Butterfly, 2, 1);
    place_food(&mut world, 5, 3, 1);
    place_food(&mut world, 8, 1, 1);

    let mut events = Vec::new();
    let reports = Round::default().play(&mut world, &mut events);

    assert_eq!(
        reports,
        vec![
            report(InsectColor::Red, InsectKind::Butterfly, Direction::North, 5),
            report(InsectColor::Green, InsectKind::Butterfly, Direction::North, 8),
        ]
    );

    let deaths: Vec<_> = events
        .iter()
        .filter_map(|event| match event {
            Event::InsectDied { insect, at, cause } => Some((*insect, *at, *cause)),
            _ => None,
        })
        .collect();
    assert_eq!(
        deaths,
        vec![
            (
                InsectId::new(0),
                Position::new(2, 1),
                DeathCause::HostileCollision {
                    with: InsectId::new(1)
                },
            ),
            (InsectId::new(1), Position::new(1, 1), DeathCause::LeftBoard),
        ]
    );
}

#[test]
fn food_eaten_earlier_is_gone_for_later_insects() {
    let mut world = board(5);
    place_insect(&mut world, InsectColor::Blue, InsectKind::Ant, 5, 5);
    place_insect(&mut world, InsectColor::Yellow, InsectKind::Spider, 1, 1);
    place_food(&mut world, 6, 3, 3);

    let reports = simulate(&mut world);

    assert_eq!(reports[0].direction, Direction::NorthWest);
    assert_eq!(reports[0].food_eaten, 6);
    assert_eq!(
        reports[1],
        report(InsectColor::Yellow, InsectKind::Spider, Direction::NorthEast, 0)
    );
}

#[test]
fn processing_order_decides_who_eats_shared_food() {
    let red = (InsectColor::Red, InsectKind::Butterfly, 5, 3);
    let green = (InsectColor::Green, InsectKind::Butterfly, 3, 5);

    let mut red_first = board(5);
    for (color, kind, x, y) in [red, green] {
        place_insect(&mut red_first, color, kind, x, y);
    }
    place_food(&mut red_first, 10, 3, 3);

    let mut green_first = board(5);
    for (color, kind, x, y) in [green, red] {
        place_insect(&mut green_first, color, kind, x, y);
    }
    place_food(&mut green_first, 10, 3, 3);

    assert_eq!(
        simulate(&mut red_first),
        vec![
            report(InsectColor::Red, InsectKind::Butterfly, Direction::North, 10),
            report(InsectColor::Green, InsectKind::Butterfly, Direction::North, 0),
        ]
    );
    assert_eq!(
        simulate(&mut green_first),
        vec![
            report(InsectColor::Green, InsectKind::Butterfly, Direction::West, 10),
            report(InsectColor::Red, InsectKind::Butterfly, Direction::North, 0),
        ]
    );
}

#[test]
fn every_insect_ends_the_round_dead() {
    let mut world = board(6);
    place_insect(&mut world, InsectColor::Red, InsectKind::Ant, 2, 2);
    place_insect(&mut world, InsectColor::Red, InsectKind::Spider, 5, 5);
    place_insect(&mut world, InsectColor::Blue, InsectKind::Grasshopper, 3, 6);
    place_food(&mut world, 1, 1, 1);

    let reports = simulate(&mut world);

    assert_eq!(reports.len(), 3);
    for insect in query::insect_ids(&world) {
        let snapshot = query::insect(&world, insect).expect("insect exists");
        assert!(!snapshot.alive, "insect {} survived", insect.get());
    }
}

#[test]
fn insect_killed_before_its_turn_reports_default_heading() {
    let mut world = board(4);
    place_insect(&mut world, InsectColor::Red, InsectKind::Spider, 2, 2);
    place_food(&mut world, 3, 3, 3);
    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::KillInsect {
            insect: InsectId::new(0),
            at: Position::new(2, 2),
            cause: DeathCause::LeftBoard,
        },
        &mut events,
    );

    let reports = simulate(&mut world);

    assert_eq!(
        reports,
        vec![report(
            InsectColor::Red,
            InsectKind::Spider,
            Direction::NorthEast,
            0
        )]
    );
    assert!(query::food(&world)[0].consumable);
}

fn report(
    color: InsectColor,
    kind: InsectKind,
    direction: Direction,
    food_eaten: u64,
) -> InsectReport {
    InsectReport {
        color,
        kind,
        direction,
        food_eaten,
    }
}

fn board(size: u32) -> World {
    let mut world = World::new();
    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::ConfigureBoard {
            size: BoardSize::new(size),
        },
        &mut events,
    );
    world
}

fn place_insect(world: &mut World, color: InsectColor, kind: InsectKind, x: i32, y: i32) {
    let mut events = Vec::new();
    world::apply(
        world,
        Command::PlaceInsect {
            color,
            kind,
            position: Position::new(x, y),
        },
        &mut events,
    );
    assert!(matches!(events.as_slice(), [Event::InsectPlaced { .. }]));
}

fn place_food(world: &mut World, value: u32, x: i32, y: i32) {
    let mut events = Vec::new();
    world::apply(
        world,
        Command::PlaceFood {
            value,
            position: Position::new(x, y),
        },
        &mut events,
    );
    assert!(matches!(events.as_slice(), [Event::FoodPlaced { .. }]));
}
