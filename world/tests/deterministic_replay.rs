use cellsnake_core::{Cell, Command, Direction, Event, FieldSize, Point, Turn};
use cellsnake_world::{self as world, query, World};

#[test]
fn replay_with_random_placements_is_reproducible() {
    let first = replay(0xdead_beef);
    let second = replay(0xdead_beef);

    assert_eq!(first.events, second.events, "event streams diverged");
    assert_eq!(first.cells, second.cells, "final fields diverged");
    assert!(first
        .events
        .iter()
        .any(|event| matches!(event, Event::Stepped { tick: 40 })));
}

#[test]
fn random_placements_never_overwrite_occupied_cells() {
    let size = FieldSize::new(6, 5).expect("valid size");
    let mut world = World::new(size, 99);
    let mut events = Vec::new();

    world::apply(
        &mut world,
        Command::PlaceWall {
            at: Some(Point::new(0, 0)),
            direction: Some(Direction::South),
            length: 5,
        },
        &mut events,
    );
    let occupied_before = size.cell_count() - query::empty_cell_count(&world);

    for _ in 0..10 {
        world::apply(&mut world, Command::PlaceApple { at: None }, &mut events);
    }

    let apples = events
        .iter()
        .filter(|event| matches!(event, Event::ApplePlaced { .. }))
        .count();
    assert_eq!(apples, 10);
    assert_eq!(
        size.cell_count() - query::empty_cell_count(&world),
        occupied_before + 10
    );
}

#[derive(Debug)]
struct ReplayOutcome {
    events: Vec<Event>,
    cells: Vec<Cell>,
}

fn replay(seed: u64) -> ReplayOutcome {
    let mut world = World::new(FieldSize::new(16, 12).expect("valid size"), seed);
    let mut events = Vec::new();

    for command in setup_commands() {
        world::apply(&mut world, command, &mut events);
    }

    for tick in 0..40_u32 {
        if tick % 7 == 3 {
            world::apply(
                &mut world,
                Command::Turn {
                    color: None,
                    turn: if tick % 2 == 0 { Turn::Left } else { Turn::Right },
                },
                &mut events,
            );
        }
        let before = events.len();
        world::apply(&mut world, Command::Step, &mut events);

        let respawns: Vec<Command> = events[before..]
            .iter()
            .filter_map(|event| match event {
                Event::AppleEaten { .. } => Some(Command::PlaceApple { at: None }),
                _ => None,
            })
            .collect();
        for command in respawns {
            world::apply(&mut world, command, &mut events);
        }
    }

    ReplayOutcome {
        events,
        cells: query::cells(&world).to_vec(),
    }
}

fn setup_commands() -> Vec<Command> {
    vec![
        Command::PlaceWall {
            at: None,
            direction: None,
            length: 6,
        },
        Command::PlaceWall {
            at: None,
            direction: None,
            length: 6,
        },
        Command::PlaceApple { at: None },
        Command::PlaceApple { at: None },
        Command::SpawnSnake {
            color: "blue".into(),
            length: Some(3),
            at: None,
            direction: None,
        },
        Command::SpawnSnake {
            color: "green".into(),
            length: Some(4),
            at: None,
            direction: None,
        },
    ]
}
