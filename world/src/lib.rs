#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative automaton state for cellsnake.
//!
//! The world owns a toroidal field of cells, the player command register and
//! the listener lists. Everything that happens to the field goes through the
//! [`apply`] entry point or the equivalent methods on [`World`].

mod grid;
mod listeners;
mod placement;
mod players;
mod step;

use cellsnake_core::{
    CellCoord, Command, Direction, Event, FieldSize, Placement, PlacementError, Point,
    SnakeColor, Turn,
};
use log::{debug, info, warn};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::{grid::Grid, listeners::Listeners, players::PlayerRegister};

pub use listeners::{AppleEatenListener, SnakeKilledListener};

/// Represents the authoritative cellsnake world state.
#[derive(Debug)]
pub struct World {
    grid: Grid,
    players: PlayerRegister,
    listeners: Listeners,
    rng: ChaCha8Rng,
    tick: u64,
}

impl World {
    /// Creates a world with an empty field of the provided size.
    ///
    /// `seed` drives every random placement, so two worlds created with the
    /// same seed and fed the same commands stay identical.
    #[must_use]
    pub fn new(size: FieldSize, seed: u64) -> Self {
        Self {
            grid: Grid::new(size),
            players: PlayerRegister::default(),
            listeners: Listeners::default(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            tick: 0,
        }
    }

    /// Advances the automaton by one tick, appending the events it produced.
    pub fn step(&mut self, out_events: &mut Vec<Event>) {
        self.tick = self.tick.saturating_add(1);
        step::advance(
            &mut self.grid,
            &mut self.players,
            &mut self.listeners,
            self.tick,
            out_events,
        );
        out_events.push(Event::Stepped { tick: self.tick });
    }

    /// Places an apple at `at`, or on a random empty cell when `at` is `None`.
    pub fn place_apple(&mut self, at: Option<Point>) -> Result<CellCoord, PlacementError> {
        placement::place_apple(&mut self.grid, &mut self.rng, at)
    }

    /// Lays a straight wall of `length` cells.
    ///
    /// Missing start points and directions are chosen at random.
    pub fn place_wall(
        &mut self,
        at: Option<Point>,
        direction: Option<Direction>,
        length: u32,
    ) -> Result<Vec<CellCoord>, PlacementError> {
        placement::place_wall(&mut self.grid, &mut self.rng, at, direction, length)
    }

    /// Spawns a snake head and registers its color as a player.
    ///
    /// Spawning on top of another snake is not prevented; the next step
    /// resolves the resulting layout under the ordinary collision rules.
    /// An existing head of the same color becomes a plain body segment.
    pub fn spawn_snake(
        &mut self,
        color: &SnakeColor,
        length: Option<u32>,
        at: Option<Point>,
        direction: Option<Direction>,
    ) -> Result<(CellCoord, Direction), PlacementError> {
        placement::spawn_snake(
            &mut self.grid,
            &mut self.players,
            &mut self.rng,
            color,
            length,
            at,
            direction,
        )
    }

    /// Sets the pending turn for `color`, replacing any unconsumed one.
    pub fn turn(&mut self, color: &SnakeColor, turn: Turn) {
        self.players.queue(color, turn);
    }

    /// Registers an apple-eaten listener, or clears all of them with `None`.
    pub fn on_apple_eaten(&mut self, listener: Option<AppleEatenListener>) {
        self.listeners.set_apple_eaten(listener);
    }

    /// Registers a snake-killed listener, or clears all of them with `None`.
    pub fn on_snake_killed(&mut self, listener: Option<SnakeKilledListener>) {
        self.listeners.set_snake_killed(listener);
    }

    fn reject(placement: Placement, reason: PlacementError, out_events: &mut Vec<Event>) {
        warn!("{placement:?} placement rejected: {reason}");
        out_events.push(Event::PlacementRejected { placement, reason });
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::ConfigureField { size } => {
            info!("configuring {}x{} field", size.width(), size.height());
            world.grid = Grid::new(size);
            world.players.clear();
            world.tick = 0;
            out_events.push(Event::FieldConfigured { size });
        }
        Command::Step => world.step(out_events),
        Command::Turn { color, turn } => {
            let Some(color) = color.or_else(|| world.players.first().cloned()) else {
                debug!("no player registered; ignoring {turn:?}");
                return;
            };
            world.turn(&color, turn);
            out_events.push(Event::TurnQueued { color, turn });
        }
        Command::PlaceApple { at } => match world.place_apple(at) {
            Ok(cell) => out_events.push(Event::ApplePlaced { cell }),
            Err(reason) => World::reject(Placement::Apple, reason, out_events),
        },
        Command::PlaceWall {
            at,
            direction,
            length,
        } => match world.place_wall(at, direction, length) {
            Ok(cells) => out_events.push(Event::WallPlaced { cells }),
            Err(reason) => World::reject(Placement::Wall, reason, out_events),
        },
        Command::SpawnSnake {
            color,
            length,
            at,
            direction,
        } => match world.spawn_snake(&color, length, at, direction) {
            Ok((cell, direction)) => out_events.push(Event::SnakeSpawned {
                color,
                cell,
                direction,
            }),
            Err(reason) => World::reject(Placement::Snake(color), reason, out_events),
        },
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use cellsnake_core::{Cell, CellCoord, Direction, FieldSize, Point, SnakeColor, Turn};

    use super::World;

    /// Dimensions of the field.
    #[must_use]
    pub fn field_size(world: &World) -> FieldSize {
        world.grid.size()
    }

    /// Identifier of the last completed tick, `0` before the first step.
    #[must_use]
    pub fn tick(world: &World) -> u64 {
        world.tick
    }

    /// State of the cell at `point`, wrapped onto the field.
    #[must_use]
    pub fn cell(world: &World, point: Point) -> &Cell {
        let index = world.grid.index_of(world.grid.normalize(point));
        world.grid.cell(index)
    }

    /// Every cell in row-major order.
    #[must_use]
    pub fn cells(world: &World) -> &[Cell] {
        world.grid.cells()
    }

    /// Number of cells currently holding nothing.
    #[must_use]
    pub fn empty_cell_count(world: &World) -> usize {
        world
            .grid
            .cells()
            .iter()
            .filter(|cell| cell.color.is_empty())
            .count()
    }

    /// Captures the live heads in index order.
    #[must_use]
    pub fn heads(world: &World) -> Vec<HeadSnapshot> {
        world
            .grid
            .cells()
            .iter()
            .enumerate()
            .filter_map(|(index, cell)| {
                let direction = cell.heading.live()?;
                let color = cell.color.snake()?.clone();
                Some(HeadSnapshot {
                    color,
                    cell: world.grid.coord_of(index),
                    direction,
                    age: cell.age.unwrap_or(0),
                })
            })
            .collect()
    }

    /// Turn waiting to be applied to `color`'s head.
    #[must_use]
    pub fn pending_turn(world: &World, color: &SnakeColor) -> Option<Turn> {
        world.players.pending(color)
    }

    /// Colors registered by spawns, in registration order.
    #[must_use]
    pub fn players(world: &World) -> Vec<SnakeColor> {
        world.players.colors().cloned().collect()
    }

    /// Immutable representation of a live head.
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub struct HeadSnapshot {
        /// Color of the snake.
        pub color: SnakeColor,
        /// Cell holding the head.
        pub cell: CellCoord,
        /// Direction the head moves in on the next tick, before turns.
        pub direction: Direction,
        /// Remaining lifetime of the head cell.
        pub age: u32,
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use cellsnake_core::{CellColor, Heading};

    use super::*;

    fn world(width: u32, height: u32) -> World {
        World::new(FieldSize::new(width, height).expect("valid size"), 1)
    }

    #[test]
    fn apply_configures_field() {
        let mut world = world(3, 3);
        let mut events = Vec::new();
        let size = FieldSize::new(12, 8).expect("valid size");

        apply(&mut world, Command::ConfigureField { size }, &mut events);

        assert_eq!(query::field_size(&world), size);
        assert_eq!(query::cells(&world).len(), 96);
        assert_eq!(query::empty_cell_count(&world), 96);
        assert_eq!(events, vec![Event::FieldConfigured { size }]);
    }

    #[test]
    fn configure_resets_tick_and_players() {
        let mut world = world(4, 4);
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::SpawnSnake {
                color: "red".into(),
                length: Some(2),
                at: Some(Point::new(0, 0)),
                direction: Some(Direction::East),
            },
            &mut events,
        );
        apply(&mut world, Command::Step, &mut events);
        assert_eq!(query::tick(&world), 1);

        let size = FieldSize::new(4, 4).expect("valid size");
        apply(&mut world, Command::ConfigureField { size }, &mut events);

        assert_eq!(query::tick(&world), 0);
        assert!(query::players(&world).is_empty());
        assert!(query::heads(&world).is_empty());
    }

    #[test]
    fn turn_without_color_targets_first_player() {
        let mut world = world(5, 5);
        let mut events = Vec::new();
        for (color, x) in [("red", 0), ("blue", 2)] {
            apply(
                &mut world,
                Command::SpawnSnake {
                    color: color.into(),
                    length: Some(2),
                    at: Some(Point::new(x, 0)),
                    direction: Some(Direction::South),
                },
                &mut events,
            );
        }
        events.clear();

        apply(
            &mut world,
            Command::Turn {
                color: None,
                turn: Turn::Left,
            },
            &mut events,
        );

        assert_eq!(
            query::pending_turn(&world, &"red".into()),
            Some(Turn::Left)
        );
        assert_eq!(query::pending_turn(&world, &"blue".into()), None);
        assert_eq!(
            events,
            vec![Event::TurnQueued {
                color: "red".into(),
                turn: Turn::Left
            }]
        );
    }

    #[test]
    fn turn_without_players_is_ignored() {
        let mut world = world(3, 3);
        let mut events = Vec::new();

        apply(
            &mut world,
            Command::Turn {
                color: None,
                turn: Turn::Right,
            },
            &mut events,
        );

        assert!(events.is_empty());
    }

    #[test]
    fn turn_is_applied_once_at_next_step() {
        let mut world = world(5, 5);
        let red = SnakeColor::new("red");
        let _ = world
            .spawn_snake(&red, Some(3), Some(Point::new(2, 2)), Some(Direction::North))
            .expect("spawn succeeds");
        world.turn(&red, Turn::Right);

        let mut events = Vec::new();
        world.step(&mut events);
        world.step(&mut events);

        let heads = query::heads(&world);
        assert_eq!(heads.len(), 1);
        assert_eq!(heads[0].direction, Direction::East);
        assert_eq!(heads[0].cell, CellCoord::new(4, 2));
        assert_eq!(query::pending_turn(&world, &red), None);
    }

    #[test]
    fn rejected_placement_reports_reason() {
        let mut world = world(2, 1);
        let mut events = Vec::new();

        apply(
            &mut world,
            Command::PlaceWall {
                at: Some(Point::new(0, 0)),
                direction: Some(Direction::East),
                length: 2,
            },
            &mut events,
        );
        apply(&mut world, Command::PlaceApple { at: None }, &mut events);
        apply(
            &mut world,
            Command::SpawnSnake {
                color: "red".into(),
                length: Some(0),
                at: None,
                direction: None,
            },
            &mut events,
        );

        assert!(matches!(events[0], Event::WallPlaced { ref cells } if cells.len() == 2));
        assert_eq!(
            events[1],
            Event::PlacementRejected {
                placement: Placement::Apple,
                reason: PlacementError::Saturated,
            }
        );
        assert_eq!(
            events[2],
            Event::PlacementRejected {
                placement: Placement::Snake("red".into()),
                reason: PlacementError::ZeroLength,
            }
        );
    }

    #[test]
    fn listeners_fire_during_step_and_can_be_cleared() {
        let mut world = world(4, 1);
        let eaten = Rc::new(RefCell::new(0));
        {
            let eaten = Rc::clone(&eaten);
            world.on_apple_eaten(Some(Box::new(move || *eaten.borrow_mut() += 1)));
        }
        let red = SnakeColor::new("red");
        let _ = world
            .spawn_snake(&red, Some(2), Some(Point::new(0, 0)), Some(Direction::East))
            .expect("spawn succeeds");
        let _ = world.place_apple(Some(Point::new(1, 0))).expect("apple");
        let _ = world.place_apple(Some(Point::new(2, 0))).expect("apple");

        let mut events = Vec::new();
        world.step(&mut events);
        assert_eq!(*eaten.borrow(), 1);

        world.on_apple_eaten(None);
        world.step(&mut events);
        assert_eq!(*eaten.borrow(), 1);
        assert_eq!(
            events
                .iter()
                .filter(|event| matches!(event, Event::AppleEaten { .. }))
                .count(),
            2
        );
    }

    #[test]
    fn step_reports_tick_last() {
        let mut world = world(2, 2);
        let mut events = Vec::new();
        world.step(&mut events);
        world.step(&mut events);

        assert_eq!(
            events,
            vec![Event::Stepped { tick: 1 }, Event::Stepped { tick: 2 }]
        );
        assert!(query::cells(&world)
            .iter()
            .all(|cell| cell.processed_tick == 2));
    }

    #[test]
    fn defeated_marker_is_cleared_by_next_tick() {
        let mut world = world(3, 1);
        let _ = world
            .spawn_snake(&"a".into(), Some(3), Some(Point::new(0, 0)), Some(Direction::East))
            .expect("spawn a");
        let _ = world
            .spawn_snake(&"b".into(), Some(3), Some(Point::new(2, 0)), Some(Direction::West))
            .expect("spawn b");

        let mut events = Vec::new();
        world.step(&mut events);
        let contested = query::cell(&world, Point::new(1, 0));
        assert_eq!(contested.heading, Heading::Defeated);
        assert_eq!(contested.color, CellColor::Empty);
        assert_eq!(contested.age, None);

        world.step(&mut events);
        assert_eq!(query::cell(&world, Point::new(1, 0)).heading, Heading::None);
    }
}
