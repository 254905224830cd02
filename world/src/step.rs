//! Single-pass transition rule that advances the field by one tick.
//!
//! Cells are visited in index order. Every cell written or handled during the
//! pass is stamped with the tick id, so a head that moves forward in traversal
//! order is not visited again in the same tick. Head-to-head collisions are
//! the only order-sensitive outcome: the first head to arrive at a cell wins
//! the right to be collided with.

use cellsnake_core::{CellColor, Event, Heading, SnakeColor};
use log::debug;

use crate::{grid::Grid, listeners::Listeners, players::PlayerRegister};

/// How a head's attempted move resolves against its target cell.
#[derive(Debug)]
enum Outcome {
    /// The target holds another live head; both snakes die.
    HeadOn { other: Option<SnakeColor> },
    /// The target was already the site of a head-on collision this tick.
    Contested,
    /// The target holds an apple; the snake moves and grows.
    Eat,
    /// The target is empty; the snake moves.
    Advance,
    /// The target is a wall or a snake body.
    Blocked,
}

pub(crate) fn advance(
    grid: &mut Grid,
    players: &mut PlayerRegister,
    listeners: &mut Listeners,
    tick: u64,
    out_events: &mut Vec<Event>,
) {
    for index in 0..grid.len() {
        let cell = grid.cell_mut(index);
        if cell.processed_tick == tick {
            continue;
        }
        cell.processed_tick = tick;

        let Some(age) = cell.age else {
            if cell.heading == Heading::Defeated {
                cell.heading = Heading::None;
            }
            continue;
        };

        if age == 0 {
            cell.paint(CellColor::Empty);
            continue;
        }
        let age = age - 1;
        cell.age = Some(age);

        let Heading::Live(heading) = cell.heading else {
            continue;
        };
        let Some(color) = cell.color.snake().cloned() else {
            continue;
        };
        cell.heading = Heading::None;

        let direction = match players.take(&color) {
            Some(turn) => heading.turned(turn),
            None => heading,
        };
        let next = grid.neighbor(index, direction);
        let target = grid.cell(next);
        let outcome = match (target.heading, &target.color) {
            (Heading::Live(_), other) => Outcome::HeadOn {
                other: other.snake().cloned(),
            },
            (Heading::Defeated, _) if target.processed_tick == tick => Outcome::Contested,
            (_, CellColor::Apple) => Outcome::Eat,
            (_, CellColor::Empty) => Outcome::Advance,
            _ => Outcome::Blocked,
        };

        let grown = matches!(outcome, Outcome::Eat);
        match outcome {
            Outcome::HeadOn { other } => {
                let target = grid.cell_mut(next);
                target.paint(CellColor::Empty);
                target.heading = Heading::Defeated;
                target.processed_tick = tick;
                debug!(
                    "tick {tick}: {color} met a head at {:?}",
                    grid.coord_of(next)
                );
                if let Some(other) = other {
                    listeners.announce(Event::SnakeKilled { color: other }, out_events);
                }
                listeners.announce(Event::SnakeKilled { color }, out_events);
            }
            Outcome::Contested | Outcome::Blocked => {
                debug!(
                    "tick {tick}: {color} ran into {:?}",
                    grid.coord_of(next)
                );
                listeners.announce(Event::SnakeKilled { color }, out_events);
            }
            Outcome::Eat | Outcome::Advance => {
                let target = grid.cell_mut(next);
                target.color = CellColor::Snake(color.clone());
                target.age = Some(age.saturating_add(if grown { 2 } else { 1 }));
                target.heading = Heading::Live(direction);
                target.processed_tick = tick;
                if grown {
                    let cell = grid.coord_of(next);
                    listeners.announce(Event::AppleEaten { color, cell }, out_events);
                }
            }
        }
    }
}
