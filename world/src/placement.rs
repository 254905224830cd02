//! Placement operations that seed the field with apples, walls and snakes.

use cellsnake_core::{
    CellColor, CellCoord, Direction, Heading, PlacementError, Point, SnakeColor,
    DEFAULT_SNAKE_LENGTH,
};
use log::debug;
use rand::{seq::SliceRandom, Rng};

use crate::{grid::Grid, players::PlayerRegister};

/// Turns the chosen cell, or a random empty one, into an apple.
pub(crate) fn place_apple<R: Rng>(
    grid: &mut Grid,
    rng: &mut R,
    at: Option<Point>,
) -> Result<CellCoord, PlacementError> {
    let index = resolve_index(grid, rng, at)?;
    log_overwrite(grid, index, "apple");
    grid.cell_mut(index).paint(CellColor::Apple);
    Ok(grid.coord_of(index))
}

/// Lays `length` wall cells in a straight line, wrapping around the edges.
pub(crate) fn place_wall<R: Rng>(
    grid: &mut Grid,
    rng: &mut R,
    at: Option<Point>,
    direction: Option<Direction>,
    length: u32,
) -> Result<Vec<CellCoord>, PlacementError> {
    if length == 0 {
        return Err(PlacementError::ZeroLength);
    }

    let direction = direction.unwrap_or_else(|| random_direction(rng));
    let mut index = resolve_index(grid, rng, at)?;
    let mut cells = Vec::with_capacity(length as usize);
    for _ in 0..length {
        grid.cell_mut(index).paint(CellColor::Wall);
        cells.push(grid.coord_of(index));
        index = grid.neighbor(index, direction);
    }
    Ok(cells)
}

/// Creates a snake head and registers its color as a player.
///
/// A live head already carrying `color` is retired into an ordinary body
/// segment first, so every color keeps at most one head.
///
/// The head's age is `length - 1`: the number of ticks the cell survives
/// after the head leaves it, which is what makes the trailing body `length`
/// cells long.
pub(crate) fn spawn_snake<R: Rng>(
    grid: &mut Grid,
    players: &mut PlayerRegister,
    rng: &mut R,
    color: &SnakeColor,
    length: Option<u32>,
    at: Option<Point>,
    direction: Option<Direction>,
) -> Result<(CellCoord, Direction), PlacementError> {
    let length = length.unwrap_or(DEFAULT_SNAKE_LENGTH);
    if length == 0 {
        return Err(PlacementError::ZeroLength);
    }

    let index = resolve_index(grid, rng, at)?;
    let direction = direction.unwrap_or_else(|| random_direction(rng));
    log_overwrite(grid, index, "snake");
    retire_head(grid, color);

    let cell = grid.cell_mut(index);
    cell.paint(CellColor::Snake(color.clone()));
    cell.age = Some(length.max(1) - 1);
    cell.heading = Heading::Live(direction);
    players.register(color);

    Ok((grid.coord_of(index), direction))
}

fn resolve_index<R: Rng>(
    grid: &Grid,
    rng: &mut R,
    at: Option<Point>,
) -> Result<usize, PlacementError> {
    match at {
        Some(point) => Ok(grid.index_of(grid.normalize(point))),
        None => grid
            .empty_indices()
            .choose(rng)
            .copied()
            .ok_or(PlacementError::Saturated),
    }
}

fn retire_head(grid: &mut Grid, color: &SnakeColor) {
    for index in 0..grid.len() {
        let cell = grid.cell_mut(index);
        if cell.is_head() && cell.color.snake() == Some(color) {
            cell.heading = Heading::None;
            debug!(
                "{color} respawned; previous head at {:?} left as body",
                grid.coord_of(index)
            );
        }
    }
}

fn random_direction<R: Rng>(rng: &mut R) -> Direction {
    Direction::ALL[rng.gen_range(0..Direction::ALL.len())]
}

fn log_overwrite(grid: &Grid, index: usize, what: &str) {
    let cell = grid.cell(index);
    if cell.is_segment() {
        debug!(
            "{what} placed over a live segment at {:?}; the next step resolves it",
            grid.coord_of(index)
        );
    }
}
