#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the cellsnake automaton.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to. The per-cell state model ([`Cell`], [`CellColor`], [`Heading`])
//! lives here as well so that renderers and systems can inspect the grid
//! without depending on the world's internals.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Length assigned to a snake when the spawn request does not name one.
pub const DEFAULT_SNAKE_LENGTH: u32 = 5;

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Re-initializes the world with an empty field of the provided size.
    ConfigureField {
        /// Dimensions of the new field.
        size: FieldSize,
    },
    /// Advances the automaton by exactly one tick.
    Step,
    /// Registers a pending one-shot turn for a player.
    Turn {
        /// Player that should turn. `None` addresses the first registered player.
        color: Option<SnakeColor>,
        /// Rotation applied at the head's next processing.
        turn: Turn,
    },
    /// Places an apple on the chosen cell or on a random empty cell.
    PlaceApple {
        /// Requested location; wrapped onto the field before use.
        at: Option<Point>,
    },
    /// Lays a straight run of wall cells.
    PlaceWall {
        /// Starting location; a random empty cell when absent.
        at: Option<Point>,
        /// Direction the wall extends in; random when absent.
        direction: Option<Direction>,
        /// Number of consecutive cells to convert into walls.
        length: u32,
    },
    /// Creates a new snake head.
    SpawnSnake {
        /// Color identifying the snake and its player.
        color: SnakeColor,
        /// Total length the snake reaches; [`DEFAULT_SNAKE_LENGTH`] when absent.
        length: Option<u32>,
        /// Location of the head; a random empty cell when absent.
        at: Option<Point>,
        /// Initial heading; random when absent.
        direction: Option<Direction>,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// Confirms that the field was re-initialized.
    FieldConfigured {
        /// Dimensions of the new field.
        size: FieldSize,
    },
    /// Indicates that the automaton completed a tick.
    Stepped {
        /// Identifier of the tick that just finished.
        tick: u64,
    },
    /// Confirms that a turn was registered for a player.
    TurnQueued {
        /// Player that will turn.
        color: SnakeColor,
        /// Pending rotation.
        turn: Turn,
    },
    /// Confirms that an apple was placed.
    ApplePlaced {
        /// Cell now holding the apple.
        cell: CellCoord,
    },
    /// Confirms that a run of wall cells was laid.
    WallPlaced {
        /// Cells converted into walls, in laying order.
        cells: Vec<CellCoord>,
    },
    /// Confirms that a snake head was created.
    SnakeSpawned {
        /// Color of the new snake.
        color: SnakeColor,
        /// Cell holding the head.
        cell: CellCoord,
        /// Heading of the new head.
        direction: Direction,
    },
    /// Reports that a placement request was rejected.
    PlacementRejected {
        /// Kind of placement that was requested.
        placement: Placement,
        /// Specific reason the placement failed.
        reason: PlacementError,
    },
    /// Announces that a snake head moved onto an apple.
    AppleEaten {
        /// Snake that ate the apple.
        color: SnakeColor,
        /// Cell the apple occupied.
        cell: CellCoord,
    },
    /// Announces that a snake head was killed.
    SnakeKilled {
        /// Snake that died.
        color: SnakeColor,
    },
}

/// Kinds of placement requests, used when reporting rejections.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Placement {
    /// An apple placement.
    Apple,
    /// A wall placement.
    Wall,
    /// A snake spawn for the given color.
    Snake(SnakeColor),
}

/// Opaque identifier distinguishing snakes from each other.
///
/// Colors are compared by name only; callers pick the actual values.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SnakeColor(String);

impl SnakeColor {
    /// Creates a color from its name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Name of the color.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SnakeColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SnakeColor {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Contents of a single cell.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellColor {
    /// Rest state.
    #[default]
    Empty,
    /// Food that makes the snake eating it grow by one segment.
    Apple,
    /// Permanent obstacle.
    Wall,
    /// Segment of the snake with the given color.
    Snake(SnakeColor),
}

impl CellColor {
    /// Reports whether the cell is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Returns the snake color if the cell belongs to a snake.
    #[must_use]
    pub const fn snake(&self) -> Option<&SnakeColor> {
        match self {
            Self::Snake(color) => Some(color),
            _ => None,
        }
    }
}

/// Head marker of a cell.
///
/// `Defeated` is left behind on the cell where two heads met so that further
/// arrivals within the same tick still see a contested cell. It carries no
/// color and no age and is cleaned up by the next tick's traversal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Heading {
    /// The cell is not a head.
    #[default]
    None,
    /// The cell is the live head of a snake moving in the given direction.
    Live(Direction),
    /// The cell is the site of a head-to-head collision.
    Defeated,
}

impl Heading {
    /// Direction of a live head.
    #[must_use]
    pub const fn live(self) -> Option<Direction> {
        match self {
            Self::Live(direction) => Some(direction),
            _ => None,
        }
    }
}

/// State of a single grid cell.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// What the cell currently holds.
    pub color: CellColor,
    /// Remaining lifetime of a snake segment; `None` for anything else.
    pub age: Option<u32>,
    /// Head marker.
    pub heading: Heading,
    /// Identifier of the last tick that handled this cell, `0` if none did.
    pub processed_tick: u64,
}

impl Cell {
    /// Reports whether the cell is a live snake segment (head or body).
    #[must_use]
    pub const fn is_segment(&self) -> bool {
        self.age.is_some()
    }

    /// Reports whether the cell is the live head of a snake.
    #[must_use]
    pub const fn is_head(&self) -> bool {
        matches!(self.heading, Heading::Live(_))
    }

    /// Resets the cell to the given color, dropping age and heading.
    ///
    /// The processed-tick stamp is preserved.
    pub fn paint(&mut self, color: CellColor) {
        self.color = color;
        self.age = None;
        self.heading = Heading::None;
    }
}

/// Rotation applied to a head at its next processing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Turn {
    /// One step counter-clockwise.
    Left,
    /// One step clockwise.
    Right,
}

/// Compass directions, ordered clockwise starting at north.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Toward decreasing row indices.
    North,
    /// Toward increasing column indices.
    East,
    /// Toward increasing row indices.
    South,
    /// Toward decreasing column indices.
    West,
}

impl Direction {
    /// All directions in clockwise order.
    pub const ALL: [Direction; 4] = [Self::North, Self::East, Self::South, Self::West];

    /// Direction pointing the opposite way.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::East => Self::West,
            Self::South => Self::North,
            Self::West => Self::East,
        }
    }

    /// Direction after applying the provided turn.
    #[must_use]
    pub const fn turned(self, turn: Turn) -> Self {
        match (turn, self) {
            (Turn::Right, Self::North) | (Turn::Left, Self::South) => Self::East,
            (Turn::Right, Self::East) | (Turn::Left, Self::West) => Self::South,
            (Turn::Right, Self::South) | (Turn::Left, Self::North) => Self::West,
            (Turn::Right, Self::West) | (Turn::Left, Self::East) => Self::North,
        }
    }

    /// Column and row offsets of a single step in this direction.
    #[must_use]
    pub const fn delta(self) -> (i64, i64) {
        match self {
            Self::North => (0, -1),
            Self::East => (1, 0),
            Self::South => (0, 1),
            Self::West => (-1, 0),
        }
    }
}

/// Location of a single grid cell, always inside the field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    x: u32,
    y: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn x(&self) -> u32 {
        self.x
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn y(&self) -> u32 {
        self.y
    }
}

impl From<CellCoord> for Point {
    fn from(cell: CellCoord) -> Self {
        Self::new(i64::from(cell.x), i64::from(cell.y))
    }
}

/// Unnormalized location supplied by callers.
///
/// Points may be negative or exceed the field; the world wraps them onto the
/// torus before use.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    /// Column, any value.
    pub x: i64,
    /// Row, any value.
    pub y: i64,
}

impl Point {
    /// Creates a new point.
    #[must_use]
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

/// Validated dimensions of the field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldSize {
    width: u32,
    height: u32,
}

impl FieldSize {
    /// Creates a field size, rejecting zero dimensions.
    pub const fn new(width: u32, height: u32) -> Result<Self, FieldError> {
        if width == 0 || height == 0 {
            return Err(FieldError::ZeroDimension { width, height });
        }
        Ok(Self { width, height })
    }

    /// Number of columns.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Total number of cells.
    #[must_use]
    pub const fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Reasons a field size is invalid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
pub enum FieldError {
    /// One of the dimensions was zero.
    #[error("field dimensions must be positive (received {width}x{height})")]
    ZeroDimension {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },
}

/// Reasons a placement request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
pub enum PlacementError {
    /// A wall or snake of length zero was requested.
    #[error("placement length must be positive")]
    ZeroLength,
    /// No empty cell is left for a random placement.
    #[error("no empty cell is available for random placement")]
    Saturated,
}
