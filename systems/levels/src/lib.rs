#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Level layouts expressed as wall placement commands.
//!
//! A level is laid out whenever the world reports a freshly configured field,
//! so reconfiguring the field always yields a matching wall layout.

use std::{fmt, str::FromStr};

use cellsnake_core::{Command, Direction, Event, FieldSize, Point};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of random walls laid by [`Level::Random`].
const RANDOM_WALLS: usize = 3;

/// Wall layouts available to a game.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// No walls at all.
    Empty,
    /// Fixed layout of four walls scaled to the field width.
    Basic,
    /// Three walls at random positions scaled to the field height.
    #[default]
    Random,
}

impl Level {
    /// Builds the wall placement commands that lay out this level on `size`.
    ///
    /// Walls whose scaled length rounds down to zero are left out, so tiny
    /// fields simply get fewer walls.
    #[must_use]
    pub fn walls(self, size: FieldSize) -> Vec<Command> {
        match self {
            Self::Empty => Vec::new(),
            Self::Basic => {
                let a = eighth(size.width());
                let unit = i64::from(a);
                [
                    ((3, 5), Direction::South, 6),
                    ((3, 3), Direction::East, 2),
                    ((5, 3), Direction::South, 2),
                    ((5, 5), Direction::East, 6),
                ]
                .into_iter()
                .filter(|_| a > 0)
                .map(|((x, y), direction, length)| Command::PlaceWall {
                    at: Some(Point::new(x * unit, y * unit)),
                    direction: Some(direction),
                    length: length * a,
                })
                .collect()
            }
            Self::Random => {
                let length = eighth(size.height()) * 6;
                if length == 0 {
                    return Vec::new();
                }
                (0..RANDOM_WALLS)
                    .map(|_| Command::PlaceWall {
                        at: None,
                        direction: None,
                        length,
                    })
                    .collect()
            }
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Empty => "empty",
            Self::Basic => "basic",
            Self::Random => "random",
        };
        f.write_str(name)
    }
}

/// Error returned when a level name is not recognised.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("unknown level `{0}`; expected one of: empty, basic, random")]
pub struct UnknownLevel(String);

impl FromStr for Level {
    type Err = UnknownLevel;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "empty" | "none" => Ok(Self::Empty),
            "basic" => Ok(Self::Basic),
            "random" => Ok(Self::Random),
            _ => Err(UnknownLevel(value.to_owned())),
        }
    }
}

/// Configuration parameters required to construct the levels system.
#[derive(Clone, Copy, Debug, Default)]
pub struct Config {
    level: Level,
}

impl Config {
    /// Creates a new configuration that lays out the provided level.
    #[must_use]
    pub const fn new(level: Level) -> Self {
        Self { level }
    }
}

/// Pure system that lays out walls whenever a field is configured.
#[derive(Debug)]
pub struct Levels {
    level: Level,
}

impl Levels {
    /// Creates a new levels system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            level: config.level,
        }
    }

    /// Level laid out by this system.
    #[must_use]
    pub const fn level(&self) -> Level {
        self.level
    }

    /// Consumes world events and emits wall commands for every configured field.
    pub fn handle(&self, events: &[Event], out: &mut Vec<Command>) {
        for event in events {
            if let Event::FieldConfigured { size } = event {
                out.extend(self.level.walls(*size));
            }
        }
    }
}

/// Rounds `value / 8` half away from zero.
const fn eighth(value: u32) -> u32 {
    value.saturating_add(4) / 8
}
