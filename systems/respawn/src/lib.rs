#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Respawn system that replaces eaten apples and killed snakes.

use cellsnake_core::{Command, Event, SnakeColor};

/// Configuration parameters required to construct the respawn system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    snake_length: u32,
    respawn_apples: bool,
    respawn_snakes: bool,
}

impl Config {
    /// Creates a new configuration.
    ///
    /// `snake_length` is the length given to every respawned snake.
    #[must_use]
    pub const fn new(snake_length: u32, respawn_apples: bool, respawn_snakes: bool) -> Self {
        Self {
            snake_length,
            respawn_apples,
            respawn_snakes,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(3, true, true)
    }
}

/// Pure system that turns consumption and death events into placement commands.
#[derive(Debug)]
pub struct Respawn {
    config: Config,
    killed: Vec<SnakeColor>,
}

impl Respawn {
    /// Creates a new respawn system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config,
            killed: Vec::new(),
        }
    }

    /// Consumes world events and emits the commands that restock the field.
    ///
    /// Returns the number of distinct snakes killed in `events`, whether or
    /// not they were respawned, so the driver can react to deaths.
    pub fn handle(&mut self, events: &[Event], out: &mut Vec<Command>) -> usize {
        self.killed.clear();

        for event in events {
            match event {
                Event::AppleEaten { .. } if self.config.respawn_apples => {
                    out.push(Command::PlaceApple { at: None });
                }
                Event::SnakeKilled { color } if !self.killed.contains(color) => {
                    self.killed.push(color.clone());
                }
                _ => {}
            }
        }

        if self.config.respawn_snakes {
            out.extend(self.killed.iter().map(|color| Command::SpawnSnake {
                color: color.clone(),
                length: Some(self.config.snake_length),
                at: None,
                direction: None,
            }));
        }

        self.killed.len()
    }
}
