use std::fmt;

use cellsnake_core::{Event, SnakeColor};

/// Callback invoked whenever a snake eats an apple.
pub type AppleEatenListener = Box<dyn FnMut()>;

/// Callback invoked with the color of every killed snake.
pub type SnakeKilledListener = Box<dyn FnMut(&SnakeColor)>;

/// Ordered listener lists owned by a single world.
#[derive(Default)]
pub(crate) struct Listeners {
    apple_eaten: Vec<AppleEatenListener>,
    snake_killed: Vec<SnakeKilledListener>,
}

impl Listeners {
    /// Appends a listener, or drops every listener when `None`.
    pub(crate) fn set_apple_eaten(&mut self, listener: Option<AppleEatenListener>) {
        match listener {
            Some(listener) => self.apple_eaten.push(listener),
            None => self.apple_eaten.clear(),
        }
    }

    /// Appends a listener, or drops every listener when `None`.
    pub(crate) fn set_snake_killed(&mut self, listener: Option<SnakeKilledListener>) {
        match listener {
            Some(listener) => self.snake_killed.push(listener),
            None => self.snake_killed.clear(),
        }
    }

    /// Runs the matching listeners in registration order, then records the event.
    ///
    /// Listener panics are not caught.
    pub(crate) fn announce(&mut self, event: Event, out_events: &mut Vec<Event>) {
        match &event {
            Event::AppleEaten { .. } => {
                for listener in &mut self.apple_eaten {
                    listener();
                }
            }
            Event::SnakeKilled { color } => {
                for listener in &mut self.snake_killed {
                    listener(color);
                }
            }
            _ => {}
        }
        out_events.push(event);
    }
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("apple_eaten", &self.apple_eaten.len())
            .field("snake_killed", &self.snake_killed.len())
            .finish()
    }
}
