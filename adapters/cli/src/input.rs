//! Key bindings and scripted key presses.
//!
//! A script is a comma separated list of `TICK:KEY[:COLOR]` entries where
//! `TICK` counts clock intervals from the start of the run. Key names follow
//! browser conventions, so `ArrowLeft` and `Left` are equivalent.

use anyhow::{anyhow, bail, Context, Result};
use cellsnake_core::{Command, SnakeColor, Turn};

/// Effect of pressing a bound key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Action {
    TogglePause,
    Turn(Turn),
}

/// Resolves a key name into its bound action.
pub(crate) fn action_for_key(key: &str) -> Option<Action> {
    match key {
        " " | "Space" => Some(Action::TogglePause),
        "ArrowLeft" | "Left" => Some(Action::Turn(Turn::Left)),
        "ArrowRight" | "Right" => Some(Action::Turn(Turn::Right)),
        _ => None,
    }
}

/// A key press scheduled at a given clock interval.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct KeyPress {
    pub(crate) tick: u64,
    pub(crate) action: Action,
    pub(crate) color: Option<SnakeColor>,
}

impl KeyPress {
    /// Command submitted to the world for this press, if any.
    pub(crate) fn command(&self) -> Option<Command> {
        match self.action {
            Action::TogglePause => None,
            Action::Turn(turn) => Some(Command::Turn {
                color: self.color.clone(),
                turn,
            }),
        }
    }
}

/// Parses a key script, returning presses ordered by tick.
pub(crate) fn parse_script(script: &str) -> Result<Vec<KeyPress>> {
    let mut presses = script
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| parse_entry(entry).with_context(|| format!("invalid key entry `{entry}`")))
        .collect::<Result<Vec<_>>>()?;
    presses.sort_by_key(|press| press.tick);
    Ok(presses)
}

fn parse_entry(entry: &str) -> Result<KeyPress> {
    let mut parts = entry.splitn(3, ':');
    let tick = parts
        .next()
        .ok_or_else(|| anyhow!("missing tick"))?
        .parse::<u64>()
        .context("tick must be a non-negative integer")?;
    let key = parts.next().ok_or_else(|| anyhow!("missing key"))?;
    let Some(action) = action_for_key(key) else {
        bail!("unbound key `{key}`");
    };
    let color = parts
        .next()
        .filter(|color| !color.is_empty())
        .map(SnakeColor::from);
    if color.is_some() && action == Action::TogglePause {
        bail!("pause does not take a color");
    }

    Ok(KeyPress {
        tick,
        action,
        color,
    })
}
