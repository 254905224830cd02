#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs a cellsnake game and prints its frames.

mod config;
mod input;

use std::{
    io,
    path::PathBuf,
    thread,
    time::{Duration, Instant},
};

use anyhow::{Context, Result};
use cellsnake_core::{Command, Event, SnakeColor};
use cellsnake_rendering::{Frame, Presenter, TextPresenter};
use cellsnake_system_clock::{self as clock, Clock};
use cellsnake_system_levels::{self as levels, Level, Levels};
use cellsnake_system_respawn::{self as respawn, Respawn};
use cellsnake_world::{self as world, query, World};
use clap::Parser;
use log::{debug, info};

use crate::{
    config::GameConfig,
    input::{Action, KeyPress},
};

/// Command-line arguments accepted by the cellsnake binary.
#[derive(Debug, Parser)]
#[command(
    name = "cellsnake",
    version,
    about = "Multiplayer snake on a toroidal cellular automaton"
)]
struct Cli {
    /// TOML file with game settings; flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Field width in cells.
    #[arg(long)]
    width: Option<u32>,
    /// Field height in cells.
    #[arg(long)]
    height: Option<u32>,
    /// Seed for every random placement.
    #[arg(long)]
    seed: Option<u64>,
    /// Wall layout: empty, basic or random.
    #[arg(long)]
    level: Option<Level>,
    /// Number of clock intervals to run before exiting.
    #[arg(long, default_value_t = 100)]
    ticks: u64,
    /// Wait for the configured interval between frames instead of running flat out.
    #[arg(long)]
    realtime: bool,
    /// Scripted key presses as comma separated `TICK:KEY[:COLOR]` entries.
    #[arg(long, default_value = "")]
    keys: String,
    /// Enables debug logging for the game crates.
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(level) = self.level {
            config.level = level;
        }
        Ok(config)
    }
}

/// Entry point for the cellsnake command-line interface.
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = cli.game_config()?;
    let keys = input::parse_script(&cli.keys).context("failed to parse --keys")?;
    let stdout = io::stdout();
    let mut presenter = TextPresenter::new(stdout.lock());

    let mut game = Game::new(&config)?;
    game.run(cli.ticks, cli.realtime, &keys, &mut presenter)
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "cellsnake=debug"
    } else {
        "cellsnake=info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

/// Drives the world and its systems from a fixed-interval clock.
struct Game {
    world: World,
    clock: Clock,
    respawn: Respawn,
    interval: Duration,
    pause_on_death: bool,
    events: Vec<Event>,
    commands: Vec<Command>,
}

impl Game {
    fn new(config: &GameConfig) -> Result<Self> {
        let size = config.validate()?;
        let mut game = Self {
            world: World::new(size, config.seed),
            clock: Clock::new(clock::Config::new(config.interval())),
            respawn: Respawn::new(respawn::Config::new(config.respawn_length, true, true)),
            interval: config.interval(),
            pause_on_death: config.pause_on_death,
            events: Vec::new(),
            commands: Vec::new(),
        };

        game.world.on_snake_killed(Some(Box::new(|color: &SnakeColor| {
            info!("{color} was killed");
        })));
        game.world
            .on_apple_eaten(Some(Box::new(|| debug!("an apple was eaten"))));

        let levels = Levels::new(levels::Config::new(config.level));
        game.submit(Command::ConfigureField { size });
        levels.handle(&game.events, &mut game.commands);
        game.flush_commands();

        for _ in 0..config.apples {
            game.submit(Command::PlaceApple { at: None });
        }
        for (color, length) in config.player_colors() {
            game.submit(Command::SpawnSnake {
                color,
                length: Some(length),
                at: None,
                direction: None,
            });
        }

        info!(
            "{}x{} field ready with the {} level and {} player(s)",
            size.width(),
            size.height(),
            config.level,
            config.players.len()
        );
        game.events.clear();
        Ok(game)
    }

    fn run(
        &mut self,
        ticks: u64,
        realtime: bool,
        keys: &[KeyPress],
        presenter: &mut impl Presenter,
    ) -> Result<()> {
        presenter.present(&self.frame())?;

        let mut pending_keys = keys.iter().peekable();
        let mut last = Instant::now();
        for interval in 0..ticks {
            while let Some(press) = pending_keys.next_if(|press| press.tick <= interval) {
                self.press(press);
            }

            let dt = if realtime {
                thread::sleep(self.interval);
                let now = Instant::now();
                let elapsed = now.duration_since(last);
                last = now;
                elapsed
            } else {
                self.interval
            };

            self.commands.clear();
            self.clock.handle(dt, &mut self.commands);
            if self.commands.is_empty() {
                continue;
            }
            self.flush_commands();
            self.restock();
            presenter.present(&self.frame())?;
        }

        info!("finished after {} steps", query::tick(&self.world));
        Ok(())
    }

    fn press(&mut self, press: &KeyPress) {
        match press.action {
            Action::TogglePause => {
                let paused = self.clock.toggle();
                info!("{}", if paused { "paused" } else { "resumed" });
            }
            Action::Turn(_) => {
                if let Some(command) = press.command() {
                    self.submit(command);
                }
            }
        }
    }

    /// Feeds the step events to the respawn system and applies its output.
    fn restock(&mut self) {
        let deaths = self.respawn.handle(&self.events, &mut self.commands);
        self.events.clear();
        self.flush_commands();
        if deaths > 0 && self.pause_on_death && !self.clock.is_paused() {
            self.clock.pause();
            info!("paused after a snake died");
        }
    }

    fn submit(&mut self, command: Command) {
        world::apply(&mut self.world, command, &mut self.events);
    }

    fn flush_commands(&mut self) {
        for command in std::mem::take(&mut self.commands) {
            self.submit(command);
        }
    }

    fn frame(&self) -> Frame {
        Frame::from_cells(
            query::field_size(&self.world),
            query::cells(&self.world),
            query::tick(&self.world),
            self.clock.is_paused(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet_config() -> GameConfig {
        GameConfig {
            width: 8,
            height: 8,
            apples: 0,
            level: Level::Empty,
            pause_on_death: false,
            ..GameConfig::default()
        }
    }

    fn run(keys: &str, ticks: u64) -> (Game, String) {
        let mut game = Game::new(&quiet_config()).expect("valid config");
        let keys = input::parse_script(keys).expect("valid script");
        let mut presenter = TextPresenter::new(Vec::new());
        game.run(ticks, false, &keys, &mut presenter)
            .expect("in-memory presenter never fails");
        let output = String::from_utf8(presenter.into_inner()).expect("frames are utf-8");
        (game, output)
    }

    #[test]
    fn one_frame_per_step_plus_the_initial_one() {
        let (game, output) = run("", 5);

        assert_eq!(query::tick(&game.world), 5);
        assert_eq!(output.matches("tick ").count(), 6);
        assert!(output.contains("tick 5"));
        assert_eq!(query::heads(&game.world).len(), 1);
    }

    #[test]
    fn pause_key_holds_the_world() {
        let (game, output) = run("0:Space, 3:Space", 5);

        assert_eq!(query::tick(&game.world), 2);
        assert_eq!(output.matches("tick ").count(), 3);
    }

    #[test]
    fn turn_key_reaches_the_first_player() {
        let (game, _) = run("0:Left", 1);
        let head = &query::heads(&game.world)[0];

        assert_eq!(head.color, SnakeColor::new("blue"));
        assert_eq!(query::pending_turn(&game.world, &head.color), None);
    }
}
