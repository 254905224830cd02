//! Game configuration loaded from TOML and overridden by command-line flags.

use std::{collections::HashSet, fs, path::Path, time::Duration};

use anyhow::{bail, Context, Result};
use cellsnake_core::{FieldSize, SnakeColor};
use cellsnake_system_levels::Level;
use serde::Deserialize;

/// Settings that shape a single game session.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct GameConfig {
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) interval_ms: u64,
    pub(crate) apples: u32,
    pub(crate) level: Level,
    pub(crate) seed: u64,
    pub(crate) players: Vec<PlayerConfig>,
    pub(crate) respawn_length: u32,
    pub(crate) pause_on_death: bool,
}

/// A snake present from the start of the game.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct PlayerConfig {
    pub(crate) color: String,
    #[serde(default = "default_player_length")]
    pub(crate) length: u32,
}

const fn default_player_length() -> u32 {
    3
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 32,
            height: 32,
            interval_ms: 150,
            apples: 2,
            level: Level::Random,
            seed: 0x5eed,
            players: vec![PlayerConfig {
                color: "blue".to_owned(),
                length: default_player_length(),
            }],
            respawn_length: default_player_length(),
            pause_on_death: true,
        }
    }
}

impl GameConfig {
    /// Reads a configuration file; missing keys fall back to defaults.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("invalid config file {}", path.display()))
    }

    pub(crate) fn parse(text: &str) -> Result<Self> {
        toml::from_str(text).context("config is not valid TOML for a game")
    }

    /// Checks constraints the type system does not capture.
    pub(crate) fn validate(&self) -> Result<FieldSize> {
        let size = FieldSize::new(self.width, self.height)?;
        if self.interval_ms == 0 {
            bail!("interval_ms must be positive");
        }

        let mut seen = HashSet::new();
        for player in &self.players {
            if player.length == 0 {
                bail!("player `{}` must have a positive length", player.color);
            }
            if !seen.insert(player.color.as_str()) {
                bail!("player color `{}` is listed more than once", player.color);
            }
        }
        if self.respawn_length == 0 {
            bail!("respawn_length must be positive");
        }
        Ok(size)
    }

    pub(crate) const fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub(crate) fn player_colors(&self) -> impl Iterator<Item = (SnakeColor, u32)> + '_ {
        self.players
            .iter()
            .map(|player| (SnakeColor::new(player.color.as_str()), player.length))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let config = GameConfig::parse("").expect("empty config parses");
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn partial_file_overrides_selected_keys() {
        let config = GameConfig::parse(
            r#"
            width = 20
            level = "basic"
            pause_on_death = false

            [[players]]
            color = "red"

            [[players]]
            color = "green"
            length = 6
            "#,
        )
        .expect("config parses");

        assert_eq!(config.width, 20);
        assert_eq!(config.height, 32);
        assert_eq!(config.level, Level::Basic);
        assert!(!config.pause_on_death);
        assert_eq!(
            config.player_colors().collect::<Vec<_>>(),
            vec![(SnakeColor::new("red"), 3), (SnakeColor::new("green"), 6)]
        );
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(GameConfig::parse("speed = 3").is_err());
    }

    #[test]
    fn validation_rejects_duplicate_colors_and_empty_fields() {
        let mut config = GameConfig::default();
        config.players.push(config.players[0].clone());
        assert!(config.validate().is_err());

        let config = GameConfig {
            width: 0,
            ..GameConfig::default()
        };
        assert!(config.validate().is_err());

        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_interval_is_rejected() {
        let config = GameConfig::parse("interval_ms = 0").expect("config parses");
        let error = config.validate().expect_err("zero interval never steps");
        assert!(error.to_string().contains("interval_ms"));
    }
}
