use anyhow::{anyhow, Result};
use common::{Config, ConfigLoader, FsExt};
use tally::DEFAULT_PLAYER;

pub const CONFIG_SCOPE: &str = "tally";

#[derive(Debug, PartialEq)]
pub struct TallyOptions {
    pub player: i32,
    pub json: bool,
}

impl Default for TallyOptions {
    fn default() -> Self {
        Self {
            player: DEFAULT_PLAYER,
            json: false,
        }
    }
}

impl TallyOptions {
    /// The `--player` flag wins over the configured player.
    pub fn resolve_player(&self, flag: Option<i32>) -> i32 {
        flag.unwrap_or(self.player)
    }
}

impl Config for TallyOptions {
    fn load(config: &ConfigLoader) -> Result<Self> {
        // A set but unparseable value is an error, never the default.
        let player = match config.get("player") {
            Some(value) => value
                .as_i32()
                .ok_or_else(|| anyhow!("player must be an i32 player id, got {:?}", value))?,
            None => DEFAULT_PLAYER,
        };

        let json = match config.get("json") {
            Some(value) => value
                .as_bool()
                .ok_or_else(|| anyhow!("json must be a boolean, got {:?}", value))?,
            None => false,
        };

        Ok(Self { player, json })
    }
}

/// Loads the options from the config file when one is given. Environment overrides apply either way.
pub fn load_options(config_path: Option<&String>) -> Result<TallyOptions> {
    let config = match config_path {
        Some(config_path) => {
            ConfigLoader::new(config_path.relative_to_cwd()?, CONFIG_SCOPE.to_string())?
        }
        None => ConfigLoader::parse("{}", CONFIG_SCOPE.to_string())?,
    };

    config.load()
}
