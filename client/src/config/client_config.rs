use std::path::{Path, PathBuf};

use common::config::{ConfigManager, FileContentConfigProvider, Validate, YamlConfigSerializer};
use common::games::tictactoe::{
    DEFAULT_COMPUTER_DELAY_MS, Difficulty, GameMode, TicTacToeSettings,
};
use common::logger::LogLevel;
use serde::{Deserialize, Serialize};

const CONFIG_FILE_NAME: &str = "tictactoe_client_config.yaml";
const MAX_COMPUTER_DELAY_MS: u64 = 5000;

fn get_config_path() -> PathBuf {
    if let Ok(exe_path) = std::env::current_exe()
        && let Some(exe_dir) = exe_path.parent()
    {
        return exe_dir.join(CONFIG_FILE_NAME);
    }
    PathBuf::from(CONFIG_FILE_NAME)
}

pub fn get_config_manager(
    path: Option<&Path>,
) -> ConfigManager<FileContentConfigProvider, ClientConfig, YamlConfigSerializer> {
    match path {
        Some(path) => ConfigManager::from_yaml_file(path),
        None => ConfigManager::from_yaml_file(get_config_path()),
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct ClientConfig {
    pub difficulty: Difficulty,
    #[serde(default)]
    pub two_player: bool,
    pub computer_delay_ms: u64,
    #[serde(default)]
    pub log_level: LogLevel,
}

impl ClientConfig {
    pub fn game_settings(&self) -> TicTacToeSettings {
        TicTacToeSettings {
            difficulty: self.difficulty,
            mode: if self.two_player {
                GameMode::TwoPlayer
            } else {
                GameMode::VsComputer
            },
            computer_delay_ms: self.computer_delay_ms,
        }
    }
}

impl Validate for ClientConfig {
    fn validate(&self) -> Result<(), String> {
        if self.computer_delay_ms > MAX_COMPUTER_DELAY_MS {
            return Err(format!(
                "computer_delay_ms must not exceed {}",
                MAX_COMPUTER_DELAY_MS
            ));
        }
        Ok(())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Hard,
            two_player: false,
            computer_delay_ms: DEFAULT_COMPUTER_DELAY_MS,
            log_level: LogLevel::Info,
        }
    }
}
