use std::fmt;

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Serialize(String),
    Deserialize(String),
    Validation(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "Config file error: {}", e),
            ConfigError::Serialize(e) => write!(f, "Failed to serialize config: {}", e),
            ConfigError::Deserialize(e) => write!(f, "Failed to deserialize config: {}", e),
            ConfigError::Validation(e) => write!(f, "Config validation error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}
