use std::fmt;
use std::sync::OnceLock;

use chrono::Local;
use serde::{Deserialize, Serialize};

static LOGGER: OnceLock<Logger> = OnceLock::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warn,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warn => write!(f, "WARN"),
        }
    }
}

pub struct Logger {
    prefix: Option<String>,
    level: LogLevel,
}

impl Logger {
    fn new(prefix: Option<String>, level: LogLevel) -> Self {
        Self { prefix, level }
    }

    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.level
    }

    pub fn log(&self, level: LogLevel, file: &str, line: u32, message: &str) {
        if !self.enabled(level) {
            return;
        }
        println!("{}", self.format_line(level, file, line, message));
    }

    fn format_line(&self, level: LogLevel, file: &str, line: u32, message: &str) -> String {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        let file_name = file.rsplit(['/', '\\']).next().unwrap_or(file);
        match self.prefix {
            Some(ref prefix) => format!(
                "[{}][{}][{}:{}][{}] {}",
                timestamp, prefix, file_name, line, level, message
            ),
            None => format!("[{}][{}:{}][{}] {}", timestamp, file_name, line, level, message),
        }
    }
}

/// First call wins; later calls are ignored.
pub fn init_logger(prefix: Option<String>, level: LogLevel) {
    LOGGER.get_or_init(|| Logger::new(prefix, level));
}

// Library code logs before a binary sets the logger up (tests, benches); those
// messages are dropped.
pub fn log(level: LogLevel, file: &str, line: u32, message: &str) {
    if let Some(logger) = LOGGER.get() {
        logger.log(level, file, line, message);
    }
}

#[macro_export]
macro_rules! log {
    ($($arg:tt)*) => {
        $crate::logger::log($crate::logger::LogLevel::Info, file!(), line!(), &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        $crate::logger::log($crate::logger::LogLevel::Debug, file!(), line!(), &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        $crate::logger::log($crate::logger::LogLevel::Warn, file!(), line!(), &format!($($arg)*))
    };
}
