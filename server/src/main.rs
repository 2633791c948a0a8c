mod api;
mod server_config;
mod web_server;

use std::path::PathBuf;

use clap::Parser;
use common::log;
use common::logger::{self, LogLevel};

use server_config::{DEFAULT_PORT, DEFAULT_STATIC_DIR};
use web_server::run_web_server;

#[derive(Parser)]
#[command(name = "tictactoe_server")]
struct Args {
    #[arg(long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Directory holding index.html and its assets
    #[arg(long, default_value = DEFAULT_STATIC_DIR)]
    static_dir: PathBuf,

    #[arg(long)]
    use_log_prefix: bool,

    #[arg(long, value_enum, default_value_t = LogLevelArg::Info)]
    log_level: LogLevelArg,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum LogLevelArg {
    Debug,
    Info,
    Warn,
}

impl From<LogLevelArg> for LogLevel {
    fn from(level: LogLevelArg) -> Self {
        match level {
            LogLevelArg::Debug => LogLevel::Debug,
            LogLevelArg::Info => LogLevel::Info,
            LogLevelArg::Warn => LogLevel::Warn,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Server".to_string())
    } else {
        None
    };
    logger::init_logger(prefix, args.log_level.into());

    let shutdown_signal = async {
        if tokio::signal::ctrl_c().await.is_ok() {
            log!("Shutdown signal received");
        }
    };

    run_web_server(args.port, args.static_dir, shutdown_signal).await?;

    log!("Server shut down gracefully");

    Ok(())
}
