use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use grid_snake::game::{GameConfig, RandomPicker};
use grid_snake::modes::PlayMode;
use log::info;
use simplelog::{Config, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "grid_snake")]
#[command(version, about = "Classic Snake on a fixed grid, in the terminal")]
struct Cli {
    /// JSON file with a game configuration; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width in cells
    #[arg(long)]
    columns: Option<i32>,

    /// Grid height in cells
    #[arg(long)]
    rows: Option<i32>,

    /// Simulation ticks per second
    #[arg(long)]
    tick_rate: Option<u32>,

    /// Seed for food placement, for reproducible games
    #[arg(long)]
    seed: Option<u64>,

    /// Where to write the log; the terminal itself is taken by the game
    #[arg(long, default_value = "grid_snake.log")]
    log_file: PathBuf,

    /// Log verbosity
    #[arg(long, default_value = "info")]
    log_level: LogLevel,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

impl Cli {
    /// Defaults, then the config file, then individual flags
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_json_file(path)?,
            None => GameConfig::default(),
        };

        if let Some(columns) = self.columns {
            config.columns = columns;
        }
        if let Some(rows) = self.rows {
            config.rows = rows;
        }
        if let Some(tick_rate) = self.tick_rate {
            config.tick_rate = tick_rate;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }

        config.validate().context("Invalid game configuration")?;
        Ok(config)
    }
}

fn init_logging(cli: &Cli) {
    let level = LevelFilter::from(cli.log_level);
    if level == LevelFilter::Off {
        return;
    }

    let result = File::create(&cli.log_file)
        .with_context(|| format!("Failed to create log file {}", cli.log_file.display()))
        .and_then(|file| {
            WriteLogger::init(level, Config::default(), file).context("Failed to initialize logger")
        });

    // A missing log should not keep anyone from playing
    if let Err(err) = result {
        eprintln!("warning: {:#}", err);
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.game_config()?;

    init_logging(&cli);
    info!("Starting grid_snake with {:?}", config);

    match config.seed {
        Some(seed) => PlayMode::new(config, RandomPicker::seeded(seed)).run().await,
        None => PlayMode::new(config, RandomPicker::thread()).run().await,
    }
}
