mod app;
mod config;
mod error;
mod event;
mod game;
mod platform;
mod ui;

use std::fs::File;
use std::process::ExitCode;

use clap::Parser;

use app::App;
use config::{Args, Config, WINDOW_TITLE};
use error::{GameError, Result};
use game::{ARENA_HEIGHT, ARENA_WIDTH};
use platform::TerminalPlatform;

fn main() -> ExitCode {
    let config = Config::from(Args::parse());

    if let Err(err) = init_logger(&config) {
        eprintln!("rustshooter: {err}");
        return ExitCode::FAILURE;
    }
    log::info!("starting with seed {} at {} fps", config.seed, config.fps);

    match play(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            eprintln!("rustshooter: {err}");
            ExitCode::FAILURE
        }
    }
}

/// The alternate screen owns the terminal, so logs only go to a file.
fn init_logger(config: &Config) -> Result<()> {
    let Some(path) = &config.log_file else {
        return Ok(());
    };
    let file = File::create(path)?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()
        .map_err(|e| GameError::Logger(e.to_string()))
}

fn play(config: Config) -> Result<()> {
    let mut platform = TerminalPlatform::create_window(ARENA_WIDTH, ARENA_HEIGHT, WINDOW_TITLE)?;
    let mut app = App::new(config);

    let outcome = app::run(&mut platform, &mut app);
    // Restore the terminal before anything gets printed.
    let closed = platform.close();
    outcome?;
    closed
}
