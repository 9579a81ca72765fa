use std::path::PathBuf;

use clap::Parser;

pub const DEFAULT_FPS: u32 = 60;
pub const WINDOW_TITLE: &str = "Top-Down Shooter";

/// Top-down wave shooter for the terminal.
///
/// Move with WASD or the arrow keys, aim with the mouse, click or press
/// Space to fire. Esc or P pauses, Q quits.
#[derive(Debug, Parser)]
#[command(name = "rustshooter", author, version, about)]
pub struct Args {
    /// Seed for enemy placement and effects (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Target frame rate
    #[arg(long, default_value_t = DEFAULT_FPS, value_parser = clap::value_parser!(u32).range(1..=1000))]
    pub fps: u32,

    /// Write logs to this file (filter with RUST_LOG, default info)
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

/// Resolved runtime settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub seed: u64,
    pub fps: u32,
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: 0,
            fps: DEFAULT_FPS,
            log_file: None,
        }
    }
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Self {
            seed: args.seed.unwrap_or_else(rand::random),
            fps: args.fps,
            log_file: args.log_file,
        }
    }
}
