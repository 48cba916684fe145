//! Command-line settings for the terminal frontend. Gameplay constants are
//! fixed and live in the library.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use thiserror::Error;

pub const MAX_FPS: u32 = 240;

#[derive(Parser, Debug)]
#[command(name = "sky_shooter")]
#[command(about = "Dodge falling enemies, grab power-ups, keep firing")]
pub struct Args {
    /// Frames per second.
    #[arg(long, default_value_t = 60)]
    pub fps: u32,

    /// Seed for enemy and item placement. Random when omitted.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write tracing output here (filter with RUST_LOG).
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Start playing straight away without the title card.
    #[arg(long)]
    pub no_intro: bool,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("--fps must be between 1 and {max}, got {got}")]
    FrameRate { got: u32, max: u32 },
}

#[derive(Debug)]
pub struct Settings {
    pub frame: Duration,
    pub seed: Option<u64>,
    pub log_file: Option<PathBuf>,
    pub intro: bool,
}

impl Args {
    pub fn into_settings(self) -> Result<Settings, ConfigError> {
        if self.fps == 0 || self.fps > MAX_FPS {
            return Err(ConfigError::FrameRate {
                got: self.fps,
                max: MAX_FPS,
            });
        }
        Ok(Settings {
            frame: Duration::from_secs(1) / self.fps,
            seed: self.seed,
            log_file: self.log_file,
            intro: !self.no_intro,
        })
    }
}
