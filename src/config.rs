/// Runtime configuration. There is no config file; every field has a
/// default that can be overridden through a `TERM_INVADERS_*` variable.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const ENV_FPS: &str = "TERM_INVADERS_FPS";
pub const ENV_HIGHSCORES: &str = "TERM_INVADERS_HIGHSCORES";
pub const ENV_LOG: &str = "TERM_INVADERS_LOG";
pub const ENV_UFO_DELAYS_CLEAR: &str = "TERM_INVADERS_UFO_DELAYS_CLEAR";
pub const ENV_LIVES: &str = "TERM_INVADERS_LIVES";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Simulation steps per second.
    pub fps: u32,
    pub highscore_path: PathBuf,
    pub log_path: PathBuf,
    pub ufo_delays_level_clear: bool,
    pub initial_lives: u32,
    /// Length of a freeze-frame banner (level start, game over).
    pub freeze: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fps: 30,
            highscore_path: default_highscore_path(),
            log_path: PathBuf::from("term_invaders.log"),
            ufo_delays_level_clear: true,
            initial_lives: 5,
            freeze: Duration::from_secs(1),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup, falling back to the
    /// default for anything missing or unparseable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(fps) = parse::<u32>(&lookup, ENV_FPS) {
            if fps > 0 {
                config.fps = fps;
            } else {
                tracing::warn!(key = ENV_FPS, "ignoring zero frame rate");
            }
        }
        if let Some(lives) = parse::<u32>(&lookup, ENV_LIVES) {
            if lives > 0 {
                config.initial_lives = lives;
            } else {
                tracing::warn!(key = ENV_LIVES, "ignoring zero lives");
            }
        }
        if let Some(path) = lookup(ENV_HIGHSCORES) {
            config.highscore_path = PathBuf::from(path);
        }
        if let Some(path) = lookup(ENV_LOG) {
            config.log_path = PathBuf::from(path);
        }
        if let Some(value) = lookup(ENV_UFO_DELAYS_CLEAR) {
            match value.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => config.ufo_delays_level_clear = true,
                "0" | "false" | "no" | "off" => config.ufo_delays_level_clear = false,
                other => tracing::warn!(key = ENV_UFO_DELAYS_CLEAR, value = other, "ignoring unrecognised flag"),
            }
        }

        config
    }

    pub fn frame_duration(&self) -> Duration {
        Duration::from_millis(1000 / u64::from(self.fps.max(1)))
    }
}

fn parse<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(key, value = %raw, "ignoring unparseable setting");
            None
        }
    }
}

fn default_highscore_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".term_invaders_hs")
}
