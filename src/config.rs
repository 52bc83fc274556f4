use std::time::Duration;

use clap::{Parser, ValueEnum};
use indoc::indoc;
use tracing::Level;

use crate::constants::{JITTER_THRESHOLD, PROMOTION_DELAY};
use crate::error::ConfigError;
use crate::session::SessionConfig;

const PROMOTION_DELAY_RANGE_MS: (u64, u64) = (0, 5_000);
const MAX_JITTER: u32 = 100;
const POLL_INTERVAL_RANGE_MS: (u64, u64) = (1, 1_000);

const KEYS_HELP: &str = indoc! {"
    Keys:
      p        show a popup
      d        toggle the debug log pane
      m        toggle mouse capture
      q, C-c   quit

    Hold a window's title bar for a moment, then drag it.
"};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "pad-wm",
    version = env!("CARGO_PKG_VERSION"),
    about = "Draggable windows confined to a box, in your terminal",
    after_help = KEYS_HELP
)]
pub struct Cli {
    /// How long a header press must be held before it turns into a drag.
    #[arg(long = "promotion-delay", value_name = "MS", default_value_t = PROMOTION_DELAY.as_millis() as u64)]
    pub promotion_delay_ms: u64,

    /// Movement (in cells, per axis) tolerated before a held press becomes a click.
    #[arg(long = "jitter", value_name = "CELLS", default_value_t = JITTER_THRESHOLD)]
    pub jitter: u32,

    /// Don't ring the terminal bell when a drag starts.
    #[arg(long = "no-haptics")]
    pub no_haptics: bool,

    /// Start with the debug log pane open.
    #[arg(long = "debug-log")]
    pub debug_log: bool,

    #[arg(long = "log-level", value_enum, default_value_t = LogLevel::Debug)]
    pub log_level: LogLevel,

    /// Upper bound on how long the UI waits for input between frames.
    #[arg(long = "poll-interval", value_name = "MS", default_value_t = 16)]
    pub poll_interval_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub session: SessionConfig,
    pub haptics: bool,
    pub debug_log: bool,
    pub log_level: Level,
    pub poll_interval: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            session: SessionConfig::default(),
            haptics: true,
            debug_log: false,
            log_level: Level::DEBUG,
            poll_interval: Duration::from_millis(16),
        }
    }
}

impl TryFrom<&Cli> for Config {
    type Error = ConfigError;

    fn try_from(cli: &Cli) -> Result<Self, Self::Error> {
        let (min, max) = PROMOTION_DELAY_RANGE_MS;
        if !(min..=max).contains(&cli.promotion_delay_ms) {
            return Err(ConfigError::PromotionDelay {
                value: cli.promotion_delay_ms,
                min,
                max,
            });
        }
        if cli.jitter > MAX_JITTER {
            return Err(ConfigError::JitterThreshold {
                value: cli.jitter,
                max: MAX_JITTER,
            });
        }
        let (min, max) = POLL_INTERVAL_RANGE_MS;
        if !(min..=max).contains(&cli.poll_interval_ms) {
            return Err(ConfigError::PollInterval {
                value: cli.poll_interval_ms,
                min,
                max,
            });
        }
        Ok(Self {
            session: SessionConfig {
                promotion_delay: Duration::from_millis(cli.promotion_delay_ms),
                jitter_threshold: cli.jitter,
            },
            haptics: !cli.no_haptics,
            debug_log: cli.debug_log,
            log_level: cli.log_level.into(),
            poll_interval: Duration::from_millis(cli.poll_interval_ms),
        })
    }
}
