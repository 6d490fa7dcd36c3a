//! Command-line argument parsing.

use std::time::Duration;

use clap::Parser;

use crate::HOURS_PER_DAY;
use crate::config::{ConfigError, SimulationConfig};

/// Moon phase viewer command-line arguments.
///
/// Values override the built-in simulation defaults.
#[derive(Parser, Debug, Default)]
#[command(name = "moon_phases", about = "Earth, Moon and Sun lunar phase viewer")]
pub struct CliArgs {
    /// Initial days into the lunar cycle.
    #[arg(long)]
    pub day: Option<f32>,

    /// Initial hour of the Earth's rotation.
    #[arg(long)]
    pub hour: Option<f32>,

    /// Start with the animation running.
    #[arg(long)]
    pub play: bool,

    /// Animation tick interval in milliseconds.
    #[arg(long)]
    pub tick_ms: Option<u64>,

    /// Log filter passed to the logger (e.g. "info,moon_phases=debug").
    #[arg(long)]
    pub log_filter: Option<String>,
}

impl SimulationConfig {
    /// Apply and validate CLI overrides, consuming the base config.
    pub fn with_cli_overrides(mut self, args: &CliArgs) -> Result<Self, ConfigError> {
        if let Some(day) = args.day {
            if !(0.0..=self.cycle_period).contains(&day) {
                return Err(ConfigError::DayOutOfRange {
                    value: day,
                    max: self.cycle_period,
                });
            }
            self.initial_time.day_progress = day;
        }
        if let Some(hour) = args.hour {
            if !(0.0..HOURS_PER_DAY).contains(&hour) {
                return Err(ConfigError::HourOutOfRange(hour));
            }
            self.initial_time.hour = hour;
        }
        if let Some(ms) = args.tick_ms {
            if ms == 0 {
                return Err(ConfigError::ZeroTickInterval);
            }
            self.tick_interval = Duration::from_millis(ms);
        }
        self.autoplay |= args.play;
        Ok(self)
    }
}
