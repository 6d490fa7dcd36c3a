//! Startup configuration: defaults, command-line overrides and their validation.

mod cli;
mod error;

use std::time::Duration;

use bevy::prelude::*;

pub use cli::CliArgs;
pub use error::ConfigError;

use crate::orbit::SimulationTime;
use crate::{
    CLOSE_UP_LIGHT_RADIUS, EARTH_POSITION, MOON_ORBIT_RADIUS, MOON_ORBITAL_PERIOD_DAYS,
    OBSERVER_LIGHT_RADIUS, ORBIT_SLIDER_STEPS_PER_DAY, TICK_INTERVAL_MS, TICK_STEP,
};

#[derive(Resource, Clone, Debug, PartialEq)]
/// Simulation parameters shared by the orbital model, scene sync and animation driver.
pub struct SimulationConfig {
    /// Synodic cycle length in days.
    pub cycle_period: f32,
    /// Period of the animation driver's model-update tick.
    pub tick_interval: Duration,
    /// Orbit slider positions advanced per tick.
    pub tick_step: u32,
    /// Time applied at startup.
    pub initial_time: SimulationTime,
    /// Whether the animation driver starts running.
    pub autoplay: bool,
    /// Overview position of the Earth.
    pub earth_position: Vec3,
    /// Radius of the Moon's orbit around the Earth.
    pub moon_orbit_radius: f32,
    /// Sunlight distance for the from-Earth and from-Moon views.
    pub close_up_light_radius: f32,
    /// Sunlight distance for the from-observer view.
    pub observer_light_radius: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            cycle_period: MOON_ORBITAL_PERIOD_DAYS,
            tick_interval: Duration::from_millis(TICK_INTERVAL_MS),
            tick_step: TICK_STEP,
            initial_time: SimulationTime::default(),
            autoplay: false,
            earth_position: EARTH_POSITION,
            moon_orbit_radius: MOON_ORBIT_RADIUS,
            close_up_light_radius: CLOSE_UP_LIGHT_RADIUS,
            observer_light_radius: OBSERVER_LIGHT_RADIUS,
        }
    }
}

impl SimulationConfig {
    /// Last valid orbit slider position; the animation wraps once it is exceeded.
    pub fn orbit_slider_max(&self) -> u32 {
        (self.cycle_period * ORBIT_SLIDER_STEPS_PER_DAY).round() as u32
    }
}
