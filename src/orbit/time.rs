use bevy::prelude::*;

use crate::orbit::{MoonPhase, orbital_angle, rotation_angle};
use crate::{INITIAL_HOUR, ORBIT_SLIDER_STEPS_PER_DAY};

#[derive(Resource, Clone, Copy, Debug, PartialEq)]
/// The two inputs driving every derived position, orientation and label.
pub struct SimulationTime {
    /// Days into the current synodic cycle.
    pub day_progress: f32,
    /// Hour of the Earth's rotation in `[0, 24)`.
    pub hour: f32,
}

impl Default for SimulationTime {
    fn default() -> Self {
        Self::new(0.0, INITIAL_HOUR)
    }
}

impl SimulationTime {
    /// Build simulation time from day progress and hour.
    pub fn new(day_progress: f32, hour: f32) -> Self {
        Self { day_progress, hour }
    }

    /// Build simulation time from an orbit slider position (tenths of a day).
    pub fn from_orbit_slider(value: u32, hour: f32) -> Self {
        Self::new(value as f32 / ORBIT_SLIDER_STEPS_PER_DAY, hour)
    }

    /// Absolute set. Callers clamp; no validation happens here.
    pub fn set(&mut self, day_progress: f32, hour: f32) {
        self.day_progress = day_progress;
        self.hour = hour;
    }

    /// Nearest orbit slider position for the current day progress.
    pub fn orbit_slider_value(&self) -> u32 {
        (self.day_progress * ORBIT_SLIDER_STEPS_PER_DAY).round().max(0.0) as u32
    }

    /// Advance by `steps` slider positions, wrapping to day 0 once `max` is exceeded.
    ///
    /// `max` itself is a valid position: with `max = 295` the sequence runs
    /// `29.4 -> 29.5 -> 0.0`.
    pub fn advance_orbit_slider(&mut self, steps: u32, max: u32) {
        let next = self.orbit_slider_value().saturating_add(steps);
        let next = if next > max { 0 } else { next };
        self.day_progress = next as f32 / ORBIT_SLIDER_STEPS_PER_DAY;
    }

    /// Moon orbital angle for this time.
    pub fn orbital_angle(&self, cycle_period: f32) -> f32 {
        orbital_angle(self.day_progress, cycle_period)
    }

    /// Earth rotation angle for this time.
    pub fn rotation_angle(&self) -> f32 {
        rotation_angle(self.hour)
    }

    /// Phase label for this time.
    pub fn phase(&self, cycle_period: f32) -> MoonPhase {
        MoonPhase::from_day_progress(self.day_progress, cycle_period)
    }
}
