mod model;
mod phase;
mod time;

pub use model::{horizontal_offset, orbital_angle, rotation_angle, sun_facing_angle};
pub use phase::{MoonPhase, PhaseReadout};
pub use time::SimulationTime;
