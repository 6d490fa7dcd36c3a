mod driver;
mod systems;

pub use driver::{AnimationDriver, PlaybackState};
pub use systems::animation_tick_system;
