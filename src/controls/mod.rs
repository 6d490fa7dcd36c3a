mod hud;
mod keyboard;

pub use hud::{hud_system, setup_hud};
pub use keyboard::keyboard_control_system;
