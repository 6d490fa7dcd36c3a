use bevy::prelude::*;

use crate::HOURS_PER_DAY;
use crate::animation::AnimationDriver;
use crate::config::SimulationConfig;
use crate::orbit::SimulationTime;

/// One user action on the simulation controls.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ControlAction {
    /// Move the orbit slider by this many positions (0.1 day each).
    NudgeOrbit(i32),
    /// Move the rotation control by this many whole hours.
    NudgeHour(i32),
    /// Start or stop the animation.
    TogglePlayback,
    /// Stop and return to day 0, noon.
    Reset,
}

impl ControlAction {
    /// Key bindings, checked in this order each frame.
    const BINDINGS: [(KeyCode, ControlAction); 6] = [
        (KeyCode::ArrowLeft, ControlAction::NudgeOrbit(-1)),
        (KeyCode::ArrowRight, ControlAction::NudgeOrbit(1)),
        (KeyCode::ArrowDown, ControlAction::NudgeHour(-1)),
        (KeyCode::ArrowUp, ControlAction::NudgeHour(1)),
        (KeyCode::Space, ControlAction::TogglePlayback),
        (KeyCode::KeyR, ControlAction::Reset),
    ];

    /// Actions whose key was pressed this frame.
    fn from_input(keys: &ButtonInput<KeyCode>) -> impl Iterator<Item = ControlAction> + '_ {
        Self::BINDINGS
            .into_iter()
            .filter(|(key, _)| keys.just_pressed(*key))
            .map(|(_, action)| action)
    }

    /// Apply the action, clamping control values before the absolute set.
    pub(crate) fn apply(
        self,
        config: &SimulationConfig,
        time: &mut SimulationTime,
        driver: &mut AnimationDriver,
    ) {
        match self {
            ControlAction::NudgeOrbit(delta) => {
                let max = config.orbit_slider_max() as i64;
                let value = (time.orbit_slider_value() as i64 + delta as i64).clamp(0, max);
                let target = SimulationTime::from_orbit_slider(value as u32, time.hour);
                time.set(target.day_progress, target.hour);
            }
            ControlAction::NudgeHour(delta) => {
                let hour = (time.hour.floor() + delta as f32).clamp(0.0, HOURS_PER_DAY - 1.0);
                time.set(time.day_progress, hour);
            }
            ControlAction::TogglePlayback => {
                driver.toggle();
            }
            ControlAction::Reset => driver.reset(time),
        }
    }
}

/// Map key presses to slider nudges and playback controls.
///
/// `SimulationTime` is only borrowed mutably when an action fires, so idle frames
/// do not trigger a scene sync.
pub fn keyboard_control_system(
    keys: Res<ButtonInput<KeyCode>>,
    config: Res<SimulationConfig>,
    mut time: ResMut<SimulationTime>,
    mut driver: ResMut<AnimationDriver>,
) {
    for action in ControlAction::from_input(&keys) {
        debug!("control action: {action:?}");
        if action == ControlAction::TogglePlayback {
            // Playback alone leaves the model untouched.
            driver.toggle();
            continue;
        }
        action.apply(&config, &mut time, &mut driver);
    }
}
