use bevy::prelude::*;

use crate::animation::AnimationDriver;
use crate::orbit::{PhaseReadout, SimulationTime};

/// Marker for the status text in the overview corner.
#[derive(Component)]
pub struct HudText;

/// Font size of the status text.
const HUD_FONT_SIZE: f32 = 16.0;
/// Inset of the status text from the viewport corner.
const HUD_MARGIN: f32 = 10.0;
/// Key help shown under the status lines.
const HUD_HELP: &str = "<-/-> day   up/down hour   space play/stop   R reset   drag/scroll camera";

/// Spawn the status text node.
pub fn setup_hud(mut commands: Commands) {
    commands.spawn((
        Text::new(""),
        TextFont {
            font_size: HUD_FONT_SIZE,
            ..default()
        },
        TextColor(Color::WHITE),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(HUD_MARGIN),
            left: Val::Px(HUD_MARGIN),
            ..default()
        },
        HudText,
    ));
}

/// Status lines for the current time, phase label and playback state.
fn hud_lines(time: &SimulationTime, readout: &PhaseReadout, driver: &AnimationDriver) -> String {
    format!(
        "Day {:.1}   Hour {:.1}\nPhase: {}\nAnimation: {}\n{}",
        time.day_progress,
        time.hour,
        readout.current(),
        driver.state(),
        HUD_HELP
    )
}

/// Refresh the status text whenever the time, label or playback state changed.
pub fn hud_system(
    time: Res<SimulationTime>,
    readout: Res<PhaseReadout>,
    driver: Res<AnimationDriver>,
    mut query: Query<&mut Text, With<HudText>>,
) {
    if !(time.is_changed() || readout.is_changed() || driver.is_changed()) {
        return;
    }
    let Ok(mut text) = query.single_mut() else {
        return;
    };
    text.0 = hud_lines(&time, &readout, &driver);
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::orbit::MoonPhase;

    /// Verify the status lines show one-decimal values, the label and playback state.
    #[test]
    fn hud_lines_show_state() {
        let time = SimulationTime::new(14.7, 6.0);
        let mut readout = PhaseReadout::default();
        readout.publish(MoonPhase::FullMoon);
        let mut driver = AnimationDriver::new(Duration::from_millis(100));
        driver.start();

        let lines = hud_lines(&time, &readout, &driver);
        assert!(lines.starts_with("Day 14.7   Hour 6.0\nPhase: Full Moon\nAnimation: playing"));
    }
}
