use bevy::prelude::*;

use crate::animation::AnimationDriver;
use crate::config::SimulationConfig;
use crate::orbit::SimulationTime;

/// Advance the orbit by one step per elapsed driver tick.
///
/// Touches `SimulationTime` only when a tick fires, so the scene sync runs at
/// the tick cadence rather than every frame.
pub fn animation_tick_system(
    time: Res<Time>,
    config: Res<SimulationConfig>,
    mut driver: ResMut<AnimationDriver>,
    mut simulation: ResMut<SimulationTime>,
) {
    if !driver.is_running() {
        return;
    }
    let ticks = driver.tick(time.delta());
    if ticks == 0 {
        return;
    }
    let max = config.orbit_slider_max();
    for _ in 0..ticks {
        simulation.advance_orbit_slider(config.tick_step, max);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    /// Build an app with a manually advanced clock and the tick system.
    fn tick_app(driver: AnimationDriver, start: SimulationTime) -> App {
        let mut app = App::new();
        app.insert_resource(SimulationConfig::default());
        app.insert_resource(driver);
        app.insert_resource(start);
        app.init_resource::<Time>();
        app.add_systems(Update, animation_tick_system);
        app
    }

    /// Advance the clock by `delta` and run one frame.
    fn step(app: &mut App, delta: Duration) {
        app.world_mut().resource_mut::<Time>().advance_by(delta);
        app.update();
    }

    /// Verify a running driver advances 0.1 day per tick and wraps past 29.5.
    #[test]
    fn running_driver_advances_and_wraps() {
        let mut driver = AnimationDriver::new(Duration::from_millis(100));
        driver.start();
        let mut app = tick_app(driver, SimulationTime::new(29.4, 12.0));

        step(&mut app, Duration::from_millis(100));
        assert_eq!(app.world().resource::<SimulationTime>().day_progress, 29.5);

        step(&mut app, Duration::from_millis(100));
        assert_eq!(app.world().resource::<SimulationTime>().day_progress, 0.0);
    }

    /// Verify a stopped driver leaves the simulation time untouched.
    #[test]
    fn stopped_driver_leaves_time_unchanged() {
        let driver = AnimationDriver::new(Duration::from_millis(100));
        let mut app = tick_app(driver, SimulationTime::new(3.0, 12.0));

        step(&mut app, Duration::from_millis(500));
        assert_eq!(app.world().resource::<SimulationTime>().day_progress, 3.0);
    }
}
