use bevy::prelude::*;
use clap::Parser;

mod animation;
mod config;
mod controls;
mod orbit;
mod scene;

use animation::{AnimationDriver, animation_tick_system};
use config::{CliArgs, SimulationConfig};
use controls::{hud_system, keyboard_control_system, setup_hud};
use orbit::PhaseReadout;
use scene::{
    TransientRegistry, overview_orbit_camera_system, setup_scene, sync_scene_system,
    viewport_layout_system,
};

// Length of one synodic month in days.
const MOON_ORBITAL_PERIOD_DAYS: f32 = 29.5;
// Hours in one Earth rotation.
const HOURS_PER_DAY: f32 = 24.0;
// Orbit slider positions per simulated day (0.1-day resolution).
const ORBIT_SLIDER_STEPS_PER_DAY: f32 = 10.0;
// Hour the simulation starts at and returns to on reset.
const INITIAL_HOUR: f32 = 12.0;
// Model update cadence of the animation driver in milliseconds.
const TICK_INTERVAL_MS: u64 = 100;
// Orbit slider positions advanced per animation tick.
const TICK_STEP: u32 = 1;
// Overview position of the Earth (the Sun sits at the origin).
const EARTH_POSITION: Vec3 = Vec3::new(15.0, 0.0, 0.0);
// Radius of the Moon's orbit around the Earth in the overview.
const MOON_ORBIT_RADIUS: f32 = 8.0;
// Distance of the sunlight source in the from-Earth and from-Moon views.
const CLOSE_UP_LIGHT_RADIUS: f32 = 5.0;
// Distance of the sunlight source in the from-observer view.
const OBSERVER_LIGHT_RADIUS: f32 = 10.0;

// App entry point: parse the command line, then register resources and systems.
fn main() -> AppExit {
    let args = CliArgs::parse();
    let config = match SimulationConfig::default().with_cli_overrides(&args) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("moon_phases: {err}");
            return AppExit::error();
        }
    };

    let mut log_plugin = bevy::log::LogPlugin::default();
    if let Some(filter) = &args.log_filter {
        log_plugin.filter = filter.clone();
    }

    let mut driver = AnimationDriver::new(config.tick_interval);
    if config.autoplay {
        driver.start();
    }

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(log_plugin)
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Moon Phases".into(),
                        ..default()
                    }),
                    ..default()
                }),
        )
        .insert_resource(config.initial_time)
        .insert_resource(config)
        .insert_resource(driver)
        .init_resource::<TransientRegistry>()
        .init_resource::<PhaseReadout>()
        .add_systems(Startup, (setup_scene, setup_hud))
        .add_systems(
            Update,
            (
                keyboard_control_system,
                animation_tick_system,
                sync_scene_system,
                hud_system,
            )
                .chain(),
        )
        .add_systems(Update, (overview_orbit_camera_system, viewport_layout_system))
        .run()
}

