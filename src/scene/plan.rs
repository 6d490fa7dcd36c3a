use bevy::prelude::*;

use crate::config::SimulationConfig;
use crate::orbit::{MoonPhase, SimulationTime, horizontal_offset, sun_facing_angle};
use crate::scene::ViewKind;

/// Derived placement of the overview's persistent objects.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OverviewPlan {
    pub earth_position: Vec3,
    /// Earth rotation about +Y.
    pub earth_yaw: f32,
    pub moon_position: Vec3,
    /// Translation of the Moon orbit ring; always the Earth position.
    pub moon_orbit_center: Vec3,
}

/// Derived state of a close-up view: the body's spin and where sunlight comes from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CloseUpPlan {
    /// Body rotation about +Y.
    pub body_yaw: f32,
    /// Position of the directional sunlight, shining toward the view origin.
    pub sun_light_position: Vec3,
}

impl CloseUpPlan {
    /// Transform for the body at the view origin.
    pub fn body_transform(&self) -> Transform {
        Transform::from_rotation(Quat::from_rotation_y(self.body_yaw))
    }

    /// Transform for the directional light, aimed at the view origin.
    pub fn light_transform(&self) -> Transform {
        Transform::from_translation(self.sun_light_position).looking_at(Vec3::ZERO, Vec3::Y)
    }
}

/// Everything one scene sync applies, derived from a single `SimulationTime`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScenePlan {
    pub overview: OverviewPlan,
    pub from_earth: CloseUpPlan,
    pub from_moon: CloseUpPlan,
    pub from_observer: CloseUpPlan,
    pub phase: MoonPhase,
}

impl ScenePlan {
    /// Derive positions, orientations, light directions and the phase label.
    pub fn derive(time: SimulationTime, config: &SimulationConfig) -> Self {
        let orbital = time.orbital_angle(config.cycle_period);
        let sun_side = sun_facing_angle(orbital);
        let earth_position = config.earth_position;

        let overview = OverviewPlan {
            earth_position,
            earth_yaw: time.rotation_angle(),
            moon_position: earth_position + horizontal_offset(orbital, config.moon_orbit_radius),
            moon_orbit_center: earth_position,
        };
        let close_up_light = horizontal_offset(sun_side, config.close_up_light_radius);
        // The from-Moon view spins by the bare orbital angle while the Moon views
        // add half a turn; the two are not exact inverses of each other.
        let from_earth = CloseUpPlan {
            body_yaw: sun_side,
            sun_light_position: close_up_light,
        };
        let from_moon = CloseUpPlan {
            body_yaw: orbital,
            sun_light_position: close_up_light,
        };
        let from_observer = CloseUpPlan {
            body_yaw: sun_side,
            sun_light_position: horizontal_offset(sun_side, config.observer_light_radius),
        };

        Self {
            overview,
            from_earth,
            from_moon,
            from_observer,
            phase: time.phase(config.cycle_period),
        }
    }

    /// Close-up plan for `view`; `None` for the overview.
    pub fn close_up(&self, view: ViewKind) -> Option<&CloseUpPlan> {
        match view {
            ViewKind::Overview => None,
            ViewKind::FromEarth => Some(&self.from_earth),
            ViewKind::FromMoon => Some(&self.from_moon),
            ViewKind::FromObserver => Some(&self.from_observer),
        }
    }
}
