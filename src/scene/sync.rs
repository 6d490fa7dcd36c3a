use bevy::prelude::*;

use crate::config::SimulationConfig;
use crate::orbit::{PhaseReadout, SimulationTime};
use crate::scene::plan::{CloseUpPlan, OverviewPlan, ScenePlan};
use crate::scene::{Transient, ViewKind};

/// Persistent overview entities, repositioned in place on every sync.
#[derive(Clone, Copy, Debug)]
pub struct OverviewScene {
    pub earth: Entity,
    pub moon: Entity,
    /// Ring drawn around the Earth along the Moon's orbit.
    pub moon_orbit_path: Entity,
}

/// How a close-up view keeps its sunlight.
#[derive(Clone, Copy, Debug)]
pub enum SunLight {
    /// One light kept across syncs and moved to the new sun direction.
    Persistent(Entity),
    /// A new light spawned on every sync and registered as transient.
    PerSync {
        /// Illuminance of the spawned light in lux.
        illuminance: f32,
    },
}

/// Shared assets and light handling of a close-up view whose body is recreated per sync.
#[derive(Clone, Debug)]
pub struct CloseUpScene {
    pub mesh: Handle<Mesh>,
    pub material: Handle<StandardMaterial>,
    pub sun_light: SunLight,
}

#[derive(Resource, Default, Debug)]
/// Per-view scene handles; `None` until the view has been set up.
pub struct ViewportScenes {
    pub overview: Option<OverviewScene>,
    pub from_earth: Option<CloseUpScene>,
    pub from_moon: Option<CloseUpScene>,
    pub from_observer: Option<CloseUpScene>,
}

impl ViewportScenes {
    /// Close-up scene for `view`, if initialized. Always `None` for the overview.
    pub fn close_up(&self, view: ViewKind) -> Option<&CloseUpScene> {
        match view {
            ViewKind::Overview => None,
            ViewKind::FromEarth => self.from_earth.as_ref(),
            ViewKind::FromMoon => self.from_moon.as_ref(),
            ViewKind::FromObserver => self.from_observer.as_ref(),
        }
    }
}

#[derive(Resource, Default, Debug)]
/// Transient entities spawned by the last sync, one slot per view.
///
/// Resetting a slot despawns everything in it and bumps the slot generation, so
/// a sync never adds to what the previous sync left behind.
pub struct TransientRegistry {
    /// Live transient entities per view index.
    slots: [Vec<Entity>; 4],
    /// Number of resets per view index.
    generations: [u64; 4],
}

impl TransientRegistry {
    /// Despawn every entity registered for `view` and return the new generation.
    pub fn reset(&mut self, commands: &mut Commands, view: ViewKind) -> u64 {
        let slot = view.index();
        for entity in self.slots[slot].drain(..) {
            commands.entity(entity).despawn();
        }
        self.generations[slot] += 1;
        self.generations[slot]
    }

    /// Record `entity` as belonging to the current generation of `view`.
    pub fn register(&mut self, view: ViewKind, entity: Entity) {
        self.slots[view.index()].push(entity);
    }

    /// Number of live transient entities for `view`.
    pub fn len(&self, view: ViewKind) -> usize {
        self.slots[view.index()].len()
    }

    /// Current generation of `view`.
    pub fn generation(&self, view: ViewKind) -> u64 {
        self.generations[view.index()]
    }
}

/// Apply the scene plan for the current simulation time to every initialized view.
///
/// Runs only when `SimulationTime` changed (slider input, animation tick or reset).
/// Views that are not set up yet are skipped; the rest still update.
pub fn sync_scene_system(
    mut commands: Commands,
    time: Res<SimulationTime>,
    config: Res<SimulationConfig>,
    scenes: Option<Res<ViewportScenes>>,
    mut registry: ResMut<TransientRegistry>,
    mut readout: ResMut<PhaseReadout>,
    mut transforms: Query<&mut Transform>,
) {
    if !time.is_changed() {
        return;
    }
    let plan = ScenePlan::derive(*time, &config);
    debug!(
        "scene sync: day {:.1}, hour {:.1}",
        time.day_progress, time.hour
    );

    if readout.publish(plan.phase) {
        info!(
            "moon phase: {} ({})",
            plan.phase,
            plan.phase.traditional_name()
        );
    }

    let default_scenes = ViewportScenes::default();
    let scenes = scenes.as_deref().unwrap_or(&default_scenes);

    match scenes.overview {
        Some(overview) => apply_overview(&overview, &plan.overview, &mut transforms),
        None => warn!("{} view not initialized; skipping", ViewKind::Overview.label()),
    }

    for view in [ViewKind::FromEarth, ViewKind::FromMoon, ViewKind::FromObserver] {
        let (Some(scene), Some(view_plan)) = (scenes.close_up(view), plan.close_up(view)) else {
            warn!("{} view not initialized; skipping", view.label());
            continue;
        };
        apply_close_up(
            &mut commands,
            &mut registry,
            &mut transforms,
            view,
            scene,
            view_plan,
        );
    }
}

/// Reposition the overview's persistent objects.
fn apply_overview(
    scene: &OverviewScene,
    plan: &OverviewPlan,
    transforms: &mut Query<&mut Transform>,
) {
    if let Ok(mut earth) = transforms.get_mut(scene.earth) {
        earth.translation = plan.earth_position;
        earth.rotation = Quat::from_rotation_y(plan.earth_yaw);
    }
    if let Ok(mut moon) = transforms.get_mut(scene.moon) {
        moon.translation = plan.moon_position;
    }
    if let Ok(mut path) = transforms.get_mut(scene.moon_orbit_path) {
        path.translation = plan.moon_orbit_center;
    }
}

/// Replace a close-up view's transient body (and light) and move its persistent light.
fn apply_close_up(
    commands: &mut Commands,
    registry: &mut TransientRegistry,
    transforms: &mut Query<&mut Transform>,
    view: ViewKind,
    scene: &CloseUpScene,
    plan: &CloseUpPlan,
) {
    let generation = registry.reset(commands, view);
    let marker = Transient { view, generation };

    let body = commands
        .spawn((
            bevy::mesh::Mesh3d(scene.mesh.clone()),
            bevy::pbr::MeshMaterial3d(scene.material.clone()),
            plan.body_transform(),
            view.render_layers(),
            marker,
        ))
        .id();
    registry.register(view, body);

    match scene.sun_light {
        SunLight::Persistent(light) => {
            if let Ok(mut transform) = transforms.get_mut(light) {
                *transform = plan.light_transform();
            }
        }
        SunLight::PerSync { illuminance } => {
            let light = commands
                .spawn((
                    bevy::light::DirectionalLight {
                        illuminance,
                        shadows_enabled: false,
                        ..default()
                    },
                    plan.light_transform(),
                    view.render_layers(),
                    marker,
                ))
                .id();
            registry.register(view, light);
        }
    }
    debug!(
        "{} view: generation {}, {} transient entities",
        view.label(),
        registry.generation(view),
        registry.len(view)
    );
}

#[cfg(test)]
mod tests {
    use bevy::prelude::*;

    use super::*;
    use crate::orbit::MoonPhase;
    use crate::scene::setup_scene;

    /// Build a headless app with the real scene setup and the sync system.
    fn scene_app(time: SimulationTime) -> App {
        let mut app = App::new();
        app.init_resource::<Assets<Mesh>>();
        app.init_resource::<Assets<StandardMaterial>>();
        app.insert_resource(SimulationConfig::default());
        app.insert_resource(time);
        app.init_resource::<TransientRegistry>();
        app.init_resource::<PhaseReadout>();
        app.add_systems(Startup, setup_scene);
        app.add_systems(Update, sync_scene_system);
        app
    }

    /// Collect `(view, translation, rotation)` of every transient entity in a stable order.
    fn transient_snapshot(app: &mut App) -> Vec<(usize, Vec3, Quat)> {
        let world = app.world_mut();
        let mut query = world.query::<(&Transient, &Transform)>();
        let mut snapshot: Vec<_> = query
            .iter(world)
            .map(|(transient, transform)| {
                (transient.view.index(), transform.translation, transform.rotation)
            })
            .collect();
        snapshot.sort_by(|a, b| {
            a.0.cmp(&b.0)
                .then(a.1.length().total_cmp(&b.1.length()))
        });
        snapshot
    }

    /// Count directional lights on `view`'s render layer.
    fn light_count(app: &mut App, view: ViewKind) -> usize {
        let layers = view.render_layers();
        let world = app.world_mut();
        let mut query = world.query_filtered::<
            &bevy::camera::visibility::RenderLayers,
            With<bevy::light::DirectionalLight>,
        >();
        query.iter(world).filter(|l| **l == layers).count()
    }

    /// Verify a repeated sync with identical input leaves identical state and no leaked transients.
    #[test]
    fn repeated_sync_is_idempotent() {
        let mut app = scene_app(SimulationTime::new(9.3, 18.0));
        app.update();
        let first = transient_snapshot(&mut app);
        let observer_lights = light_count(&mut app, ViewKind::FromObserver);

        for _ in 0..3 {
            app.world_mut()
                .resource_mut::<SimulationTime>()
                .set_changed();
            app.update();
        }

        assert_eq!(transient_snapshot(&mut app), first);
        assert_eq!(light_count(&mut app, ViewKind::FromObserver), observer_lights);
        assert_eq!(observer_lights, 1);

        let registry = app.world().resource::<TransientRegistry>();
        assert_eq!(registry.len(ViewKind::FromEarth), 1);
        assert_eq!(registry.len(ViewKind::FromMoon), 1);
        assert_eq!(registry.len(ViewKind::FromObserver), 2);
        assert_eq!(registry.generation(ViewKind::FromObserver), 4);
    }

    /// Verify every live transient belongs to the latest generation of its view.
    #[test]
    fn stale_transients_are_removed() {
        let mut app = scene_app(SimulationTime::default());
        app.update();
        app.world_mut()
            .resource_mut::<SimulationTime>()
            .set(20.0, 3.0);
        app.update();

        let generations: Vec<(ViewKind, u64)> = {
            let world = app.world_mut();
            let mut query = world.query::<&Transient>();
            query.iter(world).map(|t| (t.view, t.generation)).collect()
        };
        let registry = app.world().resource::<TransientRegistry>();
        assert_eq!(generations.len(), 4);
        for (view, generation) in generations {
            assert_eq!(generation, registry.generation(view));
        }
    }

    /// Verify the overview follows the model and the orbit ring follows the Earth.
    #[test]
    fn overview_tracks_simulation_time() {
        let mut app = scene_app(SimulationTime::new(14.75, 6.0));
        app.update();

        let overview = app
            .world()
            .resource::<ViewportScenes>()
            .overview
            .expect("overview initialized");
        let world = app.world();
        let earth = world.get::<Transform>(overview.earth).unwrap();
        let moon = world.get::<Transform>(overview.moon).unwrap();
        let path = world.get::<Transform>(overview.moon_orbit_path).unwrap();

        assert_eq!(path.translation, earth.translation);
        assert!((moon.translation - Vec3::new(7.0, 0.0, 0.0)).length() < 1e-4);
        let expected = Quat::from_rotation_y(std::f32::consts::FRAC_PI_2);
        assert!(earth.rotation.angle_between(expected) < 1e-4);
        assert_eq!(
            world.resource::<PhaseReadout>().current(),
            MoonPhase::FullMoon
        );
    }

    /// Verify the persistent close-up lights move with the sun direction.
    #[test]
    fn persistent_lights_follow_sun_direction() {
        let mut app = scene_app(SimulationTime::default());
        app.update();

        let scenes = app.world().resource::<ViewportScenes>();
        let Some(SunLight::Persistent(light)) = scenes.from_earth.as_ref().map(|s| s.sun_light)
        else {
            panic!("from-earth view keeps a persistent light");
        };
        let transform = app.world().get::<Transform>(light).unwrap();
        assert!((transform.translation - Vec3::new(-5.0, 0.0, 0.0)).length() < 1e-4);
    }

    /// Verify uninitialized views are skipped while initialized ones still update.
    #[test]
    fn uninitialized_views_are_skipped() {
        let mut app = App::new();
        app.insert_resource(SimulationConfig::default());
        app.insert_resource(SimulationTime::new(14.75, 12.0));
        app.init_resource::<TransientRegistry>();
        app.init_resource::<PhaseReadout>();
        app.add_systems(Update, sync_scene_system);

        let earth = app.world_mut().spawn(Transform::default()).id();
        let moon = app.world_mut().spawn(Transform::default()).id();
        let moon_orbit_path = app.world_mut().spawn(Transform::default()).id();
        app.insert_resource(ViewportScenes {
            overview: Some(OverviewScene {
                earth,
                moon,
                moon_orbit_path,
            }),
            ..default()
        });
        app.update();

        let world = app.world();
        assert_eq!(
            world.get::<Transform>(moon_orbit_path).unwrap().translation,
            Vec3::new(15.0, 0.0, 0.0)
        );
        let moon_translation = world.get::<Transform>(moon).unwrap().translation;
        assert!((moon_translation - Vec3::new(7.0, 0.0, 0.0)).length() < 1e-4);
        let registry = world.resource::<TransientRegistry>();
        for view in ViewKind::ALL {
            assert_eq!(registry.len(view), 0);
        }
        assert_eq!(world.resource::<PhaseReadout>().current(), MoonPhase::FullMoon);
    }

    /// Verify a missing scene registry does not stop the label from updating.
    #[test]
    fn missing_scene_registry_still_publishes_phase() {
        let mut app = App::new();
        app.insert_resource(SimulationConfig::default());
        app.insert_resource(SimulationTime::new(22.2, 12.0));
        app.init_resource::<TransientRegistry>();
        app.init_resource::<PhaseReadout>();
        app.add_systems(Update, sync_scene_system);
        app.update();

        assert_eq!(
            app.world().resource::<PhaseReadout>().current(),
            MoonPhase::LastQuarter
        );
    }
}
