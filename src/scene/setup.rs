use std::f32::consts::TAU;

use bevy::asset::RenderAssetUsages;
use bevy::camera::{Camera, Camera3d, ClearColorConfig, PerspectiveProjection, Projection};
use bevy::prelude::*;
use bevy::render::render_resource::PrimitiveTopology;

use crate::config::SimulationConfig;
use crate::orbit::horizontal_offset;
use crate::scene::orbit_camera::OverviewOrbitCamera;
use crate::scene::sync::{CloseUpScene, OverviewScene, SunLight, ViewportScenes};
use crate::scene::{ViewCamera, ViewKind};

/// Overview radius of the Sun.
const SUN_RADIUS: f32 = 3.0;
/// Overview radius of the Earth.
const EARTH_RADIUS: f32 = 1.0;
/// Overview radius of the Moon.
const MOON_RADIUS: f32 = 0.27;
/// Radius of the Earth's orbit ring around the Sun.
const EARTH_ORBIT_RING_RADIUS: f32 = 15.0;
/// Segments per orbit ring.
const ORBIT_RING_SEGMENTS: u32 = 64;
/// Sphere sectors/stacks for regular bodies.
const SPHERE_RESOLUTION: u32 = 32;
/// Sphere sectors/stacks for the from-observer close-up.
const OBSERVER_SPHERE_RESOLUTION: u32 = 64;
/// Point-light intensity at the Sun in the overview.
const SUN_LIGHT_INTENSITY: f32 = 4_000_000.0;
/// Reach of the Sun's point light.
const SUN_LIGHT_RANGE: f32 = 100.0;
/// Directional-light illuminance in the from-Earth and from-Moon views.
const CLOSE_UP_ILLUMINANCE: f32 = 10_000.0;
/// Directional-light illuminance in the from-observer view.
const OBSERVER_ILLUMINANCE: f32 = 15_000.0;
/// Initial position of the persistent close-up lights before the first sync.
const CLOSE_UP_LIGHT_START: Vec3 = Vec3::new(-5.0, 0.0, 5.0);
/// Distance of each close-up backdrop behind its body.
const BACKDROP_DISTANCE: f32 = 50.0;
/// Edge length of each close-up backdrop quad.
const BACKDROP_SIZE: f32 = 200.0;
/// Global ambient-light color.
const AMBIENT_COLOR: Color = Color::srgb(0.25, 0.25, 0.25);
/// Global ambient-light brightness.
const AMBIENT_BRIGHTNESS: f32 = 80.0;

/// Build cameras, persistent objects and lights for all four views, then insert `ViewportScenes`.
pub fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    config: Res<SimulationConfig>,
) {
    setup_environment(&mut commands);
    for view in ViewKind::ALL {
        spawn_view_camera(&mut commands, view);
    }
    let overview = spawn_overview(&mut commands, &mut meshes, &mut materials, &config);
    let from_earth = spawn_close_up(
        &mut commands,
        &mut meshes,
        &mut materials,
        ViewKind::FromEarth,
    );
    let from_moon = spawn_close_up(
        &mut commands,
        &mut meshes,
        &mut materials,
        ViewKind::FromMoon,
    );
    let from_observer = spawn_close_up(
        &mut commands,
        &mut meshes,
        &mut materials,
        ViewKind::FromObserver,
    );
    commands.insert_resource(ViewportScenes {
        overview: Some(overview),
        from_earth: Some(from_earth),
        from_moon: Some(from_moon),
        from_observer: Some(from_observer),
    });
    info!("scene setup complete: {} views", ViewKind::ALL.len());
}

/// Insert window background and ambient-light resources.
fn setup_environment(commands: &mut Commands) {
    // Area outside every viewport.
    commands.insert_resource(ClearColor(Color::BLACK));
    // Dim ambient so the night side of each body stays barely visible.
    commands.insert_resource(bevy::light::GlobalAmbientLight {
        color: AMBIENT_COLOR,
        brightness: AMBIENT_BRIGHTNESS,
        affects_lightmapped_meshes: true,
    });
}

/// Camera placement and projection of one view.
struct CameraRig {
    position: Vec3,
    fov_degrees: f32,
    far: f32,
    /// Only the first camera clears; later views paint a backdrop instead.
    clears: bool,
}

impl CameraRig {
    /// Rig for `view`.
    fn for_view(view: ViewKind) -> Self {
        match view {
            ViewKind::Overview => Self {
                position: Vec3::new(0.0, 20.0, 30.0),
                fov_degrees: 45.0,
                far: 1000.0,
                clears: true,
            },
            ViewKind::FromEarth | ViewKind::FromMoon => Self {
                position: Vec3::new(0.0, 0.0, 5.0),
                fov_degrees: 50.0,
                far: 100.0,
                clears: false,
            },
            ViewKind::FromObserver => Self {
                position: Vec3::new(0.0, 0.0, 10.0),
                fov_degrees: 30.0,
                far: 100.0,
                clears: false,
            },
        }
    }
}

/// Spawn the camera of `view`, rendering only that view's layer.
fn spawn_view_camera(commands: &mut Commands, view: ViewKind) {
    let rig = CameraRig::for_view(view);
    let clear_color = if rig.clears {
        ClearColorConfig::Default
    } else {
        ClearColorConfig::None
    };
    let mut camera = commands.spawn((
        Camera3d::default(),
        Camera {
            order: view.index() as isize,
            clear_color,
            ..default()
        },
        Projection::from(PerspectiveProjection {
            fov: rig.fov_degrees.to_radians(),
            near: 0.1,
            far: rig.far,
            ..default()
        }),
        Transform::from_translation(rig.position).looking_at(Vec3::ZERO, Vec3::Y),
        view.render_layers(),
        ViewCamera(view),
    ));
    if view == ViewKind::Overview {
        // HUD lives in the overview; it is the only view with mouse control.
        camera.insert((
            OverviewOrbitCamera::from_translation(rig.position),
            IsDefaultUiCamera,
        ));
    }
}

/// Spawn the Sun, Earth, Moon and orbit rings of the overview.
fn spawn_overview(
    commands: &mut Commands,
    meshes: &mut ResMut<Assets<Mesh>>,
    materials: &mut ResMut<Assets<StandardMaterial>>,
    config: &SimulationConfig,
) -> OverviewScene {
    let layers = ViewKind::Overview.render_layers();

    let sun_mesh = meshes.add(Sphere::new(SUN_RADIUS).mesh().uv(SPHERE_RESOLUTION, SPHERE_RESOLUTION));
    let sun_material = materials.add(StandardMaterial {
        base_color: Color::srgb(1.0, 1.0, 0.0),
        unlit: true,
        ..default()
    });
    commands.spawn((
        bevy::mesh::Mesh3d(sun_mesh),
        bevy::pbr::MeshMaterial3d(sun_material),
        Transform::from_translation(Vec3::ZERO),
        bevy::light::NotShadowCaster,
        layers.clone(),
    ));
    commands.spawn((
        bevy::light::PointLight {
            intensity: SUN_LIGHT_INTENSITY,
            range: SUN_LIGHT_RANGE,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_translation(Vec3::ZERO),
        layers.clone(),
    ));

    let earth_mesh =
        meshes.add(Sphere::new(EARTH_RADIUS).mesh().uv(SPHERE_RESOLUTION, SPHERE_RESOLUTION));
    let earth = commands
        .spawn((
            bevy::mesh::Mesh3d(earth_mesh),
            bevy::pbr::MeshMaterial3d(materials.add(BodyLook::EARTH.material())),
            Transform::from_translation(config.earth_position),
            layers.clone(),
        ))
        .id();

    let moon_mesh =
        meshes.add(Sphere::new(MOON_RADIUS).mesh().uv(SPHERE_RESOLUTION, SPHERE_RESOLUTION));
    let moon = commands
        .spawn((
            bevy::mesh::Mesh3d(moon_mesh),
            bevy::pbr::MeshMaterial3d(materials.add(BodyLook::OVERVIEW_MOON.material())),
            Transform::from_translation(
                config.earth_position + Vec3::X * config.moon_orbit_radius,
            ),
            layers.clone(),
        ))
        .id();

    let earth_ring = meshes.add(build_ring_mesh(EARTH_ORBIT_RING_RADIUS, ORBIT_RING_SEGMENTS));
    commands.spawn((
        bevy::mesh::Mesh3d(earth_ring),
        bevy::pbr::MeshMaterial3d(materials.add(ring_material(Color::srgba(0.27, 0.27, 1.0, 0.3)))),
        Transform::from_translation(Vec3::ZERO),
        layers.clone(),
    ));

    let moon_ring = meshes.add(build_ring_mesh(config.moon_orbit_radius, ORBIT_RING_SEGMENTS));
    let moon_orbit_path = commands
        .spawn((
            bevy::mesh::Mesh3d(moon_ring),
            bevy::pbr::MeshMaterial3d(
                materials.add(ring_material(Color::srgba(0.53, 0.53, 0.53, 0.5))),
            ),
            Transform::from_translation(config.earth_position),
            layers,
        ))
        .id();

    OverviewScene {
        earth,
        moon,
        moon_orbit_path,
    }
}

/// Spawn the backdrop and light of a close-up view and build its body assets.
fn spawn_close_up(
    commands: &mut Commands,
    meshes: &mut ResMut<Assets<Mesh>>,
    materials: &mut ResMut<Assets<StandardMaterial>>,
    view: ViewKind,
) -> CloseUpScene {
    let layers = view.render_layers();
    let (look, radius, resolution, background) = match view {
        ViewKind::FromMoon => (BodyLook::EARTH, 2.0, SPHERE_RESOLUTION, Color::srgb_u8(0, 0, 0x11)),
        ViewKind::FromObserver => (
            BodyLook::OBSERVER_MOON,
            2.5,
            OBSERVER_SPHERE_RESOLUTION,
            Color::srgb_u8(0, 0, 0x33),
        ),
        ViewKind::Overview | ViewKind::FromEarth => {
            (BodyLook::CLOSE_UP_MOON, 1.5, SPHERE_RESOLUTION, Color::srgb_u8(0, 0, 0x11))
        }
    };

    let backdrop_material = materials.add(StandardMaterial {
        base_color: background,
        unlit: true,
        ..default()
    });
    commands.spawn((
        bevy::mesh::Mesh3d(meshes.add(build_quad(BACKDROP_SIZE))),
        bevy::pbr::MeshMaterial3d(backdrop_material),
        Transform::from_xyz(0.0, 0.0, -BACKDROP_DISTANCE),
        bevy::light::NotShadowCaster,
        layers.clone(),
    ));

    let sun_light = if view == ViewKind::FromObserver {
        SunLight::PerSync {
            illuminance: OBSERVER_ILLUMINANCE,
        }
    } else {
        let light = commands
            .spawn((
                bevy::light::DirectionalLight {
                    illuminance: CLOSE_UP_ILLUMINANCE,
                    shadows_enabled: false,
                    ..default()
                },
                Transform::from_translation(CLOSE_UP_LIGHT_START).looking_at(Vec3::ZERO, Vec3::Y),
                layers,
            ))
            .id();
        SunLight::Persistent(light)
    };

    CloseUpScene {
        mesh: meshes.add(Sphere::new(radius).mesh().uv(resolution, resolution)),
        material: materials.add(look.material()),
        sun_light,
    }
}

/// Surface look of a lit body.
struct BodyLook {
    base: Color,
    emissive: Color,
    roughness: f32,
}

impl BodyLook {
    const EARTH: BodyLook = BodyLook {
        base: Color::srgb(0.13, 0.2, 1.0),
        emissive: Color::srgb(0.07, 0.13, 0.27),
        roughness: 0.6,
    };
    const OVERVIEW_MOON: BodyLook = BodyLook {
        base: Color::srgb(0.67, 0.67, 0.67),
        emissive: Color::srgb(0.13, 0.13, 0.13),
        roughness: 0.9,
    };
    const CLOSE_UP_MOON: BodyLook = BodyLook {
        base: Color::srgb(0.8, 0.8, 0.8),
        emissive: Color::srgb(0.07, 0.07, 0.07),
        roughness: 0.9,
    };
    const OBSERVER_MOON: BodyLook = BodyLook {
        base: Color::srgb(0.87, 0.87, 0.87),
        emissive: Color::srgb(0.07, 0.07, 0.07),
        roughness: 0.9,
    };

    /// Standard material with this look.
    fn material(&self) -> StandardMaterial {
        StandardMaterial {
            base_color: self.base,
            emissive: self.emissive.to_linear(),
            perceptual_roughness: self.roughness,
            metallic: 0.0,
            ..default()
        }
    }
}

/// Unlit translucent material for orbit rings.
fn ring_material(color: Color) -> StandardMaterial {
    StandardMaterial {
        base_color: color,
        unlit: true,
        alpha_mode: AlphaMode::Blend,
        ..default()
    }
}

/// Closed horizontal circle of `radius` as a line strip.
fn build_ring_mesh(radius: f32, segments: u32) -> Mesh {
    let positions: Vec<[f32; 3]> = (0..=segments)
        .map(|i| horizontal_offset(i as f32 / segments as f32 * TAU, radius).to_array())
        .collect();
    let mut mesh = Mesh::new(PrimitiveTopology::LineStrip, RenderAssetUsages::default());
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh
}

/// Square quad facing `+Z`.
fn build_quad(size: f32) -> Mesh {
    let half = size * 0.5;
    let positions = vec![
        [-half, -half, 0.0],
        [half, -half, 0.0],
        [half, half, 0.0],
        [-half, half, 0.0],
    ];
    let normals = vec![[0.0, 0.0, 1.0]; 4];
    let uvs = vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];
    let indices = vec![0u32, 1, 2, 0, 2, 3];
    let mut mesh = Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default());
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
    mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, uvs);
    mesh.insert_indices(bevy::mesh::Indices::U32(indices));
    mesh
}
