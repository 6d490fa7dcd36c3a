use bevy::camera::Camera;
use bevy::input::mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll, MouseScrollUnit};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

/// Drag-to-orbit and wheel-to-zoom state of the overview camera.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct OverviewOrbitCamera {
    /// Angle around the vertical axis, measured from +X toward +Z.
    pub azimuth: f32,
    /// Camera height above the orbital plane.
    pub height: f32,
    /// Horizontal distance from the origin.
    pub distance: f32,
}

impl OverviewOrbitCamera {
    /// Azimuth change per pixel of horizontal drag.
    const ROTATE_PER_PIXEL: f32 = 0.01;
    /// Height change per pixel of vertical drag.
    const HEIGHT_PER_PIXEL: f32 = 0.1;
    /// Distance change per pixel of wheel scroll.
    const ZOOM_PER_PIXEL: f32 = 0.01;
    /// Pixels counted per wheel line.
    const PIXELS_PER_LINE: f32 = 100.0;
    const HEIGHT_MIN: f32 = 5.0;
    const HEIGHT_MAX: f32 = 40.0;
    const DISTANCE_MIN: f32 = 10.0;
    const DISTANCE_MAX: f32 = 50.0;

    /// Recover orbit parameters from a camera translation.
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            azimuth: translation.z.atan2(translation.x),
            height: translation.y,
            distance: Vec2::new(translation.x, translation.z).length(),
        }
    }

    /// Apply a mouse drag in pixels.
    pub fn apply_drag(&mut self, delta: Vec2) {
        self.azimuth -= delta.x * Self::ROTATE_PER_PIXEL;
        self.height =
            (self.height - delta.y * Self::HEIGHT_PER_PIXEL).clamp(Self::HEIGHT_MIN, Self::HEIGHT_MAX);
    }

    /// Apply a scroll amount in pixels; positive moves away from the origin.
    pub fn apply_zoom(&mut self, pixels: f32) {
        self.distance = (self.distance + pixels * Self::ZOOM_PER_PIXEL)
            .clamp(Self::DISTANCE_MIN, Self::DISTANCE_MAX);
    }

    /// Camera transform looking at the origin.
    pub fn transform(&self) -> Transform {
        let translation = Vec3::new(
            self.azimuth.cos() * self.distance,
            self.height,
            self.azimuth.sin() * self.distance,
        );
        Transform::from_translation(translation).looking_at(Vec3::ZERO, Vec3::Y)
    }

    /// Convert accumulated wheel input to pixels, scroll-down positive.
    fn scroll_pixels(scroll: &AccumulatedMouseScroll) -> f32 {
        let amount = -scroll.delta.y;
        match scroll.unit {
            MouseScrollUnit::Line => amount * Self::PIXELS_PER_LINE,
            MouseScrollUnit::Pixel => amount,
        }
    }
}

/// Orbit and zoom the overview camera while the cursor is over the overview viewport.
pub fn overview_orbit_camera_system(
    buttons: Res<ButtonInput<MouseButton>>,
    motion: Res<AccumulatedMouseMotion>,
    scroll: Res<AccumulatedMouseScroll>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut query: Query<(&Camera, &mut Transform, &mut OverviewOrbitCamera)>,
) {
    let dragging = buttons.pressed(MouseButton::Left) && motion.delta != Vec2::ZERO;
    let zoom = OverviewOrbitCamera::scroll_pixels(&scroll);
    if !dragging && zoom == 0.0 {
        return;
    }
    let Ok(window) = windows.single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };
    for (camera, mut transform, mut orbit) in &mut query {
        let Some(rect) = camera.logical_viewport_rect() else {
            continue;
        };
        if !rect.contains(cursor) {
            continue;
        }
        if dragging {
            orbit.apply_drag(motion.delta);
        }
        if zoom != 0.0 {
            orbit.apply_zoom(zoom);
        }
        *transform = orbit.transform();
    }
}
