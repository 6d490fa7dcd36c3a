use bevy::camera::{Camera, Viewport};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::scene::{ViewCamera, ViewKind};

/// Split of the window between the overview and the stacked close-ups.
pub(crate) struct ViewportLayout;

impl ViewportLayout {
    /// Share of the window width given to the overview.
    const OVERVIEW_WIDTH_FRACTION: f32 = 2.0 / 3.0;
    /// Number of close-up views stacked in the right column.
    const CLOSE_UP_ROWS: u32 = 3;

    /// Physical `(position, size)` of `view` in a window of `window` physical pixels.
    ///
    /// Returns `None` when the window is too small to give every view at least one pixel.
    pub(crate) fn rect(view: ViewKind, window: UVec2) -> Option<(UVec2, UVec2)> {
        let overview_width = (window.x as f32 * Self::OVERVIEW_WIDTH_FRACTION).round() as u32;
        let column_width = window.x.saturating_sub(overview_width);
        let row_height = window.y / Self::CLOSE_UP_ROWS;
        if overview_width == 0 || column_width == 0 || row_height == 0 {
            return None;
        }
        let rect = match view {
            ViewKind::Overview => (UVec2::ZERO, UVec2::new(overview_width, window.y)),
            _ => {
                let row = view.index() as u32 - 1;
                // Last row absorbs the remainder of the division.
                let height = if row + 1 == Self::CLOSE_UP_ROWS {
                    window.y - row_height * row
                } else {
                    row_height
                };
                (
                    UVec2::new(overview_width, row_height * row),
                    UVec2::new(column_width, height),
                )
            }
        };
        Some(rect)
    }
}

/// Fit every view camera's viewport to the current primary window size.
pub fn viewport_layout_system(
    windows: Query<&Window, With<PrimaryWindow>>,
    mut cameras: Query<(&ViewCamera, &mut Camera)>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let size = window.physical_size();
    for (view_camera, mut camera) in &mut cameras {
        let Some((position, extent)) = ViewportLayout::rect(view_camera.0, size) else {
            continue;
        };
        let unchanged = camera
            .viewport
            .as_ref()
            .is_some_and(|v| v.physical_position == position && v.physical_size == extent);
        if unchanged {
            continue;
        }
        camera.viewport = Some(Viewport {
            physical_position: position,
            physical_size: extent,
            ..default()
        });
    }
}
