use bevy::camera::visibility::RenderLayers;
use bevy::prelude::*;

mod layout;
mod orbit_camera;
mod plan;
mod setup;
mod sync;

pub use layout::viewport_layout_system;
pub use orbit_camera::overview_orbit_camera_system;
pub use setup::setup_scene;
pub use sync::{TransientRegistry, sync_scene_system};

/// One of the four independently rendered views.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ViewKind {
    /// Sun, Earth and Moon seen from above.
    Overview,
    /// The Moon as seen from the Earth.
    FromEarth,
    /// The Earth as seen from the Moon.
    FromMoon,
    /// Close-up of the visible phase as seen by an observer in Japan.
    FromObserver,
}

impl ViewKind {
    /// Views in render order.
    pub const ALL: [ViewKind; 4] = [
        ViewKind::Overview,
        ViewKind::FromEarth,
        ViewKind::FromMoon,
        ViewKind::FromObserver,
    ];

    /// Stable index used for render order, render layer and registry slot.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Render layer isolating this view's objects and lights from the others.
    pub fn render_layers(self) -> RenderLayers {
        RenderLayers::layer(self.index())
    }

    /// Short name used in logs.
    pub fn label(self) -> &'static str {
        match self {
            ViewKind::Overview => "overview",
            ViewKind::FromEarth => "from-earth",
            ViewKind::FromMoon => "from-moon",
            ViewKind::FromObserver => "from-observer",
        }
    }
}

/// Camera marker tying a camera entity to its view.
#[derive(Component, Clone, Copy, Debug)]
pub struct ViewCamera(pub ViewKind);

/// Entity recreated on every scene sync; `generation` is the registry generation it belongs to.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transient {
    /// View the entity belongs to.
    pub view: ViewKind,
    /// Registry generation at spawn time.
    pub generation: u64,
}
