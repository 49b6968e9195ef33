pub mod camera;
pub mod canvas2d;
pub mod scene3d;

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};
use nodemap_core::style::Rgba;
use std::sync::atomic::Ordering;

use crate::app::events::Picked;
use crate::app::resources::FxSurfaceSlot;
use crate::graph::{MapState, ViewMode};

pub use camera::{animate_camera, apply_recenter, orbit_controls, setup_scene};
pub use scene3d::{apply_picked, hover_and_pick};

pub fn bevy_color(c: Rgba) -> Color {
    Color::srgba(c[0], c[1], c[2], c[3])
}

pub fn egui_color(c: Rgba) -> egui::Color32 {
    let to_u8 = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    egui::Color32::from_rgba_unmultiplied(to_u8(c[0]), to_u8(c[1]), to_u8(c[2]), to_u8(c[3]))
}

#[allow(clippy::too_many_arguments)]
pub fn draw_scene(
    mut commands: Commands,
    mut st: ResMut<MapState>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut mats: ResMut<Assets<StandardMaterial>>,
    mut nodes: Query<(Entity, &scene3d::NodeMarker, &mut Transform)>,
    mut gizmos: Gizmos,
    mut contexts: EguiContexts,
    surface: Res<FxSurfaceSlot>,
    mut picked: EventWriter<Picked>,
) {
    match st.ui.view_mode {
        ViewMode::ThreeD => {
            scene3d::draw_3d(&mut commands, &st, &mut meshes, &mut mats, &mut nodes, &mut gizmos)
        }
        ViewMode::TwoD => {
            if st.needs_redraw.swap(false, Ordering::Relaxed) {
                scene3d::despawn_nodes(&mut commands, &nodes);
            }
            canvas2d::draw_2d(contexts.ctx_mut(), &mut st, surface.0.as_ref(), &mut picked);
        }
    }
}
