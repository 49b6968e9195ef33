use bevy::prelude::*;
use bevy_egui::EguiContexts;
use nodemap_core::style::{link_style, node_style};
use nodemap_core::{NodeKind, NodeId, ProviderKind};
use std::collections::HashMap;
use std::sync::atomic::Ordering;
use std::time::Instant;

use crate::app::events::Picked;
use crate::graph::{MapState, ViewMode};
use crate::render::camera::MainCamera;
use crate::render::bevy_color;

const PICK_RADIUS_PX: f32 = 18.0;
const WAVE_BASE_RADIUS: f32 = 4.0;
const WAVE_REACH: f32 = 60.0;

#[derive(Component)]
pub struct NodeMarker {
    pub index: usize,
}

pub fn despawn_nodes(commands: &mut Commands, nodes: &Query<(Entity, &NodeMarker, &mut Transform)>) {
    for (e, _, _) in nodes.iter() {
        commands.entity(e).despawn_recursive();
    }
}

pub fn draw_3d(
    commands: &mut Commands,
    st: &MapState,
    meshes: &mut Assets<Mesh>,
    mats: &mut Assets<StandardMaterial>,
    nodes: &mut Query<(Entity, &NodeMarker, &mut Transform)>,
    gizmos: &mut Gizmos,
) {
    if st.needs_redraw.swap(false, Ordering::Relaxed) {
        despawn_nodes(commands, nodes);

        let sphere = meshes.add(Sphere::new(1.0));
        let mut materials: HashMap<(NodeKind, Option<ProviderKind>), Handle<StandardMaterial>> =
            HashMap::new();
        for &i in &st.visible.nodes {
            let node = &st.world.nodes[i];
            let material = materials
                .entry((node.kind, node.sub_kind))
                .or_insert_with(|| {
                    let color = bevy_color(node_style(node.kind, node.sub_kind).color);
                    mats.add(StandardMaterial {
                        base_color: color,
                        emissive: if node.is_anchor() {
                            color.into()
                        } else {
                            LinearRgba::BLACK
                        },
                        perceptual_roughness: 0.6,
                        ..default()
                    })
                })
                .clone();
            commands.spawn((
                PbrBundle {
                    mesh: sphere.clone(),
                    material,
                    transform: Transform::from_translation(node.position)
                        .with_scale(Vec3::splat(node.visual_weight)),
                    ..default()
                },
                NodeMarker { index: i },
            ));
        }
    } else {
        for (_, marker, mut tf) in nodes.iter_mut() {
            if let Some(node) = st.world.nodes.get(marker.index) {
                tf.translation = node.position;
            }
        }
    }

    if st.ui.show_links {
        for &(li, a, b) in &st.visible.links {
            let style = link_style(st.world.link_touches_anchor(&st.world.links[li]));
            if style.is_hidden() {
                continue;
            }
            gizmos.line(
                st.world.nodes[a].position,
                st.world.nodes[b].position,
                bevy_color(style.color),
            );
        }
    }

    let now = Instant::now();
    for wave in st.waves.iter() {
        let p = wave.progress(now);
        if p >= 1.0 {
            continue;
        }
        let mut color = wave.color;
        color[3] *= 1.0 - p;
        for anchor in st.world.anchor_positions() {
            gizmos.circle(
                anchor,
                Dir3::Y,
                WAVE_BASE_RADIUS + p * WAVE_REACH,
                bevy_color(color),
            );
        }
    }

    for id in [&st.ui.hovered, &st.ui.selected].into_iter().flatten() {
        if let Some(node) = st.world.node(id) {
            gizmos.sphere(
                node.position,
                Quat::IDENTITY,
                node.visual_weight * 1.6,
                Color::WHITE,
            );
        }
    }
}

/// Screen-space hover and click picking for the 3D view.
pub fn hover_and_pick(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window>,
    cam_q: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    mut contexts: EguiContexts,
    mut st: ResMut<MapState>,
    mut out: EventWriter<Picked>,
) {
    if st.ui.view_mode != ViewMode::ThreeD {
        return;
    }
    if contexts.ctx_mut().wants_pointer_input() {
        st.ui.hovered = None;
        return;
    }
    let Ok(window) = windows.get_single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        st.ui.hovered = None;
        return;
    };
    let Ok((camera, cam_tf)) = cam_q.get_single() else {
        return;
    };

    let mut best: Option<(f32, usize)> = None;
    for &i in &st.visible.nodes {
        let Some(screen) = camera.world_to_viewport(cam_tf, st.world.nodes[i].position) else {
            continue;
        };
        let d = screen.distance(cursor);
        if d < PICK_RADIUS_PX && best.map(|(bd, _)| d < bd).unwrap_or(true) {
            best = Some((d, i));
        }
    }

    let hit: Option<NodeId> = best.map(|(_, i)| st.world.nodes[i].id.clone());
    if buttons.just_pressed(MouseButton::Left) {
        if let Some(id) = &hit {
            out.send(Picked(id.clone()));
        }
    }
    st.ui.hovered = hit;
}

pub fn apply_picked(mut st: ResMut<MapState>, mut ev: EventReader<Picked>) {
    for Picked(id) in ev.read() {
        tracing::debug!(node = %id.0, "node selected");
        st.ui.selected = Some(id.clone());
    }
}
