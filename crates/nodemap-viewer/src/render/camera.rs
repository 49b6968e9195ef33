use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use bevy_egui::EguiContexts;
use std::time::Instant;

use crate::app::events::RecenterRequested;
use crate::graph::{MapState, ViewMode};

const ORBIT_SENSITIVITY: f32 = 0.005;
const MIN_DISTANCE: f32 = 20.0;
const MAX_DISTANCE: f32 = 600.0;

#[derive(Component)]
pub struct MainCamera;

pub fn setup_scene(mut commands: Commands, st: Res<MapState>) {
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 400.0,
    });

    commands.spawn(PointLightBundle {
        point_light: PointLight {
            intensity: 4_000_000.0,
            range: 400.0,
            ..default()
        },
        transform: Transform::from_xyz(0.0, 120.0, 80.0),
        ..default()
    });

    let pose = st.camera.pose;
    commands.spawn((
        Camera3dBundle {
            transform: Transform::from_translation(pose.eye).looking_at(pose.look_at, Vec3::Y),
            ..default()
        },
        MainCamera,
    ));
}

/// Right-drag orbits around the look-at point, the wheel zooms. Any manual
/// move cancels a running recenter tween.
pub fn orbit_controls(
    buttons: Res<ButtonInput<MouseButton>>,
    mut motion: EventReader<MouseMotion>,
    mut wheel: EventReader<MouseWheel>,
    mut contexts: EguiContexts,
    mut st: ResMut<MapState>,
) {
    if st.ui.view_mode != ViewMode::ThreeD || contexts.ctx_mut().wants_pointer_input() {
        motion.clear();
        wheel.clear();
        return;
    }

    let mut drag = Vec2::ZERO;
    if buttons.pressed(MouseButton::Right) {
        for ev in motion.read() {
            drag += ev.delta;
        }
    } else {
        motion.clear();
    }
    let scroll: f32 = wheel
        .read()
        .map(|ev| match ev.unit {
            MouseScrollUnit::Line => ev.y,
            MouseScrollUnit::Pixel => ev.y * 0.01,
        })
        .sum();
    if drag == Vec2::ZERO && scroll == 0.0 {
        return;
    }

    st.camera.tween = None;
    let pose = st.camera.pose;
    let offset = pose.eye - pose.look_at;
    let radius = offset.length().max(1.0);
    let yaw = offset.x.atan2(offset.z) - drag.x * ORBIT_SENSITIVITY;
    let pitch = ((offset.y / radius).asin() + drag.y * ORBIT_SENSITIVITY).clamp(-1.4, 1.4);
    let radius = (radius * (1.0 - scroll * 0.1)).clamp(MIN_DISTANCE, MAX_DISTANCE);

    st.camera.pose.eye = pose.look_at
        + Vec3::new(
            radius * pitch.cos() * yaw.sin(),
            radius * pitch.sin(),
            radius * pitch.cos() * yaw.cos(),
        );
}

pub fn apply_recenter(mut st: ResMut<MapState>, mut ev: EventReader<RecenterRequested>) {
    if ev.read().count() > 0 {
        st.recenter(Instant::now());
    }
}

pub fn animate_camera(mut st: ResMut<MapState>, mut cam_q: Query<&mut Transform, With<MainCamera>>) {
    let pose = st.camera_pose(Instant::now());
    let Ok(mut cam_tf) = cam_q.get_single_mut() else {
        return;
    };
    *cam_tf = Transform::from_translation(pose.eye).looking_at(pose.look_at, Vec3::Y);
}
