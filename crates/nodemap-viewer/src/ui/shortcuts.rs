use bevy::prelude::{EventWriter, ResMut};
use bevy_egui::{egui, EguiContexts};
use nodemap_core::fx::{FxKey, FxMessage};
use nodemap_core::NodeKind;

use crate::app::events::RecenterRequested;
use crate::app::resources::FxHost;
use crate::graph::MapState;

fn fx_key(key: egui::Key) -> Option<FxKey> {
    match key {
        egui::Key::ArrowUp => Some(FxKey::Up),
        egui::Key::ArrowDown => Some(FxKey::Down),
        egui::Key::ArrowLeft => Some(FxKey::Left),
        egui::Key::ArrowRight => Some(FxKey::Right),
        _ => None,
    }
}

fn egui_key(key: FxKey) -> egui::Key {
    match key {
        FxKey::Up => egui::Key::ArrowUp,
        FxKey::Down => egui::Key::ArrowDown,
        FxKey::Left => egui::Key::ArrowLeft,
        FxKey::Right => egui::Key::ArrowRight,
    }
}

/// Every unmodified arrow press this frame, in order. Repeats count.
fn arrow_presses(events: &[egui::Event]) -> Vec<FxKey> {
    events
        .iter()
        .filter_map(|ev| match ev {
            egui::Event::Key {
                key,
                pressed: true,
                modifiers,
                ..
            } if modifiers.is_none() => fx_key(*key),
            _ => None,
        })
        .collect()
}

/// Applies a frame's presses to the host targets, then mirrors the final
/// values to the surface in one message. Returns the keys that changed a value.
fn apply_fx_keys(host: &mut FxHost, keys: &[FxKey]) -> Vec<FxKey> {
    let changed: Vec<FxKey> = keys
        .iter()
        .copied()
        .filter(|&key| host.targets.apply_key(key))
        .collect();
    if !changed.is_empty() {
        let msg = FxMessage::full(host.targets);
        host.link.send(&msg);
    }
    changed
}

pub fn handle_shortcuts(
    mut contexts: EguiContexts,
    mut st: ResMut<MapState>,
    mut host: ResMut<FxHost>,
    mut recenter: EventWriter<RecenterRequested>,
) {
    host.link.flush();

    let ctx = contexts.ctx_mut();
    if ctx.wants_keyboard_input() {
        return;
    }

    let presses = ctx.input(|i| arrow_presses(&i.events));
    if !presses.is_empty() {
        let changed = apply_fx_keys(&mut host, &presses);
        if !changed.is_empty() {
            tracing::trace!(targets = ?host.targets, "fx targets changed");
            // Only keys that moved a value lose their default action.
            ctx.input_mut(|i| {
                for key in &changed {
                    i.consume_key(egui::Modifiers::NONE, egui_key(*key));
                }
            });
        }
    }

    let pressed = |key: egui::Key| ctx.input(|i| i.key_pressed(key) && i.modifiers.is_none());
    if pressed(egui::Key::R) {
        recenter.send(RecenterRequested);
    }
    if pressed(egui::Key::Tab) {
        let mode = st.ui.view_mode.toggled();
        st.set_view_mode(mode);
    }
    for (key, kind) in [
        (egui::Key::Num1, NodeKind::Location),
        (egui::Key::Num2, NodeKind::Project),
        (egui::Key::Num3, NodeKind::Provider),
    ] {
        if pressed(key) {
            st.toggle_layer(kind);
        }
    }
}
