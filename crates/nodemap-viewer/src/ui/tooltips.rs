use bevy::prelude::Res;
use bevy_egui::{egui, EguiContexts};

use crate::graph::MapState;

pub fn render_tooltip(
    ctx: &egui::Context,
    id: &str,
    pos: egui::Pos2,
    lines: impl IntoIterator<Item = String>,
) {
    egui::Area::new(egui::Id::new(id))
        .order(egui::Order::Tooltip)
        .interactable(false)
        .fixed_pos(pos)
        .show(ctx, |ui| {
            ui.group(|ui| {
                for line in lines {
                    ui.label(line);
                }
            });
        });
}

pub fn node_tooltip(mut contexts: EguiContexts, st: Res<MapState>) {
    let Some(id) = &st.ui.hovered else {
        return;
    };
    let ctx = contexts.ctx_mut();
    let Some(pos) = ctx.pointer_hover_pos() else {
        return;
    };
    render_tooltip(ctx, "node_tooltip", pos + egui::vec2(14.0, 14.0), st.node_tooltip_lines(id));
}
