use bevy::prelude::Res;
use bevy_egui::{egui, EguiContexts};
use nodemap_core::{DataOrigin, Mode, NodeKind};

use crate::app::resources::FxHost;
use crate::graph::{LoadStatus, MapState};
use crate::ui::{HUD_EDGE_PADDING, HUD_PANEL_GAP, PANEL_W};

pub fn hud_overlay(mut contexts: EguiContexts, st: Res<MapState>, host: Res<FxHost>) {
    let ctx = contexts.ctx_mut();
    let screen = ctx.screen_rect();

    egui::Area::new(egui::Id::new("hud"))
        .order(egui::Order::Foreground)
        .fixed_pos(egui::pos2(
            screen.min.x + PANEL_W + HUD_PANEL_GAP,
            screen.min.y + HUD_EDGE_PADDING,
        ))
        .show(ctx, |ui| {
            ui.group(|ui| {
                ui.label(format!("FPS: {:.0}", st.perf.fps));
                ui.label(format!(
                    "View: {} · {}",
                    st.ui.view_mode.label(),
                    match st.perf.mode {
                        Some(Mode::Boost) => "gathering",
                        _ => "orbit",
                    }
                ));
                ui.label(format!(
                    "Visible: {} loc / {} proj / {} prov",
                    st.visible.count(NodeKind::Location),
                    st.visible.count(NodeKind::Project),
                    st.visible.count(NodeKind::Provider)
                ));
                match st.load {
                    LoadStatus::Ready {
                        origin: DataOrigin::Live,
                    } => {
                        ui.label("Data: live");
                    }
                    LoadStatus::Ready {
                        origin: DataOrigin::Mock,
                    } => {
                        ui.label("Data: offline sample");
                    }
                    LoadStatus::Loading { .. } => {}
                }
                if !host.link.is_attached() {
                    ui.label("FX surface: not ready");
                }
            });
        });

    if let LoadStatus::Loading { since } = st.load {
        egui::Area::new(egui::Id::new("loading"))
            .order(egui::Order::Foreground)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(PANEL_W * 0.5, 0.0))
            .show(ctx, |ui| {
                ui.group(|ui| {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label(format!(
                            "Loading node map… {:.1}s",
                            since.elapsed().as_secs_f32()
                        ));
                    });
                });
            });
    }
}
