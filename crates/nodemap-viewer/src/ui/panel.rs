use bevy::prelude::{EventWriter, Res, ResMut};
use bevy_egui::{egui, EguiContexts};
use nodemap_core::NodeKind;

use crate::app::events::RecenterRequested;
use crate::app::resources::FxHost;
use crate::graph::{MapState, ViewMode};
use crate::ui::PANEL_W;
use crate::util::config;

pub fn ui_panel(
    mut contexts: EguiContexts,
    mut st: ResMut<MapState>,
    host: Res<FxHost>,
    mut recenter: EventWriter<RecenterRequested>,
) {
    egui::SidePanel::left("left")
        .exact_width(PANEL_W)
        .show(contexts.ctx_mut(), |ui| {
            ui.heading("Node map");
            ui.label(format!(
                "nodes: {} / {}",
                st.visible.nodes.len(),
                st.world.nodes.len()
            ));
            ui.label(format!(
                "links: {} / {}",
                st.visible.links.len(),
                st.world.links.len()
            ));
            ui.separator();

            let mut mode = st.ui.view_mode;
            ui.horizontal(|ui| {
                ui.label("View:");
                ui.selectable_value(&mut mode, ViewMode::ThreeD, "3D");
                ui.selectable_value(&mut mode, ViewMode::TwoD, "2D");
            });
            st.set_view_mode(mode);

            ui.add_space(6.0);
            ui.label("Layers:");
            for (n, kind) in NodeKind::LAYERS.into_iter().enumerate() {
                let mut on = st.ui.layers.shows(kind);
                let text = format!("{} ({})  [{}]", kind.name(), st.visible.count(kind), n + 1);
                if ui.checkbox(&mut on, text).changed() {
                    st.toggle_layer(kind);
                }
            }
            ui.checkbox(&mut st.ui.show_links, "Links");

            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui.button("Recenter (R)").clicked() {
                    recenter.send(RecenterRequested);
                }
                if ui
                    .add_enabled(!st.is_loading(), egui::Button::new("Reload data"))
                    .clicked()
                {
                    st.ui.reload_requested = true;
                }
            });

            ui.add_space(8.0);
            ui.separator();
            if let Some(id) = st.ui.selected.clone() {
                ui.heading("Selected");
                for line in st.node_tooltip_lines(&id) {
                    ui.label(line);
                }
                if ui.button("Clear selection").clicked() {
                    st.ui.selected = None;
                }
            } else {
                ui.label("Selected: (none) · click a node");
            }

            ui.add_space(8.0);
            ui.separator();
            egui::CollapsingHeader::new("Physics").show(ui, |ui| {
                let mut phys = st.world.physics;
                let mut changed = false;
                changed |= ui
                    .add(egui::Slider::new(&mut phys.attraction, 0.01..=0.5).text("attraction"))
                    .changed();
                changed |= ui
                    .add(egui::Slider::new(&mut phys.damping, 0.5..=0.99).text("damping"))
                    .changed();
                changed |= ui
                    .add(egui::Slider::new(&mut phys.boost_attraction, 0.01..=0.8).text("boost attraction"))
                    .changed();
                changed |= ui
                    .add(egui::Slider::new(&mut phys.boost_damping, 0.5..=0.99).text("boost damping"))
                    .changed();
                changed |= ui
                    .add(egui::Slider::new(&mut phys.max_velocity, 0.5..=10.0).text("max velocity"))
                    .changed();
                changed |= ui
                    .add(egui::Slider::new(&mut phys.boost_duration_ms, 250..=6000).text("boost ms"))
                    .changed();
                if changed {
                    st.world.physics = phys.sanitized();
                }
                ui.label("Link sampling applies on the next reload.");
                let mut cross = phys.cross_city_probability;
                if ui
                    .add(egui::Slider::new(&mut cross, 0.0..=1.0).text("cross-city share"))
                    .changed()
                {
                    st.world.physics.cross_city_probability = cross;
                }
            });

            ui.add_space(8.0);
            ui.separator();
            ui.heading("Visual FX");
            ui.label(format!(
                "speed {:.2} · distortion {:+.1}",
                host.targets.speed, host.targets.distortion
            ));
            ui.label("↑/↓ speed, ←/→ distortion");

            ui.add_space(10.0);
            ui.separator();
            if ui.button("Save settings").clicked() {
                let line = match config::save(&st.to_config()) {
                    Ok(path) => {
                        tracing::info!(path = %path.display(), "viewer settings saved");
                        format!("saved to {}", path.display())
                    }
                    Err(e) => {
                        tracing::warn!(error = %format!("{e:#}"), "saving viewer settings failed");
                        format!("save failed: {e}")
                    }
                };
                st.ui.status_line = Some(line);
            }
            if let Some(line) = &st.ui.status_line {
                ui.small(line.as_str());
            }
        });
}
