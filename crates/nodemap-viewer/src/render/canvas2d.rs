use bevy::prelude::EventWriter;
use bevy_egui::egui;
use nodemap_core::fx::FxSurface;
use nodemap_core::glam::Vec2;
use nodemap_core::planar::{hit_test, node_canvas_pos, CanvasTransform};
use nodemap_core::policy::planar;
use nodemap_core::style::{link_style, node_style};
use std::time::Instant;

use crate::app::events::Picked;
use crate::graph::MapState;
use crate::render::egui_color;

/// Wave ring growth in world units over its lifetime.
const WAVE_REACH: f32 = 60.0;

fn pos2(v: Vec2) -> egui::Pos2 {
    egui::pos2(v.x, v.y)
}

/// Flat projection of the same world. The canvas fills whatever space the
/// side panel leaves, so resizing simply changes the transform next frame.
pub fn draw_2d(
    ctx: &egui::Context,
    st: &mut MapState,
    surface: Option<&FxSurface>,
    picked: &mut EventWriter<Picked>,
) {
    let now = Instant::now();
    egui::CentralPanel::default()
        .frame(egui::Frame::none())
        .show(ctx, |ui| {
            let (rect, response) = ui.allocate_exact_size(ui.available_size(), egui::Sense::click());
            let painter = ui.painter_at(rect);
            crate::fx::paint_backdrop(&painter, rect, surface);

            let t = CanvasTransform::for_canvas(
                Vec2::new(rect.min.x, rect.min.y),
                Vec2::new(rect.width(), rect.height()),
            );

            if st.ui.show_links {
                for &(li, a, b) in &st.visible.links {
                    let style = link_style(st.world.link_touches_anchor(&st.world.links[li]));
                    if style.is_hidden() {
                        continue;
                    }
                    painter.line_segment(
                        [
                            pos2(node_canvas_pos(&st.world, &t, a)),
                            pos2(node_canvas_pos(&st.world, &t, b)),
                        ],
                        egui::Stroke::new(style.width, egui_color(style.color)),
                    );
                }
            }

            for wave in st.waves.iter() {
                let p = wave.progress(now);
                if p >= 1.0 {
                    continue;
                }
                let mut color = wave.color;
                color[3] *= 1.0 - p;
                for anchor in st.world.anchor_positions() {
                    painter.circle_stroke(
                        pos2(t.to_canvas(planar(anchor))),
                        (4.0 + p * WAVE_REACH) * t.scale,
                        egui::Stroke::new(2.0, egui_color(color)),
                    );
                }
            }

            for &i in &st.visible.nodes {
                let node = &st.world.nodes[i];
                let style = node_style(node.kind, node.sub_kind);
                let center = pos2(node_canvas_pos(&st.world, &t, i));
                let radius = t.radius_px(node.visual_weight).max(1.5);
                painter.circle_filled(center, radius, egui_color(style.color));
                if node.is_anchor() {
                    painter.circle_stroke(center, radius + 3.0, egui::Stroke::new(1.5, egui::Color32::WHITE));
                    painter.text(
                        center - egui::vec2(0.0, radius + 6.0),
                        egui::Align2::CENTER_BOTTOM,
                        node.city.display_name(),
                        egui::FontId::proportional(13.0),
                        egui::Color32::WHITE,
                    );
                }
            }

            let hit = response
                .hover_pos()
                .and_then(|p| hit_test(&st.world, &st.visible, &t, Vec2::new(p.x, p.y)));
            if let Some(i) = hit {
                let node = &st.world.nodes[i];
                painter.circle_stroke(
                    pos2(node_canvas_pos(&st.world, &t, i)),
                    t.radius_px(node.visual_weight) + 4.0,
                    egui::Stroke::new(1.5, egui::Color32::WHITE),
                );
            }
            let hit_id = hit.map(|i| st.world.nodes[i].id.clone());
            if response.clicked() {
                if let Some(id) = &hit_id {
                    picked.send(Picked(id.clone()));
                }
            }
            st.ui.hovered = hit_id;
        });
}
