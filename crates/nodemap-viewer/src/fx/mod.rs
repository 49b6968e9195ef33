//! Background surface driven by the visual-FX channel. The surface only sees
//! what arrives over its channel; nothing in the host reads its smoothed
//! values back.

use bevy::prelude::*;
use bevy_egui::egui;
use nodemap_core::fx::{self, FxMessage, FxSurface, FxValues};

use crate::app::resources::{FxHost, FxSurfaceSlot};

const BANDS: usize = 24;

pub fn start_surface(mut host: ResMut<FxHost>, mut slot: ResMut<FxSurfaceSlot>) {
    let (tx, surface) = fx::surface();
    host.link.attach(tx);
    slot.0 = Some(surface);
    let targets = host.targets;
    host.link.send(&FxMessage::full(targets));
    tracing::debug!("fx surface attached");
}

/// One animation frame of the surface. Also tints the 3D clear color so the
/// backdrop shows behind the scene in both views.
pub fn render_surface(time: Res<Time>, mut slot: ResMut<FxSurfaceSlot>, mut clear: ResMut<ClearColor>) {
    let Some(surface) = slot.0.as_mut() else {
        return;
    };
    surface.frame(time.delta_seconds());
    let [r, g, b] = backdrop_rgb(surface.current(), surface.phase(), 0.5);
    clear.0 = Color::srgb(r, g, b);
}

/// Backdrop color at normalized height `y`. Speed moves the bands through
/// `phase`; distortion bends them.
fn backdrop_rgb(values: FxValues, phase: f32, y: f32) -> [f32; 3] {
    let bend = values.distortion * 0.3 * (y * 7.0 + phase).sin();
    let w = ((phase * 0.6 + y * 4.0 + bend).sin() * 0.5 + 0.5).clamp(0.0, 1.0);
    [0.02 + 0.06 * w, 0.03 + 0.04 * (1.0 - w), 0.08 + 0.10 * w]
}

pub fn paint_backdrop(painter: &egui::Painter, rect: egui::Rect, surface: Option<&FxSurface>) {
    let Some(surface) = surface else {
        painter.rect_filled(rect, 0.0, egui::Color32::from_rgb(8, 10, 22));
        return;
    };
    let (values, phase) = (surface.current(), surface.phase());
    let band_h = rect.height() / BANDS as f32;
    for i in 0..BANDS {
        let y = (i as f32 + 0.5) / BANDS as f32;
        let [r, g, b] = backdrop_rgb(values, phase, y);
        let band = egui::Rect::from_min_size(
            egui::pos2(rect.min.x, rect.min.y + i as f32 * band_h),
            egui::vec2(rect.width(), band_h + 1.0),
        );
        let to_u8 = |v: f32| (v * 255.0).round() as u8;
        painter.rect_filled(band, 0.0, egui::Color32::from_rgb(to_u8(r), to_u8(g), to_u8(b)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backdrop_stays_dark_and_in_range() {
        for d in [-5.0, -1.0, 0.0, 2.5, 5.0] {
            for step in 0..200 {
                let phase = step as f32 * 0.37;
                for y in [0.0, 0.25, 0.5, 1.0] {
                    let rgb = backdrop_rgb(FxValues { speed: 1.0, distortion: d }, phase, y);
                    assert!(rgb.iter().all(|c| (0.0..=0.2).contains(c)), "{rgb:?}");
                }
            }
        }
    }

    #[test]
    fn started_surface_receives_host_targets() {
        let mut app = App::new();
        app.init_resource::<FxHost>().init_resource::<FxSurfaceSlot>();
        app.world_mut().resource_mut::<FxHost>().targets.speed = 2.5;
        app.add_systems(Update, start_surface);
        app.update();

        assert!(app.world().resource::<FxHost>().link.is_attached());
        let mut slot = app.world_mut().resource_mut::<FxSurfaceSlot>();
        let surface = slot.0.as_mut().expect("surface started");
        surface.drain();
        assert_eq!(surface.target().speed, 2.5);
    }
}
