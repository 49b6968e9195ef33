use bevy::app::AppExit;
use bevy::prelude::*;
use std::time::Instant;

use crate::app::events::{Picked, RecenterRequested};
use crate::app::resources::{FeedChannel, FxHost, FxSurfaceSlot};
use crate::feed;
use crate::graph::{LoadStatus, MapState};
use crate::util::config::ViewerConfig;

pub mod events;
pub mod resources;

pub struct NodeMapViewerPlugin {
    pub config: ViewerConfig,
}

impl Plugin for NodeMapViewerPlugin {
    fn build(&self, app: &mut App) {
        let st = MapState::new(&self.config, Instant::now());
        app.add_event::<Picked>()
            .add_event::<RecenterRequested>()
            .insert_resource(st)
            .init_resource::<FxHost>()
            .init_resource::<FxSurfaceSlot>()
            .add_systems(Startup, crate::render::setup_scene)
            .add_systems(PostStartup, crate::fx::start_surface)
            .add_systems(
                Update,
                (
                    pump_feed,
                    crate::fx::render_surface,
                    crate::ui::handle_shortcuts,
                    crate::ui::ui_panel,
                    crate::ui::hud_overlay,
                    crate::graph::step_simulation,
                    crate::graph::tick_waves,
                    crate::render::orbit_controls,
                    crate::render::apply_recenter,
                    crate::render::animate_camera,
                    crate::render::hover_and_pick,
                    crate::render::apply_picked,
                    crate::render::draw_scene,
                    crate::ui::node_tooltip,
                )
                    .chain(),
            )
            .add_systems(Last, teardown_on_exit);
    }
}

fn pump_feed(mut st: ResMut<MapState>, feed: Res<FeedChannel>) {
    if st.ui.reload_requested {
        st.ui.reload_requested = false;
        if !st.is_loading() {
            st.load = LoadStatus::Loading {
                since: Instant::now(),
            };
            feed::spawn_loader(st.cfg.data.clone(), feed.tx.clone());
        }
    }
    for msg in feed.rx.try_iter() {
        st.apply(msg);
    }
}

fn teardown_on_exit(
    mut exit: EventReader<AppExit>,
    mut st: ResMut<MapState>,
    mut host: ResMut<FxHost>,
    mut slot: ResMut<FxSurfaceSlot>,
) {
    if exit.read().next().is_none() {
        return;
    }
    host.link.detach();
    slot.0 = None;
    st.waves.clear();
    st.camera.tween = None;
    tracing::info!("viewer shutting down");
}
