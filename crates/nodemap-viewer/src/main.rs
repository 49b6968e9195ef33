mod app;
mod feed;
mod fx;
mod graph;
mod render;
mod ui;
mod util;

use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy_egui::EguiPlugin;
use tracing_subscriber::EnvFilter;

use crate::app::resources::FeedChannel;
use crate::app::NodeMapViewerPlugin;
use crate::util::config;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,wgpu=warn,naga=warn,bevy_render=warn"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

fn main() {
    init_tracing();

    let cfg = config::load_or_default();
    tracing::info!(view = ?cfg.view_mode, locations = %cfg.data.locations, "starting nodemap viewer");

    let (tx, rx) = crossbeam_channel::unbounded();
    feed::spawn_loader(cfg.data.clone(), tx.clone());

    App::new()
        .add_plugins(
            DefaultPlugins
                .build()
                .disable::<LogPlugin>()
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "nodemap".into(),
                        ..default()
                    }),
                    ..default()
                }),
        )
        .add_plugins(EguiPlugin)
        .insert_resource(FeedChannel { tx, rx })
        .add_plugins(NodeMapViewerPlugin { config: cfg })
        .run();
}
