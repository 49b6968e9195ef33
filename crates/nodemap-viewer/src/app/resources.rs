use bevy::prelude::Resource;
use crossbeam_channel::{Receiver, Sender};
use nodemap_core::fx::{FxLink, FxSurface, FxValues};

use crate::feed::Incoming;

/// Both ends of the loader channel; the sender is cloned into every reload.
#[derive(Resource)]
pub struct FeedChannel {
    pub tx: Sender<Incoming>,
    pub rx: Receiver<Incoming>,
}

/// Host side of the visual-FX channel: the authoritative targets and the link
/// that mirrors them to the surface.
#[derive(Resource, Default)]
pub struct FxHost {
    pub targets: FxValues,
    pub link: FxLink,
}

/// The isolated background surface. `None` until started and after teardown.
#[derive(Resource, Default)]
pub struct FxSurfaceSlot(pub Option<FxSurface>);
