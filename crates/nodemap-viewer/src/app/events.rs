use bevy::prelude::Event;
use nodemap_core::NodeId;

#[derive(Event)]
pub struct Picked(pub NodeId);

#[derive(Event, Default)]
pub struct RecenterRequested;
