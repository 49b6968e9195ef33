pub mod anchors;
pub mod builder;
pub mod city;
pub mod entity;
pub mod error;
pub mod fx;
pub mod layers;
pub mod mock;
pub mod model;
pub mod physics;
pub mod planar;
pub mod policy;
pub mod recenter;
pub mod style;
pub mod waves;
pub mod world;

pub use builder::{build, BuiltGraph};
pub use city::{normalize, City};
pub use entity::{DataOrigin, Dataset};
pub use error::{FeedError, FxMessageError};
pub use layers::{filter, LayerVisibility, VisibleGraph};
pub use model::{Link, Node, NodeId, NodeKind, ProviderKind};
pub use physics::{Integrator, Mode};
pub use policy::PhysicsConfig;
pub use world::World;

pub use glam;
