pub mod loader;
pub mod protocol;

pub use loader::spawn_loader;
pub use protocol::Incoming;
