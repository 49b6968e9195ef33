pub mod sim;
pub mod state;

pub use sim::{step_simulation, tick_waves};
pub use state::{LoadStatus, MapState, ViewMode};
