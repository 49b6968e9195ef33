use bevy::prelude::*;
use std::time::Instant;

use crate::graph::MapState;

pub fn step_simulation(time: Res<Time>, mut st: ResMut<MapState>) {
    let dt = time.delta_seconds();
    st.perf.fps = 1.0 / dt.max(0.0001);
    st.step(dt, Instant::now());
}

pub fn tick_waves(mut st: ResMut<MapState>) {
    st.tick_waves(Instant::now());
}
