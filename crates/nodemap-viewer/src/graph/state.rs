use bevy::prelude::Resource;
use nodemap_core::layers::{filter, LayerVisibility, VisibleGraph};
use nodemap_core::physics::{Integrator, Mode};
use nodemap_core::recenter::{reset_camera, CameraPose, CameraTween, OVERVIEW_POSE};
use nodemap_core::waves::{PruneTicker, WaveQueue};
use nodemap_core::{mock, BuiltGraph, DataOrigin, NodeId, NodeKind, World};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use crate::feed::protocol::{Incoming, IncomingKind};
use crate::util::config::{ViewerConfig, ViewerViewMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    ThreeD,
    TwoD,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::ThreeD => ViewMode::TwoD,
            ViewMode::TwoD => ViewMode::ThreeD,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ViewMode::ThreeD => "3D",
            ViewMode::TwoD => "2D",
        }
    }
}

impl From<ViewerViewMode> for ViewMode {
    fn from(v: ViewerViewMode) -> Self {
        match v {
            ViewerViewMode::ThreeD => ViewMode::ThreeD,
            ViewerViewMode::TwoD => ViewMode::TwoD,
        }
    }
}

impl From<ViewMode> for ViewerViewMode {
    fn from(v: ViewMode) -> Self {
        match v {
            ViewMode::ThreeD => ViewerViewMode::ThreeD,
            ViewMode::TwoD => ViewerViewMode::TwoD,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    Loading { since: Instant },
    Ready { origin: DataOrigin },
}

#[derive(Default)]
pub struct UiState {
    pub view_mode: ViewMode,
    pub show_links: bool,
    pub layers: LayerVisibility,
    pub hovered: Option<NodeId>,
    pub selected: Option<NodeId>,
    pub reload_requested: bool,
    pub status_line: Option<String>,
}

pub struct CameraState {
    pub pose: CameraPose,
    pub tween: Option<CameraTween>,
}

impl Default for CameraState {
    fn default() -> Self {
        Self {
            pose: OVERVIEW_POSE,
            tween: None,
        }
    }
}

#[derive(Default)]
pub struct PerfState {
    pub fps: f32,
    pub ticks_last_frame: u32,
    pub mode: Option<Mode>,
}

#[derive(Resource)]
pub struct MapState {
    pub world: World,
    pub integrator: Integrator,
    pub visible: VisibleGraph,
    pub waves: WaveQueue,
    pub prune: PruneTicker,
    pub camera: CameraState,
    pub ui: UiState,
    pub load: LoadStatus,
    pub perf: PerfState,
    pub cfg: ViewerConfig,
    pub needs_redraw: AtomicBool,
}

impl MapState {
    pub fn new(cfg: &ViewerConfig, now: Instant) -> Self {
        let world = World::new(cfg.physics);
        let ui = UiState {
            view_mode: cfg.view_mode.into(),
            show_links: cfg.show_links,
            layers: cfg.layers,
            ..Default::default()
        };
        let visible = filter(&world, ui.layers);
        Self {
            world,
            integrator: Integrator::default(),
            visible,
            waves: WaveQueue::default(),
            prune: PruneTicker::new(now),
            camera: CameraState::default(),
            ui,
            load: LoadStatus::Loading { since: now },
            perf: PerfState::default(),
            cfg: cfg.clone(),
            needs_redraw: AtomicBool::new(true),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.load, LoadStatus::Loading { .. })
    }

    pub fn apply(&mut self, msg: Incoming) {
        match msg.kind {
            IncomingKind::Loaded { dataset, elapsed } => {
                tracing::info!(
                    source = %msg.source,
                    entities = dataset.entity_count(),
                    elapsed_ms = elapsed.as_millis() as u64,
                    "data loaded"
                );
                let mut rng = StdRng::seed_from_u64(self.cfg.data.mock_seed);
                let graph = nodemap_core::build(&dataset, &self.world.physics, &mut rng);
                self.load_graph(graph, DataOrigin::Live);
            }
            IncomingKind::Unavailable(reason) => {
                tracing::warn!(source = %msg.source, %reason, "data source unavailable, using mock data");
                let graph = mock::graph(&self.world.physics, self.cfg.data.mock_seed);
                self.load_graph(graph, DataOrigin::Mock);
            }
        }
    }

    pub fn load_graph(&mut self, graph: BuiltGraph, origin: DataOrigin) {
        self.world.load(graph);
        self.load = LoadStatus::Ready { origin };
        self.ui.hovered = None;
        if self.ui.selected.as_ref().is_some_and(|id| !self.world.contains(id)) {
            self.ui.selected = None;
        }
        self.refilter();
        tracing::info!(
            nodes = self.world.nodes.len(),
            links = self.world.links.len(),
            ?origin,
            "graph rebuilt"
        );
    }

    /// Recomputes the visible subset and schedules a scene rebuild.
    pub fn refilter(&mut self) {
        self.visible = filter(&self.world, self.ui.layers);
        if self
            .ui
            .hovered
            .as_ref()
            .and_then(|id| self.world.node(id))
            .is_some_and(|n| !self.ui.layers.shows(n.kind))
        {
            self.ui.hovered = None;
        }
        self.needs_redraw.store(true, Ordering::Relaxed);
    }

    pub fn toggle_layer(&mut self, kind: NodeKind) {
        self.ui.layers.toggle(kind);
        tracing::debug!(layer = kind.name(), visible = self.ui.layers.shows(kind), "layer toggled");
        self.refilter();
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        if self.ui.view_mode != mode {
            self.ui.view_mode = mode;
            self.ui.hovered = None;
            self.needs_redraw.store(true, Ordering::Relaxed);
        }
    }

    /// Gather nodes toward their anchors, emit a wave and fly the camera home.
    pub fn recenter(&mut self, now: Instant) {
        let from = match &self.camera.tween {
            Some(t) => t.pose_at(now),
            None => self.camera.pose,
        };
        let out = reset_camera(&self.world, &mut self.integrator, &mut self.waves, from, now);
        self.camera.tween = Some(out.camera);
    }

    /// Advances physics by one frame's worth of wall-clock time.
    pub fn step(&mut self, dt: f32, now: Instant) {
        self.perf.ticks_last_frame = self.integrator.advance(&mut self.world, dt, now);
        self.perf.mode = Some(self.integrator.mode(now));
        if self.visible.is_stale(&self.world) {
            self.refilter();
        }
    }

    pub fn tick_waves(&mut self, now: Instant) {
        if self.prune.due(now) {
            let pruned = self.waves.prune(now);
            if pruned > 0 {
                tracing::trace!(pruned, "waves pruned");
            }
        }
    }

    /// Current camera pose; advances and retires the tween.
    pub fn camera_pose(&mut self, now: Instant) -> CameraPose {
        if let Some(tween) = self.camera.tween {
            self.camera.pose = tween.pose_at(now);
            if tween.is_done(now) {
                self.camera.tween = None;
            }
        }
        self.camera.pose
    }

    /// Snapshot of the live UI state as a saveable config.
    pub fn to_config(&self) -> ViewerConfig {
        ViewerConfig {
            view_mode: self.ui.view_mode.into(),
            show_links: self.ui.show_links,
            layers: self.ui.layers,
            data: self.cfg.data.clone(),
            physics: self.world.physics,
        }
    }

    pub fn node_tooltip_lines(&self, id: &NodeId) -> Vec<String> {
        let Some(node) = self.world.node(id) else {
            return Vec::new();
        };
        let mut lines = vec![node.label.clone(), format!("{} · {}", node.kind.name(), node.city.display_name())];
        if let Some(sub) = node.sub_kind {
            lines.push(format!("role: {}", sub.name()));
        }
        if !node.is_anchor() {
            let degree = self.world.links.iter().filter(|l| l.touches(id)).count();
            lines.push(format!("links: {degree}"));
        }
        lines
    }
}
