use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::model::NodeKind;
use crate::world::World;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayerVisibility {
    pub location: bool,
    pub project: bool,
    pub provider: bool,
}

impl Default for LayerVisibility {
    fn default() -> Self {
        Self {
            location: true,
            project: true,
            provider: true,
        }
    }
}

impl LayerVisibility {
    pub fn shows(&self, kind: NodeKind) -> bool {
        match kind {
            NodeKind::CityAnchor => true,
            NodeKind::Location => self.location,
            NodeKind::Project => self.project,
            NodeKind::Provider => self.provider,
        }
    }

    pub fn set(&mut self, kind: NodeKind, visible: bool) {
        match kind {
            NodeKind::CityAnchor => {}
            NodeKind::Location => self.location = visible,
            NodeKind::Project => self.project = visible,
            NodeKind::Provider => self.provider = visible,
        }
    }

    pub fn toggle(&mut self, kind: NodeKind) {
        let on = self.shows(kind);
        self.set(kind, !on);
    }
}

/// Visible subset of a [`World`], as indices into `world.nodes` and
/// `world.links`. Only valid for the world generation it was built from.
#[derive(Debug, Clone, Default)]
pub struct VisibleGraph {
    pub nodes: Vec<usize>,
    /// `(link index, source node index, target node index)`.
    pub links: Vec<(usize, usize, usize)>,
    pub generation: u64,
    counts: [usize; 4],
}

impl VisibleGraph {
    pub fn count(&self, kind: NodeKind) -> usize {
        self.counts[kind_slot(kind)]
    }

    pub fn is_stale(&self, world: &World) -> bool {
        self.generation != world.generation()
    }
}

fn kind_slot(kind: NodeKind) -> usize {
    match kind {
        NodeKind::CityAnchor => 0,
        NodeKind::Location => 1,
        NodeKind::Project => 2,
        NodeKind::Provider => 3,
    }
}

/// Full recompute. Links survive only if both endpoints are visible; a link
/// naming a node the world no longer has is dropped silently.
pub fn filter(world: &World, layers: LayerVisibility) -> VisibleGraph {
    let mut out = VisibleGraph {
        generation: world.generation(),
        ..Default::default()
    };
    let mut visible: HashSet<usize> = HashSet::with_capacity(world.nodes.len());
    for (i, node) in world.nodes.iter().enumerate() {
        if layers.shows(node.kind) {
            out.nodes.push(i);
            out.counts[kind_slot(node.kind)] += 1;
            visible.insert(i);
        }
    }
    for (li, link) in world.links.iter().enumerate() {
        let Some((a, b)) = world.link_endpoints(link) else {
            continue;
        };
        if visible.contains(&a) && visible.contains(&b) {
            out.links.push((li, a, b));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build;
    use crate::model::{Link, NodeId};
    use crate::policy::PhysicsConfig;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn all_states() -> Vec<LayerVisibility> {
        (0..8u8)
            .map(|bits| LayerVisibility {
                location: bits & 1 != 0,
                project: bits & 2 != 0,
                provider: bits & 4 != 0,
            })
            .collect()
    }

    #[test]
    fn filtered_links_never_dangle() {
        let mut world = World::new(PhysicsConfig::default());
        let mut rng = StdRng::seed_from_u64(17);
        let mut g = build(&crate::mock::dataset(), &world.physics, &mut rng);
        g.links.push(Link::new(NodeId::provider("ghost"), NodeId::project(1)));
        world.load(g);

        for layers in all_states() {
            let vis = filter(&world, layers);
            let shown: HashSet<usize> = vis.nodes.iter().copied().collect();
            for (_, a, b) in &vis.links {
                assert!(shown.contains(a) && shown.contains(b), "{layers:?}");
            }
            assert_eq!(vis.count(NodeKind::CityAnchor), 3);
        }
    }

    #[test]
    fn anchors_stay_visible_with_every_layer_off() {
        let world = World::new(PhysicsConfig::default());
        let vis = filter(
            &world,
            LayerVisibility {
                location: false,
                project: false,
                provider: false,
            },
        );
        assert_eq!(vis.nodes, vec![0, 1, 2]);
    }

    #[test]
    fn toggle_flips_only_its_layer() {
        let mut layers = LayerVisibility::default();
        layers.toggle(NodeKind::Project);
        assert!(!layers.project && layers.location && layers.provider);
        layers.toggle(NodeKind::CityAnchor);
        assert!(layers.shows(NodeKind::CityAnchor));
    }
}
