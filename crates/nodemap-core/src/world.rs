use glam::Vec3;
use std::collections::HashMap;

use crate::anchors;
use crate::builder::BuiltGraph;
use crate::city::City;
use crate::model::{Link, Node, NodeId};
use crate::policy::PhysicsConfig;

/// Owns every node in one contiguous array. Anchors occupy the first three
/// slots for the world's whole lifetime; everything after them is replaced
/// wholesale on each reload.
pub struct World {
    pub nodes: Vec<Node>,
    pub links: Vec<Link>,
    pub physics: PhysicsConfig,
    index: HashMap<NodeId, usize>,
    generation: u64,
}

impl World {
    pub fn new(physics: PhysicsConfig) -> Self {
        let mut world = Self {
            nodes: anchors::registry().into(),
            links: Vec::new(),
            physics: physics.sanitized(),
            index: HashMap::new(),
            generation: 0,
        };
        world.reindex();
        world
    }

    /// Replaces all ordinary nodes and links. Anchors in `graph` are ignored:
    /// the world keeps its own.
    pub fn load(&mut self, graph: BuiltGraph) {
        self.nodes.truncate(City::ALL.len());
        self.nodes
            .extend(graph.nodes.into_iter().filter(|n| !n.is_anchor()));
        self.links = graph.links;
        self.reindex();
        self.generation += 1;
    }

    fn reindex(&mut self) {
        self.index = self
            .nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (n.id.clone(), i))
            .collect();
    }

    /// Bumped on every [`World::load`]; index-based caches compare against it.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn index_of(&self, id: &NodeId) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.index_of(id).map(|i| &self.nodes[i])
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.index.contains_key(id)
    }

    pub fn anchors(&self) -> &[Node] {
        &self.nodes[..City::ALL.len()]
    }

    pub fn anchor_position(&self, city: City) -> Vec3 {
        self.nodes[city.index()].position
    }

    pub fn anchor_positions(&self) -> [Vec3; 3] {
        City::ALL.map(|c| self.anchor_position(c))
    }

    pub fn link_touches_anchor(&self, link: &Link) -> bool {
        [&link.source, &link.target]
            .into_iter()
            .any(|id| self.node(id).map(Node::is_anchor).unwrap_or(false))
    }

    /// Link endpoints as node indices, or `None` if either end is gone.
    pub fn link_endpoints(&self, link: &Link) -> Option<(usize, usize)> {
        Some((self.index_of(&link.source)?, self.index_of(&link.target)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn reload_keeps_exactly_three_anchors() {
        let mut world = World::new(PhysicsConfig::default());
        let mut rng = StdRng::seed_from_u64(9);
        let data = crate::mock::dataset();

        world.load(build(&data, &world.physics, &mut rng));
        let first = world.nodes.len();
        world.load(build(&data, &world.physics, &mut rng));

        assert_eq!(world.nodes.len(), first);
        assert_eq!(world.nodes.iter().filter(|n| n.is_anchor()).count(), 3);
        assert_eq!(world.generation(), 2);
        for (anchor, city) in world.anchors().iter().zip(City::ALL) {
            assert_eq!(anchor.city, city);
        }
    }

    #[test]
    fn every_ordinary_node_has_a_matching_anchor() {
        let mut world = World::new(PhysicsConfig::default());
        let mut rng = StdRng::seed_from_u64(11);
        world.load(build(&crate::mock::dataset(), &world.physics, &mut rng));
        for node in world.nodes.iter().filter(|n| !n.is_anchor()) {
            let matching = world.anchors().iter().filter(|a| a.city == node.city).count();
            assert_eq!(matching, 1);
        }
    }

    #[test]
    fn dangling_link_has_no_endpoints() {
        let world = World::new(PhysicsConfig::default());
        let link = Link::new(NodeId::project(1), NodeId::anchor(City::Santiago));
        assert!(world.link_endpoints(&link).is_none());
        assert!(world.link_touches_anchor(&link));
    }
}
