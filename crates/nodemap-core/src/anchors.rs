use glam::Vec3;

use crate::city::City;
use crate::model::{Node, NodeId, NodeKind};
use crate::policy::anchor_position;
use crate::style::node_style;

/// The three fixed gravity wells, one per canonical city, in `City::ALL` order.
pub fn registry() -> [Node; 3] {
    City::ALL.map(anchor_node)
}

pub fn anchor_node(city: City) -> Node {
    Node {
        id: NodeId::anchor(city),
        kind: NodeKind::CityAnchor,
        city,
        sub_kind: None,
        label: city.display_name().to_string(),
        image_url: None,
        position: anchor_position(city),
        velocity: Vec3::ZERO,
        visual_weight: node_style(NodeKind::CityAnchor, None).size,
        angle: 0.0,
        tilt: 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_has_one_anchor_per_city() {
        let anchors = registry();
        for (anchor, city) in anchors.iter().zip(City::ALL) {
            assert!(anchor.is_anchor());
            assert_eq!(anchor.city, city);
            assert_eq!(anchor.position, anchor_position(city));
        }
    }
}
