use glam::Vec3;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;
use std::f32::consts::TAU;

use crate::anchors;
use crate::city::{normalize, City};
use crate::entity::Dataset;
use crate::model::{Link, Node, NodeId, NodeKind, ProviderKind};
use crate::policy::{anchor_position, PhysicsConfig, MAX_TILT, SEED_JITTER};
use crate::style::node_style;

#[derive(Debug, Clone, Default)]
pub struct BuiltGraph {
    pub nodes: Vec<Node>,
    pub links: Vec<Link>,
}

/// Turns the three entity collections into one node/link set.
///
/// Project and provider links are illustrative: a project hangs off the first
/// location in its city, and a provider is linked to a sampled project (or to
/// nothing). Sampling draws from `rng`, so a seeded generator reproduces the
/// same graph.
pub fn build<R: Rng + ?Sized>(data: &Dataset, physics: &PhysicsConfig, rng: &mut R) -> BuiltGraph {
    let mut out = BuiltGraph::default();
    out.nodes.extend(anchors::registry());
    let mut seen: HashSet<NodeId> = out.nodes.iter().map(|n| n.id.clone()).collect();

    let mut locations: Vec<(NodeId, City)> = Vec::with_capacity(data.locations.len());
    for rec in &data.locations {
        let city = normalize(&rec.city_text);
        let id = NodeId::location(&rec.id);
        if !seen.insert(id.clone()) {
            tracing::debug!(id = %id.0, "skipping repeated location id");
            continue;
        }
        out.nodes.push(seed_node(
            rng,
            id.clone(),
            NodeKind::Location,
            city,
            None,
            &rec.display_name,
            rec.image_url.clone(),
        ));
        locations.push((id, city));
    }

    let mut projects: Vec<(NodeId, City)> = Vec::with_capacity(data.projects.len());
    for rec in &data.projects {
        let city = normalize(&rec.city_text);
        let id = NodeId::project(&rec.id);
        if !seen.insert(id.clone()) {
            tracing::debug!(id = %id.0, "skipping repeated project id");
            continue;
        }
        out.nodes.push(seed_node(
            rng,
            id.clone(),
            NodeKind::Project,
            city,
            None,
            &rec.display_name,
            rec.image_url.clone(),
        ));
        if let Some((loc, _)) = locations.iter().find(|(_, c)| *c == city) {
            out.links.push(Link::new(id.clone(), loc.clone()));
        }
        projects.push((id, city));
    }

    for rec in &data.providers {
        let city = normalize(&rec.city_text);
        let id = NodeId::provider(&rec.id);
        if !seen.insert(id.clone()) {
            tracing::debug!(id = %id.0, "skipping repeated provider id");
            continue;
        }
        let sub_kind = ProviderKind::from_role(&rec.role_text);
        out.nodes.push(seed_node(
            rng,
            id.clone(),
            NodeKind::Provider,
            city,
            Some(sub_kind),
            &rec.display_name,
            rec.image_url.clone(),
        ));
        if let Some(project) = sample_project(rng, physics, city, &projects) {
            out.links.push(Link::new(id, project));
        }
    }

    tracing::debug!(
        nodes = out.nodes.len(),
        links = out.links.len(),
        "graph built"
    );
    out
}

/// `None` with `unlinked_probability`; otherwise a project from the same city
/// (or, with `cross_city_probability`, a different one). An empty preferred
/// pool falls through to the other pool.
fn sample_project<R: Rng + ?Sized>(
    rng: &mut R,
    physics: &PhysicsConfig,
    city: City,
    projects: &[(NodeId, City)],
) -> Option<NodeId> {
    if projects.is_empty() || rng.gen_bool(physics.unlinked_probability) {
        return None;
    }
    let (same, other): (Vec<&NodeId>, Vec<&NodeId>) = {
        let mut same = Vec::new();
        let mut other = Vec::new();
        for (id, c) in projects {
            if *c == city {
                same.push(id);
            } else {
                other.push(id);
            }
        }
        (same, other)
    };
    let (preferred, fallback) = if rng.gen_bool(physics.cross_city_probability) {
        (&other, &same)
    } else {
        (&same, &other)
    };
    let pool = if preferred.is_empty() { fallback } else { preferred };
    pool.choose(rng).map(|id| (*id).clone())
}

fn seed_node<R: Rng + ?Sized>(
    rng: &mut R,
    id: NodeId,
    kind: NodeKind,
    city: City,
    sub_kind: Option<ProviderKind>,
    label: &str,
    image_url: Option<String>,
) -> Node {
    let jitter = Vec3::new(
        rng.gen_range(-SEED_JITTER..=SEED_JITTER),
        rng.gen_range(-SEED_JITTER..=SEED_JITTER) * 0.25,
        rng.gen_range(-SEED_JITTER..=SEED_JITTER),
    );
    let label = if label.trim().is_empty() {
        id.0.clone()
    } else {
        label.trim().to_string()
    };
    Node {
        id,
        kind,
        city,
        sub_kind,
        label,
        image_url,
        position: anchor_position(city) + jitter,
        velocity: Vec3::ZERO,
        visual_weight: node_style(kind, sub_kind).size,
        angle: rng.gen_range(0.0..TAU),
        tilt: rng.gen_range(-MAX_TILT..=MAX_TILT),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{EntityId, LocationRecord, ProjectRecord, ProviderRecord};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn loc(id: i64, city: &str) -> LocationRecord {
        LocationRecord {
            id: EntityId::Num(id),
            display_name: format!("loc {id}"),
            city_text: city.to_string(),
            category: String::new(),
            image_url: None,
        }
    }

    fn proj(id: i64, city: &str) -> ProjectRecord {
        ProjectRecord {
            id: EntityId::Num(id),
            display_name: format!("proj {id}"),
            city_text: city.to_string(),
            type_text: String::new(),
            image_url: None,
        }
    }

    fn prov(id: i64, city: &str, role: &str) -> ProviderRecord {
        ProviderRecord {
            id: EntityId::Num(id),
            display_name: String::new(),
            city_text: city.to_string(),
            role_text: role.to_string(),
            image_url: None,
        }
    }

    #[test]
    fn emits_anchors_and_one_node_per_entity() {
        let data = Dataset {
            locations: vec![loc(1, "Santiago"), loc(2, "Valparaíso")],
            projects: vec![proj(1, "Santiago")],
            providers: vec![prov(1, "Concepción", "productora")],
        };
        let mut rng = StdRng::seed_from_u64(7);
        let g = build(&data, &PhysicsConfig::default(), &mut rng);

        assert_eq!(g.nodes.iter().filter(|n| n.is_anchor()).count(), 3);
        assert_eq!(g.nodes.len(), 3 + 4);
        let provider = g.nodes.iter().find(|n| n.kind == NodeKind::Provider).unwrap();
        assert_eq!(provider.sub_kind, Some(ProviderKind::Productora));
        assert_eq!(provider.label, "prov:1");
    }

    #[test]
    fn project_links_to_first_location_in_its_city() {
        let data = Dataset {
            locations: vec![loc(1, "Valpo"), loc(2, "Santiago"), loc(3, "Santiago")],
            projects: vec![proj(9, "stgo"), proj(10, "Concepción")],
            providers: vec![],
        };
        let mut rng = StdRng::seed_from_u64(1);
        let g = build(&data, &PhysicsConfig::default(), &mut rng);

        assert_eq!(g.links, vec![Link::new(NodeId::project(9), NodeId::location(2))]);
    }

    #[test]
    fn every_link_endpoint_exists_at_construction() {
        for seed in 0..32 {
            let mut rng = StdRng::seed_from_u64(seed);
            let data = crate::mock::dataset();
            let g = build(&data, &PhysicsConfig::default(), &mut rng);
            let ids: HashSet<&NodeId> = g.nodes.iter().map(|n| &n.id).collect();
            for link in &g.links {
                assert!(ids.contains(&link.source), "seed {seed}: {:?}", link.source);
                assert!(ids.contains(&link.target), "seed {seed}: {:?}", link.target);
            }
        }
    }

    #[test]
    fn tilt_and_angle_are_within_bounds() {
        let mut rng = StdRng::seed_from_u64(3);
        let g = build(&crate::mock::dataset(), &PhysicsConfig::default(), &mut rng);
        for n in g.nodes.iter().filter(|n| !n.is_anchor()) {
            assert!((-MAX_TILT..=MAX_TILT).contains(&n.tilt));
            assert!((0.0..TAU).contains(&n.angle));
        }
    }

    #[test]
    fn provider_link_rate_and_cross_city_share_track_configuration() {
        let projects: Vec<ProjectRecord> = (0..6)
            .map(|i| proj(i, if i % 2 == 0 { "Santiago" } else { "Valparaiso" }))
            .collect();
        let providers: Vec<ProviderRecord> = (0..4000).map(|i| prov(i, "Santiago", "")).collect();
        let data = Dataset {
            locations: vec![],
            projects,
            providers,
        };
        let mut rng = StdRng::seed_from_u64(42);
        let g = build(&data, &PhysicsConfig::default(), &mut rng);

        let city_of: std::collections::HashMap<&NodeId, City> =
            g.nodes.iter().map(|n| (&n.id, n.city)).collect();
        let provider_links: Vec<&Link> = g
            .links
            .iter()
            .filter(|l| l.source.0.starts_with("prov:"))
            .collect();
        let linked = provider_links.len() as f64 / 4000.0;
        assert!((linked - 0.55).abs() < 0.04, "linked share {linked}");

        let cross = provider_links
            .iter()
            .filter(|l| city_of[&l.target] != City::Santiago)
            .count() as f64
            / provider_links.len() as f64;
        assert!((cross - 0.2).abs() < 0.04, "cross-city share {cross}");
    }

    #[test]
    fn no_projects_means_no_provider_links() {
        let data = Dataset {
            locations: vec![],
            projects: vec![],
            providers: (0..50).map(|i| prov(i, "Santiago", "")).collect(),
        };
        let mut rng = StdRng::seed_from_u64(5);
        assert!(build(&data, &PhysicsConfig::default(), &mut rng).links.is_empty());
    }

    #[test]
    fn repeated_ids_keep_the_first_record() {
        let mut first = loc(4, "Santiago");
        first.display_name = "first".to_string();
        let mut again = loc(4, "Concepción");
        again.display_name = "again".to_string();
        let data = Dataset {
            locations: vec![first, again, loc(5, "Valpo")],
            projects: vec![proj(1, "Santiago"), proj(1, "Valpo")],
            providers: vec![prov(2, "Santiago", ""), prov(2, "Santiago", "")],
        };
        let mut rng = StdRng::seed_from_u64(3);
        let g = build(&data, &PhysicsConfig::default(), &mut rng);

        assert_eq!(g.nodes.len(), 3 + 2 + 1 + 1);
        let ids: HashSet<_> = g.nodes.iter().map(|n| n.id.clone()).collect();
        assert_eq!(ids.len(), g.nodes.len());
        let kept = g.nodes.iter().find(|n| n.id == NodeId::location(4)).unwrap();
        assert_eq!(kept.label, "first");
        assert_eq!(g.links.iter().filter(|l| l.source == NodeId::project(1)).count(), 1);
    }
}
