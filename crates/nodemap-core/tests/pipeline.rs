use nodemap_core::entity::{EntityId, LocationRecord, ProjectRecord, ProviderRecord};
use nodemap_core::fx::{self, FxKey, FxLink, FxMessage, FxValues};
use nodemap_core::recenter::{reset_camera, OVERVIEW_POSE};
use nodemap_core::waves::WaveQueue;
use nodemap_core::{build, filter, Dataset, Integrator, LayerVisibility, Mode, NodeKind, PhysicsConfig, World};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;
use std::time::{Duration, Instant};

fn small_dataset() -> Dataset {
    let loc = |id: i64, city: &str| LocationRecord {
        id: EntityId::Num(id),
        display_name: format!("L{id}"),
        city_text: city.to_string(),
        category: String::new(),
        image_url: None,
    };
    let proj = |id: i64, city: &str| ProjectRecord {
        id: EntityId::Num(id),
        display_name: format!("P{id}"),
        city_text: city.to_string(),
        type_text: String::new(),
        image_url: None,
    };
    let prov = |id: i64, city: &str| ProviderRecord {
        id: EntityId::Num(id),
        display_name: format!("V{id}"),
        city_text: city.to_string(),
        role_text: String::new(),
        image_url: None,
    };
    Dataset {
        locations: vec![loc(1, "Santiago"), loc(2, "Valparaíso"), loc(3, "Concepción")],
        projects: vec![proj(1, "Santiago"), proj(2, "Santiago")],
        providers: vec![
            prov(1, "Santiago"),
            prov(2, "Santiago"),
            prov(3, "Santiago"),
            prov(4, "Valparaíso"),
            prov(5, "Valparaíso"),
        ],
    }
}

#[test]
fn layer_toggle_end_to_end() {
    for seed in 0..16 {
        let mut world = World::new(PhysicsConfig::default());
        let mut rng = StdRng::seed_from_u64(seed);
        world.load(build(&small_dataset(), &world.physics, &mut rng));

        let all = filter(&world, LayerVisibility::default());
        assert_eq!(all.nodes.len(), 13);

        let no_providers = filter(
            &world,
            LayerVisibility {
                provider: false,
                ..Default::default()
            },
        );
        assert_eq!(no_providers.nodes.len(), 8);
        for (li, _, _) in &no_providers.links {
            let link = &world.links[*li];
            assert!(!link.source.0.starts_with("prov:"));
            assert!(!link.target.0.starts_with("prov:"));
        }
        assert_eq!(no_providers.count(NodeKind::Provider), 0);
    }
}

#[test]
fn links_reference_built_nodes() {
    let mut rng = StdRng::seed_from_u64(77);
    let g = build(&small_dataset(), &PhysicsConfig::default(), &mut rng);
    let ids: HashSet<_> = g.nodes.iter().map(|n| n.id.clone()).collect();
    for link in &g.links {
        assert!(ids.contains(&link.source) && ids.contains(&link.target));
    }
    // Both projects are in the first city and hang off its only location.
    assert_eq!(g.links.iter().filter(|l| l.source.0.starts_with("proj:")).count(), 2);
}

#[test]
fn arrow_up_fifty_times_reaches_clamped_speed_on_the_surface() {
    let mut link = FxLink::default();
    let (tx, mut surface) = fx::surface();
    link.attach(tx);

    let mut targets = FxValues::default();
    let mut changed = false;
    for _ in 0..50 {
        changed |= targets.apply_key(FxKey::Up);
    }
    assert!(changed);
    link.send(&FxMessage::full(targets));
    assert_eq!(targets.speed, 4.0);

    surface.drain();
    assert_eq!(surface.target().speed, 4.0);
    for _ in 0..600 {
        surface.frame(1.0 / 60.0);
    }
    assert!((surface.current().speed - 4.0).abs() < 1e-3);
}

#[test]
fn per_press_sends_converge_once_the_link_flushes() {
    let mut link = FxLink::default();
    let (tx, mut surface) = fx::surface();
    link.attach(tx);

    let mut targets = FxValues::default();
    for _ in 0..50 {
        if targets.apply_key(FxKey::Up) {
            link.send(&FxMessage::full(targets));
        }
    }
    // One frame: the surface drains, then the host retries what it held back.
    surface.frame(1.0 / 60.0);
    link.flush();
    surface.drain();
    assert_eq!(surface.target().speed, targets.speed);
}

#[test]
fn recenter_gathers_then_returns_to_orbit() {
    let mut world = World::new(PhysicsConfig::default());
    let mut rng = StdRng::seed_from_u64(5);
    world.load(build(&small_dataset(), &world.physics, &mut rng));
    let mut integ = Integrator::default();
    let mut waves = WaveQueue::default();
    let t0 = Instant::now();

    for _ in 0..300 {
        integ.step(&mut world, t0);
    }
    let r = reset_camera(&world, &mut integ, &mut waves, OVERVIEW_POSE, t0);
    assert_eq!(r.wave.id, 0);

    let mut now = t0;
    while now <= t0 + world.physics.boost_duration() {
        assert_eq!(integ.mode(now), Mode::Boost);
        integ.step(&mut world, now);
        now += Duration::from_millis(16);
    }
    for n in world.nodes.iter().filter(|n| !n.is_anchor()) {
        let d = (n.position - world.anchor_position(n.city)).length();
        assert!(d < 1.0, "{} still {d} from its anchor", n.label);
    }
    assert_eq!(integ.mode(now), Mode::Orbit);
}
