//! Deterministic synthetic data, used when the data source is unavailable.
//! Same record shapes as the live feed so the rest of the pipeline runs
//! unchanged.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::builder::{build, BuiltGraph};
use crate::entity::{Dataset, EntityId, LocationRecord, ProjectRecord, ProviderRecord};
use crate::policy::PhysicsConfig;

const CITY_TEXT: [&str; 3] = ["Santiago", "Valparaíso", "Concepción"];

const LOCATION_NAMES: [&str; 9] = [
    "Galpón Matucana",
    "Casona Yungay",
    "Bodega Bellavista",
    "Muelle Barón",
    "Ascensor Artillería",
    "Palacio Rioja",
    "Teatro Biobío",
    "Parque Ecuador",
    "Caleta Tumbes",
];

const PROJECT_NAMES: [&str; 12] = [
    "Ruido Blanco",
    "La Última Luz",
    "Mareas",
    "Cerro Arriba",
    "Hormigón",
    "Los Perros del Puerto",
    "Niebla",
    "Carbón",
    "Ventana Sur",
    "Kilómetro Cero",
    "Sal",
    "Río Abajo",
];

const ROLES: [&str; 8] = [
    "Directora de fotografía",
    "Casa productora",
    "Sonidista",
    "Estudiante de cine",
    "Agencia de casting",
    "Montajista",
    "Productora audiovisual",
    "Empresa de rental",
];

/// The fallback dataset: 9 locations, 12 projects, 30 providers spread over
/// all three cities.
pub fn dataset() -> Dataset {
    let locations = LOCATION_NAMES
        .iter()
        .enumerate()
        .map(|(i, name)| LocationRecord {
            id: EntityId::Num(i as i64 + 1),
            display_name: name.to_string(),
            city_text: CITY_TEXT[i / 3].to_string(),
            category: "set".to_string(),
            image_url: None,
        })
        .collect();

    let projects = PROJECT_NAMES
        .iter()
        .enumerate()
        .map(|(i, name)| ProjectRecord {
            id: EntityId::Num(i as i64 + 1),
            display_name: name.to_string(),
            city_text: CITY_TEXT[i % 3].to_string(),
            type_text: if i % 2 == 0 { "largometraje" } else { "cortometraje" }.to_string(),
            image_url: None,
        })
        .collect();

    let providers = (0..30)
        .map(|i| ProviderRecord {
            id: EntityId::Num(i as i64 + 1),
            display_name: format!("Proveedor {:02}", i + 1),
            // Skewed toward the first city, like real rosters.
            city_text: CITY_TEXT[[0, 0, 1, 0, 2][i % 5]].to_string(),
            role_text: ROLES[i % ROLES.len()].to_string(),
            image_url: None,
        })
        .collect();

    Dataset {
        locations,
        projects,
        providers,
    }
}

/// The fallback graph, reproducible from `seed`.
pub fn graph(physics: &PhysicsConfig, seed: u64) -> BuiltGraph {
    let mut rng = StdRng::seed_from_u64(seed);
    build(&dataset(), physics, &mut rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::city::{normalize, City};
    use crate::model::NodeKind;

    #[test]
    fn mock_covers_every_city_and_kind() {
        let data = dataset();
        for city in City::ALL {
            assert!(data.locations.iter().any(|l| normalize(&l.city_text) == city));
            assert!(data.projects.iter().any(|p| normalize(&p.city_text) == city));
            assert!(data.providers.iter().any(|p| normalize(&p.city_text) == city));
        }
    }

    #[test]
    fn same_seed_same_graph() {
        let cfg = PhysicsConfig::default();
        let a = graph(&cfg, 99);
        let b = graph(&cfg, 99);
        assert_eq!(a.links, b.links);
        assert_eq!(a.nodes.len(), 3 + 9 + 12 + 30);
        for (x, y) in a.nodes.iter().zip(&b.nodes) {
            assert_eq!(x.position, y.position);
            assert_eq!(x.kind, y.kind);
        }
        assert_eq!(a.nodes.iter().filter(|n| n.kind == NodeKind::Provider).count(), 30);
    }
}
