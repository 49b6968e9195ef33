use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::city::City;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub String);

impl NodeId {
    pub fn anchor(city: City) -> Self {
        Self(format!("city:{}", city.slug()))
    }

    pub fn location(id: impl std::fmt::Display) -> Self {
        Self(format!("loc:{id}"))
    }

    pub fn project(id: impl std::fmt::Display) -> Self {
        Self(format!("proj:{id}"))
    }

    pub fn provider(id: impl std::fmt::Display) -> Self {
        Self(format!("prov:{id}"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    CityAnchor,
    Location,
    Project,
    Provider,
}

impl NodeKind {
    /// Kinds the layer panel can toggle; anchors are always on.
    pub const LAYERS: [NodeKind; 3] = [NodeKind::Location, NodeKind::Project, NodeKind::Provider];

    pub fn name(self) -> &'static str {
        match self {
            NodeKind::CityAnchor => "city",
            NodeKind::Location => "location",
            NodeKind::Project => "project",
            NodeKind::Provider => "provider",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProviderKind {
    Professional,
    Productora,
    Company,
    Student,
}

impl ProviderKind {
    pub fn name(self) -> &'static str {
        match self {
            ProviderKind::Professional => "professional",
            ProviderKind::Productora => "productora",
            ProviderKind::Company => "company",
            ProviderKind::Student => "student",
        }
    }

    /// Keyword match on a free-text role; anything unrecognised is a professional.
    pub fn from_role(role: &str) -> Self {
        let role = role.to_lowercase();
        let table: [(ProviderKind, &[&str]); 3] = [
            (ProviderKind::Productora, &["productora", "production", "producción", "produccion"]),
            (ProviderKind::Company, &["empresa", "company", "agencia", "agency", "studio", "estudio"]),
            (ProviderKind::Student, &["estudiante", "student", "alumno", "practicante", "intern"]),
        ];
        table
            .iter()
            .find(|(_, kws)| kws.iter().any(|kw| role.contains(kw)))
            .map(|(kind, _)| *kind)
            .unwrap_or(ProviderKind::Professional)
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    pub id: NodeId,
    pub kind: NodeKind,
    pub city: City,
    pub sub_kind: Option<ProviderKind>,
    pub label: String,
    pub image_url: Option<String>,
    pub position: Vec3,
    pub velocity: Vec3,
    pub visual_weight: f32,
    pub angle: f32,
    pub tilt: f32,
}

impl Node {
    pub fn is_anchor(&self) -> bool {
        self.kind == NodeKind::CityAnchor
    }
}

/// Undirected for rendering; `source`/`target` only record build order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Link {
    pub source: NodeId,
    pub target: NodeId,
}

impl Link {
    pub fn new(source: NodeId, target: NodeId) -> Self {
        Self { source, target }
    }

    pub fn touches(&self, id: &NodeId) -> bool {
        &self.source == id || &self.target == id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_kind_from_role_keywords() {
        assert_eq!(ProviderKind::from_role("Casa Productora"), ProviderKind::Productora);
        assert_eq!(ProviderKind::from_role("Agencia de casting"), ProviderKind::Company);
        assert_eq!(ProviderKind::from_role("STUDENT of film"), ProviderKind::Student);
        assert_eq!(ProviderKind::from_role("Director de fotografía"), ProviderKind::Professional);
        assert_eq!(ProviderKind::from_role(""), ProviderKind::Professional);
    }

    #[test]
    fn node_ids_are_namespaced_per_kind() {
        assert_ne!(NodeId::location(1), NodeId::project(1));
        assert_eq!(NodeId::anchor(City::Valparaiso).0, "city:valparaiso");
    }
}
