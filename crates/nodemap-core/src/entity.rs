use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::FeedError;

/// Upstream ids arrive as either JSON numbers or strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityId {
    Num(i64),
    Text(String),
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityId::Num(n) => write!(f, "{n}"),
            EntityId::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationRecord {
    pub id: EntityId,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub city_text: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    pub id: EntityId,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub city_text: String,
    #[serde(default)]
    pub type_text: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderRecord {
    pub id: EntityId,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub city_text: String,
    #[serde(default)]
    pub role_text: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Read-only snapshot of the three entity collections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub locations: Vec<LocationRecord>,
    pub projects: Vec<ProjectRecord>,
    pub providers: Vec<ProviderRecord>,
}

impl Dataset {
    /// Decodes the three endpoint payloads. Each part is labelled with the
    /// endpoint it came from so a failure names its source.
    pub fn from_json_parts(
        locations: (&str, &[u8]),
        projects: (&str, &[u8]),
        providers: (&str, &[u8]),
    ) -> Result<Self, FeedError> {
        Ok(Self {
            locations: decode_array(locations.0, locations.1)?,
            projects: decode_array(projects.0, projects.1)?,
            providers: decode_array(providers.0, providers.1)?,
        })
    }

    pub fn entity_count(&self) -> usize {
        self.locations.len() + self.projects.len() + self.providers.len()
    }
}

fn decode_array<T: for<'de> Deserialize<'de>>(endpoint: &str, bytes: &[u8]) -> Result<Vec<T>, FeedError> {
    serde_json::from_slice(bytes).map_err(|source| FeedError::Malformed {
        endpoint: endpoint.to_string(),
        source,
    })
}

/// Where the currently loaded graph came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataOrigin {
    Live,
    Mock,
}
