use anyhow::Context;
use directories::ProjectDirs;
use nodemap_core::{LayerVisibility, PhysicsConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewerViewMode {
    ThreeD,
    TwoD,
}

impl Default for ViewerViewMode {
    fn default() -> Self {
        Self::ThreeD
    }
}

/// Where the three entity arrays come from. Each endpoint is either an
/// `http(s)://` URL or a local file path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub locations: String,
    pub projects: String,
    pub providers: String,
    pub timeout_ms: u64,
    /// Seed for the fallback dataset and for live-graph link sampling.
    pub mock_seed: u64,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            locations: "http://127.0.0.1:8000/api/locations".to_string(),
            projects: "http://127.0.0.1:8000/api/projects".to_string(),
            providers: "http://127.0.0.1:8000/api/providers".to_string(),
            timeout_ms: 4000,
            mock_seed: 7,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub view_mode: ViewerViewMode,
    pub show_links: bool,
    pub layers: LayerVisibility,
    pub data: DataConfig,
    pub physics: PhysicsConfig,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            view_mode: ViewerViewMode::ThreeD,
            show_links: true,
            layers: LayerVisibility::default(),
            data: DataConfig::default(),
            physics: PhysicsConfig::default(),
        }
    }
}

fn config_file_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("", "", "nodemap")?;
    Some(proj.config_dir().join("viewer.toml"))
}

pub fn load_or_default() -> ViewerConfig {
    let Some(path) = config_file_path() else {
        return ViewerConfig::default();
    };
    load_or_default_from_path(&path)
}

fn load_or_default_from_path(path: &Path) -> ViewerConfig {
    let Ok(contents) = fs::read_to_string(path) else {
        return ViewerConfig::default();
    };
    match toml::from_str(&contents) {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring malformed viewer config");
            ViewerConfig::default()
        }
    }
}

pub fn save(cfg: &ViewerConfig) -> anyhow::Result<PathBuf> {
    let Some(path) = config_file_path() else {
        return Err(anyhow::anyhow!("no config directory available"));
    };
    save_to_path(cfg, &path)?;
    Ok(path)
}

fn save_to_path(cfg: &ViewerConfig, path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create config directory {}", parent.display()))?;
    }
    let data = toml::to_string_pretty(cfg).context("failed to serialize viewer config")?;
    fs::write(path, data)
        .with_context(|| format!("failed to write viewer config {}", path.display()))?;
    Ok(())
}
