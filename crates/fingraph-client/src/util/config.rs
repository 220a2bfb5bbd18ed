use anyhow::Context;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub endpoint: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://fingraph-sentinel.onrender.com/analyze".to_string(),
        }
    }
}

fn config_file_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("", "", "fingraph")?;
    Some(proj.config_dir().join("client.toml"))
}

pub fn load_or_default() -> ClientConfig {
    let Some(path) = config_file_path() else {
        return ClientConfig::default();
    };
    load_or_default_from_path(&path)
}

fn load_or_default_from_path(path: &Path) -> ClientConfig {
    let Ok(contents) = fs::read_to_string(path) else {
        return ClientConfig::default();
    };
    toml::from_str(&contents).unwrap_or_else(|_| ClientConfig::default())
}

pub fn save(cfg: &ClientConfig) -> anyhow::Result<()> {
    let Some(path) = config_file_path() else {
        return Err(anyhow::anyhow!("no config directory available"));
    };
    save_to_path(cfg, &path)
}

fn save_to_path(cfg: &ClientConfig, path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create config directory {}", parent.display()))?;
    }
    let data = toml::to_string_pretty(cfg).context("failed to serialize client config")?;
    fs::write(path, data)
        .with_context(|| format!("failed to write client config {}", path.display()))?;
    Ok(())
}
