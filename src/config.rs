// src/config.rs
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

/// Locations of the local data and asset files.
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub assets_dir: PathBuf,
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            data_dir: PathBuf::from("data_folder"),
            assets_dir: PathBuf::from("assets"),
        }
    }

    pub fn with_data_dir(mut self, dir: PathBuf) -> Self {
        self.data_dir = dir;
        self
    }

    pub fn with_assets_dir(mut self, dir: PathBuf) -> Self {
        self.assets_dir = dir;
        self
    }

    pub fn secrets_path(&self) -> PathBuf {
        self.data_dir.join("secrets.yaml")
    }

    pub fn resume_schema_path(&self) -> PathBuf {
        self.assets_dir.join("resume_schema.yaml")
    }

    pub fn default_resume_output_path(&self) -> PathBuf {
        self.data_dir.join("plain_text_resume.yaml")
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Deserialize)]
struct Secrets {
    openai_api_key: Option<String>,
}

/// Read the OpenAI API key from the secrets file. Missing file and missing
/// key are reported separately.
pub fn load_openai_api_key(config: &AppConfig) -> Result<String> {
    let secrets_path = config.secrets_path();
    if !secrets_path.exists() {
        anyhow::bail!("Secrets file not found at {}", secrets_path.display());
    }

    let content = std::fs::read_to_string(&secrets_path)
        .with_context(|| format!("Failed to read secrets file: {}", secrets_path.display()))?;
    let secrets: Secrets =
        serde_yaml::from_str(&content).context("Failed to parse secrets.yaml")?;

    secrets
        .openai_api_key
        .filter(|key| !key.is_empty())
        .context("OpenAI API key not found in secrets.yaml")
}
