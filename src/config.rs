use crate::export::ExportOptions;
use crate::layout::{LayoutMetrics, LayoutMode};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings shared by the viewer and the exporter. Every field is optional
/// in the file; missing ones keep their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub layout_mode: LayoutMode,
    pub layout: LayoutMetrics,
    pub export: ExportOptions,
}

impl Config {
    pub fn parse(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("Invalid configuration")
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Failed to load {}", path.display()))
    }
}
