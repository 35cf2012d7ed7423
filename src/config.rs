// ⚙️ Configuration - where the flat files live
//
// FORAGING_DATA_DIR            directory for all files (default ./data)
// FORAGING_FORAGERS_FILE       overrides <data_dir>/foragers.csv
// FORAGING_ITEMS_FILE          overrides <data_dir>/items.csv
// FORAGING_FORAGES_FILE        overrides <data_dir>/forages.csv

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_DATA_DIR: &str = "./data";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub foragers_file: PathBuf,
    pub items_file: PathBuf,
    pub forages_file: PathBuf,
}

impl AppConfig {
    /// Everything under one directory, default file names
    pub fn in_dir(data_dir: impl AsRef<Path>) -> Self {
        let data_dir = data_dir.as_ref().to_path_buf();
        AppConfig {
            foragers_file: data_dir.join("foragers.csv"),
            items_file: data_dir.join("items.csv"),
            forages_file: data_dir.join("forages.csv"),
            data_dir,
        }
    }

    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Resolve from any key lookup; empty values count as unset
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mut config = Self::in_dir(
            var("FORAGING_DATA_DIR").unwrap_or_else(|| DEFAULT_DATA_DIR.to_string()),
        );

        if let Some(path) = var("FORAGING_FORAGERS_FILE") {
            config.foragers_file = PathBuf::from(path);
        }
        if let Some(path) = var("FORAGING_ITEMS_FILE") {
            config.items_file = PathBuf::from(path);
        }
        if let Some(path) = var("FORAGING_FORAGES_FILE") {
            config.forages_file = PathBuf::from(path);
        }

        config
    }

    /// Create the data directory if it is missing
    pub fn ensure_data_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.data_dir)
            .with_context(|| format!("Failed to create data directory {}", self.data_dir.display()))
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::in_dir(DEFAULT_DATA_DIR)
    }
}
