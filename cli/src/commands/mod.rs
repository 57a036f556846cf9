//! Subcommand implementations.

pub mod config;
pub mod run;

use std::path::PathBuf;

use anyhow::{Context, Result};
use devlaunch_core::{ConfigStore, LaunchConfig};

/// Options shared by every subcommand.
pub struct Options {
    pub project: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub no_firewall: bool,
}

impl Options {
    /// Project directory, defaulting to the current directory.
    pub fn project_dir(&self) -> Result<PathBuf> {
        match &self.project {
            Some(dir) => Ok(dir.clone()),
            None => std::env::current_dir().context("Could not determine current directory"),
        }
    }

    /// Store for the selected configuration file.
    pub fn config_store(&self) -> Result<ConfigStore> {
        Ok(match &self.config {
            Some(path) => ConfigStore::with_path(path.clone()),
            None => ConfigStore::for_project(&self.project_dir()?),
        })
    }

    /// Load configuration and apply command-line overrides.
    pub async fn load_config(&self) -> Result<LaunchConfig> {
        let store = self.config_store()?;
        let mut config = store
            .load()
            .await
            .with_context(|| format!("Failed to load {}", store.path().display()))?;

        if self.no_firewall {
            config.firewall = false;
        }
        Ok(config)
    }
}
