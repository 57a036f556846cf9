//! Launcher configuration.
//!
//! Stored as JSON. Lookup order: an explicit path, `<project>/devlaunch.json`,
//! then `~/.devlaunch/config.json`. Missing files and missing fields fall back
//! to defaults, so running with no configuration at all works.

use std::net::{IpAddr, Ipv4Addr};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::domain::{PortRange, DEFAULT_RULE_PREFIX};
use crate::error::{Error, Result};

/// File name looked up in the project directory.
pub const PROJECT_CONFIG_FILE: &str = "devlaunch.json";

/// Placeholder in command arguments replaced by the allocated port.
pub const PORT_PLACEHOLDER: &str = "{port}";

/// Launcher settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchConfig {
    /// Range random candidate ports are drawn from.
    #[serde(default)]
    pub port_range: PortRange,

    /// How many candidates to probe before giving up.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Address the availability probe binds on.
    #[serde(default = "default_bind_host")]
    pub bind_host: IpAddr,

    /// Firewall rule names are `<prefix>-<port>`.
    #[serde(default = "default_rule_prefix")]
    pub rule_name_prefix: String,

    /// Whether to manage a firewall rule at all.
    #[serde(default = "default_true")]
    pub firewall: bool,

    /// Timeout for each firewall command, in seconds.
    #[serde(default = "default_firewall_timeout_secs")]
    pub firewall_timeout_secs: u64,

    /// The dev server command.
    #[serde(default)]
    pub command: DevCommand,

    /// Environment variable the port is injected as.
    #[serde(default = "default_port_env")]
    pub port_env: String,

    /// Port file, relative to the project directory. `null` disables it.
    #[serde(default = "default_port_file")]
    pub port_file: Option<PathBuf>,
}

fn default_max_attempts() -> u32 {
    20
}

fn default_bind_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}

fn default_rule_prefix() -> String {
    DEFAULT_RULE_PREFIX.to_string()
}

fn default_true() -> bool {
    true
}

fn default_firewall_timeout_secs() -> u64 {
    15
}

fn default_port_env() -> String {
    "VITE_PORT".to_string()
}

fn default_port_file() -> Option<PathBuf> {
    Some(PathBuf::from("frontend_port.txt"))
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            port_range: PortRange::default(),
            max_attempts: default_max_attempts(),
            bind_host: default_bind_host(),
            rule_name_prefix: default_rule_prefix(),
            firewall: true,
            firewall_timeout_secs: default_firewall_timeout_secs(),
            command: DevCommand::default(),
            port_env: default_port_env(),
            port_file: default_port_file(),
        }
    }
}

impl LaunchConfig {
    /// Reject settings the launcher cannot work with.
    pub fn validate(&self) -> Result<()> {
        self.port_range.validate()?;
        if self.max_attempts == 0 {
            return Err(Error::Config("maxAttempts must be at least 1".to_string()));
        }
        if self.firewall_timeout_secs == 0 {
            return Err(Error::Config("firewallTimeoutSecs must be at least 1".to_string()));
        }
        if self.rule_name_prefix.trim().is_empty() {
            return Err(Error::Config("ruleNamePrefix must not be empty".to_string()));
        }
        if self.port_env.is_empty() || self.port_env.contains('=') {
            return Err(Error::Config(format!("Invalid portEnv: {:?}", self.port_env)));
        }
        if self.command.program.trim().is_empty() {
            return Err(Error::Config("command.program must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Program and arguments used to start the dev server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DevCommand {
    /// Executable name or path.
    pub program: String,

    /// Arguments; `{port}` is substituted.
    #[serde(default)]
    pub args: Vec<String>,
}

impl Default for DevCommand {
    fn default() -> Self {
        // npx is a .cmd shim on Windows and is not found without the extension
        let program = if cfg!(windows) { "npx.cmd" } else { "npx" };
        Self {
            program: program.to_string(),
            args: vec![
                "vite".to_string(),
                "--port".to_string(),
                PORT_PLACEHOLDER.to_string(),
                "--host".to_string(),
            ],
        }
    }
}

impl DevCommand {
    /// Arguments with the port substituted in.
    pub fn args_for(&self, port: u16) -> Vec<String> {
        let port = port.to_string();
        self.args
            .iter()
            .map(|arg| arg.replace(PORT_PLACEHOLDER, &port))
            .collect()
    }
}

impl std::fmt::Display for DevCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Configuration store for reading and writing `LaunchConfig`.
pub struct ConfigStore {
    /// Path to the configuration file.
    config_path: PathBuf,
}

impl ConfigStore {
    /// Create a config store with a custom path.
    pub fn with_path(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    /// Resolve the configuration file for a project.
    ///
    /// Prefers `<project>/devlaunch.json`, then `~/.devlaunch/config.json`.
    /// When neither exists the project path is returned, so `save` creates it there.
    pub fn for_project(project_dir: &Path) -> Self {
        let project_path = project_dir.join(PROJECT_CONFIG_FILE);
        if project_path.exists() {
            return Self::with_path(project_path);
        }

        if let Some(user_path) = Self::user_config_path() {
            if user_path.exists() {
                return Self::with_path(user_path);
            }
        }

        Self::with_path(project_path)
    }

    /// Per-user configuration path: `~/.devlaunch/config.json`.
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".devlaunch").join("config.json"))
    }

    /// Get the configuration file path.
    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// Load configuration from disk.
    ///
    /// Returns default config if the file doesn't exist.
    pub async fn load(&self) -> Result<LaunchConfig> {
        if !self.config_path.exists() {
            return Ok(LaunchConfig::default());
        }

        let content = fs::read_to_string(&self.config_path)
            .await
            .map_err(|e| Error::Config(format!("Failed to read config: {}", e)))?;

        let config: LaunchConfig = serde_json::from_str(&content).map_err(|e| {
            Error::Config(format!(
                "Failed to parse {}: {}",
                self.config_path.display(),
                e
            ))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to disk.
    ///
    /// Creates the config directory if it doesn't exist.
    pub async fn save(&self, config: &LaunchConfig) -> Result<()> {
        if let Some(config_dir) = self.config_path.parent() {
            if !config_dir.as_os_str().is_empty() && !config_dir.exists() {
                fs::create_dir_all(config_dir).await.map_err(|e| {
                    Error::Config(format!("Failed to create config directory: {}", e))
                })?;
            }
        }

        let content = serde_json::to_string_pretty(config)?;

        // Write atomically by writing to temp file then renaming
        let temp_path = self.config_path.with_extension("json.tmp");

        let mut file = fs::File::create(&temp_path)
            .await
            .map_err(|e| Error::Config(format!("Failed to create temp config file: {}", e)))?;

        file.write_all(content.as_bytes())
            .await
            .map_err(|e| Error::Config(format!("Failed to write config: {}", e)))?;

        file.sync_all()
            .await
            .map_err(|e| Error::Config(format!("Failed to sync config: {}", e)))?;

        fs::rename(&temp_path, &self.config_path)
            .await
            .map_err(|e| Error::Config(format!("Failed to rename config file: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn test_store() -> (ConfigStore, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let path = dir.path().join(PROJECT_CONFIG_FILE);
        (ConfigStore::with_path(path), dir)
    }

    #[tokio::test]
    async fn test_load_nonexistent() {
        let (store, _dir) = test_store();
        let config = store.load().await.unwrap();
        assert_eq!(config, LaunchConfig::default());
        assert_eq!(config.max_attempts, 20);
        assert_eq!(config.port_env, "VITE_PORT");
        assert_eq!(config.rule_name_prefix, "vite-dev");
    }

    #[tokio::test]
    async fn test_partial_config_fills_defaults() {
        let (store, _dir) = test_store();
        std::fs::write(
            store.path(),
            r#"{ "maxAttempts": 5, "firewall": false, "portFile": null }"#,
        )
        .unwrap();

        let config = store.load().await.unwrap();
        assert_eq!(config.max_attempts, 5);
        assert!(!config.firewall);
        assert_eq!(config.port_file, None);
        assert_eq!(config.port_range, PortRange::default());
        assert_eq!(config.command, DevCommand::default());
    }

    #[tokio::test]
    async fn test_save_and_load() {
        let (store, _dir) = test_store();

        let config = LaunchConfig {
            port_range: PortRange::new(30000, 30100).unwrap(),
            rule_name_prefix: "dev".to_string(),
            command: DevCommand {
                program: "pnpm".to_string(),
                args: vec!["dev".to_string(), "--port={port}".to_string()],
            },
            ..LaunchConfig::default()
        };

        store.save(&config).await.unwrap();

        let raw = std::fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("\"ruleNamePrefix\": \"dev\""));

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded, config);
    }

    #[tokio::test]
    async fn test_invalid_config_rejected() {
        let (store, _dir) = test_store();

        std::fs::write(store.path(), r#"{ "portRange": { "min": 5000, "max": 4000 } }"#).unwrap();
        assert!(matches!(store.load().await, Err(Error::InvalidRange(_))));

        std::fs::write(store.path(), r#"{ "maxAttempts": 0 }"#).unwrap();
        assert!(matches!(store.load().await, Err(Error::Config(_))));

        std::fs::write(store.path(), r#"{ "firewallTimeoutSecs": 0 }"#).unwrap();
        assert!(matches!(store.load().await, Err(Error::Config(_))));

        std::fs::write(store.path(), "{ not json").unwrap();
        assert!(matches!(store.load().await, Err(Error::Config(_))));
    }

    #[test]
    fn test_for_project_prefers_project_file() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join(PROJECT_CONFIG_FILE), "{}").unwrap();

        let store = ConfigStore::for_project(dir.path());
        assert_eq!(store.path(), dir.path().join(PROJECT_CONFIG_FILE));

        let loaded = tokio_test::block_on(store.load()).unwrap();
        assert_eq!(loaded, LaunchConfig::default());
    }

    #[test]
    fn test_args_substitution() {
        let command = DevCommand::default();
        assert_eq!(command.args_for(43121), vec!["vite", "--port", "43121", "--host"]);

        let command = DevCommand {
            program: "pnpm".to_string(),
            args: vec!["dev".to_string(), "--port={port}".to_string()],
        };
        assert_eq!(command.args_for(10000), vec!["dev", "--port=10000"]);
        assert_eq!(command.to_string(), "pnpm dev --port={port}");
    }
}
