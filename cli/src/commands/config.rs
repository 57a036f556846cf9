//! Config commands - show and initialise the configuration file.

use anyhow::{bail, Result};
use devlaunch_core::adapters::PortFile;
use devlaunch_core::config::PROJECT_CONFIG_FILE;
use devlaunch_core::{ConfigStore, LaunchConfig};

pub async fn show(options: &super::Options, json: bool) -> Result<()> {
    let store = options.config_store()?;
    let config = options.load_config().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    let source = if store.path().exists() {
        store.path().display().to_string()
    } else {
        "defaults".to_string()
    };

    println!("Configuration ({})", source);
    println!("{}", "-".repeat(50));
    println!("{:<18} {}", "Port range", config.port_range);
    println!("{:<18} {}", "Max attempts", config.max_attempts);
    println!("{:<18} {}", "Bind host", config.bind_host);
    println!(
        "{:<18} {}",
        "Firewall",
        if config.firewall { "enabled" } else { "disabled" }
    );
    println!("{:<18} {}-<port>", "Rule name", config.rule_name_prefix);
    println!("{:<18} {}s", "Firewall timeout", config.firewall_timeout_secs);
    println!("{:<18} {}", "Command", config.command);
    println!("{:<18} {}", "Port env", config.port_env);
    println!(
        "{:<18} {}",
        "Port file",
        config
            .port_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "disabled".to_string())
    );

    // A published port means a launcher is (or was last) serving this project
    if let Some(path) = &config.port_file {
        let port_file = PortFile::new(options.project_dir()?.join(path));
        let status = match port_file.read().await {
            Ok(Some(port)) => format!("port {}", port),
            Ok(None) => "not running".to_string(),
            Err(e) => format!("unreadable ({})", e),
        };
        println!("{:<18} {}", "Dev server", status);
    }

    Ok(())
}

pub async fn init(options: &super::Options, force: bool) -> Result<()> {
    // Always target the project (or explicit) file, never the per-user fallback
    let store = match &options.config {
        Some(path) => ConfigStore::with_path(path.clone()),
        None => ConfigStore::with_path(options.project_dir()?.join(PROJECT_CONFIG_FILE)),
    };

    if store.path().exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            store.path().display()
        );
    }

    store.save(&LaunchConfig::default()).await?;
    println!("Wrote {}", store.path().display());
    Ok(())
}
