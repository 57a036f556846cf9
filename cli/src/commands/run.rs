//! Default command - launch the dev server.

use anyhow::{Context, Result};
use devlaunch_core::adapters::signals;
use devlaunch_core::DevServerLauncher;

pub async fn run(options: &super::Options) -> Result<i32> {
    let config = options.load_config().await?;
    let project_dir = options.project_dir()?;
    tracing::debug!(project = %project_dir.display(), "Using project directory");

    // Listen before spawning so an early Ctrl+C is not lost
    let signals = signals::listen().context("Failed to install signal handlers")?;

    let launcher = DevServerLauncher::for_host(config, project_dir);
    let code = launcher.run(signals).await?;
    Ok(code)
}
