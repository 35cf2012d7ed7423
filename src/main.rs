use anyhow::Result;
use std::io;
use tracing_subscriber::EnvFilter;

use sustainable_foraging::{AppConfig, Controller, Services};

fn main() -> Result<()> {
    init_tracing();

    let config = AppConfig::from_env();
    config.ensure_data_dir()?;
    tracing::debug!(?config, "configuration loaded");

    let services = Services::open(&config);
    let stdin = io::stdin();
    let mut controller = Controller::new(services, stdin.lock(), io::stdout());
    controller.run()?;

    Ok(())
}

/// Logs go to stderr so they never interleave with the menu on stdout
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
