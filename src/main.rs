use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tracing::info;
use zfs_volume_driver::config::Args;
use zfs_volume_driver::routes::plugin_routes;
use zfs_volume_driver::zfs_management::ZfsManager;
use zfs_volume_driver::{DatasetRegistry, VolumeDriver};

/// Initialize tracing subscriber for logging
fn init_logging(level: &str) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(level))
        .context("Failed to create log filter")?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level)?;

    info!(version = env!("CARGO_PKG_VERSION"), "starting ZFS volume driver");
    let roots = args.roots()?;

    // Root datasets are checked and created with blocking zfs calls
    let registry = tokio::task::spawn_blocking(move || {
        let zfs = ZfsManager::new()?;
        DatasetRegistry::open(Arc::new(zfs), roots)
    })
    .await
    .context("Startup task failed")?
    .context("Failed to prepare root datasets")?;

    info!(roots = ?registry.roots(), "root datasets ready");
    let driver = VolumeDriver::new(registry);

    if let Some(spec) = &args.plugin_spec {
        std::fs::write(spec, args.plugin_url())
            .with_context(|| format!("Failed to write plugin spec {}", spec.display()))?;
        info!(path = %spec.display(), url = %args.plugin_url(), "wrote plugin spec");
    }

    info!(listen = %args.listen, "serving volume plugin protocol");
    warp::serve(plugin_routes(driver)).run(args.listen).await;

    Ok(())
}
