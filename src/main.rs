use anyhow::{Context, Result, bail};
use clap::Parser;
use par_launch::cli::Cli;
use par_launch_config::LauncherConfig;
use par_launch_update::{HttpSource, Reconciler, SystemLauncher};

fn main() {
    // Process CLI arguments first (before logging init for cleaner output)
    let cli = Cli::parse();
    par_launch::logging::init(cli.log_level.to_filter());

    log::info!("Starting par-launch {}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(&cli) {
        log::error!("{e:#}");
        eprintln!("par-launch: error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let data_root = cli.data_dir.as_path();
    let config_path = LauncherConfig::config_path(data_root);

    if !config_path.exists() {
        bail!(
            "no launcher config found at '{}'. Create one like:\n{}",
            config_path.display(),
            LauncherConfig::sample()
        );
    }

    let config = LauncherConfig::load(&config_path)
        .with_context(|| format!("failed to load '{}'", config_path.display()))?;

    let reconciler = Reconciler::new(&config, data_root, HttpSource::new(), SystemLauncher);

    reconciler
        .reconcile()
        .with_context(|| format!("failed to reconcile installation of {}", config.display_name))?;

    if cli.no_launch {
        log::info!("Skipping launch of {} (--no-launch)", config.display_name);
        return Ok(());
    }

    reconciler.launch()?;
    Ok(())
}
