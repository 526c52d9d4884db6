use clap::Parser;
use getitdone_app::cli::Cli;
use getitdone_app::dataset;
use getitdone_core::config::load_config;
use getitdone_service::task::TaskService;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (filter_layer, filter_handle) = reload::Layer::new(EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    let config = load_config()?;

    tracing::debug!(config = ?config, "Configuration loaded");

    if let Ok(filter) = EnvFilter::try_new(config.logging.level.as_str()) {
        if let Err(e) = filter_handle.modify(|current| *current = filter) {
            tracing::warn!(error = %e, "Failed to update log filter from config");
        }
    } else {
        tracing::warn!(level = %config.logging.level, "Invalid log level in config, keeping info");
    }

    let repo = dataset::repository(&config.data.path).await?;
    let service = TaskService::new(repo);

    tracing::info!(command = ?cli.command, user = %config.user.slug, "Running command");

    let output = cli.command.run(&service, &config.user.slug).await?;
    println!("{output}");

    Ok(())
}
