use std::process::ExitCode;

use clap::Parser;
use sto_cargo_search::{app, Cli};
use sto_core::config::Config;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let (config, config_error) = match Config::load() {
        Ok(config) => (config, None),
        Err(e) => (Config::defaults(), Some(e)),
    };

    if cli.debug {
        if let Err(e) = init_file_logging(&config) {
            eprintln!("Warning: debug logging disabled: {e}");
            init_stderr_logging();
        }
    } else {
        init_stderr_logging();
    }
    if let Some(e) = config_error {
        tracing::warn!(error = %e, "config: falling back to defaults");
    }

    match try_main(cli, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn try_main(cli: Cli, config: &Config) -> anyhow::Result<()> {
    let plan = cli.into_plan()?;
    let results = app::run(&plan, config).await?;
    print!("{}", sto_render::render(&results, plan.render));
    Ok(())
}

fn init_file_logging(config: &Config) -> std::io::Result<()> {
    let path = config.log.resolved_file();
    let file = std::fs::OpenOptions::new().create(true).append(true).open(&path)?;
    tracing_subscriber::fmt()
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .init();
    tracing::info!(path = %path.display(), "sto-cargo-search debug log started");
    Ok(())
}

fn init_stderr_logging() {
    tracing_subscriber::fmt()
        .compact()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();
}
