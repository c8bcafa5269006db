use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use gpui::Application;
use tracing::{debug, error, info};

use contract_ui::{
    config::{UiConfig, default_config_path},
    logging, open_main_window, setup_app,
};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Step-by-step wizard for drafting a vehicle sale contract.
///
/// Collects contract, party, vehicle and payment data, shows a live summary
/// and saves a printable copy.
#[derive(Debug, Parser)]
struct Cli {
    /// Configuration file. Defaults to `<executable name>.toml` in the
    /// working directory; a missing default file is not an error.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `info,contract_core=trace`.
    #[arg(long)]
    log_level: Option<String>,

    /// Append log records to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Do not write log records to stdout.
    #[arg(long)]
    no_stdout_log: bool,
}

impl Cli {
    /// Command-line flags win over the config file.
    fn apply_overrides(
        &self,
        config: &mut UiConfig,
    ) {
        if let Some(level) = &self.log_level {
            config.logging.level = Some(level.clone());
        }
        if let Some(file) = &self.log_file {
            config.logging.file = Some(file.clone());
        }
        if self.no_stdout_log {
            config.logging.stdout = false;
        }
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<UiConfig> {
    let mut config = match &cli.config {
        Some(path) => UiConfig::load(path)?,
        None => UiConfig::load_or_default(&default_config_path(logging::app_name()))?,
    };
    cli.apply_overrides(&mut config);
    Ok(config)
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    logging::init_default_logging();

    let cli = Cli::parse();
    debug!(?cli, "parsed command line");

    let config = load_config(&cli)?;
    logging::apply_config(&config.logging).context("cannot apply logging settings")?;
    info!(app = logging::app_name(), theme = ?config.theme, "starting");

    Application::new()
        .with_assets(gpui_component_assets::Assets)
        .run(move |cx| {
            setup_app(&config, cx);
            if let Err(error) = open_main_window(&config, cx) {
                error!(?error, "cannot open main window");
                cx.quit();
            }
        });

    Ok(())
}
