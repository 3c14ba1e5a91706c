mod action;
mod app;
mod cli;
mod components;
mod config;
mod error;
mod event;
mod state;
mod theme;
mod tui;

use anyhow::Result;
use clap::Parser;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

use crate::app::App;
use crate::cli::Cli;
use crate::state::profile::FsImageLoader;
use crate::theme::Theme;

fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // Best-effort terminal restore so the user gets their shell back
        let _ = tui::restore();
        default_hook(panic_info);
    }));
}

/// Log to a file; stdout belongs to the TUI. Logging is skipped if the
/// file cannot be opened.
fn init_logging(path: &Path) {
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(path) else {
        return;
    };
    let filter = EnvFilter::try_from_env("LIFTLOG_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
}

fn log_path(cli: &Cli, config_path: &Path) -> PathBuf {
    match &cli.log_file {
        Some(path) => path.clone(),
        None => config_path
            .parent()
            .map(|dir| dir.join("liftlog.log"))
            .unwrap_or_else(|| PathBuf::from("liftlog.log")),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install().ok();
    install_panic_hook();

    let cli = Cli::parse();
    let config_path = cli.config.clone().unwrap_or_else(config::default_config_path);
    init_logging(&log_path(&cli, &config_path));

    // Load config, apply CLI overrides
    let mut config = config::load_config(&config_path);
    if let Some(ref theme_name) = cli.theme {
        config.theme = Theme::from_name(theme_name);
    }
    tracing::info!(config = %config_path.display(), theme = %config.theme.name, "starting liftlog");

    let loader = FsImageLoader::new(config.base_dir());
    let mut app = App::new(config, Box::new(loader), cli.settings);

    let mut terminal = tui::init()?;
    let result = app.run(&mut terminal).await;
    tui::restore()?;

    if let Err(ref e) = result {
        eprintln!("liftlog: {e:#}");
    }

    result
}
