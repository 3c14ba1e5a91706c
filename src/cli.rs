use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "liftlog",
    version,
    about = "Terminal fitness tracker with a dashboard and editable profile settings"
)]
pub struct Cli {
    /// Config file (defaults to ~/.config/liftlog/config.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Color theme: ember, one-dark or dracula
    #[arg(long)]
    pub theme: Option<String>,

    /// Open the settings screen directly
    #[arg(long)]
    pub settings: bool,

    /// Write logs here (defaults to liftlog.log next to the config file)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}
