//! ---
//! pw_section: "06-terminal-dashboard"
//! pw_subsection: "binary"
//! pw_type: "source"
//! pw_scope: "code"
//! pw_description: "Dashboard launcher: CLI, config, terminal lifecycle."
//! pw_version: "v0.1.0-dev"
//! pw_owner: "tbd"
//! ---
use std::io;
use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::{ArgAction, Parser};
use crossterm::cursor::{Hide, Show};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::info;
use url::Url;

use plantwatch_common::{init_tracing, AppConfig};

mod controller;
mod screen;
mod ui;

use controller::{lenient_plant_id, ViewMode};

#[derive(Parser, Debug)]
#[command(
    author,
    disable_version_flag = true,
    about = "Live monitoring dashboard for power-generation fleets",
    propagate_version = false
)]
struct Cli {
    /// Configuration file (defaults to plantwatch.toml, then configs/plantwatch.toml)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Backend base URL, overriding the configured one
    #[arg(long)]
    base_url: Option<Url>,
    /// Open the detail view for this plant at startup
    #[arg(long)]
    plant: Option<String>,
    /// Open the fleet overview at startup (the default)
    #[arg(long)]
    fleet: bool,

    /// Print version information and exit
    #[arg(short = 'V', long = "version", action = ArgAction::SetTrue)]
    version: bool,
}

fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            if !path.exists() {
                return Err(anyhow!("config file {} does not exist", path.display()));
            }
            AppConfig::load(&[path.clone()])?
        }
        None => AppConfig::load(&[
            PathBuf::from("plantwatch.toml"),
            PathBuf::from("configs/plantwatch.toml"),
        ])?,
    };
    if let Some(base_url) = &cli.base_url {
        config.api.base_url = base_url.clone();
        config.validate()?;
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    if cli.version {
        println!("plantwatch-ui {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }
    init_tracing("plantwatch-ui")?;
    let config = load_config(&cli)?;

    let mode = match (&cli.plant, cli.fleet) {
        (Some(raw), false) => ViewMode::Plant(lenient_plant_id(raw)),
        _ => ViewMode::Fleet,
    };
    info!(base_url = %config.api.base_url, ?mode, "starting dashboard");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen, Hide)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    let result = ui::run(&mut terminal, &config, mode).await;
    cleanup_terminal(&mut terminal)?;
    if let Err(err) = result {
        eprintln!("error: {err:?}");
        std::process::exit(1);
    }
    Ok(())
}

fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    crossterm::execute!(terminal.backend_mut(), LeaveAlternateScreen, Show)?;
    terminal.show_cursor()?;
    Ok(())
}
