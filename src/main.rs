use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokio::sync::mpsc;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use portfolio_theme::commands;
use portfolio_theme::config::{self, Config};
use portfolio_theme::motion::{self, ChainProbe, MOTION_CHANNEL_BUFFER_SIZE};
use portfolio_theme::tui;

// Default Configuration Constants
/// Default log level when not specified
const DEFAULT_LOG_LEVEL: &str = "info";

/// Default log file path (no logging to file)
const DEFAULT_LOG_FILE: &str = "/dev/null";

#[derive(Parser)]
#[command(name = "portfolio-theme")]
#[command(about = "Portfolio theme preferences", long_about = "Portfolio theme preferences\n\nIf no command is specified, the program starts the interactive theme switcher.")]
struct Cli {
    /// Set log level (trace, debug, info, warn, error)
    #[arg(short = 'L', long, global = true, default_value = DEFAULT_LOG_LEVEL)]
    log_level: String,

    /// Log file path (default: /dev/null for no logging)
    #[arg(short = 'F', long, global = true, default_value = DEFAULT_LOG_FILE)]
    log_file: String,

    /// Do not read or write the persisted settings
    #[arg(long, global = true)]
    no_persist: bool,

    /// Local storage key holding the settings snapshot
    #[arg(long, global = true)]
    storage_key: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Display the current theme settings
    Show,
    /// Change one setting (e.g. `set theme neon`)
    Set {
        /// Field name (theme, particleDensity, accentColor, ...)
        field: String,
        /// New value
        value: String,
    },
    /// Restore every setting to its default
    Reset,
    /// Print the CSS variables and body attributes for the current settings
    Css,
    /// Display current configuration
    Config,
}

fn init_logging(log_level: &str, log_file: &str) {
    // Unknown level names fall back to info
    let level = log_level.parse::<Level>().unwrap_or(Level::INFO);
    let file = match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
    {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Failed to open log file {}: {}", log_file, e);
            return;
        }
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

/// Handle the config command - display current configuration
fn handle_config_command(cfg: &Config) {
    let (path_str, exists) = match config::get_config_path() {
        Some(path) => {
            let exists = path.exists();
            (path.display().to_string(), exists)
        }
        None => ("Unable to determine config path".to_string(), false),
    };

    let storage = cfg
        .storage_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "unavailable".to_string());

    println!("Configuration File: {} (Exists: {})", path_str, if exists { "yes" } else { "no" });
    println!();
    println!("Current Configuration:");
    println!("=====================");
    println!("log_level: {}", cfg.log_level);
    println!("log_file: {}", cfg.log_file);
    println!("persist_settings: {}", cfg.persist_settings);
    println!("storage_key: {}", cfg.storage_key);
    println!("storage_file: {}", storage);
    println!("initial_theme: {}", cfg.initial_theme);
    println!("initial_accent_color: {}", cfg.initial_accent_color);
    println!("motion_poll_interval: {} seconds", cfg.motion_poll_interval().as_secs());
}

/// Resolve log configuration from CLI args and config file
/// CLI arguments take precedence over config file
fn resolve_log_config<'a>(cli: &'a Cli, config: &'a Config) -> (&'a str, &'a str) {
    let log_level = if cli.log_level != DEFAULT_LOG_LEVEL {
        cli.log_level.as_str()
    } else {
        config.log_level.as_str()
    };

    let log_file = if cli.log_file != DEFAULT_LOG_FILE {
        cli.log_file.as_str()
    } else {
        config.log_file.as_str()
    };

    (log_level, log_file)
}

/// Apply the store-related CLI flags on top of the config file
fn apply_cli_overrides(cli: &Cli, config: &mut Config) {
    if cli.no_persist {
        config.persist_settings = false;
    }
    if let Some(key) = &cli.storage_key {
        config.storage_key = key.clone();
    }
}

/// Run the interactive switcher with the reduced-motion watcher in the background
fn run_tui_mode(config: &Config) -> anyhow::Result<()> {
    let mut store = commands::open_store(config)?;

    let (motion_tx, motion_rx) = mpsc::channel::<bool>(MOTION_CHANNEL_BUFFER_SIZE);
    let probe = Arc::new(ChainProbe::system());
    let interval = config.motion_poll_interval();
    tokio::spawn(async move {
        motion::watch_loop(probe, interval, motion_tx).await;
    });

    tui::run(&mut store, motion_rx)?;
    Ok(())
}

/// Execute a CLI command by routing it to the appropriate command handler
async fn execute_command(config: &Config, command: Commands) -> anyhow::Result<()> {
    let mut store = commands::open_store(config)?;
    commands::follow_system_motion(&mut store, &ChainProbe::system()).await;

    match command {
        Commands::Config => unreachable!("Config command should be handled before execute_command"),
        Commands::Show => commands::show::run(&store),
        Commands::Set { field, value } => commands::set::run(&mut store, &field, &value),
        Commands::Reset => commands::reset::run(&mut store),
        Commands::Css => commands::css::run(&store),
    }
}

#[tokio::main]
async fn main() {
    let mut config = config::read();
    let cli = Cli::parse();

    // Resolve and initialize logging
    let (log_level, log_file) = resolve_log_config(&cli, &config);
    if log_file != DEFAULT_LOG_FILE {
        init_logging(log_level, log_file);
    }

    apply_cli_overrides(&cli, &mut config);

    let Some(command) = cli.command else {
        if let Err(e) = run_tui_mode(&config) {
            eprintln!("Error running TUI: {:#}", e);
            std::process::exit(1);
        }
        return;
    };

    if let Commands::Config = command {
        handle_config_command(&config);
        return;
    }

    if let Err(e) = execute_command(&config, command).await {
        eprintln!("Error: {:#}", e);
        tracing::error!("Command failed: {:#}", e);
        std::process::exit(1);
    }
}
