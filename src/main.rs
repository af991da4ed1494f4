use clap::{Parser, Subcommand};
use rink_api::Client;
use rinkside::data_provider::RinkDataProvider;
use rinkside::{commands, config, tui};
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

// Default Configuration Constants
/// Default log level when not specified
const DEFAULT_LOG_LEVEL: &str = "info";

/// Default log file path (no logging to file)
const DEFAULT_LOG_FILE: &str = "/dev/null";

#[derive(Parser)]
#[command(name = "rinkside")]
#[command(
    about = "Live hockey scoreboard for the terminal",
    long_about = "Live hockey scoreboard for the terminal\n\nIf no command is specified, the program starts in interactive mode."
)]
struct Cli {
    /// Set log level (trace, debug, info, warn, error)
    #[arg(short = 'L', long, global = true, default_value = DEFAULT_LOG_LEVEL)]
    log_level: String,

    /// Log file path (default: /dev/null for no logging)
    #[arg(short = 'F', long, global = true, default_value = DEFAULT_LOG_FILE)]
    log_file: String,

    /// Use deterministic mock data instead of the backend
    #[cfg(feature = "development")]
    #[arg(long, global = true)]
    mock: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Display scores for a day's games
    Scores {
        /// Date in YYYY-MM-DD format (optional, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Display a single game's score and clock
    Game {
        /// Game ID (e.g., 2026020555)
        game_id: i64,
    },
    /// Display current configuration
    Config,
}

fn create_client(config: &config::Config) -> Client {
    // The env var wins; Client::new reads it. Otherwise fall back to the
    // config file's base URL when one is set.
    if std::env::var("RINKSIDE_API_URL").is_err() {
        if let Some(url) = &config.api_base_url {
            return Client::with_base_url(url.clone());
        }
    }
    match Client::new() {
        Ok(client) => client,
        Err(e) => {
            let error_msg = format!("Failed to create API client: {}", e);
            tracing::error!("{}", error_msg);
            eprintln!("{}", error_msg);
            std::process::exit(1);
        }
    }
}

fn init_logging(log_level: &str, log_file: &str) {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
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
fn handle_config_command() {
    let cfg = config::read();

    let (path_str, exists) = match config::get_config_path() {
        Some(path) => {
            let exists = path.exists();
            (path.display().to_string(), exists)
        }
        None => ("Unable to determine config path".to_string(), false),
    };

    println!(
        "Configuration File: {} (Exists: {})",
        path_str,
        if exists { "yes" } else { "no" }
    );
    println!();
    println!("Current Configuration:");
    println!("=====================");
    println!("log_level: {}", cfg.log_level);
    println!("log_file: {}", cfg.log_file);
    println!(
        "api_base_url: {}",
        cfg.api_base_url.as_deref().unwrap_or("(default)")
    );
    println!("live_refresh_interval: {} seconds", cfg.live_refresh_interval);
    println!(
        "schedule_refresh_interval: {} seconds",
        cfg.schedule_refresh_interval
    );
    println!("time_format: {}", cfg.time_format);
    println!("use_unicode: {}", cfg.use_unicode);
    println!();
    println!("[theme]");
    println!("selection_fg: {:?}", cfg.theme.selection_fg);
    println!("live_fg: {:?}", cfg.theme.live_fg);
    println!("intermission_fg: {:?}", cfg.theme.intermission_fg);
    println!("scheduled_fg: {:?}", cfg.theme.scheduled_fg);
    println!("final_fg: {:?}", cfg.theme.final_fg);
}

/// Resolve log configuration from CLI args and config file
/// CLI arguments take precedence over config file
fn resolve_log_config<'a>(cli: &'a Cli, config: &'a config::Config) -> (&'a str, &'a str) {
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

fn build_provider(cli: &Cli, config: &config::Config) -> Arc<dyn RinkDataProvider> {
    #[cfg(feature = "development")]
    if cli.mock {
        return Arc::new(rinkside::dev::mock_client::MockClient::new());
    }
    #[cfg(not(feature = "development"))]
    let _ = cli;
    Arc::new(create_client(config))
}

/// Execute a CLI command by routing it to the appropriate command handler
async fn execute_command(client: &dyn RinkDataProvider, command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Config => unreachable!("Config command should be handled before execute_command"),
        Commands::Scores { date } => commands::scores::run(client, date).await,
        Commands::Game { game_id } => commands::game::run(client, game_id).await,
    }
}

#[tokio::main]
async fn main() {
    let config = config::read();
    let mut cli = Cli::parse();

    let (log_level, log_file) = resolve_log_config(&cli, &config);
    if log_file != DEFAULT_LOG_FILE {
        init_logging(log_level, log_file);
    }

    // If no subcommand, run the TUI
    if cli.command.is_none() {
        let provider = build_provider(&cli, &config);
        if let Err(e) = tui::run(provider, config).await {
            eprintln!("Error running TUI: {}", e);
            std::process::exit(1);
        }
        return;
    }

    let command = cli.command.take().unwrap();

    // Handle Config command separately (doesn't need a client)
    if let Commands::Config = command {
        handle_config_command();
        return;
    }

    let provider = build_provider(&cli, &config);
    if let Err(e) = execute_command(provider.as_ref(), command).await {
        eprintln!("Error: {:#}", e);
        tracing::error!("Command failed: {:#}", e);
        std::process::exit(1);
    }
}
