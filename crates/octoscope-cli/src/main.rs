//! octoscope - GitHub profile dashboard
//!
//! Usage:
//!   octoscope dashboard [--account <ID>]   Interactive terminal dashboard
//!   octoscope show <ID> [--json]           Print a one-shot report
//!   octoscope init-config [--force]        Write the default config file

mod report;

use anyhow::{bail, Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use octoscope_client::{load_profile, GitHubClient};
use octoscope_core::{DashboardPresenter, DashboardView, ErrorView, OctoscopeConfig};
use report::{JsonReport, TextReport};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::info;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "octoscope")]
#[command(author, version, about = "GitHub profile dashboard for the terminal")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file (defaults to ~/.config/octoscope/config.toml)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override the API base URL
    #[arg(long, global = true, value_name = "URL")]
    api_url: Option<String>,

    /// Write logs to this file (the dashboard discards logs otherwise)
    #[arg(long, global = true, value_name = "FILE")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the interactive dashboard
    Dashboard {
        /// Start with a search for this account
        #[arg(short, long)]
        account: Option<String>,
    },

    /// Fetch an account and print its dashboard as a report
    Show {
        /// Account name
        account: String,

        /// Print the view model as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write the default configuration file
    InitConfig {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Where log output goes for a given command
enum LogTarget {
    Stderr,
    File(PathBuf),
    Discard,
}

fn log_target(command: &Commands, log_file: Option<PathBuf>) -> LogTarget {
    match (log_file, command) {
        (Some(path), _) => LogTarget::File(path),
        // The alternate screen must not be written to
        (None, Commands::Dashboard { .. }) => LogTarget::Discard,
        (None, _) => LogTarget::Stderr,
    }
}

fn init_logging(verbose: bool, target: LogTarget) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let writer = match target {
        LogTarget::Stderr => BoxMakeWriter::new(io::stderr),
        LogTarget::Discard => BoxMakeWriter::new(io::sink),
        LogTarget::File(path) => {
            let file = File::create(&path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            BoxMakeWriter::new(Mutex::new(file))
        }
    };

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(writer)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn config_path(explicit: Option<PathBuf>) -> Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path),
        None => OctoscopeConfig::default_path()
            .context("Cannot locate a config directory; pass --config"),
    }
}

fn load_config(explicit: Option<PathBuf>, api_url: Option<String>) -> Result<OctoscopeConfig> {
    let mut config = match config_path(explicit) {
        Ok(path) => OctoscopeConfig::load_or_default(&path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        Err(_) => OctoscopeConfig::default(),
    };
    if let Some(url) = api_url {
        config.api.base_url = url;
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, log_target(&cli.command, cli.log_file.clone()))?;

    match cli.command {
        Commands::InitConfig { force } => cmd_init_config(&config_path(cli.config)?, force),
        Commands::Dashboard { account } => {
            let config = load_config(cli.config, cli.api_url)?;
            cmd_dashboard(config, account).await
        }
        Commands::Show { account, json } => {
            let config = load_config(cli.config, cli.api_url)?;
            cmd_show(config, &account, json).await
        }
    }
}

fn cmd_init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }
    OctoscopeConfig::write_default(path)
        .with_context(|| format!("Failed to write config to {}", path.display()))?;
    println!("Wrote default configuration to {}", path.display());
    Ok(())
}

async fn cmd_dashboard(config: OctoscopeConfig, account: Option<String>) -> Result<()> {
    let client = GitHubClient::new(&config.api).context("Failed to create API client")?;
    octoscope_dashboard::run(config.dashboard, Arc::new(client), account)
        .await
        .context("Dashboard failed")?;
    Ok(())
}

async fn cmd_show(config: OctoscopeConfig, account: &str, json: bool) -> Result<()> {
    let client = GitHubClient::new(&config.api).context("Failed to create API client")?;
    let account = account.trim();
    if account.is_empty() {
        bail!("Account name must not be empty");
    }

    let result = load_profile(&client, account).await;

    let stdout = io::stdout();
    let mut presenter: Box<dyn DashboardPresenter> = if json {
        Box::new(JsonReport::new(stdout.lock()))
    } else {
        Box::new(TextReport::new(stdout.lock()))
    };

    match result {
        Ok(snapshot) => {
            let view = DashboardView::build(&snapshot, &Local::now());
            presenter.present(&view).context("Failed to write report")?;
            info!("Reported {} projects for {}", snapshot.projects.len(), account);
            Ok(())
        }
        Err(e) => {
            presenter
                .present_error(&ErrorView::classify(&e, account))
                .context("Failed to write report")?;
            Err::<(), _>(e).with_context(|| format!("Search for {} failed", account))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_show_with_global_flags() {
        let cli = Cli::parse_from([
            "octoscope",
            "show",
            "octocat",
            "--json",
            "--api-url",
            "http://localhost:9999",
            "-v",
        ]);
        assert!(cli.verbose);
        assert_eq!(cli.api_url.as_deref(), Some("http://localhost:9999"));
        match cli.command {
            Commands::Show { account, json } => {
                assert_eq!(account, "octocat");
                assert!(json);
            }
            _ => panic!("expected show"),
        }
    }

    #[test]
    fn test_dashboard_logs_are_discarded_by_default() {
        let command = Commands::Dashboard { account: None };
        assert!(matches!(log_target(&command, None), LogTarget::Discard));
        assert!(matches!(
            log_target(&command, Some(PathBuf::from("octoscope.log"))),
            LogTarget::File(_)
        ));

        let show = Commands::Show {
            account: "octocat".to_string(),
            json: false,
        };
        assert!(matches!(log_target(&show, None), LogTarget::Stderr));
    }

    #[test]
    fn test_load_config_applies_api_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[api]\nbase_url = \"https://ghe.example.com/api/v3\"\n").unwrap();

        let config = load_config(Some(path.clone()), None).unwrap();
        assert_eq!(config.api.base_url, "https://ghe.example.com/api/v3");

        let config = load_config(Some(path), Some("http://localhost:1".to_string())).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:1");
    }

    #[test]
    fn test_init_config_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("octoscope").join("config.toml");

        cmd_init_config(&path, false).unwrap();
        assert!(cmd_init_config(&path, false).is_err());
        cmd_init_config(&path, true).unwrap();

        let config = OctoscopeConfig::load_or_default(&path).unwrap();
        assert_eq!(config, OctoscopeConfig::default());
    }
}
