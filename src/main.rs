mod api;
mod cli_messages;
mod config;
mod consts;
mod dashboard;
mod document;
mod error_classifier;
mod events;
mod logging;
mod panels;
mod render;
mod selectors;
mod session;

use crate::config::{Config, get_config_path};
use crate::session::{FilterOverrides, run_headless_mode, run_snapshot, setup_session};
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::error::Error;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
/// Real-time analytics dashboard for the e-commerce API
struct Args {
    /// Command to execute
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Poll the API and keep the dashboard page up to date until Ctrl+C
    Start {
        #[command(flatten)]
        dashboard: DashboardArgs,
    },
    /// Refresh every panel once and print or write the page
    Snapshot {
        #[command(flatten)]
        dashboard: DashboardArgs,
    },
    /// Write a configuration file with default values
    InitConfig {
        /// Where to write the file. Defaults to ~/.analytics-dashboard/config.json
        #[arg(long, value_name = "PATH")]
        config: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(ClapArgs, Debug)]
struct DashboardArgs {
    /// Configuration file. Defaults to ~/.analytics-dashboard/config.json when present
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Base URL of the analytics API
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,

    /// Interval between refreshes of each panel, in milliseconds
    #[arg(long, value_name = "MS")]
    interval_ms: Option<u64>,

    /// Number of recent customers to show
    #[arg(long)]
    limit: Option<u32>,

    /// Upper bound on each request, in seconds
    #[arg(long, value_name = "SECS")]
    timeout_secs: Option<u64>,

    /// Write the rendered page to this file
    #[arg(long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// New-products period: hourly, daily or 5min
    #[arg(long)]
    period: Option<String>,

    /// Product subcategory key: 1, 2 or 3
    #[arg(long)]
    category: Option<String>,

    /// Country for the geographic distribution, as the API names it
    #[arg(long)]
    country: Option<String>,
}

impl DashboardArgs {
    /// Load the configuration file, then apply command-line overrides.
    fn resolve_config(&self) -> Result<Config, Box<dyn Error>> {
        let mut config = match &self.config {
            Some(path) => Config::load_from_file(path)
                .map_err(|e| format!("Failed to load config {}: {}", path.display(), e))?,
            None => {
                let default_path = get_config_path()?;
                if default_path.exists() {
                    Config::load_from_file(&default_path).map_err(|e| {
                        format!("Failed to load config {}: {}", default_path.display(), e)
                    })?
                } else {
                    Config::default()
                }
            }
        };

        if let Some(api_url) = &self.api_url {
            config.api_base_url = api_url.clone();
        }
        if let Some(interval_ms) = self.interval_ms {
            config.refresh_interval_ms = interval_ms;
        }
        if let Some(limit) = self.limit {
            config.recent_customers_limit = limit;
        }
        if self.timeout_secs.is_some() {
            config.request_timeout_secs = self.timeout_secs;
        }
        if self.output.is_some() {
            config.output_path = self.output.clone();
        }

        config.validate()?;
        Ok(config)
    }

    fn filter_overrides(&self) -> FilterOverrides {
        FilterOverrides {
            period: self.period.clone(),
            category: self.category.clone(),
            country: self.country.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    logging::init_max_level();

    let args = Args::parse();
    match args.command {
        Command::Start { dashboard } => {
            let config = dashboard.resolve_config()?;
            let session = setup_session(&config, &dashboard.filter_overrides())?;
            if session.output_path.is_none() {
                print_cmd_warn!(
                    "No output file",
                    "Panel events will be logged but the page is not written. Use --output to keep a live copy."
                );
            }
            run_headless_mode(session).await
        }
        Command::Snapshot { dashboard } => {
            let config = dashboard.resolve_config()?;
            let session = setup_session(&config, &dashboard.filter_overrides())?;
            run_snapshot(session).await
        }
        Command::InitConfig { config, force } => {
            let path = match config {
                Some(path) => path,
                None => get_config_path()?,
            };
            if path.exists() && !force {
                print_cmd_error!(
                    "Config already exists",
                    &format!("{} (use --force to overwrite)", path.display())
                );
                return Err(Box::from("refusing to overwrite existing config"));
            }
            Config::default()
                .save(&path)
                .map_err(|e| format!("Failed to save config: {}", e))?;
            print_cmd_info!("Config written", "{}", path.display());
            Ok(())
        }
    }
}
