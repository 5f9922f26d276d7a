mod dashboard;
mod render;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{debug, info};

use carbontrack::config::Config;
use carbontrack::loaders::{load_carbon_metrics, FootprintLoader};
use carbontrack::services::{Aggregator, DashboardClient, EmissionsReport};
use carbontrack::types::SortKey;

/// Carbon footprint and personal finance dashboard metrics
#[derive(Parser)]
#[command(name = "carbontrack")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Config file (default: ~/.carbontrack/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Emissions by category with trend against the previous period
    Summary {
        /// Footprint file, directory or glob (JSON array or JSONL)
        input: String,

        /// Previous period total in kg CO2 (overrides config)
        #[arg(long, value_parser = parse_non_negative)]
        previous: Option<f64>,

        /// Monthly carbon metrics JSON (target, offset cost, score)
        #[arg(long, value_name = "FILE")]
        metrics: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List individual activities
    Activities {
        /// Footprint file, directory or glob (JSON array or JSONL)
        input: String,

        /// Sort order
        #[arg(long, value_enum, default_value_t = SortKey::Date)]
        sort: SortKey,

        /// Maximum rows to show (overrides config)
        #[arg(long)]
        limit: Option<usize>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Percentage change between two period totals
    Trend {
        #[arg(value_parser = parse_finite, allow_negative_numbers = true)]
        current: f64,
        #[arg(value_parser = parse_finite, allow_negative_numbers = true)]
        previous: f64,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Fetch and summarize the finance dashboard
    Dashboard {
        /// API base URL (overrides config)
        #[arg(long)]
        url: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write a default config file
    InitConfig,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        let config_path = match self.config {
            Some(path) => path,
            None => Config::default_path()?,
        };

        match self.command {
            Commands::InitConfig => {
                Config::write_default(&config_path)?;
                println!("Created {}", config_path.display());
            }
            Commands::Summary {
                input,
                previous,
                metrics,
                json,
            } => {
                let config = load_config(&config_path)?;
                let records = FootprintLoader::new(config.normalizer()).load(&input)?;
                let previous = previous.unwrap_or(config.previous_period_emissions);
                let mut report = EmissionsReport::build(&records, previous);
                if let Some(path) = metrics {
                    report = report.with_target(&load_carbon_metrics(&path)?);
                }
                if json {
                    println!("{}", serde_json::to_string_pretty(&report)?);
                } else {
                    print!("{}", render::summary(&report));
                }
            }
            Commands::Activities {
                input,
                sort,
                limit,
                json,
            } => {
                let config = load_config(&config_path)?;
                let records = FootprintLoader::new(config.normalizer()).load(&input)?;
                let mut sorted = Aggregator::sorted(&records, sort);
                sorted.truncate(limit.unwrap_or(config.activity_limit));
                if json {
                    println!("{}", serde_json::to_string_pretty(&sorted)?);
                } else {
                    print!("{}", render::activities(&sorted));
                }
            }
            Commands::Trend {
                current,
                previous,
                json,
            } => {
                let trend = Aggregator::trend(current, previous)?;
                if json {
                    println!("{}", serde_json::to_string_pretty(&trend)?);
                } else {
                    println!("{}", render::trend(&trend));
                }
            }
            Commands::Dashboard { url, json } => {
                let config = load_config(&config_path)?;
                let base_url = url.unwrap_or_else(|| config.api_base_url.clone());
                let client = DashboardClient::new(&base_url, config.request_timeout())?;
                let health = client
                    .health()
                    .with_context(|| format!("Dashboard API at {} is not reachable", base_url))?;
                info!(status = %health.status, "dashboard API is up");
                let payload = client
                    .fetch_dashboard()
                    .context("Could not load dashboard data; check the API and retry")?;
                let today = chrono::Local::now().date_naive();
                let view = dashboard::DashboardView::build(&payload, &config, today)?;
                if json {
                    println!("{}", serde_json::to_string_pretty(&view)?);
                } else {
                    print!("{}", render::dashboard(&view));
                }
            }
        }

        Ok(())
    }
}

fn parse_finite(value: &str) -> Result<f64, String> {
    let number: f64 = value
        .parse()
        .map_err(|_| format!("'{}' is not a number", value))?;
    if number.is_finite() {
        Ok(number)
    } else {
        Err(format!("'{}' is not a finite number", value))
    }
}

fn parse_non_negative(value: &str) -> Result<f64, String> {
    let number = parse_finite(value)?;
    if number >= 0.0 {
        Ok(number)
    } else {
        Err(format!("'{}' must not be negative", value))
    }
}

fn load_config(path: &Path) -> anyhow::Result<Config> {
    let config = Config::load_or_default(path)
        .with_context(|| format!("Failed to load config {}", path.display()))?;
    debug!(?config, "loaded config");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["carbontrack"]).is_err());
    }

    #[test]
    fn test_cli_parse_summary() {
        let cli = Cli::try_parse_from(["carbontrack", "summary", "data.json", "--json"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Summary {
                json: true,
                previous: None,
                ..
            }
        ));
    }

    #[test]
    fn test_cli_parse_activities_default_sort() {
        let cli = Cli::try_parse_from(["carbontrack", "activities", "data.json"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Activities {
                sort: SortKey::Date,
                limit: None,
                ..
            }
        ));
    }

    #[test]
    fn test_cli_parse_activities_sort_amount() {
        let cli = Cli::try_parse_from([
            "carbontrack",
            "activities",
            "data.json",
            "--sort",
            "amount",
            "--limit",
            "5",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Commands::Activities {
                sort: SortKey::Amount,
                limit: Some(5),
                ..
            }
        ));
    }

    #[test]
    fn test_cli_parse_trend() {
        let cli = Cli::try_parse_from(["carbontrack", "trend", "120", "100"]).unwrap();
        assert!(matches!(cli.command, Commands::Trend { json: false, .. }));
    }

    #[test]
    fn test_cli_trend_rejects_non_finite() {
        for args in [["120", "NaN"], ["inf", "100"], ["abc", "100"]] {
            let result = Cli::try_parse_from(["carbontrack", "trend", args[0], args[1]]);
            assert!(result.is_err(), "accepted {:?}", args);
        }
    }

    #[test]
    fn test_cli_trend_accepts_negative_totals() {
        let cli = Cli::try_parse_from(["carbontrack", "trend", "-5", "10"]).unwrap();
        assert!(matches!(cli.command, Commands::Trend { current, .. } if current == -5.0));
    }

    #[test]
    fn test_cli_summary_previous_validated() {
        for bad in ["NaN", "inf", "-1"] {
            let result = Cli::try_parse_from(["carbontrack", "summary", "data.json", "--previous", bad]);
            assert!(result.is_err(), "accepted --previous {}", bad);
        }

        let cli = Cli::try_parse_from([
            "carbontrack",
            "summary",
            "data.json",
            "--previous",
            "250",
            "--metrics",
            "metrics.json",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Commands::Summary { previous: Some(p), metrics: Some(_), .. } if p == 250.0
        ));
    }

    #[test]
    fn test_cli_parse_global_flags() {
        let cli = Cli::try_parse_from([
            "carbontrack",
            "dashboard",
            "-vv",
            "--config",
            "/tmp/c.toml",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/c.toml")));
    }
}
