//! # CLI Support
//!
//! `ad-contract run` executes the suite against the configured service and
//! prints a report; `ad-contract list` prints the scenario names.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};

use crate::config::HarnessConfig;
use crate::error::HarnessError;
use crate::testing::{RunReport, Scenario};

#[derive(Parser, Debug)]
#[command(name = "ad-contract", version, about = "Contract tests for the ad listing service")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run scenarios and report the results.
    Run(RunArgs),
    /// List scenario names and what they check.
    List,
}

#[derive(clap::Args, Debug, Default)]
pub struct RunArgs {
    /// Service base URL (overrides `AD_CONTRACT_BASE_URL`).
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,
    /// Seller-id seed for a reproducible run (overrides `AD_CONTRACT_SEED`).
    #[arg(long)]
    pub seed: Option<u64>,
    /// Request timeout in seconds (overrides `AD_CONTRACT_TIMEOUT_SEC`).
    #[arg(long, value_name = "SECS")]
    pub timeout_secs: Option<u64>,
    /// Run only the named scenario; repeatable.
    #[arg(long = "scenario", value_name = "NAME")]
    pub scenarios: Vec<String>,
    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,
    /// Also write the JSON report to this file.
    #[arg(long, value_name = "PATH")]
    pub report: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl RunArgs {
    /// Layer the flags over `base`, which usually comes from the environment.
    pub fn apply_to(&self, mut base: HarnessConfig) -> Result<HarnessConfig, HarnessError> {
        if let Some(base_url) = &self.base_url {
            base.base_url = base_url.clone();
        }
        if let Some(seed) = self.seed {
            base.seed = Some(seed);
        }
        if let Some(secs) = self.timeout_secs {
            if secs == 0 {
                return Err(HarnessError::Config(
                    "--timeout-secs must be greater than zero".to_string(),
                ));
            }
            base.timeout = Some(Duration::from_secs(secs));
        }
        Ok(base)
    }

    /// The whole suite when no `--scenario` is given.
    pub fn selected_scenarios(&self) -> Result<Vec<Scenario>, HarnessError> {
        if self.scenarios.is_empty() {
            return Ok(Scenario::all());
        }
        self.scenarios
            .iter()
            .map(|name| {
                Scenario::from_name(name)
                    .ok_or_else(|| HarnessError::Config(format!("unknown scenario `{name}`")))
            })
            .collect()
    }
}

pub fn render(report: &RunReport, format: OutputFormat) -> Result<String, HarnessError> {
    match format {
        OutputFormat::Text => Ok(report.render_text()),
        OutputFormat::Json => render_json(report),
    }
}

pub fn render_json(report: &RunReport) -> Result<String, HarnessError> {
    serde_json::to_string_pretty(report).map_err(|err| HarnessError::encode("run report", err))
}

pub fn list_scenarios() -> String {
    Scenario::all()
        .iter()
        .map(|scenario| format!("{:<45} {}\n", scenario.name(), scenario.description()))
        .collect()
}
