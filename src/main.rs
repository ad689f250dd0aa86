use std::process::ExitCode;

use ad_contract::cli::{self, Cli, Command, OutputFormat, RunArgs};
use ad_contract::{HarnessConfig, HarnessError, ScenarioRunner};
use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::List => {
            print!("{}", cli::list_scenarios());
            ExitCode::SUCCESS
        }
        Command::Run(args) => match run(&args).await {
            Ok(true) => ExitCode::SUCCESS,
            Ok(false) => ExitCode::from(1),
            Err(err) => {
                error!("{err}");
                ExitCode::from(2)
            }
        },
    }
}

/// Returns whether every selected scenario passed.
async fn run(args: &RunArgs) -> Result<bool, HarnessError> {
    let config = args.apply_to(HarnessConfig::load()?)?;
    let scenarios = args.selected_scenarios()?;

    let mut runner = ScenarioRunner::new(&config)?;
    let report = runner.run_all(&scenarios).await;

    print!("{}", cli::render(&report, args.format)?);
    if args.format == OutputFormat::Json {
        println!();
    }
    if let Some(path) = &args.report {
        std::fs::write(path, cli::render_json(&report)?)?;
    }
    Ok(report.is_success())
}
