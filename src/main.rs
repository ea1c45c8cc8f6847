use std::process::ExitCode;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use geocatalog::config::Config;
use geocatalog::domain::DomainError;
use geocatalog::infrastructure::AppState;
use geocatalog::services;

const USAGE: &str = "usage: geocatalog <inventory|harvest|all>";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Job {
    Inventory,
    Harvest,
    All,
}

fn parse_job(arg: Option<&str>) -> Option<Job> {
    match arg? {
        "inventory" | "list" => Some(Job::Inventory),
        "harvest" => Some(Job::Harvest),
        "all" => Some(Job::All),
        _ => None,
    }
}

async fn run(job: Job, config: &Config) -> Result<(), DomainError> {
    let state = AppState::connect(config).await?;

    if matches!(job, Job::Inventory | Job::All) {
        let summary = services::run_inventory(state.workspace.as_ref(), &config.inventory_csv).await?;
        tracing::info!(
            "Inventory complete: {} rows across {} dataset groups",
            summary.rows_written,
            summary.datasets
        );
    }

    if matches!(job, Job::Harvest | Job::All) {
        let summary = services::run_harvest(&config.harvest, state.metadata_store.as_ref()).await?;
        if !summary.degraded.is_empty() {
            tracing::warn!(
                "{} of {} feature classes had no readable metadata",
                summary.degraded.len(),
                summary.rows_written
            );
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "geocatalog=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    dotenvy::dotenv().ok();

    let args: Vec<String> = std::env::args().collect();
    let Some(job) = parse_job(args.get(1).map(String::as_str)) else {
        eprintln!("{}", USAGE);
        return ExitCode::from(2);
    };

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    tracing::info!("Program has started ({:?})", job);

    match run(job, &config).await {
        Ok(()) => {
            tracing::info!("Program end.");
            ExitCode::SUCCESS
        }
        // Connectivity problems skip the job without failing the process
        Err(e) if e.is_connectivity() => {
            tracing::error!("{}; job skipped", e);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
