use std::error::Error as StdError;

use clap::Parser;
use pr_labeler_cli::{config::Inputs, errors::Error, runner, workflow};
use pr_labeler_core::RunOutcome;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Name of the environment variable holding the log filter.
const LOG_FILTER_VARIABLE: &str = "PR_LABELER_LOG";

fn report_failure(e: &Error) {
    error!("Error: {e}");

    let mut source = e.source();
    while let Some(cause) = source {
        error!("Caused by: {cause}");
        source = cause.source();
    }

    println!("{}", workflow::error(&e.to_string()));
}

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(
            EnvFilter::try_from_env(LOG_FILTER_VARIABLE).unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let inputs = Inputs::parse();

    let validated = match inputs.validate() {
        Ok(v) => v,
        Err(e) => {
            report_failure(&e);
            std::process::exit(1);
        }
    };

    match runner::execute(&validated).await {
        Ok(summary) => {
            if summary.outcome == RunOutcome::BudgetExhausted {
                println!(
                    "{}",
                    workflow::warning(&format!(
                        "performed {} operations, exiting to avoid rate limit",
                        validated.settings.operations_per_run
                    ))
                );
            }
            info!(
                labeled = summary.pull_requests_labeled,
                operations = summary.operations_used,
                "Pull request labeler finished"
            );
            std::process::exit(0);
        }
        Err(e) => {
            report_failure(&e);
            std::process::exit(1);
        }
    }
}
