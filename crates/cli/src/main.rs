//! project-card CLI entry point.
//!
//! This binary is the composition root. Responsibilities:
//!
//! 1. **Parse configuration**: flags, or the `INPUT_*` environment variables
//!    a GitHub Actions runner provides, validated into [`config::Settings`].
//! 2. **Wire observability**: `tracing-subscriber` with a text or JSON layer
//!    and an optional OpenTelemetry OTLP exporter. All `tracing` spans and
//!    events emitted by every crate in the workspace flow through it.
//! 3. **Construct infrastructure**: a [`github::GithubGateway`] injected into
//!    a [`board::Reconciler`].
//! 4. **Run once and report**: the card id goes to stdout and the `card-id`
//!    action output; a failure becomes an `::error::` command and exit code 1.

mod config;
mod output;
mod telemetry;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use board::{ReconcileOutcome, Reconciler, RunId};
use clap::Parser;
use github::GithubGateway;
use tracing::{error, info, info_span, Instrument};

use config::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let telemetry = match telemetry::init(cli.log_format) {
        Ok(telemetry) => telemetry,
        Err(err) => {
            eprintln!("{}", output::error_command(&format!("{err:#}")));
            return ExitCode::FAILURE;
        }
    };

    let run_id = RunId::new_random();
    let result = run(cli).instrument(info_span!("run", %run_id)).await;

    let code = match result {
        Ok(outcome) => {
            info!(
                card_id = %outcome.card_id,
                transition = %outcome.transition,
                content_kind = %outcome.content_kind,
                "reconciliation finished"
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            let message = format!("{err:#}");
            error!(error = %message, "reconciliation failed");
            println!("{}", output::error_command(&message));
            ExitCode::FAILURE
        }
    };

    telemetry.shutdown();
    code
}

async fn run(cli: Cli) -> Result<ReconcileOutcome> {
    let settings = cli.into_settings(|name| std::env::var(name).ok())?;
    info!(
        strategy = ?settings.strategy,
        owner_fallback = ?settings.owner_fallback,
        api_url = %settings.github.api_url,
        "starting reconciliation"
    );

    let gateway = GithubGateway::new(&settings.github).context("failed to construct GitHub client")?;
    let reconciler = Reconciler::new(gateway, settings.strategy, settings.owner_fallback);
    let outcome = reconciler.reconcile(&settings.request).await?;

    let output_file = std::env::var_os("GITHUB_OUTPUT").map(PathBuf::from);
    output::publish_card_id(outcome.card_id, output_file.as_deref())
        .context("failed to write the card-id output")?;

    Ok(outcome)
}
