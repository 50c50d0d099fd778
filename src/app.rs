//! Balancing run orchestration
//!
//! Ties the pieces together: session strategy → balancing engine → transfer
//! workflow, with the browser session released on every way out.

use crate::config::BalanceConfig;
use crate::core::balancing::{plan_transfers, total_required};
use crate::dashboard::Dashboard;
use crate::driver::WebDriver;
use crate::io::Reporter;
use crate::strategy::{create_strategy, SessionStrategy};
use crate::types::{BalanceError, RunSummary};
use crate::workflow::TransferWorkflow;
use std::future::Future;
use std::io::Write;
use tracing::{error, info, warn};

/// Run one balancing pass and release the browser session afterwards
///
/// The driver is consumed: its session is quit whether the run succeeds,
/// fails, or is interrupted by `shutdown` completing first.
///
/// # Arguments
///
/// * `driver` - A connected browser session
/// * `config` - Validated run configuration
/// * `output` - Destination of the report lines
/// * `shutdown` - Completes when the user asks to stop (Ctrl-C in the binary)
///
/// # Errors
///
/// The error that ended the run. A failure to release the session is only
/// returned when the run itself succeeded; otherwise it is logged.
pub async fn run<D, F>(
    mut driver: D,
    config: &BalanceConfig,
    output: &mut dyn Write,
    shutdown: F,
) -> Result<RunSummary, BalanceError>
where
    D: WebDriver,
    F: Future<Output = ()>,
{
    let outcome = tokio::select! {
        result = balance(&mut driver, config, output) => result,
        _ = shutdown => {
            warn!("Interrupted, releasing browser session");
            Err(BalanceError::Interrupted)
        }
    };

    let released = driver.quit().await;

    match (outcome, released) {
        (Ok(summary), Ok(())) => Ok(summary),
        (Ok(_), Err(quit_error)) => Err(quit_error.into()),
        (Err(run_error), Ok(())) => Err(run_error),
        (Err(run_error), Err(quit_error)) => {
            error!(error = %quit_error, "Failed to release browser session");
            Err(run_error)
        }
    }
}

/// Open a session, plan, and carry out the plan
///
/// Does not release the browser session; use [`run`] for that.
pub async fn balance<D: WebDriver>(
    driver: &mut D,
    config: &BalanceConfig,
    output: &mut dyn Write,
) -> Result<RunSummary, BalanceError> {
    let mut reporter = Reporter::new(output, &config.codec);
    let mut dashboard = Dashboard::new(driver, &config.layout, config.wait, config.settle_delay);

    let strategy = create_strategy(config.variant);
    let session = strategy
        .open_session(&mut dashboard, &config.session, &config.codec, &mut reporter)
        .await?;

    let plan = plan_transfers(&session, config.target_amount_in_cents);
    let total_required_in_cents = total_required(&plan);
    let source = session.source_account();
    if total_required_in_cents > source.credit_in_cents() {
        warn!(
            source = source.name(),
            credit_in_cents = source.credit_in_cents(),
            total_required_in_cents,
            "Source account cannot cover all fillups"
        );
        reporter.insufficient_source(source, total_required_in_cents)?;
    }

    let workflow = TransferWorkflow::new(config.mode);
    let transferred = workflow.run(&mut dashboard, &plan, &mut reporter).await?;

    reporter.totals(total_required_in_cents, config.mode.is_dry_run())?;
    info!(
        planned = plan.len(),
        transferred = transferred.len(),
        dry_run = config.mode.is_dry_run(),
        "Balancing finished"
    );

    Ok(RunSummary {
        plan,
        transferred,
        total_required_in_cents,
        dry_run: config.mode.is_dry_run(),
    })
}
