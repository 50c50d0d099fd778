//! Balancing run integration tests
//!
//! Each test drives a complete run through `app::run` against the in-memory
//! dashboard in `common`, then checks the report lines, the returned summary
//! and what was done to the page. Time is paused, so settle delays and wait
//! timeouts elapse instantly.

mod common;

#[cfg(test)]
mod tests {
    use crate::common::{Call, FakeDashboard};
    use std::future::{pending, ready};
    use std::time::Duration;
    use uberspace_balancer::app;
    use uberspace_balancer::cli::DashboardVariant;
    use uberspace_balancer::driver::{DriverError, WaitPolicy};
    use uberspace_balancer::{
        BalanceConfig, BalanceError, Cents, RunMode, RunSummary, SessionSettings,
    };

    fn config(source: &str, target: Cents, excluded: &[&str]) -> BalanceConfig {
        let excluded = excluded.iter().map(|name| name.to_string()).collect();
        BalanceConfig::new(SessionSettings::new(source, excluded), target).with_wait(
            WaitPolicy::new(Duration::from_secs(5), Duration::from_millis(100)),
        )
    }

    /// Run to completion and return the result with everything written to stdout
    async fn run_balancer(
        dashboard: &mut FakeDashboard,
        config: &BalanceConfig,
    ) -> (Result<RunSummary, BalanceError>, String) {
        let mut output = Vec::new();
        let result = app::run(dashboard, config, &mut output, pending::<()>()).await;
        (result, String::from_utf8(output).unwrap())
    }

    #[tokio::test(start_paused = true)]
    async fn test_dry_run_reports_plan_without_transfers() {
        let mut dashboard =
            FakeDashboard::new(&[("main", 10000), ("web", 300), ("blog", 1500)], "main");
        let config = config("main", 1000, &[]);

        let (result, output) = run_balancer(&mut dashboard, &config).await;

        let summary = result.unwrap();
        assert!(summary.dry_run);
        assert!(summary.transferred.is_empty());
        assert_eq!(summary.total_required_in_cents, 700);
        assert_eq!(summary.plan.len(), 2);

        let expected = [
            "Detected source account main with a balance of 100,00 €",
            "Detected selected account main",
            "Detected 2 possible target accounts.",
            "Account web needs fillup of 7,00 €, current amount: 3,00 €",
            "Account blog does not need fillup, current amount: 15,00 €",
            "Total fillup required: 7,00 €",
            "Dry run: no money was transferred. Pass --execute to fill up accounts.",
        ];
        assert_eq!(output.lines().collect::<Vec<_>>(), expected);

        assert!(!dashboard.touched_transfer_form());
        assert!(dashboard.submissions.is_empty());
        assert_eq!(dashboard.credit_of("web"), Some(300));
        assert_eq!(dashboard.quit_count(), 1);
        assert_eq!(dashboard.calls.last(), Some(&Call::Quit));
    }

    #[tokio::test(start_paused = true)]
    async fn test_execute_fills_up_accounts_in_table_order() {
        let mut dashboard =
            FakeDashboard::new(&[("main", 10000), ("web", 300), ("blog", -50)], "main");
        let config = config("main", 1200, &[]).with_mode(RunMode::Execute);

        let (result, output) = run_balancer(&mut dashboard, &config).await;

        let summary = result.unwrap();
        assert!(!summary.dry_run);
        assert_eq!(summary.transferred, vec!["web", "blog"]);
        assert_eq!(summary.total_required_in_cents, 2150);

        assert_eq!(
            dashboard.submissions,
            vec![
                ("web".to_string(), "9".to_string()),
                ("blog".to_string(), "12.5".to_string()),
            ]
        );
        assert_eq!(dashboard.credit_of("web"), Some(1200));
        assert_eq!(dashboard.credit_of("blog"), Some(1200));
        assert_eq!(dashboard.credit_of("main"), Some(7850));

        assert!(output.contains("Account blog needs fillup of 12,50 €, current amount: -0,50 €"));
        assert!(output.contains("Transferred 9,00 € to account web"));
        assert!(output.contains("Transferred 12,50 € to account blog"));
        assert!(output.contains("Total fillup required: 21,50 €"));
        assert!(!output.contains("Dry run"));
        assert_eq!(dashboard.quit_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_execute_skips_accounts_at_target() {
        let mut dashboard =
            FakeDashboard::new(&[("main", 10000), ("web", 1000), ("blog", 200)], "main");
        let config = config("main", 1000, &[]).with_mode(RunMode::Execute);

        let (result, _) = run_balancer(&mut dashboard, &config).await;

        assert_eq!(result.unwrap().transferred, vec!["blog"]);
        assert_eq!(
            dashboard.submissions,
            vec![("blog".to_string(), "8".to_string())]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_unconfirmed_transfer_aborts_run() {
        let mut dashboard =
            FakeDashboard::new(&[("main", 10000), ("web", 300), ("blog", 0)], "main");
        dashboard.rejected.push("web".to_string());
        let config = config("main", 1000, &[]).with_mode(RunMode::Execute);

        let (result, output) = run_balancer(&mut dashboard, &config).await;

        assert!(matches!(
            result,
            Err(BalanceError::TransferConfirmation { ref account, .. }) if account == "web"
        ));
        assert_eq!(dashboard.submissions.len(), 1);
        assert_eq!(dashboard.credit_of("blog"), Some(0));
        assert!(!output.contains("Transferred"));
        assert!(!output.contains("Account blog"));
        assert_eq!(dashboard.quit_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_disabled_submit_button_aborts_run() {
        let mut dashboard =
            FakeDashboard::new(&[("main", 10000), ("web", 300), ("blog", 0)], "main");
        dashboard.submit_disabled = true;
        let config = config("main", 1000, &[]).with_mode(RunMode::Execute);

        let (result, output) = run_balancer(&mut dashboard, &config).await;

        assert!(matches!(
            result,
            Err(BalanceError::TransferConfirmation { ref account, .. }) if account == "web"
        ));
        assert!(dashboard.submissions.is_empty());
        assert!(!dashboard
            .calls
            .contains(&Call::SendKeys("field:target".to_string(), "blog".to_string())));
        assert_eq!(dashboard.credit_of("web"), Some(300));
        assert!(!output.contains("Account blog"));
        assert_eq!(dashboard.quit_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_browser_failure_while_confirming_stays_a_driver_error() {
        let mut dashboard =
            FakeDashboard::new(&[("main", 10000), ("web", 300), ("blog", 0)], "main");
        let lost = DriverError::Protocol {
            error: "invalid session id".to_string(),
            message: "browser crashed".to_string(),
        };
        dashboard.status_error = Some(lost.clone());
        let config = config("main", 1000, &[]).with_mode(RunMode::Execute);

        let (result, _) = run_balancer(&mut dashboard, &config).await;

        assert_eq!(result.unwrap_err(), BalanceError::Driver(lost));
        assert_eq!(
            dashboard.submissions,
            vec![("web".to_string(), "7".to_string())]
        );
        assert_eq!(dashboard.quit_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_oversized_balance_is_a_parse_error() {
        let mut dashboard = FakeDashboard::new(&[("main", 10000), ("web", 300)], "main");
        dashboard.credit_texts.insert(
            "web".to_string(),
            "9.999.999.999.999.999.999.999.999.999\u{a0}€".to_string(),
        );
        let config = config("main", 1000, &[]);

        let (result, _) = run_balancer(&mut dashboard, &config).await;

        assert!(matches!(result, Err(BalanceError::Parse { .. })));
        assert_eq!(dashboard.quit_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_switches_to_source_account() {
        let mut dashboard = FakeDashboard::new(&[("main", 10000), ("web", 300)], "web");
        let config = config("main", 1000, &[]);

        let (result, output) = run_balancer(&mut dashboard, &config).await;

        let summary = result.unwrap();
        assert_eq!(summary.plan.len(), 1);
        assert_eq!(dashboard.selected, vec!["main"]);

        let switch_url = dashboard.layout.switch_account_url("main").unwrap();
        assert_eq!(
            &dashboard.calls[..4],
            &[
                Call::Goto(dashboard.layout.dashboard_url()),
                Call::Click("unfold".to_string()),
                Call::Goto(switch_url),
                Call::Click("unfold".to_string()),
            ]
        );

        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines[1], "Detected selected account web");
        assert_eq!(lines[3], "Switching to source account...");
        assert_eq!(lines[5], "Detected selected account main");
    }

    #[tokio::test(start_paused = true)]
    async fn test_ignored_switch_is_a_consistency_error() {
        let mut dashboard = FakeDashboard::new(&[("main", 10000), ("web", 300)], "web");
        dashboard.honor_switch = false;
        let config = config("main", 1000, &[]).with_mode(RunMode::Execute);

        let (result, _) = run_balancer(&mut dashboard, &config).await;

        assert_eq!(
            result.unwrap_err(),
            BalanceError::Consistency {
                expected: "main".to_string(),
                actual: "web".to_string(),
            }
        );
        assert!(!dashboard.touched_transfer_form());
        assert_eq!(dashboard.quit_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_two_selected_accounts_abort_before_transfers() {
        let mut dashboard =
            FakeDashboard::new(&[("main", 10000), ("web", 300), ("blog", 0)], "main");
        dashboard.selected.push("web".to_string());
        let config = config("main", 1000, &[]).with_mode(RunMode::Execute);

        let (result, _) = run_balancer(&mut dashboard, &config).await;

        assert_eq!(
            result.unwrap_err(),
            BalanceError::AmbiguousState {
                first: "main".to_string(),
                second: "web".to_string(),
            }
        );
        assert!(dashboard.submissions.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_missing_selection_marker() {
        let mut dashboard = FakeDashboard::new(&[("main", 10000), ("web", 300)], "");
        let config = config("main", 1000, &[]);

        let (result, _) = run_balancer(&mut dashboard, &config).await;

        assert_eq!(result.unwrap_err(), BalanceError::SelectedNotFound);
    }

    #[tokio::test(start_paused = true)]
    async fn test_excluding_every_target_is_an_error() {
        let mut dashboard = FakeDashboard::new(&[("main", 10000), ("Web", 300)], "main");
        let config = config("main", 1000, &["web"]);

        let (result, _) = run_balancer(&mut dashboard, &config).await;

        assert_eq!(result.unwrap_err(), BalanceError::EmptyTargetSet);
    }

    #[tokio::test(start_paused = true)]
    async fn test_excluded_account_is_not_reported() {
        let mut dashboard =
            FakeDashboard::new(&[("main", 10000), ("web", 300), ("blog", 0)], "main");
        let config = config("main", 1000, &["BLOG"]).with_mode(RunMode::Execute);

        let (result, output) = run_balancer(&mut dashboard, &config).await;

        assert_eq!(result.unwrap().transferred, vec!["web"]);
        assert!(output.contains("Detected 1 possible target accounts."));
        assert!(!output.contains("blog"));
        assert_eq!(dashboard.credit_of("blog"), Some(0));
    }

    #[tokio::test(start_paused = true)]
    async fn test_unknown_source_account() {
        let mut dashboard = FakeDashboard::new(&[("main", 10000), ("web", 300)], "main");
        let config = config("Main", 1000, &[]);

        let (result, _) = run_balancer(&mut dashboard, &config).await;

        assert_eq!(
            result.unwrap_err(),
            BalanceError::SourceNotFound {
                name: "Main".to_string()
            }
        );
        assert_eq!(dashboard.quit_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unparseable_balance_aborts_run() {
        let mut dashboard = FakeDashboard::new(&[("main", 10000), ("web", 300)], "main");
        dashboard
            .credit_texts
            .insert("web".to_string(), "zwölf Euro".to_string());
        let config = config("main", 1000, &[]);

        let (result, output) = run_balancer(&mut dashboard, &config).await;

        assert!(matches!(result, Err(BalanceError::Parse { .. })));
        assert!(output.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_header_row_is_skipped() {
        let mut dashboard = FakeDashboard::new(&[("main", 10000), ("web", 300)], "main");
        dashboard.header_row = true;
        let config = config("main", 1000, &[]);

        let (result, _) = run_balancer(&mut dashboard, &config).await;

        let summary = result.unwrap();
        assert_eq!(summary.plan.len(), 1);
        assert_eq!(summary.plan[0].account.name(), "web");
    }

    #[tokio::test(start_paused = true)]
    async fn test_insufficient_source_funds_only_warn() {
        let mut dashboard = FakeDashboard::new(&[("main", 500), ("web", 0)], "main");
        let config = config("main", 1000, &[]);

        let (result, output) = run_balancer(&mut dashboard, &config).await;

        assert!(result.is_ok());
        assert!(output.contains("Warning: source account main holds 5,00 €, but 10,00 € are required"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_direct_variant_switches_without_unfolding() {
        let mut dashboard = FakeDashboard::new(&[("main", 10000), ("web", 300)], "");
        dashboard.requires_unfold = false;
        let config = config("main", 1000, &[]).with_variant(DashboardVariant::Direct);

        let (result, output) = run_balancer(&mut dashboard, &config).await;

        let summary = result.unwrap();
        assert_eq!(summary.plan.len(), 1);

        let switch_url = dashboard.layout.switch_account_url("main").unwrap();
        assert_eq!(dashboard.calls[0], Call::Goto(switch_url));
        assert_eq!(dashboard.calls[1], Call::Goto(dashboard.layout.dashboard_url()));
        assert!(!dashboard.calls.contains(&Call::Click("unfold".to_string())));

        assert!(output.starts_with("Switching to source account...\n"));
        assert!(!output.contains("Detected selected account"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_interrupt_releases_session() {
        let mut dashboard = FakeDashboard::new(&[("main", 10000), ("web", 300)], "main");
        let config = config("main", 1000, &[]).with_mode(RunMode::Execute);
        let mut output = Vec::new();

        let result = app::run(&mut dashboard, &config, &mut output, ready(())).await;

        assert_eq!(result.unwrap_err(), BalanceError::Interrupted);
        assert!(dashboard.submissions.is_empty());
        assert_eq!(dashboard.quit_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_release_after_success_is_reported() {
        let mut dashboard = FakeDashboard::new(&[("main", 10000), ("web", 300)], "main");
        dashboard.fail_quit = true;
        let config = config("main", 1000, &[]);

        let (result, _) = run_balancer(&mut dashboard, &config).await;

        assert!(matches!(
            result,
            Err(BalanceError::Driver(DriverError::Protocol { .. }))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_release_keeps_original_error() {
        let mut dashboard = FakeDashboard::new(&[("main", 10000), ("web", 300)], "main");
        dashboard.fail_quit = true;
        let config = config("missing", 1000, &[]);

        let (result, _) = run_balancer(&mut dashboard, &config).await;

        assert_eq!(
            result.unwrap_err(),
            BalanceError::SourceNotFound {
                name: "missing".to_string()
            }
        );
        assert_eq!(dashboard.quit_count(), 1);
    }
}
