//! Sequential check driver
//!
//! Invokes each check in order and turns its outcome into a
//! [`CheckReport`]. A check returning `Err` is recorded as `Error` and
//! the run continues: one broken check must never stop the rest.

use std::time::Instant;

use tracing::{error, info};

use crate::checks::Check;
use crate::config::SmokeConfig;
use crate::error::{SmokeError, SmokeResult};
use crate::report::{CheckReport, CheckStatus, SuiteReport};

pub struct Runner {
    config: SmokeConfig,
}

impl Runner {
    pub fn new(config: SmokeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SmokeConfig {
        &self.config
    }

    /// Run every check in order
    pub async fn run(&self, checks: &[Box<dyn Check>]) -> SuiteReport {
        let start = Instant::now();
        let mut reports = Vec::with_capacity(checks.len());

        info!("running {} check(s) against {}", checks.len(), self.config.base_url);

        for check in checks {
            reports.push(self.run_one(check.as_ref()).await);
        }

        let suite = SuiteReport::from_reports(reports, start.elapsed().as_millis() as u64);
        info!(
            "{} passed, {} failed, {} errored ({} ms)",
            suite.passed, suite.failed, suite.errored, suite.duration_ms
        );
        suite
    }

    /// Run only the named checks, preserving suite order
    pub async fn run_selected(
        &self,
        checks: &[Box<dyn Check>],
        names: &[String],
    ) -> SmokeResult<SuiteReport> {
        for name in names {
            if !checks.iter().any(|c| c.name() == name) {
                return Err(SmokeError::UnknownCheck(name.clone()));
            }
        }

        let start = Instant::now();
        let mut reports = Vec::new();
        for check in checks {
            if names.iter().any(|n| n == check.name()) {
                reports.push(self.run_one(check.as_ref()).await);
            }
        }
        Ok(SuiteReport::from_reports(reports, start.elapsed().as_millis() as u64))
    }

    async fn run_one(&self, check: &dyn Check) -> CheckReport {
        let start = Instant::now();
        let name = check.name();

        match check.run(&self.config).await {
            Ok(outcome) => {
                let status = if outcome.passed() {
                    CheckStatus::Pass
                } else {
                    CheckStatus::Fail
                };
                let duration_ms = start.elapsed().as_millis() as u64;
                match status {
                    CheckStatus::Pass => info!("✓ {name} ({duration_ms} ms)"),
                    _ => error!("✗ {name} ({duration_ms} ms)"),
                }
                CheckReport {
                    name: name.to_string(),
                    status,
                    duration_ms,
                    assertions: outcome.assertions,
                    notes: outcome.notes,
                    error: None,
                }
            }
            Err(e) => {
                let duration_ms = start.elapsed().as_millis() as u64;
                error!("✗ {name} errored: {e}");
                CheckReport {
                    name: name.to_string(),
                    status: CheckStatus::Error,
                    duration_ms,
                    assertions: vec![],
                    notes: vec![],
                    error: Some(e.to_string()),
                }
            }
        }
    }
}
