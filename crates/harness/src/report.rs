//! Check results and report rendering
//!
//! Checks record structured outcomes instead of printing as they go;
//! console and JSON rendering are separate concerns, so the driver and
//! every check stay testable without a console or a browser.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::SmokeResult;

/// Verdict for one check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CheckStatus {
    /// All assertions held
    Pass,
    /// The check ran to completion but at least one assertion failed
    Fail,
    /// The check itself broke (target unreachable, browser crash, ...)
    Error,
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckStatus::Pass => write!(f, "PASS"),
            CheckStatus::Fail => write!(f, "FAIL"),
            CheckStatus::Error => write!(f, "ERROR"),
        }
    }
}

/// One ✓/✗ line of a check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssertionOutcome {
    pub label: String,
    pub passed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Everything a check produced while running
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckOutcome {
    pub assertions: Vec<AssertionOutcome>,
    /// Informational lines (attempt statuses, screenshot paths, page title)
    pub notes: Vec<String>,
}

impl CheckOutcome {
    pub fn pass(&mut self, label: impl Into<String>) {
        self.assertions.push(AssertionOutcome {
            label: label.into(),
            passed: true,
            detail: None,
        });
    }

    pub fn pass_with(&mut self, label: impl Into<String>, detail: impl Into<String>) {
        self.assertions.push(AssertionOutcome {
            label: label.into(),
            passed: true,
            detail: Some(detail.into()),
        });
    }

    pub fn fail(&mut self, label: impl Into<String>) {
        self.assertions.push(AssertionOutcome {
            label: label.into(),
            passed: false,
            detail: None,
        });
    }

    pub fn fail_with(&mut self, label: impl Into<String>, detail: impl Into<String>) {
        self.assertions.push(AssertionOutcome {
            label: label.into(),
            passed: false,
            detail: Some(detail.into()),
        });
    }

    pub fn note(&mut self, line: impl Into<String>) {
        self.notes.push(line.into());
    }

    /// True when every assertion held
    pub fn passed(&self) -> bool {
        self.assertions.iter().all(|a| a.passed)
    }
}

/// Result of one check, as rendered in the summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckReport {
    pub name: String,
    pub status: CheckStatus,
    pub duration_ms: u64,
    pub assertions: Vec<AssertionOutcome>,
    pub notes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Result of the whole run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteReport {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub errored: usize,
    pub duration_ms: u64,
    pub reports: Vec<CheckReport>,
}

impl SuiteReport {
    pub fn from_reports(reports: Vec<CheckReport>, duration_ms: u64) -> Self {
        let passed = reports.iter().filter(|r| r.status == CheckStatus::Pass).count();
        let failed = reports.iter().filter(|r| r.status == CheckStatus::Fail).count();
        let errored = reports.iter().filter(|r| r.status == CheckStatus::Error).count();
        Self {
            total: reports.len(),
            passed,
            failed,
            errored,
            duration_ms,
            reports,
        }
    }

    /// True when every check passed
    pub fn all_passed(&self) -> bool {
        self.failed == 0 && self.errored == 0
    }

    /// Write the report as pretty JSON
    pub fn write_json(&self, path: &Path) -> SmokeResult<PathBuf> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        info!("results written to {}", path.display());
        Ok(path.to_path_buf())
    }

    /// Plain-text rendering: per-check sections then a summary block
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        for report in &self.reports {
            out.push_str(&format!("\n=== {} ===\n", report.name));
            for note in &report.notes {
                out.push_str(&format!("  {note}\n"));
            }
            for assertion in &report.assertions {
                let icon = if assertion.passed { '✓' } else { '✗' };
                match &assertion.detail {
                    Some(detail) => out.push_str(&format!("{icon} {}: {detail}\n", assertion.label)),
                    None => out.push_str(&format!("{icon} {}\n", assertion.label)),
                }
            }
            if let Some(error) = &report.error {
                out.push_str(&format!("✗ error: {error}\n"));
            }
        }

        out.push_str(&format!(
            "\n{} checks: {} passed, {} failed, {} errored ({} ms)\n",
            self.total, self.passed, self.failed, self.errored, self.duration_ms
        ));
        for report in &self.reports {
            let icon = if report.status == CheckStatus::Pass { '✓' } else { '✗' };
            out.push_str(&format!("{icon} {}: {}\n", report.name, report.status));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(name: &str, status: CheckStatus) -> CheckReport {
        CheckReport {
            name: name.to_string(),
            status,
            duration_ms: 1,
            assertions: vec![],
            notes: vec![],
            error: None,
        }
    }

    #[test]
    fn suite_totals_are_consistent() {
        let suite = SuiteReport::from_reports(
            vec![
                report("a", CheckStatus::Pass),
                report("b", CheckStatus::Fail),
                report("c", CheckStatus::Error),
                report("d", CheckStatus::Pass),
            ],
            12,
        );
        assert_eq!(suite.total, 4);
        assert_eq!(suite.passed + suite.failed + suite.errored, suite.total);
        assert_eq!(suite.passed, 2);
        assert_eq!(suite.failed, 1);
        assert_eq!(suite.errored, 1);
        assert!(!suite.all_passed());
    }

    #[test]
    fn outcome_verdict_requires_all_assertions() {
        let mut outcome = CheckOutcome::default();
        outcome.pass("first");
        assert!(outcome.passed());
        outcome.fail("second");
        assert!(!outcome.passed());
        // Notes never affect the verdict
        outcome.notes.clear();
        assert!(!outcome.passed());
    }

    #[test]
    fn text_rendering_keeps_every_assertion_line() {
        let mut outcome = CheckOutcome::default();
        outcome.pass_with("x-frame-options", "DENY");
        outcome.fail_with("x-xss-protection", "NOT SET");
        let suite = SuiteReport::from_reports(
            vec![CheckReport {
                name: "security-headers".to_string(),
                status: CheckStatus::Fail,
                duration_ms: 3,
                assertions: outcome.assertions,
                notes: outcome.notes,
                error: None,
            }],
            3,
        );
        let text = suite.render_text();
        assert!(text.contains("✓ x-frame-options: DENY"));
        assert!(text.contains("✗ x-xss-protection: NOT SET"));
        assert!(text.contains("✗ security-headers: FAIL"));
    }

    #[test]
    fn json_report_round_trips() {
        let suite = SuiteReport::from_reports(vec![report("a", CheckStatus::Pass)], 5);
        let json = serde_json::to_string(&suite).unwrap();
        let parsed: SuiteReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.total, 1);
        assert_eq!(parsed.reports[0].status, CheckStatus::Pass);
    }
}
