//! Registration UI check

use async_trait::async_trait;

use crate::browser::{BrowserConfig, BrowserSession, ClickCandidate, PageProbeSpec};
use crate::checks::Check;
use crate::config::SmokeConfig;
use crate::error::SmokeResult;
use crate::report::CheckOutcome;

const CANDIDATES: &[(&str, &str)] = &[
    ("registration link (Sign up)", "text=Sign up"),
    ("registration link (Register)", "text=Register"),
    ("registration link (Create account)", "text=Create account"),
    ("registration tab (Sign up)", r#"button:has-text("Sign up")"#),
    ("registration tab (Register)", r#"button:has-text("Register")"#),
];

/// Looks for a sign-up link or tab on the login page, opens it, and
/// captures the registration form for manual review.
pub struct RegistrationFlowCheck;

#[async_trait]
impl Check for RegistrationFlowCheck {
    fn name(&self) -> &'static str {
        "registration-flow"
    }

    async fn run(&self, config: &SmokeConfig) -> SmokeResult<CheckOutcome> {
        let session = BrowserSession::new(BrowserConfig::from_smoke(config, None))?;

        let spec = PageProbeSpec {
            path: config.login_path.clone(),
            wait_network_idle: true,
            click_any: CANDIDATES
                .iter()
                .map(|(label, selector)| ClickCandidate {
                    label: label.to_string(),
                    selector: selector.to_string(),
                })
                .collect(),
            screenshot: Some("register_page".to_string()),
            full_page: true,
            ..Default::default()
        };

        let probe = session.run_probe(&spec).await?;

        let mut outcome = CheckOutcome::default();
        match probe.clicked {
            Some(label) => {
                outcome.pass(format!("{label} found"));
                if let Some(path) = &probe.screenshot {
                    outcome.note(format!("Screenshot saved: {}", path.display()));
                }
            }
            None => outcome.fail("Registration option not found on login page"),
        }

        Ok(outcome)
    }
}
