//! Login page rendering check

use async_trait::async_trait;

use crate::browser::{BrowserConfig, BrowserSession, ElementProbe, PageProbeSpec};
use crate::checks::Check;
use crate::config::SmokeConfig;
use crate::error::SmokeResult;
use crate::report::CheckOutcome;

const ELEMENTS: &[(&str, &str, &str)] = &[
    (
        "email",
        r#"input[type="email"], input[name="email"]"#,
        "Email input",
    ),
    ("password", r#"input[type="password"]"#, "Password input"),
    ("submit", r#"button[type="submit"]"#, "Login button"),
];

/// Loads `/login` and verifies the form elements are visible
pub struct LoginPageCheck;

#[async_trait]
impl Check for LoginPageCheck {
    fn name(&self) -> &'static str {
        "login-page"
    }

    async fn run(&self, config: &SmokeConfig) -> SmokeResult<CheckOutcome> {
        let session = BrowserSession::new(BrowserConfig::from_smoke(config, None))?;

        let spec = PageProbeSpec {
            path: config.login_path.clone(),
            wait_network_idle: true,
            elements: ELEMENTS
                .iter()
                .map(|(label, selector, _)| ElementProbe {
                    label: label.to_string(),
                    selector: selector.to_string(),
                })
                .collect(),
            screenshot: Some("login_page".to_string()),
            full_page: true,
            ..Default::default()
        };

        let probe = session.run_probe(&spec).await?;

        let mut outcome = CheckOutcome::default();
        outcome.note(format!("Page title: {}", probe.title));

        for (label, _, display) in ELEMENTS {
            if probe.elements.get(*label).copied().unwrap_or(false) {
                outcome.pass(format!("{display} found"));
            } else {
                outcome.fail(format!("{display} NOT found"));
            }
        }

        if let Some(path) = &probe.screenshot {
            outcome.note(format!("Screenshot saved: {}", path.display()));
        }

        Ok(outcome)
    }
}
