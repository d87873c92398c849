//! Responsive layout check

use async_trait::async_trait;

use crate::browser::{BrowserConfig, BrowserSession, PageProbeSpec};
use crate::checks::Check;
use crate::config::SmokeConfig;
use crate::error::SmokeResult;
use crate::report::CheckOutcome;

/// Renders the login page at each configured viewport and captures a
/// full-page screenshot per size. Each viewport gets a fresh page so
/// layouts never bleed into each other.
pub struct ResponsiveDesignCheck;

#[async_trait]
impl Check for ResponsiveDesignCheck {
    fn name(&self) -> &'static str {
        "responsive-design"
    }

    async fn run(&self, config: &SmokeConfig) -> SmokeResult<CheckOutcome> {
        let mut outcome = CheckOutcome::default();

        for viewport in &config.viewports {
            let session = BrowserSession::new(BrowserConfig::from_smoke(config, Some(viewport)))?;
            let stem = format!("responsive_{}", viewport.name);

            let spec = PageProbeSpec {
                path: config.login_path.clone(),
                wait_network_idle: true,
                screenshot: Some(stem.clone()),
                full_page: true,
                ..Default::default()
            };

            session.run_probe(&spec).await?;

            let path = config.screenshot_path(&stem);
            let captured = std::fs::metadata(&path).map(|m| m.len() > 0).unwrap_or(false);
            let label = format!(
                "{} ({}x{}): {}",
                viewport.name,
                viewport.width,
                viewport.height,
                path.display()
            );
            if captured {
                outcome.pass(label);
            } else {
                outcome.fail(label);
            }
        }

        Ok(outcome)
    }
}
