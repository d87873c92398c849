//! Security header presence check

use async_trait::async_trait;

use crate::checks::Check;
use crate::config::SmokeConfig;
use crate::error::SmokeResult;
use crate::report::CheckOutcome;

/// Fetches the login page and reports each expected security header
/// independently; a missing header never hides the state of the others.
pub struct SecurityHeadersCheck;

#[async_trait]
impl Check for SecurityHeadersCheck {
    fn name(&self) -> &'static str {
        "security-headers"
    }

    async fn run(&self, config: &SmokeConfig) -> SmokeResult<CheckOutcome> {
        let client = config.http_client()?;
        let response = client.get(config.url(&config.login_path)).send().await?;
        let headers = response.headers().clone();

        let mut outcome = CheckOutcome::default();
        for name in &config.security_headers {
            match headers.get(name.as_str()) {
                Some(value) => {
                    let value = value.to_str().unwrap_or("<non-ascii>");
                    outcome.pass_with(name, value);
                }
                None => outcome.fail_with(name, "NOT SET"),
            }
        }

        Ok(outcome)
    }
}
