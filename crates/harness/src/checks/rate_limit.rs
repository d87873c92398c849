//! Login rate-limit check

use async_trait::async_trait;
use serde_json::json;

use crate::checks::Check;
use crate::config::SmokeConfig;
use crate::error::SmokeResult;
use crate::report::CheckOutcome;

/// Hammers the login endpoint with bogus credentials until the server
/// answers 429, bounded at `rate_limit_attempts` requests. The loop
/// stops at the first 429; a run that exhausts the bound without one is
/// a failed check.
pub struct RateLimitCheck;

#[async_trait]
impl Check for RateLimitCheck {
    fn name(&self) -> &'static str {
        "rate-limiting"
    }

    async fn run(&self, config: &SmokeConfig) -> SmokeResult<CheckOutcome> {
        let client = config.http_client()?;
        let body = json!({
            "email": config.probe_credentials.email,
            "password": config.probe_credentials.password,
        });

        let mut outcome = CheckOutcome::default();

        for attempt in 1..=config.rate_limit_attempts {
            let status = client
                .post(config.url(&config.login_endpoint))
                .json(&body)
                .send()
                .await?
                .status()
                .as_u16();

            if status == 429 {
                outcome.pass(format!("Rate limited after {attempt} requests (status 429)"));
                return Ok(outcome);
            }
            outcome.note(format!("Request {attempt}: status {status}"));
        }

        outcome.fail(format!(
            "Rate limiting may not be working (no 429 within {} requests)",
            config.rate_limit_attempts
        ));
        Ok(outcome)
    }
}
