//! Protected-API status code check

use async_trait::async_trait;

use crate::checks::Check;
use crate::config::{HttpMethod, SmokeConfig};
use crate::error::SmokeResult;
use crate::report::CheckOutcome;

/// Unauthenticated requests against protected endpoints must be
/// rejected with the status listed in the config table; a login POST
/// with an empty body must be rejected as malformed (400).
pub struct ApiEndpointsCheck;

#[async_trait]
impl Check for ApiEndpointsCheck {
    fn name(&self) -> &'static str {
        "api-endpoints"
    }

    async fn run(&self, config: &SmokeConfig) -> SmokeResult<CheckOutcome> {
        let client = config.http_client()?;
        let mut outcome = CheckOutcome::default();

        for endpoint in &config.protected_endpoints {
            let request = match endpoint.method {
                HttpMethod::Get => client.get(config.url(&endpoint.path)),
                HttpMethod::Post => client.post(config.url(&endpoint.path)),
            };
            let status = request.send().await?.status().as_u16();

            if status == endpoint.expected_status {
                outcome.pass_with(
                    &endpoint.path,
                    format!("{status} (expected {})", endpoint.expected_status),
                );
            } else {
                outcome.fail_with(
                    &endpoint.path,
                    format!("{status} (expected {})", endpoint.expected_status),
                );
            }
        }

        // Public login endpoint with no body at all: malformed request
        let status = client
            .post(config.url(&config.login_endpoint))
            .send()
            .await?
            .status()
            .as_u16();
        if status == 400 {
            outcome.pass_with(&config.login_endpoint, format!("{status} (expected 400)"));
        } else {
            outcome.fail_with(&config.login_endpoint, format!("{status} (expected 400)"));
        }

        Ok(outcome)
    }
}
