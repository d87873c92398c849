//! The six smoke checks
//!
//! Each check is fully self-contained: it opens its own browser session
//! or HTTP client, runs a handful of probes, and records assertions into
//! a [`CheckOutcome`]. Checks never share state and can run in any order.

use async_trait::async_trait;

use crate::config::SmokeConfig;
use crate::error::SmokeResult;
use crate::report::CheckOutcome;

mod api_endpoints;
mod login_page;
mod rate_limit;
mod registration;
mod responsive;
mod security_headers;

pub use api_endpoints::ApiEndpointsCheck;
pub use login_page::LoginPageCheck;
pub use rate_limit::RateLimitCheck;
pub use registration::RegistrationFlowCheck;
pub use responsive::ResponsiveDesignCheck;
pub use security_headers::SecurityHeadersCheck;

/// One independent validation routine
#[async_trait]
pub trait Check: Send + Sync {
    /// Stable name used for selection and reporting
    fn name(&self) -> &'static str;

    /// Run the check against the configured target. `Err` means the
    /// check itself broke; a failed assertion is an `Ok` outcome.
    async fn run(&self, config: &SmokeConfig) -> SmokeResult<CheckOutcome>;
}

/// The full suite, in fixed execution order
pub fn default_checks() -> Vec<Box<dyn Check>> {
    vec![
        Box::new(LoginPageCheck),
        Box::new(ApiEndpointsCheck),
        Box::new(SecurityHeadersCheck),
        Box::new(RateLimitCheck),
        Box::new(RegistrationFlowCheck),
        Box::new(ResponsiveDesignCheck),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suite_has_six_checks_in_order() {
        let names: Vec<&str> = default_checks().iter().map(|c| c.name()).collect();
        assert_eq!(
            names,
            vec![
                "login-page",
                "api-endpoints",
                "security-headers",
                "rate-limiting",
                "registration-flow",
                "responsive-design",
            ]
        );
    }
}
