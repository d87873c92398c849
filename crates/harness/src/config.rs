//! Harness configuration
//!
//! Everything environment-specific (base URL, credentials, endpoint
//! table, viewport sizes) lives in [`SmokeConfig`] so the same binary
//! can point at staging or production without code edits. Defaults
//! cover a local dev target; a TOML file overrides them.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{SmokeError, SmokeResult};

/// Complete configuration for one harness run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SmokeConfig {
    /// Base URL of the target application
    pub base_url: String,

    /// Credentials a real login would use (reserved for authenticated checks)
    pub credentials: Credentials,

    /// Deliberately wrong credentials used by the rate-limit probe
    pub probe_credentials: Credentials,

    /// Path of the login page
    pub login_path: String,

    /// Path of the login API endpoint
    pub login_endpoint: String,

    /// Protected endpoints and the status they must return without auth
    pub protected_endpoints: Vec<EndpointExpectation>,

    /// Security headers expected on the login page response
    pub security_headers: Vec<String>,

    /// Upper bound on rate-limit probe requests
    pub rate_limit_attempts: u32,

    /// Viewports exercised by the responsive-design check
    pub viewports: Vec<Viewport>,

    /// Directory screenshots are written to
    pub screenshot_dir: PathBuf,

    /// Per-request HTTP timeout in seconds
    pub http_timeout_secs: u64,

    /// Page navigation timeout in milliseconds
    pub nav_timeout_ms: u64,

    /// Run the browser headless
    pub headless: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// One row of the protected-endpoint table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointExpectation {
    pub path: String,
    pub method: HttpMethod,
    pub expected_status: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Viewport {
    pub name: String,
    pub width: u32,
    pub height: u32,
}

impl Default for SmokeConfig {
    fn default() -> Self {
        let protected = [
            "/api/properties",
            "/api/leads",
            "/api/documents",
            "/api/analytics",
            "/api/marketplace",
            "/api/teams",
            "/api/settlements",
            "/api/credits",
        ];

        Self {
            base_url: "http://localhost:3000".to_string(),
            credentials: Credentials {
                email: "test@example.com".to_string(),
                password: "TestPassword123!".to_string(),
            },
            probe_credentials: Credentials {
                email: "test@test.com".to_string(),
                password: "wrong".to_string(),
            },
            login_path: "/login".to_string(),
            login_endpoint: "/api/auth/login".to_string(),
            protected_endpoints: protected
                .iter()
                .map(|path| EndpointExpectation {
                    path: path.to_string(),
                    method: HttpMethod::Get,
                    expected_status: 401,
                })
                .collect(),
            security_headers: vec![
                "x-content-type-options".to_string(),
                "x-frame-options".to_string(),
                "x-xss-protection".to_string(),
                "referrer-policy".to_string(),
            ],
            rate_limit_attempts: 7,
            viewports: vec![
                Viewport { name: "mobile".to_string(), width: 375, height: 667 },
                Viewport { name: "tablet".to_string(), width: 768, height: 1024 },
                Viewport { name: "desktop".to_string(), width: 1920, height: 1080 },
            ],
            screenshot_dir: std::env::temp_dir(),
            http_timeout_secs: 10,
            nav_timeout_ms: 30_000,
            headless: true,
        }
    }
}

impl SmokeConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> SmokeResult<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| SmokeError::Config(e.to_string()))
    }

    /// Absolute URL for a target path
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Screenshot path for a file stem
    pub fn screenshot_path(&self, stem: &str) -> PathBuf {
        self.screenshot_dir.join(format!("{stem}.png"))
    }

    /// Fresh HTTP client for one check; no cookie store, so no state
    /// leaks between checks
    pub fn http_client(&self) -> SmokeResult<reqwest::Client> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(self.http_timeout_secs))
            .build()?;
        Ok(client)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_local_dev_target() {
        let config = SmokeConfig::default();
        assert_eq!(config.base_url, "http://localhost:3000");
        assert_eq!(config.credentials.email, "test@example.com");
        assert_eq!(config.rate_limit_attempts, 7);
        assert_eq!(config.protected_endpoints.len(), 8);
        assert!(config
            .protected_endpoints
            .iter()
            .all(|e| e.expected_status == 401 && e.method == HttpMethod::Get));
        assert_eq!(config.security_headers.len(), 4);
        assert_eq!(config.viewports.len(), 3);
        assert_eq!(config.viewports[0].width, 375);
        assert_eq!(config.viewports[2].height, 1080);
    }

    #[test]
    fn url_join_handles_trailing_slash() {
        let mut config = SmokeConfig::default();
        config.base_url = "https://staging.example.com/".to_string();
        assert_eq!(config.url("/login"), "https://staging.example.com/login");
    }

    #[test]
    fn toml_round_trip() {
        let config = SmokeConfig::default();
        let toml = toml::to_string(&config).unwrap();
        let parsed: SmokeConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.base_url, config.base_url);
        assert_eq!(parsed.protected_endpoints.len(), config.protected_endpoints.len());
        assert_eq!(parsed.viewports[1].name, "tablet");
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let parsed: SmokeConfig =
            toml::from_str(r#"base_url = "https://prod.example.com""#).unwrap();
        assert_eq!(parsed.base_url, "https://prod.example.com");
        assert_eq!(parsed.rate_limit_attempts, 7);
    }
}
