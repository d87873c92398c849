//! SiteSmoke - headless-browser smoke tests for a running web application
//!
//! The harness drives six independent checks against a deployed target:
//! login page rendering, protected-API status codes, security headers,
//! login rate limiting, the registration UI, and responsive layouts.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     SiteSmoke Harness                       │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Runner                                                     │
//! │    ├── run(checks) -> SuiteReport                           │
//! │    └── run_selected(checks, names) -> SuiteReport           │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Checks (each owns its own browser/HTTP session)            │
//! │    ├── login-page        browser probe + screenshot         │
//! │    ├── api-endpoints     reqwest, expected status table     │
//! │    ├── security-headers  reqwest, header presence           │
//! │    ├── rate-limiting     bounded POST loop, stop at 429     │
//! │    ├── registration-flow browser probe + click + screenshot │
//! │    └── responsive-design browser probe per viewport         │
//! ├─────────────────────────────────────────────────────────────┤
//! │  BrowserSession                                             │
//! │    └── generated Playwright script run via `node`,          │
//! │        one JSON probe object read back from stdout          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! A check that returns `Err` is recorded as `Error` and never prevents
//! the remaining checks from running.

pub mod browser;
pub mod checks;
pub mod config;
pub mod error;
pub mod report;
pub mod runner;

pub use checks::{default_checks, Check};
pub use config::SmokeConfig;
pub use error::{SmokeError, SmokeResult};
pub use report::{CheckReport, CheckStatus, SuiteReport};
pub use runner::Runner;
