//! Playwright browser automation
//!
//! Each probe generates a self-contained node program that launches a
//! fresh headless browser, runs the navigation/query steps, prints one
//! JSON object on stdout, and always closes the browser in `finally`.
//! Running every probe in its own process keeps checks fully isolated:
//! no cookies, storage, or crashed pages survive into the next check.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::Stdio;

use serde::{Deserialize, Serialize};
use tokio::process::Command;
use tracing::debug;

use crate::config::{SmokeConfig, Viewport};
use crate::error::{SmokeError, SmokeResult};

/// Browser engine to drive
#[derive(Debug, Clone, Copy, Default)]
pub enum Browser {
    #[default]
    Chromium,
    Firefox,
    Webkit,
}

impl Browser {
    fn as_str(&self) -> &'static str {
        match self {
            Browser::Chromium => "chromium",
            Browser::Firefox => "firefox",
            Browser::Webkit => "webkit",
        }
    }
}

/// Configuration for one browser session
#[derive(Debug, Clone)]
pub struct BrowserConfig {
    pub base_url: String,
    pub screenshot_dir: PathBuf,
    pub viewport_width: u32,
    pub viewport_height: u32,
    pub browser: Browser,
    pub headless: bool,
    pub nav_timeout_ms: u64,
}

impl BrowserConfig {
    /// Session config for a check, with an explicit viewport
    pub fn from_smoke(config: &SmokeConfig, viewport: Option<&Viewport>) -> Self {
        let (width, height) = viewport
            .map(|v| (v.width, v.height))
            .unwrap_or((1280, 720));
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            screenshot_dir: config.screenshot_dir.clone(),
            viewport_width: width,
            viewport_height: height,
            browser: Browser::default(),
            headless: config.headless,
            nav_timeout_ms: config.nav_timeout_ms,
        }
    }
}

/// An element to probe for visibility
#[derive(Debug, Clone)]
pub struct ElementProbe {
    /// Key under which the result is reported
    pub label: String,
    /// Playwright selector (may be a comma list; first match is used)
    pub selector: String,
}

/// A click candidate; the first visible one is clicked
#[derive(Debug, Clone)]
pub struct ClickCandidate {
    pub label: String,
    pub selector: String,
}

/// Declarative description of one page probe
#[derive(Debug, Clone, Default)]
pub struct PageProbeSpec {
    /// Path relative to the base URL
    pub path: String,
    /// Wait for network idle after navigation
    pub wait_network_idle: bool,
    /// Elements whose visibility is reported
    pub elements: Vec<ElementProbe>,
    /// Candidates to click; first visible wins, 1s settle after click
    pub click_any: Vec<ClickCandidate>,
    /// Screenshot file stem; with click candidates present the shot is
    /// only taken after a successful click
    pub screenshot: Option<String>,
    /// Capture the full page rather than the viewport
    pub full_page: bool,
}

/// What the generated script reports back
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageProbe {
    #[serde(default)]
    pub title: String,
    /// Visibility per element label
    #[serde(default)]
    pub elements: BTreeMap<String, bool>,
    /// Label of the click candidate that was clicked, if any
    #[serde(default)]
    pub clicked: Option<String>,
    /// Screenshot path, when one was captured
    #[serde(default)]
    pub screenshot: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct ScriptFailure {
    error: String,
}

/// A single-use browser session
pub struct BrowserSession {
    config: BrowserConfig,
}

impl BrowserSession {
    pub fn new(config: BrowserConfig) -> SmokeResult<Self> {
        check_node_installed()?;
        std::fs::create_dir_all(&config.screenshot_dir)?;
        Ok(Self { config })
    }

    /// Run a probe and parse the script's JSON output
    pub async fn run_probe(&self, spec: &PageProbeSpec) -> SmokeResult<PageProbe> {
        let script = self.build_script(spec);

        let temp_dir = tempfile::tempdir()?;
        let script_path = temp_dir.path().join("probe.js");
        std::fs::write(&script_path, &script)?;

        debug!("running browser probe: {}", script_path.display());

        let output = Command::new("node")
            .arg(&script_path)
            .stdin(Stdio::null())
            .output()
            .await?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);

        if !output.status.success() {
            // The script reports its own error as JSON on stderr when it
            // got far enough; fall back to the raw streams
            let reason = stderr
                .lines()
                .rev()
                .find_map(|line| serde_json::from_str::<ScriptFailure>(line).ok())
                .map(|f| f.error)
                .unwrap_or_else(|| format!("stdout: {stdout}\nstderr: {stderr}"));
            return Err(SmokeError::Browser(reason));
        }

        let last_line = stdout
            .lines()
            .rev()
            .find(|line| !line.trim().is_empty())
            .ok_or_else(|| SmokeError::ProbeParse("empty probe output".to_string()))?;

        serde_json::from_str(last_line)
            .map_err(|e| SmokeError::ProbeParse(format!("{e}: {last_line}")))
    }

    /// Build the node program for a probe
    pub fn build_script(&self, spec: &PageProbeSpec) -> String {
        let mut script = String::new();

        script.push_str(&format!(
            r#"const {{ chromium, firefox, webkit }} = require('playwright');

(async () => {{
  const browser = await {browser}.launch({{ headless: {headless} }});
  const context = await browser.newContext({{
    viewport: {{ width: {width}, height: {height} }}
  }});
  const page = await context.newPage();
  page.setDefaultNavigationTimeout({nav_timeout});
  const probe = {{ title: '', elements: {{}}, clicked: null, screenshot: null }};

  try {{
    await page.goto({url});
"#,
            browser = self.config.browser.as_str(),
            headless = self.config.headless,
            width = self.config.viewport_width,
            height = self.config.viewport_height,
            nav_timeout = self.config.nav_timeout_ms,
            url = js_str(&format!("{}{}", self.config.base_url, spec.path)),
        ));

        if spec.wait_network_idle {
            script.push_str("    await page.waitForLoadState('networkidle');\n");
        }

        script.push_str("    probe.title = await page.title();\n");

        for element in &spec.elements {
            script.push_str(&format!(
                "    probe.elements[{label}] = await page.locator({selector}).first().isVisible();\n",
                label = js_str(&element.label),
                selector = js_str(&element.selector),
            ));
        }

        for candidate in &spec.click_any {
            script.push_str(&format!(
                r#"    if (probe.clicked === null && await page.locator({selector}).first().isVisible()) {{
      await page.locator({selector}).first().click();
      await page.waitForTimeout(1000);
      probe.clicked = {label};
    }}
"#,
                selector = js_str(&candidate.selector),
                label = js_str(&candidate.label),
            ));
        }

        if let Some(stem) = &spec.screenshot {
            let path = self.config.screenshot_dir.join(format!("{stem}.png"));
            let shot = format!(
                "await page.screenshot({{ path: {path}, fullPage: {full} }});\n",
                path = js_str(&path.to_string_lossy()),
                full = spec.full_page,
            );
            if spec.click_any.is_empty() {
                script.push_str(&format!("    {shot}"));
                script.push_str(&format!(
                    "    probe.screenshot = {};\n",
                    js_str(&path.to_string_lossy())
                ));
            } else {
                // Only meaningful once something was clicked
                script.push_str(&format!(
                    r#"    if (probe.clicked !== null) {{
      {shot}      probe.screenshot = {path};
    }}
"#,
                    path = js_str(&path.to_string_lossy()),
                ));
            }
        }

        script.push_str(
            r#"    console.log(JSON.stringify(probe));
  } catch (error) {
    console.error(JSON.stringify({ error: error.message }));
    process.exitCode = 1;
  } finally {
    await browser.close();
  }
})();
"#,
        );

        script
    }
}

/// Verify node is available before spawning probes
pub fn check_node_installed() -> SmokeResult<()> {
    let status = std::process::Command::new("node")
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match status {
        Ok(status) if status.success() => Ok(()),
        _ => Err(SmokeError::NodeNotFound),
    }
}

/// Render a Rust string as a JS string literal (JSON escaping is valid JS)
fn js_str(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "\"\"".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> BrowserSession {
        BrowserSession {
            config: BrowserConfig {
                base_url: "http://localhost:3000".to_string(),
                screenshot_dir: PathBuf::from("/tmp"),
                viewport_width: 1280,
                viewport_height: 720,
                browser: Browser::Chromium,
                headless: true,
                nav_timeout_ms: 30_000,
            },
        }
    }

    #[test]
    fn script_escapes_selectors_and_closes_browser() {
        let spec = PageProbeSpec {
            path: "/login".to_string(),
            wait_network_idle: true,
            elements: vec![ElementProbe {
                label: "email".to_string(),
                selector: r#"input[type="email"], input[name="email"]"#.to_string(),
            }],
            ..Default::default()
        };
        let script = session().build_script(&spec);

        assert!(script.contains(r#"await page.goto("http://localhost:3000/login");"#));
        assert!(script.contains("waitForLoadState('networkidle')"));
        assert!(script.contains(r#"input[type=\"email\"], input[name=\"email\"]"#));
        assert!(script.contains("await browser.close();"));
        assert!(script.contains("console.log(JSON.stringify(probe));"));
    }

    #[test]
    fn screenshot_is_conditional_when_clicking() {
        let spec = PageProbeSpec {
            path: "/login".to_string(),
            click_any: vec![ClickCandidate {
                label: "sign-up".to_string(),
                selector: "text=Sign up".to_string(),
            }],
            screenshot: Some("register_page".to_string()),
            full_page: true,
            ..Default::default()
        };
        let script = session().build_script(&spec);

        assert!(script.contains("if (probe.clicked !== null)"));
        assert!(script.contains("register_page.png"));
        assert!(script.contains("waitForTimeout(1000)"));
    }

    #[test]
    fn unconditional_screenshot_without_click() {
        let spec = PageProbeSpec {
            path: "/login".to_string(),
            screenshot: Some("login_page".to_string()),
            full_page: true,
            ..Default::default()
        };
        let script = session().build_script(&spec);

        assert!(script.contains("login_page.png"));
        assert!(script.contains("fullPage: true"));
        assert!(!script.contains("if (probe.clicked !== null)"));
    }

    #[test]
    fn probe_parses_from_script_output() {
        let json = r#"{"title":"Login","elements":{"email":true,"password":false},"clicked":null,"screenshot":"/tmp/login_page.png"}"#;
        let probe: PageProbe = serde_json::from_str(json).unwrap();
        assert_eq!(probe.title, "Login");
        assert_eq!(probe.elements["email"], true);
        assert_eq!(probe.elements["password"], false);
        assert!(probe.clicked.is_none());
    }
}
