//! SiteSmoke CLI - Main Entry Point
//!
//! Runs the smoke-check suite against a deployed web application and
//! renders a per-check report plus a summary table. Exit codes: 0 all
//! checks passed, 1 at least one check failed or errored, 2 the harness
//! itself could not run.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use sitesmoke_harness::{default_checks, Runner, SmokeConfig};

mod output;

/// Smoke-test a deployed web application
#[derive(Parser, Debug)]
#[command(name = "sitesmoke")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Base URL of the target application
    #[arg(long, env = "SITESMOKE_BASE_URL")]
    base_url: Option<String>,

    /// TOML configuration file (defaults cover a local dev target)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Run only the named check (repeatable); see --list
    #[arg(long = "check", value_name = "NAME")]
    checks: Vec<String>,

    /// Directory screenshots are written to
    #[arg(long)]
    screenshot_dir: Option<PathBuf>,

    /// Write a machine-readable JSON report to this path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(long, default_value = "table")]
    format: output::OutputFormat,

    /// List available checks and exit
    #[arg(long)]
    list: bool,

    /// Run the browser with a visible window
    #[arg(long)]
    headed: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("warn".parse().unwrap()))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let rt = tokio::runtime::Runtime::new().expect("failed to create tokio runtime");
    let result = rt.block_on(run(args));

    if let Err(e) = &result {
        eprintln!("Error: {e:#}");
    }
    std::process::exit(exit_code(&result));
}

/// 0 when every check passed, 1 when any check failed or errored,
/// 2 when the harness itself could not run
fn exit_code(result: &anyhow::Result<bool>) -> i32 {
    match result {
        Ok(true) => 0,
        Ok(false) => 1,
        Err(_) => 2,
    }
}

async fn run(args: Args) -> anyhow::Result<bool> {
    let mut config = match &args.config {
        Some(path) => SmokeConfig::from_file(path)?,
        None => SmokeConfig::default(),
    };

    if let Some(base_url) = args.base_url {
        config.base_url = base_url;
    }
    if let Some(dir) = args.screenshot_dir {
        config.screenshot_dir = dir;
    }
    if args.headed {
        config.headless = false;
    }

    let checks = default_checks();

    if args.list {
        for check in &checks {
            println!("{}", check.name());
        }
        return Ok(true);
    }

    let runner = Runner::new(config);
    let suite = if args.checks.is_empty() {
        runner.run(&checks).await
    } else {
        runner.run_selected(&checks, &args.checks).await?
    };

    output::print_suite(&suite, args.format);

    if let Some(path) = &args.output {
        suite.write_json(path)?;
    }

    Ok(suite.all_passed())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_code_maps_all_three_outcomes() {
        assert_eq!(exit_code(&Ok(true)), 0);
        assert_eq!(exit_code(&Ok(false)), 1);
        assert_eq!(exit_code(&Err(anyhow::anyhow!("target unreachable"))), 2);
    }
}
