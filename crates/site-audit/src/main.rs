//! `site-audit`: audit a website from the command line.

use anyhow::{Context, Result};
use clap::Parser;
use site_audit::cli::audit_cmd;
use site_audit::{AuditConfig, Auditor};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "site-audit", version, about = "Audit a website for crawlability, SEO, AI readiness and security headers")]
struct Cli {
    /// Domain to audit, e.g. example.com
    domain: String,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Only print the score line
    #[arg(long)]
    quiet: bool,

    /// Log fetch progress to stderr
    #[arg(long)]
    verbose: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// JSON config file overriding the built-in defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Per-request timeout in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Exit with status 2 when the score is below this value
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    fail_under: Option<u8>,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,
}

fn init_tracing(verbose: bool, json: bool) -> Result<()> {
    let level = if verbose { "site_audit=info" } else { "site_audit=warn" };
    let filter = EnvFilter::from_default_env().add_directive(level.parse()?);
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
    Ok(())
}

fn load_config(cli: &Cli) -> Result<AuditConfig> {
    let mut config = match &cli.config {
        Some(path) => AuditConfig::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => AuditConfig::default(),
    };
    if let Some(ms) = cli.timeout_ms {
        config.fetch.timeout_ms = ms;
    }
    Ok(config)
}

/// Export the rendering flags as env vars for [`site_audit::cli::output`].
///
/// Must run before the tokio runtime starts any worker threads.
fn export_flags(cli: &Cli) {
    if cli.json {
        std::env::set_var("SITE_AUDIT_JSON", "1");
    }
    if cli.quiet {
        std::env::set_var("SITE_AUDIT_QUIET", "1");
    }
    if cli.no_color {
        std::env::set_var("SITE_AUDIT_NO_COLOR", "1");
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    init_tracing(cli.verbose, cli.log_json)?;

    let config = load_config(&cli)?;
    let auditor = Auditor::new(config).context("failed to set up HTTP fetcher")?;

    let status = audit_cmd::run(&auditor, &cli.domain, cli.fail_under).await;
    Ok(ExitCode::from(status))
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    export_flags(&cli);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start tokio runtime")?;
    runtime.block_on(run(cli))
}

#[cfg(test)]
mod tests {
    use super::*;
    use site_audit::cli::output;

    #[test]
    fn test_export_flags() {
        let cli = Cli::parse_from(["site-audit", "example.com", "--json", "--quiet"]);
        export_flags(&cli);
        assert!(output::is_json());
        assert!(output::is_quiet());
    }

    #[test]
    fn test_fail_under_range() {
        assert!(Cli::try_parse_from(["site-audit", "x", "--fail-under", "101"]).is_err());
        let cli = Cli::try_parse_from(["site-audit", "x", "--fail-under", "80"]).unwrap();
        assert_eq!(cli.fail_under, Some(80));
    }

    #[test]
    fn test_timeout_override() {
        let cli = Cli::parse_from(["site-audit", "x", "--timeout-ms", "1200"]);
        assert_eq!(load_config(&cli).unwrap().fetch.timeout_ms, 1200);
    }
}
