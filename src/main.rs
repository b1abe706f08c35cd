// SPDX-License-Identifier: PMPL-1.0-or-later
//! a11yscan CLI - scan an HTML file or URL for accessibility violations

use a11yscan::config::{default_config_path, load_config};
use a11yscan::fetch::{is_remote, HttpFetcher};
use a11yscan::report::{generate_report, OutputFormat};
use a11yscan::rules::{registry, select_rules};
use a11yscan::Scanner;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// HTML accessibility scanner for WCAG 2.1 checks
#[derive(Parser)]
#[command(name = "a11yscan")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan an HTML file or URL
    Scan {
        /// File path, or URL starting with http:// or https://
        target: String,

        /// Output format (defaults to the configured format)
        #[arg(long)]
        format: Option<FormatArg>,

        /// Rules to run, by short name or rule id (repeatable)
        #[arg(long = "rules", value_name = "NAME")]
        rules: Vec<String>,

        /// Output file (stdout if not specified)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Fetch timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,

        /// Exit with status 1 when any critical or error violation is found
        #[arg(long)]
        strict: bool,

        /// Enable verbose logging
        #[arg(long, short)]
        verbose: bool,
    },

    /// List available rules
    ListRules,
}

/// Output format CLI argument
#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    /// Human-readable text
    Text,
    /// Structured JSON
    Json,
    /// SARIF for IDE/CI
    Sarif,
    /// Standalone HTML page
    Html,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Sarif => OutputFormat::Sarif,
            FormatArg::Html => OutputFormat::Html,
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "a11yscan=debug" } else { "a11yscan=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Scan {
            target,
            format,
            rules,
            output,
            config,
            timeout,
            strict,
            verbose,
        } => {
            init_logging(verbose);

            let config_path = config.unwrap_or_else(default_config_path);
            let mut config = load_config(&config_path)?;
            config.apply_env()?;
            if let Some(secs) = timeout {
                config.fetch.timeout_secs = secs;
            }
            if !rules.is_empty() {
                config.scan.rules = rules;
            }
            let format = format.map(OutputFormat::from).unwrap_or(config.report.format);

            let scanner = Scanner::new(select_rules(&config.scan.rules));
            let result = if is_remote(&target) {
                let fetcher = HttpFetcher::new(&config.fetch)?;
                scanner.scan_url(&fetcher, &target).await?
            } else {
                scanner.scan_file(Path::new(&target))?
            };

            let report = generate_report(&result, &target, format)?;
            write_output(&report, output.as_deref())?;

            if result.violations.is_empty() {
                eprintln!("No accessibility violations found");
            } else {
                eprintln!("Found {} accessibility violations", result.violations.len());
            }

            if strict && result.has_blocking() {
                std::process::exit(1);
            }
        }

        Commands::ListRules => {
            println!("{:<12} {:<22} DESCRIPTION", "NAME", "RULE ID");
            for entry in registry() {
                println!("{:<12} {:<22} {}", entry.name, entry.rule_id, entry.description);
            }
        }
    }

    Ok(())
}

/// Write output to file or stdout
fn write_output(content: &str, path: Option<&Path>) -> anyhow::Result<()> {
    match path {
        Some(p) => {
            std::fs::write(p, content)?;
            eprintln!("Report written to {}", p.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
