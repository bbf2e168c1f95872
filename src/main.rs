//! Bot identity verifier for Zentinel
//!
//! Verifies `"<name>|<ip>"` claims given as arguments, or one per line on stdin.

use anyhow::Result;
use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use zentinel_bot_verifier::{BotClaim, BotVerifier, VerifierConfig};

#[derive(Parser, Debug)]
#[command(name = "zentinel-bot-verifier")]
#[command(author, version, about = "Reverse-DNS bot identity verification for Zentinel")]
struct Args {
    /// Claims to verify, e.g. "Googlebot|66.249.66.1". Read from stdin when omitted.
    claims: Vec<String>,

    /// Path to configuration file (JSON or YAML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable JSON logging format
    #[arg(long)]
    json_logs: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[derive(Serialize)]
struct ClaimResult<'a> {
    claim: &'a str,
    verified: bool,
}

fn init_logging(json: bool, level: &str) {
    let level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let env_filter = EnvFilter::from_default_env().add_directive(level.into());

    // Logs go to stderr so stdout carries only results
    if json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

async fn check(verifier: &BotVerifier, raw: &str) -> Result<()> {
    let verified = verifier.is_valid_bot(&BotClaim::parse(raw)).await;
    println!("{}", serde_json::to_string(&ClaimResult { claim: raw, verified })?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(args.json_logs, &args.log_level);

    let config = match &args.config {
        Some(path) => VerifierConfig::from_path(path)?,
        None => VerifierConfig::default(),
    };

    info!(
        bots = config.allow_list.names.len(),
        domains = config.allow_list.domains.len(),
        timeout_ms = config.resolver.timeout_ms,
        "Starting bot verifier"
    );

    let verifier = BotVerifier::from_config(&config);

    if args.claims.is_empty() {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await? {
            let line = line.trim();
            if !line.is_empty() {
                check(&verifier, line).await?;
            }
        }
    } else {
        for raw in &args.claims {
            check(&verifier, raw).await?;
        }
    }

    let stats = verifier.stats();
    info!(
        verified = stats.verified,
        denied = stats.denied,
        cache_hits = stats.cache_hits,
        resolutions = stats.resolutions,
        faults = stats.faults,
        "Bot verification finished"
    );

    Ok(())
}
