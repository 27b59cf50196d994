use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stockradar_core::compare::run_comparison;
use stockradar_core::provider::StaticFundamentalsProvider;
use stockradar_core::scoring::classify::ProfileRules;
use stockradar_core::scoring::normalize::ScoringConfig;

#[derive(Debug, Parser)]
#[command(name = "stockradar_cli")]
struct Args {
    /// Security codes, comma separated (e.g. "600519, 002028").
    #[arg(long)]
    codes: String,

    /// Pretty-print the report JSON.
    #[arg(long)]
    pretty: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = stockradar_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();

    let args = Args::parse();

    let codes = parse_codes(&args.codes);
    anyhow::ensure!(!codes.is_empty(), "at least one security code is required");

    let provider = StaticFundamentalsProvider::synthetic();
    let config = ScoringConfig::from_env();
    let rules = ProfileRules::default();

    let report = run_comparison(&provider, &codes, &config, &rules).await;

    match report {
        Ok(report) => {
            tracing::info!(
                entries = report.entries.len(),
                excluded = report.excluded.len(),
                "comparison complete"
            );
            let json = if args.pretty {
                serde_json::to_string_pretty(&report)
            } else {
                serde_json::to_string(&report)
            }
            .context("serialize report failed")?;
            println!("{json}");
            Ok(())
        }
        Err(err) => {
            sentry_anyhow::capture_anyhow(&err);
            tracing::error!(error = %err, "comparison run failed");
            Err(err)
        }
    }
}

fn parse_codes(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn init_sentry(settings: &stockradar_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_comma_separated_codes_with_whitespace() {
        assert_eq!(
            parse_codes("600519, 002028 ,,  300750"),
            vec!["600519", "002028", "300750"]
        );
        assert!(parse_codes("  ,").is_empty());
    }
}
