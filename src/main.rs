use anyhow::{Context, Result};
use clap::Parser;
use counter_stats::analysis::StatsThresholds;
use counter_stats::api::RiotApiClient;
use counter_stats::cache::StatsSnapshot;
use counter_stats::collect::TierCaps;
use counter_stats::config::{Config, RetryPolicy};
use counter_stats::display::output::{
    display_champion_summary, display_counters, display_error, display_info, display_run_summary,
    display_success,
};
use counter_stats::pipeline::{self, RunSettings};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "Counter Stats")]
#[command(about = "Compute champion counters from high-elo ranked games", long_about = None)]
struct Args {
    /// Platform region (default: RIOT_REGION or euw1)
    #[arg(short, long)]
    region: Option<String>,

    /// Stop after this many valid matches
    #[arg(short, long, default_value = "1000")]
    target_matches: usize,

    /// Recent ranked match ids fetched per player
    #[arg(long, default_value = "40")]
    matches_per_player: usize,

    /// Players taken from the challenger leaderboard
    #[arg(long, default_value = "100")]
    challenger: usize,

    /// Players taken from the grandmaster leaderboard
    #[arg(long, default_value = "60")]
    grandmaster: usize,

    /// Players taken from the master leaderboard
    #[arg(long, default_value = "40")]
    master: usize,

    /// Games needed before a matchup is tested
    #[arg(long, default_value = "30")]
    min_sample_size: u32,

    /// Retries on HTTP 429 (omit to use RIOT_MAX_RETRIES or 5)
    #[arg(long)]
    max_retries: Option<u32>,

    /// Where to write the JSON snapshot (default: ~/.counter_stats/<region>.json)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Rows to display per table
    #[arg(long, default_value = "15")]
    top_n: usize,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() {
    let args = Args::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&args.log_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run(args) {
        display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn settings_from(args: &Args) -> RunSettings {
    RunSettings {
        tier_caps: TierCaps {
            challenger: args.challenger,
            grandmaster: args.grandmaster,
            master: args.master,
        },
        matches_per_player: args.matches_per_player,
        target_matches: args.target_matches,
        thresholds: StatsThresholds {
            min_sample_size: args.min_sample_size,
            ..StatsThresholds::default()
        },
    }
}

fn run(args: Args) -> Result<()> {
    let mut config = Config::from_env()?;
    if let Some(region) = &args.region {
        config.region = region.clone();
    }
    if let Some(max) = args.max_retries {
        config.retry = RetryPolicy {
            max_retries: Some(max),
        };
    }

    let settings = settings_from(&args);
    display_info(&format!(
        "Collecting up to {} matches in region {}",
        settings.target_matches, config.region
    ));

    let region = config.region.clone();
    let client = RiotApiClient::new(config);

    let pb = ProgressBar::new(settings.target_matches as u64);
    pb.set_style(
        ProgressStyle::with_template("{spinner} [{elapsed_precise}] {bar:40} {pos}/{len} matches")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    let report = pipeline::run(&client, &settings, |accepted| pb.set_position(accepted as u64))
        .context("Run failed")?;
    pb.finish_with_message("✓ Matches collected");

    display_success(&format!(
        "Computed statistics for {} champions (patch {})",
        report.stats.len(),
        report.catalogue.version
    ));
    display_run_summary(&report);
    display_champion_summary(&report.stats, args.top_n);
    display_counters(&report.stats, args.top_n);

    let path = args
        .output
        .clone()
        .unwrap_or_else(|| StatsSnapshot::default_path(&region));
    StatsSnapshot::from_report(&region, &report)
        .save(&path)
        .with_context(|| format!("Could not save snapshot to {}", path.display()))?;
    display_success(&format!("Snapshot written to {}", path.display()));

    Ok(())
}
