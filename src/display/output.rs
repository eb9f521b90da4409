use crate::analysis::counter_stats::{ChampionStats, CounterRecord, StatsMap, StrengthClass};
use crate::pipeline::RunReport;
use colored::*;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct ChampionRow {
    #[tabled(rename = "#")]
    rank: String,
    champion: String,
    games: String,
    win_rate: String,
    reliable: String,
    #[tabled(rename = "worst matchup")]
    worst_matchup: String,
}

#[derive(Tabled)]
struct CounterRow {
    champion: String,
    lane: String,
    counter: String,
    #[tabled(rename = "enemy WR")]
    win_rate: String,
    games: String,
    strength: String,
}

fn strength_label(strength: StrengthClass) -> ColoredString {
    match strength {
        StrengthClass::HardCounter => "HARD".red().bold(),
        StrengthClass::StrongCounter => "STRONG".red(),
        StrengthClass::SoftCounter => "SOFT".yellow(),
        StrengthClass::Neutral => "NEUTRAL".normal(),
        StrengthClass::InsufficientData => "N/A".dimmed(),
    }
}

fn worst_matchup(stats: &ChampionStats) -> Option<&CounterRecord> {
    stats.counters.first()
}

/// Most-played champions first.
pub fn display_champion_summary(stats: &StatsMap, top_n: usize) {
    println!("\n{}", "📊 CHAMPION OVERVIEW".bold().cyan());
    println!("{}\n", "=".repeat(70).cyan());

    let mut played: Vec<&ChampionStats> = stats
        .values()
        .filter(|s| s.overall.total_games > 0)
        .collect();

    if played.is_empty() {
        println!("{}", "No matchups observed (not enough data)".yellow());
        return;
    }

    played.sort_by(|a, b| {
        b.overall
            .total_games
            .cmp(&a.overall.total_games)
            .then_with(|| a.id.cmp(&b.id))
    });
    played.truncate(top_n);

    let rows: Vec<ChampionRow> = played
        .iter()
        .enumerate()
        .map(|(idx, s)| ChampionRow {
            rank: format!("#{}", idx + 1),
            champion: s.id.clone(),
            games: s.overall.total_games.to_string(),
            win_rate: format!("{:.1}%", s.overall.win_rate * 100.0),
            reliable: if s.overall.is_reliable {
                "yes".green().to_string()
            } else {
                "no".yellow().to_string()
            },
            worst_matchup: worst_matchup(s)
                .map(|c| format!("{} ({:.0}%)", c.opponent_id, c.win_rate * 100.0))
                .unwrap_or_else(|| "-".to_string()),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);
}

/// Every significant counter relationship, strongest first.
pub fn display_counters(stats: &StatsMap, top_n: usize) {
    let mut rows: Vec<(&str, &CounterRecord)> = stats
        .values()
        .flat_map(|s| s.counters.iter().map(move |c| (s.id.as_str(), c)))
        .collect();

    if rows.is_empty() {
        println!("{}", "No statistically significant counters found".yellow());
        return;
    }

    rows.sort_by(|a, b| b.1.win_rate.total_cmp(&a.1.win_rate).then_with(|| a.0.cmp(b.0)));
    rows.truncate(top_n);

    println!("\n{}", "⚔️  STRONGEST COUNTERS".bold().cyan());
    println!("{}\n", "=".repeat(70).cyan());

    let rows: Vec<CounterRow> = rows
        .into_iter()
        .map(|(champion, c)| CounterRow {
            champion: champion.to_string(),
            lane: c.lane.to_string(),
            counter: c.opponent_id.clone(),
            win_rate: format!("{:.1}%", c.win_rate * 100.0),
            games: c.sample_size.to_string(),
            strength: strength_label(c.strength_class).to_string(),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);

    println!("\n{}", "Interpretation".bold().yellow());
    println!("• Enemy WR: how often the counter wins that lane matchup");
    println!("• Only samples with enough games and p < 0.05 are listed\n");
}

pub fn display_run_summary(report: &RunReport) {
    let summary = &report.collection;
    println!("\n{}", "Run summary".bold());
    println!("   Players discovered: {}", report.players_discovered);
    println!(
        "   Matches: {} accepted, {} rejected, {} duplicates, {} failed",
        summary.accepted.to_string().green(),
        summary.rejected,
        summary.duplicates_skipped,
        summary.fetch_failures
    );
    println!("   Lane matchups: {}", report.observations);
    if report.skipped_observations > 0 {
        println!(
            "   {} matchups skipped (champion missing from patch {})",
            report.skipped_observations.to_string().yellow(),
            report.catalogue.version
        );
    }
}

pub fn display_error(error: &str) {
    eprintln!("{} {}", "❌ Error:".red().bold(), error);
}

pub fn display_info(message: &str) {
    println!("{} {}", "ℹ️".cyan(), message);
}

pub fn display_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}
