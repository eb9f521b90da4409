use crate::analysis::counter_stats::{CounterStatsEngine, StatsMap, StatsThresholds};
use crate::analysis::matchups::extract_matchups;
use crate::api::models::ChampionCatalogue;
use crate::api::{RiotApiClient, Transport};
use crate::collect::{discover_top_players, CollectionSummary, MatchCollector, TierCaps};
use crate::domain::MatchRecord;
use crate::error::AppError;
use tracing::info;

#[derive(Debug, Clone, PartialEq)]
pub struct RunSettings {
    pub tier_caps: TierCaps,
    pub matches_per_player: usize,
    pub target_matches: usize,
    pub thresholds: StatsThresholds,
}

impl Default for RunSettings {
    fn default() -> Self {
        RunSettings {
            tier_caps: TierCaps::default(),
            matches_per_player: 40,
            target_matches: 1000,
            thresholds: StatsThresholds::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RunReport {
    pub catalogue: ChampionCatalogue,
    pub stats: StatsMap,
    pub players_discovered: usize,
    pub matches_processed: usize,
    pub observations: usize,
    /// Observations dropped because a champion was missing from the catalogue.
    pub skipped_observations: usize,
    pub collection: CollectionSummary,
}

/// Runs the whole batch. `on_match` is called with the running count of
/// accepted matches. Only a catalogue failure aborts the run.
pub fn run<T, F>(
    client: &RiotApiClient<T>,
    settings: &RunSettings,
    mut on_match: F,
) -> Result<RunReport, AppError>
where
    T: Transport,
    F: FnMut(usize),
{
    let catalogue = client
        .get_champion_catalogue()
        .map_err(|e| AppError::CatalogueUnavailable(e.to_string()))?;
    info!(version = %catalogue.version, champions = catalogue.champions.len(), "Catalogue loaded");

    let players = discover_top_players(client, &settings.tier_caps);
    info!(players = players.len(), "Players discovered");

    let mut collector = MatchCollector::new(client, &players, settings.matches_per_player);
    let mut matches: Vec<MatchRecord> = Vec::new();
    for record in collector.by_ref().take(settings.target_matches) {
        matches.push(record);
        on_match(matches.len());
    }
    let collection = collector.summary().clone();
    info!(matches = matches.len(), "Matches collected");

    let observations = extract_matchups(&matches);
    let engine = CounterStatsEngine::new(settings.thresholds);
    let (stats, skipped_observations) = engine.compute_counted(&observations, &catalogue.ids());
    info!(
        observations = observations.len(),
        skipped = skipped_observations,
        "Statistics computed"
    );

    Ok(RunReport {
        catalogue,
        stats,
        players_discovered: players.len(),
        matches_processed: matches.len(),
        observations: observations.len(),
        skipped_observations,
        collection,
    })
}
