//! Counter statistics.
//!
//! Observations are folded into directional samples keyed by
//! (champion, opponent, lane). A sample counts the games the pair played in
//! that lane and how many the *opponent* won, so every `CounterRecord` in a
//! champion's lists describes an opponent and that opponent's win rate
//! against the champion. Samples that are large enough and significant are
//! classified by how far the rate sits from 50%.

use super::matchups::MatchupObservation;
use super::significance::{NormalApproximation, SignificanceTest};
use crate::domain::Lane;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatsThresholds {
    pub min_sample_size: u32,
    pub significance_level: f64,
    /// Minimum |rate − 0.5| for each strength class.
    pub hard: f64,
    pub strong: f64,
    pub soft: f64,
    /// Opponent win rate that lands in `strong_counters`.
    pub strong_counter_rate: f64,
    /// Opponent win rate that lands in `counters`.
    pub counter_rate: f64,
    /// Opponent win rate at or below which the champion counters the opponent.
    pub countered_by_rate: f64,
}

impl Default for StatsThresholds {
    fn default() -> Self {
        StatsThresholds {
            min_sample_size: 30,
            significance_level: 0.05,
            hard: 0.15,
            strong: 0.10,
            soft: 0.06,
            strong_counter_rate: 0.65,
            counter_rate: 0.56,
            countered_by_rate: 0.44,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StrengthClass {
    InsufficientData,
    Neutral,
    SoftCounter,
    StrongCounter,
    HardCounter,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct MatchupKey {
    pub champion: String,
    pub opponent: String,
    pub lane: Lane,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchupSample {
    pub opponent_wins: u32,
    pub total: u32,
}

impl MatchupSample {
    pub fn record(&mut self, opponent_won: bool) {
        self.total += 1;
        if opponent_won {
            self.opponent_wins += 1;
        }
    }

    pub fn opponent_win_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.opponent_wins as f64 / self.total as f64
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CounterRecord {
    pub opponent_id: String,
    pub lane: Lane,
    pub win_rate: f64,
    pub sample_size: u32,
    pub p_value: f64,
    pub strength_class: StrengthClass,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallStats {
    pub total_games: u32,
    pub wins: u32,
    pub win_rate: f64,
    pub is_reliable: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChampionStats {
    pub id: String,
    pub overall: OverallStats,
    pub strong_counters: Vec<CounterRecord>,
    pub counters: Vec<CounterRecord>,
    pub countered_by: Vec<CounterRecord>,
}

impl ChampionStats {
    pub fn new(id: impl Into<String>) -> Self {
        ChampionStats {
            id: id.into(),
            overall: OverallStats::default(),
            strong_counters: Vec::new(),
            counters: Vec::new(),
            countered_by: Vec::new(),
        }
    }
}

/// Result of testing one sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub win_rate: f64,
    pub p_value: f64,
    pub strength: StrengthClass,
}

pub type StatsMap = BTreeMap<String, ChampionStats>;

pub struct CounterStatsEngine<S: SignificanceTest = NormalApproximation> {
    thresholds: StatsThresholds,
    test: S,
}

impl CounterStatsEngine<NormalApproximation> {
    pub fn new(thresholds: StatsThresholds) -> Self {
        Self::with_test(thresholds, NormalApproximation)
    }
}

impl Default for CounterStatsEngine<NormalApproximation> {
    fn default() -> Self {
        Self::new(StatsThresholds::default())
    }
}

impl<S: SignificanceTest> CounterStatsEngine<S> {
    pub fn with_test(thresholds: StatsThresholds, test: S) -> Self {
        CounterStatsEngine { thresholds, test }
    }

    pub fn classify(&self, sample: &MatchupSample) -> Classification {
        let win_rate = sample.opponent_win_rate();

        if sample.total < self.thresholds.min_sample_size {
            return Classification {
                win_rate,
                p_value: 1.0,
                strength: StrengthClass::InsufficientData,
            };
        }

        let p_value = self.test.p_value(sample.opponent_wins, sample.total);
        let strength = if p_value >= self.thresholds.significance_level {
            StrengthClass::InsufficientData
        } else {
            let deviation = (win_rate - 0.5).abs();
            if deviation >= self.thresholds.hard {
                StrengthClass::HardCounter
            } else if deviation >= self.thresholds.strong {
                StrengthClass::StrongCounter
            } else if deviation >= self.thresholds.soft {
                StrengthClass::SoftCounter
            } else {
                StrengthClass::Neutral
            }
        };

        Classification {
            win_rate,
            p_value,
            strength,
        }
    }

    /// Builds one `ChampionStats` per known champion. Observations naming an
    /// unknown champion are ignored.
    pub fn compute(
        &self,
        observations: &[MatchupObservation],
        known_champions: &[String],
    ) -> StatsMap {
        self.compute_counted(observations, known_champions).0
    }

    /// Like `compute`, also returning how many observations were ignored.
    pub fn compute_counted(
        &self,
        observations: &[MatchupObservation],
        known_champions: &[String],
    ) -> (StatsMap, usize) {
        let known: BTreeSet<&str> = known_champions.iter().map(String::as_str).collect();
        let mut stats: StatsMap = known
            .iter()
            .map(|&id| (id.to_string(), ChampionStats::new(id)))
            .collect();

        let (samples, skipped) = accumulate(observations, |id| known.contains(id));
        if skipped > 0 {
            debug!(skipped, "Ignored observations with unknown champions");
        }

        for (key, sample) in &samples {
            if let Some(row) = stats.get_mut(&key.champion) {
                row.overall.total_games += sample.total;
                row.overall.wins += sample.total - sample.opponent_wins;
            }

            let result = self.classify(sample);
            if result.strength == StrengthClass::InsufficientData {
                continue;
            }

            let record = CounterRecord {
                opponent_id: key.opponent.clone(),
                lane: key.lane,
                win_rate: result.win_rate,
                sample_size: sample.total,
                p_value: result.p_value,
                strength_class: result.strength,
            };

            if result.win_rate <= self.thresholds.countered_by_rate {
                if let Some(opponent) = stats.get_mut(&key.opponent) {
                    opponent.countered_by.push(CounterRecord {
                        opponent_id: key.champion.clone(),
                        win_rate: 1.0 - result.win_rate,
                        ..record.clone()
                    });
                }
            }

            if let Some(row) = stats.get_mut(&key.champion) {
                if result.win_rate >= self.thresholds.strong_counter_rate {
                    row.strong_counters.push(record.clone());
                }
                if result.win_rate >= self.thresholds.counter_rate {
                    row.counters.push(record);
                }
            }
        }

        for row in stats.values_mut() {
            let overall = &mut row.overall;
            if overall.total_games > 0 {
                overall.win_rate = overall.wins as f64 / overall.total_games as f64;
            }
            overall.is_reliable = overall.total_games >= self.thresholds.min_sample_size;

            row.strong_counters.sort_by(by_strength);
            row.counters.sort_by(by_strength);
            row.countered_by.sort_by(by_strength);
        }

        (stats, skipped)
    }
}

/// Folds observations into directional samples. Returns the samples and
/// the number of observations rejected by `is_known`.
pub fn accumulate<F>(
    observations: &[MatchupObservation],
    is_known: F,
) -> (BTreeMap<MatchupKey, MatchupSample>, usize)
where
    F: Fn(&str) -> bool,
{
    let mut samples: BTreeMap<MatchupKey, MatchupSample> = BTreeMap::new();
    let mut skipped = 0;

    for obs in observations {
        if !is_known(&obs.champion_a) || !is_known(&obs.champion_b) {
            skipped += 1;
            continue;
        }

        samples
            .entry(MatchupKey {
                champion: obs.champion_a.clone(),
                opponent: obs.champion_b.clone(),
                lane: obs.lane,
            })
            .or_default()
            .record(!obs.winner_is_a);

        samples
            .entry(MatchupKey {
                champion: obs.champion_b.clone(),
                opponent: obs.champion_a.clone(),
                lane: obs.lane,
            })
            .or_default()
            .record(obs.winner_is_a);
    }

    (samples, skipped)
}

fn by_strength(a: &CounterRecord, b: &CounterRecord) -> Ordering {
    b.win_rate
        .total_cmp(&a.win_rate)
        .then_with(|| b.sample_size.cmp(&a.sample_size))
        .then_with(|| a.opponent_id.cmp(&b.opponent_id))
        .then_with(|| a.lane.cmp(&b.lane))
}

/// Computes statistics with the default thresholds and z-test.
pub fn compute_stats(observations: &[MatchupObservation], known_champions: &[String]) -> StatsMap {
    CounterStatsEngine::default().compute(observations, known_champions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn obs(lane: Lane, a: &str, b: &str, winner_is_a: bool) -> MatchupObservation {
        MatchupObservation {
            lane,
            champion_a: a.to_string(),
            champion_b: b.to_string(),
            winner_is_a,
        }
    }

    /// `a_wins` games won by `a`, the rest by `b`.
    fn series(
        lane: Lane,
        a: &str,
        b: &str,
        a_wins: usize,
        total: usize,
    ) -> Vec<MatchupObservation> {
        (0..total).map(|i| obs(lane, a, b, i < a_wins)).collect()
    }

    fn known(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_every_known_champion_has_a_row() {
        let stats = compute_stats(&[], &known(&["Ahri", "Garen"]));

        assert_eq!(stats.len(), 2);
        let ahri = &stats["Ahri"];
        assert_eq!(ahri.overall, OverallStats::default());
        assert!(ahri.counters.is_empty());
    }

    #[test]
    fn test_one_sided_series_is_hard_counter() {
        let observations = series(Lane::Top, "X", "Y", 40, 40);
        let stats = compute_stats(&observations, &known(&["X", "Y"]));

        let y = &stats["Y"];
        assert_eq!(y.countered_by.len(), 1);
        let entry = &y.countered_by[0];
        assert_eq!(entry.opponent_id, "X");
        assert_eq!(entry.lane, Lane::Top);
        assert!((entry.win_rate - 1.0).abs() < 1e-9);
        assert_eq!(entry.strength_class, StrengthClass::HardCounter);

        assert_eq!(y.strong_counters[0].opponent_id, "X");
        assert_eq!(y.counters[0].opponent_id, "X");

        let x = &stats["X"];
        assert!(x.strong_counters.is_empty());
        assert!(x.counters.is_empty());
        assert_eq!(x.overall.wins, 40);
        assert!((x.overall.win_rate - 1.0).abs() < 1e-9);
        assert_eq!(y.overall.wins, 0);
        assert!(y.overall.is_reliable);
    }

    #[test]
    fn test_sample_of_29_is_excluded() {
        let observations = series(Lane::Middle, "X", "Y", 29, 29);
        let stats = compute_stats(&observations, &known(&["X", "Y"]));

        for row in stats.values() {
            assert!(row.strong_counters.is_empty());
            assert!(row.counters.is_empty());
            assert!(row.countered_by.is_empty());
            assert!(!row.overall.is_reliable);
        }
    }

    #[test]
    fn test_sample_of_30_at_seventy_percent() {
        // Y beats X in 21 of 30 games.
        let observations = series(Lane::Bottom, "X", "Y", 9, 30);
        let stats = compute_stats(&observations, &known(&["X", "Y"]));

        let x = &stats["X"];
        assert_eq!(x.strong_counters.len(), 1);
        let entry = &x.strong_counters[0];
        assert_eq!(entry.opponent_id, "Y");
        assert_eq!(entry.sample_size, 30);
        assert!((entry.win_rate - 0.7).abs() < 1e-9);
        assert!(entry.p_value < 0.05);
        assert_eq!(entry.strength_class, StrengthClass::HardCounter);
    }

    #[test]
    fn test_classification_bands() {
        let engine = CounterStatsEngine::default();
        let classify = |opponent_wins, total| {
            engine
                .classify(&MatchupSample {
                    opponent_wins,
                    total,
                })
                .strength
        };

        assert_eq!(classify(305, 500), StrengthClass::StrongCounter); // 0.61
        assert_eq!(classify(290, 500), StrengthClass::SoftCounter); // 0.58
        assert_eq!(classify(520, 1000), StrengthClass::InsufficientData); // p ≈ 0.2
        assert_eq!(classify(5300, 10000), StrengthClass::Neutral); // 0.53, significant
        assert_eq!(classify(25, 29), StrengthClass::InsufficientData);
    }

    #[test]
    fn test_soft_counter_only_in_counters() {
        // Y wins 290 of 500 (0.58).
        let observations = series(Lane::Jungle, "X", "Y", 210, 500);
        let stats = compute_stats(&observations, &known(&["X", "Y"]));

        let x = &stats["X"];
        assert!(x.strong_counters.is_empty());
        assert_eq!(x.counters.len(), 1);
        assert_eq!(x.counters[0].strength_class, StrengthClass::SoftCounter);
        assert!(stats["Y"].countered_by.is_empty());
    }

    #[test]
    fn test_relationship_thresholds_are_inclusive() {
        let champions = known(&["X", "Y"]);

        // Y wins 280 of 500: exactly the counter rate.
        let stats = compute_stats(&series(Lane::Top, "X", "Y", 220, 500), &champions);
        assert_eq!(stats["X"].counters.len(), 1);
        assert_eq!(stats["X"].counters[0].win_rate, 0.56);
        assert!(stats["X"].strong_counters.is_empty());
        // X's side of the same games sits exactly on the countered-by rate.
        assert_eq!(stats["X"].countered_by.len(), 1);
        assert_eq!(stats["X"].countered_by[0].opponent_id, "Y");

        // Y wins 325 of 500: exactly the strong counter rate.
        let stats = compute_stats(&series(Lane::Top, "X", "Y", 175, 500), &champions);
        assert_eq!(stats["X"].strong_counters.len(), 1);
        assert_eq!(stats["X"].strong_counters[0].win_rate, 0.65);
        assert_eq!(stats["X"].counters.len(), 1);
    }

    #[test]
    fn test_rates_just_inside_neutral_band_are_unlisted() {
        // Y wins 2799 of 5000 (0.5598), significant but below every list.
        let stats = compute_stats(&series(Lane::Top, "X", "Y", 2201, 5000), &known(&["X", "Y"]));

        for row in stats.values() {
            assert!(row.strong_counters.is_empty());
            assert!(row.counters.is_empty());
            assert!(row.countered_by.is_empty());
        }
        assert_eq!(stats["X"].overall.total_games, 5000);
    }

    #[test]
    fn test_countered_by_mirrors_moderate_rate() {
        // X wins 300 of 500, so Y's rate against X is 0.4.
        let stats = compute_stats(&series(Lane::Middle, "X", "Y", 300, 500), &known(&["X", "Y"]));

        let y = &stats["Y"];
        assert_eq!(y.countered_by.len(), 1);
        let entry = &y.countered_by[0];
        assert_eq!(entry.opponent_id, "X");
        assert_eq!(entry.sample_size, 500);
        assert!((entry.win_rate - 0.6).abs() < 1e-9);
        assert!((y.counters[0].win_rate - entry.win_rate).abs() < 1e-9);
        assert!(stats["X"].countered_by.is_empty());
    }

    #[test]
    fn test_totals_match_samples_across_lanes() {
        let mut observations = series(Lane::Top, "A", "B", 10, 12);
        observations.extend(series(Lane::Middle, "A", "C", 3, 5));
        observations.extend(series(Lane::Middle, "C", "B", 4, 4));
        let stats = compute_stats(&observations, &known(&["A", "B", "C"]));

        assert_eq!(stats["A"].overall.total_games, 17);
        assert_eq!(stats["A"].overall.wins, 13);
        assert_eq!(stats["B"].overall.total_games, 16);
        assert_eq!(stats["B"].overall.wins, 2);
        assert_eq!(stats["C"].overall.total_games, 9);
        assert_eq!(stats["C"].overall.wins, 6);
    }

    #[test]
    fn test_unknown_champions_are_ignored() {
        let mut observations = series(Lane::Top, "A", "Mystery", 5, 5);
        observations.extend(series(Lane::Top, "A", "B", 1, 2));
        let stats = compute_stats(&observations, &known(&["A", "B"]));

        assert!(!stats.contains_key("Mystery"));
        assert_eq!(stats["A"].overall.total_games, 2);

        let (counted, ignored) =
            CounterStatsEngine::default().compute_counted(&observations, &known(&["A", "B"]));
        assert_eq!(counted, stats);
        assert_eq!(ignored, 5);

        let (samples, skipped) = accumulate(&observations, |id| id != "Mystery");
        assert_eq!(skipped, 5);
        assert_eq!(samples.len(), 2);
    }

    #[test]
    fn test_compute_is_deterministic() {
        let mut observations = series(Lane::Top, "A", "B", 30, 40);
        observations.extend(series(Lane::Top, "A", "C", 31, 40));
        observations.extend(series(Lane::Utility, "B", "C", 5, 45));
        let champions = known(&["A", "B", "C"]);

        let first = compute_stats(&observations, &champions);
        let second = compute_stats(&observations, &champions);
        assert_eq!(first, second);

        let mut reversed = observations.clone();
        reversed.reverse();
        assert_eq!(compute_stats(&reversed, &champions), first);
    }

    #[test]
    fn test_lists_sorted_by_win_rate() {
        let mut observations = series(Lane::Top, "A", "B", 10, 40);
        observations.extend(series(Lane::Top, "A", "C", 2, 40));
        let stats = compute_stats(&observations, &known(&["A", "B", "C"]));

        let opponents: Vec<&str> = stats["A"]
            .counters
            .iter()
            .map(|c| c.opponent_id.as_str())
            .collect();
        assert_eq!(opponents, vec!["C", "B"]);
    }

    #[test]
    fn test_substitute_significance_test() {
        struct AlwaysSignificant;
        impl SignificanceTest for AlwaysSignificant {
            fn p_value(&self, _: u32, _: u32) -> f64 {
                0.0
            }
        }

        let thresholds = StatsThresholds {
            min_sample_size: 1,
            ..StatsThresholds::default()
        };
        let engine = CounterStatsEngine::with_test(thresholds, AlwaysSignificant);
        let stats = engine.compute(&series(Lane::Top, "A", "B", 0, 3), &known(&["A", "B"]));

        assert_eq!(stats["A"].strong_counters[0].opponent_id, "B");
        assert_eq!(stats["A"].strong_counters[0].p_value, 0.0);
    }
}
