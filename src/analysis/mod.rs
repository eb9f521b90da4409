pub mod counter_stats;
pub mod matchups;
pub mod significance;

pub use counter_stats::{
    compute_stats, ChampionStats, CounterRecord, CounterStatsEngine, OverallStats, StatsMap,
    StatsThresholds, StrengthClass,
};
pub use matchups::{extract_matchups, MatchupObservation};
pub use significance::{NormalApproximation, SignificanceTest};
