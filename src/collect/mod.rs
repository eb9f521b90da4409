pub mod matches;
pub mod players;

pub use matches::{collect_matches, CollectionSummary, MatchCollector};
pub use players::{discover_top_players, TierCaps};
