use crate::domain::{Lane, MatchRecord, ParticipantRecord};
use serde::{Deserialize, Serialize};

/// One same-lane 1v1 pairing inside a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchupObservation {
    pub lane: Lane,
    pub champion_a: String,
    pub champion_b: String,
    pub winner_is_a: bool,
}

pub fn extract_matchups(matches: &[MatchRecord]) -> Vec<MatchupObservation> {
    matches.iter().flat_map(extract_from_match).collect()
}

/// Lanes holding exactly two classified participants on opposing teams yield
/// one observation. Any other lane yields nothing.
pub fn extract_from_match(record: &MatchRecord) -> Vec<MatchupObservation> {
    Lane::PLAYABLE
        .iter()
        .filter_map(|&lane| {
            let laners: Vec<&ParticipantRecord> = record
                .participants
                .iter()
                .filter(|p| p.resolved_lane() == Some(lane))
                .collect();

            match laners.as_slice() {
                [a, b] if a.team_id != b.team_id => Some(MatchupObservation {
                    lane,
                    champion_a: a.champion.clone(),
                    champion_b: b.champion.clone(),
                    winner_is_a: a.win,
                }),
                _ => None,
            }
        })
        .collect()
}
