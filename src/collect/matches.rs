use crate::api::{RiotApiClient, Transport};
use crate::domain::{GameMode, MatchRecord, PlayerRef, QueueKind};
use std::collections::{HashSet, VecDeque};
use std::fmt;
use std::slice;
use tracing::{debug, info, warn};

pub const MIN_DURATION_SECS: i64 = 900;
pub const MAX_DURATION_SECS: i64 = 3600;
pub const PARTICIPANTS_PER_MATCH: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub enum Rejection {
    Queue(QueueKind),
    Mode(GameMode),
    Duration(i64),
    Participants(usize),
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::Queue(queue) => write!(f, "not ranked solo ({:?})", queue),
            Rejection::Mode(mode) => write!(f, "not classic mode ({:?})", mode),
            Rejection::Duration(secs) => write!(f, "duration {}s out of range", secs),
            Rejection::Participants(n) => write!(f, "{} participants", n),
        }
    }
}

pub fn validate(record: &MatchRecord) -> Result<(), Rejection> {
    if record.queue != QueueKind::RankedSolo {
        return Err(Rejection::Queue(record.queue));
    }
    if record.mode != GameMode::Classic {
        return Err(Rejection::Mode(record.mode.clone()));
    }
    if !(MIN_DURATION_SECS..=MAX_DURATION_SECS).contains(&record.duration_seconds) {
        return Err(Rejection::Duration(record.duration_seconds));
    }
    if record.participants.len() != PARTICIPANTS_PER_MATCH {
        return Err(Rejection::Participants(record.participants.len()));
    }
    Ok(())
}

/// Counters describing one collection run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectionSummary {
    pub players_visited: usize,
    pub id_lists_failed: usize,
    pub duplicates_skipped: usize,
    pub fetch_failures: usize,
    pub rejected: usize,
    pub accepted: usize,
}

/// Yields valid, unseen matches player by player. Callers stop pulling once
/// they have enough.
pub struct MatchCollector<'a, T: Transport> {
    client: &'a RiotApiClient<T>,
    players: slice::Iter<'a, PlayerRef>,
    per_player: usize,
    pending: VecDeque<String>,
    seen: HashSet<String>,
    summary: CollectionSummary,
}

impl<'a, T: Transport> MatchCollector<'a, T> {
    pub fn new(client: &'a RiotApiClient<T>, players: &'a [PlayerRef], per_player: usize) -> Self {
        MatchCollector {
            client,
            players: players.iter(),
            per_player,
            pending: VecDeque::new(),
            seen: HashSet::new(),
            summary: CollectionSummary::default(),
        }
    }

    pub fn summary(&self) -> &CollectionSummary {
        &self.summary
    }

    fn resolve(&mut self, match_id: String) -> Option<MatchRecord> {
        if !self.seen.insert(match_id.clone()) {
            self.summary.duplicates_skipped += 1;
            return None;
        }

        let record = match self.client.get_match(&match_id) {
            Ok(dto) => MatchRecord::from(dto),
            Err(e) => {
                warn!(%match_id, error = %e, "Match fetch failed, skipping");
                self.summary.fetch_failures += 1;
                return None;
            }
        };

        match validate(&record) {
            Ok(()) => {
                self.summary.accepted += 1;
                Some(record)
            }
            Err(reason) => {
                debug!(%match_id, %reason, "Match discarded");
                self.summary.rejected += 1;
                None
            }
        }
    }

    fn load_next_player(&mut self) -> bool {
        let Some(player) = self.players.next() else {
            return false;
        };
        self.summary.players_visited += 1;

        match self.client.get_match_ids(&player.account_id, self.per_player) {
            Ok(ids) => {
                debug!(tier = %player.tier, ids = ids.len(), "Loaded match ids");
                self.pending.extend(ids.into_iter().take(self.per_player));
            }
            Err(e) => {
                warn!(tier = %player.tier, error = %e, "Match id list failed, skipping player");
                self.summary.id_lists_failed += 1;
            }
        }
        true
    }
}

impl<T: Transport> Iterator for MatchCollector<'_, T> {
    type Item = MatchRecord;

    fn next(&mut self) -> Option<MatchRecord> {
        loop {
            while let Some(match_id) = self.pending.pop_front() {
                if let Some(record) = self.resolve(match_id) {
                    return Some(record);
                }
            }
            if !self.load_next_player() {
                return None;
            }
        }
    }
}

/// Collects up to `target` valid matches, stopping as soon as it is reached.
pub fn collect_matches<T: Transport>(
    client: &RiotApiClient<T>,
    players: &[PlayerRef],
    per_player: usize,
    target: usize,
) -> (Vec<MatchRecord>, CollectionSummary) {
    let mut collector = MatchCollector::new(client, players, per_player);
    let matches: Vec<MatchRecord> = collector.by_ref().take(target).collect();
    let summary = collector.summary().clone();

    info!(
        accepted = summary.accepted,
        rejected = summary.rejected,
        duplicates = summary.duplicates_skipped,
        "Collection finished"
    );
    (matches, summary)
}
