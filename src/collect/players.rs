use crate::api::models::LeagueItemDto;
use crate::api::{RiotApiClient, Transport};
use crate::domain::{PlayerRef, Tier};
use crate::error::AppError;
use tracing::{debug, info, warn};

/// Maximum number of players taken from each leaderboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierCaps {
    pub challenger: usize,
    pub grandmaster: usize,
    pub master: usize,
}

impl Default for TierCaps {
    fn default() -> Self {
        TierCaps {
            challenger: 100,
            grandmaster: 60,
            master: 40,
        }
    }
}

impl TierCaps {
    pub fn for_tier(&self, tier: Tier) -> usize {
        match tier {
            Tier::Challenger => self.challenger,
            Tier::Grandmaster => self.grandmaster,
            Tier::Master => self.master,
        }
    }
}

/// Top players of each tier, tier-major and by descending points.
/// Failed tiers and unresolvable entries are logged and left out.
pub fn discover_top_players<T: Transport>(
    client: &RiotApiClient<T>,
    caps: &TierCaps,
) -> Vec<PlayerRef> {
    let mut players = Vec::new();

    for tier in Tier::ALL {
        let cap = caps.for_tier(tier);
        if cap == 0 {
            continue;
        }

        let league = match client.get_league(tier) {
            Ok(league) => league,
            Err(e) => {
                warn!(%tier, error = %e, "Leaderboard unavailable, skipping tier");
                continue;
            }
        };

        let mut entries = league.entries;
        entries.sort_by(|a, b| b.league_points.cmp(&a.league_points));
        entries.truncate(cap);

        let before = players.len();
        for entry in entries {
            match resolve_account(client, &entry) {
                Ok(account_id) => players.push(PlayerRef {
                    account_id,
                    tier,
                    rank: entry.rank,
                    points: entry.league_points,
                }),
                Err(e) => warn!(%tier, error = %e, "Could not resolve player, skipping"),
            }
        }

        info!(%tier, players = players.len() - before, "Tier discovered");
    }

    players
}

fn resolve_account<T: Transport>(
    client: &RiotApiClient<T>,
    entry: &LeagueItemDto,
) -> Result<String, AppError> {
    match (&entry.summoner_id, &entry.puuid) {
        (Some(summoner_id), _) => {
            debug!(summoner_id = %summoner_id, "Resolving account");
            Ok(client.get_summoner(summoner_id)?.puuid)
        }
        (None, Some(puuid)) => Ok(puuid.clone()),
        (None, None) => Err(AppError::JsonError(
            "league entry has neither summonerId nor puuid".to_string(),
        )),
    }
}
