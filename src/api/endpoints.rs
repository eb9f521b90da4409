// URL builders for the platform, regional and static (Data Dragon) hosts.

use crate::domain::Tier;

pub const RANKED_SOLO_QUEUE: &str = "RANKED_SOLO_5x5";
pub const RANKED_SOLO_QUEUE_ID: u32 = 420;
pub const DATA_DRAGON_HOST: &str = "https://ddragon.leagueoflegends.com";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    platform: String,
    regional: String,
}

impl Endpoints {
    pub fn for_region(region: &str) -> Self {
        Endpoints {
            platform: format!("https://{}.api.riotgames.com", region),
            regional: format!("https://{}.api.riotgames.com", regional_routing(region)),
        }
    }

    pub fn league(&self, tier: Tier) -> String {
        format!(
            "{}/lol/league/v4/{}/by-queue/{}",
            self.platform,
            tier.league_path(),
            RANKED_SOLO_QUEUE
        )
    }

    pub fn summoner(&self, summoner_id: &str) -> String {
        format!("{}/lol/summoner/v4/summoners/{}", self.platform, summoner_id)
    }

    pub fn match_ids(&self, puuid: &str, count: usize) -> String {
        format!(
            "{}/lol/match/v5/matches/by-puuid/{}/ids?queue={}&type=ranked&start=0&count={}",
            self.regional, puuid, RANKED_SOLO_QUEUE_ID, count
        )
    }

    pub fn match_detail(&self, match_id: &str) -> String {
        format!("{}/lol/match/v5/matches/{}", self.regional, match_id)
    }

    pub fn versions() -> String {
        format!("{}/api/versions.json", DATA_DRAGON_HOST)
    }

    pub fn champions(version: &str) -> String {
        format!("{}/cdn/{}/data/en_US/champion.json", DATA_DRAGON_HOST, version)
    }
}

pub fn regional_routing(region: &str) -> &'static str {
    match region {
        "na1" | "br1" | "la1" | "la2" => "americas",
        "euw1" | "eun1" | "tr1" | "ru" | "me1" => "europe",
        "kr" | "jp1" => "asia",
        "oc1" | "ph2" | "sg2" | "th2" | "tw2" | "vn2" => "sea",
        _ => "americas",
    }
}
