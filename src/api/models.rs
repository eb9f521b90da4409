use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// League V4 response (challenger / grandmaster / master leagues)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueListDto {
    #[serde(default)]
    pub entries: Vec<LeagueItemDto>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct LeagueItemDto {
    #[serde(default)]
    pub summoner_id: Option<String>,
    #[serde(default)]
    pub puuid: Option<String>,
    #[serde(default)]
    pub rank: String,
    pub league_points: i32,
}

// Summoner V4 response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummonerDto {
    pub puuid: String,
}

// Match V5 response
#[derive(Debug, Deserialize)]
pub struct MatchDto {
    pub metadata: MatchMetadata,
    pub info: MatchInfo,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchMetadata {
    pub match_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchInfo {
    pub game_duration: i64,
    #[serde(default)]
    pub game_mode: String,
    #[serde(default)]
    pub queue_id: u32,
    pub participants: Vec<ParticipantDto>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantDto {
    pub champion_name: String,
    pub team_id: i32,
    pub win: bool,
    #[serde(default)]
    pub team_position: String, // TOP, JUNGLE, MIDDLE, BOTTOM, UTILITY
    #[serde(default)]
    pub role: String, // TOP, JUNGLE, MID, ADC, SUPPORT (legacy: CARRY, DUO_SUPPORT, ...)
}

// Data Dragon champion.json response
#[derive(Debug, Deserialize)]
pub struct DataDragonChampions {
    pub version: String,
    pub data: BTreeMap<String, ChampionInfo>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ChampionInfo {
    pub id: String,
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Static champion reference data, keyed by champion identifier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChampionCatalogue {
    pub version: String,
    pub champions: BTreeMap<String, ChampionInfo>,
}

impl ChampionCatalogue {
    pub fn ids(&self) -> Vec<String> {
        self.champions.keys().cloned().collect()
    }
}

impl From<DataDragonChampions> for ChampionCatalogue {
    fn from(dto: DataDragonChampions) -> Self {
        ChampionCatalogue {
            version: dto.version,
            champions: dto.data,
        }
    }
}
