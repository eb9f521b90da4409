use crate::api::endpoints::RANKED_SOLO_QUEUE_ID;
use crate::api::models::{MatchDto, ParticipantDto};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Tier {
    Challenger,
    Grandmaster,
    Master,
}

impl Tier {
    /// Query order used by discovery.
    pub const ALL: [Tier; 3] = [Tier::Challenger, Tier::Grandmaster, Tier::Master];

    pub fn league_path(self) -> &'static str {
        match self {
            Tier::Challenger => "challengerleagues",
            Tier::Grandmaster => "grandmasterleagues",
            Tier::Master => "masterleagues",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Tier::Challenger => "CHALLENGER",
            Tier::Grandmaster => "GRANDMASTER",
            Tier::Master => "MASTER",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Lane {
    Top,
    Jungle,
    Middle,
    Bottom,
    Utility,
    Unknown,
}

impl Lane {
    pub const PLAYABLE: [Lane; 5] = [
        Lane::Top,
        Lane::Jungle,
        Lane::Middle,
        Lane::Bottom,
        Lane::Utility,
    ];

    /// Parses the explicit position field. Anything else is `Unknown`.
    pub fn from_position(raw: &str) -> Lane {
        match raw {
            "TOP" => Lane::Top,
            "JUNGLE" => Lane::Jungle,
            "MIDDLE" => Lane::Middle,
            "BOTTOM" => Lane::Bottom,
            "UTILITY" => Lane::Utility,
            _ => Lane::Unknown,
        }
    }

    pub fn is_playable(self) -> bool {
        self != Lane::Unknown
    }
}

impl fmt::Display for Lane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Lane::Top => "TOP",
            Lane::Jungle => "JUNGLE",
            Lane::Middle => "MIDDLE",
            Lane::Bottom => "BOTTOM",
            Lane::Utility => "UTILITY",
            Lane::Unknown => "UNKNOWN",
        };
        f.write_str(name)
    }
}

/// Role hints used when the position field is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Top,
    Jungle,
    Mid,
    Adc,
    Support,
}

impl Role {
    pub fn parse(raw: &str) -> Option<Role> {
        match raw {
            "TOP" => Some(Role::Top),
            "JUNGLE" => Some(Role::Jungle),
            "MID" | "MIDDLE" => Some(Role::Mid),
            "ADC" | "CARRY" | "DUO_CARRY" | "BOTTOM" => Some(Role::Adc),
            "SUPPORT" | "DUO_SUPPORT" | "UTILITY" => Some(Role::Support),
            _ => None,
        }
    }

    pub fn lane(self) -> Lane {
        match self {
            Role::Top => Lane::Top,
            Role::Jungle => Lane::Jungle,
            Role::Mid => Lane::Middle,
            Role::Adc => Lane::Bottom,
            Role::Support => Lane::Utility,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueKind {
    RankedSolo,
    Other(u32),
}

impl From<u32> for QueueKind {
    fn from(queue_id: u32) -> Self {
        if queue_id == RANKED_SOLO_QUEUE_ID {
            QueueKind::RankedSolo
        } else {
            QueueKind::Other(queue_id)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameMode {
    Classic,
    Other(String),
}

impl From<&str> for GameMode {
    fn from(raw: &str) -> Self {
        match raw {
            "CLASSIC" => GameMode::Classic,
            other => GameMode::Other(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerRef {
    pub account_id: String,
    pub tier: Tier,
    pub rank: String,
    pub points: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatchRecord {
    pub id: String,
    pub duration_seconds: i64,
    pub queue: QueueKind,
    pub mode: GameMode,
    pub participants: Vec<ParticipantRecord>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParticipantRecord {
    pub champion: String,
    /// Explicit position; `Unknown` when the API left it blank.
    pub lane: Lane,
    pub role: Option<Role>,
    pub team_id: i32,
    pub win: bool,
}

impl ParticipantRecord {
    /// Position first, then the role table. `None` when neither resolves.
    pub fn resolved_lane(&self) -> Option<Lane> {
        if self.lane.is_playable() {
            return Some(self.lane);
        }
        self.role.map(Role::lane)
    }
}

impl From<ParticipantDto> for ParticipantRecord {
    fn from(dto: ParticipantDto) -> Self {
        ParticipantRecord {
            lane: Lane::from_position(&dto.team_position),
            role: Role::parse(&dto.role),
            champion: dto.champion_name,
            team_id: dto.team_id,
            win: dto.win,
        }
    }
}

impl From<MatchDto> for MatchRecord {
    fn from(dto: MatchDto) -> Self {
        MatchRecord {
            id: dto.metadata.match_id,
            duration_seconds: dto.info.game_duration,
            queue: QueueKind::from(dto.info.queue_id),
            mode: GameMode::from(dto.info.game_mode.as_str()),
            participants: dto
                .info
                .participants
                .into_iter()
                .map(ParticipantRecord::from)
                .collect(),
        }
    }
}
