use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{PlayerId, RoundId, TeamId};

pub type MatchId = i64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub id: MatchId,
    pub round_id: RoundId,
    pub home_team_id: TeamId,
    pub away_team_id: TeamId,
    pub status: MatchStatus,
    #[serde(default)]
    pub home_score: u32,
    #[serde(default)]
    pub away_score: u32,
    pub scheduled_at: DateTime<Utc>,
    // Append/remove only through the ledger
    #[serde(default)]
    pub(crate) events: Vec<MatchEvent>,
}

impl Match {
    pub fn new(
        id: MatchId,
        round_id: RoundId,
        home_team_id: TeamId,
        away_team_id: TeamId,
        scheduled_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            round_id,
            home_team_id,
            away_team_id,
            status: MatchStatus::Upcoming,
            home_score: 0,
            away_score: 0,
            scheduled_at,
            events: Vec::new(),
        }
    }

    pub fn events(&self) -> &[MatchEvent] {
        &self.events
    }

    pub fn involves(&self, team_id: TeamId) -> bool {
        self.home_team_id == team_id || self.away_team_id == team_id
    }

    pub fn is_finished(&self) -> bool {
        self.status == MatchStatus::Finished
    }
}

/// No transition graph is enforced; any status may follow any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    #[serde(alias = "scheduled")]
    Upcoming,
    Live,
    Finished,
}

impl std::fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchStatus::Upcoming => write!(f, "upcoming"),
            MatchStatus::Live => write!(f, "live"),
            MatchStatus::Finished => write!(f, "finished"),
        }
    }
}

impl std::str::FromStr for MatchStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "upcoming" | "scheduled" => Ok(MatchStatus::Upcoming),
            "live" => Ok(MatchStatus::Live),
            "finished" => Ok(MatchStatus::Finished),
            _ => Err(format!("Invalid match status: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchEvent {
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub player_id: PlayerId,
    pub minute: u32, // extra time allowed, so no upper bound
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EventKind {
    Goal,
    Assist,
    #[serde(alias = "yellow")]
    YellowCard,
    #[serde(alias = "red")]
    RedCard,
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventKind::Goal => write!(f, "goal"),
            EventKind::Assist => write!(f, "assist"),
            EventKind::YellowCard => write!(f, "yellowCard"),
            EventKind::RedCard => write!(f, "redCard"),
        }
    }
}

impl std::str::FromStr for EventKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "goal" => Ok(EventKind::Goal),
            "assist" => Ok(EventKind::Assist),
            "yellowCard" | "yellow" => Ok(EventKind::YellowCard),
            "redCard" | "red" => Ok(EventKind::RedCard),
            _ => Err(format!("Invalid event type: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchInput {
    pub id: Option<MatchId>,
    pub round_id: RoundId,
    pub home_team_id: TeamId,
    pub away_team_id: TeamId,
    pub status: Option<MatchStatus>,
    pub home_score: Option<u32>,
    pub away_score: Option<u32>,
    pub scheduled_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResultInput {
    pub status: MatchStatus,
    pub home_score: u32,
    pub away_score: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchEventInput {
    pub match_id: MatchId,
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub player_id: PlayerId,
    pub minute: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchEventRef {
    pub match_id: MatchId,
    pub event_index: usize,
}
