use serde::{Deserialize, Serialize};

use super::TeamId;

pub type PlayerId = i64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: PlayerId,
    pub team_id: TeamId,
    pub name: String,
    pub position: Position,
    pub number: u32,
    #[serde(default)]
    pub photo: Option<String>,
    // Only the ledger and the stats override write these
    #[serde(flatten)]
    pub(crate) stats: PlayerStats,
}

impl Player {
    pub fn new(
        id: PlayerId,
        team_id: TeamId,
        name: impl Into<String>,
        position: Position,
        number: u32,
        photo: Option<String>,
    ) -> Self {
        Self {
            id,
            team_id,
            name: name.into(),
            position,
            number,
            photo,
            stats: PlayerStats::default(),
        }
    }

    pub fn stats(&self) -> PlayerStats {
        self.stats
    }
}

/// Aggregate counters derived from match events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStats {
    #[serde(default)]
    pub goals: u32,
    #[serde(default)]
    pub assists: u32,
    #[serde(default)]
    pub yellow_cards: u32,
    #[serde(default)]
    pub red_cards: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerInput {
    pub id: Option<PlayerId>,
    pub team_id: TeamId,
    pub name: String,
    pub position: Position,
    pub number: u32,
    pub photo: Option<String>,
}

/// Partial counter override. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStatsOverride {
    pub player_id: PlayerId,
    pub goals: Option<u32>,
    pub assists: Option<u32>,
    pub yellow_cards: Option<u32>,
    pub red_cards: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Position {
    #[serde(rename = "GK", alias = "goalkeeper")]
    Goalkeeper,
    #[serde(rename = "DF", alias = "DEF", alias = "defender")]
    Defender,
    #[serde(rename = "MF", alias = "MID", alias = "midfielder")]
    Midfielder,
    #[serde(rename = "FW", alias = "FWD", alias = "forward")]
    Forward,
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Position::Goalkeeper => write!(f, "GK"),
            Position::Defender => write!(f, "DF"),
            Position::Midfielder => write!(f, "MF"),
            Position::Forward => write!(f, "FW"),
        }
    }
}

impl std::str::FromStr for Position {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "GK" | "GOALKEEPER" => Ok(Position::Goalkeeper),
            "DF" | "DEF" | "DEFENDER" => Ok(Position::Defender),
            "MF" | "MID" | "MIDFIELDER" => Ok(Position::Midfielder),
            "FW" | "FWD" | "FORWARD" => Ok(Position::Forward),
            _ => Err(format!("Invalid position: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn player_serializes_counters_inline() {
        let mut player = Player::new(7, 2, "Yassin", Position::Forward, 9, None);
        player.stats.goals = 2;

        let value = serde_json::to_value(&player).unwrap();
        assert_eq!(value["teamId"], 2);
        assert_eq!(value["position"], "FW");
        assert_eq!(value["goals"], 2);
        assert_eq!(value["yellowCards"], 0);
    }

    #[test]
    fn player_without_counters_starts_at_zero() {
        let player: Player = serde_json::from_value(json!({
            "id": 1,
            "teamId": 1,
            "name": "Keeper",
            "position": "GK",
            "number": 1
        }))
        .unwrap();

        assert_eq!(player.stats(), PlayerStats::default());
        assert_eq!(player.position, Position::Goalkeeper);
    }

    #[test]
    fn position_parses_long_and_short_forms() {
        assert_eq!("mid".parse::<Position>().unwrap(), Position::Midfielder);
        assert_eq!("Defender".parse::<Position>().unwrap(), Position::Defender);
        assert!("striker".parse::<Position>().is_err());
    }
}
