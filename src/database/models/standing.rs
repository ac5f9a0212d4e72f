use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{Group, TeamId};

/// Per-group tables, keyed by group label.
pub type Standings = BTreeMap<Group, Vec<Standing>>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Standing {
    pub team_id: TeamId,
    pub team_name: String,
    pub played: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    #[serde(alias = "goalDiff")]
    pub goal_difference: i64,
    pub points: u32,
}

impl Standing {
    pub fn new(team_id: TeamId, team_name: impl Into<String>) -> Self {
        Self {
            team_id,
            team_name: team_name.into(),
            played: 0,
            won: 0,
            drawn: 0,
            lost: 0,
            goals_for: 0,
            goals_against: 0,
            goal_difference: 0,
            points: 0,
        }
    }
}

/// One empty table per group label.
pub fn empty_standings() -> Standings {
    Group::ALL.iter().map(|group| (*group, Vec::new())).collect()
}
