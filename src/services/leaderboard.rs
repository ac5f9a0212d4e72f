//! Read-only views derived from a league document: scorer/assist tables,
//! headline totals and the knockout bracket seeded from the group tables.

use serde::Serialize;

use crate::database::models::{Group, LeagueDocument, Player, PlayerStats, Standings, TeamId};

pub const DEFAULT_LEADER_LIMIT: usize = 10;

/// Teams taken from each group into the knockout stage.
pub const QUALIFIERS_PER_GROUP: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderEntry {
    pub player_id: i64,
    pub player_name: String,
    pub team_id: TeamId,
    pub team_name: Option<String>,
    pub value: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Leaders {
    pub top_scorers: Vec<LeaderEntry>,
    pub top_assists: Vec<LeaderEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueSummary {
    pub total_teams: usize,
    pub total_players: usize,
    pub total_matches: usize,
    pub total_goals: u64,
}

pub fn top_scorers(document: &LeagueDocument, limit: usize) -> Vec<LeaderEntry> {
    ranked(document, limit, |stats| stats.goals)
}

pub fn top_assists(document: &LeagueDocument, limit: usize) -> Vec<LeaderEntry> {
    ranked(document, limit, |stats| stats.assists)
}

pub fn leaders(document: &LeagueDocument, limit: usize) -> Leaders {
    Leaders {
        top_scorers: top_scorers(document, limit),
        top_assists: top_assists(document, limit),
    }
}

/// Players with a non-zero count, highest first; ties keep roster order.
fn ranked<F>(document: &LeagueDocument, limit: usize, metric: F) -> Vec<LeaderEntry>
where
    F: Fn(&PlayerStats) -> u32,
{
    let mut players: Vec<&Player> = document
        .players
        .iter()
        .filter(|p| metric(&p.stats()) > 0)
        .collect();
    players.sort_by(|a, b| metric(&b.stats()).cmp(&metric(&a.stats())));

    players
        .into_iter()
        .take(limit)
        .map(|p| LeaderEntry {
            player_id: p.id,
            player_name: p.name.clone(),
            team_id: p.team_id,
            team_name: document.team(p.team_id).map(|t| t.name.clone()),
            value: metric(&p.stats()),
        })
        .collect()
}

/// Goals are summed over every match regardless of status.
pub fn summary(document: &LeagueDocument) -> LeagueSummary {
    LeagueSummary {
        total_teams: document.teams.len(),
        total_players: document.players.len(),
        total_matches: document.matches.len(),
        total_goals: document.matches.iter().fold(0u64, |total, m| {
            total
                .saturating_add(u64::from(m.home_score))
                .saturating_add(u64::from(m.away_score))
        }),
    }
}

//============================================================================
// Knockout bracket
//============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum BracketSlot {
    /// A qualified team.
    Team { team_id: TeamId, team_name: String },
    /// Group position not yet filled, e.g. group B has fewer teams.
    Seed { group: Group, position: usize },
    /// Winner of an earlier tie.
    WinnerOf { tie: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BracketTie {
    pub name: String,
    pub home: BracketSlot,
    pub away: BracketSlot,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KnockoutBracket {
    pub playoffs: Vec<BracketTie>,
    pub semi_finals: Vec<BracketTie>,
    pub final_tie: BracketTie,
}

/// Top `n` rows of a group table, in table order.
pub fn group_qualifiers(standings: &Standings, group: Group, n: usize) -> Vec<BracketSlot> {
    let rows = standings.get(&group).map(Vec::as_slice).unwrap_or_default();
    (1..=n)
        .map(|position| match rows.get(position - 1) {
            Some(row) => BracketSlot::Team {
                team_id: row.team_id,
                team_name: row.team_name.clone(),
            },
            None => BracketSlot::Seed { group, position },
        })
        .collect()
}

/// Playoffs: A2 v B3 and B2 v A3. Semi-finals: A1 v winner of playoff 2 and
/// B1 v winner of playoff 1. The final pairs the semi-final winners.
pub fn knockout_bracket(standings: &Standings) -> KnockoutBracket {
    let a = group_qualifiers(standings, Group::A, QUALIFIERS_PER_GROUP);
    let b = group_qualifiers(standings, Group::B, QUALIFIERS_PER_GROUP);

    let tie = |name: &str, home: &BracketSlot, away: BracketSlot| BracketTie {
        name: name.to_string(),
        home: home.clone(),
        away,
    };
    let winner = |name: &str| BracketSlot::WinnerOf {
        tie: name.to_string(),
    };

    KnockoutBracket {
        playoffs: vec![
            tie("Playoff 1", &a[1], b[2].clone()),
            tie("Playoff 2", &b[1], a[2].clone()),
        ],
        semi_finals: vec![
            tie("Semi-final 1", &a[0], winner("Playoff 2")),
            tie("Semi-final 2", &b[0], winner("Playoff 1")),
        ],
        final_tie: tie("Final", &winner("Semi-final 1"), winner("Semi-final 2")),
    }
}
