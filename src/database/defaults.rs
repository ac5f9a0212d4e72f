use chrono::Utc;

use crate::database::models::{Group, LeagueDocument, Round, Team};
use crate::services::ledger;

const SEED_TEAMS: [(&str, Group, &str); 8] = [
    ("Crowns", Group::A, "👑"),
    ("Prize Hunters", Group::A, "🎯"),
    ("Zawia Pro", Group::A, "🔥"),
    ("Iron Will", Group::A, "💪"),
    ("Kongs", Group::B, "🦍"),
    ("Lightning FC", Group::B, "⚡"),
    ("Trophy Seekers", Group::B, "🏆"),
    ("Rising Stars", Group::B, "🌟"),
];

const SEED_ROUNDS: [&str; 3] = ["Round 1", "Round 2", "Round 3"];

/// Compiled-in dataset used when no backing store can supply a document.
pub fn default_document() -> LeagueDocument {
    let teams: Vec<Team> = SEED_TEAMS
        .iter()
        .zip(1..)
        .map(|((name, group, logo), id)| Team {
            id,
            name: (*name).to_string(),
            group: *group,
            logo: (*logo).to_string(),
        })
        .collect();

    let rounds = SEED_ROUNDS
        .iter()
        .zip(1..)
        .map(|(name, id)| Round {
            id,
            name: (*name).to_string(),
        })
        .collect();

    let standings = ledger::recompute_standings(&teams, &[]);

    LeagueDocument {
        teams,
        rounds,
        standings,
        last_update: Some(Utc::now()),
        ..LeagueDocument::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_have_teams_in_both_groups_and_nothing_else() {
        let document = default_document();

        assert_eq!(document.teams.len(), 8);
        assert_eq!(document.rounds.len(), 3);
        assert!(document.players.is_empty());
        assert!(document.matches.is_empty());
        assert!(document.news.is_empty());
        assert!(document.tots.is_empty());
        assert_eq!(document.standings[&Group::A].len(), 4);
        assert_eq!(document.standings[&Group::B].len(), 4);
    }
}
