//! Match-event ledger and group standings.
//!
//! Player counters are only ever changed here (plus the explicit stats
//! override in the league service), so each counter tracks the number of
//! matching events across all matches.

use std::collections::HashMap;

use crate::database::models::{
    EventKind, Group, Match, MatchEvent, Player, PlayerStats, Standing, Standings, Team,
    TeamId, empty_standings,
};
use crate::error::{LeagueError, LeagueResult};

fn counter(stats: &mut PlayerStats, kind: EventKind) -> &mut u32 {
    match kind {
        EventKind::Goal => &mut stats.goals,
        EventKind::Assist => &mut stats.assists,
        EventKind::YellowCard => &mut stats.yellow_cards,
        EventKind::RedCard => &mut stats.red_cards,
    }
}

/// Append `event` to the match log and bump the player's counter.
///
/// The player must belong to one of the two teams and the minute must be at
/// least 1. Nothing is changed when validation fails.
pub fn apply_event(
    fixture: &mut Match,
    players: &mut [Player],
    event: MatchEvent,
) -> LeagueResult<()> {
    if event.minute < 1 {
        return Err(LeagueError::validation("event minute must be at least 1"));
    }

    let player = players
        .iter_mut()
        .find(|p| p.id == event.player_id)
        .ok_or_else(|| {
            LeagueError::validation(format!("player {} does not exist", event.player_id))
        })?;

    if !fixture.involves(player.team_id) {
        return Err(LeagueError::validation(format!(
            "player {} does not play for either team in match {}",
            player.id, fixture.id
        )));
    }

    let count = counter(&mut player.stats, event.kind);
    *count = count.saturating_add(1);
    fixture.events.push(event);
    Ok(())
}

/// Remove the event at `index` and take it back off the player's counter,
/// never going below zero.
pub fn retract_event(
    fixture: &mut Match,
    players: &mut [Player],
    index: usize,
) -> LeagueResult<MatchEvent> {
    if index >= fixture.events.len() {
        return Err(LeagueError::not_found(format!(
            "match {} has no event at index {}",
            fixture.id, index
        )));
    }

    let event = fixture.events.remove(index);
    match players.iter_mut().find(|p| p.id == event.player_id) {
        Some(player) => {
            let count = counter(&mut player.stats, event.kind);
            *count = count.saturating_sub(1);
        }
        None => log::debug!(
            "Retracted {} event for missing player {}",
            event.kind,
            event.player_id
        ),
    }

    Ok(event)
}

/// Rebuild every group table from scratch.
///
/// Only finished matches between two known teams of the same group count.
/// Rows are ordered by points, then goal difference, then goals for; any
/// remaining tie keeps the order of `teams`.
pub fn recompute_standings(teams: &[Team], matches: &[Match]) -> Standings {
    let mut standings = empty_standings();
    let mut slots: HashMap<TeamId, (Group, usize)> = HashMap::new();

    for team in teams {
        let rows = standings.entry(team.group).or_default();
        slots.insert(team.id, (team.group, rows.len()));
        rows.push(Standing::new(team.id, team.name.clone()));
    }

    for fixture in matches.iter().filter(|m| m.is_finished()) {
        if fixture.home_team_id == fixture.away_team_id {
            continue;
        }
        let (Some(&(home_group, home)), Some(&(away_group, away))) = (
            slots.get(&fixture.home_team_id),
            slots.get(&fixture.away_team_id),
        ) else {
            continue;
        };
        if home_group != away_group {
            continue;
        }

        if let Some(rows) = standings.get_mut(&home_group) {
            record_result(&mut rows[home], fixture.home_score, fixture.away_score);
            record_result(&mut rows[away], fixture.away_score, fixture.home_score);
        }
    }

    for rows in standings.values_mut() {
        for row in rows.iter_mut() {
            row.goal_difference = i64::from(row.goals_for) - i64::from(row.goals_against);
        }
        // sort_by is stable
        rows.sort_by(|a, b| {
            b.points
                .cmp(&a.points)
                .then(b.goal_difference.cmp(&a.goal_difference))
                .then(b.goals_for.cmp(&a.goals_for))
        });
    }

    standings
}

fn record_result(row: &mut Standing, scored: u32, conceded: u32) {
    row.played += 1;
    row.goals_for = row.goals_for.saturating_add(scored);
    row.goals_against = row.goals_against.saturating_add(conceded);
    if scored > conceded {
        row.won += 1;
        row.points += 3;
    } else if scored < conceded {
        row.lost += 1;
    } else {
        row.drawn += 1;
        row.points += 1;
    }
}
