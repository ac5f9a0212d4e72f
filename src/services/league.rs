use std::collections::HashSet;

use chrono::Utc;
use tokio::sync::Mutex;

use crate::database::TieredStore;
use crate::database::models::{
    DEFAULT_LOGOS, Identified, LeagueDocument, Match, MatchEvent, MatchEventInput, MatchEventRef,
    MatchId, MatchInput, MatchResultInput, MatchStatus, NewsId, NewsInput, NewsItem, Player,
    PlayerId, PlayerInput, PlayerStatsOverride, Round, RoundId, RoundInput, TOTS_CAPACITY, Team,
    TeamId, TeamInput, next_id,
};
use crate::error::{LeagueError, LeagueResult};
use crate::services::leaderboard::{self, KnockoutBracket, Leaders, LeagueSummary};
use crate::services::ledger;

/// Entry point for every read and mutation of the league.
///
/// Each call loads the document from the tiered store, works on that local
/// copy and, for mutations, saves it back. Nothing is kept between calls.
/// Cycles issued through one service are serialized by `cycle`; separate
/// services (or processes) sharing the same stores can still overwrite each
/// other's changes.
pub struct LeagueService {
    store: TieredStore,
    cycle: Mutex<()>,
}

impl LeagueService {
    pub fn new(store: TieredStore) -> Self {
        Self {
            store,
            cycle: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &TieredStore {
        &self.store
    }

    async fn read<T, F>(&self, view: F) -> T
    where
        F: FnOnce(&LeagueDocument) -> T,
    {
        let _guard = self.cycle.lock().await;
        let document = self.store.load().await;
        view(&document)
    }

    /// One load-mutate-save cycle. A failing `op` leaves the stores untouched.
    async fn mutate<T, F>(&self, op: F) -> LeagueResult<T>
    where
        F: FnOnce(&mut LeagueDocument) -> LeagueResult<T>,
    {
        let _guard = self.cycle.lock().await;
        let mut document = self.store.load().await;
        let value = op(&mut document)?;
        let store = self.store.save(&mut document).await?;
        log::debug!("League document committed to {}", store);
        Ok(value)
    }

    //========================================================================
    // Reads
    //========================================================================

    pub async fn league(&self) -> LeagueDocument {
        self.read(LeagueDocument::clone).await
    }

    pub async fn export(&self) -> LeagueDocument {
        self.league().await
    }

    pub async fn summary(&self) -> LeagueSummary {
        self.read(leaderboard::summary).await
    }

    pub async fn bracket(&self) -> KnockoutBracket {
        self.read(|document| leaderboard::knockout_bracket(&document.standings))
            .await
    }

    pub async fn leaders(&self, limit: usize) -> Leaders {
        self.read(|document| leaderboard::leaders(document, limit))
            .await
    }

    //========================================================================
    // Teams, players, rounds
    //========================================================================

    pub async fn upsert_team(&self, input: TeamInput) -> LeagueResult<Team> {
        let name = required_text(&input.name, "team name")?;

        self.mutate(|document| {
            let team = match existing_index(&document.teams, input.id) {
                Some(index) => {
                    let team = &mut document.teams[index];
                    team.name = name;
                    team.group = input.group;
                    if let Some(logo) = input.logo {
                        team.logo = logo;
                    }
                    team.clone()
                }
                None => {
                    let id = next_id(&document.teams);
                    let team = Team {
                        id,
                        name,
                        group: input.group,
                        logo: input.logo.unwrap_or_else(|| default_logo(id)),
                    };
                    document.teams.push(team.clone());
                    team
                }
            };
            refresh_standings(document);
            Ok(team)
        })
        .await
    }

    /// Removes the team, its players (also from the TOTS selection) and
    /// every match it plays in.
    pub async fn delete_team(&self, id: TeamId) -> LeagueResult<()> {
        self.mutate(|document| {
            if document.team(id).is_none() {
                return Err(LeagueError::not_found(format!("team {} does not exist", id)));
            }

            let removed: HashSet<PlayerId> = document.players_of(id).map(|p| p.id).collect();
            document.teams.retain(|t| t.id != id);
            document.players.retain(|p| p.team_id != id);
            document.matches.retain(|m| !m.involves(id));
            document.tots.retain(|pid| !removed.contains(pid));
            refresh_standings(document);

            log::info!(
                "Deleted team {} with {} players",
                id,
                removed.len()
            );
            Ok(())
        })
        .await
    }

    /// Counters are never taken from the input; an update keeps them.
    pub async fn upsert_player(&self, input: PlayerInput) -> LeagueResult<Player> {
        let name = required_text(&input.name, "player name")?;

        self.mutate(|document| {
            if document.team(input.team_id).is_none() {
                return Err(LeagueError::validation(format!(
                    "team {} does not exist",
                    input.team_id
                )));
            }

            match existing_index(&document.players, input.id) {
                Some(index) => {
                    let player_id = document.players[index].id;
                    let moving = document.players[index].team_id != input.team_id;
                    if moving && has_events(document, player_id) {
                        return Err(LeagueError::validation(format!(
                            "player {} has recorded match events; their team cannot change",
                            player_id
                        )));
                    }

                    let player = &mut document.players[index];
                    player.team_id = input.team_id;
                    player.name = name;
                    player.position = input.position;
                    player.number = input.number;
                    player.photo = input.photo;
                    Ok(player.clone())
                }
                None => {
                    let player = Player::new(
                        next_id(&document.players),
                        input.team_id,
                        name,
                        input.position,
                        input.number,
                        input.photo,
                    );
                    document.players.push(player.clone());
                    Ok(player)
                }
            }
        })
        .await
    }

    pub async fn delete_player(&self, id: PlayerId) -> LeagueResult<()> {
        self.mutate(|document| {
            if document.player(id).is_none() {
                return Err(LeagueError::not_found(format!(
                    "player {} does not exist",
                    id
                )));
            }
            document.players.retain(|p| p.id != id);
            document.tots.retain(|pid| *pid != id);
            Ok(())
        })
        .await
    }

    /// Sets counters directly, bypassing the event ledger. Counters stop
    /// matching the recorded events until they are set back.
    pub async fn override_player_stats(&self, input: PlayerStatsOverride) -> LeagueResult<Player> {
        self.mutate(|document| {
            let player = document
                .players
                .iter_mut()
                .find(|p| p.id == input.player_id)
                .ok_or_else(|| {
                    LeagueError::not_found(format!("player {} does not exist", input.player_id))
                })?;

            let stats = &mut player.stats;
            if let Some(goals) = input.goals {
                stats.goals = goals;
            }
            if let Some(assists) = input.assists {
                stats.assists = assists;
            }
            if let Some(yellow_cards) = input.yellow_cards {
                stats.yellow_cards = yellow_cards;
            }
            if let Some(red_cards) = input.red_cards {
                stats.red_cards = red_cards;
            }

            log::warn!(
                "Player {} counters overridden outside the event ledger: {:?}",
                player.id,
                player.stats
            );
            Ok(player.clone())
        })
        .await
    }

    pub async fn upsert_round(&self, input: RoundInput) -> LeagueResult<Round> {
        let name = required_text(&input.name, "round name")?;

        self.mutate(|document| match existing_index(&document.rounds, input.id) {
            Some(index) => {
                document.rounds[index].name = name;
                Ok(document.rounds[index].clone())
            }
            None => {
                let round = Round {
                    id: next_id(&document.rounds),
                    name,
                };
                document.rounds.push(round.clone());
                Ok(round)
            }
        })
        .await
    }

    /// Matches in the round are kept.
    pub async fn delete_round(&self, id: RoundId) -> LeagueResult<()> {
        self.mutate(|document| {
            if document.round(id).is_none() {
                return Err(LeagueError::not_found(format!("round {} does not exist", id)));
            }
            document.rounds.retain(|r| r.id != id);
            Ok(())
        })
        .await
    }

    //========================================================================
    // Matches and the event ledger
    //========================================================================

    /// Creates or updates a match. The event log is never taken from the
    /// input, and the teams of a match with recorded events are fixed.
    pub async fn upsert_match(&self, input: MatchInput) -> LeagueResult<Match> {
        if input.home_team_id == input.away_team_id {
            return Err(LeagueError::validation(
                "home and away team must be different",
            ));
        }

        self.mutate(|document| {
            for team_id in [input.home_team_id, input.away_team_id] {
                if document.team(team_id).is_none() {
                    return Err(LeagueError::validation(format!(
                        "team {} does not exist",
                        team_id
                    )));
                }
            }
            if document.round(input.round_id).is_none() {
                return Err(LeagueError::validation(format!(
                    "round {} does not exist",
                    input.round_id
                )));
            }

            let fixture = match existing_index(&document.matches, input.id) {
                Some(index) => {
                    let fixture = &mut document.matches[index];
                    let teams_changed = fixture.home_team_id != input.home_team_id
                        || fixture.away_team_id != input.away_team_id;
                    if teams_changed && !fixture.events.is_empty() {
                        return Err(LeagueError::validation(format!(
                            "match {} has recorded events; its teams cannot change",
                            fixture.id
                        )));
                    }

                    fixture.round_id = input.round_id;
                    fixture.home_team_id = input.home_team_id;
                    fixture.away_team_id = input.away_team_id;
                    fixture.scheduled_at = input.scheduled_at;
                    if let Some(status) = input.status {
                        fixture.status = status;
                    }
                    if let Some(score) = input.home_score {
                        fixture.home_score = score;
                    }
                    if let Some(score) = input.away_score {
                        fixture.away_score = score;
                    }
                    fixture.clone()
                }
                None => {
                    let mut fixture = Match::new(
                        next_id(&document.matches),
                        input.round_id,
                        input.home_team_id,
                        input.away_team_id,
                        input.scheduled_at,
                    );
                    fixture.status = input.status.unwrap_or(MatchStatus::Upcoming);
                    fixture.home_score = input.home_score.unwrap_or(0);
                    fixture.away_score = input.away_score.unwrap_or(0);
                    document.matches.push(fixture.clone());
                    fixture
                }
            };

            refresh_standings(document);
            Ok(fixture)
        })
        .await
    }

    /// Any status may follow any other; events are left as they are.
    pub async fn update_match_result(
        &self,
        id: MatchId,
        input: MatchResultInput,
    ) -> LeagueResult<Match> {
        self.mutate(|document| {
            let fixture = find_match(document, id)?;
            fixture.status = input.status;
            fixture.home_score = input.home_score;
            fixture.away_score = input.away_score;
            let fixture = fixture.clone();

            refresh_standings(document);
            Ok(fixture)
        })
        .await
    }

    pub async fn delete_match(&self, id: MatchId) -> LeagueResult<()> {
        self.mutate(|document| {
            if document.match_by_id(id).is_none() {
                return Err(LeagueError::not_found(format!("match {} does not exist", id)));
            }
            document.matches.retain(|m| m.id != id);
            refresh_standings(document);
            Ok(())
        })
        .await
    }

    pub async fn add_match_event(&self, input: MatchEventInput) -> LeagueResult<Match> {
        let event = MatchEvent {
            kind: input.kind,
            player_id: input.player_id,
            minute: input.minute,
        };

        self.mutate(|document| {
            let fixture = document
                .matches
                .iter_mut()
                .find(|m| m.id == input.match_id)
                .ok_or_else(|| {
                    LeagueError::not_found(format!("match {} does not exist", input.match_id))
                })?;
            ledger::apply_event(fixture, &mut document.players, event)?;
            Ok(fixture.clone())
        })
        .await
    }

    pub async fn remove_match_event(&self, target: MatchEventRef) -> LeagueResult<MatchEvent> {
        self.mutate(|document| {
            let fixture = document
                .matches
                .iter_mut()
                .find(|m| m.id == target.match_id)
                .ok_or_else(|| {
                    LeagueError::not_found(format!("match {} does not exist", target.match_id))
                })?;
            ledger::retract_event(fixture, &mut document.players, target.event_index)
        })
        .await
    }

    //========================================================================
    // News, team of the season
    //========================================================================

    /// New items get the current time as publish date; updates keep it.
    pub async fn upsert_news(&self, input: NewsInput) -> LeagueResult<NewsItem> {
        let title = required_text(&input.title, "news title")?;

        self.mutate(|document| match existing_index(&document.news, input.id) {
            Some(index) => {
                let item = &mut document.news[index];
                item.title = title;
                item.body = input.body;
                item.image = input.image;
                Ok(item.clone())
            }
            None => {
                let item = NewsItem {
                    id: next_id(&document.news),
                    title,
                    body: input.body,
                    image: input.image,
                    published_at: Utc::now(),
                };
                document.news.push(item.clone());
                Ok(item)
            }
        })
        .await
    }

    pub async fn delete_news(&self, id: NewsId) -> LeagueResult<()> {
        self.mutate(|document| {
            if document.news_item(id).is_none() {
                return Err(LeagueError::not_found(format!(
                    "news item {} does not exist",
                    id
                )));
            }
            document.news.retain(|n| n.id != id);
            Ok(())
        })
        .await
    }

    /// Replaces the selection wholesale.
    pub async fn set_team_of_season(&self, player_ids: Vec<PlayerId>) -> LeagueResult<Vec<PlayerId>> {
        if player_ids.len() > TOTS_CAPACITY {
            return Err(LeagueError::validation(format!(
                "team of the season holds at most {} players, got {}",
                TOTS_CAPACITY,
                player_ids.len()
            )));
        }
        let mut seen = HashSet::new();
        if let Some(duplicate) = player_ids.iter().find(|id| !seen.insert(**id)) {
            return Err(LeagueError::validation(format!(
                "player {} is selected more than once",
                duplicate
            )));
        }

        self.mutate(|document| {
            if let Some(unknown) = player_ids.iter().find(|id| document.player(**id).is_none()) {
                return Err(LeagueError::validation(format!(
                    "player {} does not exist",
                    unknown
                )));
            }
            document.tots = player_ids;
            Ok(document.tots.clone())
        })
        .await
    }

    //========================================================================
    // Whole-document operations
    //========================================================================

    /// Replaces the stored document. The incoming document must hold the
    /// same invariants the individual mutations keep; standings are rebuilt
    /// from its teams and matches.
    pub async fn import(&self, mut incoming: LeagueDocument) -> LeagueResult<LeagueDocument> {
        check_document(&incoming)?;
        refresh_standings(&mut incoming);
        log::info!(
            "Importing league document with {} teams, {} players and {} matches",
            incoming.teams.len(),
            incoming.players.len(),
            incoming.matches.len()
        );
        self.replace(incoming).await
    }

    pub async fn clear(&self) -> LeagueResult<LeagueDocument> {
        log::warn!("Clearing the league document");
        self.replace(LeagueDocument::default()).await
    }

    async fn replace(&self, mut document: LeagueDocument) -> LeagueResult<LeagueDocument> {
        let _guard = self.cycle.lock().await;
        self.store.save(&mut document).await?;
        Ok(document)
    }
}

fn refresh_standings(document: &mut LeagueDocument) {
    document.standings = ledger::recompute_standings(&document.teams, &document.matches);
}

fn has_events(document: &LeagueDocument, player_id: PlayerId) -> bool {
    document
        .matches
        .iter()
        .any(|m| m.events.iter().any(|e| e.player_id == player_id))
}

fn unique_ids<T: Identified>(items: &[T], collection: &str) -> LeagueResult<()> {
    let mut seen = HashSet::new();
    match items.iter().map(Identified::id).find(|id| !seen.insert(*id)) {
        Some(id) => Err(LeagueError::validation(format!(
            "{} id {} appears more than once",
            collection, id
        ))),
        None => Ok(()),
    }
}

/// Referential checks for a whole incoming document.
///
/// Events may name players that no longer exist (deleting a player keeps its
/// events); a player that does exist must play for one of the two teams.
/// Round references are not checked since deleting a round keeps its matches.
fn check_document(document: &LeagueDocument) -> LeagueResult<()> {
    unique_ids(&document.teams, "team")?;
    unique_ids(&document.players, "player")?;
    unique_ids(&document.rounds, "round")?;
    unique_ids(&document.matches, "match")?;
    unique_ids(&document.news, "news")?;

    for player in &document.players {
        if document.team(player.team_id).is_none() {
            return Err(LeagueError::validation(format!(
                "player {} belongs to unknown team {}",
                player.id, player.team_id
            )));
        }
    }

    for fixture in &document.matches {
        if fixture.home_team_id == fixture.away_team_id {
            return Err(LeagueError::validation(format!(
                "match {} has the same home and away team",
                fixture.id
            )));
        }
        for team_id in [fixture.home_team_id, fixture.away_team_id] {
            if document.team(team_id).is_none() {
                return Err(LeagueError::validation(format!(
                    "match {} refers to unknown team {}",
                    fixture.id, team_id
                )));
            }
        }
        for event in &fixture.events {
            if event.minute < 1 {
                return Err(LeagueError::validation(format!(
                    "match {} has an event before minute 1",
                    fixture.id
                )));
            }
            if let Some(player) = document.player(event.player_id) {
                if !fixture.involves(player.team_id) {
                    return Err(LeagueError::validation(format!(
                        "match {} has an event for player {} who plays for neither team",
                        fixture.id, player.id
                    )));
                }
            }
        }
    }

    if document.tots.len() > TOTS_CAPACITY {
        return Err(LeagueError::validation(format!(
            "team of the season holds at most {} players, got {}",
            TOTS_CAPACITY,
            document.tots.len()
        )));
    }
    let mut selected = HashSet::new();
    for id in &document.tots {
        if !selected.insert(*id) {
            return Err(LeagueError::validation(format!(
                "player {} is selected more than once",
                id
            )));
        }
        if document.player(*id).is_none() {
            return Err(LeagueError::validation(format!(
                "player {} does not exist",
                id
            )));
        }
    }

    Ok(())
}

fn existing_index<T: Identified>(items: &[T], id: Option<i64>) -> Option<usize> {
    id.and_then(|id| items.iter().position(|item| item.id() == id))
}

fn find_match(document: &mut LeagueDocument, id: MatchId) -> LeagueResult<&mut Match> {
    document
        .matches
        .iter_mut()
        .find(|m| m.id == id)
        .ok_or_else(|| LeagueError::not_found(format!("match {} does not exist", id)))
}

fn required_text(value: &str, field: &str) -> LeagueResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(LeagueError::validation(format!("{} is required", field)));
    }
    Ok(trimmed.to_string())
}

fn default_logo(id: TeamId) -> String {
    let slot = (id - 1).rem_euclid(DEFAULT_LOGOS.len() as i64) as usize;
    DEFAULT_LOGOS[slot].to_string()
}
