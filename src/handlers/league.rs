use actix_web::{HttpResponse, Result, web};
use serde::Deserialize;

use crate::database::models::{
    LeagueDocument, MatchEventInput, MatchEventRef, MatchId, MatchInput, MatchResultInput,
    NewsId, NewsInput, PlayerId, PlayerInput, PlayerStatsOverride, RoundId, RoundInput, TeamId,
    TeamInput,
};
use crate::handlers::shared::ApiResponse;
use crate::services::LeagueService;
use crate::services::leaderboard::DEFAULT_LEADER_LIMIT;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadersQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamOfSeasonRequest {
    pub player_ids: Vec<PlayerId>,
}

// League document

pub async fn get_league(service: web::Data<LeagueService>) -> Result<HttpResponse> {
    let league = service.league().await;
    Ok(HttpResponse::Ok().json(ApiResponse::success(league)))
}

pub async fn export_league(service: web::Data<LeagueService>) -> Result<HttpResponse> {
    let league = service.export().await;
    Ok(HttpResponse::Ok()
        .insert_header((
            "Content-Disposition",
            "attachment; filename=\"league-export.json\"",
        ))
        .json(ApiResponse::success(league)))
}

pub async fn import_league(
    service: web::Data<LeagueService>,
    input: web::Json<LeagueDocument>,
) -> Result<HttpResponse> {
    let league = service.import(input.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
        Some(league),
        "League imported",
    )))
}

pub async fn clear_league(service: web::Data<LeagueService>) -> Result<HttpResponse> {
    let league = service.clear().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
        Some(league),
        "League cleared",
    )))
}

pub async fn get_summary(service: web::Data<LeagueService>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(ApiResponse::success(service.summary().await)))
}

pub async fn get_bracket(service: web::Data<LeagueService>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(ApiResponse::success(service.bracket().await)))
}

pub async fn get_leaders(
    service: web::Data<LeagueService>,
    query: web::Query<LeadersQuery>,
) -> Result<HttpResponse> {
    let limit = query.limit.unwrap_or(DEFAULT_LEADER_LIMIT);
    Ok(HttpResponse::Ok().json(ApiResponse::success(service.leaders(limit).await)))
}

// Teams

pub async fn save_team(
    service: web::Data<LeagueService>,
    input: web::Json<TeamInput>,
) -> Result<HttpResponse> {
    let team = service.upsert_team(input.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(team)))
}

pub async fn delete_team(
    service: web::Data<LeagueService>,
    path: web::Path<TeamId>,
) -> Result<HttpResponse> {
    service.delete_team(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_with_message(None, "Team deleted")))
}

// Players

pub async fn save_player(
    service: web::Data<LeagueService>,
    input: web::Json<PlayerInput>,
) -> Result<HttpResponse> {
    let player = service.upsert_player(input.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(player)))
}

pub async fn delete_player(
    service: web::Data<LeagueService>,
    path: web::Path<PlayerId>,
) -> Result<HttpResponse> {
    service.delete_player(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_with_message(None, "Player deleted")))
}

pub async fn override_player_stats(
    service: web::Data<LeagueService>,
    input: web::Json<PlayerStatsOverride>,
) -> Result<HttpResponse> {
    let player = service.override_player_stats(input.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(player)))
}

// Rounds

pub async fn save_round(
    service: web::Data<LeagueService>,
    input: web::Json<RoundInput>,
) -> Result<HttpResponse> {
    let round = service.upsert_round(input.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(round)))
}

pub async fn delete_round(
    service: web::Data<LeagueService>,
    path: web::Path<RoundId>,
) -> Result<HttpResponse> {
    service.delete_round(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_with_message(None, "Round deleted")))
}

// Matches

pub async fn save_match(
    service: web::Data<LeagueService>,
    input: web::Json<MatchInput>,
) -> Result<HttpResponse> {
    let fixture = service.upsert_match(input.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(fixture)))
}

pub async fn update_match_result(
    service: web::Data<LeagueService>,
    path: web::Path<MatchId>,
    input: web::Json<MatchResultInput>,
) -> Result<HttpResponse> {
    let fixture = service
        .update_match_result(path.into_inner(), input.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(fixture)))
}

pub async fn delete_match(
    service: web::Data<LeagueService>,
    path: web::Path<MatchId>,
) -> Result<HttpResponse> {
    service.delete_match(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_with_message(None, "Match deleted")))
}

pub async fn add_match_event(
    service: web::Data<LeagueService>,
    input: web::Json<MatchEventInput>,
) -> Result<HttpResponse> {
    let fixture = service.add_match_event(input.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(fixture)))
}

pub async fn remove_match_event(
    service: web::Data<LeagueService>,
    input: web::Json<MatchEventRef>,
) -> Result<HttpResponse> {
    let removed = service.remove_match_event(input.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(removed)))
}

// News

pub async fn save_news(
    service: web::Data<LeagueService>,
    input: web::Json<NewsInput>,
) -> Result<HttpResponse> {
    let item = service.upsert_news(input.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(item)))
}

pub async fn delete_news(
    service: web::Data<LeagueService>,
    path: web::Path<NewsId>,
) -> Result<HttpResponse> {
    service.delete_news(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_with_message(None, "News deleted")))
}

// Team of the season

pub async fn set_team_of_season(
    service: web::Data<LeagueService>,
    input: web::Json<TeamOfSeasonRequest>,
) -> Result<HttpResponse> {
    let selection = service
        .set_team_of_season(input.into_inner().player_ids)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(selection)))
}

pub async fn health() -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(ApiResponse::success(serde_json::json!({
        "status": "ok",
        "timestamp": chrono::Utc::now()
    }))))
}
