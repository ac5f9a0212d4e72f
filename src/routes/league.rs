use actix_web::web;

use crate::handlers::league;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/league")
            .route("", web::get().to(league::get_league))
            .route("/export", web::get().to(league::export_league))
            .route("/import", web::post().to(league::import_league))
            .route("/clear", web::post().to(league::clear_league))
            .route("/summary", web::get().to(league::get_summary))
            .route("/bracket", web::get().to(league::get_bracket))
            .route("/leaders", web::get().to(league::get_leaders)),
    )
    .service(
        web::scope("/team")
            .route("", web::post().to(league::save_team))
            .route("/{id}", web::delete().to(league::delete_team)),
    )
    .service(
        web::scope("/player")
            .route("", web::post().to(league::save_player))
            .route("/stats", web::post().to(league::override_player_stats))
            .route("/{id}", web::delete().to(league::delete_player)),
    )
    .service(
        web::scope("/round")
            .route("", web::post().to(league::save_round))
            .route("/{id}", web::delete().to(league::delete_round)),
    )
    .service(
        web::scope("/match")
            .route("", web::post().to(league::save_match))
            .route("/{id}", web::delete().to(league::delete_match))
            .route("/{id}/result", web::post().to(league::update_match_result)),
    )
    .service(
        web::resource("/matchEvent")
            .route(web::post().to(league::add_match_event))
            .route(web::delete().to(league::remove_match_event)),
    )
    .service(
        web::scope("/news")
            .route("", web::post().to(league::save_news))
            .route("/{id}", web::delete().to(league::delete_news)),
    )
    .route("/tots", web::post().to(league::set_team_of_season))
    .route("/health", web::get().to(league::health));
}
