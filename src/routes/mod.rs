use actix_web::{HttpRequest, error, web};

use crate::error::LeagueError;

pub mod league;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .app_data(json_config())
            .app_data(path_config())
            .app_data(query_config())
            .configure(league::configure),
    );
}

/// Malformed bodies and unknown enum values are validation failures.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err: error::JsonPayloadError, _req: &HttpRequest| {
        LeagueError::validation(err.to_string()).into()
    })
}

pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err: error::PathError, _req: &HttpRequest| {
        LeagueError::validation(err.to_string()).into()
    })
}

pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err: error::QueryPayloadError, _req: &HttpRequest| {
        LeagueError::validation(err.to_string()).into()
    })
}
