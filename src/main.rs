use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware::Logger, web};
use anyhow::Result;

use league::middleware::RequestIdMiddleware;
use league::{Config, LeagueService, build_store, routes};

#[actix_web::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    env_logger::init();

    log::info!("Starting league API server...");

    let config = Config::from_env()?;
    log::info!("Configuration loaded (environment: {})", config.environment);

    let store = build_store(&config).await?;
    let service = web::Data::new(LeagueService::new(store));

    // Touch the chain once so promotion and the defaults fallback happen at startup
    let league = service.league().await;
    log::info!(
        "League ready: {} teams, {} players, {} matches",
        league.teams.len(),
        league.players.len(),
        league.matches.len()
    );

    let server_address = config.server_address();
    log::info!("Server starting on http://{}", server_address);

    let production = config.is_production();
    HttpServer::new(move || {
        let cors = if production {
            Cors::default()
                .allowed_methods(vec!["GET", "POST", "DELETE", "OPTIONS"])
                .allowed_headers(vec!["Content-Type", "Accept", "X-Correlation-ID"])
                .max_age(3600)
        } else {
            Cors::permissive()
        };

        App::new()
            .app_data(service.clone())
            .wrap(cors)
            .wrap(RequestIdMiddleware)
            .wrap(Logger::new(
                r#"%a "%r" %s %b "%{Referer}i" "%{User-Agent}i" %T correlation_id=%{x-correlation-id}o"#,
            ))
            .configure(routes::configure)
    })
    .bind(&server_address)?
    .run()
    .await?;

    Ok(())
}
