use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::Context;
use foodie_finds::{
    api::{self, ApiStateBuilder},
    config::Config,
    db,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_ansi(true)
        .with_file(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("fail to setup logging: {e}"))?;

    let config = Config::load()?;
    let db_pool = db::connect(&config.database_url, config.max_connections).await?;
    let state = ApiStateBuilder::default()
        .db_pool(db_pool.clone())
        .legacy_dishes_key(config.legacy_dishes_key)
        .build()
        .context("fail to build api state")?;
    let state = web::Data::new(state);

    tracing::info!("listening on {}:{}", config.host, config.port);
    HttpServer::new(move || {
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allowed_methods(vec!["GET"])
                    .allow_any_header(),
            )
            .wrap(Logger::default())
            .app_data(state.clone())
            .configure(api::configure)
            .default_service(web::route().to(api::route_not_found))
    })
    .bind((config.host.as_str(), config.port))
    .with_context(|| format!("fail to bind {}:{}", config.host, config.port))?
    .run()
    .await?;

    db_pool.close().await;
    tracing::info!("catalog database closed");
    Ok(())
}
