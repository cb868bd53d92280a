use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use chrono::Duration;
use sqlx::PgPool;
use std::sync::Arc;

use tasktrack::auth::{AuthService, SystemClock, TokenCodec};
use tasktrack::config::Config;
use tasktrack::error::set_development_mode;
use tasktrack::routes;
use tasktrack::store::PgCredentialStore;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = Config::from_env();
    set_development_mode(config.development_mode);

    let pool = PgPool::connect(&config.database_url)
        .await
        .expect("Failed to connect to database");

    let store = Arc::new(PgCredentialStore::new(pool));
    let codec = TokenCodec::new(
        config.jwt_secret.as_bytes(),
        Duration::hours(config.token_ttl_hours),
        Arc::new(SystemClock),
    );
    let service = web::Data::new(AuthService::new(store, codec.clone()));

    log::info!("Starting TaskTrack server at {}", config.server_url());

    let bind_addr = (config.server_host.clone(), config.server_port);
    HttpServer::new(move || {
        App::new()
            .app_data(service.clone())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .service(routes::health::health)
            .service(web::scope("/api").configure(routes::config(codec.clone())))
    })
    .bind(bind_addr)?
    .run()
    .await
}
