use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use chrono::Duration;
use std::io;

use taskgate::auth::TokenService;
use taskgate::boundary::ErrorBoundary;
use taskgate::config::Config;
use taskgate::models::{Task, User};
use taskgate::routes;
use taskgate::store::{JsonFileStore, TaskStore, UserStore};

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env().map_err(|e| {
        log::error!("Invalid configuration: {}", e);
        io::Error::new(io::ErrorKind::InvalidInput, e)
    })?;

    let users = web::Data::new(UserStore::new(JsonFileStore::<User>::new(&config.users_file)));
    let tasks = web::Data::new(TaskStore::new(JsonFileStore::<Task>::new(&config.tasks_file)));
    let tokens = web::Data::new(TokenService::new(
        &config.jwt_secret,
        Duration::seconds(config.token_ttl_secs),
    ));

    log::info!(
        "Users in {}, tasks in {}",
        config.users_file.display(),
        config.tasks_file.display()
    );
    log::info!("Starting taskgate server at {}", config.server_url());

    HttpServer::new(move || {
        App::new()
            .app_data(users.clone())
            .app_data(tasks.clone())
            .app_data(tokens.clone())
            .app_data(routes::json_config())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .wrap(ErrorBoundary)
            .configure(routes::config)
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await
}
