use actix_web::middleware::Logger;
use actix_web::{App, HttpServer, web};
use article_service::database::connect_store;
use article_service::middleware::{cors::cors, not_found::not_found};
use article_service::router::index::routes;
use article_service::utils::error::set_service_name;
use article_service::{ArticleService, Config};
use dotenv::dotenv;
use env_logger::Env;
use log::info;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = Config::from_env()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
    set_service_name(config.service_name.clone());

    let store = connect_store(&config)
        .await
        .map_err(|e| std::io::Error::other(format!("Failed to set up article store: {}", e)))?;
    let article_service = web::Data::new(ArticleService::new(store));

    info!("Starting server on http://{}:{}", config.host, config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(cors())
            .app_data(article_service.clone())
            .configure(routes)
            .default_service(web::route().to(not_found))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    // Only reached once the server shuts down
    info!("Server has stopped");

    Ok(())
}
